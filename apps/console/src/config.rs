use std::fs;

use serde::Deserialize;

#[derive(Debug, Clone)]
pub struct Settings {
    pub api_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: "https://api.spacexdata.com/v2".into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_url: Option<String>,
}

/// Defaults, overridden by an optional `grid.toml` next to the binary,
/// overridden in turn by `CAPSULE_API_URL`.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("grid.toml") {
        if let Ok(file_cfg) = toml::from_str::<FileSettings>(&raw) {
            if let Some(v) = file_cfg.api_url {
                settings.api_url = v;
            }
        }
    }

    if let Ok(v) = std::env::var("CAPSULE_API_URL") {
        settings.api_url = v;
    }

    settings
}
