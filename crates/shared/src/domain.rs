use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Placeholder substituted for any missing display field.
pub const PLACEHOLDER: &str = "---";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchField {
    CapsuleId,
    CapsuleSerial,
}

impl SearchField {
    /// Key used verbatim in the upstream query string.
    pub fn as_query_key(&self) -> &'static str {
        match self {
            SearchField::CapsuleId => "capsule_id",
            SearchField::CapsuleSerial => "capsule_serial",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapsuleStatus {
    Active,
    Unknown,
    Retired,
}

impl CapsuleStatus {
    pub fn as_query_value(&self) -> &'static str {
        match self {
            CapsuleStatus::Active => "active",
            CapsuleStatus::Unknown => "unknown",
            CapsuleStatus::Retired => "retired",
        }
    }
}

impl FromStr for CapsuleStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(CapsuleStatus::Active),
            "unknown" => Ok(CapsuleStatus::Unknown),
            "retired" => Ok(CapsuleStatus::Retired),
            other => Err(format!("unknown capsule status: {other}")),
        }
    }
}

/// Rows-per-page choices offered by the grid. `All` carries the upstream
/// `-1` sentinel, meaning "no limit" is left to the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageSize {
    Five,
    #[default]
    Ten,
    TwentyFive,
    All,
}

impl PageSize {
    pub fn limit(&self) -> i64 {
        match self {
            PageSize::Five => 5,
            PageSize::Ten => 10,
            PageSize::TwentyFive => 25,
            PageSize::All => -1,
        }
    }
}

impl FromStr for PageSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "5" => Ok(PageSize::Five),
            "10" => Ok(PageSize::Ten),
            "25" => Ok(PageSize::TwentyFive),
            "all" | "-1" => Ok(PageSize::All),
            other => Err(format!(
                "unsupported page size: {other} (use 5, 10, 25 or all)"
            )),
        }
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageSize::All => write!(f, "all"),
            other => write!(f, "{}", other.limit()),
        }
    }
}

/// Filter inputs as edited by the user. They only take effect on submit;
/// `search_text` is ignored at query-building time unless `search_field`
/// is set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub search_field: Option<SearchField>,
    pub search_text: String,
    pub status: Option<CapsuleStatus>,
}

impl FilterState {
    pub fn is_empty(&self) -> bool {
        self.search_field.is_none() && self.search_text.is_empty() && self.status.is_none()
    }
}

/// One fully formatted table row. Every field is already display-ready:
/// missing source fields arrive as the placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapsuleRow {
    pub serial: String,
    pub status: String,
    pub launch_date: String,
    pub landings: String,
    pub kind: String,
    pub details: String,
    pub reuse_count: String,
}

/// Everything needed to render one page of the grid. Replaced wholesale
/// on every successful fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridResult {
    pub rows: Vec<CapsuleRow>,
    pub total_count: u64,
}
