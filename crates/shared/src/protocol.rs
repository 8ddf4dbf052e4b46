use serde::{Deserialize, Deserializer, Serialize};

/// One capsule as the listing service reports it. Any field may be null
/// or missing entirely; presence defaulting happens at row-mapping time,
/// not here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CapsuleRecord {
    pub capsule_serial: Option<String>,
    pub details: Option<String>,
    pub landings: Option<i64>,
    pub original_launch: Option<String>,
    pub reuse_count: Option<i64>,
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Response body of the capsule listing endpoint: one page of records
/// plus the total count across all pages.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CapsuleListResponse {
    pub results: Vec<CapsuleRecord>,
    #[serde(default, deserialize_with = "count_from_string_or_number")]
    pub count: u64,
}

/// The upstream service reports `count` either as a JSON number or as a
/// quoted decimal string. Missing or unparseable counts collapse to 0.
fn count_from_string_or_number<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawCount {
        Number(i64),
        Text(String),
    }

    let raw: Option<RawCount> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawCount::Number(n)) => n.max(0) as u64,
        Some(RawCount::Text(s)) => s.trim().parse::<u64>().unwrap_or(0),
        None => 0,
    })
}
