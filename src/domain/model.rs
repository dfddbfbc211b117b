use crate::utils::error::{QkamuraError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// One vacancy check: the location to query, the stay dates to watch and the
/// room categories to match against the provider's inventory grid.
#[derive(Debug, Clone)]
pub struct StayRequest {
    pub location: String,
    pub stay_dates: Vec<u32>,
    pub room_ids: Vec<u32>,
}

/// Parsed vacancy-search response. Rebuilt on every call, no identity beyond
/// content.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Reservation {
    #[serde(default)]
    pub rooms: Vec<Room>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Room {
    #[serde(deserialize_with = "u32_from_string")]
    pub room_id: u32,
    #[serde(rename = "aki")]
    pub vacancies: Vec<Vacancy>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Vacancy {
    /// Provider-format date, `YYYY/M/D` without zero padding. Kept as text for
    /// the lifetime of the payload; consumers compare by parsed calendar value.
    #[serde(rename = "aki_date")]
    pub date: String,
    #[serde(rename = "aki_num", deserialize_with = "u32_from_string")]
    pub count: u32,
}

/// Slack `chat.postMessage` request body.
#[derive(Debug, Clone, Serialize)]
pub struct PostMessage {
    pub channel: String,
    pub text: String,
}

// room_id and aki_num arrive as numeric strings in the payload.
fn u32_from_string<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    raw.parse()
        .map_err(|_| serde::de::Error::custom(format!("expected numeric string, got {:?}", raw)))
}

/// Parses an operator-supplied stay date, an 8-digit YYYYMMDD integer.
pub fn parse_stay_date(value: u32) -> Result<NaiveDate> {
    let raw = value.to_string();
    if raw.len() != 8 {
        return Err(QkamuraError::DateFormatError {
            value: raw,
            reason: "expected 8 digits (YYYYMMDD)".to_string(),
        });
    }
    NaiveDate::parse_from_str(&raw, "%Y%m%d").map_err(|e| QkamuraError::DateFormatError {
        value: raw,
        reason: e.to_string(),
    })
}

/// Formats a date the way the provider expects it: `YYYY/M/D`, no zero padding.
pub fn provider_date(date: NaiveDate) -> String {
    date.format("%Y/%-m/%-d").to_string()
}

/// Parses a provider-side vacancy date (`YYYY/M/D`).
pub fn parse_provider_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y/%m/%d").ok()
}

/// Minimal date range covering a stay-date set, compared by calendar value
/// rather than by the raw integers.
pub fn covering_range(stay_dates: &[u32]) -> Result<(NaiveDate, NaiveDate)> {
    let first = match stay_dates.first() {
        Some(value) => parse_stay_date(*value)?,
        None => {
            return Err(QkamuraError::MissingConfigError {
                field: "stay-dates".to_string(),
            })
        }
    };
    let mut start = first;
    let mut end = first;
    for value in &stay_dates[1..] {
        let date = parse_stay_date(*value)?;
        start = start.min(date);
        end = end.max(date);
    }
    Ok((start, end))
}
