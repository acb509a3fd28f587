use chrono::NaiveDateTime;
use serde::de::{self, Deserializer};
use serde::Deserialize;
use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;

/// Datetime format used by the API in both queries and responses
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Check that something exists at a path (file or directory)
pub fn file_exists(path: &str) -> bool {
    !path.is_empty() && Path::new(path).exists()
}

/// Content type for a bulk upload, based on the file extension
pub fn determine_content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("csv") => "text/csv",
        _ => "text/plain",
    }
}

/// Join values into the comma-separated form the API expects, `None` if empty
pub fn join_values<T: Display>(values: &[T]) -> Option<String> {
    if values.is_empty() {
        return None;
    }

    Some(
        values
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(","),
    )
}

pub fn format_datetime(dt: Option<NaiveDateTime>) -> Option<String> {
    dt.map(|dt| dt.format(DATETIME_FORMAT).to_string())
}

pub fn bool_to_int(b: Option<bool>) -> Option<String> {
    b.map(|b| u8::from(b).to_string())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(u64),
    String(String),
}

/// Accept an id sent either as a JSON number or a numeric string
pub fn number_or_string<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::String(s) => s.trim().parse().map_err(de::Error::custom),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrBool {
    Bool(bool),
    String(String),
}

/// Normalise the file `error` field, which may be a message or a flag
pub fn string_or_bool<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        match Option::<StringOrBool>::deserialize(deserializer)? {
            Some(StringOrBool::String(s)) => s,
            Some(StringOrBool::Bool(true)) => "true".to_string(),
            Some(StringOrBool::Bool(false)) | None => String::new(),
        },
    )
}

/// Parse an enum value, treating an empty or missing string as `None`
pub fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(s) if !s.is_empty() => s.parse().map(Some).map_err(de::Error::custom),
        _ => Ok(None),
    }
}

/// Serde adapter for the API's `YYYY-MM-DD HH:MM:SS` timestamps
pub mod api_datetime {
    use super::DATETIME_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(dt: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&dt.format(DATETIME_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, DATETIME_FORMAT).map_err(de::Error::custom)
    }
}
