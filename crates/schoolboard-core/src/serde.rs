//! Coercion helpers for form-shaped input.
//!
//! HTML forms deliver every value as a string, JSON clients send typed
//! values. These helpers accept both so one DTO serves both encodings:
//! empty strings become `None`, numeric strings become integers, and
//! checkbox values become booleans.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::{self, Deserializer};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Int(i64),
    Bool(bool),
    Float(f64),
    Str(String),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Scalar::Int(n) => n.to_string(),
            Scalar::Bool(b) => b.to_string(),
            Scalar::Float(f) => f.to_string(),
            Scalar::Str(s) => s,
        }
    }

    fn into_i64<E: de::Error>(self) -> Result<Option<i64>, E> {
        match self {
            Scalar::Int(n) => Ok(Some(n)),
            Scalar::Float(f) if f.fract() == 0.0 => Ok(Some(f as i64)),
            Scalar::Str(s) if s.trim().is_empty() => Ok(None),
            Scalar::Str(s) => s
                .trim()
                .parse::<i64>()
                .map(Some)
                .map_err(|_| E::custom(format!("`{}` is not a whole number", s))),
            other => Err(E::custom(format!(
                "`{}` is not a whole number",
                other.into_text()
            ))),
        }
    }
}

fn to_i32<E: de::Error>(value: i64) -> Result<i32, E> {
    i32::try_from(value).map_err(|_| E::custom(format!("{} is out of range", value)))
}

/// Empty or whitespace-only strings become `None`.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Scalar> = Option::deserialize(deserializer)?;
    Ok(value
        .map(Scalar::into_text)
        .filter(|s| !s.trim().is_empty()))
}

pub fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Scalar> = Option::deserialize(deserializer)?;
    match value {
        Some(v) => v.into_i64(),
        None => Ok(None),
    }
}

/// Required integer given as a number or a numeric string (`"3"` → 3).
pub fn deserialize_number<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Scalar::deserialize(deserializer)?;
    match value.into_i64()? {
        Some(n) => to_i32(n),
        None => Err(de::Error::custom("a number is required")),
    }
}

pub fn deserialize_optional_number<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_optional_i64(deserializer)?
        .map(to_i32)
        .transpose()
}

/// Repeated form keys or a JSON array of ids; blank entries are dropped.
pub fn deserialize_id_list<'de, D>(deserializer: D) -> Result<Vec<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let values: Vec<Scalar> = Vec::deserialize(deserializer)?;
    let mut ids = Vec::with_capacity(values.len());
    for value in values {
        if let Some(n) = value.into_i64()? {
            ids.push(to_i32(n)?);
        }
    }
    Ok(ids)
}

pub fn deserialize_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values: Vec<Scalar> = Vec::deserialize(deserializer)?;
    Ok(values
        .into_iter()
        .map(Scalar::into_text)
        .filter(|s| !s.trim().is_empty())
        .collect())
}

/// Checkbox semantics: `true`, `on`, `1` and `yes` are true, anything else
/// (or a missing key) is false.
pub fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Scalar> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(Scalar::Bool(b)) => b,
        Some(Scalar::Int(n)) => n == 1,
        Some(other) => parse_flag(&other.into_text()),
        None => false,
    })
}

pub fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "true" | "on" | "1" | "yes"
    )
}

/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM[:SS]` (read as UTC) and `YYYY-MM-DD`
/// (midnight UTC).
pub fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

pub fn deserialize_datetime<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Scalar::deserialize(deserializer)?.into_text();
    if raw.trim().is_empty() {
        return Err(de::Error::custom("a date is required"));
    }
    parse_datetime(&raw).ok_or_else(|| de::Error::custom(format!("`{}` is not a valid date", raw)))
}
