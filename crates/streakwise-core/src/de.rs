//! Lenient deserializers for values coming from callers

use crate::{completion::parse_or_zero, WeekStart};
use chrono::{DateTime, NaiveDate};
use serde::{de::Error, Deserialize, Deserializer};

pub(crate) fn one() -> u32 {
    1
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Number(f64),
    Text(String),
}

/// Accepts a number, a numeric string, or null
pub(crate) fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawNumber>::deserialize(deserializer)?;
    Ok(raw.map(|raw| match raw {
        RawNumber::Number(n) if n.is_finite() => n,
        RawNumber::Number(_) => 0.0,
        RawNumber::Text(s) => parse_or_zero(&s),
    }))
}

pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<u8>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp (its calendar date is kept)
pub(crate) fn date_or_timestamp<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };

    if let Ok(date) = NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
        return Ok(Some(date));
    }

    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| Some(dt.date_naive()))
        .map_err(|_| D::Error::custom(format!("invalid date: {}", raw)))
}

#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum WeekStartRepr {
    Index(u8),
    Name(String),
}

impl TryFrom<WeekStartRepr> for WeekStart {
    type Error = String;

    fn try_from(repr: WeekStartRepr) -> Result<Self, Self::Error> {
        match repr {
            WeekStartRepr::Index(0) => Ok(WeekStart::Sunday),
            WeekStartRepr::Index(1) => Ok(WeekStart::Monday),
            WeekStartRepr::Index(n) => Err(format!("week start must be 0 or 1, got {}", n)),
            WeekStartRepr::Name(name) => match name.to_lowercase().as_str() {
                "sunday" => Ok(WeekStart::Sunday),
                "monday" => Ok(WeekStart::Monday),
                _ => Err(format!("unknown week start: {}", name)),
            },
        }
    }
}
