use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A single sampled price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    #[serde(deserialize_with = "deserialize_time")]
    pub time: DateTime<Utc>,
    pub price: f64,
}

impl Observation {
    pub fn new(time: DateTime<Utc>, price: f64) -> Self {
        Self { time, price }
    }
}

/// Wire representation of `time`: RFC 3339 text or epoch milliseconds.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawTime {
    Millis(i64),
    Fractional(f64),
    Text(String),
}

fn deserialize_time<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match RawTime::deserialize(deserializer)? {
        RawTime::Millis(ms) => Utc
            .timestamp_millis_opt(ms)
            .single()
            .ok_or_else(|| D::Error::custom(format!("timestamp out of range: {}", ms))),
        RawTime::Fractional(ms) => Utc
            .timestamp_millis_opt(ms.round() as i64)
            .single()
            .ok_or_else(|| D::Error::custom(format!("timestamp out of range: {}", ms))),
        RawTime::Text(s) => DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| D::Error::custom(format!("invalid time '{}': {}", s, e))),
    }
}
