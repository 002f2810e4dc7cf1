//! Lenient deserializers for TimeCamp payloads
//!
//! TimeCamp is loose with JSON types: ids arrive as numbers or numeric
//! strings, flags as `"0"`/`"1"`, and collections either as arrays or as
//! objects keyed by id.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(u64),
    Float(f64),
    Text(String),
}

fn number_from(raw: NumberOrString) -> Result<Option<u64>, String> {
    match raw {
        NumberOrString::Number(n) => Ok(Some(n)),
        NumberOrString::Float(f) if f >= 0.0 => Ok(Some(f as u64)),
        NumberOrString::Float(f) => Err(format!("negative number {f}")),
        NumberOrString::Text(s) if s.trim().is_empty() => Ok(None),
        NumberOrString::Text(s) => s
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| format!("expected a number, got {s:?}")),
    }
}

/// Accept `42` or `"42"`.
pub fn flexible_u64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let raw = NumberOrString::deserialize(deserializer)?;
    number_from(raw)
        .map_err(de::Error::custom)?
        .ok_or_else(|| de::Error::custom("expected a number, got an empty string"))
}

/// Accept `42`, `"42"`, `""` or `null`.
pub fn flexible_opt_u64<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<u64>, D::Error> {
    match Option::<NumberOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) => number_from(raw)
            .map(|n| n.filter(|n| *n > 0))
            .map_err(de::Error::custom),
    }
}

/// Accept `true`, `1`, `"1"` (and their falsy counterparts, or `null`).
pub fn flag_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => b,
        Some(Value::Number(n)) => n.as_u64().is_some_and(|n| n != 0),
        Some(Value::String(s)) => matches!(s.trim(), "1" | "true"),
        Some(other) => return Err(de::Error::custom(format!("expected a flag, got {other}"))),
    })
}

/// Normalize a collection that may be an array or an id-keyed object.
///
/// For keyed objects the key is injected as `id_field` when the entry does
/// not carry it. Entries that are not objects, or that do not decode as `T`,
/// are skipped with a warning so one bad row never hides the rest.
pub fn keyed_collection<T: DeserializeOwned>(value: Value, id_field: &str, what: &str) -> Vec<T> {
    let rows: Vec<Value> = match value {
        Value::Array(items) => items.into_iter().filter(Value::is_object).collect(),
        Value::Object(map) => map
            .into_iter()
            .filter_map(|(key, entry)| {
                let Value::Object(mut fields) = entry else {
                    return None;
                };
                if !fields.contains_key(id_field) {
                    fields.insert(id_field.to_string(), Value::String(key));
                }
                Some(Value::Object(fields))
            })
            .collect(),
        _ => Vec::new(),
    };

    rows.into_iter()
        .filter_map(|row| match serde_json::from_value(row) {
            Ok(item) => Some(item),
            Err(err) => {
                log::warn!("Skipping malformed {} row: {}", what, err);
                None
            }
        })
        .collect()
}

/// Parse a TimeCamp timestamp. Zone-less values are taken as local time.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .and_then(|naive| Local.from_local_datetime(&naive).earliest())
        .map(|local| local.with_timezone(&Utc))
}
