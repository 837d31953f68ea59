//! Forgiving field decoders for booking records.
//!
//! Booking records arrive from a dynamically typed frontend, so a field may be
//! a number one day and a string the next. Every decoder here maps anything it
//! cannot interpret to "absent" instead of failing the whole record.

use crate::Amount;
use chrono::{DateTime, NaiveDate};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Accepts integers, floats and numeric strings such as `"1,250.50"`, in major
/// units. Fractions are kept to the paisa.
pub fn amount<'de, D>(deserializer: D) -> Result<Option<Amount>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?
        .as_ref()
        .and_then(amount_from_value))
}

pub fn amount_from_value(value: &Value) -> Option<Amount> {
    Amount::from_value(value)
}

/// Baggage weight in kilograms: `15`, `15.0`, `"15"`, `"15kg"`, `"15 KG"`.
/// Zero and negative weights decode as absent.
pub fn weight_kg<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?
        .as_ref()
        .and_then(weight_from_value))
}

pub fn weight_from_value(value: &Value) -> Option<u32> {
    let kg = match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0)
                .map(|f| f.round() as u64)
        })?,
        Value::String(s) => {
            let lowered = s.trim().to_ascii_lowercase();
            let digits = lowered.trim_end_matches("kgs").trim_end_matches("kg").trim();
            digits.parse::<u64>().ok()?
        }
        _ => return None,
    };
    u32::try_from(kg).ok().filter(|kg| *kg > 0)
}

/// Booleans, `0`/`1`, and `"true"`/`"yes"`/`"1"` strings. Anything else is `false`.
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Bool(b)) => b,
        Some(Value::Number(n)) => n.as_i64().is_some_and(|n| n != 0),
        Some(Value::String(s)) => matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "yes" | "1"),
        _ => false,
    })
}

/// Strings and numbers as text; blank strings decode as absent.
pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?
        .as_ref()
        .and_then(text_from_value))
}

pub fn text_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// A nested object that degrades to `None` when it is not decodable.
pub fn object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(value @ Value::Object(_)) => serde_json::from_value(value).ok(),
        _ => None,
    })
}

/// A nested object that degrades to its default when it is not decodable.
pub fn object_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    object(deserializer).map(Option::unwrap_or_default)
}

/// A list whose undecodable entries become `T::default()`, keeping positions stable.
pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).unwrap_or_default())
            .collect(),
        _ => Vec::new(),
    })
}

/// Normalises a date or timestamp to `YYYY-MM-DD`; unparseable text is kept as-is.
pub fn normalize_date(raw: &str) -> String {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%Y-%m-%d").to_string();
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return ts.date_naive().format("%Y-%m-%d").to_string();
    }
    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Sample {
        #[serde(deserialize_with = "amount")]
        price: Option<Amount>,
        #[serde(deserialize_with = "weight_kg")]
        weight: Option<u32>,
        #[serde(deserialize_with = "flag")]
        enabled: bool,
        #[serde(deserialize_with = "text")]
        label: Option<String>,
    }

    fn sample(value: serde_json::Value) -> Sample {
        serde_json::from_value(value).expect("sample is always decodable")
    }

    #[test]
    fn test_amount_accepts_numbers_and_numeric_text() {
        assert_eq!(sample(json!({"price": 500})).price, Some(Amount::from_major(500)));
        assert_eq!(sample(json!({"price": 499.5})).price, Some(Amount::from_minor(49950)));
        assert_eq!(sample(json!({"price": "1,250"})).price, Some(Amount::from_major(1250)));
        assert_eq!(sample(json!({"price": "free"})).price, None);
        assert_eq!(sample(json!({"price": null})).price, None);
        assert_eq!(sample(json!({"price": {"amount": 3}})).price, None);
        assert_eq!(sample(json!({})).price, None);
    }

    #[test]
    fn test_weight_parses_suffixes() {
        assert_eq!(sample(json!({"weight": 15})).weight, Some(15));
        assert_eq!(sample(json!({"weight": "20kg"})).weight, Some(20));
        assert_eq!(sample(json!({"weight": " 10 KG "})).weight, Some(10));
        assert_eq!(sample(json!({"weight": 0})).weight, None);
        assert_eq!(sample(json!({"weight": -5})).weight, None);
        assert_eq!(sample(json!({"weight": "heavy"})).weight, None);
    }

    #[test]
    fn test_flag_and_text() {
        assert!(sample(json!({"enabled": true})).enabled);
        assert!(sample(json!({"enabled": "yes"})).enabled);
        assert!(sample(json!({"enabled": 1})).enabled);
        assert!(!sample(json!({"enabled": "nope"})).enabled);
        assert!(!sample(json!({})).enabled);

        assert_eq!(sample(json!({"label": " 12A "})).label.as_deref(), Some("12A"));
        assert_eq!(sample(json!({"label": 14})).label.as_deref(), Some("14"));
        assert_eq!(sample(json!({"label": "   "})).label, None);
    }

    #[test]
    fn test_normalize_date() {
        assert_eq!(normalize_date("2025-03-14"), "2025-03-14");
        assert_eq!(normalize_date("2025-03-14T18:30:00.000Z"), "2025-03-14");
        assert_eq!(normalize_date("next tuesday"), "next tuesday");
    }
}
