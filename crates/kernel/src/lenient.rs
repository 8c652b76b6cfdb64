//! Tolerant number decoding for API payloads.
//!
//! The upstream API occasionally sends `null`, numeric strings or other junk
//! where a count is expected. Those never abort deserialization: counts fall
//! back to zero and optional values fall back to `None`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use serde_with::{DeserializeAs, SerializeAs};

/// Decodes any JSON value into an `f64`, defaulting to `0.0`.
pub struct Lenient;

/// Decodes any JSON value into an `Option<f64>`, defaulting to `None`.
pub struct LenientOption;

fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

impl<'de> DeserializeAs<'de, f64> for Lenient {
    fn deserialize_as<D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(number(&value).unwrap_or_default())
    }
}

impl SerializeAs<f64> for Lenient {
    fn serialize_as<S>(source: &f64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        source.serialize(serializer)
    }
}

impl<'de> DeserializeAs<'de, Option<f64>> for LenientOption {
    fn deserialize_as<D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(number(&value))
    }
}

impl SerializeAs<Option<f64>> for LenientOption {
    fn serialize_as<S>(source: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        source.serialize(serializer)
    }
}
