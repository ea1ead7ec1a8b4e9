//! Number formatting for the persisted JSON form.
//!
//! Authored files write whole numbers without a fractional part (`"count": 3`,
//! `"spawnChance": 1`). Numeric fields are held as `f64` in memory, so
//! serialization writes integral values back as integers to keep exported
//! files identical to what was authored.

use serde::Serializer;

/// Largest integer an `f64` represents exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Returns `Some(n)` if `value` is a whole number that fits in an `i64` exactly.
pub fn as_whole(value: f64) -> Option<i64> {
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
        Some(value as i64)
    } else {
        None
    }
}

/// Converts an `f64` into a JSON number, preferring the integer form.
///
/// Non-finite values have no JSON representation and map to `None`.
pub fn to_json_number(value: f64) -> Option<serde_json::Value> {
    match as_whole(value) {
        Some(n) => Some(serde_json::Value::from(n)),
        None => serde_json::Number::from_f64(value).map(serde_json::Value::Number),
    }
}

/// Serializes an `f64`, writing whole numbers as integers.
pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    match as_whole(*value) {
        Some(n) => serializer.serialize_i64(n),
        None => serializer.serialize_f64(*value),
    }
}

/// [`serialize`] for optional fields; pair with `skip_serializing_if = "Option::is_none"`.
pub fn serialize_opt<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(v) => serialize(v, serializer),
        None => serializer.serialize_none(),
    }
}
