//! Typed document field values and their cross-type ordering.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A single value stored in a document field
///
/// Values of different types are totally ordered so that any field can act
/// as a sort key: null < boolean < number < timestamp < string < array.
/// Integers and doubles share the number rank and compare numerically.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum FieldValue {
    Null,
    Boolean(bool),
    Integer(i64),
    Double(f64),
    Timestamp(DateTime<Utc>),
    String(String),
    Array(Vec<FieldValue>),
}

impl FieldValue {
    fn type_rank(&self) -> u8 {
        match self {
            FieldValue::Null => 0,
            FieldValue::Boolean(_) => 1,
            FieldValue::Integer(_) | FieldValue::Double(_) => 2,
            FieldValue::Timestamp(_) => 3,
            FieldValue::String(_) => 4,
            FieldValue::Array(_) => 5,
        }
    }

    /// Total order used for sorting and cursor positioning
    pub fn compare(&self, other: &FieldValue) -> Ordering {
        match (self, other) {
            (FieldValue::Null, FieldValue::Null) => Ordering::Equal,
            (FieldValue::Boolean(a), FieldValue::Boolean(b)) => a.cmp(b),
            (FieldValue::Integer(a), FieldValue::Integer(b)) => a.cmp(b),
            (FieldValue::Integer(a), FieldValue::Double(b)) => (*a as f64).total_cmp(b),
            (FieldValue::Double(a), FieldValue::Integer(b)) => a.total_cmp(&(*b as f64)),
            (FieldValue::Double(a), FieldValue::Double(b)) => a.total_cmp(b),
            (FieldValue::Timestamp(a), FieldValue::Timestamp(b)) => a.cmp(b),
            (FieldValue::String(a), FieldValue::String(b)) => a.cmp(b),
            (FieldValue::Array(a), FieldValue::Array(b)) => {
                for (left, right) in a.iter().zip(b.iter()) {
                    let ordering = left.compare(right);
                    if ordering != Ordering::Equal {
                        return ordering;
                    }
                }
                a.len().cmp(&b.len())
            }
            _ => self.type_rank().cmp(&other.type_rank()),
        }
    }

    /// Equality as seen by equality filters (1 and 1.0 match)
    pub fn matches(&self, other: &FieldValue) -> bool {
        self.compare(other) == Ordering::Equal
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(n) => Some(*n),
            FieldValue::Double(d) if d.fract() == 0.0 && d.is_finite() => Some(*d as i64),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        self.as_i64().and_then(|n| u64::try_from(n).ok())
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(n) => Some(*n as f64),
            FieldValue::Double(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Timestamps may come back from JSON backends as epoch microseconds
    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            FieldValue::Timestamp(ts) => Some(*ts),
            FieldValue::Integer(micros) => Utc.timestamp_micros(*micros).single(),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[FieldValue]> {
        match self {
            FieldValue::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Name of the value type, used in decode error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Null => "null",
            FieldValue::Boolean(_) => "boolean",
            FieldValue::Integer(_) => "integer",
            FieldValue::Double(_) => "double",
            FieldValue::Timestamp(_) => "timestamp",
            FieldValue::String(_) => "string",
            FieldValue::Array(_) => "array",
        }
    }
}

impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        self.type_name() == other.type_name() && self.compare(other) == Ordering::Equal
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => write!(f, "null"),
            FieldValue::Boolean(b) => write!(f, "{}", b),
            FieldValue::Integer(n) => write!(f, "{}", n),
            FieldValue::Double(d) => write!(f, "{}", d),
            FieldValue::Timestamp(ts) => write!(f, "{}", ts.to_rfc3339()),
            FieldValue::String(s) => write!(f, "{:?}", s),
            FieldValue::Array(items) => {
                let parts: Vec<String> = items.iter().map(|v| v.to_string()).collect();
                write!(f, "[{}]", parts.join(", "))
            }
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Integer(i64::from(value))
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        FieldValue::Integer(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Double(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::Timestamp(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    fn from(values: Vec<T>) -> Self {
        FieldValue::Array(values.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_cross_type_ordering() {
        let ladder = vec![
            FieldValue::Null,
            FieldValue::Boolean(true),
            FieldValue::Integer(3),
            FieldValue::Timestamp(Utc::now()),
            FieldValue::String("a".into()),
            FieldValue::Array(vec![]),
        ];
        for pair in ladder.windows(2) {
            assert_eq!(pair[0].compare(&pair[1]), Ordering::Less);
        }
    }

    #[test]
    fn test_numbers_compare_numerically() {
        assert_eq!(FieldValue::Integer(2).compare(&FieldValue::Double(2.5)), Ordering::Less);
        assert!(FieldValue::Integer(1).matches(&FieldValue::Double(1.0)));
        assert_ne!(FieldValue::Integer(1), FieldValue::Double(1.0));
    }

    #[test]
    fn test_timestamps_order_chronologically() {
        let now = Utc::now();
        let earlier = FieldValue::Timestamp(now - Duration::seconds(1));
        let later = FieldValue::Timestamp(now);
        assert_eq!(earlier.compare(&later), Ordering::Less);
    }

    #[test]
    fn test_array_ordering_is_lexicographic() {
        let short = FieldValue::from(vec![1i64, 2]);
        let long = FieldValue::from(vec![1i64, 2, 0]);
        let bigger = FieldValue::from(vec![1i64, 3]);
        assert_eq!(short.compare(&long), Ordering::Less);
        assert_eq!(long.compare(&bigger), Ordering::Less);
    }

    #[test]
    fn test_timestamp_from_micros() {
        let ts = Utc.timestamp_micros(1_700_000_000_123_456).single().unwrap();
        assert_eq!(FieldValue::Integer(1_700_000_000_123_456).as_timestamp(), Some(ts));
        assert_eq!(FieldValue::Timestamp(ts).as_timestamp(), Some(ts));
        assert_eq!(FieldValue::String("x".into()).as_timestamp(), None);
    }

    #[test]
    fn test_tagged_serialization() {
        let json = serde_json::to_value(FieldValue::from("rent")).unwrap();
        assert_eq!(json, serde_json::json!({"type": "string", "value": "rent"}));

        let null = serde_json::to_value(FieldValue::Null).unwrap();
        assert_eq!(null, serde_json::json!({"type": "null"}));
    }

    #[test]
    fn test_optional_conversion() {
        assert!(FieldValue::from(None::<u64>).is_null());
        assert_eq!(FieldValue::from(Some(5u64)).as_u64(), Some(5));
    }
}
