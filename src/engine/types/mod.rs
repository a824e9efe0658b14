use std::cmp::Ordering;
use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::{Number, Value as JsonValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalType {
    Null,
    Boolean,
    Integer,
    Float,
    String,
    /// Field observed with incompatible types across records
    Mixed,
}

impl LogicalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogicalType::Null => "Null",
            LogicalType::Boolean => "Boolean",
            LogicalType::Integer => "Integer",
            LogicalType::Float => "Float",
            LogicalType::String => "String",
            LogicalType::Mixed => "Mixed",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, LogicalType::Integer | LogicalType::Float)
    }

    /// Combines two observations of the same field.
    pub fn merge(self, other: LogicalType) -> LogicalType {
        use LogicalType::*;
        match (self, other) {
            (a, b) if a == b => a,
            (Null, t) | (t, Null) => t,
            (Integer, Float) | (Float, Integer) => Float,
            _ => Mixed,
        }
    }
}

impl fmt::Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    Null,
    Boolean(bool),
    Int64(i64),
    Float64(f64),
    Utf8(String),
}

impl ScalarValue {
    pub fn logical_type(&self) -> LogicalType {
        match self {
            ScalarValue::Null => LogicalType::Null,
            ScalarValue::Boolean(_) => LogicalType::Boolean,
            ScalarValue::Int64(_) => LogicalType::Integer,
            ScalarValue::Float64(_) => LogicalType::Float,
            ScalarValue::Utf8(_) => LogicalType::String,
        }
    }

    pub fn to_json(&self) -> JsonValue {
        match self {
            ScalarValue::Null => JsonValue::Null,
            ScalarValue::Boolean(b) => JsonValue::Bool(*b),
            ScalarValue::Int64(i) => JsonValue::Number(Number::from(*i)),
            ScalarValue::Float64(f) => Number::from_f64(*f)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            ScalarValue::Utf8(s) => JsonValue::String(s.clone()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ScalarValue::Null)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, ScalarValue::Int64(_) | ScalarValue::Float64(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ScalarValue::Utf8(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ScalarValue::Float64(f) => Some(*f),
            ScalarValue::Int64(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Compares two values of compatible kinds. Numbers compare across Int64/Float64;
    /// `None` means the kinds are not comparable (including any null operand).
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (ScalarValue::Int64(a), ScalarValue::Int64(b)) => Some(a.cmp(b)),
            (ScalarValue::Boolean(a), ScalarValue::Boolean(b)) => Some(a.cmp(b)),
            (ScalarValue::Utf8(a), ScalarValue::Utf8(b)) => Some(a.cmp(b)),
            (a, b) if a.is_numeric() && b.is_numeric() => {
                let (va, vb) = (a.as_f64()?, b.as_f64()?);
                va.partial_cmp(&vb)
            }
            _ => None,
        }
    }
}

impl From<JsonValue> for ScalarValue {
    fn from(value: JsonValue) -> Self {
        ScalarValue::from(&value)
    }
}

impl From<&JsonValue> for ScalarValue {
    fn from(value: &JsonValue) -> Self {
        match value {
            JsonValue::Null => ScalarValue::Null,
            JsonValue::Bool(b) => ScalarValue::Boolean(*b),
            JsonValue::Number(num) => {
                if let Some(i) = num.as_i64() {
                    ScalarValue::Int64(i)
                } else if let Some(f) = num.as_f64() {
                    // u64 beyond i64::MAX lands here as well
                    ScalarValue::Float64(f)
                } else {
                    ScalarValue::Utf8(num.to_string())
                }
            }
            JsonValue::String(s) => ScalarValue::Utf8(s.clone()),
            JsonValue::Array(_) | JsonValue::Object(_) => {
                // Complex values are addressed as their JSON text
                ScalarValue::Utf8(value.to_string())
            }
        }
    }
}

impl From<&ScalarValue> for JsonValue {
    fn from(value: &ScalarValue) -> Self {
        value.to_json()
    }
}

impl Serialize for ScalarValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_json().serialize(serializer)
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::Null => f.write_str("null"),
            ScalarValue::Boolean(b) => write!(f, "{}", b),
            ScalarValue::Int64(i) => write!(f, "{}", i),
            ScalarValue::Float64(v) => write!(f, "{}", v),
            ScalarValue::Utf8(s) => write!(f, "\"{}\"", s),
        }
    }
}
