use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::engine::core::record::FieldValue;
use crate::engine::types::ScalarValue;

/// Key of one group within its parent.
///
/// `Missing` is the key of records that lack the selector field, `Null` the key of
/// records holding an explicit null. Both serialize as `null` but stay distinct groups.
/// Floats with an integral value are stored as `Int`, so `1` and `1.0` share a group.
#[derive(Clone, Debug)]
pub enum GroupKey {
    Missing,
    Null,
    Boolean(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl GroupKey {
    pub fn from_field_value(value: FieldValue) -> Self {
        match value {
            FieldValue::Missing => GroupKey::Missing,
            FieldValue::Present(scalar) => GroupKey::from_scalar(scalar),
        }
    }

    pub fn from_scalar(value: ScalarValue) -> Self {
        match value {
            ScalarValue::Null => GroupKey::Null,
            ScalarValue::Boolean(b) => GroupKey::Boolean(b),
            ScalarValue::Int64(i) => GroupKey::Int(i),
            ScalarValue::Float64(f) => GroupKey::from_f64(f),
            ScalarValue::Utf8(s) => GroupKey::Text(s),
        }
    }

    pub fn from_f64(f: f64) -> Self {
        // -0.0 lands here too and becomes Int(0)
        if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
            GroupKey::Int(f as i64)
        } else {
            GroupKey::Float(f)
        }
    }

    /// Re-applies the float normalisation to a key built by hand (e.g. by a provider).
    pub fn normalized(self) -> Self {
        match self {
            GroupKey::Float(f) => GroupKey::from_f64(f),
            other => other,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            GroupKey::Missing | GroupKey::Null => Value::Null,
            GroupKey::Boolean(b) => Value::Bool(*b),
            GroupKey::Int(i) => Value::from(*i),
            GroupKey::Float(f) => Value::from(*f),
            GroupKey::Text(s) => Value::String(s.clone()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            GroupKey::Missing => 0,
            GroupKey::Null => 1,
            GroupKey::Boolean(_) => 2,
            GroupKey::Int(_) | GroupKey::Float(_) => 3,
            GroupKey::Text(_) => 4,
        }
    }
}

impl PartialEq for GroupKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for GroupKey {}

impl PartialOrd for GroupKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for GroupKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (GroupKey::Boolean(a), GroupKey::Boolean(b)) => a.cmp(b),
            (GroupKey::Int(a), GroupKey::Int(b)) => a.cmp(b),
            (GroupKey::Float(a), GroupKey::Float(b)) => a.total_cmp(b),
            // Int sorts first on the (unreachable once normalised) numeric tie
            (GroupKey::Int(a), GroupKey::Float(b)) => {
                (*a as f64).total_cmp(b).then(Ordering::Less)
            }
            (GroupKey::Float(a), GroupKey::Int(b)) => {
                a.total_cmp(&(*b as f64)).then(Ordering::Greater)
            }
            (GroupKey::Text(a), GroupKey::Text(b)) => a.cmp(b),
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }
}

impl Hash for GroupKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        match self {
            GroupKey::Missing | GroupKey::Null => {}
            GroupKey::Boolean(b) => b.hash(state),
            GroupKey::Int(i) => {
                0u8.hash(state);
                i.hash(state);
            }
            GroupKey::Float(f) => {
                1u8.hash(state);
                f.to_bits().hash(state);
            }
            GroupKey::Text(s) => s.hash(state),
        }
    }
}

impl Serialize for GroupKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_json().serialize(serializer)
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::Missing => f.write_str("<missing>"),
            GroupKey::Null => f.write_str("null"),
            GroupKey::Boolean(b) => write!(f, "{}", b),
            GroupKey::Int(i) => write!(f, "{}", i),
            GroupKey::Float(x) => write!(f, "{}", x),
            GroupKey::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for GroupKey {
    fn from(s: &str) -> Self {
        GroupKey::Text(s.to_string())
    }
}

impl From<i64> for GroupKey {
    fn from(i: i64) -> Self {
        GroupKey::Int(i)
    }
}
