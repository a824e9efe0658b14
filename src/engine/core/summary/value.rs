use std::cmp::Ordering;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Serialize, Serializer};

/// A number produced by an aggregate. `min`/`max` keep the field's native
/// representation; `sum`/`avg` are always `Decimal`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericValue {
    Int(i64),
    Float(f64),
    Decimal(Decimal),
}

impl NumericValue {
    pub fn to_decimal(&self) -> Option<Decimal> {
        match self {
            NumericValue::Int(i) => Some(Decimal::from(*i)),
            NumericValue::Float(f) => Decimal::try_from(*f).ok(),
            NumericValue::Decimal(d) => Some(*d),
        }
    }

    fn to_f64(&self) -> f64 {
        match self {
            NumericValue::Int(i) => *i as f64,
            NumericValue::Float(f) => *f,
            NumericValue::Decimal(d) => d.to_f64().unwrap_or(f64::NAN),
        }
    }

    /// Numeric ordering across representations. An Int and a Float that are equal
    /// compare as Equal.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (NumericValue::Int(a), NumericValue::Int(b)) => a.cmp(b),
            (NumericValue::Decimal(a), NumericValue::Decimal(b)) => a.cmp(b),
            (a, b) => a.to_f64().total_cmp(&b.to_f64()),
        }
    }

    /// Tie-break for min/max when two candidates are numerically equal: the integer
    /// representation wins, so the result does not depend on record order.
    pub(crate) fn prefer_on_tie(self, other: Self) -> Self {
        match (self, other) {
            (NumericValue::Int(_), _) => self,
            (_, NumericValue::Int(_)) => other,
            _ => self,
        }
    }
}

impl Serialize for NumericValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            NumericValue::Int(i) => serializer.serialize_i64(*i),
            NumericValue::Float(f) => serializer.serialize_f64(*f),
            NumericValue::Decimal(d) => {
                let d = d.normalize();
                if d.scale() == 0 {
                    if let Some(i) = d.to_i64() {
                        return serializer.serialize_i64(i);
                    }
                }
                match d.to_f64() {
                    Some(f) => serializer.serialize_f64(f),
                    None => serializer.serialize_str(&d.to_string()),
                }
            }
        }
    }
}

/// One cell of a summary vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SummaryValue {
    Count(u64),
    Number(NumericValue),
    Null,
}

impl SummaryValue {
    pub fn int(v: i64) -> Self {
        SummaryValue::Number(NumericValue::Int(v))
    }

    pub fn decimal(v: Decimal) -> Self {
        SummaryValue::Number(NumericValue::Decimal(v))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, SummaryValue::Null)
    }
}

impl Serialize for SummaryValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            SummaryValue::Count(c) => serializer.serialize_u64(*c),
            SummaryValue::Number(n) => n.serialize(serializer),
            SummaryValue::Null => serializer.serialize_none(),
        }
    }
}

/// Ordered summary values, aligned with the summary specs that produced them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SummaryVector(pub Vec<SummaryValue>);

impl SummaryVector {
    pub fn values(&self) -> &[SummaryValue] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<SummaryValue>> for SummaryVector {
    fn from(values: Vec<SummaryValue>) -> Self {
        SummaryVector(values)
    }
}
