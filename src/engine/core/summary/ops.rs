use std::cmp::Ordering;

use rust_decimal::Decimal;

use crate::engine::core::record::{FieldAccessor, FieldValue, Record};
use crate::engine::core::summary::partial::{AggState, pick};
use crate::engine::core::summary::spec::{AggregateKind, SummarySpec};
use crate::engine::core::summary::value::{NumericValue, SummaryValue};
use crate::engine::errors::LoadError;
use crate::engine::types::ScalarValue;

/// Aggregator enum with concrete implementations per operation
#[derive(Debug, Clone, PartialEq)]
pub enum AggregatorImpl {
    CountAll(CountAll),
    Sum(Sum),
    Min(Min),
    Max(Max),
    Avg(Avg),
}

impl AggregatorImpl {
    pub fn from_spec(spec: &SummarySpec) -> Self {
        let field = spec.field.clone();
        match spec.aggregate {
            AggregateKind::Count => Self::CountAll(CountAll::new()),
            AggregateKind::Sum => Self::Sum(Sum::new(field)),
            AggregateKind::Avg => Self::Avg(Avg::new(field)),
            AggregateKind::Min => Self::Min(Min::new(field)),
            AggregateKind::Max => Self::Max(Max::new(field)),
        }
    }

    pub fn field(&self) -> Option<&FieldAccessor> {
        match self {
            AggregatorImpl::CountAll(_) => None,
            AggregatorImpl::Sum(a) => a.field.as_ref(),
            AggregatorImpl::Min(a) => a.field.as_ref(),
            AggregatorImpl::Max(a) => a.field.as_ref(),
            AggregatorImpl::Avg(a) => a.field.as_ref(),
        }
    }

    /// Update aggregator with one contributing record
    pub fn update_from_record(&mut self, record: &Record) -> Result<(), LoadError> {
        match self {
            AggregatorImpl::CountAll(a) => {
                a.update();
                Ok(())
            }
            AggregatorImpl::Sum(a) => {
                if let Some(v) = numeric_input(record, a.field.as_ref(), AggregateKind::Sum)? {
                    a.update_value(v)?;
                }
                Ok(())
            }
            AggregatorImpl::Avg(a) => {
                if let Some(v) = numeric_input(record, a.field.as_ref(), AggregateKind::Avg)? {
                    a.update_value(v)?;
                }
                Ok(())
            }
            AggregatorImpl::Min(a) => {
                if let Some(v) = numeric_input(record, a.field.as_ref(), AggregateKind::Min)? {
                    a.update_value(v);
                }
                Ok(())
            }
            AggregatorImpl::Max(a) => {
                if let Some(v) = numeric_input(record, a.field.as_ref(), AggregateKind::Max)? {
                    a.update_value(v);
                }
                Ok(())
            }
        }
    }

    /// Captures the mergeable state without finalizing
    pub fn snapshot(&self) -> AggState {
        match self {
            AggregatorImpl::CountAll(a) => AggState::Count { count: a.count },
            AggregatorImpl::Sum(a) => AggState::Sum { sum: a.sum },
            AggregatorImpl::Avg(a) => AggState::Avg {
                sum: a.sum,
                count: a.count,
            },
            AggregatorImpl::Min(a) => AggState::Min { min: a.min },
            AggregatorImpl::Max(a) => AggState::Max { max: a.max },
        }
    }

    pub fn finalize(&self) -> SummaryValue {
        self.snapshot().finalize()
    }
}

fn field_name(field: Option<&FieldAccessor>) -> &str {
    field.map(|f| f.name()).unwrap_or("*")
}

/// Reads the numeric input of an aggregate. Missing fields and nulls contribute
/// nothing; any other non-numeric value is a type mismatch.
fn numeric_input(
    record: &Record,
    field: Option<&FieldAccessor>,
    aggregate: AggregateKind,
) -> Result<Option<NumericValue>, LoadError> {
    let Some(accessor) = field else {
        return Ok(None);
    };
    match record.get_field_scalar(accessor) {
        FieldValue::Missing | FieldValue::Present(ScalarValue::Null) => Ok(None),
        FieldValue::Present(ScalarValue::Int64(i)) => Ok(Some(NumericValue::Int(i))),
        FieldValue::Present(ScalarValue::Float64(f)) => Ok(Some(NumericValue::Float(f))),
        FieldValue::Present(other) => Err(LoadError::AggregateTypeMismatch {
            field: accessor.name().to_string(),
            aggregate,
            found: other.logical_type(),
        }),
    }
}

fn overflow(field: &str) -> LoadError {
    LoadError::NumericOverflow {
        field: field.to_string(),
    }
}

fn to_decimal(value: NumericValue, field: &str) -> Result<Decimal, LoadError> {
    value.to_decimal().ok_or_else(|| overflow(field))
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CountAll {
    count: u64,
}

impl CountAll {
    pub fn new() -> Self {
        Self { count: 0 }
    }

    #[inline]
    pub fn update(&mut self) {
        self.count += 1;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sum {
    pub field: Option<FieldAccessor>,
    sum: Decimal,
}

impl Sum {
    pub fn new(field: Option<FieldAccessor>) -> Self {
        Self {
            field,
            sum: Decimal::ZERO,
        }
    }

    pub fn update_value(&mut self, v: NumericValue) -> Result<(), LoadError> {
        let field = field_name(self.field.as_ref());
        let v = to_decimal(v, field)?;
        self.sum = self
            .sum
            .checked_add(v)
            .ok_or_else(|| overflow(field))?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Avg {
    pub field: Option<FieldAccessor>,
    sum: Decimal,
    count: u64,
}

impl Avg {
    pub fn new(field: Option<FieldAccessor>) -> Self {
        Self {
            field,
            sum: Decimal::ZERO,
            count: 0,
        }
    }

    pub fn update_value(&mut self, v: NumericValue) -> Result<(), LoadError> {
        let field = field_name(self.field.as_ref());
        let v = to_decimal(v, field)?;
        self.sum = self
            .sum
            .checked_add(v)
            .ok_or_else(|| overflow(field))?;
        self.count += 1;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Min {
    pub field: Option<FieldAccessor>,
    min: Option<NumericValue>,
}

impl Min {
    pub fn new(field: Option<FieldAccessor>) -> Self {
        Self { field, min: None }
    }

    pub fn update_value(&mut self, v: NumericValue) {
        self.min = pick(self.min, Some(v), Ordering::Less);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Max {
    pub field: Option<FieldAccessor>,
    max: Option<NumericValue>,
}

impl Max {
    pub fn new(field: Option<FieldAccessor>) -> Self {
        Self { field, max: None }
    }

    pub fn update_value(&mut self, v: NumericValue) {
        self.max = pick(self.max, Some(v), Ordering::Greater);
    }
}
