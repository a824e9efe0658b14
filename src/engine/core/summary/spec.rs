use std::fmt;

use crate::engine::core::record::FieldAccessor;
use crate::engine::errors::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregateKind {
    Count,
    Min,
    Max,
    Sum,
    Avg,
}

impl AggregateKind {
    pub const ALL: [AggregateKind; 5] = [
        AggregateKind::Count,
        AggregateKind::Min,
        AggregateKind::Max,
        AggregateKind::Sum,
        AggregateKind::Avg,
    ];

    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "count" => Ok(AggregateKind::Count),
            "min" => Ok(AggregateKind::Min),
            "max" => Ok(AggregateKind::Max),
            "sum" => Ok(AggregateKind::Sum),
            "avg" => Ok(AggregateKind::Avg),
            _ => Err(ValidationError::UnknownSummaryType(raw.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AggregateKind::Count => "count",
            AggregateKind::Min => "min",
            AggregateKind::Max => "max",
            AggregateKind::Sum => "sum",
            AggregateKind::Avg => "avg",
        }
    }

    /// Whether the aggregate reads its field at all.
    pub fn needs_field(&self) -> bool {
        !matches!(self, AggregateKind::Count)
    }
}

impl fmt::Display for AggregateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One column of a summary vector. `field` is `None` only for `count`.
#[derive(Debug, Clone, PartialEq)]
pub struct SummarySpec {
    pub field: Option<FieldAccessor>,
    pub aggregate: AggregateKind,
}

impl SummarySpec {
    pub fn new(field: FieldAccessor, aggregate: AggregateKind) -> Self {
        Self {
            field: Some(field),
            aggregate,
        }
    }

    pub fn count() -> Self {
        Self {
            field: None,
            aggregate: AggregateKind::Count,
        }
    }

    pub fn field_name(&self) -> &str {
        self.field.as_ref().map(|f| f.name()).unwrap_or("*")
    }
}
