use thiserror::Error;
use tracing::{debug, error, warn};

use crate::engine::core::summary::spec::AggregateKind;
use crate::engine::types::LogicalType;

/// Errors surfaced by a load request.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Invalid load options: {0}")]
    Validation(#[from] ValidationError),

    #[error("Cannot compute {aggregate} over field '{field}' of type {found}")]
    AggregateTypeMismatch {
        field: String,
        aggregate: AggregateKind,
        found: LogicalType,
    },

    #[error("Numeric overflow while aggregating field '{field}'")]
    NumericOverflow { field: String },

    #[error("Data source failed: {0}")]
    Source(SourceError),

    #[error("Load was cancelled")]
    Cancelled,
}

/// Malformed `LoadOptions`, reported before any execution starts.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Unknown summary type: {0}")]
    UnknownSummaryType(String),

    #[error("Unknown filter operator: {0}")]
    UnknownFilterOperator(String),

    #[error("Malformed filter: {0}")]
    MalformedFilter(String),

    #[error("Cannot mix 'and' and 'or' in one filter group")]
    MixedLogicalOperators,

    #[error("Summary type '{0}' requires a selector")]
    MissingSelector(String),

    #[error("Field path is empty or has an empty segment: '{0}'")]
    InvalidFieldPath(String),

    #[error("Too many group levels: {requested} (max {max})")]
    TooManyGroupLevels { requested: usize, max: usize },

    #[error("Invalid JSON: {0}")]
    InvalidJson(String),
}

/// Failures raised by a query provider.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Operation not supported by provider: {0}")]
    Unsupported(String),

    #[error("Provider cannot compute {aggregate} over field '{field}' of type {found}")]
    AggregateTypeMismatch {
        field: String,
        aggregate: AggregateKind,
        found: LogicalType,
    },

    #[error("Provider numeric overflow on field '{field}'")]
    NumericOverflow { field: String },

    #[error("Other error: {0}")]
    Other(String),
}

impl From<SourceError> for LoadError {
    fn from(err: SourceError) -> Self {
        // Aggregation failures keep their category regardless of where they ran
        match err {
            SourceError::AggregateTypeMismatch {
                field,
                aggregate,
                found,
            } => LoadError::AggregateTypeMismatch {
                field,
                aggregate,
                found,
            },
            SourceError::NumericOverflow { field } => LoadError::NumericOverflow { field },
            other => LoadError::Source(other),
        }
    }
}

impl LoadError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, LoadError::Cancelled)
    }

    pub fn log_error(&self) {
        match self {
            LoadError::Validation(e) => {
                warn!(target: "shape::error", "Load options rejected: {}", e);
                debug!(target: "shape::error", "Validation error details: {:?}", e);
            }
            LoadError::AggregateTypeMismatch {
                field,
                aggregate,
                found,
            } => {
                error!(target: "shape::error", %field, %aggregate, %found, "Aggregate type mismatch");
            }
            LoadError::NumericOverflow { field } => {
                error!(target: "shape::error", %field, "Numeric overflow during aggregation");
            }
            LoadError::Source(e) => {
                error!(target: "shape::error", "Data source failed: {}", e);
                debug!(target: "shape::error", "Data source error details: {:?}", e);
            }
            LoadError::Cancelled => {
                debug!(target: "shape::error", "Load was cancelled");
            }
        }
    }
}

impl SourceError {
    pub fn mismatch(field: &str, aggregate: AggregateKind, found: LogicalType) -> Self {
        SourceError::AggregateTypeMismatch {
            field: field.to_string(),
            aggregate,
            found,
        }
    }
}

impl From<LoadError> for SourceError {
    fn from(err: LoadError) -> Self {
        match err {
            LoadError::AggregateTypeMismatch {
                field,
                aggregate,
                found,
            } => SourceError::AggregateTypeMismatch {
                field,
                aggregate,
                found,
            },
            LoadError::NumericOverflow { field } => SourceError::NumericOverflow { field },
            LoadError::Source(e) => e,
            other => SourceError::Other(other.to_string()),
        }
    }
}
