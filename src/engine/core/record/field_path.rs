use std::fmt;

use crate::engine::core::record::schema::RecordSchema;
use crate::engine::errors::ValidationError;
use crate::engine::types::LogicalType;

/// Dotted path to a (possibly nested) record field, e.g. `Address.City`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    raw: String,
    segments: Vec<String>,
}

impl FieldPath {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::InvalidFieldPath(raw.to_string()));
        }
        let segments: Vec<String> = trimmed.split('.').map(|s| s.to_string()).collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(ValidationError::InvalidFieldPath(raw.to_string()));
        }
        Ok(Self {
            raw: trimmed.to_string(),
            segments,
        })
    }

    /// Builds a path from already split segments (schema inference).
    pub(crate) fn from_segments(segments: Vec<String>) -> Self {
        Self {
            raw: segments.join("."),
            segments,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// A field reference bound against a source schema.
///
/// Unknown paths stay representable: evaluating an `Unresolved` accessor always yields
/// a missing value, which filters treat as false and grouping as the missing key.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldAccessor {
    Resolved {
        path: FieldPath,
        logical_type: LogicalType,
    },
    Unresolved {
        path: FieldPath,
    },
}

impl FieldAccessor {
    pub fn resolve(path: FieldPath, schema: &RecordSchema) -> Self {
        match schema.field_type(&path) {
            Some(logical_type) => FieldAccessor::Resolved { path, logical_type },
            None => FieldAccessor::Unresolved { path },
        }
    }

    pub fn path(&self) -> &FieldPath {
        match self {
            FieldAccessor::Resolved { path, .. } => path,
            FieldAccessor::Unresolved { path } => path,
        }
    }

    pub fn name(&self) -> &str {
        self.path().as_str()
    }

    pub fn logical_type(&self) -> Option<LogicalType> {
        match self {
            FieldAccessor::Resolved { logical_type, .. } => Some(*logical_type),
            FieldAccessor::Unresolved { .. } => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, FieldAccessor::Resolved { .. })
    }
}
