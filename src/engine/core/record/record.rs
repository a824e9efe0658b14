use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::engine::core::record::field_path::{FieldAccessor, FieldPath};
use crate::engine::types::ScalarValue;

/// Result of looking a field up on one record.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// The record has no such field, or the accessor never resolved
    Missing,
    Present(ScalarValue),
}

/// One source row. The payload is shared so grouping can hand records out by clone.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    payload: Arc<Value>,
}

impl Record {
    pub fn new(payload: Value) -> Self {
        Self {
            payload: Arc::new(payload),
        }
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }

    pub fn get_path(&self, path: &FieldPath) -> Option<&Value> {
        let mut current = self.payload.as_ref();
        for segment in path.segments() {
            current = current.as_object()?.get(segment.as_str())?;
        }
        Some(current)
    }

    pub fn get_field_scalar(&self, accessor: &FieldAccessor) -> FieldValue {
        match accessor {
            FieldAccessor::Unresolved { .. } => FieldValue::Missing,
            FieldAccessor::Resolved { path, .. } => match self.get_path(path) {
                Some(v) => FieldValue::Present(ScalarValue::from(v)),
                None => FieldValue::Missing,
            },
        }
    }
}

impl From<Value> for Record {
    fn from(payload: Value) -> Self {
        Record::new(payload)
    }
}

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.payload.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Record::new)
    }
}
