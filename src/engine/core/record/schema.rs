use std::collections::BTreeMap;

use serde_json::Value;
use tracing::debug;

use crate::engine::core::record::field_path::FieldPath;
use crate::engine::core::record::record::Record;
use crate::engine::types::{LogicalType, ScalarValue};

/// Known field paths of a data source and the type observed (or declared) for each.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSchema {
    fields: BTreeMap<String, LogicalType>,
}

impl RecordSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, path: &str, logical_type: LogicalType) -> Self {
        self.fields.insert(path.to_string(), logical_type);
        self
    }

    /// Infers a schema from a record set. Nested objects contribute both their own path
    /// (as `String`, they are addressed as JSON text) and the paths of their children.
    pub fn infer(records: &[Record]) -> Self {
        let mut schema = Self::new();
        for record in records {
            if let Some(obj) = record.payload().as_object() {
                for (name, value) in obj {
                    schema.observe(vec![name.clone()], value);
                }
            }
        }
        debug!(target: "shape::schema", fields = schema.fields.len(), "Inferred record schema");
        schema
    }

    fn observe(&mut self, segments: Vec<String>, value: &Value) {
        if let Value::Object(children) = value {
            for (name, child) in children {
                let mut nested = segments.clone();
                nested.push(name.clone());
                self.observe(nested, child);
            }
        }
        let observed = ScalarValue::from(value).logical_type();
        let path = FieldPath::from_segments(segments);
        self.fields
            .entry(path.as_str().to_string())
            .and_modify(|t| *t = t.merge(observed))
            .or_insert(observed);
    }

    pub fn field_type(&self, path: &FieldPath) -> Option<LogicalType> {
        self.fields.get(path.as_str()).copied()
    }

    pub fn contains(&self, path: &FieldPath) -> bool {
        self.fields.contains_key(path.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
