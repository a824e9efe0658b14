use serde_json::{Map, Value, json};

use crate::engine::core::record::Record;

pub struct RecordFactory {
    params: Map<String, Value>,
}

impl RecordFactory {
    pub fn new() -> Self {
        Self { params: Map::new() }
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }

    pub fn create(self) -> Record {
        Record::new(Value::Object(self.params))
    }

    /// `count` records sharing the configured fields, each with its own `index`.
    pub fn create_list(self, count: usize) -> Vec<Record> {
        (0..count)
            .map(|i| {
                let mut payload = self.params.clone();
                payload.insert("index".into(), json!(i));
                Record::new(Value::Object(payload))
            })
            .collect()
    }
}
