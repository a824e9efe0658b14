use serde_json::{Value, json};

use crate::command::types::LoadRequest;
use crate::engine::core::record::Record;
use crate::test_helpers::factories::LoadRequestFactory;

pub const SUMMARY_TYPES: [&str; 5] = ["count", "min", "max", "sum", "avg"];

/// Five records over (Group1, Group2, Value), grouped by Group1 then Group2 with every
/// summary type over Value.
///
/// A = (4,1,5,9,3), A/A = (2,1,1,1,1), A/B = (2,3,5,8,4),
/// B and B/A = (1,null,null,0,null), total = (5,1,5,9,3).
pub struct SummaryFixtureFactory {
    expanded: bool,
    filter: Option<Value>,
    desc: bool,
}

impl SummaryFixtureFactory {
    pub fn new() -> Self {
        Self {
            expanded: true,
            filter: None,
            desc: false,
        }
    }

    pub fn collapsed(mut self) -> Self {
        self.expanded = false;
        self
    }

    pub fn descending(mut self) -> Self {
        self.desc = true;
        self
    }

    pub fn with_filter(mut self, filter: Value) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn records(&self) -> Vec<Record> {
        vec![
            json!({ "Group1": "A", "Group2": "A", "Value": null }),
            json!({ "Group1": "A", "Group2": "A", "Value": 1 }),
            json!({ "Group1": "A", "Group2": "B", "Value": 3 }),
            json!({ "Group1": "A", "Group2": "B", "Value": 5 }),
            json!({ "Group1": "B", "Group2": "A", "Value": null }),
        ]
        .into_iter()
        .map(Record::new)
        .collect()
    }

    pub fn request(&self) -> LoadRequest {
        let mut factory = if self.desc {
            LoadRequestFactory::new()
                .with_group_desc("Group1", true)
                .with_group_desc("Group2", self.expanded)
        } else {
            LoadRequestFactory::new()
                .with_group("Group1", true)
                .with_group("Group2", self.expanded)
        };
        for summary_type in SUMMARY_TYPES {
            factory = factory.with_summary("Value", summary_type);
        }
        if let Some(filter) = &self.filter {
            factory = factory.with_filter(filter.clone());
        }
        factory.require_total_count().require_group_count().create()
    }
}
