use serde_json::Value;

use crate::command::types::{GroupingInfo, LoadRequest, SummaryInfo};

pub struct LoadRequestFactory {
    request: LoadRequest,
}

impl LoadRequestFactory {
    pub fn new() -> Self {
        Self {
            request: LoadRequest::default(),
        }
    }

    pub fn with_filter(mut self, filter: Value) -> Self {
        self.request.filter = Some(filter);
        self
    }

    pub fn with_group(mut self, selector: &str, expanded: bool) -> Self {
        self.request.group.push(GroupingInfo::new(selector, expanded));
        self
    }

    pub fn with_group_desc(mut self, selector: &str, expanded: bool) -> Self {
        let mut info = GroupingInfo::new(selector, expanded);
        info.desc = true;
        self.request.group.push(info);
        self
    }

    pub fn with_group_summary(mut self, selector: &str, summary_type: &str) -> Self {
        self.request
            .group_summary
            .push(SummaryInfo::new(selector, summary_type));
        self
    }

    pub fn with_total_summary(mut self, selector: &str, summary_type: &str) -> Self {
        self.request
            .total_summary
            .push(SummaryInfo::new(selector, summary_type));
        self
    }

    /// Adds the same summary to both the group and the total lists.
    pub fn with_summary(self, selector: &str, summary_type: &str) -> Self {
        self.with_group_summary(selector, summary_type)
            .with_total_summary(selector, summary_type)
    }

    pub fn require_total_count(mut self) -> Self {
        self.request.require_total_count = true;
        self
    }

    pub fn require_group_count(mut self) -> Self {
        self.request.require_group_count = true;
        self
    }

    pub fn create(self) -> LoadRequest {
        self.request
    }
}
