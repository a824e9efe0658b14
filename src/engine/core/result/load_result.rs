use serde::Serialize;

use crate::engine::core::group::GroupNode;
use crate::engine::core::record::Record;
use crate::engine::core::summary::SummaryVector;

/// Top-level payload: a group tree when the request groups, the filtered records otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LoadData {
    Groups(Vec<GroupNode>),
    Records(Vec<Record>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadResult {
    pub data: LoadData,
    pub summary: SummaryVector,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_count: Option<usize>,
}

impl LoadResult {
    pub fn new(data: LoadData, summary: SummaryVector) -> Self {
        Self {
            data,
            summary,
            total_count: None,
            group_count: None,
        }
    }

    /// Fills the optional counters. `group_count` is only set for grouped data.
    pub fn with_counts(
        mut self,
        total_count: usize,
        require_total_count: bool,
        require_group_count: bool,
    ) -> Self {
        if require_total_count {
            self.total_count = Some(total_count);
        }
        if require_group_count {
            if let LoadData::Groups(groups) = &self.data {
                self.group_count = Some(groups.len());
            }
        }
        self
    }

    pub fn groups(&self) -> Option<&[GroupNode]> {
        match &self.data {
            LoadData::Groups(groups) => Some(groups),
            LoadData::Records(_) => None,
        }
    }

    pub fn records(&self) -> Option<&[Record]> {
        match &self.data {
            LoadData::Records(records) => Some(records),
            LoadData::Groups(_) => None,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        // Every component serializes infallibly into a Value
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
