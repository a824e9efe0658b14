use serde::{Serialize, Serializer};

use crate::engine::core::group::group_key::GroupKey;
use crate::engine::core::record::Record;
use crate::engine::core::summary::SummaryVector;

/// One group of the result tree, built bottom-up and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupNode {
    pub key: GroupKey,
    pub items: GroupItems,
    pub count: usize,
    pub summary: SummaryVector,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GroupItems {
    Groups(Vec<GroupNode>),
    Records(Vec<Record>),
    /// Deepest level with `expanded == false`: count and summary only
    Collapsed,
}

impl GroupNode {
    pub fn children(&self) -> &[GroupNode] {
        match &self.items {
            GroupItems::Groups(children) => children,
            _ => &[],
        }
    }

    pub fn records(&self) -> Option<&[Record]> {
        match &self.items {
            GroupItems::Records(records) => Some(records),
            _ => None,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        matches!(self.items, GroupItems::Collapsed)
    }

    /// Child group with the given key, if any.
    pub fn child(&self, key: &GroupKey) -> Option<&GroupNode> {
        self.children().iter().find(|c| &c.key == key)
    }
}

impl Serialize for GroupItems {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            GroupItems::Groups(children) => children.serialize(serializer),
            GroupItems::Records(records) => records.serialize(serializer),
            GroupItems::Collapsed => serializer.serialize_none(),
        }
    }
}
