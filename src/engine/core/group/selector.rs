use crate::engine::core::record::FieldAccessor;

/// One grouping level. Position in the selector list is the nesting depth.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSelector {
    pub field: FieldAccessor,
    /// Only meaningful on the deepest level: keep the records or collapse to count + summary
    pub expanded: bool,
    pub desc: bool,
}

impl GroupSelector {
    pub fn new(field: FieldAccessor, expanded: bool) -> Self {
        Self {
            field,
            expanded,
            desc: false,
        }
    }

    pub fn descending(mut self) -> Self {
        self.desc = true;
        self
    }
}
