pub mod parser;
pub mod types;

pub use types::{CompareOp, FilterExpr, GroupingInfo, LoadRequest, SummaryInfo};
