pub mod calculator;
pub mod ops;
pub mod partial;
pub mod spec;
pub mod value;

pub use calculator::{SummaryCalculator, finalize_states, merge_states, summarize};
pub use partial::AggState;
pub use spec::{AggregateKind, SummarySpec};
pub use value::{NumericValue, SummaryValue, SummaryVector};

#[cfg(test)]
mod calculator_test;
