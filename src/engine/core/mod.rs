pub mod cancel;
pub mod context;
pub mod filter;
pub mod group;
pub mod record;
pub mod result;
pub mod summary;

pub use cancel::CancellationToken;
pub use context::ExecutionContext;
pub use group::{GroupItems, GroupKey, GroupNode, GroupSelector};
pub use record::{FieldAccessor, FieldPath, Record, RecordSchema};
pub use result::{LoadData, LoadResult};
pub use summary::{AggregateKind, SummarySpec, SummaryValue, SummaryVector};
