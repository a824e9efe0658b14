pub mod field_path;
pub mod record;
pub mod schema;

pub use field_path::{FieldAccessor, FieldPath};
pub use record::{FieldValue, Record};
pub use schema::RecordSchema;
