pub mod group_key;
pub mod grouper;
pub mod node;
pub mod selector;

pub use group_key::GroupKey;
pub use grouper::group;
pub use node::{GroupItems, GroupNode};
pub use selector::GroupSelector;
