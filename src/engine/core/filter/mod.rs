pub mod applier;
pub mod predicate;

pub use applier::apply;
pub use predicate::Predicate;
