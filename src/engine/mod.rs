pub mod core;
pub mod errors;
pub mod query;
pub mod types;

pub use errors::*;

#[cfg(test)]
mod errors_test;
