pub mod filter;

pub use filter::parse_filter;
