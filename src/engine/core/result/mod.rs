pub mod assembler;
pub mod load_result;

pub use assembler::assemble;
pub use load_result::{LoadData, LoadResult};
