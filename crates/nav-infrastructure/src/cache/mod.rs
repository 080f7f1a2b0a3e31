//! Cache storage adapters

pub mod memory;
pub mod file;

pub use memory::MemoryStorage;
pub use file::FileStorage;
