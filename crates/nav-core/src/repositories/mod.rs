//! Repository traits (ports)

pub mod manifest_source;
pub mod cache_storage;
pub mod clock;

pub use manifest_source::ManifestSource;
pub use cache_storage::CacheStorage;
pub use clock::{Clock, ManualClock, SystemClock};
