//! # Nav Infrastructure
//! 
//! HTTP and cache storage implementations (adapters) for the nav-core ports.

pub mod http;
pub mod cache;
pub mod engine_factory;

pub use http::HttpManifestSource;
pub use cache::{FileStorage, MemoryStorage};
pub use engine_factory::build_engine;
