//! # Nav Core
//! 
//! Menu manifest pipeline: fetch and cache, hierarchy, role filtering and
//! lazy content resolution, plus the ports adapters plug into.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod error;

// Re-export domain entities
pub use domain::*;
pub use error::NavError;

#[cfg(test)]
pub(crate) mod test_support;
