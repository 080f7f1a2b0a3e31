//! HTTP module (manifest endpoint client)

pub mod manifest_client;

pub use manifest_client::HttpManifestSource;
