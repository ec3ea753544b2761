//! Kernel module - infrastructure and dependencies.

pub mod blob_store;
pub mod deps;
pub mod test_dependencies;
pub mod traits;

pub use blob_store::HttpBlobStore;
pub use deps::ServerDeps;
pub use test_dependencies::MockBlobStore;
pub use traits::*;
