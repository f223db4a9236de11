//! High-level operations wiring CLI commands to the manifest, configuration
//! and resolver.

pub mod ops_add;
pub mod ops_init;
pub mod ops_lock;
pub mod ops_remove;
pub mod ops_resolve;
