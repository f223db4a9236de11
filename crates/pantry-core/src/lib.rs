//! Core data types for the Pantry package manager.
//!
//! This crate defines the values the resolver works with: identifiers,
//! semantic versions and version requirements, dependencies, recipes, the
//! project manifest, the lock file, and global configuration.
//!
//! This crate is intentionally free of async code and network I/O.

pub mod config;
pub mod dependency;
pub mod error;
pub mod identifier;
mod keyed;
pub mod lockfile;
pub mod manifest;
pub mod recipe;
pub mod version;
