//! Shared utilities for the Pantry package manager.
//!
//! This crate provides cross-cutting concerns used by all other Pantry crates:
//! the unified error type, filesystem helpers, content hashing, and terminal
//! status output.

pub mod errors;
pub mod fs;
pub mod hash;
pub mod progress;
