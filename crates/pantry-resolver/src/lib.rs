//! Dependency resolution engine: sequential steps over dependency lists,
//! concurrent exploration of candidate versions, pluggable scoring strategies,
//! recipe sources, and fetch memoization.

pub mod cache;
pub mod conflict;
pub mod event;
pub mod resolved;
pub mod resolver;
pub mod source;
pub mod strategy;

pub use conflict::{ConflictError, MergeConflictError, ResolutionExhaustedError, ResolveError};
pub use event::Event;
pub use resolved::{ResolvedDependencies, ResolvedDependency};
pub use resolver::{resolve, Resolution, Resolver};
pub use source::{FetchError, RecipeSource};
