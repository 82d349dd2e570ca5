//! Domain layer - Pure business abstractions
//!
//! This layer contains NO framework dependencies (no SeaORM, no Axum).
//! Trait definitions, the query translator and domain error types.

pub mod errors;
pub mod query;
pub mod repositories;

pub use errors::DomainError;
pub use query::{Filter, ListParams, QueryOptions, SortDirection, SortKey};
pub use repositories::*;
