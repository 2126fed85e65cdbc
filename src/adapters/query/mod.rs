//! Query execution adapters
//!
//! The [`QueryService`] trait is the boundary the core consumes; the
//! PostgreSQL implementation is the production backend and the in-memory
//! fake backs tests.

pub mod memory;
pub mod params;
pub mod postgres;
pub mod templates;
pub mod traits;

pub use memory::{InMemoryQueryService, RecordedCall};
pub use postgres::PostgresQueryService;
pub use templates::{QueryPair, TemplateRegistry};
pub use traits::QueryService;
