//! sqlrate Core - Shared abstractions for the query rating tool
//!
//! This crate provides the pieces every other sqlrate crate depends on:
//!
//! - `SqlrateError` / `Result` - Error type shared by the library crates
//! - `ConnectionConfig` - How to reach the database client
//! - `QueryExecutor`, `PlanSource`, `SchemaIntrospector` - Collaborator traits
//!   that feed the analysis engine with timings, plans and schema details

mod collaborator;
mod config;
mod error;

pub use collaborator::*;
pub use config::*;
pub use error::*;
