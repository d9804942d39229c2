//! build
//!
//! Abstraction over the external firmware build tool.
//!
//! # Modules
//!
//! - [`traits`] - The `Builder` trait and outcome types
//! - [`west`] - `west build` subprocess driver
//! - [`mock`] - In-memory builder for tests
//!
//! # Design
//!
//! Builders classify each target's build as success or failure; they never
//! abort the run themselves. Aggregation, parallelism and fail-fast live in
//! [`crate::engine::runner`].

pub mod mock;
pub mod traits;
pub mod west;

pub use traits::{BuildInvocation, BuildOutcome, BuildStatus, Builder};
pub use west::WestBuilder;
