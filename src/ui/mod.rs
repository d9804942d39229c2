//! ui
//!
//! User-facing output.
//!
//! # Modules
//!
//! - [`output`] - Output formatting and display
//!
//! # Design
//!
//! All printing goes through this module so that quiet and debug modes
//! behave the same everywhere.

pub mod output;
