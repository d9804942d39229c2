//! core
//!
//! Core domain types, schemas, and configuration for boardsweep.
//!
//! # Modules
//!
//! - [`types`] - Strong types: BoardId, BusId, Target
//! - [`metadata`] - Board metadata schema and loading
//! - [`config`] - Configuration schema and loading
//! - [`paths`] - Centralized path routing for an application directory
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid identifiers at construction time
//! - A node's role is an enum, so it can never be two things at once
//! - Nothing here runs processes; core is I/O-light and deterministic

pub mod config;
pub mod metadata;
pub mod paths;
pub mod types;
