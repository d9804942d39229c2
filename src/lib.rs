//! boardsweep - Discover and (try to) compile every firmware build target
//!
//! boardsweep walks a Zephyr/ZMK-style board tree, reads the metadata file
//! that sits next to every board and shield definition, works out every
//! buildable (board, optional shield) combination, and runs the build tool
//! once per combination.
//!
//! # Architecture
//!
//! The codebase follows a strict layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to engine)
//! - [`engine`] - Scan -> Resolve -> Build lifecycle
//! - [`build`] - Abstraction over the external build tool
//! - [`core`] - Domain types, metadata schema, configuration, paths
//! - [`ui`] - Output utilities
//!
//! # Correctness Invariants
//!
//! 1. Every metadata node has exactly one role: board, interconnect or shield
//! 2. Malformed metadata aborts the run before any target is produced
//! 3. Target discovery never depends on build results
//! 4. Only `main` decides the process exit code

pub mod build;
pub mod cli;
pub mod core;
pub mod engine;
pub mod ui;
