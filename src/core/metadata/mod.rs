//! core::metadata
//!
//! Board metadata schema and loading.
//!
//! # Modules
//!
//! - [`schema`] - Descriptor parsing and role classification
//! - [`store`] - Finding and reading metadata files on disk
//!
//! # Schema Design
//!
//! - Lenient: unknown keys are ignored (schema checks run upstream)
//! - No boolean blindness: a node's role is an enum, never two optionals
//! - Structural violations are errors, never silently defaulted
//!
//! # Example
//!
//! ```
//! use boardsweep::core::metadata::{parse_descriptor, Role};
//!
//! let meta = parse_descriptor("id: corne\nrequires: [pro_micro]\n").unwrap();
//! assert!(matches!(meta.role, Role::Companion { .. }));
//! ```

pub mod schema;
pub mod store;

pub use schema::{parse_descriptor, MetadataDescriptor, MetadataError, Role};
pub use store::{MetadataEntry, MetadataStore, StoreError, DEFAULT_METADATA_SUFFIX};
