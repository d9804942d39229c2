//! core::metadata::schema
//!
//! Board metadata descriptor schema.
//!
//! # Schema
//!
//! Each metadata file is a YAML mapping. Only four keys matter here:
//!
//! ```yaml
//! id: corne_left            # optional when `siblings` is given
//! siblings: [corne_left, corne_right]
//! exposes: [pro_micro]      # interconnect boards
//! requires: [pro_micro]     # shields
//! ```
//!
//! Everything else (name, url, features, ...) is ignored. Full schema checking
//! happens upstream; this module only enforces the structure needed to classify
//! a node and name its targets.
//!
//! # Roles
//!
//! A descriptor has exactly one [`Role`]. `exposes` wins over `requires` when a
//! file carries both, and only the first listed bus of either key is honored.
//!
//! # Example
//!
//! ```
//! use boardsweep::core::metadata::schema::{parse_descriptor, Role};
//!
//! let yaml = "id: nice_nano_v2\nexposes: [pro_micro]\n";
//! let meta = parse_descriptor(yaml).unwrap();
//! assert!(matches!(meta.role, Role::Interconnect { .. }));
//! assert_eq!(meta.sibling_ids, vec![meta.primary_id.clone()]);
//! ```

use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::core::types::{BoardId, BusId, TypeError};

/// Errors from metadata parsing.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("failed to parse metadata: {0}")]
    ParseError(String),

    /// The file breaks the minimal structural contract.
    #[error("malformed metadata: {0}")]
    Malformed(String),

    #[error("type validation failed")]
    TypeError(#[from] TypeError),
}

/// Wire shape of a metadata file, before classification.
#[derive(Debug, Default, Deserialize)]
struct RawMetadata {
    #[serde(default)]
    id: Option<String>,

    /// `None` when the key is missing, `Some(None)` for an explicit null.
    #[serde(default, deserialize_with = "present")]
    siblings: Option<Option<Vec<String>>>,

    #[serde(default)]
    exposes: Option<Vec<String>>,

    #[serde(default)]
    requires: Option<Vec<String>>,
}

/// Keep explicit nulls distinguishable from missing keys.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// The connectivity role of a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    /// A standalone board, built without a shield.
    Board,
    /// A board exposing a connector bus that shields attach through.
    Interconnect { bus: BusId },
    /// A shield that needs a host exposing `bus`.
    Companion { bus: BusId },
}

/// One parsed metadata file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataDescriptor {
    /// Canonical identifier of the node.
    pub primary_id: BoardId,

    /// Identifiers sharing this hardware definition (e.g. split halves).
    /// Defaults to `[primary_id]`.
    pub sibling_ids: Vec<BoardId>,

    /// How the node takes part in target resolution.
    pub role: Role,
}

/// Parse and classify a metadata document.
///
/// # Errors
///
/// - `ParseError` if the document is not a YAML mapping
/// - `Malformed` if `siblings` is explicitly null, if neither `id` nor a
///   sibling names the node, or if `exposes`/`requires` is an empty list
/// - `TypeError` if any identifier is invalid
///
/// # Example
///
/// ```
/// use boardsweep::core::metadata::schema::{parse_descriptor, MetadataError};
///
/// let err = parse_descriptor("id: corne\nsiblings: null\n").unwrap_err();
/// assert!(matches!(err, MetadataError::Malformed(_)));
/// ```
pub fn parse_descriptor(yaml: &str) -> Result<MetadataDescriptor, MetadataError> {
    let raw: RawMetadata =
        serde_yaml::from_str(yaml).map_err(|e| MetadataError::ParseError(e.to_string()))?;
    classify(raw)
}

fn classify(raw: RawMetadata) -> Result<MetadataDescriptor, MetadataError> {
    let sibling_names = match raw.siblings {
        Some(None) => {
            return Err(MetadataError::Malformed(
                "'siblings' is present but null".into(),
            ))
        }
        Some(Some(names)) => Some(names),
        None => None,
    };

    let primary_name = raw
        .id
        .clone()
        .or_else(|| sibling_names.as_ref().and_then(|s| s.first().cloned()))
        .ok_or_else(|| {
            MetadataError::Malformed("neither 'id' nor 'siblings' names the node".into())
        })?;
    let primary_id = BoardId::new(primary_name)?;

    let sibling_ids = match sibling_names {
        Some(names) => names
            .into_iter()
            .map(BoardId::new)
            .collect::<Result<Vec<_>, _>>()?,
        None => vec![primary_id.clone()],
    };

    let role = if let Some(buses) = raw.exposes {
        Role::Interconnect {
            bus: first_bus("exposes", buses)?,
        }
    } else if let Some(buses) = raw.requires {
        Role::Companion {
            bus: first_bus("requires", buses)?,
        }
    } else {
        Role::Board
    };

    Ok(MetadataDescriptor {
        primary_id,
        sibling_ids,
        role,
    })
}

/// Only the first bus is honored; multiple buses per node are unsupported.
fn first_bus(key: &str, buses: Vec<String>) -> Result<BusId, MetadataError> {
    let first = buses
        .into_iter()
        .next()
        .ok_or_else(|| MetadataError::Malformed(format!("'{}' is an empty list", key)))?;
    Ok(BusId::new(first)?)
}
