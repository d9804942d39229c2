//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`BoardId`] - Validated board or shield identifier
//! - [`BusId`] - Validated interconnect bus identifier
//! - [`Target`] - A buildable (board, optional shield) pair
//!
//! # Validation
//!
//! Identifiers are validated at construction time. An identifier that could
//! not be passed to the build tool as a single argument cannot be represented.
//!
//! # Examples
//!
//! ```
//! use boardsweep::core::types::{BoardId, BusId, Target};
//!
//! let board = BoardId::new("nice_nano_v2").unwrap();
//! let bus = BusId::new("pro_micro").unwrap();
//! let target = Target::board(board.clone());
//! assert!(target.shield.is_none());
//! assert_eq!(bus.as_str(), "pro_micro");
//!
//! assert!(BoardId::new("").is_err());
//! assert!(BoardId::new("has space").is_err());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid board id: {0}")]
    InvalidBoardId(String),

    #[error("invalid bus id: {0}")]
    InvalidBusId(String),
}

/// Shared rules for identifiers that end up on a build command line.
fn check_identifier(value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err("identifier cannot be empty".into());
    }
    if let Some(c) = value.chars().find(|c| c.is_whitespace()) {
        return Err(format!("'{}' contains whitespace ({:?})", value, c));
    }
    if value.chars().any(|c| c.is_control()) {
        return Err(format!("'{}' contains control characters", value.escape_debug()));
    }
    if value.starts_with('-') {
        return Err(format!("'{}' cannot start with '-'", value));
    }
    Ok(())
}

/// A validated board identifier.
///
/// Used for plain boards, interconnect boards and shields alike: all of them
/// are named the way the build tool expects them (`-b <id>` or `SHIELD=<id>`).
///
/// Identifiers may contain `/` (hardware qualifiers such as
/// `nice_nano/nrf52840`) but no whitespace or control characters, and may not
/// start with `-` so they can never be mistaken for a flag.
///
/// # Example
///
/// ```
/// use boardsweep::core::types::BoardId;
///
/// let id = BoardId::new("corne_left").unwrap();
/// assert_eq!(id.as_str(), "corne_left");
/// assert_eq!(id.to_string(), "corne_left");
///
/// assert!(BoardId::new("-b").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BoardId(String);

impl BoardId {
    /// Create a new validated board id.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidBoardId` if the id is empty, contains
    /// whitespace or control characters, or starts with `-`.
    pub fn new(id: impl Into<String>) -> Result<Self, TypeError> {
        let id = id.into();
        check_identifier(&id).map_err(TypeError::InvalidBoardId)?;
        Ok(Self(id))
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for BoardId {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BoardId> for String {
    fn from(id: BoardId) -> Self {
        id.0
    }
}

impl AsRef<str> for BoardId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BoardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated interconnect bus identifier (e.g. `pro_micro`, `xiao`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BusId(String);

impl BusId {
    /// Create a new validated bus id.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidBusId` under the same rules as [`BoardId::new`].
    pub fn new(id: impl Into<String>) -> Result<Self, TypeError> {
        let id = id.into();
        check_identifier(&id).map_err(TypeError::InvalidBusId)?;
        Ok(Self(id))
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for BusId {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BusId> for String {
    fn from(id: BusId) -> Self {
        id.0
    }
}

impl fmt::Display for BusId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A resolved unit of work: one board, optionally with a shield on top.
///
/// Ordering is by board, then shield (`None` first), which is the order
/// targets are listed and dispatched in.
///
/// # Example
///
/// ```
/// use boardsweep::core::types::{BoardId, Target};
///
/// let target = Target::with_shield(
///     BoardId::new("nice_nano_v2").unwrap(),
///     BoardId::new("corne_left").unwrap(),
/// );
/// assert_eq!(
///     serde_json::to_string(&target).unwrap(),
///     r#"{"board":"nice_nano_v2","shield":"corne_left"}"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Target {
    /// Board passed to the build tool.
    pub board: BoardId,
    /// Shield built on top of the board, if any.
    pub shield: Option<BoardId>,
}

impl Target {
    /// A plain board target with no shield.
    pub fn board(board: BoardId) -> Self {
        Self {
            board,
            shield: None,
        }
    }

    /// A board carrying a shield.
    pub fn with_shield(board: BoardId, shield: BoardId) -> Self {
        Self {
            board,
            shield: Some(shield),
        }
    }

    /// Filesystem-safe name for this target, used for its build directory.
    ///
    /// Board and shield are joined with `-`. Each id is percent-encoded
    /// first (everything but ASCII alphanumerics, `_` and a non-leading `.`),
    /// so the separator never appears inside an id and no two targets share
    /// a slug.
    pub fn slug(&self) -> String {
        let board = escape_component(self.board.as_str());
        match &self.shield {
            Some(shield) => format!("{}-{}", board, escape_component(shield.as_str())),
            None => board,
        }
    }
}

fn escape_component(id: &str) -> String {
    let mut out = String::with_capacity(id.len());
    for (i, byte) in id.bytes().enumerate() {
        let keep = byte.is_ascii_alphanumeric() || byte == b'_' || (byte == b'.' && i > 0);
        if keep {
            out.push(char::from(byte));
        } else {
            out.push_str(&format!("%{:02X}", byte));
        }
    }
    out
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.shield {
            Some(shield) => write!(f, "{} + {}", self.board, shield),
            None => write!(f, "{}", self.board),
        }
    }
}
