//! engine::resolve
//!
//! Joins shields to interconnects to produce the buildable target set.
//!
//! # Algorithm
//!
//! Targets start as the scanned plain boards. Each shield then gets paired
//! with the first interconnect (in ascending board-id order) that exposes the
//! bus the shield requires, yielding one `(interconnect, shield)` target.
//! Further interconnects exposing the same bus are not paired with that
//! shield.
//!
//! A shield with no matching interconnect yields no target. It is reported
//! back as an [`UnresolvedCompanion`] so the caller can warn; it is never an
//! error.
//!
//! Resolution is pure: no I/O, no mutation of the scan result.

use std::collections::BTreeSet;
use std::fmt;

use super::scan::ScanResult;
use crate::core::types::{BoardId, BusId, Target};

/// A shield whose required bus no interconnect exposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedCompanion {
    /// The shield that was dropped.
    pub companion: BoardId,
    /// The bus it required.
    pub bus: BusId,
}

impl fmt::Display for UnresolvedCompanion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "shield '{}' requires bus '{}' but no board exposes it; skipping",
            self.companion, self.bus
        )
    }
}

/// Output of [`resolve`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Every buildable target, in board-then-shield order.
    pub targets: BTreeSet<Target>,
    /// Shields left without a host.
    pub unresolved: Vec<UnresolvedCompanion>,
}

impl Resolution {
    /// Targets in dispatch order.
    pub fn ordered(&self) -> Vec<Target> {
        self.targets.iter().cloned().collect()
    }
}

/// Resolve a scan into its target set.
///
/// # Example
///
/// ```
/// use boardsweep::core::types::{BoardId, BusId, Target};
/// use boardsweep::engine::resolve::resolve;
/// use boardsweep::engine::scan::ScanResult;
///
/// let id = |s: &str| BoardId::new(s).unwrap();
/// let mut scanned = ScanResult::default();
/// scanned.boards.push(Target::board(id("boardA")));
/// scanned.exposes.insert(id("hubX"), BusId::new("busA").unwrap());
/// scanned.requires.insert(id("shieldY"), BusId::new("busA").unwrap());
///
/// let resolution = resolve(&scanned);
/// assert_eq!(
///     resolution.ordered(),
///     vec![
///         Target::board(id("boardA")),
///         Target::with_shield(id("hubX"), id("shieldY")),
///     ]
/// );
/// assert!(resolution.unresolved.is_empty());
/// ```
pub fn resolve(scanned: &ScanResult) -> Resolution {
    let mut targets: BTreeSet<Target> = scanned.boards.iter().cloned().collect();
    let mut unresolved = Vec::new();

    for (companion, required) in &scanned.requires {
        let host = scanned
            .exposes
            .iter()
            .find(|(_, exposed)| *exposed == required)
            .map(|(interconnect, _)| interconnect);

        match host {
            Some(interconnect) => {
                targets.insert(Target::with_shield(interconnect.clone(), companion.clone()));
            }
            None => unresolved.push(UnresolvedCompanion {
                companion: companion.clone(),
                bus: required.clone(),
            }),
        }
    }

    Resolution {
        targets,
        unresolved,
    }
}
