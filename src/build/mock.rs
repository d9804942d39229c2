//! build::mock
//!
//! In-memory builder for deterministic testing.
//!
//! # Example
//!
//! ```
//! use boardsweep::build::mock::MockBuilder;
//! use boardsweep::build::Builder;
//! use boardsweep::core::types::{BoardId, Target};
//!
//! let broken = Target::board(BoardId::new("broken").unwrap());
//! let builder = MockBuilder::new().fail_on(broken.clone());
//!
//! assert!(!builder.build(&broken).is_success());
//! assert_eq!(builder.built(), vec![broken]);
//! ```

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use super::traits::{BuildOutcome, BuildStatus, Builder};
use crate::core::types::Target;

/// Mock builder for testing.
///
/// Thread-safe; clones share the record of built targets.
#[derive(Debug, Clone, Default)]
pub struct MockBuilder {
    failing: BTreeSet<Target>,
    delay: Duration,
    built: Arc<Mutex<Vec<Target>>>,
}

impl MockBuilder {
    /// A builder where every target succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `target` fail.
    pub fn fail_on(mut self, target: Target) -> Self {
        self.failing.insert(target);
        self
    }

    /// Sleep this long in every build.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Targets built so far, in completion order.
    pub fn built(&self) -> Vec<Target> {
        self.built
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Builder for MockBuilder {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn build(&self, target: &Target) -> BuildOutcome {
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }

        self.built
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(target.clone());

        let status = if self.failing.contains(target) {
            BuildStatus::Failure {
                code: Some(1),
                diagnostics: format!("mock failure for {}", target),
            }
        } else {
            BuildStatus::Success
        };

        BuildOutcome {
            target: target.clone(),
            command_line: format!("mock build {}", target.slug()),
            status,
            elapsed: self.delay,
        }
    }
}
