//! Multi-step register sequences
//!
//! Composite operations (init, frequency change, wake with restart) issue
//! several transactions in a row. [`Steps`] runs them under a
//! [`SequencePolicy`] and keeps the first error.

use crate::error::Error;
use crate::fmt::warn;

/// How a composite operation reacts to a failed step
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SequencePolicy {
    /// Attempt every step, report the first failure at the end
    ///
    /// The chip may be left partially configured; re-run `init` to recover.
    #[default]
    BestEffort,
    /// Stop at the first failed step
    FailFast,
}

#[cfg(feature = "defmt")]
impl defmt::Format for SequencePolicy {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::BestEffort => defmt::write!(f, "BestEffort"),
            Self::FailFast => defmt::write!(f, "FailFast"),
        }
    }
}

/// Step runner for one composite operation
pub(crate) struct Steps<E> {
    policy: SequencePolicy,
    first_error: Option<Error<E>>,
}

impl<E> Steps<E> {
    pub(crate) const fn new(policy: SequencePolicy) -> Self {
        Self {
            policy,
            first_error: None,
        }
    }

    /// True once a step failed under `FailFast`
    pub(crate) fn halted(&self) -> bool {
        self.policy == SequencePolicy::FailFast && self.first_error.is_some()
    }

    /// Run one step; `None` if it failed or was skipped
    pub(crate) fn run<T>(
        &mut self,
        name: &str,
        step: impl FnOnce() -> Result<T, Error<E>>,
    ) -> Option<T> {
        if self.halted() {
            return None;
        }

        match step() {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("step '{}' failed", name);
                if self.first_error.is_none() {
                    self.first_error = Some(e);
                }
                None
            }
        }
    }

    /// Overall result: the first error, if any
    pub(crate) fn finish(self) -> Result<(), Error<E>> {
        match self.first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
