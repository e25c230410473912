#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The two ways an action can be run.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
pub enum Direction {
    /// Doing, or redoing.
    Do,
    /// Undoing.
    Undo,
}

impl Direction {
    /// Returns the direction that reverts this one.
    pub const fn reverse(self) -> Direction {
        match self {
            Direction::Do => Direction::Undo,
            Direction::Undo => Direction::Do,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Direction::Do => "do",
            Direction::Undo => "undo",
        })
    }
}

/// Failures that leave the actions in a state nobody asked for.
///
/// Ordinary failures are reported as `Ok(false)`; this type only carries the
/// ones that could not be cleaned up.
#[derive(Clone, Debug, Error, Hash, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// An [`ActionList`](crate::ActionList) failed halfway and the `direction`
    /// run meant to restore its children failed as well.
    #[error(
        "compensating {direction} failed after {succeeded} of {requested} actions, \
         the action list is left inconsistent"
    )]
    Inconsistent {
        /// The direction of the compensating run.
        direction: Direction,
        /// Descriptions of the actions the compensating run targeted.
        actions: Vec<String>,
        /// How many actions the compensating run targeted.
        requested: usize,
        /// How many of them were run successfully before it stopped.
        succeeded: usize,
    },
}

/// Misuse of a key given to a [`Manager`](crate::Manager).
///
/// The manager never returns these; it logs them and degrades the call instead.
#[derive(Clone, Debug, Error, Hash, Eq, PartialEq)]
#[non_exhaustive]
pub enum KeyError {
    /// No key was given.
    #[error("no key was given")]
    Missing,
    /// The wrong number of keys was given.
    #[error("expected exactly one key, got {0}")]
    Arity(usize),
    /// No stack has been registered under the key.
    #[error("no stack is registered under `{0}`")]
    Unregistered(String),
}
