//! Do-undo functionality built around actions that know their own state.
//!
//! It is an implementation of the command pattern, where every modification is
//! an [`Action`] that knows how to do and how to undo itself. An [`Entry`] wraps
//! the action and tracks how often it was done and undone, and whether it got
//! stuck on the way. The remaining data structures are built on top of entries:
//!
//! * [`ActionList`] groups several actions into one and restores a consistent
//!   state when one of them fails halfway through.
//! * [`Stack`] keeps the done actions and the undone actions in two stacks and
//!   moves them between the two with single steps or in bulk.
//! * [`Manager`] keeps any number of independent stacks under string keys.
//!
//! Failures come in two flavors. A hook that could not do its work returns
//! `Ok(false)` and the action decides, through its policy, which [`State`] it
//! ends up in. An [`ActionList`] that can not even restore its children after
//! such a failure returns [`Error::Inconsistent`], which the caller has to deal
//! with.
//!
//! # Features
//!
//! * `serde`: serialization of entries, lists and stacks.
//! * `chrono`: time stamps on entries, shown by [`Display`].
//! * `colored`: colored output from [`Display`].
//!
//! # Examples
//!
//! ```
//! use doundo::{Action, Stack};
//!
//! struct Push(char);
//!
//! impl Action for Push {
//!     type Target = String;
//!
//!     fn apply(&mut self, s: &mut String) -> doundo::Result {
//!         s.push(self.0);
//!         Ok(true)
//!     }
//!
//!     fn undo(&mut self, s: &mut String) -> doundo::Result {
//!         if !s.ends_with(self.0) {
//!             return Ok(false);
//!         }
//!         s.pop();
//!         Ok(true)
//!     }
//!
//!     fn description(&self) -> String {
//!         format!("push `{}`", self.0)
//!     }
//! }
//!
//! fn main() -> doundo::Result<()> {
//!     let mut target = String::new();
//!     let mut stack = Stack::new();
//!     stack.apply(&mut target, Push('a'))?;
//!     stack.apply(&mut target, Push('b'))?;
//!     stack.apply(&mut target, Push('c'))?;
//!     assert_eq!(target, "abc");
//!     assert!(stack.roll_back(&mut target)?);
//!     assert_eq!(target, "");
//!     assert!(stack.roll_forward(&mut target)?);
//!     assert_eq!(target, "abc");
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod doctest;
mod entry;
mod error;
mod format;
mod from_fn;
mod list;
pub mod manager;
mod policy;
mod socket;
pub mod stack;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;

#[doc(hidden)]
pub use self::doctest::Push;
pub use self::{
    entry::Entry,
    error::{Direction, Error, KeyError},
    from_fn::{from_fn, FromFn},
    list::ActionList,
    manager::{Key, Manager},
    policy::{ActionExt, Described, Once, Sticky},
    socket::{Signal, Slot},
    stack::{Display, Stack},
};

/// A specialized result type for do-undo operations.
///
/// `Ok(true)` means the operation succeeded and `Ok(false)` that it failed in an
/// ordinary way. `Err` is reserved for failures that left things inconsistent.
pub type Result<T = bool> = core::result::Result<T, Error>;

/// The state of an [`Entry`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Default, Hash, Eq, PartialEq)]
pub enum State {
    /// The action has been done more often than it has been undone.
    Done,
    /// The action has not been done, or it has been undone since.
    #[default]
    NotDone,
    /// A do attempt failed in a way the action does not recover from.
    StuckInDo,
    /// An undo attempt failed in a way the action does not recover from.
    StuckInUndo,
}

impl State {
    /// Returns the state that follows from the counters alone.
    pub const fn from_counts(done_count: usize, undone_count: usize) -> State {
        if done_count > undone_count {
            State::Done
        } else {
            State::NotDone
        }
    }

    /// Returns `true` if the state is [`StuckInDo`](State::StuckInDo) or
    /// [`StuckInUndo`](State::StuckInUndo).
    pub const fn is_stuck(self) -> bool {
        matches!(self, State::StuckInDo | State::StuckInUndo)
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            State::Done => "done",
            State::NotDone => "not done",
            State::StuckInDo => "stuck in do",
            State::StuckInUndo => "stuck in undo",
        })
    }
}

/// A snapshot of an [`Entry`], handed to the policy methods of [`Action`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Default, Hash, Eq, PartialEq)]
pub struct Status {
    /// The current state.
    pub state: State,
    /// How many times a do hook reported success.
    pub done_count: usize,
    /// How many times an undo hook reported success.
    pub undone_count: usize,
}

impl Status {
    /// Returns the state that follows from the counters, ignoring [`Status::state`].
    pub const fn counted(self) -> State {
        State::from_counts(self.done_count, self.undone_count)
    }
}

/// Base functionality for all actions.
///
/// Only the two hooks and the description are required. The remaining methods
/// decide when the action may run and what happens to its state when a hook
/// fails; override them to get stricter preconditions or to make failures stick.
pub trait Action {
    /// The target type used.
    type Target;

    /// Does the work on the target.
    ///
    /// Returns `Ok(true)` on success and `Ok(false)` on an ordinary failure.
    fn apply(&mut self, target: &mut Self::Target) -> Result;

    /// Reverts the work done by [`apply`](Action::apply).
    ///
    /// Returns `Ok(true)` on success and `Ok(false)` on an ordinary failure.
    fn undo(&mut self, target: &mut Self::Target) -> Result;

    /// Returns `true` if the action may be done.
    ///
    /// The default allows it unless the action is stuck.
    fn can_do(&self, status: Status) -> bool {
        !status.state.is_stuck()
    }

    /// Returns `true` if the action may be undone.
    ///
    /// The default allows it unless the action is stuck.
    fn can_undo(&self, status: Status) -> bool {
        !status.state.is_stuck()
    }

    /// Returns the state to enter after [`apply`](Action::apply) failed.
    ///
    /// The default holds no grudge and uses the state given by the counters.
    fn failed_do_state(&self, status: Status) -> State {
        status.counted()
    }

    /// Returns the state to enter after [`undo`](Action::undo) failed.
    ///
    /// The default holds no grudge and uses the state given by the counters.
    fn failed_undo_state(&self, status: Status) -> State {
        status.counted()
    }

    /// Returns a human readable description of the action.
    fn description(&self) -> String;
}

impl<A: Action + ?Sized> Action for Box<A> {
    type Target = A::Target;

    fn apply(&mut self, target: &mut A::Target) -> Result {
        (**self).apply(target)
    }

    fn undo(&mut self, target: &mut A::Target) -> Result {
        (**self).undo(target)
    }

    fn can_do(&self, status: Status) -> bool {
        (**self).can_do(status)
    }

    fn can_undo(&self, status: Status) -> bool {
        (**self).can_undo(status)
    }

    fn failed_do_state(&self, status: Status) -> State {
        (**self).failed_do_state(status)
    }

    fn failed_undo_state(&self, status: Status) -> State {
        (**self).failed_undo_state(status)
    }

    fn description(&self) -> String {
        (**self).description()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counted_state() {
        assert_eq!(State::from_counts(0, 0), State::NotDone);
        assert_eq!(State::from_counts(1, 0), State::Done);
        assert_eq!(State::from_counts(1, 1), State::NotDone);
        assert_eq!(State::from_counts(3, 2), State::Done);
        let status = Status {
            state: State::StuckInDo,
            done_count: 2,
            undone_count: 1,
        };
        assert_eq!(status.counted(), State::Done);
    }

    #[test]
    fn stuck() {
        assert!(State::StuckInDo.is_stuck());
        assert!(State::StuckInUndo.is_stuck());
        assert!(!State::Done.is_stuck());
        assert!(!State::NotDone.is_stuck());
    }

    #[test]
    fn boxed() {
        let mut target = String::new();
        let mut action: Box<dyn Action<Target = String>> = Box::new(Push('a'));
        assert_eq!(action.apply(&mut target), Ok(true));
        assert_eq!(target, "a");
        assert_eq!(action.description(), "push `a`");
        assert!(action.can_do(Status::default()));
        assert_eq!(action.undo(&mut target), Ok(true));
        assert_eq!(target, "");
    }
}
