//! Adapters that change how an action behaves without touching its hooks.

use crate::{Action, Result, State, Status};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Extension methods that wrap an action in one of the adapters.
///
/// # Examples
/// ```
/// # use doundo::{ActionExt, Entry, Push, State};
/// let mut target = String::new();
/// let mut entry = Entry::new(Push('a').once().described("type a"));
/// assert_eq!(entry.description(), "type a");
/// assert!(entry.do_action(&mut target).unwrap());
/// assert!(entry.undo_action(&mut target).unwrap());
/// assert!(!entry.can_do());
/// ```
pub trait ActionExt: Action + Sized {
    /// Allows the action to be done only once.
    fn once(self) -> Once<Self> {
        Once(self)
    }

    /// Makes failed hooks leave the action stuck.
    fn sticky(self) -> Sticky<Self> {
        Sticky(self)
    }

    /// Replaces the description of the action.
    fn described(self, description: impl Into<String>) -> Described<Self> {
        Described {
            action: self,
            description: description.into(),
        }
    }
}

impl<A: Action> ActionExt for A {}

/// An action that can only be done once.
///
/// Created by the [`once`](ActionExt::once) method.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
pub struct Once<A>(pub A);

impl<A: Action> Action for Once<A> {
    type Target = A::Target;

    fn apply(&mut self, target: &mut A::Target) -> Result {
        self.0.apply(target)
    }

    fn undo(&mut self, target: &mut A::Target) -> Result {
        self.0.undo(target)
    }

    fn can_do(&self, status: Status) -> bool {
        status.done_count == 0 && self.0.can_do(status)
    }

    fn can_undo(&self, status: Status) -> bool {
        self.0.can_undo(status)
    }

    fn failed_do_state(&self, status: Status) -> State {
        self.0.failed_do_state(status)
    }

    fn failed_undo_state(&self, status: Status) -> State {
        self.0.failed_undo_state(status)
    }

    fn description(&self) -> String {
        self.0.description()
    }
}

/// An action that gets stuck when a hook fails.
///
/// A failed do leaves it in [`State::StuckInDo`] and a failed undo in
/// [`State::StuckInUndo`]. Created by the [`sticky`](ActionExt::sticky) method.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
pub struct Sticky<A>(pub A);

impl<A: Action> Action for Sticky<A> {
    type Target = A::Target;

    fn apply(&mut self, target: &mut A::Target) -> Result {
        self.0.apply(target)
    }

    fn undo(&mut self, target: &mut A::Target) -> Result {
        self.0.undo(target)
    }

    fn can_do(&self, status: Status) -> bool {
        self.0.can_do(status)
    }

    fn can_undo(&self, status: Status) -> bool {
        self.0.can_undo(status)
    }

    fn failed_do_state(&self, _: Status) -> State {
        State::StuckInDo
    }

    fn failed_undo_state(&self, _: Status) -> State {
        State::StuckInUndo
    }

    fn description(&self) -> String {
        self.0.description()
    }
}

/// An action with a description of its own.
///
/// Created by the [`described`](ActionExt::described) method.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct Described<A> {
    action: A,
    description: String,
}

impl<A: Action> Action for Described<A> {
    type Target = A::Target;

    fn apply(&mut self, target: &mut A::Target) -> Result {
        self.action.apply(target)
    }

    fn undo(&mut self, target: &mut A::Target) -> Result {
        self.action.undo(target)
    }

    fn can_do(&self, status: Status) -> bool {
        self.action.can_do(status)
    }

    fn can_undo(&self, status: Status) -> bool {
        self.action.can_undo(status)
    }

    fn failed_do_state(&self, status: Status) -> State {
        self.action.failed_do_state(status)
    }

    fn failed_undo_state(&self, status: Status) -> State {
        self.action.failed_undo_state(status)
    }

    fn description(&self) -> String {
        self.description.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{from_fn, Entry, Push};

    #[test]
    fn once() {
        let mut target = String::new();
        let mut entry = Entry::new(Push('a').once());
        assert!(entry.can_do());
        assert_eq!(entry.do_action(&mut target), Ok(true));
        assert!(!entry.can_do());
        assert_eq!(entry.undo_action(&mut target), Ok(true));
        assert_eq!(entry.do_action(&mut target), Ok(false));
        assert_eq!(target, "");
        assert_eq!((entry.done_count(), entry.undone_count()), (1, 1));
        assert_eq!(entry.state(), State::NotDone);
    }

    #[test]
    fn sticky_undo() {
        let mut entry = Entry::new(from_fn("fragile", |_: &mut ()| true, |_: &mut ()| false).sticky());
        assert_eq!(entry.do_action(&mut ()), Ok(true));
        assert_eq!(entry.undo_action(&mut ()), Ok(false));
        assert_eq!(entry.state(), State::StuckInUndo);
        assert_eq!((entry.done_count(), entry.undone_count()), (1, 0));
        assert!(!entry.can_undo());
    }

    #[test]
    fn adapters_compose() {
        let mut entry = Entry::new(
            from_fn("fails", |_: &mut ()| false, |_: &mut ()| true)
                .sticky()
                .once()
                .described("composed"),
        );
        assert_eq!(entry.description(), "composed");
        assert_eq!(entry.do_action(&mut ()), Ok(false));
        assert_eq!(entry.state(), State::StuckInDo);
        entry.reset();
        assert!(entry.can_do());
    }
}
