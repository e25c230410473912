use crate::{Action, Direction, Result, State, Status};
#[cfg(feature = "chrono")]
use chrono::{DateTime, Utc};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt::{self, Display, Formatter};
use std::panic::{self, AssertUnwindSafe};

/// Wrapper around an action that tracks its state.
///
/// The entry counts how many times the action was done and undone and derives
/// its [`State`] from those counters. When a hook fails, the action's own
/// policy picks the state instead, which may leave the entry stuck.
///
/// # Examples
/// ```
/// # use doundo::{Entry, Push, State};
/// let mut target = String::new();
/// let mut entry = Entry::new(Push('a'));
/// assert_eq!(entry.state(), State::NotDone);
/// assert!(entry.do_action(&mut target).unwrap());
/// assert_eq!(entry.state(), State::Done);
/// assert!(entry.undo_action(&mut target).unwrap());
/// assert_eq!(entry.state(), State::NotDone);
/// assert_eq!((entry.done_count(), entry.undone_count()), (1, 1));
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct Entry<A> {
    action: A,
    state: State,
    done_count: usize,
    undone_count: usize,
    #[cfg(feature = "chrono")]
    created_at: DateTime<Utc>,
    #[cfg(feature = "chrono")]
    updated_at: DateTime<Utc>,
}

impl<A> Entry<A> {
    /// Returns a new entry that has not been done yet.
    pub fn new(action: A) -> Entry<A> {
        #[cfg(feature = "chrono")]
        let now = Utc::now();
        Entry {
            action,
            state: State::NotDone,
            done_count: 0,
            undone_count: 0,
            #[cfg(feature = "chrono")]
            created_at: now,
            #[cfg(feature = "chrono")]
            updated_at: now,
        }
    }

    /// Returns a reference to the action.
    pub fn get(&self) -> &A {
        &self.action
    }

    /// Consumes the entry and returns the action.
    pub fn into_inner(self) -> A {
        self.action
    }

    /// Returns the current state.
    pub fn state(&self) -> State {
        self.state
    }

    /// Returns how many times the do hook reported success.
    pub fn done_count(&self) -> usize {
        self.done_count
    }

    /// Returns how many times the undo hook reported success.
    pub fn undone_count(&self) -> usize {
        self.undone_count
    }

    /// Returns the state together with the counters.
    pub fn status(&self) -> Status {
        Status {
            state: self.state,
            done_count: self.done_count,
            undone_count: self.undone_count,
        }
    }

    /// Returns when the entry was created.
    #[cfg(feature = "chrono")]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns when the entry was last done or undone.
    #[cfg(feature = "chrono")]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Puts a stuck entry back into the state given by its counters.
    pub fn reset(&mut self) {
        self.state = State::from_counts(self.done_count, self.undone_count);
        self.touch();
    }

    fn touch(&mut self) {
        #[cfg(feature = "chrono")]
        {
            self.updated_at = Utc::now();
        }
    }
}

impl<A: Action> Entry<A> {
    /// Returns `true` if the action may be done.
    pub fn can_do(&self) -> bool {
        self.action.can_do(self.status())
    }

    /// Returns `true` if the action may be undone.
    pub fn can_undo(&self) -> bool {
        self.action.can_undo(self.status())
    }

    /// Returns the description of the action.
    pub fn description(&self) -> String {
        self.action.description()
    }

    /// Calls the [`apply`](Action::apply) hook of the action if it may be done.
    ///
    /// Returns `Ok(false)` without touching anything if [`can_do`](Entry::can_do)
    /// is `false`. A hook that panics counts as a failed hook.
    ///
    /// # Errors
    /// Errors returned by the hook are passed on after the failure state is set.
    pub fn do_action(&mut self, target: &mut A::Target) -> Result {
        self.run(Direction::Do, target)
    }

    /// Calls the [`undo`](Action::undo) hook of the action if it may be undone.
    ///
    /// Returns `Ok(false)` without touching anything if
    /// [`can_undo`](Entry::can_undo) is `false`. A hook that panics counts as a
    /// failed hook.
    ///
    /// # Errors
    /// Errors returned by the hook are passed on after the failure state is set.
    pub fn undo_action(&mut self, target: &mut A::Target) -> Result {
        self.run(Direction::Undo, target)
    }

    pub(crate) fn run(&mut self, direction: Direction, target: &mut A::Target) -> Result {
        let allowed = match direction {
            Direction::Do => self.can_do(),
            Direction::Undo => self.can_undo(),
        };
        if !allowed {
            tracing::debug!(
                action = %self.description(),
                state = %self.state,
                %direction,
                "action refused to run"
            );
            return Ok(false);
        }

        let hook: fn(&mut A, &mut A::Target) -> Result = match direction {
            Direction::Do => A::apply,
            Direction::Undo => A::undo,
        };
        let result = guard(&mut self.action, target, hook, direction);
        match (matches!(result, Ok(true)), direction) {
            (true, Direction::Do) => {
                self.done_count += 1;
                self.state = State::from_counts(self.done_count, self.undone_count);
            }
            (true, Direction::Undo) => {
                self.undone_count += 1;
                self.state = State::from_counts(self.done_count, self.undone_count);
            }
            (false, Direction::Do) => {
                self.state = self.action.failed_do_state(self.status());
                tracing::debug!(action = %self.description(), state = %self.state, "do failed");
            }
            (false, Direction::Undo) => {
                self.state = self.action.failed_undo_state(self.status());
                tracing::debug!(action = %self.description(), state = %self.state, "undo failed");
            }
        }
        self.touch();
        result
    }
}

impl<A> From<A> for Entry<A> {
    fn from(action: A) -> Self {
        Entry::new(action)
    }
}

impl<A: Display> Display for Entry<A> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        (&self.action as &dyn Display).fmt(f)
    }
}

/// Runs the hook, turning a panic into an ordinary failure.
fn guard<A: Action>(
    action: &mut A,
    target: &mut A::Target,
    hook: fn(&mut A, &mut A::Target) -> Result,
    direction: Direction,
) -> Result {
    match panic::catch_unwind(AssertUnwindSafe(|| hook(action, target))) {
        Ok(result) => result,
        Err(payload) => {
            tracing::error!(
                action = %action.description(),
                %direction,
                panic = panic_message(payload.as_ref()),
                "hook panicked"
            );
            Ok(false)
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "unknown panic"
    }
}
