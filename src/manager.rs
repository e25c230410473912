//! Independent stacks kept under string keys.

mod builder;
mod key;

pub use builder::Builder;
pub use key::Key;

use crate::socket::{Signal, Slot, Socket};
use crate::{Action, Entry, KeyError, Result, Stack};
use std::backtrace::Backtrace;
use std::collections::HashMap;
use std::fmt;

/// A keyed collection of [`Stack`]s.
///
/// Every operation of the stack is available with a [`Key`] in front. Adding
/// done actions creates the stack for a key on first use; every other
/// operation needs the stack to exist already. Bad keys are logged and the
/// call degrades to `false`, `0` or an empty string instead of failing.
///
/// The manager keeps one change counter for all of its stacks.
///
/// # Examples
/// ```
/// # use doundo::{Manager, Push};
/// # fn main() -> doundo::Result<()> {
/// let mut text = String::from("ab");
/// let mut manager = Manager::<Push>::new();
/// manager.add_done_actions("text", [Push('a'), Push('b')]);
/// assert!(manager.single_undo("text", &mut text)?);
/// assert_eq!(text, "a");
/// assert_eq!(manager.undo_stack_size("text"), 1);
/// assert!(!manager.can_undo("other"));
/// # Ok(())
/// # }
/// ```
pub struct Manager<A, S = ()> {
    stacks: HashMap<String, Stack<A>>,
    stack_capacity: usize,
    changes: usize,
    socket: Socket<S>,
}

impl<A> Manager<A> {
    /// Returns a new manager.
    pub fn new() -> Manager<A> {
        Manager::builder().build()
    }
}

impl<A, S> Manager<A, S> {
    /// Returns a new manager builder.
    pub fn builder() -> Builder<A, S> {
        Builder::default()
    }

    /// Returns the number of stacks.
    pub fn len(&self) -> usize {
        self.stacks.len()
    }

    /// Returns `true` if there are no stacks.
    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }

    /// Returns `true` if a stack is registered under `key`.
    pub fn contains_key<'k>(&self, key: impl Into<Key<'k>>) -> bool {
        key.into()
            .name()
            .map_or(false, |name| self.stacks.contains_key(name))
    }

    /// Returns an iterator over the keys of the stacks.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.stacks.keys().map(String::as_str)
    }

    /// Returns the stack registered under `key`.
    pub fn stack<'k>(&self, key: impl Into<Key<'k>>) -> Option<&Stack<A>> {
        self.lookup(key.into())
    }

    /// Returns the change counter shared by all stacks.
    pub fn changes(&self) -> usize {
        self.changes
    }

    /// Sets how the signal should be handled when the change counter moves.
    ///
    /// The previous slot is returned if it exists.
    pub fn connect(&mut self, slot: S) -> Option<S> {
        self.socket.connect(Some(slot))
    }

    /// Removes and returns the slot if it exists.
    pub fn disconnect(&mut self) -> Option<S> {
        self.socket.disconnect()
    }

    /// Returns `true` if the stack under `key` has an action to do again.
    pub fn can_do<'k>(&self, key: impl Into<Key<'k>>) -> bool {
        self.lookup(key.into()).map_or(false, Stack::can_do)
    }

    /// Returns `true` if the stack under `key` has an action to undo.
    pub fn can_undo<'k>(&self, key: impl Into<Key<'k>>) -> bool {
        self.lookup(key.into()).map_or(false, Stack::can_undo)
    }

    /// Returns the number of actions waiting to be done again under `key`.
    pub fn do_stack_size<'k>(&self, key: impl Into<Key<'k>>) -> usize {
        self.lookup(key.into()).map_or(0, Stack::do_stack_size)
    }

    /// Returns the number of actions waiting to be undone under `key`.
    pub fn undo_stack_size<'k>(&self, key: impl Into<Key<'k>>) -> usize {
        self.lookup(key.into()).map_or(0, Stack::undo_stack_size)
    }

    fn lookup(&self, key: Key) -> Option<&Stack<A>> {
        let found = key.name().and_then(|name| {
            self.stacks
                .get(name)
                .ok_or_else(|| KeyError::Unregistered(name.to_owned()))
        });
        found.map_err(|err| misuse(&err)).ok()
    }
}

impl<A: Action, S: Slot> Manager<A, S> {
    /// Pushes an already done action onto the undo stack under `key`,
    /// creating the stack if needed.
    ///
    /// Returns `false` if the key is invalid.
    pub fn add_done_action<'k>(&mut self, key: impl Into<Key<'k>>, action: impl Into<Entry<A>>) -> bool {
        self.add_done_actions(key, [action])
    }

    /// Pushes already done actions onto the undo stack under `key`, creating
    /// the stack if needed. No stack is created when there is nothing to add.
    ///
    /// Returns `false` if the key is invalid.
    pub fn add_done_actions<'k, I>(&mut self, key: impl Into<Key<'k>>, actions: I) -> bool
    where
        I: IntoIterator,
        I::Item: Into<Entry<A>>,
    {
        let name = match key.into().name() {
            Ok(name) => name,
            Err(err) => {
                misuse(&err);
                return false;
            }
        };
        let entries = actions.into_iter().map(Into::into).collect::<Vec<Entry<A>>>();
        if entries.is_empty() {
            return true;
        }
        if !self.stacks.contains_key(name) {
            tracing::debug!(key = name, "creating stack");
            let stack = Stack::builder().capacity(self.stack_capacity).build();
            self.stacks.insert(name.to_owned(), stack);
        }
        self.track(Key::Name(name), |stack| stack.add_done_actions(entries))
            .is_some()
    }

    /// Calls [`Stack::single_do`] on the stack under `key`.
    ///
    /// # Errors
    /// Errors returned by the action are passed on.
    pub fn single_do<'k>(&mut self, key: impl Into<Key<'k>>, target: &mut A::Target) -> Result {
        self.track(key.into(), |stack| stack.single_do(target))
            .unwrap_or(Ok(false))
    }

    /// Calls [`Stack::single_undo`] on the stack under `key`.
    ///
    /// # Errors
    /// Errors returned by the action are passed on.
    pub fn single_undo<'k>(&mut self, key: impl Into<Key<'k>>, target: &mut A::Target) -> Result {
        self.track(key.into(), |stack| stack.single_undo(target))
            .unwrap_or(Ok(false))
    }

    /// Calls [`Stack::roll_back`] on the stack under `key`.
    ///
    /// # Errors
    /// Errors returned by the actions are passed on.
    pub fn roll_back<'k>(&mut self, key: impl Into<Key<'k>>, target: &mut A::Target) -> Result {
        self.track(key.into(), |stack| stack.roll_back(target))
            .unwrap_or(Ok(false))
    }

    /// Calls [`Stack::roll_forward`] on the stack under `key`.
    ///
    /// # Errors
    /// Errors returned by the actions are passed on.
    pub fn roll_forward<'k>(&mut self, key: impl Into<Key<'k>>, target: &mut A::Target) -> Result {
        self.track(key.into(), |stack| stack.roll_forward(target))
            .unwrap_or(Ok(false))
    }

    /// Calls [`Stack::action_description`] on the stack under `key`.
    pub fn action_description<'k>(&self, key: impl Into<Key<'k>>) -> String {
        self.lookup(key.into())
            .map(Stack::action_description)
            .unwrap_or_default()
    }

    /// Calls [`Stack::do_action_description`] on the stack under `key`.
    pub fn do_action_description<'k>(&self, key: impl Into<Key<'k>>) -> String {
        self.lookup(key.into())
            .map(Stack::do_action_description)
            .unwrap_or_default()
    }

    /// Calls [`Stack::undo_action_description`] on the stack under `key`.
    pub fn undo_action_description<'k>(&self, key: impl Into<Key<'k>>) -> String {
        self.lookup(key.into())
            .map(Stack::undo_action_description)
            .unwrap_or_default()
    }

    /// Removes the stack under `key` without undoing its actions.
    pub fn remove<'k>(&mut self, key: impl Into<Key<'k>>) -> Option<Stack<A>> {
        let name = key.into().name().map_err(|err| misuse(&err)).ok()?;
        let stack = self.stacks.remove(name)?;
        self.bump();
        Some(stack)
    }

    /// Removes every stack without undoing their actions.
    pub fn clear(&mut self) {
        if !self.stacks.is_empty() {
            self.stacks.clear();
            self.bump();
        }
    }

    /// Runs `f` on the stack under `key` and moves the shared counter if the
    /// stack changed.
    fn track<R>(&mut self, key: Key, f: impl FnOnce(&mut Stack<A>) -> R) -> Option<R> {
        let name = key.name().map_err(|err| misuse(&err)).ok()?;
        let Some(stack) = self.stacks.get_mut(name) else {
            misuse(&KeyError::Unregistered(name.to_owned()));
            return None;
        };
        let before = stack.changes();
        let output = f(stack);
        if stack.changes() != before {
            self.bump();
        }
        Some(output)
    }

    fn bump(&mut self) {
        self.changes += 1;
        let changes = self.changes;
        self.socket.emit(|| Signal::Changes(changes));
    }
}

/// Logs a bad key together with where it came from.
fn misuse(err: &KeyError) {
    tracing::warn!(
        error = %err,
        backtrace = %Backtrace::capture(),
        "invalid stack key"
    );
}

impl<A> Default for Manager<A> {
    fn default() -> Manager<A> {
        Manager::new()
    }
}

impl<A: fmt::Debug, S> fmt::Debug for Manager<A, S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Manager")
            .field("stacks", &self.stacks)
            .field("changes", &self.changes)
            .finish_non_exhaustive()
    }
}
