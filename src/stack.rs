//! Two stacks of actions: the ones that can be undone and the ones that can be redone.

mod builder;
mod display;

pub use builder::Builder;
pub use display::Display;

use crate::socket::{Signal, Slot, Socket};
use crate::{Action, Direction, Entry, Result};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;

/// Undo-redo stack of actions.
///
/// Done actions wait on the undo stack, undone actions on the do stack.
/// [`single_undo`](Stack::single_undo) and [`single_do`](Stack::single_do) move
/// the top action from one stack to the other and run it, and
/// [`roll_back`](Stack::roll_back) and [`roll_forward`](Stack::roll_forward)
/// repeat that until a stack is empty or a step fails. Actions never leave the
/// stacks except through [`clear`](Stack::clear).
///
/// Before a step the top action is asked if it may run. An action that refuses
/// stays where it is and blocks the stack until it changes its mind.
///
/// # Examples
/// ```
/// # use doundo::{Push, Stack};
/// # fn main() -> doundo::Result<()> {
/// let mut target = String::from("abcd");
/// let mut stack = Stack::<Push>::new();
/// stack.add_done_actions([Push('a'), Push('b'), Push('c'), Push('d')]);
/// assert_eq!((stack.do_stack_size(), stack.undo_stack_size()), (0, 4));
/// stack.single_undo(&mut target)?;
/// assert_eq!((stack.do_stack_size(), stack.undo_stack_size()), (1, 3));
/// stack.roll_back(&mut target)?;
/// assert_eq!((stack.do_stack_size(), stack.undo_stack_size()), (4, 0));
/// assert_eq!(target, "");
/// # Ok(())
/// # }
/// ```
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(bound(serialize = "A: Serialize", deserialize = "A: Deserialize<'de>"))
)]
#[derive(Clone)]
pub struct Stack<A, S = ()> {
    undo_stack: Vec<Entry<A>>,
    do_stack: Vec<Entry<A>>,
    changes: usize,
    #[cfg_attr(feature = "serde", serde(skip))]
    socket: Socket<S>,
}

impl<A> Stack<A> {
    /// Returns a new stack.
    pub fn new() -> Stack<A> {
        Stack::builder().build()
    }
}

impl<A, S> Stack<A, S> {
    /// Returns a new stack builder.
    pub fn builder() -> Builder<A, S> {
        Builder::default()
    }

    /// Returns the number of actions waiting to be done again.
    pub fn do_stack_size(&self) -> usize {
        self.do_stack.len()
    }

    /// Returns the number of actions waiting to be undone.
    pub fn undo_stack_size(&self) -> usize {
        self.undo_stack.len()
    }

    /// Returns the number of actions in both stacks.
    pub fn len(&self) -> usize {
        self.do_stack.len() + self.undo_stack.len()
    }

    /// Returns `true` if both stacks are empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if there is an action to do again.
    pub fn can_do(&self) -> bool {
        !self.do_stack.is_empty()
    }

    /// Returns `true` if there is an action to undo.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Returns the change counter.
    ///
    /// The counter moves every time the stacks are modified, including steps
    /// whose action then failed.
    pub fn changes(&self) -> usize {
        self.changes
    }

    /// Returns the actions waiting to be undone, top first.
    pub fn undo_entries(&self) -> impl Iterator<Item = &Entry<A>> {
        self.undo_stack.iter().rev()
    }

    /// Returns the actions waiting to be done again, top first.
    pub fn do_entries(&self) -> impl Iterator<Item = &Entry<A>> {
        self.do_stack.iter().rev()
    }

    /// Sets how the signal should be handled when the state changes.
    ///
    /// The previous slot is returned if it exists.
    pub fn connect(&mut self, slot: S) -> Option<S> {
        self.socket.connect(Some(slot))
    }

    /// Removes and returns the slot if it exists.
    pub fn disconnect(&mut self) -> Option<S> {
        self.socket.disconnect()
    }

    /// Returns a structure for configurable formatting of the stack.
    pub fn display(&self) -> Display<'_, A, S> {
        Display::from(self)
    }

    fn stacks(&mut self, direction: Direction) -> (&mut Vec<Entry<A>>, &mut Vec<Entry<A>>) {
        match direction {
            Direction::Do => (&mut self.do_stack, &mut self.undo_stack),
            Direction::Undo => (&mut self.undo_stack, &mut self.do_stack),
        }
    }
}

impl<A: Action, S: Slot> Stack<A, S> {
    /// Pushes an action that has already been done onto the undo stack.
    ///
    /// No hook is run, so the entry starts with zero counters. See
    /// [`add_done_actions`](Stack::add_done_actions).
    pub fn add_done_action(&mut self, action: impl Into<Entry<A>>) {
        self.add_done_actions([action]);
    }

    /// Pushes actions that have already been done onto the undo stack, in order.
    ///
    /// No hook is run, so every entry starts with zero counters and in
    /// [`State::NotDone`](crate::State::NotDone). Its state follows its own
    /// successful hooks from then on: after one undo and one redo it is back on
    /// the undo stack with `done_count == undone_count`, which still reads as
    /// not done.
    pub fn add_done_actions<I>(&mut self, actions: I)
    where
        I: IntoIterator,
        I::Item: Into<Entry<A>>,
    {
        let could_do = self.can_do();
        let could_undo = self.can_undo();
        let changes = self.changes;
        let len = self.undo_stack.len();
        self.undo_stack.extend(actions.into_iter().map(Into::into));
        if self.undo_stack.len() != len {
            self.changes += 1;
        }
        self.notify(could_do, could_undo, changes);
    }

    /// Does the action and pushes it onto the undo stack.
    ///
    /// An action that fails is dropped and the stack is left untouched.
    ///
    /// # Errors
    /// Errors returned by the action are passed on.
    pub fn apply(&mut self, target: &mut A::Target, action: A) -> Result {
        let mut entry = Entry::new(action);
        if !entry.do_action(target)? {
            return Ok(false);
        }
        self.add_done_action(entry);
        Ok(true)
    }

    /// Undoes the top action of the undo stack and moves it to the do stack.
    ///
    /// Returns `Ok(false)` and leaves the stacks alone if the undo stack is
    /// empty or the top action refuses to be undone. Otherwise the action is
    /// moved even if its hook fails, and the hook's result is returned.
    ///
    /// # Errors
    /// Errors returned by the action are passed on.
    pub fn single_undo(&mut self, target: &mut A::Target) -> Result {
        self.single(Direction::Undo, target)
    }

    /// Does the top action of the do stack again and moves it to the undo stack.
    ///
    /// Returns `Ok(false)` and leaves the stacks alone if the do stack is
    /// empty or the top action refuses to be done. Otherwise the action is
    /// moved even if its hook fails, and the hook's result is returned.
    ///
    /// # Errors
    /// Errors returned by the action are passed on.
    pub fn single_do(&mut self, target: &mut A::Target) -> Result {
        self.single(Direction::Do, target)
    }

    /// Undoes actions until the undo stack is empty or a step fails.
    ///
    /// Returns `Ok(true)` only if there was something to undo and every step
    /// succeeded. Actions undone before a failure stay undone.
    ///
    /// # Errors
    /// Errors returned by the actions are passed on.
    pub fn roll_back(&mut self, target: &mut A::Target) -> Result {
        self.bulk(Direction::Undo, target)
    }

    /// Does actions again until the do stack is empty or a step fails.
    ///
    /// Returns `Ok(true)` only if there was something to do and every step
    /// succeeded. Actions done before a failure stay done.
    ///
    /// # Errors
    /// Errors returned by the actions are passed on.
    pub fn roll_forward(&mut self, target: &mut A::Target) -> Result {
        self.bulk(Direction::Do, target)
    }

    /// Removes all actions from both stacks without undoing them.
    pub fn clear(&mut self) {
        let could_do = self.can_do();
        let could_undo = self.can_undo();
        let changes = self.changes;
        if !self.is_empty() {
            self.undo_stack.clear();
            self.do_stack.clear();
            self.changes += 1;
        }
        self.notify(could_do, could_undo, changes);
    }

    /// Returns the descriptions of the undo stack followed by the do stack,
    /// one per line and top first.
    pub fn action_description(&self) -> String {
        describe(self.undo_entries().chain(self.do_entries()))
    }

    /// Returns the descriptions of the do stack, one per line and top first.
    pub fn do_action_description(&self) -> String {
        describe(self.do_entries())
    }

    /// Returns the descriptions of the undo stack, one per line and top first.
    pub fn undo_action_description(&self) -> String {
        describe(self.undo_entries())
    }

    fn single(&mut self, direction: Direction, target: &mut A::Target) -> Result {
        let could_do = self.can_do();
        let could_undo = self.can_undo();
        let changes = self.changes;
        let result = self.step(direction, target);
        self.notify(could_do, could_undo, changes);
        result
    }

    fn bulk(&mut self, direction: Direction, target: &mut A::Target) -> Result {
        let could_do = self.can_do();
        let could_undo = self.can_undo();
        let changes = self.changes;
        let mut result = Ok(false);
        while !self.stacks(direction).0.is_empty() {
            result = self.step(direction, target);
            if !matches!(result, Ok(true)) {
                break;
            }
        }
        self.notify(could_do, could_undo, changes);
        result
    }

    /// Runs the top action of the stack `direction` takes from, if it agrees.
    fn step(&mut self, direction: Direction, target: &mut A::Target) -> Result {
        let (from, to) = self.stacks(direction);
        let allowed = from.last().map(|entry| match direction {
            Direction::Do => entry.can_do(),
            Direction::Undo => entry.can_undo(),
        });
        match allowed {
            None => return Ok(false),
            Some(false) => {
                if let Some(entry) = from.last() {
                    tracing::debug!(
                        action = %entry.description(),
                        state = %entry.state(),
                        %direction,
                        "top action blocks the stack"
                    );
                }
                return Ok(false);
            }
            Some(true) => {}
        }
        let Some(mut entry) = from.pop() else {
            return Ok(false);
        };
        tracing::trace!(action = %entry.description(), %direction, "moving action");
        let result = entry.run(direction, target);
        to.push(entry);
        self.changes += 1;
        result
    }

    fn notify(&mut self, could_do: bool, could_undo: bool, changes: usize) {
        let can_do = self.can_do();
        let can_undo = self.can_undo();
        let now = self.changes;
        self.socket.emit_if(could_do != can_do, || Signal::Do(can_do));
        self.socket
            .emit_if(could_undo != can_undo, || Signal::Undo(can_undo));
        self.socket.emit_if(changes != now, || Signal::Changes(now));
    }
}

/// Joins the descriptions with newlines, dropping one trailing newline.
fn describe<'a, A: Action + 'a>(entries: impl Iterator<Item = &'a Entry<A>>) -> String {
    let mut text = String::new();
    for entry in entries {
        text.push_str(&entry.description());
        text.push('\n');
    }
    if text.ends_with('\n') {
        text.pop();
    }
    text
}

impl<A> Default for Stack<A> {
    fn default() -> Stack<A> {
        Stack::new()
    }
}

impl<A: fmt::Debug, S> fmt::Debug for Stack<A, S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Stack")
            .field("undo_stack", &self.undo_stack)
            .field("do_stack", &self.do_stack)
            .field("changes", &self.changes)
            .finish_non_exhaustive()
    }
}

impl<A: Action, S> fmt::Display for Stack<A, S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        (&self.display() as &dyn fmt::Display).fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{from_fn, ActionExt, FromFn, Once, Push, State};

    #[test]
    fn empty() {
        let mut target = String::new();
        let mut stack = Stack::<Push>::new();
        assert!(!stack.can_do());
        assert!(!stack.can_undo());
        assert_eq!(stack.single_do(&mut target), Ok(false));
        assert_eq!(stack.single_undo(&mut target), Ok(false));
        assert_eq!(stack.roll_back(&mut target), Ok(false));
        assert_eq!(stack.roll_forward(&mut target), Ok(false));
        assert_eq!((stack.do_stack_size(), stack.undo_stack_size()), (0, 0));
        assert_eq!(stack.changes(), 0);
        assert_eq!(stack.action_description(), "");
    }

    #[test]
    fn failed_step_still_moves() {
        let mut stack = Stack::<FromFn<_, _, ()>>::new();
        stack.add_done_action(from_fn("fails", |_: &mut ()| true, |_: &mut ()| false));
        assert_eq!(stack.changes(), 1);
        assert_eq!(stack.single_undo(&mut ()), Ok(false));
        assert_eq!((stack.do_stack_size(), stack.undo_stack_size()), (1, 0));
        assert_eq!(stack.changes(), 2);
    }

    #[test]
    fn refusing_action_blocks() {
        let mut target = String::from("a");
        let mut stack = Stack::<Once<Push>>::new();
        stack.add_done_action(Push('a').once());
        assert_eq!(stack.single_undo(&mut target), Ok(true));
        assert_eq!(target, "");
        let changes = stack.changes();
        // The add ran no hook, so `Once` still allows one do.
        assert_eq!(stack.single_do(&mut target), Ok(true));
        assert_eq!(stack.single_undo(&mut target), Ok(true));
        assert_eq!(stack.single_do(&mut target), Ok(false));
        assert_eq!(stack.changes(), changes + 2);
        assert_eq!((stack.do_stack_size(), stack.undo_stack_size()), (1, 0));
        assert_eq!(target, "");
    }

    #[test]
    fn apply_records_only_success() {
        let mut target = String::new();
        let mut stack = Stack::new();
        assert_eq!(stack.apply(&mut target, Push('a')), Ok(true));
        let entry = stack.undo_entries().next().map(Entry::state);
        assert_eq!(entry, Some(State::Done));

        let mut stack = Stack::new();
        let mut target = ();
        let failing = from_fn("fails", |_: &mut ()| false, |_: &mut ()| true);
        assert_eq!(stack.apply(&mut target, failing), Ok(false));
        assert!(stack.is_empty());
        assert_eq!(stack.changes(), 0);
    }

    #[test]
    fn descriptions() {
        let mut target = String::from("abc");
        let mut stack = Stack::<Push>::new();
        stack.add_done_actions([Push('a'), Push('b'), Push('c')]);
        stack.single_undo(&mut target).unwrap();
        assert_eq!(stack.undo_action_description(), "push `b`\npush `a`");
        assert_eq!(stack.do_action_description(), "push `c`");
        assert_eq!(
            stack.action_description(),
            "push `b`\npush `a`\npush `c`"
        );
    }

    #[test]
    fn added_entries_count_only_their_own_hooks() {
        let mut target = String::from("a");
        let mut stack = Stack::<Push>::new();
        stack.add_done_action(Push('a'));
        assert_eq!(stack.undo_entries().next().map(Entry::state), Some(State::NotDone));
        stack.single_undo(&mut target).unwrap();
        stack.single_do(&mut target).unwrap();
        let entry = stack.undo_entries().next().map(Entry::status);
        assert_eq!(
            entry,
            Some(crate::Status {
                state: State::NotDone,
                done_count: 1,
                undone_count: 1,
            })
        );
        assert_eq!(target, "a");
    }

    #[test]
    fn clear_discards_without_undo() {
        let mut target = String::from("ab");
        let mut stack = Stack::<Push>::new();
        stack.add_done_actions([Push('a'), Push('b')]);
        stack.single_undo(&mut target).unwrap();
        let changes = stack.changes();
        stack.clear();
        assert!(stack.is_empty());
        assert_eq!(target, "a");
        assert_eq!(stack.changes(), changes + 1);
        stack.clear();
        assert_eq!(stack.changes(), changes + 1);
    }
}
