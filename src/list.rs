use crate::{Action, Direction, Entry, Error, Result, Status};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An action made of a sequence of actions.
///
/// Doing the list does every child in order. If a child fails, the children
/// that were already done are undone again so the list is back where it
/// started. Undoing works the same way, redoing the children that were already
/// undone. Only when that compensating run fails as well is
/// [`Error::Inconsistent`] returned.
///
/// # Examples
/// ```
/// # use doundo::{ActionList, Entry, Push};
/// let mut target = String::new();
/// let mut list = ActionList::new();
/// list.add_actions([Push('a'), Push('b'), Push('c')]);
/// let mut entry = Entry::new(list);
/// assert!(entry.do_action(&mut target).unwrap());
/// assert_eq!(target, "abc");
/// assert!(entry.undo_action(&mut target).unwrap());
/// assert_eq!(target, "");
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct ActionList<A> {
    entries: Vec<Entry<A>>,
    undo_in_reverse_order: bool,
}

impl<A> ActionList<A> {
    /// Returns a new empty list.
    pub fn new() -> ActionList<A> {
        ActionList {
            entries: Vec::new(),
            undo_in_reverse_order: true,
        }
    }

    /// Sets if the children are undone last to first (on by default).
    pub fn with_undo_in_reverse_order(mut self, on: bool) -> ActionList<A> {
        self.undo_in_reverse_order = on;
        self
    }

    /// Sets if the children are undone last to first.
    pub fn set_undo_in_reverse_order(&mut self, on: bool) {
        self.undo_in_reverse_order = on;
    }

    /// Returns `true` if the children are undone last to first.
    pub fn undo_in_reverse_order(&self) -> bool {
        self.undo_in_reverse_order
    }

    /// Appends an action to the list.
    pub fn add_action(&mut self, action: impl Into<Entry<A>>) {
        self.entries.push(action.into());
    }

    /// Appends every action to the list.
    pub fn add_actions<I>(&mut self, actions: I)
    where
        I: IntoIterator,
        I::Item: Into<Entry<A>>,
    {
        self.entries.extend(actions.into_iter().map(Into::into));
    }

    /// Returns the number of children.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the list has no children.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns an iterator over the children in list order.
    pub fn entries(&self) -> impl Iterator<Item = &Entry<A>> {
        self.entries.iter()
    }

    /// Indices of the first `n` children in the order they are undone.
    fn undo_order(&self, n: usize) -> Vec<usize> {
        if self.undo_in_reverse_order {
            (0..n).rev().collect()
        } else {
            (0..n).collect()
        }
    }
}

impl<A: Action> ActionList<A> {
    /// Runs the children at `indices` in `direction`, stopping at the first failure.
    ///
    /// Returns the indices that succeeded.
    fn run(
        &mut self,
        direction: Direction,
        target: &mut A::Target,
        indices: &[usize],
    ) -> Result<Vec<usize>> {
        let mut succeeded = Vec::with_capacity(indices.len());
        for &i in indices {
            if !self.entries[i].run(direction, target)? {
                break;
            }
            succeeded.push(i);
        }
        Ok(succeeded)
    }

    /// Reverts the children at `indices` after a failed `direction` run.
    fn compensate(
        &mut self,
        direction: Direction,
        target: &mut A::Target,
        indices: &[usize],
    ) -> Result<()> {
        let compensation = direction.reverse();
        let succeeded = self.run(compensation, target, indices)?;
        if succeeded.len() == indices.len() {
            return Ok(());
        }
        let actions = indices
            .iter()
            .map(|&i| self.entries[i].description())
            .collect::<Vec<_>>();
        tracing::error!(
            direction = %compensation,
            requested = indices.len(),
            succeeded = succeeded.len(),
            ?actions,
            "compensation failed, action list is inconsistent"
        );
        Err(Error::Inconsistent {
            direction: compensation,
            actions,
            requested: indices.len(),
            succeeded: succeeded.len(),
        })
    }
}

impl<A: Action> Action for ActionList<A> {
    type Target = A::Target;

    fn apply(&mut self, target: &mut A::Target) -> Result {
        let order = (0..self.entries.len()).collect::<Vec<_>>();
        let done = self.run(Direction::Do, target, &order)?;
        if done.len() == order.len() {
            return Ok(true);
        }
        let undo = self.undo_order(done.len());
        self.compensate(Direction::Do, target, &undo)?;
        Ok(false)
    }

    fn undo(&mut self, target: &mut A::Target) -> Result {
        let order = self.undo_order(self.entries.len());
        let mut undone = self.run(Direction::Undo, target, &order)?;
        if undone.len() == order.len() {
            return Ok(true);
        }
        // Redo in list order, the order the children were done in.
        undone.sort_unstable();
        self.compensate(Direction::Undo, target, &undone)?;
        Ok(false)
    }

    fn can_do(&self, status: Status) -> bool {
        !status.state.is_stuck() && self.entries.iter().all(Entry::can_do)
    }

    fn can_undo(&self, status: Status) -> bool {
        !status.state.is_stuck() && self.entries.iter().all(Entry::can_undo)
    }

    fn description(&self) -> String {
        self.entries
            .iter()
            .map(Entry::description)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl<A> Default for ActionList<A> {
    fn default() -> Self {
        ActionList::new()
    }
}

impl<A> FromIterator<A> for ActionList<A> {
    fn from_iter<I: IntoIterator<Item = A>>(actions: I) -> Self {
        let mut list = ActionList::new();
        list.add_actions(actions);
        list
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{from_fn, ActionExt, FromFn, State};

    type Log = Vec<String>;

    /// An action that logs its hooks and fails the ones it is told to fail.
    fn logged(
        name: &'static str,
        fail_do: bool,
        fail_undo: bool,
    ) -> FromFn<impl FnMut(&mut Log) -> bool, impl FnMut(&mut Log) -> bool, Log> {
        from_fn(
            name,
            move |log: &mut Log| {
                log.push(format!("do {name}"));
                !fail_do
            },
            move |log: &mut Log| {
                log.push(format!("undo {name}"));
                !fail_undo
            },
        )
    }

    fn boxed(action: impl Action<Target = Log> + 'static) -> Box<dyn Action<Target = Log>> {
        Box::new(action)
    }

    #[test]
    fn do_and_undo_all() {
        let mut log = Log::new();
        let mut entry = Entry::new(ActionList::from_iter([
            logged("a", false, false),
            logged("b", false, false),
            logged("c", false, false),
        ]));
        assert_eq!(entry.do_action(&mut log), Ok(true));
        assert_eq!(entry.undo_action(&mut log), Ok(true));
        assert_eq!(
            log,
            ["do a", "do b", "do c", "undo c", "undo b", "undo a"]
        );
        assert_eq!(entry.state(), State::NotDone);
    }

    #[test]
    fn undo_in_list_order() {
        let mut log = Log::new();
        let list = ActionList::from_iter([logged("a", false, false), logged("b", false, false)])
            .with_undo_in_reverse_order(false);
        let mut entry = Entry::new(list);
        assert_eq!(entry.do_action(&mut log), Ok(true));
        assert_eq!(entry.undo_action(&mut log), Ok(true));
        assert_eq!(log, ["do a", "do b", "undo a", "undo b"]);
    }

    #[test]
    fn failed_do_is_rolled_back() {
        let mut log = Log::new();
        let mut entry = Entry::new(ActionList::from_iter([
            logged("a", false, false),
            logged("b", false, false),
            logged("c", true, false),
            logged("d", false, false),
        ]));
        assert_eq!(entry.do_action(&mut log), Ok(false));
        assert_eq!(log, ["do a", "do b", "do c", "undo b", "undo a"]);
        assert_eq!(entry.state(), State::NotDone);

        let children = entry.get().entries().collect::<Vec<_>>();
        for child in &children[..2] {
            assert_eq!((child.done_count(), child.undone_count()), (1, 1));
            assert_eq!(child.state(), State::NotDone);
        }
        assert_eq!((children[2].done_count(), children[2].state()), (0, State::NotDone));
        assert_eq!(children[3].done_count(), 0);
    }

    #[test]
    fn failed_do_rolled_back_in_list_order() {
        let mut log = Log::new();
        let list = ActionList::from_iter([
            logged("a", false, false),
            logged("b", false, false),
            logged("c", true, false),
        ])
        .with_undo_in_reverse_order(false);
        assert_eq!(Entry::new(list).do_action(&mut log), Ok(false));
        assert_eq!(log, ["do a", "do b", "do c", "undo a", "undo b"]);
    }

    #[test]
    fn failed_undo_is_redone() {
        let mut log = Log::new();
        let mut entry = Entry::new(ActionList::from_iter([
            logged("a", false, true),
            logged("b", false, false),
            logged("c", false, false),
        ]));
        assert_eq!(entry.do_action(&mut log), Ok(true));
        log.clear();
        assert_eq!(entry.undo_action(&mut log), Ok(false));
        assert_eq!(log, ["undo c", "undo b", "undo a", "do b", "do c"]);
        assert_eq!(entry.state(), State::Done);
        assert!(entry.get().entries().all(|e| e.state() == State::Done));
    }

    #[test]
    fn failed_rollback_is_inconsistent() {
        let mut log = Log::new();
        let mut entry = Entry::new(ActionList::from_iter([
            logged("a", false, false),
            logged("b", false, true),
            logged("c", true, false),
        ]));
        let error = entry.do_action(&mut log).unwrap_err();
        assert_eq!(
            error,
            Error::Inconsistent {
                direction: Direction::Undo,
                actions: vec!["b".into(), "a".into()],
                requested: 2,
                succeeded: 0,
            }
        );
        assert_eq!(log, ["do a", "do b", "do c", "undo b"]);
        assert_eq!(entry.done_count(), 0);
    }

    #[test]
    fn failed_redo_is_inconsistent() {
        let mut log = Log::new();
        let mut list = ActionList::<Box<dyn Action<Target = Log>>>::new();
        list.add_action(boxed(logged("a", false, true)));
        list.add_action(boxed(logged("b", false, false).once()));
        let mut entry = Entry::new(list);
        assert_eq!(entry.do_action(&mut log), Ok(true));
        match entry.undo_action(&mut log) {
            Err(Error::Inconsistent {
                direction,
                requested,
                succeeded,
                ..
            }) => {
                assert_eq!(direction, Direction::Do);
                assert_eq!((requested, succeeded), (1, 0));
            }
            other => panic!("expected an inconsistent list, got {other:?}"),
        }
    }

    #[test]
    fn can_do_is_all_children() {
        let mut entry = Entry::new(ActionList::from_iter([
            logged("a", false, false).sticky(),
            logged("b", true, false).sticky(),
        ]));
        assert!(entry.can_do());
        assert_eq!(entry.do_action(&mut Log::new()), Ok(false));
        assert!(!entry.can_do());
        assert!(!entry.can_undo());
    }

    #[test]
    fn stuck_list_is_frozen() {
        let mut log = Log::new();
        let list = ActionList::from_iter([logged("a", false, false), logged("b", true, false)]);
        let mut entry = Entry::new(list.sticky());
        assert_eq!(entry.do_action(&mut log), Ok(false));
        assert_eq!(entry.state(), State::StuckInDo);
        // The children are back to a clean state, but the list itself is stuck.
        assert!(entry.get().0.entries().all(|e| e.can_do()));
        assert!(!entry.can_do());
        assert!(!entry.can_undo());

        log.clear();
        assert_eq!(entry.do_action(&mut log), Ok(false));
        assert_eq!(entry.undo_action(&mut log), Ok(false));
        assert!(log.is_empty());

        entry.reset();
        assert!(entry.can_do());
    }

    #[test]
    fn description_joins_children() {
        let list = ActionList::from_iter([logged("a", false, false), logged("b", false, false)]);
        assert_eq!(list.description(), "a\nb");
        assert_eq!(ActionList::<crate::Push>::new().description(), "");
    }
}
