use doundo::{Action, ActionList, Direction, Entry, Error, Stack, State};

/// Logs its hooks and fails the ones it is told to fail.
#[derive(Clone, Debug)]
struct Child {
    name: char,
    fail_do: bool,
    fail_undo: bool,
}

const fn ok(name: char) -> Child {
    Child { name, fail_do: false, fail_undo: false }
}

const fn bad_do(name: char) -> Child {
    Child { name, fail_do: true, fail_undo: false }
}

const fn bad_undo(name: char) -> Child {
    Child { name, fail_do: false, fail_undo: true }
}

impl Action for Child {
    type Target = Vec<String>;

    fn apply(&mut self, log: &mut Vec<String>) -> doundo::Result {
        log.push(format!("do {}", self.name));
        Ok(!self.fail_do)
    }

    fn undo(&mut self, log: &mut Vec<String>) -> doundo::Result {
        log.push(format!("undo {}", self.name));
        Ok(!self.fail_undo)
    }

    fn description(&self) -> String {
        self.name.to_string()
    }
}

fn counts(list: &ActionList<Child>) -> Vec<(usize, usize, State)> {
    list.entries()
        .map(|entry| (entry.done_count(), entry.undone_count(), entry.state()))
        .collect()
}

#[test]
fn failing_child_rolls_the_list_back() {
    let mut log = Vec::new();
    let mut entry = Entry::new(ActionList::from_iter([ok('a'), ok('b'), bad_do('c'), ok('d')]));
    assert_eq!(entry.do_action(&mut log), Ok(false));
    assert_eq!(log, ["do a", "do b", "do c", "undo b", "undo a"]);
    assert_eq!(entry.state(), State::NotDone);
    assert_eq!(entry.done_count(), 0);
    assert_eq!(
        counts(entry.get()),
        [
            (1, 1, State::NotDone),
            (1, 1, State::NotDone),
            (0, 0, State::NotDone),
            (0, 0, State::NotDone),
        ]
    );
}

#[test]
fn failing_child_in_list_order() {
    let mut log = Vec::new();
    let list = ActionList::from_iter([ok('a'), ok('b'), bad_do('c')]).with_undo_in_reverse_order(false);
    let mut entry = Entry::new(list);
    assert_eq!(entry.do_action(&mut log), Ok(false));
    assert_eq!(log, ["do a", "do b", "do c", "undo a", "undo b"]);
}

#[test]
fn failing_undo_redoes_the_undone() {
    let mut log = Vec::new();
    let mut entry = Entry::new(ActionList::from_iter([bad_undo('a'), ok('b'), ok('c')]));
    assert_eq!(entry.do_action(&mut log), Ok(true));
    log.clear();
    assert_eq!(entry.undo_action(&mut log), Ok(false));
    assert_eq!(log, ["undo c", "undo b", "undo a", "do b", "do c"]);
    assert_eq!(entry.state(), State::Done);
    assert!(entry.get().entries().all(|child| child.state() == State::Done));
}

#[test]
fn failed_compensation_is_an_error() {
    let mut log = Vec::new();
    let mut entry = Entry::new(ActionList::from_iter([ok('a'), bad_undo('b'), bad_do('c')]));
    let err = entry.do_action(&mut log).unwrap_err();
    assert_eq!(
        err,
        Error::Inconsistent {
            direction: Direction::Undo,
            actions: vec!["b".into(), "a".into()],
            requested: 2,
            succeeded: 0,
        }
    );
    assert_eq!(log, ["do a", "do b", "do c", "undo b"]);
}

#[test]
fn error_passes_through_the_stack() {
    let mut log = Vec::new();
    let mut stack = Stack::new();
    let list = ActionList::from_iter([ok('a'), bad_undo('b'), bad_do('c')]);
    assert!(matches!(
        stack.apply(&mut log, list),
        Err(Error::Inconsistent { requested: 2, .. })
    ));
    assert!(stack.is_empty());
}

#[test]
fn lists_nest() {
    let mut log = Vec::new();
    let inner = ActionList::from_iter([ok('b'), ok('c')]);
    let mut outer = ActionList::<Box<dyn Action<Target = Vec<String>>>>::new();
    outer.add_action(Box::new(ok('a')) as Box<dyn Action<Target = Vec<String>>>);
    outer.add_action(Box::new(inner) as Box<dyn Action<Target = Vec<String>>>);
    let mut stack = Stack::new();
    assert_eq!(stack.apply(&mut log, outer), Ok(true));
    assert_eq!(stack.single_undo(&mut log), Ok(true));
    assert_eq!(log, ["do a", "do b", "do c", "undo c", "undo b", "undo a"]);
    assert_eq!(stack.do_action_description(), "a\nb\nc");
}
