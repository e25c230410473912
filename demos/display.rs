use doundo::{Action, ActionExt, Stack};

#[derive(Debug)]
struct Push(char);

impl Action for Push {
    type Target = String;

    fn apply(&mut self, s: &mut String) -> doundo::Result {
        s.push(self.0);
        Ok(true)
    }

    fn undo(&mut self, s: &mut String) -> doundo::Result {
        if !s.ends_with(self.0) {
            return Ok(false);
        }
        s.pop();
        Ok(true)
    }

    fn description(&self) -> String {
        format!("Push '{}'.", self.0)
    }
}

fn main() -> doundo::Result<()> {
    let mut target = String::new();
    let mut stack = Stack::new();
    for c in "abcde".chars() {
        stack.apply(&mut target, Push(c).sticky())?;
    }
    stack.single_undo(&mut target)?;
    stack.single_undo(&mut target)?;
    assert_eq!(target, "abc");

    // Swap the `c` behind the stack's back, so undoing it fails and sticks.
    target.pop();
    target.push('x');
    assert!(!stack.single_undo(&mut target)?);

    println!("{}", stack.display());
    Ok(())
}
