use super::Stack;
use crate::format::Format;
use crate::{Action, Entry};
use std::fmt::{self, Write};

/// Configurable display formatting for the [`Stack`].
///
/// The undo stack and the do stack are shown as one numbered timeline, last
/// action to redo at the top and oldest done action at the bottom. `HEAD` marks
/// the action the next undo would take.
///
/// # Examples
/// ```
/// # use doundo::{Push, Stack};
/// # fn main() -> doundo::Result<()> {
/// let mut target = String::new();
/// let mut stack = Stack::new();
/// stack.apply(&mut target, Push('a'))?;
/// stack.apply(&mut target, Push('b'))?;
/// stack.single_undo(&mut target)?;
/// let mut display = stack.display();
/// display.detailed(false);
/// # #[cfg(feature = "colored")]
/// # display.colored(false);
/// assert_eq!(
///     display.to_string(),
///     "2 (not done) push `b`\n1 (done) [HEAD] push `a`\n0\n",
/// );
/// # Ok(())
/// # }
/// ```
pub struct Display<'a, A, S> {
    stack: &'a Stack<A, S>,
    format: Format,
}

impl<A, S> Display<'_, A, S> {
    /// Show colored output (on by default).
    ///
    /// Requires the `colored` feature to be enabled.
    #[cfg(feature = "colored")]
    pub fn colored(&mut self, on: bool) -> &mut Self {
        self.format.colored = on;
        self
    }

    /// Show detailed output (on by default).
    pub fn detailed(&mut self, on: bool) -> &mut Self {
        self.format.detailed = on;
        self
    }

    /// Show the position of the next undo in the output (on by default).
    pub fn head(&mut self, on: bool) -> &mut Self {
        self.format.head = on;
        self
    }

    /// Show the state of every action (on by default).
    ///
    /// This is the state of the [`Entry`], which only counts the hooks run
    /// through it. Actions added with
    /// [`add_done_actions`](Stack::add_done_actions) start out as not done.
    pub fn state(&mut self, on: bool) -> &mut Self {
        self.format.state = on;
        self
    }
}

impl<A: Action, S> Display<'_, A, S> {
    fn fmt_list(&self, f: &mut fmt::Formatter, index: usize, entry: Option<&Entry<A>>) -> fmt::Result {
        self.format.index(f, index)?;

        if let Some(entry) = entry {
            #[cfg(feature = "chrono")]
            if self.format.detailed {
                self.format.timestamp(f, &entry.updated_at())?;
            }
            self.format.state(f, entry.state())?;
        }

        self.format.head(f, index, self.stack.undo_stack_size())?;

        match entry {
            Some(entry) if self.format.detailed => {
                writeln!(f)?;
                self.format.message(f, &entry.description())
            }
            Some(entry) => {
                f.write_char(' ')?;
                self.format.message(f, &entry.description())?;
                writeln!(f)
            }
            None => writeln!(f),
        }
    }
}

impl<'a, A, S> From<&'a Stack<A, S>> for Display<'a, A, S> {
    fn from(stack: &'a Stack<A, S>) -> Self {
        Display {
            stack,
            format: Format::default(),
        }
    }
}

impl<A: Action, S> fmt::Display for Display<'_, A, S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let timeline = self
            .stack
            .undo_stack
            .iter()
            .chain(self.stack.do_stack.iter().rev())
            .collect::<Vec<_>>();
        for (i, entry) in timeline.into_iter().enumerate().rev() {
            self.fmt_list(f, i + 1, Some(entry))?;
        }
        self.fmt_list(f, 0, None)
    }
}
