use crate::Action;
use std::fmt::{self, Debug, Formatter};
use std::marker::PhantomData;

/// Creates an action from a pair of functions.
///
/// Both functions return `true` on success and `false` on failure.
///
/// # Examples
/// ```
/// # use doundo::{from_fn, Stack};
/// # fn main() -> doundo::Result<()> {
/// let mut target = 0;
/// let mut stack = Stack::new();
/// let increment = from_fn("increment", |n: &mut i32| { *n += 1; true }, |n: &mut i32| { *n -= 1; true });
/// stack.apply(&mut target, increment)?;
/// assert_eq!(target, 1);
/// stack.single_undo(&mut target)?;
/// assert_eq!(target, 0);
/// # Ok(())
/// # }
/// ```
pub fn from_fn<D, U, T>(description: impl Into<String>, apply: D, undo: U) -> FromFn<D, U, T>
where
    D: FnMut(&mut T) -> bool,
    U: FnMut(&mut T) -> bool,
{
    FromFn {
        description: description.into(),
        apply,
        undo,
        target: PhantomData,
    }
}

/// Action made from a pair of functions.
///
/// Created by the [`from_fn`] function.
#[derive(Clone)]
pub struct FromFn<D, U, T> {
    description: String,
    apply: D,
    undo: U,
    target: PhantomData<fn(&mut T)>,
}

impl<D, U, T> Action for FromFn<D, U, T>
where
    D: FnMut(&mut T) -> bool,
    U: FnMut(&mut T) -> bool,
{
    type Target = T;

    fn apply(&mut self, target: &mut T) -> crate::Result {
        Ok((self.apply)(target))
    }

    fn undo(&mut self, target: &mut T) -> crate::Result {
        Ok((self.undo)(target))
    }

    fn description(&self) -> String {
        self.description.clone()
    }
}

impl<D, U, T> Debug for FromFn<D, U, T> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("FromFn")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}
