use super::Stack;
use crate::socket::Socket;
use std::marker::PhantomData;

/// Builder for a [`Stack`].
///
/// # Examples
/// ```
/// # use doundo::{Push, Signal, Stack};
/// # let mut target = String::new();
/// let mut stack = Stack::builder()
///     .capacity(100)
///     .connect(|signal: Signal| { dbg!(signal); })
///     .build();
/// # stack.apply(&mut target, Push('a')).unwrap();
/// ```
#[derive(Debug)]
pub struct Builder<A, S = ()> {
    capacity: usize,
    socket: Socket<S>,
    pd: PhantomData<A>,
}

impl<A, S> Builder<A, S> {
    /// Sets the capacity of each of the two stacks.
    pub fn capacity(mut self, capacity: usize) -> Builder<A, S> {
        self.capacity = capacity;
        self
    }

    /// Connects the slot.
    pub fn connect(mut self, slot: S) -> Builder<A, S> {
        self.socket = Socket::new(slot);
        self
    }

    /// Builds the stack.
    pub fn build(self) -> Stack<A, S> {
        Stack {
            undo_stack: Vec::with_capacity(self.capacity),
            do_stack: Vec::with_capacity(self.capacity),
            changes: 0,
            socket: self.socket,
        }
    }
}

impl<A, S> Default for Builder<A, S> {
    fn default() -> Self {
        Builder {
            capacity: 0,
            socket: Socket::default(),
            pd: PhantomData,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Push, Signal, Stack};
    use std::sync::mpsc;

    #[test]
    fn connected_slot_receives_signals() {
        let (sender, receiver) = mpsc::channel();
        let mut target = String::new();
        let mut stack = Stack::builder().capacity(4).connect(sender).build();
        stack.apply(&mut target, Push('a')).unwrap();
        stack.apply(&mut target, Push('b')).unwrap();
        stack.roll_back(&mut target).unwrap();
        let signals = receiver.try_iter().collect::<Vec<_>>();
        assert_eq!(
            signals,
            [
                Signal::Undo(true),
                Signal::Changes(1),
                Signal::Changes(2),
                Signal::Do(true),
                Signal::Undo(false),
                Signal::Changes(4),
            ]
        );
    }
}
