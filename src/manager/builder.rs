use super::Manager;
use crate::socket::Socket;
use std::collections::HashMap;
use std::marker::PhantomData;

/// Builder for a [`Manager`].
///
/// # Examples
/// ```
/// # use doundo::{Manager, Push, Signal};
/// let mut manager = Manager::builder()
///     .capacity(8)
///     .stack_capacity(100)
///     .connect(|signal: Signal| { dbg!(signal); })
///     .build();
/// # manager.add_done_action("text", Push('a'));
/// ```
#[derive(Debug)]
pub struct Builder<A, S = ()> {
    capacity: usize,
    stack_capacity: usize,
    socket: Socket<S>,
    pd: PhantomData<A>,
}

impl<A, S> Builder<A, S> {
    /// Sets how many stacks fit before the manager reallocates.
    pub fn capacity(mut self, capacity: usize) -> Builder<A, S> {
        self.capacity = capacity;
        self
    }

    /// Sets the capacity of the stacks the manager creates.
    pub fn stack_capacity(mut self, capacity: usize) -> Builder<A, S> {
        self.stack_capacity = capacity;
        self
    }

    /// Connects the slot.
    pub fn connect(mut self, slot: S) -> Builder<A, S> {
        self.socket = Socket::new(slot);
        self
    }

    /// Builds the manager.
    pub fn build(self) -> Manager<A, S> {
        Manager {
            stacks: HashMap::with_capacity(self.capacity),
            stack_capacity: self.stack_capacity,
            changes: 0,
            socket: self.socket,
        }
    }
}

impl<A, S> Default for Builder<A, S> {
    fn default() -> Self {
        Builder {
            capacity: 0,
            stack_capacity: 0,
            socket: Socket::default(),
            pd: PhantomData,
        }
    }
}
