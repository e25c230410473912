//! Module used to communicate changes in the data structures.

use std::mem;
use std::sync::mpsc::{Sender, SyncSender};

/// Slot wrapper that adds some additional functionality.
#[derive(Clone, Debug)]
pub(crate) struct Socket<S>(Option<S>);

impl<S> Socket<S> {
    pub const fn new(slot: S) -> Socket<S> {
        Socket(Some(slot))
    }

    pub fn connect(&mut self, slot: Option<S>) -> Option<S> {
        mem::replace(&mut self.0, slot)
    }

    pub fn disconnect(&mut self) -> Option<S> {
        self.0.take()
    }
}

impl<S> Default for Socket<S> {
    fn default() -> Self {
        Socket(None)
    }
}

impl<S: Slot> Socket<S> {
    pub fn emit(&mut self, signal: impl FnOnce() -> Signal) {
        if let Some(slot) = &mut self.0 {
            slot.on_emit(signal());
        }
    }

    pub fn emit_if(&mut self, cond: bool, signal: impl FnOnce() -> Signal) {
        if cond {
            self.emit(signal);
        }
    }
}

/// The `Signal` describes the state change done to the data structures.
///
/// See [`Slot`] for more information.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
#[non_exhaustive]
pub enum Signal {
    /// Emitted when the ability to do (redo) an action has changed.
    Do(bool),
    /// Emitted when the ability to undo an action has changed.
    Undo(bool),
    /// Emitted with the new value when the change counter has moved.
    Changes(usize),
}

/// Use this to handle signals emitted.
///
/// This allows you to refresh things like undo and redo buttons only when
/// something actually changed.
///
/// # Examples
/// ```
/// # use std::sync::mpsc;
/// # use doundo::{Push, Signal, Stack};
/// # fn main() -> doundo::Result<()> {
/// let (sender, receiver) = mpsc::channel();
/// let mut iter = receiver.try_iter();
///
/// let mut target = String::new();
/// let mut stack = Stack::builder().connect(sender).build();
///
/// stack.apply(&mut target, Push('a'))?;
/// assert_eq!(iter.next(), Some(Signal::Undo(true)));
/// assert_eq!(iter.next(), Some(Signal::Changes(1)));
/// assert_eq!(iter.next(), None);
///
/// stack.single_undo(&mut target)?;
/// assert_eq!(iter.next(), Some(Signal::Do(true)));
/// assert_eq!(iter.next(), Some(Signal::Undo(false)));
/// assert_eq!(iter.next(), Some(Signal::Changes(2)));
/// assert_eq!(iter.next(), None);
/// # Ok(())
/// # }
/// ```
pub trait Slot {
    /// Receives a signal that describes the state change done to the data structures.
    fn on_emit(&mut self, signal: Signal);
}

impl Slot for () {
    fn on_emit(&mut self, _: Signal) {}
}

impl<F: FnMut(Signal)> Slot for F {
    fn on_emit(&mut self, signal: Signal) {
        self(signal)
    }
}

impl Slot for Sender<Signal> {
    fn on_emit(&mut self, signal: Signal) {
        self.send(signal).ok();
    }
}

impl Slot for SyncSender<Signal> {
    fn on_emit(&mut self, signal: Signal) {
        self.send(signal).ok();
    }
}
