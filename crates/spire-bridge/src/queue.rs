//! Thread-safe command FIFO
//!
//! Written by connection reader tasks, drained exclusively by the host's
//! tick thread. The lock is held only for a push or a pop, so the tick
//! thread never waits behind network-side work.

use std::collections::VecDeque;
use std::sync::Mutex;

use spire_rl_core::Command;

/// Unbounded FIFO of pending commands, insertion order = arrival order
#[derive(Debug, Default)]
pub struct CommandQueue {
    inner: Mutex<VecDeque<Command>>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a command; callable from any thread
    pub fn push(&self, command: Command) {
        self.inner.lock().expect("command queue poisoned").push_back(command);
    }

    /// Dequeue the oldest pending command, if any; never blocks on producers
    pub fn pop(&self) -> Option<Command> {
        self.inner.lock().expect("command queue poisoned").pop_front()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().expect("command queue poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
