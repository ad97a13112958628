//! Fixed-capacity conversational memory.
//!
//! [`ConversationWindow`] keeps the most recent `capacity` turns. [`push`] is
//! the only way in, and it evicts the oldest turn first when full, so
//! `len() <= capacity()` holds after every call.
//!
//! [`push`]: ConversationWindow::push

use std::collections::VecDeque;
use std::num::NonZeroUsize;

use super::types::ConversationTurn;

#[derive(Debug, Clone)]
pub struct ConversationWindow {
    turns: VecDeque<ConversationTurn>,
    capacity: NonZeroUsize,
}

impl ConversationWindow {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            turns: VecDeque::with_capacity(capacity.get()),
            capacity,
        }
    }

    /// Admit a turn, returning the evicted oldest turn if the window was full.
    pub fn push(&mut self, turn: ConversationTurn) -> Option<ConversationTurn> {
        let evicted = if self.turns.len() == self.capacity.get() {
            self.turns.pop_front()
        } else {
            None
        };
        self.turns.push_back(turn);
        evicted
    }

    /// Turns in chronological order, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &ConversationTurn> {
        self.turns.iter()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }
}
