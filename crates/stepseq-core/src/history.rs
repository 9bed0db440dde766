//! Undo/redo log
//!
//! Each mutation of a sequence pushes the command that reverses it. Replaying
//! a command produces its own inverse, which lands on the opposite stack, so
//! undo and redo are the same operation pointed in different directions.

use serde::{Deserialize, Serialize};

/// A replayable edit, stored with the literal arguments it needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum Command<T> {
    /// Swap in a whole array and offset
    Restore { values: Vec<T>, offset: usize },
    /// Rotate by `amount`, moving the offset with it
    Shift { amount: i64 },
    /// Reverse step order
    Reverse,
    /// Write one 1-indexed step
    SetStep { step: usize, value: T },
}

impl<T> Command<T> {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Restore { .. } => "restore",
            Self::Shift { .. } => "shift",
            Self::Reverse => "reverse",
            Self::SetStep { .. } => "set-step",
        }
    }
}

/// Which side of the log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stack {
    Undo,
    Redo,
}

impl Stack {
    pub fn opposite(self) -> Self {
        match self {
            Self::Undo => Self::Redo,
            Self::Redo => Self::Undo,
        }
    }
}

/// Two stacks of inverse commands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct History<T> {
    undo: Vec<Command<T>>,
    redo: Vec<Command<T>>,
}

impl<T> Default for History<T> {
    fn default() -> Self {
        Self {
            undo: Vec::new(),
            redo: Vec::new(),
        }
    }
}

impl<T> History<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the inverse of a fresh edit. Invalidates anything redoable.
    pub fn register(&mut self, inverse: Command<T>) {
        self.undo.push(inverse);
        self.redo.clear();
    }

    pub fn push(&mut self, stack: Stack, command: Command<T>) {
        self.stack_mut(stack).push(command);
    }

    pub fn pop(&mut self, stack: Stack) -> Option<Command<T>> {
        self.stack_mut(stack).pop()
    }

    pub fn peek(&self, stack: Stack) -> Option<&Command<T>> {
        self.stack(stack).last()
    }

    pub fn size(&self, stack: Stack) -> usize {
        self.stack(stack).len()
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }

    fn stack(&self, stack: Stack) -> &Vec<Command<T>> {
        match stack {
            Stack::Undo => &self.undo,
            Stack::Redo => &self.redo,
        }
    }

    fn stack_mut(&mut self, stack: Stack) -> &mut Vec<Command<T>> {
        match stack {
            Stack::Undo => &mut self.undo,
            Stack::Redo => &mut self.redo,
        }
    }
}
