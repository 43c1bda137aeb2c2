// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use parking_lot::Mutex;
use std::collections::VecDeque;

/// Output staged by an operator to be emitted later, at a timer tick or at
/// the end of the stream.
///
/// The buffer is ordered: a flush emits items in the order they were staged.
/// The lock is never held across an await; operators mutate it through the
/// synchronous methods below and the node drains it with [`take`](Self::take).
#[derive(Debug)]
pub struct DeferredBuffer<T> {
    held: Mutex<VecDeque<T>>,
}

impl<T> Default for DeferredBuffer<T> {
    fn default() -> Self {
        Self {
            held: Mutex::new(VecDeque::new()),
        }
    }
}

impl<T> DeferredBuffer<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace everything staged so far with a single item.
    pub fn hold(&self, item: T) {
        let mut held = self.held.lock();
        held.clear();
        held.push_back(item);
    }

    /// Append an item after everything staged so far.
    pub fn push(&self, item: T) {
        self.held.lock().push_back(item);
    }

    /// Edit the staged items in place.
    pub fn update<R>(&self, f: impl FnOnce(&mut VecDeque<T>) -> R) -> R {
        f(&mut self.held.lock())
    }

    /// Remove and return everything staged, leaving the buffer empty.
    pub fn take(&self) -> VecDeque<T> {
        core::mem::take(&mut *self.held.lock())
    }

    pub fn is_empty(&self) -> bool {
        self.held.lock().is_empty()
    }

    pub fn len(&self) -> usize {
        self.held.lock().len()
    }
}
