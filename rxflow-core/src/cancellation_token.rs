// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Cooperative cancellation shared by every node of a subscription.
//!
//! A subscription owns one root token. Each node derives a child token for the
//! timers it spawns, so a node can silence its own timers at shutdown while a
//! cancellation of the root still reaches every node, worker and timer.

use core::future::Future;
use core::pin::Pin;
use core::sync::atomic::{AtomicBool, Ordering};
use core::task::{Context, Poll};
use event_listener::{Event, EventListener};
use parking_lot::Mutex;
use std::sync::{Arc, Weak};

/// Cloneable handle to a shared cancellation state.
///
/// When `cancel()` is called on any clone, all waiters on `cancelled()` are
/// woken, and every child token derived from it is cancelled as well.
///
/// # Example
///
/// ```
/// use rxflow_core::CancellationToken;
///
/// let root = CancellationToken::new();
/// let child = root.child_token();
///
/// root.cancel();
/// assert!(child.is_cancelled());
/// ```
#[derive(Clone, Debug)]
pub struct CancellationToken {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    cancelled: AtomicBool,
    event: Event,
    children: Mutex<Vec<Weak<Inner>>>,
}

impl Inner {
    fn new(cancelled: bool) -> Self {
        Self {
            cancelled: AtomicBool::new(cancelled),
            event: Event::new(),
            children: Mutex::new(Vec::new()),
        }
    }

    fn cancel(&self) {
        if self.cancelled.swap(true, Ordering::AcqRel) {
            return;
        }

        self.event.notify(usize::MAX);

        let children = core::mem::take(&mut *self.children.lock());
        for child in children.iter().filter_map(Weak::upgrade) {
            child.cancel();
        }
    }
}

impl CancellationToken {
    /// Create a new, not yet cancelled, token.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner::new(false)),
        }
    }

    /// Derive a token that is cancelled together with `self`.
    ///
    /// Cancelling the child does not affect the parent. A child derived from an
    /// already cancelled token starts out cancelled.
    #[must_use]
    pub fn child_token(&self) -> Self {
        let mut children = self.inner.children.lock();

        // Checked under the lock so a concurrent cancel() either sees the child
        // in the list or we see its flag here.
        if self.is_cancelled() {
            return Self {
                inner: Arc::new(Inner::new(true)),
            };
        }

        children.retain(|child| child.strong_count() > 0);
        let inner = Arc::new(Inner::new(false));
        children.push(Arc::downgrade(&inner));

        Self { inner }
    }

    /// Cancel the token, waking all listeners and cancelling all children.
    ///
    /// Idempotent.
    pub fn cancel(&self) {
        self.inner.cancel();
    }

    /// Check if the token has been cancelled (non-blocking).
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::Acquire)
    }

    /// Wait until the token is cancelled. Resolves immediately if it already is.
    pub fn cancelled(&self) -> Cancelled<'_> {
        Cancelled {
            token: self,
            listener: None,
        }
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

/// Future returned by [`CancellationToken::cancelled()`].
pub struct Cancelled<'a> {
    token: &'a CancellationToken,
    listener: Option<EventListener>,
}

impl Future for Cancelled<'_> {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        loop {
            if self.token.is_cancelled() {
                return Poll::Ready(());
            }

            match self.listener.as_mut() {
                None => {
                    // Re-check the flag after registering, cancel() may have run in between
                    self.listener = Some(self.token.inner.event.listen());
                }
                Some(listener) => {
                    if Pin::new(listener).poll(cx).is_pending() {
                        return Poll::Pending;
                    }
                    self.listener = None;
                }
            }
        }
    }
}
