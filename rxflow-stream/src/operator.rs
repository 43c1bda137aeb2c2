// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The per-item functor a node executes.
//!
//! An [`Operator`] receives one item at a time together with an
//! [`OperatorContext`] through which it can emit any number of items
//! downstream, stage deferred output, or spawn timers scoped to its node.
//! Returning [`Flow::Complete`] tells the node that no further items are
//! wanted: the node stops dispatching but keeps draining its input so the
//! upstream producer is never stalled.
//!
//! # Example
//!
//! ```
//! use async_trait::async_trait;
//! use rxflow_stream::{Flow, NodeConfig, Observable, Operator, OperatorContext};
//!
//! struct Doubler;
//!
//! #[async_trait]
//! impl Operator<i32, i32> for Doubler {
//!     async fn on_value(&self, value: i32, ctx: &OperatorContext<i32>) -> Flow {
//!         ctx.emit(value * 2).await;
//!         Flow::Continue
//!     }
//! }
//!
//! let doubled = Observable::just([1, 2, 3]).pipe(NodeConfig::new("doubler"), Doubler);
//! assert_eq!(doubled.name(), "doubler");
//! ```

use crate::deferred_buffer::DeferredBuffer;
use crate::node::NodeShared;
use async_trait::async_trait;
use rxflow_core::{CancellationToken, RxError};
use std::sync::Arc;

/// What a node should do after an operator invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep dispatching items.
    Continue,
    /// No further items wanted; the node drains its input and terminates.
    Complete,
}

/// Per-item transform executed by a node.
///
/// Implementations are shared between concurrent workers when the node runs
/// under a concurrent [`ThreadingMode`](rxflow_core::ThreadingMode), so any
/// state must live behind interior mutability.
#[async_trait]
pub trait Operator<In, Out>: Send + Sync + 'static
where
    In: Send + 'static,
    Out: Send + 'static,
{
    /// Handle one value.
    async fn on_value(&self, value: In, ctx: &OperatorContext<Out>) -> Flow;

    /// Handle one error. Only called on nodes configured to accept errors;
    /// the default forwards the error unchanged.
    async fn on_error(&self, error: RxError, ctx: &OperatorContext<Out>) -> Flow {
        ctx.emit_error(error).await;
        Flow::Continue
    }
}

/// Handle an operator uses to reach its node's output and deferred state.
pub struct OperatorContext<T> {
    shared: Arc<NodeShared<T>>,
}

impl<T> Clone for OperatorContext<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T: Send + 'static> OperatorContext<T> {
    pub(crate) fn new(shared: Arc<NodeShared<T>>) -> Self {
        Self { shared }
    }

    /// Send a value downstream. Returns `false` if it could not be delivered.
    pub async fn emit(&self, value: T) -> bool {
        self.shared.emitter.emit(value).await
    }

    /// Send an error downstream. Returns `false` if it could not be delivered.
    pub async fn emit_error(&self, error: RxError) -> bool {
        self.shared.emitter.emit_error(error).await
    }

    /// Output held back until the next timer tick or the end of the stream.
    pub fn deferred(&self) -> &DeferredBuffer<T> {
        &self.shared.deferred
    }

    /// Token cancelled when the node terminates or the subscription is
    /// cancelled. Timers spawned by an operator must stop when it fires.
    pub fn timer_scope(&self) -> &CancellationToken {
        &self.shared.timer_scope
    }

    /// Name of the node running this operator.
    pub fn node_name(&self) -> &str {
        &self.shared.name
    }

    /// `true` once any invocation on this node returned [`Flow::Complete`].
    pub fn is_completed(&self) -> bool {
        self.shared.is_completed()
    }

    pub(crate) fn signal_completion(&self) {
        self.shared.signal_completion();
    }
}
