// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The lazily assembled pipeline handle.
//!
//! An [`Observable`] owns the tail stage of a chain. Operator calls only
//! record configuration and link a new node after the current tail; nothing
//! runs until the chain is activated, either by a subscription or by
//! [`Observable::into_stream`].

use crate::activation::ActivationScope;
use crate::node::{Node, NodeConfig, Stage};
use crate::operator::Operator;
use crate::source::SourceNode;
use async_channel::Receiver;
use core::num::NonZeroUsize;
use futures::stream::{self, BoxStream};
use futures::{Stream, StreamExt};
use rxflow_core::{CancellationToken, RxError, StreamItem, ThreadingMode};
use std::sync::Arc;

/// A not yet activated chain of nodes producing items of type `T`.
pub struct Observable<T> {
    tail: Box<dyn Stage<T>>,
}

impl<T: Send + 'static> Observable<T> {
    /// Emit the given values, then complete.
    ///
    /// ```
    /// use rxflow_stream::Observable;
    ///
    /// let numbers = Observable::just([1, 2, 3]);
    /// assert_eq!(numbers.name(), "just");
    /// ```
    pub fn just(values: impl IntoIterator<Item = T>) -> Self {
        let values: Vec<T> = values.into_iter().collect();
        Self::source("just", stream::iter(values).map(StreamItem::Value).boxed())
    }

    /// Emit the given items, values and errors alike, then complete.
    pub fn from_items(items: impl IntoIterator<Item = StreamItem<T>>) -> Self {
        let items: Vec<StreamItem<T>> = items.into_iter().collect();
        Self::source("from_items", stream::iter(items).boxed())
    }

    /// Emit everything the stream yields; complete when it ends.
    pub fn from_stream<S>(items: S) -> Self
    where
        S: Stream<Item = StreamItem<T>> + Send + 'static,
    {
        Self::source("from_stream", items.boxed())
    }

    /// Emit every value sent on the channel; complete once all senders are
    /// dropped or the channel is closed.
    pub fn from_receiver(receiver: Receiver<T>) -> Self {
        Self::source("from_receiver", receiver.map(StreamItem::Value).boxed())
    }

    /// Complete without emitting anything.
    pub fn empty() -> Self {
        Self::source("empty", stream::empty().boxed())
    }

    /// Emit a single error, then complete.
    pub fn throw(error: RxError) -> Self {
        Self::source("throw", stream::once(async move { StreamItem::Error(error) }).boxed())
    }

    fn source(name: &str, items: BoxStream<'static, StreamItem<T>>) -> Self {
        Self {
            tail: Box::new(SourceNode::new(NodeConfig::new(name), items)),
        }
    }

    /// Link `operator` after the current tail as a new node configured by `config`.
    pub fn pipe<U, O>(self, config: NodeConfig, operator: O) -> Observable<U>
    where
        U: Send + 'static,
        O: Operator<T, U>,
    {
        Observable {
            tail: Box::new(Node::new(config, self.tail, Arc::new(operator))),
        }
    }

    /// Name of the most recently linked node.
    pub fn name(&self) -> &str {
        &self.tail.config().name
    }

    /// Configuration of the most recently linked node.
    pub fn config(&self) -> &NodeConfig {
        self.tail.config()
    }

    /// Rename the most recently linked node.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.tail.config_mut().name = name.into();
        self
    }

    /// Set the threading mode of the most recently linked node.
    ///
    /// Has no effect on a source, which has no operator to dispatch.
    #[must_use]
    pub fn with_threading(mut self, threading: ThreadingMode) -> Self {
        self.tail.config_mut().threading = threading;
        self
    }

    /// Set the output channel capacity of the most recently linked node.
    #[must_use]
    pub fn with_capacity(mut self, capacity: NonZeroUsize) -> Self {
        self.tail.config_mut().capacity = capacity;
        self
    }

    /// Hand error items to the operator of the most recently linked node
    /// instead of forwarding them.
    #[must_use]
    pub fn accepting_errors(mut self) -> Self {
        self.tail.config_mut().accepts_errors = true;
        self
    }

    /// Activate every node from the root to the tail, returning the tail's output.
    ///
    /// Must be called from within a tokio runtime.
    pub fn activate(self, scope: &mut ActivationScope) -> Receiver<StreamItem<T>> {
        self.tail.activate(scope)
    }

    /// Activate the chain and expose the tail's output as a stream.
    ///
    /// Without a token the pipeline can only be stopped by dropping the
    /// stream, which makes every node drain and wind down on its own.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a tokio runtime.
    pub fn into_stream(
        self,
        cancellation_token: Option<CancellationToken>,
    ) -> BoxStream<'static, StreamItem<T>> {
        let mut scope = ActivationScope::new(cancellation_token.unwrap_or_default());
        let output = self.activate(&mut scope);

        tokio::spawn(async move {
            if let Err(error) = scope.join().await {
                error!("pipeline failed: {}", error);
            }
        });

        output.boxed()
    }
}
