// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::activation::ActivationScope;
use crate::deferred_buffer::DeferredBuffer;
use crate::emitter::Emitter;
use crate::execution_loop;
use crate::operator::Operator;
use async_channel::Receiver;
use core::num::NonZeroUsize;
use core::sync::atomic::{AtomicBool, Ordering};
use core::time::Duration;
use rxflow_core::{CancellationToken, StreamItem, ThreadingMode};
use std::sync::Arc;

/// Capacity of a node's output channel unless overridden.
pub const DEFAULT_CHANNEL_CAPACITY: NonZeroUsize = match NonZeroUsize::new(16) {
    Some(capacity) => capacity,
    None => panic!("channel capacity must be non-zero"),
};

/// Static configuration of a pipeline node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeConfig {
    pub name: String,
    pub threading: ThreadingMode,
    /// When `false`, error items bypass the operator and are forwarded.
    pub accepts_errors: bool,
    /// When set, deferred output is flushed every `period` while the stream runs.
    pub period: Option<Duration>,
    pub capacity: NonZeroUsize,
}

impl NodeConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            threading: ThreadingMode::Default,
            accepts_errors: false,
            period: None,
            capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }

    #[must_use]
    pub fn with_threading(mut self, threading: ThreadingMode) -> Self {
        self.threading = threading;
        self
    }

    #[must_use]
    pub fn accepting_errors(mut self) -> Self {
        self.accepts_errors = true;
        self
    }

    #[must_use]
    pub fn periodic(mut self, period: Duration) -> Self {
        self.period = Some(period);
        self
    }

    #[must_use]
    pub fn with_capacity(mut self, capacity: NonZeroUsize) -> Self {
        self.capacity = capacity;
        self
    }
}

/// A not yet activated link of a pipeline producing items of type `T`.
///
/// Activating a stage first activates everything upstream of it, then spawns
/// the stage's own task and hands back the receiving end of its output.
pub trait Stage<T>: Send + 'static {
    fn config(&self) -> &NodeConfig;

    fn config_mut(&mut self) -> &mut NodeConfig;

    fn activate(self: Box<Self>, scope: &mut ActivationScope) -> Receiver<StreamItem<T>>;
}

/// An operator stage fed by the output of its predecessor.
pub(crate) struct Node<In, Out>
where
    In: Send + 'static,
    Out: Send + 'static,
{
    config: NodeConfig,
    predecessor: Box<dyn Stage<In>>,
    operator: Arc<dyn Operator<In, Out>>,
}

impl<In, Out> Node<In, Out>
where
    In: Send + 'static,
    Out: Send + 'static,
{
    pub(crate) fn new(
        config: NodeConfig,
        predecessor: Box<dyn Stage<In>>,
        operator: Arc<dyn Operator<In, Out>>,
    ) -> Self {
        Self {
            config,
            predecessor,
            operator,
        }
    }
}

impl<In, Out> Stage<Out> for Node<In, Out>
where
    In: Send + 'static,
    Out: Send + 'static,
{
    fn config(&self) -> &NodeConfig {
        &self.config
    }

    fn config_mut(&mut self) -> &mut NodeConfig {
        &mut self.config
    }

    fn activate(self: Box<Self>, scope: &mut ActivationScope) -> Receiver<StreamItem<Out>> {
        let Node {
            config,
            predecessor,
            operator,
        } = *self;

        let input = predecessor.activate(scope);
        let (sender, receiver) = async_channel::bounded(config.capacity.get());

        let cancellation_token = scope.cancellation_token().clone();
        let shared = Arc::new(NodeShared::new(
            config.name.as_str(),
            Emitter::new(sender, cancellation_token.clone()),
            cancellation_token.child_token(),
        ));

        let name = config.name.clone();
        let handle = tokio::spawn(execution_loop::run(
            input,
            operator,
            shared,
            config,
            cancellation_token,
        ));
        scope.register(name, handle);

        receiver
    }
}

/// State of an active node reachable from its loop, its workers and its timers.
pub(crate) struct NodeShared<T> {
    pub(crate) name: Arc<str>,
    pub(crate) emitter: Emitter<T>,
    pub(crate) deferred: DeferredBuffer<T>,
    pub(crate) timer_scope: CancellationToken,
    completed: AtomicBool,
    periodic: AtomicBool,
}

impl<T: Send + 'static> NodeShared<T> {
    pub(crate) fn new(name: &str, emitter: Emitter<T>, timer_scope: CancellationToken) -> Self {
        Self {
            name: Arc::from(name),
            emitter,
            deferred: DeferredBuffer::new(),
            timer_scope,
            completed: AtomicBool::new(false),
            periodic: AtomicBool::new(false),
        }
    }

    /// Once set, the flag is never cleared.
    pub(crate) fn signal_completion(&self) {
        self.completed.store(true, Ordering::Release);
    }

    pub(crate) fn is_completed(&self) -> bool {
        self.completed.load(Ordering::Acquire)
    }

    pub(crate) fn set_periodic(&self, periodic: bool) {
        self.periodic.store(periodic, Ordering::Release);
    }

    pub(crate) fn is_periodic(&self) -> bool {
        self.periodic.load(Ordering::Acquire)
    }

    /// Emit everything staged in the deferred buffer, in order.
    ///
    /// Returns the number of items delivered.
    pub(crate) async fn flush_deferred(&self) -> usize {
        let mut delivered = 0;
        for item in self.deferred.take() {
            if !self.emitter.emit(item).await {
                break;
            }
            delivered += 1;
        }
        delivered
    }
}
