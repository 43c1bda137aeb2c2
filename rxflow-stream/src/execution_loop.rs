// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The task driving one active node.
//!
//! The loop drains the predecessor's output until it closes, dispatching each
//! item to the operator under the node's [`ThreadingMode`]. Once the input is
//! exhausted it stops the timer driver, joins every worker, flushes the
//! deferred buffer and closes the node's output, in that order. After the
//! operator signals completion, items are still received but discarded so
//! that the upstream producer never blocks on a full channel.

use crate::node::{NodeConfig, NodeShared};
use crate::operator::{Flow, Operator, OperatorContext};
use crate::timer_driver::TimerDriver;
use async_channel::Receiver;
use core::num::NonZeroUsize;
use rxflow_core::{CancellationToken, StreamItem, ThreadingMode};
use rxflow_runtime::DefaultTimer;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};

pub(crate) async fn run<In, Out>(
    input: Receiver<StreamItem<In>>,
    operator: Arc<dyn Operator<In, Out>>,
    shared: Arc<NodeShared<Out>>,
    config: NodeConfig,
    cancellation_token: CancellationToken,
) where
    In: Send + 'static,
    Out: Send + 'static,
{
    let name = Arc::clone(&shared.name);
    debug!("node '{}' running ({:?})", name, config.threading);

    let driver = config.period.map(|period| {
        TimerDriver::start(
            Arc::clone(&shared),
            period,
            DefaultTimer::default(),
            cancellation_token.child_token(),
        )
    });

    let ctx = OperatorContext::new(Arc::clone(&shared));
    let mut workers = Workers::new(config.threading);

    let cancelled = loop {
        let item = tokio::select! {
            biased;
            () = cancellation_token.cancelled() => break true,
            received = input.recv() => match received {
                Ok(item) => item,
                Err(_) => break false,
            },
        };

        workers.reap(&name);

        if shared.is_completed() {
            trace!("node '{}' discarding item after completion", name);
            continue;
        }

        if shared.emitter.is_closed() {
            debug!("node '{}' output dropped, draining input", name);
            shared.signal_completion();
            continue;
        }

        let item = match item {
            StreamItem::Error(error) if !config.accepts_errors => {
                shared.emitter.emit_error(error).await;
                continue;
            }
            item => item,
        };

        if config.threading.is_concurrent() {
            let spawned = workers
                .spawn(Arc::clone(&operator), item, ctx.clone(), &cancellation_token)
                .await;
            if !spawned {
                break true;
            }
        } else if dispatch(operator.as_ref(), item, &ctx).await == Flow::Complete {
            shared.signal_completion();
        }
    };

    shared.set_periodic(false);
    if let Some(driver) = driver {
        driver.stop(&name).await;
    }

    if cancelled {
        workers.abort_all().await;
        shared.timer_scope.cancel();
        shared.emitter.close();
        debug!("node '{}' cancelled", name);
        return;
    }

    workers.join_all(&name).await;
    let flushed = shared.flush_deferred().await;
    shared.timer_scope.cancel();
    shared.emitter.close();

    debug!("node '{}' terminated, {} deferred item(s) flushed", name, flushed);
}

async fn dispatch<In, Out>(
    operator: &dyn Operator<In, Out>,
    item: StreamItem<In>,
    ctx: &OperatorContext<Out>,
) -> Flow
where
    In: Send + 'static,
    Out: Send + 'static,
{
    match item {
        StreamItem::Value(value) => operator.on_value(value, ctx).await,
        StreamItem::Error(error) => operator.on_error(error, ctx).await,
    }
}

/// Workers spawned by a node running under a concurrent threading mode.
struct Workers {
    join_set: JoinSet<()>,
    permits: Option<Arc<Semaphore>>,
}

impl Workers {
    fn new(threading: ThreadingMode) -> Self {
        let permits = (threading == ThreadingMode::ComputeConcurrent)
            .then(|| Arc::new(Semaphore::new(compute_parallelism())));

        Self {
            join_set: JoinSet::new(),
            permits,
        }
    }

    /// Spawn a worker for `item`. Returns `false` if the subscription was
    /// cancelled while waiting for a compute permit; nothing is spawned then.
    async fn spawn<In, Out>(
        &mut self,
        operator: Arc<dyn Operator<In, Out>>,
        item: StreamItem<In>,
        ctx: OperatorContext<Out>,
        cancellation_token: &CancellationToken,
    ) -> bool
    where
        In: Send + 'static,
        Out: Send + 'static,
    {
        // The semaphore is never closed, so acquiring only fails if it were.
        let permit = match &self.permits {
            Some(permits) => tokio::select! {
                biased;
                () = cancellation_token.cancelled() => return false,
                acquired = Arc::clone(permits).acquire_owned() => acquired.ok(),
            },
            None => None,
        };

        self.join_set.spawn(async move {
            let _permit = permit;
            if dispatch(operator.as_ref(), item, &ctx).await == Flow::Complete {
                ctx.signal_completion();
            }
        });
        true
    }

    fn reap(&mut self, node: &str) {
        while let Some(result) = self.join_set.try_join_next() {
            log_worker_result(node, result);
        }
    }

    async fn join_all(&mut self, node: &str) {
        while let Some(result) = self.join_set.join_next().await {
            log_worker_result(node, result);
        }
    }

    async fn abort_all(&mut self) {
        self.join_set.shutdown().await;
    }
}

fn log_worker_result(node: &str, result: Result<(), JoinError>) {
    if let Err(join_error) = result {
        if join_error.is_panic() {
            error!("node '{}' worker panicked: {}", node, join_error);
        }
    }
}

fn compute_parallelism() -> usize {
    std::thread::available_parallelism().map_or(1, NonZeroUsize::get)
}
