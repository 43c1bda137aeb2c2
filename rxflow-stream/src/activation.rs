// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rxflow_core::{CancellationToken, Result, RxError};
use tokio::task::JoinHandle;

/// Everything one activation of a pipeline spawned.
///
/// Holds the subscription's cancellation token, which every node observes,
/// and the task handle of every node so the subscription can wait for the
/// whole pipeline to wind down.
#[derive(Debug)]
pub struct ActivationScope {
    cancellation_token: CancellationToken,
    tasks: Vec<(String, JoinHandle<()>)>,
}

impl ActivationScope {
    pub fn new(cancellation_token: CancellationToken) -> Self {
        Self {
            cancellation_token,
            tasks: Vec::new(),
        }
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancellation_token
    }

    /// Number of node tasks spawned so far.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub(crate) fn register(&mut self, node: String, handle: JoinHandle<()>) {
        debug!("node '{}' spawned", node);
        self.tasks.push((node, handle));
    }

    /// Wait for every node task to finish.
    ///
    /// A node task that panicked or was aborted is reported as
    /// [`RxError::TaskFailed`]; several failures are aggregated.
    pub async fn join(self) -> Result<()> {
        let mut failures = Vec::new();

        for (node, handle) in self.tasks {
            if let Err(join_error) = handle.await {
                error!("node '{}' task failed: {}", node, join_error);
                failures.push(RxError::task_failed(node, join_error.to_string()));
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(RxError::aggregate(failures))
        }
    }
}
