// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::node::NodeShared;
use core::time::Duration;
use rxflow_core::CancellationToken;
use rxflow_runtime::Timer;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Periodic flusher of a node's deferred buffer.
pub(crate) struct TimerDriver {
    stop: CancellationToken,
    handle: JoinHandle<()>,
}

impl TimerDriver {
    /// Spawn the driver. `stop` must be a child of the subscription token so a
    /// cancelled subscription also ends the driver.
    pub(crate) fn start<T, TM>(
        shared: Arc<NodeShared<T>>,
        period: Duration,
        timer: TM,
        stop: CancellationToken,
    ) -> Self
    where
        T: Send + 'static,
        TM: Timer,
    {
        shared.set_periodic(true);
        let handle = tokio::spawn(run(shared, period, timer, stop.clone()));
        Self { stop, handle }
    }

    /// Stop the driver and wait until any flush it started has completed.
    pub(crate) async fn stop(mut self, node: &str) {
        self.stop.cancel();
        if let Err(join_error) = (&mut self.handle).await {
            error!("node '{}' timer driver failed: {}", node, join_error);
        }
    }
}

// Ends the driver when its loop unwinds without reaching `stop`, releasing the
// node's output sender.
impl Drop for TimerDriver {
    fn drop(&mut self) {
        self.stop.cancel();
    }
}

async fn run<T, TM>(shared: Arc<NodeShared<T>>, period: Duration, timer: TM, stop: CancellationToken)
where
    T: Send + 'static,
    TM: Timer,
{
    loop {
        tokio::select! {
            biased;
            () = stop.cancelled() => break,
            () = timer.sleep_future(period) => {}
        }

        if !shared.is_periodic() {
            break;
        }

        let flushed = shared.flush_deferred().await;
        if flushed > 0 {
            trace!("node '{}' tick flushed {} item(s)", shared.name, flushed);
        }
    }
}
