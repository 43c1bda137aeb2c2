// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::node::NodeConfig;
use crate::observable::Observable;
use crate::operator::{Flow, Operator, OperatorContext};
use async_trait::async_trait;
use core::time::Duration;
use parking_lot::Mutex;
use rxflow_runtime::{DefaultTimer, Timer};
use std::sync::Arc;

/// Extension trait providing the `debounce` operator.
pub trait DebounceExt<T>: Sized {
    /// Emit a value only if no different value followed it within `duration`.
    ///
    /// Every value starts its own timer. When a timer fires, its value is
    /// emitted if it still equals the latest value seen. The comparison is by
    /// value, so after `[a, b, a]` the timer started for the first `a` fires
    /// on behalf of the last one.
    ///
    /// Timers still pending when the source completes are dropped: the trailing
    /// value of a burst that ends with the source is not emitted.
    ///
    /// # Example
    ///
    /// ```
    /// use rxflow_stream::prelude::*;
    /// use std::time::Duration;
    ///
    /// let settled = Observable::just(["r", "rx", "rxf"]).debounce(Duration::from_millis(250));
    /// assert_eq!(settled.name(), "debounce");
    /// ```
    fn debounce(self, duration: Duration) -> Observable<T>;

    /// Like [`debounce`](Self::debounce), with an explicit timer.
    fn debounce_with_timer<TM: Timer>(self, duration: Duration, timer: TM) -> Observable<T>;
}

impl<T> DebounceExt<T> for Observable<T>
where
    T: PartialEq + Clone + Send + 'static,
{
    fn debounce(self, duration: Duration) -> Observable<T> {
        self.debounce_with_timer(duration, DefaultTimer::default())
    }

    fn debounce_with_timer<TM: Timer>(self, duration: Duration, timer: TM) -> Observable<T> {
        self.pipe(
            NodeConfig::new("debounce"),
            Debounce {
                duration,
                timer,
                latest: Arc::new(Mutex::new(None)),
            },
        )
    }
}

struct Debounce<T, TM> {
    duration: Duration,
    timer: TM,
    latest: Arc<Mutex<Option<T>>>,
}

#[async_trait]
impl<T, TM> Operator<T, T> for Debounce<T, TM>
where
    T: PartialEq + Clone + Send + 'static,
    TM: Timer,
{
    async fn on_value(&self, value: T, ctx: &OperatorContext<T>) -> Flow {
        *self.latest.lock() = Some(value.clone());

        let latest = Arc::clone(&self.latest);
        let timer = self.timer.clone();
        let duration = self.duration;
        let ctx = ctx.clone();

        tokio::spawn(async move {
            let scope = ctx.timer_scope().clone();
            tokio::select! {
                biased;
                () = scope.cancelled() => return,
                () = timer.sleep_future(duration) => {}
            }

            let settled = latest.lock().as_ref() == Some(&value);
            if settled {
                ctx.emit(value).await;
            }
        });

        Flow::Continue
    }
}
