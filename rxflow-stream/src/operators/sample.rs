// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::node::NodeConfig;
use crate::observable::Observable;
use crate::operator::{Flow, Operator, OperatorContext};
use async_trait::async_trait;
use core::time::Duration;

/// Extension trait providing the `sample` operator.
pub trait SampleExt<T>: Sized {
    /// Emit the most recent value once per `period`.
    ///
    /// A period in which no new value arrived emits nothing. When the source
    /// completes, a value received since the last tick is still emitted.
    ///
    /// # Example
    ///
    /// ```
    /// use rxflow_stream::prelude::*;
    /// use std::time::Duration;
    ///
    /// let sampled = Observable::just([1, 2, 3]).sample(Duration::from_millis(25));
    /// assert_eq!(sampled.config().period, Some(Duration::from_millis(25)));
    /// ```
    fn sample(self, period: Duration) -> Observable<T>;
}

impl<T: Send + 'static> SampleExt<T> for Observable<T> {
    fn sample(self, period: Duration) -> Observable<T> {
        self.pipe(NodeConfig::new("sample").periodic(period), Sample)
    }
}

struct Sample;

#[async_trait]
impl<T: Send + 'static> Operator<T, T> for Sample {
    async fn on_value(&self, value: T, ctx: &OperatorContext<T>) -> Flow {
        ctx.deferred().hold(value);
        Flow::Continue
    }
}
