// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::node::NodeConfig;
use crate::observable::Observable;
use crate::operator::{Flow, Operator, OperatorContext};
use async_trait::async_trait;

/// Extension trait providing the `last` operator.
pub trait LastExt<T>: Sized {
    /// Emit only the final value, once the source completes.
    ///
    /// Nothing is emitted for an empty source, nor for a source that never
    /// completes.
    fn last(self) -> Observable<T>;
}

impl<T: Send + 'static> LastExt<T> for Observable<T> {
    fn last(self) -> Observable<T> {
        self.pipe(NodeConfig::new("last"), Last)
    }
}

struct Last;

#[async_trait]
impl<T: Send + 'static> Operator<T, T> for Last {
    async fn on_value(&self, value: T, ctx: &OperatorContext<T>) -> Flow {
        ctx.deferred().hold(value);
        Flow::Continue
    }
}
