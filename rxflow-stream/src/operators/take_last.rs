// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::node::NodeConfig;
use crate::observable::Observable;
use crate::operator::{Flow, Operator, OperatorContext};
use async_trait::async_trait;

/// Extension trait providing the `take_last` operator.
pub trait TakeLastExt<T>: Sized {
    /// Emit only the final `n` values, in order, once the source completes.
    fn take_last(self, n: usize) -> Observable<T>;
}

impl<T: Send + 'static> TakeLastExt<T> for Observable<T> {
    fn take_last(self, n: usize) -> Observable<T> {
        self.pipe(NodeConfig::new("take_last"), TakeLast { size: n })
    }
}

struct TakeLast {
    size: usize,
}

#[async_trait]
impl<T: Send + 'static> Operator<T, T> for TakeLast {
    async fn on_value(&self, value: T, ctx: &OperatorContext<T>) -> Flow {
        ctx.deferred().update(|held| {
            held.push_back(value);
            while held.len() > self.size {
                held.pop_front();
            }
        });
        Flow::Continue
    }
}
