// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::node::NodeConfig;
use crate::observable::Observable;
use crate::operator::{Flow, Operator, OperatorContext};
use async_trait::async_trait;
use core::sync::atomic::{AtomicUsize, Ordering};

/// Extension trait providing the `take` operator.
pub trait TakeExt<T>: Sized {
    /// Emit only the first `n` values, then complete.
    ///
    /// The node completes on the first value past the limit, so it keeps
    /// draining its input without emitting anything further. Errors are not
    /// counted and pass through unchanged.
    fn take(self, n: usize) -> Observable<T>;
}

impl<T: Send + 'static> TakeExt<T> for Observable<T> {
    fn take(self, n: usize) -> Observable<T> {
        self.pipe(
            NodeConfig::new("take"),
            Take {
                limit: n,
                count: AtomicUsize::new(0),
            },
        )
    }
}

struct Take {
    limit: usize,
    count: AtomicUsize,
}

#[async_trait]
impl<T: Send + 'static> Operator<T, T> for Take {
    async fn on_value(&self, value: T, ctx: &OperatorContext<T>) -> Flow {
        let count = self.count.fetch_add(1, Ordering::AcqRel) + 1;
        if count > self.limit {
            return Flow::Complete;
        }

        ctx.emit(value).await;
        Flow::Continue
    }
}
