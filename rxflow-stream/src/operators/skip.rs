// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::node::NodeConfig;
use crate::observable::Observable;
use crate::operator::{Flow, Operator, OperatorContext};
use async_trait::async_trait;
use core::sync::atomic::{AtomicUsize, Ordering};

/// Extension trait providing the `skip` operator.
pub trait SkipExt<T>: Sized {
    /// Drop the first `n` values and emit the rest.
    fn skip(self, n: usize) -> Observable<T>;
}

impl<T: Send + 'static> SkipExt<T> for Observable<T> {
    fn skip(self, n: usize) -> Observable<T> {
        self.pipe(
            NodeConfig::new("skip"),
            Skip {
                skipped: n,
                count: AtomicUsize::new(0),
            },
        )
    }
}

struct Skip {
    skipped: usize,
    count: AtomicUsize,
}

#[async_trait]
impl<T: Send + 'static> Operator<T, T> for Skip {
    async fn on_value(&self, value: T, ctx: &OperatorContext<T>) -> Flow {
        let count = self.count.fetch_add(1, Ordering::AcqRel) + 1;
        if count > self.skipped {
            ctx.emit(value).await;
        }
        Flow::Continue
    }
}
