// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::node::NodeConfig;
use crate::observable::Observable;
use crate::operator::{Flow, Operator, OperatorContext};
use async_trait::async_trait;
use core::sync::atomic::{AtomicUsize, Ordering};

/// Extension trait providing the `element_at` operator.
pub trait ElementAtExt<T>: Sized {
    /// Emit only the value with zero-based ordinal `index`, then complete.
    ///
    /// Emits nothing if the source has `index` values or fewer.
    ///
    /// # Example
    ///
    /// ```
    /// use rxflow_stream::prelude::*;
    ///
    /// let third = Observable::just(["a", "b", "c", "d"]).element_at(2);
    /// assert_eq!(third.name(), "element_at");
    /// ```
    fn element_at(self, index: usize) -> Observable<T>;
}

impl<T: Send + 'static> ElementAtExt<T> for Observable<T> {
    fn element_at(self, index: usize) -> Observable<T> {
        self.pipe(
            NodeConfig::new("element_at"),
            ElementAt {
                index,
                ordinal: AtomicUsize::new(0),
            },
        )
    }
}

struct ElementAt {
    index: usize,
    ordinal: AtomicUsize,
}

#[async_trait]
impl<T: Send + 'static> Operator<T, T> for ElementAt {
    async fn on_value(&self, value: T, ctx: &OperatorContext<T>) -> Flow {
        if self.ordinal.fetch_add(1, Ordering::AcqRel) == self.index {
            ctx.emit(value).await;
            return Flow::Complete;
        }
        Flow::Continue
    }
}
