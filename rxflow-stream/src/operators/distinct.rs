// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::node::NodeConfig;
use crate::observable::Observable;
use crate::operator::{Flow, Operator, OperatorContext};
use async_trait::async_trait;
use parking_lot::Mutex;

/// Extension trait providing the `distinct` operator.
pub trait DistinctExt<T>: Sized {
    /// Emit each value only the first time it is seen.
    ///
    /// Every emitted value is retained for the lifetime of the node and
    /// compared by equality, so lookups are linear in the number of distinct
    /// values seen. Only `PartialEq` is required of `T`.
    ///
    /// # Example
    ///
    /// ```
    /// use rxflow_stream::prelude::*;
    ///
    /// let unique = Observable::just([1, 2, 1, 1, 2, 3, 4, 4]).distinct();
    /// assert_eq!(unique.name(), "distinct");
    /// ```
    fn distinct(self) -> Observable<T>;
}

impl<T> DistinctExt<T> for Observable<T>
where
    T: PartialEq + Clone + Send + 'static,
{
    fn distinct(self) -> Observable<T> {
        self.pipe(
            NodeConfig::new("distinct"),
            Distinct {
                seen: Mutex::new(Vec::new()),
            },
        )
    }
}

struct Distinct<T> {
    seen: Mutex<Vec<T>>,
}

#[async_trait]
impl<T> Operator<T, T> for Distinct<T>
where
    T: PartialEq + Clone + Send + 'static,
{
    async fn on_value(&self, value: T, ctx: &OperatorContext<T>) -> Flow {
        let unseen = {
            let mut seen = self.seen.lock();
            if seen.contains(&value) {
                false
            } else {
                seen.push(value.clone());
                true
            }
        };

        if unseen {
            ctx.emit(value).await;
        }
        Flow::Continue
    }
}
