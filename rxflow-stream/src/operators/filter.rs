// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::node::NodeConfig;
use crate::observable::Observable;
use crate::operator::{Flow, Operator, OperatorContext};
use async_trait::async_trait;

/// Extension trait providing the `filter` operator.
pub trait FilterExt<T>: Sized {
    /// Emit only the values for which `predicate` returns `true`.
    fn filter<F>(self, predicate: F) -> Observable<T>
    where
        F: Fn(&T) -> bool + Send + Sync + 'static;
}

impl<T: Send + 'static> FilterExt<T> for Observable<T> {
    fn filter<F>(self, predicate: F) -> Observable<T>
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.pipe(NodeConfig::new("filter"), Filter { predicate })
    }
}

struct Filter<F> {
    predicate: F,
}

#[async_trait]
impl<T, F> Operator<T, T> for Filter<F>
where
    T: Send + 'static,
    F: Fn(&T) -> bool + Send + Sync + 'static,
{
    async fn on_value(&self, value: T, ctx: &OperatorContext<T>) -> Flow {
        if (self.predicate)(&value) {
            ctx.emit(value).await;
        }
        Flow::Continue
    }
}
