// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::node::NodeConfig;
use crate::observable::Observable;
use crate::operator::{Flow, Operator, OperatorContext};
use async_trait::async_trait;
use core::future::Future;

/// Extension trait providing the `map` and `map_async` operators.
pub trait MapExt<T>: Sized {
    /// Transform every value with `f`.
    ///
    /// ```
    /// use rxflow_stream::prelude::*;
    ///
    /// let lengths = Observable::just(["a", "bb"]).map(str::len);
    /// assert_eq!(lengths.name(), "map");
    /// ```
    fn map<U, F>(self, f: F) -> Observable<U>
    where
        U: Send + 'static,
        F: Fn(T) -> U + Send + Sync + 'static;

    /// Transform every value with an asynchronous `f`.
    ///
    /// Under [`ThreadingMode::IoConcurrent`](rxflow_core::ThreadingMode::IoConcurrent)
    /// the calls for successive values overlap.
    fn map_async<U, F, Fut>(self, f: F) -> Observable<U>
    where
        U: Send + 'static,
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = U> + Send + 'static;
}

impl<T: Send + 'static> MapExt<T> for Observable<T> {
    fn map<U, F>(self, f: F) -> Observable<U>
    where
        U: Send + 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        self.pipe(NodeConfig::new("map"), Map { f })
    }

    fn map_async<U, F, Fut>(self, f: F) -> Observable<U>
    where
        U: Send + 'static,
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = U> + Send + 'static,
    {
        self.pipe(NodeConfig::new("map_async"), MapAsync { f })
    }
}

struct Map<F> {
    f: F,
}

#[async_trait]
impl<T, U, F> Operator<T, U> for Map<F>
where
    T: Send + 'static,
    U: Send + 'static,
    F: Fn(T) -> U + Send + Sync + 'static,
{
    async fn on_value(&self, value: T, ctx: &OperatorContext<U>) -> Flow {
        ctx.emit((self.f)(value)).await;
        Flow::Continue
    }
}

struct MapAsync<F> {
    f: F,
}

#[async_trait]
impl<T, U, F, Fut> Operator<T, U> for MapAsync<F>
where
    T: Send + 'static,
    U: Send + 'static,
    F: Fn(T) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = U> + Send + 'static,
{
    async fn on_value(&self, value: T, ctx: &OperatorContext<U>) -> Flow {
        let mapped = (self.f)(value).await;
        ctx.emit(mapped).await;
        Flow::Continue
    }
}
