// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::node::NodeConfig;
use crate::observable::Observable;
use crate::operator::{Flow, Operator, OperatorContext};
use async_trait::async_trait;
use parking_lot::Mutex;
use rxflow_core::RxError;

/// Extension trait providing the `on_error` operator.
pub trait OnErrorExt<T>: Sized {
    /// Handle errors with `handler`.
    ///
    /// The handler receives each error and returns:
    /// - `true` to consume the error (remove it from the stream)
    /// - `false` to forward it downstream
    ///
    /// Values pass through unchanged. Several `on_error` nodes can be chained,
    /// each handling the errors the previous one forwarded.
    ///
    /// # Example
    ///
    /// ```
    /// use rxflow_stream::prelude::*;
    /// use rxflow_core::{RxError, StreamItem};
    ///
    /// let handled = Observable::from_items([
    ///     StreamItem::Value(1),
    ///     StreamItem::Error(RxError::stream_error("validation failed")),
    /// ])
    /// .on_error(|error| error.to_string().contains("validation"))
    /// .on_error(|_| true);
    ///
    /// assert!(handled.config().accepts_errors);
    /// ```
    fn on_error<F>(self, handler: F) -> Observable<T>
    where
        F: FnMut(&RxError) -> bool + Send + 'static;
}

impl<T: Send + 'static> OnErrorExt<T> for Observable<T> {
    fn on_error<F>(self, handler: F) -> Observable<T>
    where
        F: FnMut(&RxError) -> bool + Send + 'static,
    {
        self.pipe(
            NodeConfig::new("on_error").accepting_errors(),
            OnError {
                handler: Mutex::new(handler),
            },
        )
    }
}

struct OnError<F> {
    handler: Mutex<F>,
}

#[async_trait]
impl<T, F> Operator<T, T> for OnError<F>
where
    T: Send + 'static,
    F: FnMut(&RxError) -> bool + Send + 'static,
{
    async fn on_value(&self, value: T, ctx: &OperatorContext<T>) -> Flow {
        ctx.emit(value).await;
        Flow::Continue
    }

    async fn on_error(&self, error: RxError, ctx: &OperatorContext<T>) -> Flow {
        let consumed = {
            let mut handler = self.handler.lock();
            (*handler)(&error)
        };
        if !consumed {
            ctx.emit_error(error).await;
        }
        Flow::Continue
    }
}
