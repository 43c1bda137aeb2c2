// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Extension methods turning channel receivers into pipeline sources.

use futures::stream;
use rxflow_core::StreamItem;
use rxflow_stream::Observable;
use tokio::sync::mpsc;

/// Extension trait for channel receivers to create [`Observable`] sources.
pub trait IntoObservable<T> {
    /// Converts the receiver into a source emitting every value received.
    ///
    /// The source completes once every sender has been dropped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rxflow::prelude::*;
    /// use tokio::sync::mpsc;
    ///
    /// # #[tokio::main]
    /// # async fn main() {
    /// let (tx, rx) = mpsc::unbounded_channel();
    /// tx.send(21).unwrap();
    /// drop(tx);
    ///
    /// let mut doubled = Vec::new();
    /// rx.into_observable()
    ///     .map(|x| x * 2)
    ///     .subscribe(move |x| doubled.push(x), None, None::<fn(RxError)>)
    ///     .await
    ///     .unwrap();
    /// # }
    /// ```
    fn into_observable(self) -> Observable<T>;
}

impl<T: Send + 'static> IntoObservable<T> for mpsc::UnboundedReceiver<T> {
    fn into_observable(self) -> Observable<T> {
        Observable::from_stream(stream::unfold(self, |mut rx| async move {
            rx.recv().await.map(|value| (StreamItem::Value(value), rx))
        }))
    }
}

impl<T: Send + 'static> IntoObservable<T> for mpsc::Receiver<T> {
    fn into_observable(self) -> Observable<T> {
        Observable::from_stream(stream::unfold(self, |mut rx| async move {
            rx.recv().await.map(|value| (StreamItem::Value(value), rx))
        }))
    }
}

impl<T: Send + 'static> IntoObservable<T> for async_channel::Receiver<T> {
    fn into_observable(self) -> Observable<T> {
        Observable::from_receiver(self)
    }
}
