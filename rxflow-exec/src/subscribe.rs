// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use async_trait::async_trait;
use rxflow_core::{CancellationToken, Result, RxError, StreamItem};
use rxflow_stream::{ActivationScope, Observable};

/// Extension trait providing the terminal `subscribe` operation.
#[async_trait]
pub trait SubscribeExt<T>: Sized {
    /// Activate the pipeline and deliver every value to `on_next_func`.
    ///
    /// Values are delivered sequentially, in the order the tail node emits
    /// them. The call returns once the pipeline has completed and every node
    /// task has finished, or as soon as `cancellation_token` is cancelled and
    /// the nodes have wound down.
    ///
    /// # Arguments
    ///
    /// * `on_next_func` - Called once per value.
    /// * `cancellation_token` - Token handed to every node. A fresh one is
    ///   created when `None`.
    /// * `on_error_callback` - Called once per error item. When `None`, error
    ///   items are collected and returned once the pipeline has completed.
    ///
    /// # Errors
    ///
    /// - Error items that reached the tail, if no error callback was given
    /// - [`RxError::TaskFailed`] for every node task that panicked
    ///
    /// Several errors are reported together as [`RxError::MultipleErrors`].
    ///
    /// # Examples
    ///
    /// ```
    /// use rxflow_core::RxError;
    /// use rxflow_exec::SubscribeExt;
    /// use rxflow_stream::prelude::*;
    /// use std::sync::{Arc, Mutex};
    ///
    /// # #[tokio::main]
    /// # async fn main() {
    /// let received = Arc::new(Mutex::new(Vec::new()));
    /// let sink = Arc::clone(&received);
    ///
    /// Observable::just([1, 2, 1, 3])
    ///     .distinct()
    ///     .subscribe(
    ///         move |value| sink.lock().unwrap().push(value),
    ///         None,
    ///         None::<fn(RxError)>,
    ///     )
    ///     .await
    ///     .unwrap();
    ///
    /// assert_eq!(*received.lock().unwrap(), vec![1, 2, 3]);
    /// # }
    /// ```
    async fn subscribe<F, OnError>(
        self,
        on_next_func: F,
        cancellation_token: Option<CancellationToken>,
        on_error_callback: Option<OnError>,
    ) -> Result<()>
    where
        F: FnMut(T) + Send + 'static,
        OnError: FnMut(RxError) + Send + 'static;
}

#[async_trait]
impl<T> SubscribeExt<T> for Observable<T>
where
    T: Send + 'static,
{
    async fn subscribe<F, OnError>(
        self,
        mut on_next_func: F,
        cancellation_token: Option<CancellationToken>,
        mut on_error_callback: Option<OnError>,
    ) -> Result<()>
    where
        F: FnMut(T) + Send + 'static,
        OnError: FnMut(RxError) + Send + 'static,
    {
        let cancellation_token = cancellation_token.unwrap_or_default();
        let mut scope = ActivationScope::new(cancellation_token.clone());
        let output = self.activate(&mut scope);
        debug!("subscription activated {} node(s)", scope.len());

        let mut collected_errors = Vec::new();
        let mut delivered = 0_usize;

        loop {
            let item = tokio::select! {
                biased;
                () = cancellation_token.cancelled() => break,
                received = output.recv() => match received {
                    Ok(item) => item,
                    Err(_) => break,
                },
            };

            match item {
                StreamItem::Value(value) => {
                    on_next_func(value);
                    delivered += 1;
                }
                StreamItem::Error(error) => match on_error_callback.as_mut() {
                    Some(on_error_callback) => on_error_callback(error),
                    // Collect error for later aggregation
                    None => collected_errors.push(error),
                },
            }
        }

        drop(output);

        if let Err(error) = scope.join().await {
            collected_errors.push(error);
        }

        debug!(
            "subscription finished: {} value(s) delivered, {} error(s)",
            delivered,
            collected_errors.len()
        );

        if collected_errors.is_empty() {
            Ok(())
        } else {
            Err(RxError::aggregate(collected_errors))
        }
    }
}
