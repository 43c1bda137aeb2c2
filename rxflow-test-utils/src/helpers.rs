// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::stream::StreamExt;
use futures::Stream;
use rxflow_core::{RxError, StreamItem};
use std::time::Duration;
use tokio::time::{sleep, timeout};

pub async fn assert_no_element_emitted<S, T>(stream: &mut S, timeout_ms: u64)
where
    S: Stream<Item = T> + Unpin,
{
    tokio::select! {
        _item = stream.next() => {
            panic!(
                "Unexpected item emitted, expected no output."
            );
        }
        _ = sleep(Duration::from_millis(timeout_ms)) => {
        }
    }
}

/// Wait for the stream to end, failing if it yields another item or stays
/// open for longer than `timeout_ms`.
pub async fn assert_stream_ended<S, T>(stream: &mut S, timeout_ms: u64)
where
    S: Stream<Item = T> + Unpin,
{
    match timeout(Duration::from_millis(timeout_ms), stream.next()).await {
        Ok(None) => {}
        Ok(Some(_)) => panic!("Expected stream to end, but it emitted an item."),
        Err(_) => panic!("Expected stream to end within {timeout_ms}ms."),
    }
}

/// Next value of the stream, or the error it carried instead.
///
/// A stream that ends or stays silent for `timeout_ms` yields an error.
pub async fn unwrap_stream<S, T>(stream: &mut S, timeout_ms: u64) -> Result<T, RxError>
where
    S: Stream<Item = StreamItem<T>> + Unpin,
{
    match timeout(Duration::from_millis(timeout_ms), stream.next()).await {
        Ok(Some(StreamItem::Value(v))) => Ok(v),
        Ok(Some(StreamItem::Error(e))) => Err(e),
        Ok(None) => Err(RxError::stream_error("Stream ended")),
        Err(_) => Err(RxError::stream_error(format!(
            "No item within {timeout_ms}ms"
        ))),
    }
}

/// Drain the stream to its end, keeping every item.
pub async fn collect_items<S, T>(stream: S) -> Vec<StreamItem<T>>
where
    S: Stream<Item = StreamItem<T>>,
{
    stream.collect().await
}

/// Drain the stream to its end, failing on the first error item.
pub async fn collect_values<S, T>(stream: S) -> Result<Vec<T>, RxError>
where
    S: Stream<Item = StreamItem<T>>,
{
    let mut values = Vec::new();
    let mut stream = Box::pin(stream);
    while let Some(item) = stream.next().await {
        match item {
            StreamItem::Value(v) => values.push(v),
            StreamItem::Error(e) => return Err(e),
        }
    }
    Ok(values)
}
