// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use async_trait::async_trait;
use rxflow_core::{RxError, StreamItem};
use rxflow_stream::prelude::*;
use rxflow_test_utils::{collect_items, collect_values};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn mixed_items() -> Vec<StreamItem<i32>> {
    vec![
        StreamItem::Value(1),
        StreamItem::Error(RxError::stream_error("validation failed")),
        StreamItem::Value(2),
        StreamItem::Error(RxError::stream_error("network down")),
        StreamItem::Value(3),
    ]
}

#[tokio::test]
async fn test_on_error_consumes_handled_errors() -> anyhow::Result<()> {
    // Arrange
    let output = Observable::from_items(mixed_items())
        .on_error(|_| true)
        .into_stream(None);

    // Act
    let values = collect_values(output).await?;

    // Assert
    assert_eq!(values, vec![1, 2, 3]);

    Ok(())
}

#[tokio::test]
async fn test_on_error_forwards_unhandled_errors() -> anyhow::Result<()> {
    // Arrange
    let seen = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&seen);
    let output = Observable::from_items(mixed_items())
        .on_error(move |error| {
            counter.fetch_add(1, Ordering::SeqCst);
            error.to_string().contains("validation")
        })
        .into_stream(None);

    // Act
    let items = collect_items(output).await;

    // Assert
    assert_eq!(seen.load(Ordering::SeqCst), 2);
    assert_eq!(items.len(), 4);
    assert!(matches!(
        &items[2],
        StreamItem::Error(RxError::StreamProcessingError { context }) if context == "network down"
    ));

    Ok(())
}

#[tokio::test]
async fn test_on_error_chain_of_responsibility() -> anyhow::Result<()> {
    // Arrange
    let network_errors = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&network_errors);
    let output = Observable::from_items(mixed_items())
        .on_error(|error| error.to_string().contains("validation"))
        .on_error(move |error| {
            let is_network = error.to_string().contains("network");
            if is_network {
                counter.fetch_add(1, Ordering::SeqCst);
            }
            is_network
        })
        .into_stream(None);

    // Act
    let values = collect_values(output).await?;

    // Assert
    assert_eq!(values, vec![1, 2, 3]);
    assert_eq!(network_errors.load(Ordering::SeqCst), 1);

    Ok(())
}

#[tokio::test]
async fn test_errors_bypass_nodes_not_accepting_them() -> anyhow::Result<()> {
    // Arrange
    let output = Observable::from_items(mixed_items())
        .map(|x| x * 2)
        .filter(|x| *x > 2)
        .into_stream(None);

    // Act
    let items = collect_items(output).await;

    // Assert
    let errors = items.iter().filter(|item| item.is_error()).count();
    let values: Vec<i32> = items.into_iter().filter_map(StreamItem::ok).collect();
    assert_eq!(errors, 2);
    assert_eq!(values, vec![4, 6]);

    Ok(())
}

struct ErrorsToValues;

#[async_trait]
impl Operator<i32, i32> for ErrorsToValues {
    async fn on_value(&self, value: i32, ctx: &OperatorContext<i32>) -> Flow {
        ctx.emit(value).await;
        Flow::Continue
    }

    async fn on_error(&self, _error: RxError, ctx: &OperatorContext<i32>) -> Flow {
        ctx.emit(-1).await;
        Flow::Continue
    }
}

#[tokio::test]
async fn test_error_accepting_node_receives_errors() -> anyhow::Result<()> {
    // Arrange
    let output = Observable::from_items(mixed_items())
        .pipe(NodeConfig::new("errors_to_values"), ErrorsToValues)
        .accepting_errors()
        .into_stream(None);

    // Act
    let values = collect_values(output).await?;

    // Assert
    assert_eq!(values, vec![1, -1, 2, -1, 3]);

    Ok(())
}

#[tokio::test]
async fn test_error_bypasses_node_not_accepting_errors() -> anyhow::Result<()> {
    // Arrange
    let output = Observable::throw(RxError::stream_error("fatal"))
        .pipe(NodeConfig::new("errors_to_values"), ErrorsToValues)
        .into_stream(None);

    // Act
    let items = collect_items(output).await;

    // Assert
    assert_eq!(items.len(), 1);
    assert!(items[0].is_error());

    Ok(())
}
