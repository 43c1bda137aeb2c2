// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use async_trait::async_trait;
use rxflow_core::{CancellationToken, RxError, StreamItem};
use rxflow_exec::SubscribeExt;
use rxflow_stream::prelude::*;
use rxflow_test_utils::test_channel;
use rxflow_test_utils::test_data::{
    animal_dog, person_alice, person_bob, person_charlie, TestData,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc::unbounded_channel;
use tokio::time::timeout;
use tokio::spawn;

#[derive(Debug, thiserror::Error)]
#[error("Test error: {0}")]
struct TestError(String);

impl TestError {
    fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

fn no_error_callback() -> Option<fn(RxError)> {
    None
}

#[tokio::test]
async fn test_subscribe_delivers_values_in_order() -> anyhow::Result<()> {
    // Arrange
    let results = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&results);

    // Act
    Observable::just([person_alice(), person_bob(), person_charlie()])
        .subscribe(
            move |item| sink.lock().unwrap().push(item),
            None,
            no_error_callback(),
        )
        .await?;

    // Assert
    assert_eq!(
        *results.lock().unwrap(),
        vec![person_alice(), person_bob(), person_charlie()]
    );

    Ok(())
}

#[tokio::test]
async fn test_subscribe_to_empty_source_completes() -> anyhow::Result<()> {
    // Arrange
    let calls = Arc::new(Mutex::new(0));
    let counter = Arc::clone(&calls);

    // Act
    Observable::<TestData>::empty()
        .subscribe(move |_| *counter.lock().unwrap() += 1, None, no_error_callback())
        .await?;

    // Assert
    assert_eq!(*calls.lock().unwrap(), 0);

    Ok(())
}

#[tokio::test]
async fn test_subscribe_collects_errors_without_callback() -> anyhow::Result<()> {
    // Arrange
    let results = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&results);
    let source = Observable::from_items([
        StreamItem::Value(person_alice()),
        StreamItem::Error(RxError::user_error(TestError::new("first"))),
        StreamItem::Value(person_bob()),
        StreamItem::Error(RxError::stream_error("second")),
    ]);

    // Act
    let result = source
        .subscribe(move |item| sink.lock().unwrap().push(item), None, no_error_callback())
        .await;

    // Assert
    assert_eq!(*results.lock().unwrap(), vec![person_alice(), person_bob()]);
    match result {
        Err(RxError::MultipleErrors { count, errors }) => {
            assert_eq!(count, 2);
            assert!(errors[0].to_string().contains("Test error: first"));
            assert!(errors[1].to_string().contains("second"));
        }
        other => panic!("Expected MultipleErrors, got {other:?}"),
    }

    Ok(())
}

#[tokio::test]
async fn test_subscribe_returns_single_error_unwrapped() -> anyhow::Result<()> {
    // Act
    let result = Observable::<i32>::throw(RxError::stream_error("fatal"))
        .subscribe(|_| {}, None, no_error_callback())
        .await;

    // Assert
    assert!(matches!(
        result,
        Err(RxError::StreamProcessingError { ref context }) if context == "fatal"
    ));

    Ok(())
}

#[tokio::test]
async fn test_subscribe_routes_errors_to_callback() -> anyhow::Result<()> {
    // Arrange
    let errors = Arc::new(Mutex::new(Vec::new()));
    let error_sink = Arc::clone(&errors);
    let source = Observable::from_items([
        StreamItem::Value(person_alice()),
        StreamItem::Error(RxError::user_error(TestError::new("no animals"))),
        StreamItem::Value(animal_dog()),
    ]);

    // Act
    source
        .subscribe(
            |_| {},
            None,
            Some(move |error: RxError| error_sink.lock().unwrap().push(error.to_string())),
        )
        .await?;

    // Assert
    assert_eq!(
        *errors.lock().unwrap(),
        vec!["User error: Test error: no animals".to_string()]
    );

    Ok(())
}

#[tokio::test]
async fn test_subscribe_returns_on_cancellation() -> anyhow::Result<()> {
    // Arrange
    let cancellation_token = CancellationToken::new();
    let (tx, source) = test_channel();
    let (notify_tx, mut notify_rx) = unbounded_channel();

    let handle = spawn({
        let cancellation_token = cancellation_token.clone();
        async move {
            source
                .map(|item: TestData| item)
                .subscribe(
                    move |item| {
                        let _ = notify_tx.send(item);
                    },
                    Some(cancellation_token),
                    no_error_callback(),
                )
                .await
        }
    });

    tx.send(person_alice()).await?;
    assert_eq!(notify_rx.recv().await, Some(person_alice()));

    // Act
    cancellation_token.cancel();

    // Assert
    timeout(Duration::from_secs(1), handle).await???;
    assert!(notify_rx.recv().await.is_none());

    Ok(())
}

struct Explode;

#[async_trait]
impl Operator<i32, i32> for Explode {
    async fn on_value(&self, value: i32, ctx: &OperatorContext<i32>) -> Flow {
        assert!(value < 2, "value out of range");
        ctx.emit(value).await;
        Flow::Continue
    }
}

#[tokio::test]
async fn test_subscribe_reports_task_failure() -> anyhow::Result<()> {
    // Arrange
    let results = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&results);

    // Act
    let result = Observable::just([0, 1, 2, 3])
        .pipe(NodeConfig::new("range_check"), Explode)
        .subscribe(move |value| sink.lock().unwrap().push(value), None, no_error_callback())
        .await;

    // Assert
    assert_eq!(*results.lock().unwrap(), vec![0, 1]);
    assert!(matches!(
        result,
        Err(RxError::TaskFailed { ref node, .. }) if node == "range_check"
    ));

    Ok(())
}

#[tokio::test]
async fn test_subscribe_reports_task_failure_even_with_error_callback() -> anyhow::Result<()> {
    // Act
    let result = Observable::just([5])
        .pipe(NodeConfig::new("range_check"), Explode)
        .subscribe(|_| {}, None, Some(|_: RxError| {}))
        .await;

    // Assert
    assert!(matches!(result, Err(RxError::TaskFailed { .. })));

    Ok(())
}
