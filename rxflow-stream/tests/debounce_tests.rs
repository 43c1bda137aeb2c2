// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rxflow_core::CancellationToken;
use rxflow_runtime::TokioTimer;
use rxflow_stream::prelude::*;
use rxflow_test_utils::test_data::{person_alice, person_bob};
use rxflow_test_utils::{
    assert_no_element_emitted, assert_stream_ended, collect_values, test_channel, timed_source,
    unwrap_stream,
};
use std::time::Duration;
use tokio::time::advance;

#[tokio::test(start_paused = true)]
async fn test_debounce_emits_values_followed_by_quiet_period() -> anyhow::Result<()> {
    // Arrange
    let source = timed_source([(0, 1), (260, 2), (300, 3), (100, 4), (260, 5), (50, 6)]);
    let output = source
        .debounce(Duration::from_millis(250))
        .into_stream(None);

    // Act
    let values = collect_values(output).await?;

    // Assert
    assert_eq!(values, vec![1, 2, 4]);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_debounce_drops_pending_timers_when_source_completes() -> anyhow::Result<()> {
    // Arrange
    let output = Observable::just([1, 2, 3])
        .debounce(Duration::from_millis(10))
        .into_stream(None);

    // Act
    let values = collect_values(output).await?;

    // Assert
    assert!(values.is_empty());

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_debounce_compares_by_value() -> anyhow::Result<()> {
    // Arrange
    let source = timed_source([(0, 1), (50, 2), (50, 1), (500, 9)]);
    let output = source
        .debounce(Duration::from_millis(150))
        .into_stream(None);

    // Act
    let values = collect_values(output).await?;

    // Assert: the timer of the first `1` fires on behalf of the second one
    assert_eq!(values, vec![1, 1]);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_debounce_with_explicit_timer() -> anyhow::Result<()> {
    // Arrange
    let (tx, source) = test_channel();
    let mut output = source
        .debounce_with_timer(Duration::from_millis(500), TokioTimer)
        .into_stream(None);

    // Act
    tx.send(person_alice()).await?;
    advance(Duration::from_millis(300)).await;
    tx.send(person_bob()).await?;

    // Assert
    assert_no_element_emitted(&mut output, 300).await;
    assert_eq!(unwrap_stream(&mut output, 1000).await?, person_bob());

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_debounce_emits_nothing_after_cancellation() -> anyhow::Result<()> {
    // Arrange
    let cancellation_token = CancellationToken::new();
    let (tx, source) = test_channel();
    let mut output = source
        .debounce(Duration::from_millis(250))
        .into_stream(Some(cancellation_token.clone()));

    // Act
    tx.send(person_alice()).await?;
    cancellation_token.cancel();

    // Assert
    assert_stream_ended(&mut output, 1000).await;

    Ok(())
}
