// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rxflow_core::{RxError, StreamItem};
use rxflow_stream::prelude::*;
use rxflow_test_utils::{
    assert_no_element_emitted, assert_stream_ended, collect_items, collect_values, test_channel,
    unwrap_stream,
};

const NUMBERS: [i32; 6] = [18, 12, 21, 33, 15, 66];

#[tokio::test]
async fn test_take_emits_first_n() -> anyhow::Result<()> {
    // Arrange
    let output = Observable::just(NUMBERS).take(2).into_stream(None);

    // Act
    let values = collect_values(output).await?;

    // Assert
    assert_eq!(values, vec![18, 12]);

    Ok(())
}

#[tokio::test]
async fn test_take_more_than_available_emits_all() -> anyhow::Result<()> {
    // Arrange
    let output = Observable::just(NUMBERS).take(10).into_stream(None);

    // Act
    let values = collect_values(output).await?;

    // Assert
    assert_eq!(values, NUMBERS.to_vec());

    Ok(())
}

#[tokio::test]
async fn test_take_zero_emits_nothing() -> anyhow::Result<()> {
    // Arrange
    let output = Observable::just(NUMBERS).take(0).into_stream(None);

    // Act
    let values = collect_values(output).await?;

    // Assert
    assert!(values.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_take_stays_silent_after_limit_until_source_completes() -> anyhow::Result<()> {
    // Arrange
    let (tx, source) = test_channel();
    let mut output = source.take(1).into_stream(None);

    // Act & Assert
    tx.send(1).await?;
    assert_eq!(unwrap_stream(&mut output, 500).await?, 1);

    tx.send(2).await?;
    tx.send(3).await?;
    assert_no_element_emitted(&mut output, 100).await;

    drop(tx);
    assert_stream_ended(&mut output, 500).await;

    Ok(())
}

#[tokio::test]
async fn test_take_forwards_errors_without_counting_them() -> anyhow::Result<()> {
    // Arrange
    let output = Observable::from_items([
        StreamItem::Value(1),
        StreamItem::Error(RxError::stream_error("boom")),
        StreamItem::Value(2),
        StreamItem::Value(3),
    ])
    .take(2)
    .into_stream(None);

    // Act
    let items = collect_items(output).await;

    // Assert
    assert_eq!(items.len(), 3);
    assert_eq!(items[0], StreamItem::Value(1));
    assert!(items[1].is_error());
    assert_eq!(items[2], StreamItem::Value(2));

    Ok(())
}

#[tokio::test]
async fn test_skip_drops_first_n() -> anyhow::Result<()> {
    // Arrange
    let output = Observable::just(NUMBERS).skip(3).into_stream(None);

    // Act
    let values = collect_values(output).await?;

    // Assert
    assert_eq!(values, vec![33, 15, 66]);

    Ok(())
}

#[tokio::test]
async fn test_skip_more_than_available_emits_nothing() -> anyhow::Result<()> {
    // Arrange
    let output = Observable::just(NUMBERS).skip(6).into_stream(None);

    // Act
    let values = collect_values(output).await?;

    // Assert
    assert!(values.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_skip_then_take() -> anyhow::Result<()> {
    // Arrange
    let output = Observable::just(NUMBERS).skip(1).take(3).into_stream(None);

    // Act
    let values = collect_values(output).await?;

    // Assert
    assert_eq!(values, vec![12, 21, 33]);

    Ok(())
}

#[tokio::test]
async fn test_take_and_skip_lengths_for_every_n() -> anyhow::Result<()> {
    for n in 0..=8 {
        // Arrange
        let taken = Observable::just(NUMBERS).take(n).into_stream(None);
        let skipped = Observable::just(NUMBERS).skip(n).into_stream(None);

        // Act
        let taken = collect_values(taken).await?;
        let skipped = collect_values(skipped).await?;

        // Assert
        assert_eq!(taken.len(), n.min(NUMBERS.len()));
        assert_eq!(skipped.len(), NUMBERS.len().saturating_sub(n));
        assert_eq!([taken, skipped].concat(), NUMBERS.to_vec());
    }

    Ok(())
}
