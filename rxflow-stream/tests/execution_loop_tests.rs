// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use async_trait::async_trait;
use core::num::NonZeroUsize;
use rxflow_core::{CancellationToken, RxError};
use rxflow_stream::prelude::*;
use rxflow_stream::ActivationScope;
use rxflow_test_utils::{collect_values, test_channel};
use std::time::Duration;
use tokio::time::timeout;

struct Repeat(usize);

#[async_trait]
impl Operator<i32, i32> for Repeat {
    async fn on_value(&self, value: i32, ctx: &OperatorContext<i32>) -> Flow {
        for _ in 0..self.0 {
            ctx.emit(value).await;
        }
        Flow::Continue
    }
}

struct DeferAll;

#[async_trait]
impl Operator<i32, i32> for DeferAll {
    async fn on_value(&self, value: i32, ctx: &OperatorContext<i32>) -> Flow {
        ctx.deferred().push(value);
        Flow::Continue
    }
}

struct EmitThenDefer;

#[async_trait]
impl Operator<i32, i32> for EmitThenDefer {
    async fn on_value(&self, value: i32, ctx: &OperatorContext<i32>) -> Flow {
        ctx.emit(value).await;
        ctx.deferred().push(value * 100);
        if value == 2 {
            Flow::Complete
        } else {
            Flow::Continue
        }
    }
}

struct Explode;

#[async_trait]
impl Operator<i32, i32> for Explode {
    async fn on_value(&self, value: i32, ctx: &OperatorContext<i32>) -> Flow {
        assert!(value != 3, "cannot handle 3");
        ctx.emit(value).await;
        Flow::Continue
    }
}

#[tokio::test]
async fn test_operator_may_emit_several_items_per_input() -> anyhow::Result<()> {
    // Arrange
    let output = Observable::just([1, 2])
        .pipe(NodeConfig::new("repeat"), Repeat(3))
        .into_stream(None);

    // Act
    let values = collect_values(output).await?;

    // Assert
    assert_eq!(values, vec![1, 1, 1, 2, 2, 2]);

    Ok(())
}

#[tokio::test]
async fn test_deferred_output_flushed_in_staging_order() -> anyhow::Result<()> {
    // Arrange
    let output = Observable::just(1..=20)
        .pipe(NodeConfig::new("defer_all"), DeferAll)
        .into_stream(None);

    // Act
    let values = collect_values(output).await?;

    // Assert
    assert_eq!(values, (1..=20).collect::<Vec<_>>());

    Ok(())
}

#[tokio::test]
async fn test_deferred_output_follows_direct_output_after_completion() -> anyhow::Result<()> {
    // Arrange
    let output = Observable::just([1, 2, 3, 4])
        .pipe(NodeConfig::new("emit_then_defer"), EmitThenDefer)
        .into_stream(None);

    // Act
    let values = collect_values(output).await?;

    // Assert
    assert_eq!(values, vec![1, 2, 100, 200]);

    Ok(())
}

#[tokio::test]
async fn test_completed_node_keeps_draining_its_input() -> anyhow::Result<()> {
    // Arrange
    let output = Observable::just(0..1_000)
        .with_capacity(NonZeroUsize::MIN)
        .take(3)
        .with_capacity(NonZeroUsize::MIN)
        .into_stream(None);

    // Act
    let values = timeout(Duration::from_secs(5), collect_values(output)).await??;

    // Assert
    assert_eq!(values, vec![0, 1, 2]);

    Ok(())
}

#[tokio::test]
async fn test_activation_spawns_one_task_per_node() -> anyhow::Result<()> {
    // Arrange
    let mut scope = ActivationScope::new(CancellationToken::new());
    let pipeline = Observable::just([1, 2, 3]).map(|x| x + 1).skip(1);

    // Act
    let output = pipeline.activate(&mut scope);

    // Assert
    assert_eq!(scope.len(), 3);
    let values = collect_values(output).await?;
    assert_eq!(values, vec![3, 4]);
    scope.join().await?;

    Ok(())
}

#[tokio::test]
async fn test_dropped_output_winds_down_pipeline() -> anyhow::Result<()> {
    // Arrange
    let mut scope = ActivationScope::new(CancellationToken::new());
    let output = Observable::just(0..10_000).map(|x| x * 2).activate(&mut scope);

    // Act
    assert_eq!(output.recv().await?.unwrap(), 0);
    drop(output);

    // Assert
    timeout(Duration::from_secs(5), scope.join()).await??;

    Ok(())
}

#[tokio::test]
async fn test_panicking_node_reported_as_task_failure() -> anyhow::Result<()> {
    // Arrange
    let mut scope = ActivationScope::new(CancellationToken::new());
    let output = Observable::just([1, 2, 3, 4])
        .pipe(NodeConfig::new("explode"), Explode)
        .activate(&mut scope);

    // Act
    let values = collect_values(output).await?;
    let result = scope.join().await;

    // Assert
    assert_eq!(values, vec![1, 2]);
    assert!(matches!(
        result,
        Err(RxError::TaskFailed { ref node, .. }) if node == "explode"
    ));

    Ok(())
}

#[tokio::test]
async fn test_panicking_periodic_node_closes_its_output() -> anyhow::Result<()> {
    // Arrange
    let mut scope = ActivationScope::new(CancellationToken::new());
    let output = Observable::just([1, 2, 3, 4])
        .pipe(
            NodeConfig::new("explode").periodic(Duration::from_millis(10)),
            Explode,
        )
        .activate(&mut scope);

    // Act
    let values = timeout(Duration::from_secs(2), collect_values(output)).await??;
    let result = timeout(Duration::from_secs(2), scope.join()).await?;

    // Assert
    assert_eq!(values, vec![1, 2]);
    assert!(matches!(
        result,
        Err(RxError::TaskFailed { ref node, .. }) if node == "explode"
    ));

    Ok(())
}

#[tokio::test]
async fn test_panicking_worker_does_not_stop_node() -> anyhow::Result<()> {
    // Arrange
    let mut scope = ActivationScope::new(CancellationToken::new());
    let output = Observable::just([1, 2, 3, 4, 5])
        .pipe(NodeConfig::new("explode"), Explode)
        .with_threading(ThreadingMode::IoConcurrent)
        .activate(&mut scope);

    // Act
    let mut values = collect_values(output).await?;
    values.sort_unstable();

    // Assert
    assert_eq!(values, vec![1, 2, 4, 5]);
    scope.join().await?;

    Ok(())
}

#[tokio::test]
async fn test_from_receiver_completes_when_senders_dropped() -> anyhow::Result<()> {
    // Arrange
    let (tx, source) = test_channel();
    let output = source.into_stream(None);

    // Act
    for value in [7, 8, 9] {
        tx.send(value).await?;
    }
    drop(tx);

    // Assert
    assert_eq!(collect_values(output).await?, vec![7, 8, 9]);

    Ok(())
}

#[test]
fn test_node_config_builders() {
    let config = NodeConfig::new("custom")
        .with_threading(ThreadingMode::ComputeConcurrent)
        .accepting_errors()
        .periodic(Duration::from_millis(5))
        .with_capacity(NonZeroUsize::MIN);

    assert_eq!(config.name, "custom");
    assert_eq!(config.threading, ThreadingMode::ComputeConcurrent);
    assert!(config.accepts_errors);
    assert_eq!(config.period, Some(Duration::from_millis(5)));
    assert_eq!(config.capacity, NonZeroUsize::MIN);

    let renamed = Observable::just([1]).map(|x| x).named("identity");
    assert_eq!(renamed.name(), "identity");
    assert_eq!(
        renamed.config().capacity,
        rxflow_stream::DEFAULT_CHANNEL_CAPACITY
    );
}
