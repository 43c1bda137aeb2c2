// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities and fixtures for the rxflow operator engine.
//!
//! This crate provides sources, assertion helpers and test data for testing
//! pipelines. It is designed for use in development and testing only, not for
//! production code.
//!
//! # Sources
//!
//! - [`test_channel`] - a pipeline fed imperatively through a channel sender
//! - [`test_channel_with_errors`] - the same, accepting errors as well as values
//! - [`timed_source`] - a pipeline emitting values after given delays, for use
//!   with tokio's paused clock
//!
//! # Examples
//!
//! ```rust
//! use rxflow_test_utils::test_data::{TestData, person_alice};
//!
//! match person_alice() {
//!     TestData::Person(p) => assert_eq!(p.name, "Alice"),
//!     _ => panic!("Expected person"),
//! }
//! ```
//!
//! ```rust
//! use rxflow_test_utils::{collect_values, timed_source};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let output = timed_source([(0, 1), (10, 2), (5, 3)]).into_stream(None);
//! assert_eq!(collect_values(output).await.unwrap(), vec![1, 2, 3]);
//! # }
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod animal;
pub mod helpers;
pub mod person;
pub mod test_data;

use async_channel::Sender;
use futures::stream::{self, StreamExt};
use rxflow_core::StreamItem;
use rxflow_stream::Observable;
use std::time::Duration;
use tokio::time::sleep;

// Re-export commonly used test utilities
pub use helpers::{
    assert_no_element_emitted, assert_stream_ended, collect_items, collect_values, unwrap_stream,
};
pub use test_data::TestData;

/// Creates a pipeline source fed by the returned sender.
///
/// The source completes once the sender is dropped or closed.
///
/// # Example
///
/// ```rust
/// use rxflow_test_utils::{test_channel, unwrap_stream};
/// use rxflow_test_utils::test_data::person_alice;
///
/// # #[tokio::main]
/// # async fn main() {
/// let (tx, source) = test_channel();
/// let mut output = source.into_stream(None);
///
/// tx.try_send(person_alice()).unwrap();
///
/// assert_eq!(unwrap_stream(&mut output, 500).await.unwrap(), person_alice());
/// # }
/// ```
pub fn test_channel<T: Send + 'static>() -> (Sender<T>, Observable<T>) {
    let (tx, rx) = async_channel::unbounded();
    (tx, Observable::from_receiver(rx))
}

/// Creates a pipeline source accepting `StreamItem<T>`, for testing error
/// propagation.
pub fn test_channel_with_errors<T: Send + 'static>() -> (Sender<StreamItem<T>>, Observable<T>) {
    let (tx, rx) = async_channel::unbounded();
    (tx, Observable::from_stream(rx))
}

/// Creates a pipeline source that waits `delay_ms` before emitting each value.
///
/// Delays are relative to the previous emission, so `[(0, a), (260, b)]`
/// emits `a` immediately and `b` 260ms later. The source completes right
/// after the last value.
pub fn timed_source<T: Send + 'static>(
    items: impl IntoIterator<Item = (u64, T)>,
) -> Observable<T> {
    let items: Vec<(u64, T)> = items.into_iter().collect();
    Observable::from_stream(stream::iter(items).then(|(delay_ms, value)| async move {
        sleep(Duration::from_millis(delay_ms)).await;
        StreamItem::Value(value)
    }))
}
