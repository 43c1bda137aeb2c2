// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Node-based operator execution engine.
//!
//! A pipeline is a chain of nodes assembled lazily through an [`Observable`].
//! Each operator call links one more node; nothing runs until the chain is
//! activated. Activation spawns one task per node, from the root to the tail,
//! wiring each node's input to its predecessor's bounded output channel.
//!
//! # Architecture
//!
//! - **[`Observable`]**: owns the tail of a not yet activated chain
//! - **[`Operator`]**: the per-item transform a node runs, emitting through an
//!   [`OperatorContext`]
//! - **Execution loop**: drains the predecessor, dispatches items according to
//!   the node's [`ThreadingMode`](rxflow_core::ThreadingMode), joins workers,
//!   flushes the [`DeferredBuffer`] and closes the output
//! - **Timer driver**: flushes the deferred buffer once per period on periodic
//!   nodes such as [`sample`](SampleExt::sample)
//!
//! ## Operator Categories
//!
//! ### Filtering Operators
//!
//! - **[`distinct`](DistinctExt::distinct)**, **[`filter`](FilterExt::filter)**
//! - **[`first`](FirstExt::first)**, **[`element_at`](ElementAtExt::element_at)**,
//!   **[`last`](LastExt::last)**
//! - **[`take`](TakeExt::take)**, **[`take_last`](TakeLastExt::take_last)**,
//!   **[`skip`](SkipExt::skip)**, **[`skip_last`](SkipLastExt::skip_last)**
//! - **[`ignore_elements`](IgnoreElementsExt::ignore_elements)**
//!
//! ### Time-based Operators
//!
//! - **[`debounce`](DebounceExt::debounce)**, **[`sample`](SampleExt::sample)**
//!
//! ### Transformation and Error Operators
//!
//! - **[`map`](MapExt::map)**, **[`map_async`](MapExt::map_async)**
//! - **[`on_error`](OnErrorExt::on_error)**
//!
//! # Ordering
//!
//! Under the default threading mode a node emits in arrival order. Under the
//! concurrent modes the output order is unspecified. A deferred flush always
//! emits in staging order.
//!
//! # Example
//!
//! ```
//! use rxflow_stream::prelude::*;
//! use futures::StreamExt;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let output = Observable::just([1, 2, 1, 1, 2, 3, 4, 4])
//!     .distinct()
//!     .into_stream(None);
//!
//! let values: Vec<i32> = output.filter_map(|item| async move { item.ok() }).collect().await;
//! assert_eq!(values, vec![1, 2, 3, 4]);
//! # }
//! ```

#[macro_use]
mod logging;

pub mod activation;
pub mod deferred_buffer;
pub mod emitter;
mod execution_loop;
pub mod node;
pub mod observable;
pub mod operator;
pub mod operators;
pub mod prelude;
mod source;
mod timer_driver;

pub use self::activation::ActivationScope;
pub use self::deferred_buffer::DeferredBuffer;
pub use self::emitter::Emitter;
pub use self::node::{NodeConfig, Stage, DEFAULT_CHANNEL_CAPACITY};
pub use self::observable::Observable;
pub use self::operator::{Flow, Operator, OperatorContext};
pub use self::operators::{
    DebounceExt, DistinctExt, ElementAtExt, FilterExt, FirstExt, IgnoreElementsExt, LastExt,
    MapExt, OnErrorExt, SampleExt, SkipExt, SkipLastExt, TakeExt, TakeLastExt,
};
