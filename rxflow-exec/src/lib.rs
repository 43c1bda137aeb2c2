// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Terminal subscription for rxflow pipelines.
//!
//! [`SubscribeExt::subscribe`] activates every node of an
//! [`Observable`](rxflow_stream::Observable) from the root to the tail, then
//! drains the tail's output, invoking a callback once per value in arrival
//! order until the pipeline completes or the subscription is cancelled.

#[macro_use]
mod logging;

pub mod subscribe;

// Re-export commonly used types
pub use subscribe::SubscribeExt;
