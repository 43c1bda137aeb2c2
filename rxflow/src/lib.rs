// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # rxflow
//!
//! A reactive operator engine: compose a pipeline of operators over values
//! produced over time, and receive the results through a callback as soon as
//! they are available.
//!
//! ## Overview
//!
//! A pipeline is assembled lazily. Each operator call links one more node to
//! an [`Observable`]; nothing runs until [`subscribe`](SubscribeExt::subscribe)
//! activates the chain. Every node then runs as its own task, connected to its
//! predecessor by a bounded channel, and dispatches items to its operator
//! inline or on concurrent workers according to its [`ThreadingMode`].
//!
//! Terminal-window operators such as [`last`](LastExt::last) or
//! [`take_last`](TakeLastExt::take_last) stage their output and emit it once
//! the source completes. Time-based operators such as
//! [`sample`](SampleExt::sample) and [`debounce`](DebounceExt::debounce) run
//! on tokio's clock, so tests can drive them with a paused runtime.
//!
//! ## Quick Start
//!
//! ```rust
//! use rxflow::prelude::*;
//! use std::sync::{Arc, Mutex};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), RxError> {
//! let received = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&received);
//!
//! Observable::just([18, 12, 21, 33, 15, 66])
//!     .skip(1)
//!     .take_last(2)
//!     .subscribe(move |x| sink.lock().unwrap().push(x), None, None::<fn(RxError)>)
//!     .await?;
//!
//! assert_eq!(*received.lock().unwrap(), vec![15, 66]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! - `tracing`: emit node lifecycle events through `tracing` instead of
//!   printing warnings and errors to stderr

pub mod receiver_ext;

// Re-export core types
pub use rxflow_core::{CancellationToken, Result, RxError, StreamItem, ThreadingMode};

// Re-export the engine
pub use rxflow_stream::{
    ActivationScope, DeferredBuffer, Emitter, Flow, NodeConfig, Observable, Operator,
    OperatorContext, Stage, DEFAULT_CHANNEL_CAPACITY,
};
pub use rxflow_stream::{
    DebounceExt, DistinctExt, ElementAtExt, FilterExt, FirstExt, IgnoreElementsExt, LastExt,
    MapExt, OnErrorExt, SampleExt, SkipExt, SkipLastExt, TakeExt, TakeLastExt,
};

pub use rxflow_exec::SubscribeExt;
pub use rxflow_runtime::{DefaultTimer, Timer, TokioTimer};

pub use receiver_ext::IntoObservable;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::receiver_ext::IntoObservable;
    pub use rxflow_core::{CancellationToken, RxError, StreamItem, ThreadingMode};
    pub use rxflow_exec::SubscribeExt;
    pub use rxflow_stream::prelude::*;
}
