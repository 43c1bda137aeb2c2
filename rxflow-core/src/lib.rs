// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Core types shared by every rxflow crate.
//!
//! - [`StreamItem`] - the value-or-error envelope that flows between nodes
//! - [`RxError`] - the root error type and its [`Result`] alias
//! - [`CancellationToken`] - cooperative cancellation shared by a whole subscription
//! - [`ThreadingMode`] - per-node dispatch policy

pub mod cancellation_token;
pub mod error;
pub mod stream_item;
pub mod threading_mode;

pub use self::cancellation_token::{CancellationToken, Cancelled};
pub use self::error::{Result, RxError};
pub use self::stream_item::StreamItem;
pub use self::threading_mode::ThreadingMode;
