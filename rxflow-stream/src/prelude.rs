// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Prelude module re-exporting all commonly used traits and types.
//!
//! ```
//! use rxflow_stream::prelude::*;
//!
//! let pipeline = Observable::just([18, 12, 21, 33, 15, 66]).skip(3).take(2);
//! assert_eq!(pipeline.name(), "take");
//! ```
//!
//! # Contents
//!
//! ## Extension Traits (Operators)
//!
//! - [`DebounceExt`] - Emit values that settled for a duration
//! - [`DistinctExt`] - Suppress values seen before
//! - [`ElementAtExt`] - Emit the value at an ordinal
//! - [`FilterExt`] - Keep values matching a predicate
//! - [`FirstExt`] - Emit the first value
//! - [`IgnoreElementsExt`] - Drop every value
//! - [`LastExt`] - Emit the final value
//! - [`MapExt`] - Transform values, synchronously or not
//! - [`OnErrorExt`] - Handle stream errors
//! - [`SampleExt`] - Emit the latest value once per period
//! - [`SkipExt`] - Skip the first n values
//! - [`SkipLastExt`] - Skip the final n values
//! - [`TakeExt`] - Take the first n values
//! - [`TakeLastExt`] - Take the final n values
//!
//! ## Types
//!
//! - [`Observable`] - A pipeline under construction
//! - [`NodeConfig`] - Per-node configuration
//! - [`Operator`], [`OperatorContext`], [`Flow`] - Building blocks for custom operators

pub use crate::node::NodeConfig;
pub use crate::observable::Observable;
pub use crate::operator::{Flow, Operator, OperatorContext};
pub use crate::operators::{
    DebounceExt, DistinctExt, ElementAtExt, FilterExt, FirstExt, IgnoreElementsExt, LastExt,
    MapExt, OnErrorExt, SampleExt, SkipExt, SkipLastExt, TakeExt, TakeLastExt,
};
pub use rxflow_core::{StreamItem, ThreadingMode};
