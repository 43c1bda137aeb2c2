// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types for the rxflow operator engine.
//!
//! [`RxError`] plays two roles:
//!
//! - as the payload of [`StreamItem::Error`](crate::StreamItem::Error), it travels
//!   through a pipeline next to ordinary values;
//! - as the error of [`Result`], it reports setup and task failures once to the
//!   caller of a subscription.
//!
//! # Examples
//!
//! ```
//! use rxflow_core::{Result, RxError};
//!
//! fn open_source() -> Result<()> {
//!     Err(RxError::stream_error("source not ready"))
//! }
//!
//! assert!(open_source().is_err());
//! ```

/// Root error type for all rxflow operations.
#[derive(Debug, thiserror::Error)]
pub enum RxError {
    /// A general stream processing failure.
    #[error("Stream processing error: {context}")]
    StreamProcessingError {
        /// Description of what went wrong
        context: String,
    },

    /// An error produced by user code and injected into the stream.
    #[error("User error: {0}")]
    UserError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Several errors collected over the lifetime of a subscription.
    #[error("Multiple errors occurred: {count} errors")]
    MultipleErrors {
        /// Number of errors that occurred
        count: usize,
        /// The individual errors
        errors: Vec<RxError>,
    },

    /// A node's background task ended abnormally (panicked or was aborted).
    #[error("Node '{node}' failed: {context}")]
    TaskFailed {
        /// Name of the node whose task failed
        node: String,
        /// Description of the failure
        context: String,
    },
}

impl RxError {
    /// Create a stream processing error with the given context
    pub fn stream_error(context: impl Into<String>) -> Self {
        Self::StreamProcessingError {
            context: context.into(),
        }
    }

    /// Wrap a user error
    pub fn user_error(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::UserError(Box::new(error))
    }

    /// Report the failure of the task driving `node`
    pub fn task_failed(node: impl Into<String>, context: impl Into<String>) -> Self {
        Self::TaskFailed {
            node: node.into(),
            context: context.into(),
        }
    }

    /// Aggregate several errors into a single `MultipleErrors`.
    ///
    /// A single error is returned as-is rather than wrapped.
    ///
    /// # Examples
    ///
    /// ```
    /// use rxflow_core::RxError;
    ///
    /// let merged = RxError::aggregate(vec![
    ///     RxError::stream_error("first"),
    ///     RxError::stream_error("second"),
    /// ]);
    /// assert!(matches!(merged, RxError::MultipleErrors { count: 2, .. }));
    /// ```
    #[must_use]
    pub fn aggregate(mut errors: Vec<RxError>) -> Self {
        if errors.len() == 1 {
            if let Some(error) = errors.pop() {
                return error;
            }
        }

        Self::MultipleErrors {
            count: errors.len(),
            errors,
        }
    }
}

/// Specialized Result type for rxflow operations
pub type Result<T> = std::result::Result<T, RxError>;

impl Clone for RxError {
    fn clone(&self) -> Self {
        match self {
            Self::StreamProcessingError { context } => Self::StreamProcessingError {
                context: context.clone(),
            },
            // Boxed user errors can't be cloned; keep their message
            Self::UserError(e) => Self::StreamProcessingError {
                context: format!("User error: {e}"),
            },
            Self::MultipleErrors { count, errors } => Self::MultipleErrors {
                count: *count,
                errors: errors.clone(),
            },
            Self::TaskFailed { node, context } => Self::TaskFailed {
                node: node.clone(),
                context: context.clone(),
            },
        }
    }
}
