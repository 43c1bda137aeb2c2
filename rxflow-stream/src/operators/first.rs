// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::node::NodeConfig;
use crate::observable::Observable;
use crate::operator::{Flow, Operator, OperatorContext};
use async_trait::async_trait;
use core::sync::atomic::{AtomicBool, Ordering};

/// Extension trait providing the `first` operator.
pub trait FirstExt<T>: Sized {
    /// Emit the first value, then complete.
    ///
    /// Emits nothing if the source completes without a value.
    fn first(self) -> Observable<T>;
}

impl<T: Send + 'static> FirstExt<T> for Observable<T> {
    fn first(self) -> Observable<T> {
        self.pipe(
            NodeConfig::new("first"),
            First {
                emitted: AtomicBool::new(false),
            },
        )
    }
}

struct First {
    emitted: AtomicBool,
}

#[async_trait]
impl<T: Send + 'static> Operator<T, T> for First {
    async fn on_value(&self, value: T, ctx: &OperatorContext<T>) -> Flow {
        // Concurrent workers may race past the completion flag
        if !self.emitted.swap(true, Ordering::AcqRel) {
            ctx.emit(value).await;
        }
        Flow::Complete
    }
}
