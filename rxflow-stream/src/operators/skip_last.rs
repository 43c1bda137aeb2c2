// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::node::NodeConfig;
use crate::observable::Observable;
use crate::operator::{Flow, Operator, OperatorContext};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;

/// Extension trait providing the `skip_last` operator.
pub trait SkipLastExt<T>: Sized {
    /// Emit everything except the final `n` values, once the source completes.
    ///
    /// Values are staged as soon as they fall out of the trailing window of
    /// `n`, but none is emitted before the source completes.
    fn skip_last(self, n: usize) -> Observable<T>;
}

impl<T: Send + 'static> SkipLastExt<T> for Observable<T> {
    fn skip_last(self, n: usize) -> Observable<T> {
        self.pipe(
            NodeConfig::new("skip_last"),
            SkipLast {
                window: Mutex::new(VecDeque::with_capacity(n)),
                size: n,
            },
        )
    }
}

struct SkipLast<T> {
    window: Mutex<VecDeque<T>>,
    size: usize,
}

#[async_trait]
impl<T: Send + 'static> Operator<T, T> for SkipLast<T> {
    async fn on_value(&self, value: T, ctx: &OperatorContext<T>) -> Flow {
        let released = {
            let mut window = self.window.lock();
            window.push_back(value);
            if window.len() > self.size {
                window.pop_front()
            } else {
                None
            }
        };

        if let Some(released) = released {
            ctx.deferred().push(released);
        }
        Flow::Continue
    }
}
