// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::node::NodeConfig;
use crate::observable::Observable;
use crate::operator::{Flow, Operator, OperatorContext};
use async_trait::async_trait;

/// Extension trait providing the `ignore_elements` operator.
pub trait IgnoreElementsExt<T>: Sized {
    /// Drop every value. Errors still pass through, and the output completes
    /// when the source does.
    fn ignore_elements(self) -> Observable<T>;
}

impl<T: Send + 'static> IgnoreElementsExt<T> for Observable<T> {
    fn ignore_elements(self) -> Observable<T> {
        self.pipe(NodeConfig::new("ignore_elements"), IgnoreElements)
    }
}

struct IgnoreElements;

#[async_trait]
impl<T: Send + 'static> Operator<T, T> for IgnoreElements {
    async fn on_value(&self, _value: T, _ctx: &OperatorContext<T>) -> Flow {
        Flow::Continue
    }
}
