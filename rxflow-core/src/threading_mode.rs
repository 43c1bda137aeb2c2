// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

/// How a node invokes its operator for each incoming item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ThreadingMode {
    /// Invoke the operator inline in the node's loop, strictly in arrival order.
    #[default]
    Default,
    /// Spawn one worker per item. No bound on the number of in-flight workers.
    IoConcurrent,
    /// Spawn one worker per item, at most one per available CPU at a time.
    ComputeConcurrent,
}

impl ThreadingMode {
    /// Returns `true` if items are dispatched to independent workers.
    #[must_use]
    pub const fn is_concurrent(self) -> bool {
        !matches!(self, ThreadingMode::Default)
    }
}
