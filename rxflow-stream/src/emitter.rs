// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use async_channel::Sender;
use rxflow_core::{CancellationToken, RxError, StreamItem};

/// The single send path onto a node's output channel.
///
/// Every send races against the subscription's cancellation token, so a node
/// blocked on a full channel returns as soon as the subscription is cancelled.
#[derive(Debug)]
pub struct Emitter<T> {
    sender: Sender<StreamItem<T>>,
    cancellation_token: CancellationToken,
}

impl<T> Clone for Emitter<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            cancellation_token: self.cancellation_token.clone(),
        }
    }
}

impl<T: Send> Emitter<T> {
    pub(crate) fn new(sender: Sender<StreamItem<T>>, cancellation_token: CancellationToken) -> Self {
        Self {
            sender,
            cancellation_token,
        }
    }

    /// Send an item downstream.
    ///
    /// Returns `false` if the item was not delivered: the subscription was
    /// cancelled, the channel is closed or the receiving side is gone.
    pub async fn send(&self, item: StreamItem<T>) -> bool {
        if self.cancellation_token.is_cancelled() {
            return false;
        }

        tokio::select! {
            biased;
            () = self.cancellation_token.cancelled() => false,
            result = self.sender.send(item) => {
                if result.is_err() {
                    trace!("send refused: output channel closed");
                }
                result.is_ok()
            }
        }
    }

    /// Send a value downstream.
    pub async fn emit(&self, value: T) -> bool {
        self.send(StreamItem::Value(value)).await
    }

    /// Send an error downstream.
    pub async fn emit_error(&self, error: RxError) -> bool {
        self.send(StreamItem::Error(error)).await
    }

    /// `true` once the channel has been closed or its receiver dropped.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    /// Close the output channel. Items already queued are still delivered.
    pub(crate) fn close(&self) -> bool {
        self.sender.close()
    }
}
