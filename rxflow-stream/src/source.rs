// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::activation::ActivationScope;
use crate::emitter::Emitter;
use crate::node::{NodeConfig, Stage};
use async_channel::Receiver;
use futures::stream::BoxStream;
use futures::StreamExt;
use rxflow_core::{CancellationToken, StreamItem};

/// Root stage of a pipeline: pumps an item sequence into its output channel.
pub(crate) struct SourceNode<T> {
    config: NodeConfig,
    items: BoxStream<'static, StreamItem<T>>,
}

impl<T: Send + 'static> SourceNode<T> {
    pub(crate) fn new(config: NodeConfig, items: BoxStream<'static, StreamItem<T>>) -> Self {
        Self { config, items }
    }
}

impl<T: Send + 'static> Stage<T> for SourceNode<T> {
    fn config(&self) -> &NodeConfig {
        &self.config
    }

    fn config_mut(&mut self) -> &mut NodeConfig {
        &mut self.config
    }

    fn activate(self: Box<Self>, scope: &mut ActivationScope) -> Receiver<StreamItem<T>> {
        let SourceNode { config, items } = *self;

        let (sender, receiver) = async_channel::bounded(config.capacity.get());
        let cancellation_token = scope.cancellation_token().clone();
        let emitter = Emitter::new(sender, cancellation_token.clone());

        let handle = tokio::spawn(pump(items, emitter, config.name.clone(), cancellation_token));
        scope.register(config.name, handle);

        receiver
    }
}

async fn pump<T: Send + 'static>(
    mut items: BoxStream<'static, StreamItem<T>>,
    emitter: Emitter<T>,
    name: String,
    cancellation_token: CancellationToken,
) {
    let mut emitted = 0_usize;

    loop {
        let next = tokio::select! {
            biased;
            () = cancellation_token.cancelled() => None,
            next = items.next() => next,
        };

        let Some(item) = next else {
            break;
        };

        if !emitter.send(item).await {
            break;
        }
        emitted += 1;
    }

    emitter.close();
    debug!("source '{}' closed after {} item(s)", name, emitted);
}
