// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::sync::{Arc, Mutex, PoisonError};

use crate::config::{MakeData, ModuleRegistry, ModuleSeed};
use crate::engine::ModuleContext;
use crate::errors::{BuildError, ModuleError};
use crate::traits::Module;

/// Shared store the [`CollectSink`] module appends to, in module invocation
/// order. Clone it before registering and read it after the runs.
#[derive(Clone, Default)]
pub struct CollectedText {
    items: Arc<Mutex<Vec<(u64, String)>>>,
}

impl CollectedText {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, id: u64, text: String) {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, text));
    }

    /// Copy of the collected `(run id, text)` pairs.
    pub fn snapshot(&self) -> Vec<(u64, String)> {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Sink module collecting incoming text into a shared store.
///
/// Inputs: `in` (`String`).
pub struct CollectSink {
    store: CollectedText,
}

impl CollectSink {
    pub fn new(store: CollectedText) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Module for CollectSink {
    async fn exec(&mut self, ctx: &ModuleContext<'_>) -> Result<(), ModuleError> {
        let text: String = ctx.take("in")?;
        self.store.push(ctx.id(), text);
        Ok(())
    }
}

/// Register the `collect_sink` type writing into `store`.
pub fn register(registry: &mut ModuleRegistry, store: CollectedText) -> Result<(), BuildError> {
    registry.register("collect_sink", move |data: &MakeData| {
        if data.is_first {
            return Err(data.not_as_chain_start());
        }
        Ok(ModuleSeed::new(CollectSink::new(store.clone())).input::<String>("in"))
    })
}
