// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::config::{MakeData, ModuleSeed};
use crate::engine::ModuleContext;
use crate::errors::{BuildError, ModuleError};
use crate::traits::Module;

/// Source module emitting a configured text on every trigger.
///
/// Outputs: `out` (`String`). Parameters: `text` (required).
pub struct TextSource {
    text: String,
}

impl TextSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[async_trait]
impl Module for TextSource {
    async fn exec(&mut self, ctx: &ModuleContext<'_>) -> Result<(), ModuleError> {
        ctx.fire("out", self.text.clone())
    }
}

pub(super) fn make(data: &MakeData) -> Result<ModuleSeed, BuildError> {
    let text = data.require_parameter("text")?;
    Ok(ModuleSeed::new(TextSource::new(text)).output::<String>("out"))
}
