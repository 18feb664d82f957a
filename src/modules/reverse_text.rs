// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::config::{MakeData, ModuleSeed};
use crate::engine::ModuleContext;
use crate::errors::{BuildError, ModuleError};
use crate::traits::Module;

/// Transform module reversing the incoming text.
///
/// Inputs: `in` (`String`). Outputs: `out` (`String`).
pub struct ReverseText;

#[async_trait]
impl Module for ReverseText {
    async fn exec(&mut self, ctx: &ModuleContext<'_>) -> Result<(), ModuleError> {
        let text: String = ctx.take("in")?;
        let reversed: String = text.chars().rev().collect();
        ctx.fire("out", reversed)
    }
}

pub(super) fn make(data: &MakeData) -> Result<ModuleSeed, BuildError> {
    if data.is_first {
        return Err(data.not_as_chain_start());
    }
    Ok(ModuleSeed::new(ReverseText)
        .input::<String>("in")
        .output::<String>("out"))
}
