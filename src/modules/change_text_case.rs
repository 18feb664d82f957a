// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::config::{MakeData, ModuleSeed};
use crate::engine::ModuleContext;
use crate::errors::{BuildError, ModuleError};
use crate::traits::Module;

#[derive(Clone, Copy, Debug)]
enum CaseMode {
    Upper,
    Lower,
}

/// Transform module changing the case of the incoming text.
///
/// Inputs: `in` (`String`). Outputs: `out` (`String`).
/// Parameters: `case` (`upper` or `lower`, required).
pub struct ChangeTextCase {
    mode: CaseMode,
}

impl ChangeTextCase {
    pub fn upper() -> Self {
        Self {
            mode: CaseMode::Upper,
        }
    }

    pub fn lower() -> Self {
        Self {
            mode: CaseMode::Lower,
        }
    }
}

#[async_trait]
impl Module for ChangeTextCase {
    async fn exec(&mut self, ctx: &ModuleContext<'_>) -> Result<(), ModuleError> {
        let text: String = ctx.take("in")?;
        let changed = match self.mode {
            CaseMode::Upper => text.to_uppercase(),
            CaseMode::Lower => text.to_lowercase(),
        };
        ctx.fire("out", changed)
    }
}

pub(super) fn make(data: &MakeData) -> Result<ModuleSeed, BuildError> {
    if data.is_first {
        return Err(data.not_as_chain_start());
    }
    let mode = match data.require_parameter("case")? {
        "upper" => CaseMode::Upper,
        "lower" => CaseMode::Lower,
        other => {
            return Err(data.invalid_parameter(
                "case",
                format!("expected 'upper' or 'lower', got '{}'", other),
            ))
        }
    };
    Ok(ModuleSeed::new(ChangeTextCase { mode })
        .input::<String>("in")
        .output::<String>("out"))
}
