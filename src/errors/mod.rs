// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod build;
mod execution;
mod module;

pub use build::BuildError;
pub use execution::{EnableError, ExecError};
pub use module::ModuleError;
