// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;

use crate::errors::ModuleError;

/// Errors surfaced by `Chain::exec`.
#[derive(Debug)]
pub enum ExecError {
    /// The chain is not enabled; no id was allocated and no module was touched
    NotEnabled { chain: String },
    /// A module's exec hook failed; the remaining modules received their
    /// cleanup call before this error was returned
    ModuleFailed {
        chain: String,
        module: String,
        number: usize,
        id: u64,
        source: ModuleError,
    },
}

impl fmt::Display for ExecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecError::NotEnabled { chain } => {
                write!(f, "chain '{}' is not enabled", chain)
            }
            ExecError::ModuleFailed {
                chain,
                module,
                number,
                id,
                source,
            } => {
                write!(
                    f,
                    "id({}.{}) exec chain '{}' module '{}' failed: {}",
                    id, number, chain, module, source
                )
            }
        }
    }
}

impl std::error::Error for ExecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExecError::NotEnabled { .. } => None,
            ExecError::ModuleFailed { source, .. } => Some(source),
        }
    }
}

/// Errors surfaced by `Chain::enable`.
///
/// Every module enabled before the failing one has already been disabled
/// again; the chain remains disabled.
#[derive(Debug)]
pub enum EnableError {
    ModuleEnableFailed {
        chain: String,
        module: String,
        number: usize,
        source: ModuleError,
    },
}

impl fmt::Display for EnableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnableError::ModuleEnableFailed {
                chain,
                module,
                number,
                source,
            } => {
                write!(
                    f,
                    "enable of chain '{}' failed at module '{}' (position {}): {}",
                    chain, module, number, source
                )
            }
        }
    }
}

impl std::error::Error for EnableError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EnableError::ModuleEnableFailed { source, .. } => Some(source),
        }
    }
}
