// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors a module hook can report to the chain scheduler.

use thiserror::Error;

use crate::engine::TypeTag;

/// Error returned by a module's `exec` or `enable` hook.
#[derive(Debug, Error)]
pub enum ModuleError {
    #[error("unknown input port '{0}'")]
    UnknownInput(String),

    #[error("unknown output port '{0}'")]
    UnknownOutput(String),

    #[error("no data buffered for id {id} on input '{input}'")]
    MissingInput { input: String, id: u64 },

    #[error("input '{input}' holds {actual} for id {id}, expected {expected}")]
    InputTypeMismatch {
        input: String,
        id: u64,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("output '{output}' does not declare type {tag}")]
    UndeclaredOutputType { output: String, tag: TypeTag },

    #[error("id {id} is outside the range reserved for this trigger ({first}..{end})")]
    IdOutOfRange { id: u64, first: u64, end: u64 },

    #[error("{0}")]
    Failed(String),

    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl ModuleError {
    /// Ad-hoc failure with a message, for modules without a richer error type.
    pub fn failed(message: impl Into<String>) -> Self {
        ModuleError::Failed(message.into())
    }
}
