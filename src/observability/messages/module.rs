// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for per-module hook invocations.
//!
//! The `action` field names the hook ("exec", "cleanup", "enable", "disable");
//! `id` is the run id when the hook runs in the context of a run, `None` for
//! lifecycle hooks.

use crate::observability::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

fn write_tag(
    f: &mut Formatter,
    action: &str,
    chain: &str,
    module: &str,
    number: usize,
    id: Option<u64>,
) -> std::fmt::Result {
    match id {
        Some(id) => write!(
            f,
            "id({}.{}) {} chain '{}' module '{}'",
            id, number, action, chain, module
        ),
        None => write!(
            f,
            "{} chain '{}' module '{}' (position {})",
            action, chain, module, number
        ),
    }
}

/// A module hook invocation began.
///
/// # Log Level
/// `debug!` - High-frequency event
pub struct ModuleHookStarted<'a> {
    pub action: &'a str,
    pub chain: &'a str,
    pub module: &'a str,
    pub number: usize,
    pub id: Option<u64>,
}

impl Display for ModuleHookStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write_tag(f, self.action, self.chain, self.module, self.number, self.id)
    }
}

impl StructuredLog for ModuleHookStarted<'_> {
    fn log(&self) {
        tracing::debug!(
            action = self.action,
            chain = self.chain,
            module = self.module,
            number = self.number,
            id = self.id,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "module_hook",
            span_name = name,
            action = self.action,
            chain = self.chain,
            module = self.module,
            number = self.number,
            id = self.id,
        )
    }
}

/// A module hook invocation finished without error.
///
/// # Log Level
/// `debug!` - High-frequency event
pub struct ModuleHookCompleted<'a> {
    pub action: &'a str,
    pub chain: &'a str,
    pub module: &'a str,
    pub number: usize,
    pub id: Option<u64>,
    pub duration: std::time::Duration,
}

impl Display for ModuleHookCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write_tag(f, self.action, self.chain, self.module, self.number, self.id)?;
        write!(f, " completed in {:?}", self.duration)
    }
}

impl StructuredLog for ModuleHookCompleted<'_> {
    fn log(&self) {
        tracing::debug!(
            action = self.action,
            chain = self.chain,
            module = self.module,
            number = self.number,
            id = self.id,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "module_hook_completed",
            span_name = name,
            action = self.action,
            chain = self.chain,
            module = self.module,
            number = self.number,
            id = self.id,
        )
    }
}

/// A module hook failed.
///
/// # Log Level
/// `error!` - Triggers the cleanup cascade (exec) or rollback (enable)
pub struct ModuleHookFailed<'a> {
    pub action: &'a str,
    pub chain: &'a str,
    pub module: &'a str,
    pub number: usize,
    pub id: Option<u64>,
    pub error: &'a dyn std::error::Error,
}

impl Display for ModuleHookFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write_tag(f, self.action, self.chain, self.module, self.number, self.id)?;
        write!(f, " failed: {}", self.error)
    }
}

impl StructuredLog for ModuleHookFailed<'_> {
    fn log(&self) {
        tracing::error!(
            action = self.action,
            chain = self.chain,
            module = self.module,
            number = self.number,
            id = self.id,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "module_hook_failed",
            span_name = name,
            action = self.action,
            chain = self.chain,
            module = self.module,
            number = self.number,
            id = self.id,
        )
    }
}

/// A module was disabled again because a later module's enable hook failed.
///
/// # Log Level
/// `warn!` - Partial enable rolled back
pub struct ModuleEnableRolledBack<'a> {
    pub chain: &'a str,
    pub module: &'a str,
    pub number: usize,
    pub failed_module: &'a str,
}

impl Display for ModuleEnableRolledBack<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "chain '{}' module '{}' (position {}) disabled because of error while \
             enabling module '{}'",
            self.chain, self.module, self.number, self.failed_module
        )
    }
}

impl StructuredLog for ModuleEnableRolledBack<'_> {
    fn log(&self) {
        tracing::warn!(
            chain = self.chain,
            module = self.module,
            number = self.number,
            failed_module = self.failed_module,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "module_enable_rolled_back",
            span_name = name,
            chain = self.chain,
            module = self.module,
            number = self.number,
            failed_module = self.failed_module,
        )
    }
}
