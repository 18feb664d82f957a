// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for chain lifecycle and run execution events.

use crate::observability::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A trigger entered the chain: an id was allocated and a run sequence
/// number claimed.
///
/// # Log Level
/// `info!` - Important operational event
pub struct ChainExecStarted<'a> {
    pub chain: &'a str,
    pub id: u64,
    pub run: u64,
}

impl Display for ChainExecStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "id({}) chain '{}' exec started (run {})",
            self.id, self.chain, self.run
        )
    }
}

impl StructuredLog for ChainExecStarted<'_> {
    fn log(&self) {
        tracing::info!(chain = self.chain, id = self.id, run = self.run, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "chain_exec",
            span_name = name,
            chain = self.chain,
            id = self.id,
            run = self.run,
        )
    }
}

/// A run completed through every module of the chain.
///
/// # Log Level
/// `info!` - Important operational event
pub struct ChainExecCompleted<'a> {
    pub chain: &'a str,
    pub id: u64,
    pub run: u64,
    pub duration: std::time::Duration,
}

impl Display for ChainExecCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "id({}) chain '{}' exec completed (run {}) in {:?}",
            self.id, self.chain, self.run, self.duration
        )
    }
}

impl StructuredLog for ChainExecCompleted<'_> {
    fn log(&self) {
        tracing::info!(
            chain = self.chain,
            id = self.id,
            run = self.run,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "chain_exec_completed",
            span_name = name,
            chain = self.chain,
            id = self.id,
            run = self.run,
        )
    }
}

/// A run was abandoned: a module failed and the remaining modules received
/// their cleanup call.
///
/// # Log Level
/// `error!` - Run lost
pub struct ChainExecFailed<'a> {
    pub chain: &'a str,
    pub id: u64,
    pub run: u64,
    pub error: &'a dyn std::error::Error,
}

impl Display for ChainExecFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "id({}) chain '{}' exec failed (run {}): {}",
            self.id, self.chain, self.run, self.error
        )
    }
}

impl StructuredLog for ChainExecFailed<'_> {
    fn log(&self) {
        tracing::error!(
            chain = self.chain,
            id = self.id,
            run = self.run,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "chain_exec_failed",
            span_name = name,
            chain = self.chain,
            id = self.id,
            run = self.run,
        )
    }
}

/// All modules enabled; the chain accepts exec calls.
///
/// # Log Level
/// `info!` - Lifecycle transition
pub struct ChainEnabled<'a> {
    pub chain: &'a str,
    pub modules: usize,
}

impl Display for ChainEnabled<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "chain '{}' enabled ({} modules)", self.chain, self.modules)
    }
}

impl StructuredLog for ChainEnabled<'_> {
    fn log(&self) {
        tracing::info!(chain = self.chain, modules = self.modules, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "chain_enabled",
            span_name = name,
            chain = self.chain,
            modules = self.modules,
        )
    }
}

/// The chain no longer accepts exec calls; every module was disabled.
///
/// # Log Level
/// `info!` - Lifecycle transition
pub struct ChainDisabled<'a> {
    pub chain: &'a str,
}

impl Display for ChainDisabled<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "chain '{}' disabled", self.chain)
    }
}

impl StructuredLog for ChainDisabled<'_> {
    fn log(&self) {
        tracing::info!(chain = self.chain, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!("chain_disabled", span_name = name, chain = self.chain)
    }
}
