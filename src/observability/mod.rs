// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Structured logging for the chain engine.
//!
//! Every operational event is a message type with a `Display` impl and a
//! [`StructuredLog`] impl, so the human-readable line and the typed tracing
//! fields come from one place. Messages are organized by subsystem:
//!
//! * `messages::chain` - chain lifecycle and run execution events
//! * `messages::module` - per-module hook invocations
//!
//! The per-module messages carry the run id, module position, chain name and
//! module name, giving an operator a linear audit trail even though stages
//! run out of lock-step with each other.

pub mod messages;

use tracing::Span;

/// A loggable event with typed fields.
pub trait StructuredLog {
    /// Emit the event at its appropriate level with structured fields.
    fn log(&self);

    /// Build a span carrying the event's fields.
    fn span(&self, name: &str) -> Span;
}
