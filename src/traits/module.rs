// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::engine::ModuleContext;
use crate::errors::ModuleError;

/// One stage of a chain.
///
/// The chain owns every module it was built with and invokes the hooks in a
/// fixed protocol:
///
/// * [`input_ready`](Module::input_ready): once, after the chain has wired
///   all ports; a module that computes its active output types from its
///   connected inputs does so here.
/// * [`enable`](Module::enable) / [`disable`](Module::disable): bracket the
///   periods during which exec calls may arrive.
/// * [`exec`](Module::exec): once per trigger, in strictly increasing run
///   sequence order, never concurrently with itself.
/// * [`cleanup`](Module::cleanup): instead of `exec` when an earlier stage
///   failed for the same run; the chain has already evicted the stale input
///   buffers when this is called.
///
/// `disable` and `cleanup` are infallible by signature: they run during
/// failure recovery, so a module whose teardown can fail must contain that
/// failure itself.
#[async_trait]
pub trait Module: Send {
    /// The worker hook, called once per trigger.
    async fn exec(&mut self, ctx: &ModuleContext<'_>) -> Result<(), ModuleError>;

    /// Prepare the module for exec calls.
    async fn enable(&mut self) -> Result<(), ModuleError> {
        Ok(())
    }

    /// Release whatever `enable` acquired.
    fn disable(&mut self) {}

    /// Called instead of `exec` for a run an earlier stage failed on.
    fn cleanup(&mut self, _id: u64) {}

    /// Called once after input/output wiring is finalized.
    fn input_ready(&mut self) {}
}
