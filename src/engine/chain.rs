// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The chain scheduler: pipelined concurrent execution with deterministic
//! per-stage ordering.
//!
//! Any number of tasks may call [`Chain::exec`] concurrently. Each call claims
//! a run sequence number and then walks the modules in position order, waiting
//! at every module's pipeline slot until the slot's counter equals its own
//! sequence number. A slot only ever advances by exactly 1, after the module
//! has handled that sequence number via exec or cleanup, so every module
//! observes runs in strictly increasing sequence order while different
//! modules work on different runs at the same time.
//!
//! When a module's exec hook fails, every module whose slot has not yet
//! passed the failing run receives a cleanup call under the same
//! wait-for-turn protocol. Skipping that would leave those slots permanently
//! behind and deadlock every subsequent run.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::{watch, Mutex};
use tracing::Instrument;

use crate::engine::id_generator::IdGenerator;
use crate::engine::module::ModuleNode;
use crate::errors::{EnableError, ExecError};
use crate::observability::messages::chain::{
    ChainDisabled, ChainEnabled, ChainExecCompleted, ChainExecFailed, ChainExecStarted,
};
use crate::observability::messages::module::{
    ModuleEnableRolledBack, ModuleHookCompleted, ModuleHookFailed, ModuleHookStarted,
};
use crate::observability::StructuredLog;

/// Per-module pipeline slot: the module itself plus the counter holding the
/// next sequence number this module is allowed to process.
struct ModuleSlot {
    node: Mutex<ModuleNode>,
    ready: watch::Sender<u64>,
}

impl ModuleSlot {
    fn new(node: ModuleNode) -> Self {
        let (ready, _) = watch::channel(0);
        Self {
            node: Mutex::new(node),
            ready,
        }
    }

    /// Wait until this module's next allowed sequence number equals `run`.
    ///
    /// Exact equality, not `>=`: sequence numbers are consumed exactly once
    /// and in order, and a slot past `run` would mean the caller's turn was
    /// stolen.
    async fn wait_turn(&self, run: u64) {
        let mut rx = self.ready.subscribe();
        while *rx.borrow_and_update() != run {
            // The sender lives in the same struct, so this only fails while
            // the chain itself is being torn down.
            if rx.changed().await.is_err() {
                return;
            }
        }
    }

    /// Mark sequence number `run` as handled and wake all waiters.
    fn advance(&self, run: u64) {
        self.ready.send_replace(run + 1);
    }

    fn ready_run(&self) -> u64 {
        *self.ready.borrow()
    }
}

/// Registration of one in-flight exec call.
///
/// The increment happens before any work and the decrement on every exit
/// path, success or failure, so enable/disable waiting for the in-flight
/// count to reach zero always observes this call.
struct ExecRegistration<'a> {
    count: &'a watch::Sender<usize>,
}

impl<'a> ExecRegistration<'a> {
    fn register(count: &'a watch::Sender<usize>) -> Self {
        count.send_modify(|n| *n += 1);
        Self { count }
    }
}

impl Drop for ExecRegistration<'_> {
    fn drop(&mut self) {
        self.count.send_modify(|n| *n -= 1);
    }
}

/// An ordered pipeline of modules executed once per trigger.
///
/// Built disabled by [`build_chain`](crate::engine::build_chain); call
/// [`enable`](Chain::enable) before the first [`exec`](Chain::exec). The
/// module sequence is fixed for the lifetime of the chain.
pub struct Chain {
    name: String,
    group: Option<String>,
    modules: Vec<ModuleSlot>,
    id_increase: u64,
    id_source: Arc<IdGenerator>,
    next_run: AtomicU64,
    admission: std::sync::Mutex<()>,
    enabled: AtomicBool,
    in_flight: watch::Sender<usize>,
    lifecycle: Mutex<()>,
}

impl std::fmt::Debug for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chain")
            .field("name", &self.name)
            .field("group", &self.group)
            .finish_non_exhaustive()
    }
}

impl Chain {
    pub(crate) fn new(
        name: String,
        group: Option<String>,
        nodes: Vec<ModuleNode>,
        id_increase: u64,
        id_source: Arc<IdGenerator>,
    ) -> Self {
        let (in_flight, _) = watch::channel(0);
        Self {
            name,
            group,
            modules: nodes.into_iter().map(ModuleSlot::new).collect(),
            id_increase,
            id_source,
            next_run: AtomicU64::new(0),
            admission: std::sync::Mutex::new(()),
            enabled: AtomicBool::new(false),
            in_flight,
            lifecycle: Mutex::new(()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    /// Number of modules in the chain.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Total id range reserved per trigger: the product of every module's
    /// id-increase, unless the descriptor overrode it.
    pub fn id_increase(&self) -> u64 {
        self.id_increase
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// Trigger one run through the chain.
    ///
    /// Allocates a run id, claims the next sequence number, and walks the
    /// modules in position order under the pipeline protocol. Returns the
    /// allocated run id on success.
    ///
    /// On a module failure the remaining modules receive their cleanup call
    /// for this run (mandatory, so their slots still advance), then the
    /// error is returned. Concurrent callers are unaffected: their runs keep
    /// flowing behind this one.
    ///
    /// The enabled check and the in-flight registration are two separate
    /// steps: a [`disable`](Chain::disable) racing a just-admitted call can
    /// observe an in-flight count of zero and start disabling while this run
    /// still executes. Callers that need that window closed must serialize
    /// their triggers against lifecycle calls themselves.
    pub async fn exec(&self) -> Result<u64, ExecError> {
        if !self.enabled.load(Ordering::Acquire) {
            return Err(ExecError::NotEnabled {
                chain: self.name.clone(),
            });
        }

        let _registration = ExecRegistration::register(&self.in_flight);

        // Id and sequence number are claimed as a pair, so the total order of
        // allocated ids matches the total order of sequence numbers.
        let (id, run) = {
            let _admission = self
                .admission
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            let id = self.id_source.allocate(self.id_increase);
            let run = self.next_run.fetch_add(1, Ordering::SeqCst);
            (id, run)
        };

        let started = ChainExecStarted {
            chain: &self.name,
            id,
            run,
        };
        let span = started.span("chain_exec");
        started.log();
        let begun = Instant::now();

        match self.run_modules(id, run).instrument(span.clone()).await {
            Ok(()) => {
                ChainExecCompleted {
                    chain: &self.name,
                    id,
                    run,
                    duration: begun.elapsed(),
                }
                .log();
                Ok(id)
            }
            Err(error) => {
                self.cleanup_run(id, run).instrument(span).await;
                ChainExecFailed {
                    chain: &self.name,
                    id,
                    run,
                    error: &error,
                }
                .log();
                Err(error)
            }
        }
    }

    async fn run_modules(&self, id: u64, run: u64) -> Result<(), ExecError> {
        for (number, slot) in self.modules.iter().enumerate() {
            slot.wait_turn(run).await;

            let mut node = slot.node.lock().await;
            node.set_id(id);
            let module = node.name().to_string();

            ModuleHookStarted {
                action: "exec",
                chain: &self.name,
                module: &module,
                number,
                id: Some(id),
            }
            .log();
            let begun = Instant::now();

            match node.exec().await {
                Ok(()) => {
                    ModuleHookCompleted {
                        action: "exec",
                        chain: &self.name,
                        module: &module,
                        number,
                        id: Some(id),
                        duration: begun.elapsed(),
                    }
                    .log();
                    drop(node);
                    slot.advance(run);
                }
                Err(source) => {
                    ModuleHookFailed {
                        action: "exec",
                        chain: &self.name,
                        module: &module,
                        number,
                        id: Some(id),
                        error: &source,
                    }
                    .log();
                    // No advance here: the cleanup cascade handles this
                    // module's slot along with the rest of the tail.
                    drop(node);
                    return Err(ExecError::ModuleFailed {
                        chain: self.name.clone(),
                        module,
                        number,
                        id,
                        source,
                    });
                }
            }
        }
        Ok(())
    }

    /// Give every module that has not finished `run` its cleanup call,
    /// following the same wait-for-turn / advance protocol as execution.
    async fn cleanup_run(&self, id: u64, run: u64) {
        for (number, slot) in self.modules.iter().enumerate() {
            // Exec was successful for this module.
            if slot.ready_run() >= run + 1 {
                continue;
            }

            slot.wait_turn(run).await;

            let mut node = slot.node.lock().await;
            let module = node.name().to_string();
            ModuleHookStarted {
                action: "cleanup",
                chain: &self.name,
                module: &module,
                number,
                id: Some(id),
            }
            .log();
            let begun = Instant::now();
            node.cleanup(id);
            ModuleHookCompleted {
                action: "cleanup",
                chain: &self.name,
                module: &module,
                number,
                id: Some(id),
                duration: begun.elapsed(),
            }
            .log();
            drop(node);
            slot.advance(run);
        }
    }

    /// Enable every module in position order.
    ///
    /// No-op if already enabled. Waits until no exec call is in flight. If a
    /// module's enable hook fails, every module enabled so far is disabled
    /// again in enable order and the error is returned; the chain stays
    /// disabled.
    pub async fn enable(&self) -> Result<(), EnableError> {
        let _lifecycle = self.lifecycle.lock().await;
        if self.enabled.load(Ordering::Acquire) {
            return Ok(());
        }

        self.wait_idle().await;

        let mut enabled_count = 0;
        for (number, slot) in self.modules.iter().enumerate() {
            let mut node = slot.node.lock().await;
            let module = node.name().to_string();

            ModuleHookStarted {
                action: "enable",
                chain: &self.name,
                module: &module,
                number,
                id: None,
            }
            .log();
            let begun = Instant::now();

            match node.enable().await {
                Ok(()) => {
                    ModuleHookCompleted {
                        action: "enable",
                        chain: &self.name,
                        module: &module,
                        number,
                        id: None,
                        duration: begun.elapsed(),
                    }
                    .log();
                    enabled_count = number + 1;
                }
                Err(source) => {
                    ModuleHookFailed {
                        action: "enable",
                        chain: &self.name,
                        module: &module,
                        number,
                        id: None,
                        error: &source,
                    }
                    .log();
                    drop(node);
                    self.rollback_enable(enabled_count, &module).await;
                    return Err(EnableError::ModuleEnableFailed {
                        chain: self.name.clone(),
                        module,
                        number,
                        source,
                    });
                }
            }
        }

        self.enabled.store(true, Ordering::Release);
        ChainEnabled {
            chain: &self.name,
            modules: self.modules.len(),
        }
        .log();
        Ok(())
    }

    async fn rollback_enable(&self, enabled_count: usize, failed_module: &str) {
        for (number, slot) in self.modules.iter().take(enabled_count).enumerate() {
            let mut node = slot.node.lock().await;
            let module = node.name().to_string();
            node.disable();
            ModuleEnableRolledBack {
                chain: &self.name,
                module: &module,
                number,
                failed_module,
            }
            .log();
        }
    }

    /// Disable every module in position order.
    ///
    /// No-op if already disabled; the check-and-clear is atomic, so
    /// concurrent disable calls run the module hooks exactly once. Waits
    /// until no exec call is in flight. Disable hooks cannot fail.
    pub async fn disable(&self) {
        let _lifecycle = self.lifecycle.lock().await;
        if !self.enabled.swap(false, Ordering::AcqRel) {
            return;
        }

        self.wait_idle().await;

        for (number, slot) in self.modules.iter().enumerate() {
            let mut node = slot.node.lock().await;
            let module = node.name().to_string();
            let begun = Instant::now();
            node.disable();
            ModuleHookCompleted {
                action: "disable",
                chain: &self.name,
                module: &module,
                number,
                id: None,
                duration: begun.elapsed(),
            }
            .log();
        }

        ChainDisabled { chain: &self.name }.log();
    }

    /// Block until the in-flight exec count is zero.
    async fn wait_idle(&self) {
        let mut rx = self.in_flight.subscribe();
        while *rx.borrow_and_update() != 0 {
            if rx.changed().await.is_err() {
                return;
            }
        }
    }
}

impl Drop for Chain {
    /// A dropped chain disables its modules. At drop time no exec call can
    /// be in flight (they all borrow the chain), so the module locks are
    /// free.
    fn drop(&mut self) {
        if !self.enabled.swap(false, Ordering::AcqRel) {
            return;
        }
        for slot in &self.modules {
            if let Ok(mut node) = slot.node.try_lock() {
                node.disable();
            }
        }
        ChainDisabled { chain: &self.name }.log();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::module::{ModuleContext, Ports};
    use crate::errors::ModuleError;
    use crate::traits::Module;
    use async_trait::async_trait;
    use std::sync::Mutex as StdMutex;
    use std::time::Duration;

    /// Shared event journal: (module label, action, id).
    #[derive(Clone, Default)]
    struct Events(Arc<StdMutex<Vec<(&'static str, &'static str, u64)>>>);

    impl Events {
        fn push(&self, module: &'static str, action: &'static str, id: u64) {
            self.0.lock().unwrap().push((module, action, id));
        }

        fn snapshot(&self) -> Vec<(&'static str, &'static str, u64)> {
            self.0.lock().unwrap().clone()
        }

        fn ids(&self, module: &'static str, action: &'static str) -> Vec<u64> {
            self.snapshot()
                .into_iter()
                .filter(|(m, a, _)| *m == module && *a == action)
                .map(|(_, _, id)| id)
                .collect()
        }
    }

    struct TestModule {
        label: &'static str,
        events: Events,
        delay: Option<Duration>,
        fail_on_call: Option<u64>,
        fail_enable: bool,
        calls: u64,
    }

    impl TestModule {
        fn new(label: &'static str, events: &Events) -> Self {
            Self {
                label,
                events: events.clone(),
                delay: None,
                fail_on_call: None,
                fail_enable: false,
                calls: 0,
            }
        }

        fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        fn failing_on_call(mut self, call: u64) -> Self {
            self.fail_on_call = Some(call);
            self
        }

        fn with_failing_enable(mut self) -> Self {
            self.fail_enable = true;
            self
        }
    }

    #[async_trait]
    impl Module for TestModule {
        async fn exec(&mut self, ctx: &ModuleContext<'_>) -> Result<(), ModuleError> {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            let call = self.calls;
            self.calls += 1;
            if self.fail_on_call == Some(call) {
                return Err(ModuleError::failed("synthetic failure"));
            }
            self.events.push(self.label, "exec", ctx.id());
            Ok(())
        }

        async fn enable(&mut self) -> Result<(), ModuleError> {
            if self.fail_enable {
                return Err(ModuleError::failed("enable refused"));
            }
            self.events.push(self.label, "enable", 0);
            Ok(())
        }

        fn disable(&mut self) {
            self.events.push(self.label, "disable", 0);
        }

        fn cleanup(&mut self, id: u64) {
            self.events.push(self.label, "cleanup", id);
        }
    }

    fn test_chain(ids: Arc<IdGenerator>, modules: Vec<(TestModule, u64)>) -> Chain {
        let chain_increase = modules.iter().map(|(_, inc)| *inc).product::<u64>().max(1);
        let nodes = modules
            .into_iter()
            .enumerate()
            .map(|(number, (module, increase))| {
                ModuleNode::new(
                    "test_module".to_string(),
                    "test_chain".to_string(),
                    module.label.to_string(),
                    number,
                    increase,
                    Ports::empty(),
                    Box::new(module),
                )
            })
            .collect();
        Chain::new("test_chain".to_string(), None, nodes, chain_increase, ids)
    }

    #[tokio::test]
    async fn exec_on_disabled_chain_fails_before_any_side_effect() {
        let events = Events::default();
        let ids = Arc::new(IdGenerator::new());
        let chain = test_chain(
            Arc::clone(&ids),
            vec![(TestModule::new("a", &events), 1)],
        );

        let err = chain.exec().await.unwrap_err();
        assert!(matches!(err, ExecError::NotEnabled { .. }));
        assert!(events.snapshot().is_empty());
        // No id was allocated for the rejected call.
        assert_eq!(ids.allocate(1), 0);
    }

    #[tokio::test]
    async fn exec_walks_modules_in_position_order() {
        let events = Events::default();
        let chain = test_chain(
            Arc::new(IdGenerator::new()),
            vec![
                (TestModule::new("a", &events), 1),
                (TestModule::new("b", &events), 1),
                (TestModule::new("c", &events), 1),
            ],
        );

        chain.enable().await.unwrap();
        let id = chain.exec().await.unwrap();
        assert_eq!(id, 0);

        let execs: Vec<_> = events
            .snapshot()
            .into_iter()
            .filter(|(_, action, _)| *action == "exec")
            .collect();
        assert_eq!(execs, vec![("a", "exec", 0), ("b", "exec", 0), ("c", "exec", 0)]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_triggers_keep_per_module_sequence_order() {
        let events = Events::default();
        let chain = Arc::new(test_chain(
            Arc::new(IdGenerator::new()),
            vec![
                (TestModule::new("a", &events).with_delay(Duration::from_millis(2)), 1),
                (TestModule::new("b", &events), 1),
                (TestModule::new("c", &events).with_delay(Duration::from_millis(1)), 1),
            ],
        ));
        chain.enable().await.unwrap();

        let mut handles = Vec::new();
        for _ in 0..16 {
            let chain = Arc::clone(&chain);
            handles.push(tokio::spawn(async move { chain.exec().await }));
        }
        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap().unwrap());
        }

        // Disjoint single-id ranges, one per trigger.
        ids.sort_unstable();
        assert_eq!(ids, (0..16).collect::<Vec<u64>>());

        // Every module saw the runs in strictly increasing id order, which
        // equals sequence order because ids and sequence numbers are claimed
        // as a pair.
        for module in ["a", "b", "c"] {
            let seen = events.ids(module, "exec");
            assert_eq!(seen.len(), 16, "module {module} missed runs");
            assert!(
                seen.windows(2).all(|w| w[0] < w[1]),
                "module {module} ran out of order: {seen:?}"
            );
        }
    }

    #[tokio::test]
    async fn failed_module_triggers_cleanup_for_itself_and_the_tail() {
        let events = Events::default();
        let chain = test_chain(
            Arc::new(IdGenerator::new()),
            vec![
                (TestModule::new("a", &events), 1),
                (TestModule::new("b", &events).failing_on_call(1), 1),
                (TestModule::new("c", &events), 1),
            ],
        );
        chain.enable().await.unwrap();

        chain.exec().await.unwrap();
        let err = chain.exec().await.unwrap_err();
        match &err {
            ExecError::ModuleFailed { module, number, id, .. } => {
                assert_eq!(module, "b");
                assert_eq!(*number, 1);
                assert_eq!(*id, 1);
            }
            other => panic!("unexpected error {other}"),
        }
        // The failed run does not poison the pipeline.
        chain.exec().await.unwrap();

        // Module a completed run 1 normally before b failed.
        assert_eq!(events.ids("a", "exec"), vec![0, 1, 2]);
        assert_eq!(events.ids("a", "cleanup"), Vec::<u64>::new());
        // b and c each received exactly one cleanup for the failed id and
        // never executed it.
        assert_eq!(events.ids("b", "exec"), vec![0, 2]);
        assert_eq!(events.ids("b", "cleanup"), vec![1]);
        assert_eq!(events.ids("c", "exec"), vec![0, 2]);
        assert_eq!(events.ids("c", "cleanup"), vec![1]);
    }

    #[tokio::test]
    async fn enable_failure_rolls_back_in_enable_order_and_chain_stays_disabled() {
        let events = Events::default();
        let chain = test_chain(
            Arc::new(IdGenerator::new()),
            vec![
                (TestModule::new("a", &events), 1),
                (TestModule::new("b", &events), 1),
                (TestModule::new("c", &events).with_failing_enable(), 1),
            ],
        );

        let err = chain.enable().await.unwrap_err();
        let EnableError::ModuleEnableFailed { module, number, .. } = &err;
        assert_eq!(module, "c");
        assert_eq!(*number, 2);

        let actions: Vec<_> = events
            .snapshot()
            .into_iter()
            .map(|(m, a, _)| (m, a))
            .collect();
        assert_eq!(
            actions,
            vec![
                ("a", "enable"),
                ("b", "enable"),
                ("a", "disable"),
                ("b", "disable"),
            ]
        );

        assert!(!chain.is_enabled());
        let err = chain.exec().await.unwrap_err();
        assert!(matches!(err, ExecError::NotEnabled { .. }));
    }

    #[tokio::test]
    async fn disable_twice_runs_module_hooks_once() {
        let events = Events::default();
        let chain = test_chain(
            Arc::new(IdGenerator::new()),
            vec![(TestModule::new("a", &events), 1)],
        );
        chain.enable().await.unwrap();

        chain.disable().await;
        chain.disable().await;

        let disables = events
            .snapshot()
            .into_iter()
            .filter(|(_, action, _)| *action == "disable")
            .count();
        assert_eq!(disables, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn disable_waits_for_in_flight_exec() {
        let events = Events::default();
        let chain = Arc::new(test_chain(
            Arc::new(IdGenerator::new()),
            vec![(
                TestModule::new("slow", &events).with_delay(Duration::from_millis(50)),
                1,
            )],
        ));
        chain.enable().await.unwrap();

        let exec_chain = Arc::clone(&chain);
        let in_flight = tokio::spawn(async move { exec_chain.exec().await });
        // Give the exec call time to register.
        tokio::time::sleep(Duration::from_millis(10)).await;

        chain.disable().await;

        // The run completed before any module was disabled.
        let actions: Vec<_> = events
            .snapshot()
            .into_iter()
            .map(|(_, action, _)| action)
            .collect();
        assert_eq!(actions, vec!["enable", "exec", "disable"]);
        in_flight.await.unwrap().unwrap();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn enable_waits_for_in_flight_exec() {
        let events = Events::default();
        let chain = Arc::new(test_chain(
            Arc::new(IdGenerator::new()),
            vec![(
                TestModule::new("slow", &events).with_delay(Duration::from_millis(50)),
                1,
            )],
        ));
        chain.enable().await.unwrap();

        let exec_chain = Arc::clone(&chain);
        let in_flight = tokio::spawn(async move { exec_chain.exec().await });
        tokio::time::sleep(Duration::from_millis(10)).await;

        // Disable swaps the flag and parks waiting for the run to drain;
        // enable then queues on the lifecycle lock behind it.
        let disable_chain = Arc::clone(&chain);
        let disabling = tokio::spawn(async move { disable_chain.disable().await });
        tokio::time::sleep(Duration::from_millis(10)).await;

        chain.enable().await.unwrap();
        in_flight.await.unwrap().unwrap();
        disabling.await.unwrap();

        // The in-flight run completed before any lifecycle hook ran.
        let actions: Vec<_> = events
            .snapshot()
            .into_iter()
            .map(|(_, action, _)| action)
            .collect();
        assert_eq!(actions, vec!["enable", "exec", "disable", "enable"]);

        // The re-enabled chain accepts triggers again.
        assert!(chain.is_enabled());
        chain.exec().await.unwrap();
    }

    #[tokio::test]
    async fn chain_id_increase_reserves_one_block_per_trigger() {
        let events = Events::default();
        let ids = Arc::new(IdGenerator::new());
        let chain = test_chain(
            Arc::clone(&ids),
            vec![
                (TestModule::new("a", &events), 2),
                (TestModule::new("b", &events), 3),
            ],
        );
        assert_eq!(chain.id_increase(), 6);
        chain.enable().await.unwrap();

        assert_eq!(chain.exec().await.unwrap(), 0);
        assert_eq!(chain.exec().await.unwrap(), 6);
        assert_eq!(ids.allocate(1), 12);
    }
}
