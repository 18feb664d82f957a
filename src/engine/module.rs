// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Chain-owned module units and the port access handed to hooks.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use crate::engine::ports::{InputPort, OutputPort};
use crate::errors::ModuleError;
use crate::traits::Module;

/// The wired input and output ports of one module.
pub struct Ports {
    inputs: HashMap<String, Arc<InputPort>>,
    outputs: HashMap<String, OutputPort>,
}

impl Ports {
    pub(crate) fn new(
        inputs: HashMap<String, Arc<InputPort>>,
        outputs: HashMap<String, OutputPort>,
    ) -> Self {
        Self { inputs, outputs }
    }

    pub(crate) fn empty() -> Self {
        Self {
            inputs: HashMap::new(),
            outputs: HashMap::new(),
        }
    }

    pub fn input(&self, name: &str) -> Option<&InputPort> {
        self.inputs.get(name).map(Arc::as_ref)
    }

    pub fn output(&self, name: &str) -> Option<&OutputPort> {
        self.outputs.get(name)
    }

    pub fn input_count(&self) -> usize {
        self.inputs.len()
    }

    pub(crate) fn inputs(&self) -> impl Iterator<Item = &Arc<InputPort>> {
        self.inputs.values()
    }
}

/// Port and id access handed to a module hook while it runs.
///
/// The current run id is only valid for the duration of the hook invocation;
/// a module must not cache it across triggers.
pub struct ModuleContext<'a> {
    id: u64,
    id_increase: u64,
    ports: &'a Ports,
}

impl<'a> ModuleContext<'a> {
    pub(crate) fn new(id: u64, id_increase: u64, ports: &'a Ports) -> Self {
        Self {
            id,
            id_increase,
            ports,
        }
    }

    /// The run id assigned to the current trigger. The module may also use
    /// the ids up to `id() + id_increase - 1`; that range is reserved for it.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn id_increase(&self) -> u64 {
        self.id_increase
    }

    pub fn input(&self, name: &str) -> Result<&InputPort, ModuleError> {
        self.ports
            .input(name)
            .ok_or_else(|| ModuleError::UnknownInput(name.to_string()))
    }

    pub fn output(&self, name: &str) -> Result<&OutputPort, ModuleError> {
        self.ports
            .output(name)
            .ok_or_else(|| ModuleError::UnknownOutput(name.to_string()))
    }

    /// Take the value buffered on `input` for the current run id.
    pub fn take<T>(&self, input: &str) -> Result<T, ModuleError>
    where
        T: Any + Send + Sync + Clone,
    {
        match self.try_take(input)? {
            Some(value) => Ok(value),
            None => Err(ModuleError::MissingInput {
                input: input.to_string(),
                id: self.id,
            }),
        }
    }

    /// Like [`take`](Self::take), but `Ok(None)` when nothing is buffered for
    /// the current run id (for inputs a module treats as optional).
    pub fn try_take<T>(&self, input: &str) -> Result<Option<T>, ModuleError>
    where
        T: Any + Send + Sync + Clone,
    {
        let port = self.input(input)?;
        let packet = match port.take(self.id) {
            Some(packet) => packet,
            None => return Ok(None),
        };
        let actual = packet.tag().name();
        match packet.into_value::<T>() {
            Some(value) => Ok(Some(value)),
            None => Err(ModuleError::InputTypeMismatch {
                input: input.to_string(),
                id: self.id,
                expected: std::any::type_name::<T>(),
                actual,
            }),
        }
    }

    /// Fire `output` with the current run id.
    pub fn fire<T: Any + Send + Sync>(&self, output: &str, value: T) -> Result<(), ModuleError> {
        self.output(output)?.fire(self.id, value)
    }

    /// Fire `output` with an explicit id inside this trigger's reserved range.
    ///
    /// For modules with an id-increase greater than 1 that expand one trigger
    /// into several output items.
    pub fn fire_at<T: Any + Send + Sync>(
        &self,
        output: &str,
        id: u64,
        value: T,
    ) -> Result<(), ModuleError> {
        let end = self.id + self.id_increase;
        if id < self.id || id >= end {
            return Err(ModuleError::IdOutOfRange {
                id,
                first: self.id,
                end,
            });
        }
        self.output(output)?.fire(id, value)
    }
}

/// One stage of a chain: the handler implementing [`Module`] plus the fixed
/// identity and wiring the chain gave it at construction.
pub struct ModuleNode {
    type_name: String,
    chain: String,
    name: String,
    number: usize,
    id_increase: u64,
    id: u64,
    ports: Ports,
    handler: Box<dyn Module>,
}

impl ModuleNode {
    pub(crate) fn new(
        type_name: String,
        chain: String,
        name: String,
        number: usize,
        id_increase: u64,
        ports: Ports,
        handler: Box<dyn Module>,
    ) -> Self {
        Self {
            type_name,
            chain,
            name,
            number,
            id_increase,
            id: 0,
            ports,
            handler,
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn chain(&self) -> &str {
        &self.chain
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Position in the chain; the first module is 0.
    pub fn number(&self) -> usize {
        self.number
    }

    pub fn id_increase(&self) -> u64 {
        self.id_increase
    }

    /// The run id currently assigned; only meaningful while an exec or
    /// cleanup invocation is active.
    pub fn current_id(&self) -> u64 {
        self.id
    }

    pub fn ports(&self) -> &Ports {
        &self.ports
    }

    pub(crate) fn set_id(&mut self, id: u64) {
        self.id = id;
    }

    pub(crate) async fn exec(&mut self) -> Result<(), ModuleError> {
        let ctx = ModuleContext::new(self.id, self.id_increase, &self.ports);
        self.handler.exec(&ctx).await
    }

    pub(crate) async fn enable(&mut self) -> Result<(), ModuleError> {
        self.handler.enable().await
    }

    pub(crate) fn disable(&mut self) {
        self.handler.disable();
    }

    /// Evict every buffered input item with id <= `id`, then give the handler
    /// its cleanup hook. Infallible: this runs while a failed run is being
    /// recovered.
    pub(crate) fn cleanup(&mut self, id: u64) -> usize {
        self.id = id;
        let mut evicted = 0;
        for input in self.ports.inputs() {
            evicted += input.evict_through(id);
        }
        self.handler.cleanup(id);
        evicted
    }

    pub(crate) fn input_ready(&mut self) {
        self.handler.input_ready();
    }
}
