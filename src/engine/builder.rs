// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Chain construction: factory invocation, port materialization, and
//! variable wiring.
//!
//! Wiring works on published variables: each output wiring publishes a
//! variable name, each input wiring of a later module consumes one. The last
//! subscriber of a variable in chain position order becomes the `Owned` edge
//! of the producing output; every earlier subscriber gets a `Shared` edge.
//! Which edge owns is therefore fixed here, once, and never recomputed while
//! the chain runs.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::config::{ChainDescriptor, MakeData, ModuleRegistry};
use crate::engine::chain::Chain;
use crate::engine::id_generator::IdGenerator;
use crate::engine::module::{ModuleNode, Ports};
use crate::engine::ports::{InputPort, OutputPort, Ownership};
use crate::errors::BuildError;
use crate::traits::Module;

struct PendingModule {
    type_name: String,
    name: String,
    id_increase: u64,
    handler: Box<dyn Module>,
    inputs: HashMap<String, Arc<InputPort>>,
    outputs: HashMap<String, OutputPort>,
}

struct VariableEntry {
    producer: usize,
    output: String,
    /// (consumer position, input port name), in chain position order.
    subscribers: Vec<(usize, String)>,
}

/// Build a fully wired, disabled chain from its merged descriptor.
///
/// `group` applies when the descriptor does not carry its own group name.
pub fn build_chain(
    registry: &ModuleRegistry,
    descriptor: &ChainDescriptor,
    id_source: Arc<IdGenerator>,
    group: Option<&str>,
) -> Result<Chain, BuildError> {
    let chain_name = &descriptor.name;

    // Construct every module through its factory and materialize its ports.
    let mut pending: Vec<PendingModule> = Vec::with_capacity(descriptor.modules.len());
    for (number, md) in descriptor.modules.iter().enumerate() {
        if pending.iter().any(|p| p.name == md.name) {
            return Err(BuildError::DuplicateModuleName {
                chain: chain_name.clone(),
                module: md.name.clone(),
            });
        }
        if number == 0 && !md.inputs.is_empty() {
            return Err(BuildError::FirstModuleWithInputs {
                chain: chain_name.clone(),
                module: md.name.clone(),
            });
        }

        let maker = registry
            .get(&md.type_name)
            .ok_or_else(|| BuildError::UnknownModuleType {
                chain: chain_name.clone(),
                module: md.name.clone(),
                type_name: md.type_name.clone(),
            })?;

        let data = MakeData {
            type_name: md.type_name.clone(),
            chain: chain_name.clone(),
            name: md.name.clone(),
            number,
            inputs: md.inputs.keys().cloned().collect(),
            outputs: md.outputs.keys().cloned().collect(),
            parameters: md.parameters.clone(),
            is_first: number == 0,
        };
        let seed = maker(&data)?;
        let (handler, input_decls, output_decls, id_increase) = seed.into_parts();

        let mut inputs = HashMap::new();
        for decl in input_decls {
            if inputs.contains_key(&decl.name) {
                return Err(BuildError::DuplicatePortName {
                    chain: chain_name.clone(),
                    module: md.name.clone(),
                    port: decl.name,
                });
            }
            inputs.insert(
                decl.name.clone(),
                Arc::new(InputPort::new(decl.name, decl.accepts)),
            );
        }

        let mut outputs = HashMap::new();
        for decl in output_decls {
            if outputs.contains_key(&decl.name) || inputs.contains_key(&decl.name) {
                return Err(BuildError::DuplicatePortName {
                    chain: chain_name.clone(),
                    module: md.name.clone(),
                    port: decl.name,
                });
            }
            outputs.insert(decl.name.clone(), OutputPort::new(decl.name, decl.produces));
        }

        // Every wiring must reference a declared port.
        for local in md.inputs.keys() {
            if !inputs.contains_key(local) {
                return Err(BuildError::UnknownInputPort {
                    chain: chain_name.clone(),
                    module: md.name.clone(),
                    port: local.clone(),
                });
            }
        }
        for local in md.outputs.keys() {
            if !outputs.contains_key(local) {
                return Err(BuildError::UnknownOutputPort {
                    chain: chain_name.clone(),
                    module: md.name.clone(),
                    port: local.clone(),
                });
            }
        }

        pending.push(PendingModule {
            type_name: md.type_name.clone(),
            name: md.name.clone(),
            id_increase,
            handler,
            inputs,
            outputs,
        });
    }

    // Resolve variables in position order: a module's inputs may only
    // consume variables published by earlier modules.
    let mut variables: BTreeMap<String, VariableEntry> = BTreeMap::new();
    for (number, md) in descriptor.modules.iter().enumerate() {
        for (local, variable) in &md.inputs {
            let entry =
                variables
                    .get_mut(variable)
                    .ok_or_else(|| BuildError::UnresolvedVariable {
                        chain: chain_name.clone(),
                        module: md.name.clone(),
                        input: local.clone(),
                        variable: variable.clone(),
                    })?;
            entry.subscribers.push((number, local.clone()));
        }
        for (local, variable) in &md.outputs {
            if variables.contains_key(variable) {
                return Err(BuildError::DuplicateVariable {
                    chain: chain_name.clone(),
                    variable: variable.clone(),
                });
            }
            variables.insert(
                variable.clone(),
                VariableEntry {
                    producer: number,
                    output: local.clone(),
                    subscribers: Vec::new(),
                },
            );
        }
    }

    // Type-check each edge and decide its hand-off mode, then connect.
    let mut connections: Vec<(usize, String, Arc<InputPort>, Ownership)> = Vec::new();
    for (variable, entry) in &variables {
        let produces = pending[entry.producer].outputs[&entry.output]
            .produces()
            .to_vec();
        let last = entry.subscribers.len().saturating_sub(1);
        for (position, (consumer, input_name)) in entry.subscribers.iter().enumerate() {
            let input = &pending[*consumer].inputs[input_name];
            for tag in &produces {
                if !input.accepts_type(*tag) {
                    return Err(BuildError::TypeMismatch {
                        chain: chain_name.clone(),
                        variable: variable.clone(),
                        producer: pending[entry.producer].name.clone(),
                        consumer: pending[*consumer].name.clone(),
                        input: input_name.clone(),
                        type_name: tag.name().to_string(),
                    });
                }
            }
            let ownership = if position == last {
                Ownership::Owned
            } else {
                Ownership::Shared
            };
            connections.push((
                entry.producer,
                entry.output.clone(),
                Arc::clone(input),
                ownership,
            ));
        }
    }
    for (producer, output, input, ownership) in connections {
        let module_name = pending[producer].name.clone();
        match pending[producer].outputs.get_mut(&output) {
            Some(port) => port.connect(input, ownership)?,
            None => {
                return Err(BuildError::UnknownOutputPort {
                    chain: chain_name.clone(),
                    module: module_name,
                    port: output,
                })
            }
        }
    }

    let id_increase = descriptor
        .id_increase
        .unwrap_or_else(|| pending.iter().map(|p| p.id_increase).product());

    // Assemble the nodes and give each module its input_ready call now that
    // the wiring is final.
    let mut nodes = Vec::with_capacity(pending.len());
    for (number, module) in pending.into_iter().enumerate() {
        let mut node = ModuleNode::new(
            module.type_name,
            chain_name.clone(),
            module.name,
            number,
            module.id_increase,
            Ports::new(module.inputs, module.outputs),
            module.handler,
        );
        node.input_ready();
        nodes.push(node);
    }

    let group = descriptor
        .group
        .clone()
        .or_else(|| group.map(str::to_string));

    Ok(Chain::new(
        chain_name.clone(),
        group,
        nodes,
        id_increase.max(1),
        id_source,
    ))
}
