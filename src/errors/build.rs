// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;

/// Errors detected while constructing a chain from its descriptor.
///
/// All of these are fatal to the build of that chain; a chain that failed to
/// build is never enabled and never executes.
#[derive(Debug)]
pub enum BuildError {
    /// The registry has no factory for the requested module type
    UnknownModuleType {
        chain: String,
        module: String,
        type_name: String,
    },
    /// A factory was registered twice under the same type name
    DuplicateModuleType {
        type_name: String,
    },
    /// Two modules in the same chain share an instance name
    DuplicateModuleName {
        chain: String,
        module: String,
    },
    /// A module declared two ports with the same name
    DuplicatePortName {
        chain: String,
        module: String,
        port: String,
    },
    /// An input wiring references a port the module does not declare
    UnknownInputPort {
        chain: String,
        module: String,
        port: String,
    },
    /// An output wiring references a port the module does not declare
    UnknownOutputPort {
        chain: String,
        module: String,
        port: String,
    },
    /// The first module of a chain has input wirings, but nothing upstream
    /// can ever produce data for them
    FirstModuleWithInputs {
        chain: String,
        module: String,
    },
    /// A module type that requires input data was placed at the start of
    /// a chain
    ModuleAsChainStart {
        chain: String,
        module: String,
        type_name: String,
    },
    /// Two outputs publish the same variable name
    DuplicateVariable {
        chain: String,
        variable: String,
    },
    /// An input wiring consumes a variable no earlier module publishes
    UnresolvedVariable {
        chain: String,
        module: String,
        input: String,
        variable: String,
    },
    /// An output may produce a type its subscriber does not accept
    TypeMismatch {
        chain: String,
        variable: String,
        producer: String,
        consumer: String,
        input: String,
        type_name: String,
    },
    /// More than one subscriber of an output was marked as the owning edge
    DuplicateOwnedSubscriber {
        output: String,
    },
    /// A module factory rejected its parameters
    InvalidParameter {
        chain: String,
        module: String,
        parameter: String,
        reason: String,
    },
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::UnknownModuleType {
                chain,
                module,
                type_name,
            } => {
                write!(
                    f,
                    "Module '{}' in chain '{}' has unknown type '{}'",
                    module, chain, type_name
                )
            }
            BuildError::DuplicateModuleType { type_name } => {
                write!(f, "Module type '{}' is already registered", type_name)
            }
            BuildError::DuplicateModuleName { chain, module } => {
                write!(f, "Duplicate module name '{}' in chain '{}'", module, chain)
            }
            BuildError::DuplicatePortName {
                chain,
                module,
                port,
            } => {
                write!(
                    f,
                    "Duplicate port name '{}' on module '{}' in chain '{}'",
                    port, module, chain
                )
            }
            BuildError::UnknownInputPort {
                chain,
                module,
                port,
            } => {
                write!(
                    f,
                    "Module '{}' in chain '{}' wires input '{}' which it does not declare",
                    module, chain, port
                )
            }
            BuildError::UnknownOutputPort {
                chain,
                module,
                port,
            } => {
                write!(
                    f,
                    "Module '{}' in chain '{}' wires output '{}' which it does not declare",
                    module, chain, port
                )
            }
            BuildError::FirstModuleWithInputs { chain, module } => {
                write!(
                    f,
                    "Module '{}' is first in chain '{}' but has input wirings; \
                     no earlier module can produce data for them",
                    module, chain
                )
            }
            BuildError::ModuleAsChainStart {
                chain,
                module,
                type_name,
            } => {
                write!(
                    f,
                    "Module type '{}' can not be used as start of chain '{}' (module '{}')",
                    type_name, chain, module
                )
            }
            BuildError::DuplicateVariable { chain, variable } => {
                write!(
                    f,
                    "Variable '{}' is published more than once in chain '{}'",
                    variable, chain
                )
            }
            BuildError::UnresolvedVariable {
                chain,
                module,
                input,
                variable,
            } => {
                write!(
                    f,
                    "Input '{}' of module '{}' in chain '{}' consumes variable '{}' \
                     which no earlier module publishes",
                    input, module, chain, variable
                )
            }
            BuildError::TypeMismatch {
                chain,
                variable,
                producer,
                consumer,
                input,
                type_name,
            } => {
                write!(
                    f,
                    "Variable '{}' in chain '{}' may carry type {} produced by '{}', \
                     which input '{}' of module '{}' does not accept",
                    variable, chain, type_name, producer, input, consumer
                )
            }
            BuildError::DuplicateOwnedSubscriber { output } => {
                write!(
                    f,
                    "Output '{}' already has an owning subscriber; only one edge per \
                     output may take ownership",
                    output
                )
            }
            BuildError::InvalidParameter {
                chain,
                module,
                parameter,
                reason,
            } => {
                write!(
                    f,
                    "Invalid parameter '{}' for module '{}' in chain '{}': {}",
                    parameter, module, chain, reason
                )
            }
        }
    }
}

impl std::error::Error for BuildError {}
