// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Registry mapping module type names to factory functions.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use crate::engine::TypeTag;
use crate::errors::BuildError;
use crate::traits::Module;

/// Everything a factory learns about the module instance it is asked to
/// construct.
#[derive(Debug, Clone)]
pub struct MakeData {
    /// Resolved type name the factory was looked up under.
    pub type_name: String,
    /// Name of the owning chain.
    pub chain: String,
    /// Instance name within the chain.
    pub name: String,
    /// 0-based position within the chain.
    pub number: usize,
    /// Local names of the input wirings the descriptor declares.
    pub inputs: BTreeSet<String>,
    /// Local names of the output wirings the descriptor declares.
    pub outputs: BTreeSet<String>,
    /// Resolved key/value parameters.
    pub parameters: HashMap<String, String>,
    /// Whether this instance is the first module of its chain. A module type
    /// that requires input data must reject being placed first.
    pub is_first: bool,
}

impl MakeData {
    pub fn parameter(&self, key: &str) -> Option<&str> {
        self.parameters.get(key).map(String::as_str)
    }

    /// Fetch a mandatory parameter, failing the build if it is absent.
    pub fn require_parameter(&self, key: &str) -> Result<&str, BuildError> {
        self.parameter(key).ok_or_else(|| BuildError::InvalidParameter {
            chain: self.chain.clone(),
            module: self.name.clone(),
            parameter: key.to_string(),
            reason: "missing required parameter".to_string(),
        })
    }

    /// Convenience constructor for [`BuildError::InvalidParameter`] with this
    /// instance's identity filled in.
    pub fn invalid_parameter(&self, key: &str, reason: impl Into<String>) -> BuildError {
        BuildError::InvalidParameter {
            chain: self.chain.clone(),
            module: self.name.clone(),
            parameter: key.to_string(),
            reason: reason.into(),
        }
    }

    /// Convenience constructor for [`BuildError::ModuleAsChainStart`], for
    /// module types that require input data.
    pub fn not_as_chain_start(&self) -> BuildError {
        BuildError::ModuleAsChainStart {
            chain: self.chain.clone(),
            module: self.name.clone(),
            type_name: self.type_name.clone(),
        }
    }
}

/// Declaration of one input port: name plus the set of accepted type tags.
pub struct InputDecl {
    pub(crate) name: String,
    pub(crate) accepts: Vec<TypeTag>,
}

/// Declaration of one output port: name plus the set of producible type tags.
pub struct OutputDecl {
    pub(crate) name: String,
    pub(crate) produces: Vec<TypeTag>,
}

/// A constructed handler plus its typed port declarations, ready for the
/// chain builder to wire.
pub struct ModuleSeed {
    handler: Box<dyn Module>,
    inputs: Vec<InputDecl>,
    outputs: Vec<OutputDecl>,
    id_increase: u64,
}

impl ModuleSeed {
    pub fn new(handler: impl Module + 'static) -> Self {
        Self {
            handler: Box::new(handler),
            inputs: Vec::new(),
            outputs: Vec::new(),
            id_increase: 1,
        }
    }

    /// Declare an input port accepting a single type.
    pub fn input<T: std::any::Any>(mut self, name: &str) -> Self {
        self.inputs.push(InputDecl {
            name: name.to_string(),
            accepts: vec![TypeTag::of::<T>()],
        });
        self
    }

    /// Declare an input port accepting several types.
    pub fn input_types(mut self, name: &str, accepts: Vec<TypeTag>) -> Self {
        self.inputs.push(InputDecl {
            name: name.to_string(),
            accepts,
        });
        self
    }

    /// Declare an output port producing a single type.
    pub fn output<T: std::any::Any>(mut self, name: &str) -> Self {
        self.outputs.push(OutputDecl {
            name: name.to_string(),
            produces: vec![TypeTag::of::<T>()],
        });
        self
    }

    /// Declare an output port producing several types.
    pub fn output_types(mut self, name: &str, produces: Vec<TypeTag>) -> Self {
        self.outputs.push(OutputDecl {
            name: name.to_string(),
            produces,
        });
        self
    }

    /// Number of consecutive ids this module consumes per trigger
    /// (default 1).
    pub fn id_increase(mut self, increase: u64) -> Self {
        self.id_increase = increase.max(1);
        self
    }

    pub(crate) fn into_parts(self) -> (Box<dyn Module>, Vec<InputDecl>, Vec<OutputDecl>, u64) {
        (self.handler, self.inputs, self.outputs, self.id_increase)
    }
}

/// Factory function producing a module instance from its descriptor data.
pub type ModuleFactory = Arc<dyn Fn(&MakeData) -> Result<ModuleSeed, BuildError> + Send + Sync>;

/// Process-wide mapping of module type names to factories.
pub struct ModuleRegistry {
    makers: HashMap<String, ModuleFactory>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self {
            makers: HashMap::new(),
        }
    }

    /// Register a factory under `type_name`. Registering the same type name
    /// twice is an error.
    pub fn register<F>(&mut self, type_name: &str, maker: F) -> Result<(), BuildError>
    where
        F: Fn(&MakeData) -> Result<ModuleSeed, BuildError> + Send + Sync + 'static,
    {
        if self.makers.contains_key(type_name) {
            return Err(BuildError::DuplicateModuleType {
                type_name: type_name.to_string(),
            });
        }
        self.makers.insert(type_name.to_string(), Arc::new(maker));
        Ok(())
    }

    pub fn get(&self, type_name: &str) -> Option<&ModuleFactory> {
        self.makers.get(type_name)
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.makers.contains_key(type_name)
    }

    pub fn len(&self) -> usize {
        self.makers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.makers.is_empty()
    }

    pub fn type_names(&self) -> impl Iterator<Item = &String> {
        self.makers.keys()
    }
}

impl Default for ModuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ModuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleRegistry")
            .field("type_count", &self.makers.len())
            .field("type_names", &self.makers.keys().collect::<Vec<_>>())
            .finish()
    }
}
