// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

use crate::config::descriptor::ChainDescriptor;
use crate::config::loader::{self, ConfigError};
use crate::config::registry::ModuleRegistry;
use crate::engine::{build_chain, Chain, IdGenerator};
use crate::errors::BuildError;

/// Errors while loading chains into a [`Runtime`].
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error("a chain named '{chain}' is already loaded")]
    DuplicateChain { chain: String },
}

/// Owns the module registry, the shared run-id allocator, and every chain
/// built from configuration.
///
/// All chains loaded into one runtime draw run ids from the same allocator,
/// so ids are unique across the whole runtime, not just within a chain.
pub struct Runtime {
    registry: ModuleRegistry,
    id_source: Arc<IdGenerator>,
    chains: HashMap<String, Chain>,
}

impl Runtime {
    pub fn new(registry: ModuleRegistry) -> Self {
        Self {
            registry,
            id_source: Arc::new(IdGenerator::new()),
            chains: HashMap::new(),
        }
    }

    pub fn registry(&self) -> &ModuleRegistry {
        &self.registry
    }

    pub fn id_source(&self) -> &Arc<IdGenerator> {
        &self.id_source
    }

    /// Build one chain from its descriptor and take ownership of it.
    pub fn add_chain(&mut self, descriptor: &ChainDescriptor) -> Result<&Chain, LoadError> {
        if self.chains.contains_key(&descriptor.name) {
            return Err(LoadError::DuplicateChain {
                chain: descriptor.name.clone(),
            });
        }
        let chain = build_chain(
            &self.registry,
            descriptor,
            Arc::clone(&self.id_source),
            None,
        )?;
        let name = descriptor.name.clone();
        self.chains.insert(name.clone(), chain);
        Ok(&self.chains[&name])
    }

    /// Load every chain in a YAML file. Returns the loaded chain names in
    /// file order.
    pub fn load_chains<P: AsRef<std::path::Path>>(
        &mut self,
        path: P,
    ) -> Result<Vec<String>, LoadError> {
        let file = loader::load_chains(path)?;
        let mut names = Vec::with_capacity(file.chains.len());
        for descriptor in &file.chains {
            self.add_chain(descriptor)?;
            names.push(descriptor.name.clone());
        }
        Ok(names)
    }

    pub fn chain(&self, name: &str) -> Option<&Chain> {
        self.chains.get(name)
    }

    pub fn chains(&self) -> impl Iterator<Item = &Chain> {
        self.chains.values()
    }

    /// Disable every chain, waiting for in-flight runs to drain.
    pub async fn disable_all(&self) {
        for chain in self.chains.values() {
            chain.disable().await;
        }
    }
}
