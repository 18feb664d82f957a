// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod descriptor;
mod loader;
mod registry;
mod runtime;

pub use descriptor::{ChainDescriptor, ModuleDescriptor};
pub use loader::{load_chains, ChainsFile, ConfigError};
pub use registry::{InputDecl, MakeData, ModuleFactory, ModuleRegistry, ModuleSeed, OutputDecl};
pub use runtime::{LoadError, Runtime};
