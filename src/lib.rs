// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod config;     // descriptors, loader, registry, runtime
pub mod engine;     // chain scheduler, ports, id allocation
pub mod errors;     // error handling
pub mod modules;    // built-in text modules
pub mod observability;
pub mod traits;     // unified abstractions
