// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod builder;
mod chain;
mod id_generator;
mod module;
mod ports;


pub use builder::build_chain;
pub use chain::Chain;
pub use id_generator::IdGenerator;
pub use module::{ModuleContext, ModuleNode, Ports};
pub use ports::{InputPort, OutputPort, Ownership, Packet, TypeTag};
