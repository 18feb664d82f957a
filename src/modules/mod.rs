// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Built-in text modules, used by the demo binary and the integration tests.

mod change_text_case;
mod collect_sink;
mod reverse_text;
mod text_source;

pub use change_text_case::ChangeTextCase;
pub use collect_sink::{register as register_collect_sink, CollectSink, CollectedText};
pub use reverse_text::ReverseText;
pub use text_source::TextSource;

use crate::config::ModuleRegistry;
use crate::errors::BuildError;

/// Register the stateless built-in module types.
///
/// `collect_sink` needs a shared store and is registered separately via
/// [`register_collect_sink`].
pub fn register_builtin_modules(registry: &mut ModuleRegistry) -> Result<(), BuildError> {
    registry.register("text_source", text_source::make)?;
    registry.register("change_text_case", change_text_case::make)?;
    registry.register("reverse_text", reverse_text::make)?;
    Ok(())
}
