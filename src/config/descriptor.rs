// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};

/// Merged description of one chain: the pre-validated topology the chain
/// builder consumes.
///
/// This is the output shape of the configuration-and-merge step; the grammar
/// that produces it is not this crate's concern.
///
/// # Example
/// ```yaml
/// name: text_pipeline
/// group: demo
/// modules:
///   - name: source
///     type: text_source
///     parameters:
///       text: "hello world"
///     outputs:
///       out: raw
///   - name: upper
///     type: change_text_case
///     parameters:
///       case: upper
///     inputs:
///       in: raw
///     outputs:
///       out: shouted
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ChainDescriptor {
    pub name: String,
    #[serde(default)]
    pub group: Option<String>,
    /// Explicit override of the chain's id-increase; when absent the chain
    /// uses the product of its modules' id-increases.
    #[serde(default)]
    pub id_increase: Option<u64>,
    pub modules: Vec<ModuleDescriptor>,
}

/// Merged description of one module instance within a chain.
#[derive(Debug, Clone, Deserialize)]
pub struct ModuleDescriptor {
    /// Instance name, unique within the chain.
    pub name: String,
    /// Resolved module type name, looked up in the registry.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Resolved parameter mapping.
    #[serde(default)]
    pub parameters: HashMap<String, String>,
    /// Local input name to consumed variable name.
    #[serde(default)]
    pub inputs: BTreeMap<String, String>,
    /// Local output name to published variable name.
    #[serde(default)]
    pub outputs: BTreeMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_minimal_chain() {
        let yaml = r#"
name: demo
modules:
  - name: source
    type: text_source
    parameters:
      text: hi
    outputs:
      out: raw
  - name: sink
    type: collect_sink
    inputs:
      in: raw
"#;
        let chain: ChainDescriptor = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(chain.name, "demo");
        assert!(chain.group.is_none());
        assert!(chain.id_increase.is_none());
        assert_eq!(chain.modules.len(), 2);
        assert_eq!(chain.modules[0].type_name, "text_source");
        assert_eq!(chain.modules[1].inputs.get("in").unwrap(), "raw");
    }
}
