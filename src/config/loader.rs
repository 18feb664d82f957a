// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::descriptor::ChainDescriptor;

/// Top-level shape of a chain configuration file.
#[derive(Debug, Deserialize)]
pub struct ChainsFile {
    pub chains: Vec<ChainDescriptor>,
}

/// Errors while reading or parsing a chain configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read chain config '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse chain config '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Load chain descriptors from a YAML file.
pub fn load_chains<P: AsRef<Path>>(path: P) -> Result<ChainsFile, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_chains_from_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
chains:
  - name: first
    modules:
      - name: source
        type: text_source
        parameters:
          text: hi
        outputs:
          out: raw
  - name: second
    id_increase: 4
    modules:
      - name: source
        type: text_source
        parameters:
          text: ho
        outputs:
          out: raw
"#
        )
        .unwrap();

        let file = load_chains(file.path()).unwrap();
        assert_eq!(file.chains.len(), 2);
        assert_eq!(file.chains[0].name, "first");
        assert_eq!(file.chains[1].id_increase, Some(4));
    }

    #[test]
    fn missing_file_reports_io_error() {
        let err = load_chains("/nonexistent/chains.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn malformed_yaml_reports_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "chains: [ not a chain").unwrap();

        let err = load_chains(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
