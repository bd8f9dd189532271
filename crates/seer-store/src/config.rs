// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::checkpoint::PayloadCodec;
use crate::file::FileStore;
use crate::memory::MemoryStore;
use crate::store::StreamStore;
use seer_core::SeerError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Memory,
    File,
}

/// Store selection as it appears in the service configuration file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// Directory for the file backend.
    pub path: Option<PathBuf>,
    pub payload_codec: PayloadCodec,
}

impl StoreConfig {
    pub fn validate(&self) -> Result<(), SeerError> {
        if self.backend == StoreBackend::File && self.path.is_none() {
            return Err(SeerError::invalid_parameter(
                "store.path is required for the file backend",
            ));
        }
        Ok(())
    }
}

/// Builds the configured backend.
pub fn open_store(config: &StoreConfig) -> Result<Arc<dyn StreamStore>, SeerError> {
    config.validate()?;
    match (config.backend, &config.path) {
        (StoreBackend::File, Some(path)) => {
            Ok(Arc::new(FileStore::open(path.clone(), config.payload_codec)?))
        }
        _ => Ok(Arc::new(MemoryStore::new())),
    }
}

#[cfg(test)]
mod tests {
    use super::{StoreBackend, StoreConfig, open_store};

    #[test]
    fn file_backend_requires_path() {
        let config = StoreConfig {
            backend: StoreBackend::File,
            ..StoreConfig::default()
        };
        let err = open_store(&config).err().expect("missing path must fail");
        assert!(err.to_string().contains("store.path"));
    }

    #[test]
    fn defaults_to_memory_backend() {
        let config: StoreConfig = serde_json::from_str("{}").expect("empty config should parse");
        assert_eq!(config.backend, StoreBackend::Memory);
        assert!(open_store(&config).is_ok());
    }
}
