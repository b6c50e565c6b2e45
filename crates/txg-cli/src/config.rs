use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use txg_codec::SerFlags;
use txg_crypto::{configure_pool, DEFAULT_POOL_CAPACITY};

/// Settings read from `--config`.
///
/// Every key is optional; missing keys take their default.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Transaction version assumed when decoding outputs.
    pub tx_version: u64,
    /// Write reference data verbatim. When `false`, encodings carry only its
    /// hash.
    pub include_reference_data: bool,
    /// Most idle hashers kept for reuse.
    pub hasher_pool_capacity: usize,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            tx_version: 1,
            include_reference_data: true,
            hasher_pool_capacity: DEFAULT_POOL_CAPACITY,
        }
    }
}

impl CliConfig {
    /// Load from `path`, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = toml::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        debug!(?config, path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Serialization flags for writing outputs.
    pub fn ser_flags(&self) -> SerFlags {
        if self.include_reference_data {
            SerFlags::ALL
        } else {
            SerFlags::WITNESS | SerFlags::PREVOUT
        }
    }

    /// Install process-wide settings. Must run before any hashing.
    pub fn apply(&self) {
        if !configure_pool(self.hasher_pool_capacity) {
            warn!(
                capacity = self.hasher_pool_capacity,
                "hasher pool already initialized; capacity ignored"
            );
        }
    }
}
