//! Registry configuration.

use serde::{Deserialize, Serialize};

/// Tunables for listing and import behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
    /// Break listing ties by ascending student identifier.
    pub deterministic_ties: bool,
    /// Ignore blank import lines instead of rejecting the batch.
    pub skip_blank_lines: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            deterministic_ties: true,
            skip_blank_lines: true,
        }
    }
}

impl RegistryConfig {
    /// Parses a JSON object; absent fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
