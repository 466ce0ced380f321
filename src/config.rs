use serde::{Deserialize, Serialize};

use crate::{alphabet::Alphabet, encoder::DEFAULT_MAX_SKIP, error::Error};

/// Grid shape and key parameters shared by key issuance and grid building.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CipherConfig {
    pub columns: usize,
    pub rows: usize,
    /// Fill weight of the word separator relative to a single letter.
    /// `None` fills with letters only.
    pub separator_weight: Option<u32>,
    /// Window searched per letter when the skip methods generate a key.
    pub max_skip: usize,
    /// Length of issued skip keys.
    pub skip_key_length: usize,
    /// Re-rolls allowed when an issued key collides with an existing one.
    pub key_attempts: usize,
}

impl Default for CipherConfig {
    fn default() -> Self {
        CipherConfig {
            columns: 10,
            rows: 10,
            separator_weight: Some(5),
            max_skip: DEFAULT_MAX_SKIP,
            skip_key_length: 6,
            key_attempts: 64,
        }
    }
}

impl CipherConfig {
    pub fn alphabet(&self) -> Result<Alphabet, Error> {
        Alphabet::new(self.separator_weight)
    }
}
