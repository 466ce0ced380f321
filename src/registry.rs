use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{algorithm::Algorithm, config::CipherConfig, error::Error, key::Key};

/// A key, together with the algorithm it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Candidate {
    pub algorithm: Algorithm,
    pub key: Key,
}

/// Draw a key of the right shape for `algorithm` on grids described by `config`.
///
/// Row keys carry one column per row, drawn from `1..=columns`. Skip keys
/// carry `skip_key_length` skips, drawn from `0..max_skip`.
pub fn random_key<R: Rng + ?Sized>(
    algorithm: Algorithm,
    config: &CipherConfig,
    rng: &mut R,
) -> Result<Key, Error> {
    let entries = if algorithm.is_skip() {
        if config.max_skip == 0 || config.skip_key_length == 0 {
            return Err(Error::InvalidKey(
                "skip keys need a positive max_skip and skip_key_length".into(),
            ));
        }
        (0..config.skip_key_length)
            .map(|_| rng.gen_range(0..config.max_skip))
            .collect()
    } else {
        if config.columns == 0 || config.rows == 0 {
            return Err(Error::InvalidKey("row keys need a grid with cells".into()));
        }
        (0..config.rows)
            .map(|_| rng.gen_range(1..=config.columns))
            .collect()
    };
    Key::new(entries)
}

/// The keys issued to each group.
///
/// Within one algorithm, every issued key is unique across all groups, so a
/// recipient holding one group's key can never read another group's message
/// by accident.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyRegistry {
    groups: BTreeMap<String, Vec<Candidate>>,
}

impl KeyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_group(&mut self, name: &str) -> Result<(), Error> {
        if self.groups.contains_key(name) {
            return Err(Error::DuplicateGroup(name.to_owned()));
        }
        self.groups.insert(name.to_owned(), Vec::new());
        Ok(())
    }

    pub fn groups(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Every key issued to `group`, in issue order.
    pub fn pool(&self, group: &str) -> Result<&[Candidate], Error> {
        self.groups
            .get(group)
            .map(Vec::as_slice)
            .ok_or_else(|| Error::UnknownGroup(group.to_owned()))
    }

    /// `true` if any group already holds `key` for `algorithm`.
    pub fn is_issued(&self, algorithm: Algorithm, key: &Key) -> bool {
        self.groups
            .values()
            .flatten()
            .any(|candidate| candidate.algorithm == algorithm && &candidate.key == key)
    }

    /// Issue a fresh key for `group`, re-rolling on collision.
    pub fn issue<R: Rng + ?Sized>(
        &mut self,
        group: &str,
        algorithm: Algorithm,
        config: &CipherConfig,
        rng: &mut R,
    ) -> Result<Key, Error> {
        if !self.groups.contains_key(group) {
            return Err(Error::UnknownGroup(group.to_owned()));
        }

        for attempt in 0..config.key_attempts {
            let key = random_key(algorithm, config, rng)?;
            if self.is_issued(algorithm, &key) {
                debug!(group, %algorithm, %key, attempt, "issued key collided, re-rolling");
                continue;
            }
            self.groups.entry(group.to_owned()).or_default().push(Candidate {
                algorithm,
                key: key.clone(),
            });
            return Ok(key);
        }

        Err(Error::KeySpaceExhausted {
            algorithm,
            attempts: config.key_attempts,
        })
    }
}
