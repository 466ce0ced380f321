use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A cyclic integer sequence parameterizing one placement.
///
/// Depending on the algorithm, each entry is a 1-based column (`0` skips the
/// row) or a skip count. Keys are never empty and never negative; entry `i`
/// of a key shorter than the message is read as `entries[i % len]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Vec<i64>", into = "Vec<usize>")]
pub struct Key(Vec<usize>);

impl Key {
    pub fn new(entries: Vec<usize>) -> Result<Self, Error> {
        if entries.is_empty() {
            return Err(Error::InvalidKey("key must have at least one entry".into()));
        }
        Ok(Key(entries))
    }

    /// The entry governing step `step`, wrapping around the key.
    pub fn at(&self, step: usize) -> usize {
        self.0[step % self.0.len()]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn entries(&self) -> &[usize] {
        &self.0
    }
}

impl TryFrom<Vec<i64>> for Key {
    type Error = Error;

    fn try_from(entries: Vec<i64>) -> Result<Self, Self::Error> {
        let entries = entries
            .into_iter()
            .map(|entry| {
                usize::try_from(entry)
                    .map_err(|_| Error::InvalidKey(format!("negative entry {entry}")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Key::new(entries)
    }
}

impl From<Key> for Vec<usize> {
    fn from(key: Key) -> Self {
        key.0
    }
}

/// Parses `1,2,0,4`, optionally wrapped in brackets and with whitespace.
impl FromStr for Key {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let inner = s.trim().trim_start_matches('[').trim_end_matches(']');
        let entries = inner
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| {
                part.parse::<i64>()
                    .map_err(|_| Error::InvalidKey(format!("\"{part}\" is not an integer")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Key::try_from(entries)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries = self.0.iter();
        if let Some(first) = entries.next() {
            write!(f, "{first}")?;
        }
        entries.try_for_each(|entry| write!(f, ",{entry}"))
    }
}
