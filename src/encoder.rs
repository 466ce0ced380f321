use rand::Rng;
use tracing::debug;

use crate::{algorithm::Algorithm, error::Error, key::Key, matrix::Matrix, message::Message};

/// Window searched per letter by the skip methods when generating a key.
pub const DEFAULT_MAX_SKIP: usize = 6;

/// Places and reads messages with one algorithm.
///
/// Every operation normalizes its message once on entry; decoding therefore
/// returns the normalized text, never the caller's casing or punctuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Encoder {
    algorithm: Algorithm,
    max_skip: usize,
}

impl Encoder {
    pub fn new(algorithm: Algorithm) -> Self {
        Encoder {
            algorithm,
            max_skip: DEFAULT_MAX_SKIP,
        }
    }

    /// Set the search window for generated skip keys. Ignored by row methods.
    pub fn with_max_skip(mut self, max_skip: usize) -> Self {
        self.max_skip = max_skip;
        self
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn max_skip(&self) -> usize {
        self.max_skip
    }

    fn normalized(message: &str) -> Result<Message, Error> {
        let message = Message::normalize(message);
        if message.is_empty() {
            return Err(Error::EmptyMessage);
        }
        Ok(message)
    }

    /// Place `message` into `matrix` and return the key which reads it back.
    ///
    /// A preset key is verified against the locks before anything is written,
    /// and returned unchanged on success. Without one, a key is generated.
    /// Either way the matrix is left untouched on error.
    pub fn encode<R: Rng>(
        &self,
        matrix: &mut Matrix,
        message: &str,
        preset: Option<&Key>,
        rng: &mut R,
    ) -> Result<Key, Error> {
        let message = Self::normalized(message)?;
        let method = self.algorithm.method(self.max_skip);

        let (key, plan) = match preset {
            Some(key) => (key.clone(), method.verify(matrix, &message, key)?),
            None => method.generate(matrix, &message, rng)?,
        };
        // nothing is written until the whole plan exists
        matrix.commit(&plan)?;

        debug!(
            algorithm = %self.algorithm,
            preset = preset.is_some(),
            %key,
            letters = message.len(),
            "placed message"
        );
        Ok(key)
    }

    /// `true` when `key` could place `message` without disturbing any lock.
    ///
    /// Never modifies the matrix, so repeated calls agree until it changes.
    pub fn can_encode(&self, matrix: &Matrix, message: &str, key: &Key) -> bool {
        Self::normalized(message)
            .and_then(|message| {
                self.algorithm
                    .method(self.max_skip)
                    .verify(matrix, &message, key)
            })
            .is_ok()
    }

    /// Read the message `key` selects.
    ///
    /// A short key repeats, so the text may run on past the message that was
    /// placed with it.
    pub fn decode(&self, matrix: &Matrix, key: &Key) -> Result<String, Error> {
        Ok(self
            .trail(matrix, key)?
            .into_iter()
            .filter_map(|(row, col)| matrix.cell_at(row, col))
            .collect())
    }

    /// The cells `key` reads, in reading order.
    pub fn trail(&self, matrix: &Matrix, key: &Key) -> Result<Vec<(usize, usize)>, Error> {
        self.algorithm.method(self.max_skip).trail(matrix, key)
    }
}
