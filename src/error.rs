use crate::algorithm::Algorithm;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cell `({row}, {col})` is locked to `{found}` but the key requires `{expected}` there")]
    EncodingConflict {
        row: usize,
        col: usize,
        expected: char,
        found: char,
    },
    #[error("could not fit message: placed {placed} of {total} characters")]
    InsufficientSpace { placed: usize, total: usize },
    #[error("invalid key: {0}")]
    InvalidKey(String),
    #[error("unknown algorithm \"{0}\"; expected one of row, row-plow, skip, skip-plow")]
    UnknownAlgorithm(String),
    #[error("message is empty after normalization")]
    EmptyMessage,
    #[error("the cell `({row}, {col})` is out of bounds. size: `{rows}x{columns}`")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        columns: usize,
    },
    #[error("malformed grid text: {0}")]
    MalformedGrid(String),
    #[error("no combination of keys from the pools could place every message")]
    NoViableKeyCombination,
    #[error("group \"{0}\" already exists")]
    DuplicateGroup(String),
    #[error("group \"{0}\" does not exist")]
    UnknownGroup(String),
    #[error("could not issue a unique {algorithm} key after {attempts} attempts")]
    KeySpaceExhausted { algorithm: Algorithm, attempts: usize },
    #[error("invalid alphabet weights")]
    Alphabet(#[from] rand::distributions::WeightedError),
}

impl Error {
    /// `true` for the errors which mean "this key does not fit this grid".
    ///
    /// These are the only errors a key search may swallow and move past;
    /// everything else is caller misuse.
    pub fn is_placement_failure(&self) -> bool {
        matches!(
            self,
            Error::EncodingConflict { .. } | Error::InsufficientSpace { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_conflict_and_space_are_placement_failures() {
        assert!(Error::InsufficientSpace {
            placed: 1,
            total: 2
        }
        .is_placement_failure());
        assert!(Error::EncodingConflict {
            row: 0,
            col: 0,
            expected: 'A',
            found: 'B'
        }
        .is_placement_failure());
        assert!(!Error::InvalidKey("empty".into()).is_placement_failure());
        assert!(!Error::UnknownAlgorithm("zigzag".into()).is_placement_failure());
    }

    #[test]
    fn insufficient_space_reads_like_a_fit_failure() {
        let err = Error::InsufficientSpace {
            placed: 3,
            total: 80,
        };
        assert!(err.to_string().starts_with("could not fit message"));
    }
}
