use rand::{seq::SliceRandom, Rng};
use tracing::{debug, info, instrument, warn};

use crate::{
    alphabet::Alphabet,
    config::CipherConfig,
    encoder::Encoder,
    error::Error,
    matrix::Matrix,
    registry::{Candidate, KeyRegistry},
};

/// A message and the keys it may be placed with.
#[derive(Debug, Clone)]
pub struct Request<'a> {
    pub message: &'a str,
    pub pool: Vec<Candidate>,
}

impl<'a> Request<'a> {
    pub fn new(message: &'a str, pool: Vec<Candidate>) -> Self {
        Request { message, pool }
    }

    /// A request drawing on every key issued to `group`.
    pub fn for_group(registry: &KeyRegistry, group: &str, message: &'a str) -> Result<Self, Error> {
        Ok(Request::new(message, registry.pool(group)?.to_vec()))
    }
}

/// A finished grid and the keys that were used on it.
#[derive(Debug, Clone)]
pub struct Built {
    pub matrix: Matrix,
    pub primary: Candidate,
    pub secondary: Option<Candidate>,
}

/// Searches key pools for a combination that fits one or two messages into a
/// single fresh grid.
#[derive(Debug, Clone)]
pub struct GridBuilder {
    config: CipherConfig,
    alphabet: Alphabet,
}

impl GridBuilder {
    pub fn new(config: CipherConfig) -> Result<Self, Error> {
        let alphabet = config.alphabet()?;
        Ok(GridBuilder { config, alphabet })
    }

    pub fn config(&self) -> &CipherConfig {
        &self.config
    }

    /// Place `candidate`'s message, reporting whether it fit.
    ///
    /// Conflicts and lack of space mean "try the next key" and come back as
    /// `Ok(false)`; anything else is a real error.
    fn try_place<R: Rng>(
        &self,
        matrix: &mut Matrix,
        message: &str,
        candidate: &Candidate,
        rng: &mut R,
    ) -> Result<bool, Error> {
        let encoder = Encoder::new(candidate.algorithm).with_max_skip(self.config.max_skip);
        match encoder.encode(matrix, message, Some(&candidate.key), rng) {
            Ok(_) => Ok(true),
            Err(err) if err.is_placement_failure() => {
                debug!(algorithm = %candidate.algorithm, key = %candidate.key, %err, "key does not fit");
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    /// Find keys from the pools that place `primary` (and `secondary`, if
    /// given) into one grid.
    ///
    /// Both pools are shuffled. Each primary key gets a fresh random grid;
    /// if the secondary message then fits with none of its keys, that grid is
    /// thrown away and the next primary key is tried. Running out of primary
    /// keys is [`Error::NoViableKeyCombination`].
    #[instrument(
        skip_all,
        fields(primary_keys = primary.pool.len(), secondary_keys = secondary.as_ref().map(|s| s.pool.len()))
    )]
    pub fn build<R: Rng>(
        &self,
        mut primary: Request<'_>,
        mut secondary: Option<Request<'_>>,
        rng: &mut R,
    ) -> Result<Built, Error> {
        primary.pool.shuffle(rng);
        if let Some(secondary) = secondary.as_mut() {
            secondary.pool.shuffle(rng);
        }

        for candidate in primary.pool {
            let mut matrix =
                Matrix::random(self.config.columns, self.config.rows, &self.alphabet, rng);
            if !self.try_place(&mut matrix, primary.message, &candidate, rng)? {
                continue;
            }

            let Some(secondary) = secondary.as_ref() else {
                info!(algorithm = %candidate.algorithm, "grid built");
                return Ok(Built {
                    matrix,
                    primary: candidate,
                    secondary: None,
                });
            };

            for other in &secondary.pool {
                if self.try_place(&mut matrix, secondary.message, other, rng)? {
                    info!(
                        primary = %candidate.algorithm,
                        secondary = %other.algorithm,
                        "grid built"
                    );
                    return Ok(Built {
                        matrix,
                        primary: candidate,
                        secondary: Some(other.clone()),
                    });
                }
            }
            debug!(key = %candidate.key, "no secondary key fits, discarding grid");
        }

        warn!("key pools exhausted");
        Err(Error::NoViableKeyCombination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{algorithm::Algorithm, key::Key};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn candidate(algorithm: Algorithm, entries: &[usize]) -> Candidate {
        Candidate {
            algorithm,
            key: Key::new(entries.to_vec()).unwrap(),
        }
    }

    fn small() -> CipherConfig {
        CipherConfig {
            columns: 5,
            rows: 5,
            ..CipherConfig::default()
        }
    }

    #[test]
    fn unusable_keys_are_skipped() {
        let builder = GridBuilder::new(small()).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let pool = vec![
            // needs ten rows
            candidate(Algorithm::Row, &[1]),
            candidate(Algorithm::Skip, &[0]),
        ];
        let built = builder
            .build(Request::new("HELLOWORLD", pool), None, &mut rng)
            .unwrap();
        assert_eq!(built.primary, candidate(Algorithm::Skip, &[0]));
        assert!(built
            .matrix
            .decode(Algorithm::Skip, &built.primary.key)
            .unwrap()
            .starts_with("HELLOWORLD"));
    }

    #[test]
    fn secondary_lands_on_the_same_grid() {
        let builder = GridBuilder::new(small()).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let built = builder
            .build(
                Request::new("HELLO", vec![candidate(Algorithm::Row, &[1, 2, 3, 4, 5])]),
                Some(Request::new(
                    "WORLD",
                    vec![
                        // same cells as the primary, always conflicts
                        candidate(Algorithm::Row, &[1, 2, 3, 4, 5]),
                        // off the diagonal in plow order
                        candidate(Algorithm::RowPlow, &[2, 3, 4, 5, 1]),
                    ],
                )),
                &mut rng,
            )
            .unwrap();
        let secondary = built.secondary.unwrap();
        assert_eq!(secondary.algorithm, Algorithm::RowPlow);
        assert_eq!(
            built.matrix.decode(Algorithm::Row, &built.primary.key).unwrap(),
            "HELLO"
        );
        assert_eq!(
            built.matrix.decode(Algorithm::RowPlow, &secondary.key).unwrap(),
            "WORLD"
        );
    }

    #[test]
    fn exhausted_pools_are_terminal() {
        let builder = GridBuilder::new(small()).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let err = builder
            .build(
                Request::new("HELLO", vec![candidate(Algorithm::Row, &[1, 2, 3, 4, 5])]),
                Some(Request::new(
                    "WORLD",
                    vec![candidate(Algorithm::Row, &[1, 2, 3, 4, 5])],
                )),
                &mut rng,
            )
            .unwrap_err();
        assert!(matches!(err, Error::NoViableKeyCombination));
    }

    #[test]
    fn misuse_is_not_swallowed() {
        let builder = GridBuilder::new(small()).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let err = builder
            .build(
                Request::new("HELLO", vec![candidate(Algorithm::Row, &[9])]),
                None,
                &mut rng,
            )
            .unwrap_err();
        assert!(matches!(err, Error::InvalidKey(_)));
    }
}
