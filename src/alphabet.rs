use rand::{
    distributions::{Distribution, WeightedIndex},
    Rng,
};

use crate::{error::Error, message::SEPARATOR};

/// The weighted character distribution used to fill fresh grids.
///
/// Every uppercase letter has weight 1. The optional separator weight makes
/// word breaks look as common in the noise as they are in real messages.
#[derive(Debug, Clone)]
pub struct Alphabet {
    symbols: Vec<char>,
    weights: WeightedIndex<u32>,
}

impl Alphabet {
    pub fn new(separator_weight: Option<u32>) -> Result<Self, Error> {
        let mut symbols: Vec<char> = ('A'..='Z').collect();
        let mut weights = vec![1; symbols.len()];
        if let Some(weight) = separator_weight.filter(|weight| *weight > 0) {
            symbols.push(SEPARATOR);
            weights.push(weight);
        }
        let weights = WeightedIndex::new(weights)?;
        Ok(Alphabet { symbols, weights })
    }

    /// Plain `A..=Z`, uniformly weighted.
    pub fn letters() -> Result<Self, Error> {
        Self::new(None)
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> char {
        self.symbols[self.weights.sample(rng)]
    }

    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }
}
