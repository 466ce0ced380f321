use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    error::Error,
    method::{Method, RowMethod, SkipMethod},
    traversal::Traversal,
};

/// The four ways a message can be laid into a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    Row,
    RowPlow,
    Skip,
    SkipPlow,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Row,
        Algorithm::RowPlow,
        Algorithm::Skip,
        Algorithm::SkipPlow,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Row => "row",
            Algorithm::RowPlow => "row-plow",
            Algorithm::Skip => "skip",
            Algorithm::SkipPlow => "skip-plow",
        }
    }

    /// `true` for the two methods whose keys hold skip counts.
    pub fn is_skip(self) -> bool {
        matches!(self, Algorithm::Skip | Algorithm::SkipPlow)
    }

    pub fn traversal(self) -> Traversal {
        match self {
            Algorithm::Row | Algorithm::Skip => Traversal::RowMajor,
            Algorithm::RowPlow | Algorithm::SkipPlow => Traversal::Boustrophedon,
        }
    }

    pub(crate) fn method(self, max_skip: usize) -> Box<dyn Method> {
        if self.is_skip() {
            Box::new(SkipMethod::new(self.traversal(), max_skip))
        } else {
            Box::new(RowMethod::new(self.traversal()))
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::ALL
            .into_iter()
            .find(|algorithm| algorithm.name() == s)
            .ok_or_else(|| Error::UnknownAlgorithm(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("row", Algorithm::Row)]
    #[case("row-plow", Algorithm::RowPlow)]
    #[case("skip", Algorithm::Skip)]
    #[case("skip-plow", Algorithm::SkipPlow)]
    fn names_round_trip(#[case] name: &str, #[case] algorithm: Algorithm) {
        assert_eq!(name.parse::<Algorithm>().unwrap(), algorithm);
        assert_eq!(algorithm.to_string(), name);
    }

    #[rstest]
    #[case("")]
    #[case("Row")]
    #[case("zigzag")]
    fn unknown_names_are_loud(#[case] name: &str) {
        assert!(matches!(
            name.parse::<Algorithm>(),
            Err(Error::UnknownAlgorithm(found)) if found == name
        ));
    }
}
