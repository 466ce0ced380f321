use std::fmt;

/// Placeholder committed to the grid in place of a word space.
pub const SEPARATOR: char = '.';

/// A message in the form it is actually written into a grid.
///
/// Normalization uppercases the input, drops everything that is not an ASCII
/// letter or a space, trims outer spaces and turns internal ones into
/// [`SEPARATOR`]s. If the stripped input held any space at all, one trailing
/// separator is appended.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Message(Vec<char>);

impl Message {
    pub fn normalize(raw: &str) -> Self {
        let kept: String = raw
            .chars()
            .map(|c| c.to_ascii_uppercase())
            .filter(|c| c.is_ascii_uppercase() || *c == ' ')
            .collect();
        let trimmed = kept.trim_matches(' ');

        let mut letters: Vec<char> = trimmed
            .chars()
            .map(|c| if c == ' ' { SEPARATOR } else { c })
            .collect();
        if kept.contains(' ') && !letters.is_empty() {
            letters.push(SEPARATOR);
        }
        Message(letters)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn letters(&self) -> &[char] {
        &self.0
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|c| write!(f, "{c}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("hello", "HELLO")]
    #[case("Hello, World!", "HELLO.WORLD.")]
    #[case("  the base has fallen  ", "THE.BASE.HAS.FALLEN.")]
    #[case("r2-d2", "RD")]
    #[case("hello.", "HELLO")]
    #[case("hello ", "HELLO.")]
    #[case(" hi", "HI.")]
    #[case("HELLO.WORLD.", "HELLOWORLD")]
    #[case("!!!", "")]
    #[case("   ", "")]
    fn normalizes(#[case] raw: &str, #[case] expect: &str) {
        assert_eq!(Message::normalize(raw).to_string(), expect);
    }

    #[test]
    fn separators_are_never_taken_from_the_input() {
        let message = Message::normalize("Trust noone. Death to the iron tzar.");
        assert_eq!(message.to_string(), "TRUST.NOONE.DEATH.TO.THE.IRON.TZAR.");
        assert_eq!(
            message.letters().iter().filter(|c| **c == SEPARATOR).count(),
            7
        );
    }
}
