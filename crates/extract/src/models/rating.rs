use std::fmt::{Display, Formatter, Result as FmtResult};
use std::{convert::Infallible, str::FromStr};

/// The reader's own star rating, kept exactly as exported.
///
/// Goodreads writes `0` for books that were never rated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(transparent))]
pub struct Rating(String);
impl Rating {
    const UNRATED: &'static str = "0";

    pub fn is_rated(&self) -> bool {
        self.0 != Self::UNRATED
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Rating {
    type Err = Infallible;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}
impl From<String> for Rating {
    fn from(value: String) -> Self {
        Self(value)
    }
}
impl From<&str> for Rating {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl Display for Rating {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("0", false)]
    #[case("1", true)]
    #[case("5", true)]
    // Anything but the literal zero counts, there is no schema validation.
    #[case("", true)]
    #[case("00", true)]
    fn test_is_rated(#[case] raw: &str, #[case] expected: bool) {
        assert_eq!(Rating::from(raw).is_rated(), expected);
    }

    #[test]
    fn test_display_is_verbatim() {
        assert_eq!(Rating::from("4").to_string(), "4");
    }
}
