use std::fmt::{Display, Formatter, Result as FmtResult};
use std::{convert::Infallible, str::FromStr};

/// Comma separated list of the shelves a book was placed on, kept exactly as
/// exported (`"to-read"`, `"fiction, favorites"`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(transparent))]
pub struct Shelves(String);
impl Shelves {
    /// Separator Goodreads writes between shelf labels.
    pub const SEPARATOR: &'static str = ", ";

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Shelves {
    type Err = Infallible;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}
impl From<String> for Shelves {
    fn from(value: String) -> Self {
        Self(value)
    }
}
impl From<&str> for Shelves {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl Display for Shelves {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kept_verbatim() {
        let shelves = Shelves::from("fiction, favorites,  to-read");
        assert_eq!(shelves.as_str(), "fiction, favorites,  to-read");
        assert_eq!(shelves.to_string(), "fiction, favorites,  to-read");
        assert!(!shelves.is_empty());
    }

    #[test]
    fn test_empty() {
        assert!(Shelves::default().is_empty());
        assert!(!Shelves::from(" ").is_empty());
    }
}
