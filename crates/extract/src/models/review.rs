use std::fmt::{Display, Formatter, Result as FmtResult};
use std::{convert::Infallible, str::FromStr};

/// The reader's free-text review.
///
/// Goodreads stores reviews as a small subset of HTML (`<br/>`, `<strong>`,
/// ...). The text is kept untouched here; translation to Markdown happens at
/// render time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(transparent))]
pub struct Review(String);
impl Review {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Review {
    type Err = Infallible;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}
impl From<String> for Review {
    fn from(value: String) -> Self {
        Self(value)
    }
}
impl From<&str> for Review {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl Display for Review {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}
