/// Catalog results limit preference
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroUsize;

/// Maximum number of catalog hits to request; always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct ResultsLimit(NonZeroUsize);

impl ResultsLimit {
    /// Limit used when no preference has been stored
    pub const DEFAULT: ResultsLimit = ResultsLimit(match NonZeroUsize::new(5) {
        Some(n) => n,
        None => unreachable!(),
    });

    /// Create a limit, rejecting zero
    pub fn new(value: usize) -> Option<Self> {
        NonZeroUsize::new(value).map(Self)
    }

    /// Interpret submitted text, falling back to `default` for anything
    /// missing, non-numeric, or below one
    pub fn parse_or(input: Option<&str>, default: ResultsLimit) -> Self {
        input
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .and_then(|n| usize::try_from(n).ok())
            .and_then(Self::new)
            .unwrap_or(default)
    }

    /// [`parse_or`](Self::parse_or) with [`ResultsLimit::DEFAULT`]
    pub fn parse_or_default(input: Option<&str>) -> Self {
        Self::parse_or(input, Self::DEFAULT)
    }

    /// The limit as a plain number
    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for ResultsLimit {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for ResultsLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<usize> for ResultsLimit {
    type Error = String;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| "results limit must be at least 1".to_string())
    }
}

impl From<ResultsLimit> for usize {
    fn from(limit: ResultsLimit) -> Self {
        limit.get()
    }
}
