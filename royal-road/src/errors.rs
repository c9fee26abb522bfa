use std::error::Error;
use std::fmt;

/// Errors raised when validating an engine configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The elite count exceeds the population size.
    EliteExceedsPopulation { elite: usize, population: usize },
    /// The non-elite remainder of the population is odd, so it cannot
    /// be produced by mating rounds of two children each.
    UnevenMatingSplit { elite: usize, population: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EliteExceedsPopulation { elite, population } => write!(
                f,
                "elite count {} exceeds population size {}",
                elite, population
            ),
            Self::UnevenMatingSplit { elite, population } => write!(
                f,
                "population {} minus elite {} leaves an odd number of offspring",
                population, elite
            ),
        }
    }
}

impl Error for ConfigError {}

/// Errors raised by schema table queries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SchemaError {
    /// A segment index beyond the active variant's table.
    SegmentOutOfRange { index: usize, count: usize },
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SegmentOutOfRange { index, count } => write!(
                f,
                "segment index {} out of range for a table of {} segments",
                index, count
            ),
        }
    }
}

impl Error for SchemaError {}

/// Error raised when parsing an experiment selector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseExperimentError(pub String);

impl fmt::Display for ParseExperimentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown experiment {:?}, expected \"1A\" or \"1B\"", self.0)
    }
}

impl Error for ParseExperimentError {}

/// Error raised when parsing a bit string from text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseBitStringError {
    /// The input was not exactly 64 characters long.
    WrongLength(usize),
    /// The input contained a character other than '0' or '1'.
    InvalidCharacter(char),
}

impl fmt::Display for ParseBitStringError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongLength(len) => {
                write!(f, "bit string has length {}, expected {}", len, crate::STRING_LEN)
            }
            Self::InvalidCharacter(c) => write!(f, "invalid character {:?} in bit string", c),
        }
    }
}

impl Error for ParseBitStringError {}
