use thiserror::Error;

/// Errors raised when an upstream contract is broken.
///
/// Calculators never return these for short or degenerate input; they fall
/// back to zero-filled results instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DnaError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type DnaResult<T> = Result<T, DnaError>;
