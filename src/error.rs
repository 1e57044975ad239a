use thiserror::Error;

/// Errors produced by the Reed-Muller codec, the noise channel and the
/// image adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A configuration value is outside its accepted range
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// An integer needs more bits than the target width allows
    #[error("Input too large: {length} bits, at most {max_length} allowed")]
    InputTooLarge { length: usize, max_length: usize },

    /// Malformed input handed over by a driver
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, Error>;
