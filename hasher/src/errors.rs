use circuit::CircuitError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HasherError {
    #[error("circuit error: {0}")]
    Circuit(#[from] CircuitError),

    #[error("no {what} calibrated for field `{field}`")]
    UnsupportedField {
        field: &'static str,
        what: &'static str,
    },

    #[error("unsupported skyscraper word size of {0} bits, expected 8 or 16")]
    UnsupportedWordSize(usize),
}

pub type HasherResult<T> = std::result::Result<T, HasherError>;
