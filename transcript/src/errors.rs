use circuit::CircuitError;
use fs_hashers::HasherError;
use thiserror::Error;

use crate::OpKind;

/// Malformed protocol description.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GrammarError {
    #[error("unknown operation kind {byte:#04x} at offset {offset}")]
    UnknownOpKind { offset: usize, byte: u8 },

    #[error("operation size at offset {offset} does not fit in 64 bits")]
    SizeOverflow { offset: usize },

    #[error("invalid label {label:?}: {reason}")]
    InvalidLabel { label: String, reason: &'static str },

    #[error("{0} operations must have a positive size")]
    ZeroSize(OpKind),
}

/// The transcript does not follow the protocol description.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolMismatch {
    #[error("{requested} of {size} requested after the protocol ended")]
    EmptyQueue { requested: OpKind, size: u64 },

    #[error("expected {expected} `{label}`, got {requested}")]
    KindMismatch {
        expected: OpKind,
        label: String,
        requested: OpKind,
    },

    #[error("{kind} `{label}` has {remaining} units left, {requested} requested")]
    SizeExceeded {
        kind: OpKind,
        label: String,
        remaining: u64,
        requested: u64,
    },

    #[error("protocol unfinished, next operation is {kind} `{label}` ({remaining} operations left)")]
    Unfinished {
        kind: OpKind,
        label: String,
        remaining: usize,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TranscriptError {
    #[error(transparent)]
    Grammar(#[from] GrammarError),

    #[error(transparent)]
    Protocol(#[from] ProtocolMismatch),

    #[error(transparent)]
    Hasher(#[from] HasherError),

    #[error(transparent)]
    Circuit(#[from] CircuitError),

    #[error("transcript exhausted: {requested} bytes requested, {remaining} left")]
    TranscriptExhausted { requested: usize, remaining: usize },

    #[error("no safe byte count calibrated for field `{0}`")]
    UnsupportedField(&'static str),

    #[error("unknown permutation `{0}`")]
    UnknownPermutation(String),
}

pub type TranscriptResult<T> = std::result::Result<T, TranscriptError>;
