use std::fmt;

use thiserror::Error;

/// The family of a recorded constraint, reported when it does not hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    Equality,
    Boolean,
    RangeCheck(usize),
    Lookup,
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintKind::Equality => write!(f, "equality"),
            ConstraintKind::Boolean => write!(f, "boolean"),
            ConstraintKind::RangeCheck(bits) => write!(f, "{bits}-bit range check"),
            ConstraintKind::Lookup => write!(f, "lookup"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CircuitError {
    #[error("unknown hint `{0}`")]
    UnknownHint(String),

    #[error("hint `{name}` expects {expected} {what}, got {actual}")]
    HintArity {
        name: &'static str,
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("hint `{name}` failed: {reason}")]
    HintFailed { name: &'static str, reason: String },

    #[error("unsupported word size of {0} bits")]
    UnsupportedWordSize(usize),

    #[error("{kind} constraint #{index} is not satisfied")]
    Unsatisfied { kind: ConstraintKind, index: usize },
}

pub type CircuitResult<T> = std::result::Result<T, CircuitError>;
