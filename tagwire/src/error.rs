use crate::serde::WireType;
use crate::value::Kind;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("short read: needed {needed} bytes, {available} available")]
    ShortRead { needed: usize, available: usize },

    #[error("capacity exceeded: needed {needed} bytes, {available} available")]
    CapacityExceeded { needed: usize, available: usize },

    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: WireType, found: WireType },

    #[error("unexpected null where {expected} was expected")]
    UnexpectedNull { expected: WireType },

    #[error("kind mismatch: expected {expected}, found {found}")]
    KindMismatch { expected: Kind, found: Kind },

    #[error("invalid UTF-8 in string payload")]
    InvalidUtf8,

    #[error("{what} out of range")]
    OutOfRange { what: &'static str },

    #[error("container block declared {declared} bytes but elements consumed {consumed}")]
    LengthMismatch { declared: usize, consumed: usize },

    #[error("nesting deeper than {max}")]
    DepthExceeded { max: usize },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
