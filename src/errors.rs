// Copyright 2024-2026 The Pedersen-RS Authors.
//
// Code is licensed under GPLv3.0 License.

//! Error taxonomy of the crate.
//!
//! Input-shape errors are detected eagerly at the API boundary and returned
//! without side effects. Cryptographic validation errors signal dishonest or
//! corrupt inputs. Backend errors wrap a failing big-integer operation with
//! the operation's name.

use thiserror::Error;

/// Minimum accepted threshold for a secret sharing scheme.
pub const MIN_THRESHOLD: usize = 2;

/// Minimum accepted bit length for the group primes.
pub const MIN_PRIME_BIT_LEN: usize = 64;

/// The error type for every fallible operation of the crate.
#[derive(Debug, Error)]
pub enum Error {
    /// A required prime is missing from a decoded group record.
    #[error("prime cannot be nil")]
    NilPrime,

    /// The group primes are below the minimum accepted size.
    #[error("prime number size must be at least {} bits", MIN_PRIME_BIT_LEN)]
    InvalidPrimeSize,

    /// A group prime failed the primality or safe-prime shape checks.
    #[error("invalid prime")]
    InvalidPrime,

    /// A required generator is missing from a decoded group record.
    #[error("generator cannot be nil")]
    NilGenerator,

    /// An invalid configuration value was supplied.
    #[error("invalid options: {0}")]
    InvalidOptions(String),

    /// A generator is not a generator of the order-q subgroup.
    #[error("invalid generator")]
    InvalidGenerator,

    /// The threshold is below [`MIN_THRESHOLD`].
    #[error("threshold must be at least {}", MIN_THRESHOLD)]
    InvalidThreshold,

    /// An empty secret cannot be split.
    #[error("cannot split an empty secret")]
    EmptySecret,

    /// Fewer abscissae than shareholders were supplied.
    #[error("abscissae cannot be less than parts")]
    InsufficientAbscissae,

    /// The shares object carries no shareholder data at all.
    #[error("shares cannot be nil")]
    NilShares,

    /// A secret part carries only one of its two ordinates.
    #[error("s_share or t_share cannot be nil")]
    NilShare,

    /// A required abscissa is missing from a decoded share record.
    #[error("abscissa cannot be nil")]
    NilAbscissa,

    /// A commitment entry is missing from a decoded commitments record.
    #[error("commitment cannot be nil")]
    NilCommitment,

    /// A chunk's commitment vector length differs from the threshold.
    #[error("commitments length cannot be different from threshold")]
    InsufficientCommitments,

    /// Fewer shareholder rows, or fewer non-empty parts for some chunk,
    /// than the scheme requires.
    #[error("insufficient shares parts")]
    InsufficientSharesParts,

    /// Shares rows and commitments rows disagree on the chunk count.
    #[error("shares parts length and commitments parts length must be equal")]
    WrongSharesLen,

    /// A secret part does not match its Pedersen commitments.
    #[error("wrong secret part")]
    WrongSecretPart,

    /// A textual big integer could not be parsed.
    #[error("invalid parse")]
    InvalidParse,

    /// A big-integer backend operation failed.
    #[error("bignum {op}: {reason}")]
    Backend {
        op: &'static str,
        reason: &'static str,
    },

    /// A filesystem operation failed.
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// Encoding or decoding a wire record failed.
    #[error("{context}: {message}")]
    Encoding { context: String, message: String },
}

impl Error {
    pub(crate) fn backend(op: &'static str, reason: &'static str) -> Self {
        Error::Backend { op, reason }
    }

    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Error::Io {
            context: context.into(),
            source,
        }
    }

    pub(crate) fn encoding(context: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Encoding {
            context: context.into(),
            message: message.into(),
        }
    }
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
