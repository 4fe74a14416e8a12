// Copyright 2024-2026 The Pedersen-RS Authors.
//
// Code is licensed under GPLv3.0 License.

//! # Pedersen - A Verifiable Secret Sharing Library
//!
//! The library implements Pedersen's (t, n) verifiable secret sharing scheme in Rust.
//!
//! ## What is VSS?
//!
//! Secret sharing means a dealer can break a secret into secret shares among a group of shareholders which can reconstruct the secret only by collaboratively joining at least a threshold number of their parts. Fewer shares reveal no information about the secret.
//!
//! In addition to the plain secret sharing scheme, Pedersen VSS adds verifiability in the following way: while splitting, the dealer commits to every coefficient of the sharing polynomials with a Pedersen commitment g^s · h^t mod p over a Schnorr group. The commitments are published next to the shares, and any shareholder can verify its own share against them without contacting other shareholders and without learning anything about the other shares. The commitments are perfectly hiding, and binding as long as nobody knows the discrete logarithm of h base g.
//!
//! Secrets of arbitrary byte length are supported: a secret too large for the group order is cut into chunks, and each chunk is split and committed to independently. A self-describing padding keeps leading zero bytes intact.
//!
//! ## Example
//!
//! ```no_run
//! use pedersen::{Pedersen, Result};
//!
//! fn main() -> Result<()> {
//!     let pedersen = Pedersen::new(5, 3)?;
//!
//!     let shares = pedersen.split(b"my secret", None)?;
//!     pedersen.verify_shares(&shares)?;
//!
//!     let secret = pedersen.combine(&shares)?;
//!     assert_eq!(secret, b"my secret");
//!     Ok(())
//! }
//! ```

mod big;
mod chunks;
mod combine;
mod errors;
mod group;
mod pedersen;
mod polynomial;
mod pool;
mod shares;
mod split;
mod verify;

pub mod io;

pub use big::{Int, IntContext, MontgomeryContext};
pub use errors::{Error, Result, MIN_PRIME_BIT_LEN, MIN_THRESHOLD};
pub use group::Group;
pub use pedersen::{Pedersen, PedersenBuilder, DEFAULT_GROUP_PRIME_BIT_LEN};
pub use shares::{SecretPart, Shares};

#[cfg(test)]
pub(crate) mod test_support {
    use crate::big::Int;
    use crate::group::Group;

    /// A fixed 64-bit Schnorr group so tests skip prime generation.
    pub(crate) fn test_group() -> Group {
        Group {
            p: Int::from_dec_str("17634709279010524619").unwrap(),
            q: Int::from_dec_str("8817354639505262309").unwrap(),
            g: Int::from_dec_str("8414335786771157015").unwrap(),
            h: Int::from_dec_str("15078279289296123424").unwrap(),
        }
    }
}
