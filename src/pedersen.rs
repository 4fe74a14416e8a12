// Copyright 2024-2026 The Pedersen-RS Authors.
//
// Code is licensed under GPLv3.0 License.

//! The Pedersen secret sharing scheme object.

use std::thread;

use crate::big::{Int, MontgomeryContext};
use crate::errors::{Error, Result, MIN_THRESHOLD};
use crate::group::Group;

/// Bit size of the safe prime generated when no group is supplied.
pub const DEFAULT_GROUP_PRIME_BIT_LEN: usize = 128;

fn default_conc_limit() -> usize {
    thread::available_parallelism().map(usize::from).unwrap_or(1)
}

/// A `(threshold, parts)` Pedersen verifiable secret sharing scheme used
/// for splitting, verifying and reconstructing secrets.
///
/// A secret is split into `parts` shares, of which at least `threshold`
/// are required to reconstruct it; fewer than `threshold` shares reveal
/// nothing. Every share can be checked against the public commitment
/// matrix without contacting the other shareholders.
pub struct Pedersen {
    group: Group,
    threshold: usize,
    parts: usize,
    conc_limit: usize,
}

/// Configures and builds a [`Pedersen`] scheme.
pub struct PedersenBuilder {
    parts: usize,
    threshold: usize,
    group: Option<Group>,
    conc_limit: usize,
}

impl PedersenBuilder {
    /// Uses the provided cyclic group instead of generating one. The
    /// group is validated when the scheme is built.
    pub fn cyclic_group(mut self, group: Group) -> PedersenBuilder {
        self.group = Some(group);
        self
    }

    /// Caps the number of concurrent workers. Zero selects the number of
    /// logical CPUs.
    pub fn conc_limit(mut self, limit: usize) -> PedersenBuilder {
        self.conc_limit = limit;
        self
    }

    /// Validates the configuration and builds the scheme. When no group
    /// was supplied, a fresh one with
    /// [`DEFAULT_GROUP_PRIME_BIT_LEN`]-bit primes is generated.
    pub fn build(self) -> Result<Pedersen> {
        if self.threshold < MIN_THRESHOLD {
            return Err(Error::InvalidThreshold);
        }

        if self.parts < self.threshold {
            return Err(Error::InsufficientSharesParts);
        }

        let group = match self.group {
            Some(group) => {
                group.validate()?;
                group
            }
            None => Group::generate(DEFAULT_GROUP_PRIME_BIT_LEN)?,
        };

        let conc_limit = if self.conc_limit < 1 {
            default_conc_limit()
        } else {
            self.conc_limit
        };

        Ok(Pedersen {
            group,
            threshold: self.threshold,
            parts: self.parts,
            conc_limit,
        })
    }
}

impl Pedersen {
    /// Starts configuring a `(threshold, parts)` scheme.
    pub fn builder(parts: usize, threshold: usize) -> PedersenBuilder {
        PedersenBuilder {
            parts,
            threshold,
            group: None,
            conc_limit: 0,
        }
    }

    /// Builds a scheme with a freshly generated group and default
    /// concurrency.
    pub fn new(parts: usize, threshold: usize) -> Result<Pedersen> {
        Pedersen::builder(parts, threshold).build()
    }

    /// The number of shares required to reconstruct a secret.
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// The number of shares a secret is split into.
    pub fn parts(&self) -> usize {
        self.parts
    }

    /// The cyclic group of the scheme.
    pub fn group(&self) -> &Group {
        &self.group
    }

    /// The maximum number of concurrent workers.
    pub fn conc_limit(&self) -> usize {
        self.conc_limit
    }

    pub(crate) fn adjust_conc_limit(&self, num: usize) -> usize {
        self.conc_limit.min(num)
    }

    /// Pedersen commitment to the pair (s, t): g^s · h^t mod p.
    pub(crate) fn commit(&self, mont: &MontgomeryContext, s: &Int, t: &Int) -> Result<Int> {
        let gs = mont.mod_exp(&self.group.g, s)?;
        let ht = mont.mod_exp(&self.group.h, t)?;

        gs.mod_mul(&ht, &self.group.p)
    }
}
