// Copyright 2024-2026 The Pedersen-RS Authors.
//
// Code is licensed under GPLv3.0 License.

//! Schnorr group generation and validation.
//!
//! A group is described by two primes p and q with p = 2q+1 (p a safe
//! prime) and two generators g and h of the unique subgroup of order q in
//! ℤ*ₚ. The generators are sampled uniformly and independently, so the
//! discrete logarithm of h base g is unknown to everyone including the
//! dealer; the hiding property of the commitments rests on this.

use tracing::debug;

use crate::big::{Int, IntContext, MontgomeryContext};
use crate::errors::{Error, Result, MIN_PRIME_BIT_LEN};

/// A cyclic group used by the secret sharing scheme.
///
/// P and Q are large primes with p = 2q+1, and G and H are two generators
/// of the order-q subgroup of ℤ*ₚ. Immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub p: Int,
    pub q: Int,
    pub g: Int,
    pub h: Int,
}

impl Group {
    /// Generates a new Schnorr group whose safe prime has the given bit
    /// size. `bits` must be at least 64.
    pub fn generate(bits: usize) -> Result<Group> {
        if bits < MIN_PRIME_BIT_LEN {
            return Err(Error::InvalidPrimeSize);
        }

        debug!(bits, "generating Schnorr group");

        let mut ctx = IntContext::new()?;

        let mut p = ctx.generate_safe_prime(bits)?;
        p.set_constant_time();

        let mut q = p.sub(&Int::one()).rshift(1);
        q.set_constant_time();

        let mont = MontgomeryContext::new(&p)?;

        let g = sample_generator(&mut ctx, &mont, &p, &q)?;
        let h = sample_generator(&mut ctx, &mont, &p, &q)?;

        debug!(bits, "Schnorr group ready");

        Ok(Group { p, q, g, h })
    }

    fn validate_primes(&self, ctx: &mut IntContext) -> Result<()> {
        if self.p.bit_length() < MIN_PRIME_BIT_LEN {
            return Err(Error::InvalidPrimeSize);
        }

        if !self.p.probably_prime(ctx) || !self.q.probably_prime(ctx) {
            return Err(Error::InvalidPrime);
        }

        // safe-prime shape: q divides p-1
        let rem = self.p.sub(&Int::one()).rem(&self.q)?;
        if !rem.is_zero() {
            return Err(Error::InvalidPrime);
        }

        Ok(())
    }

    fn validate_generator(&self, generator: &Int) -> Result<()> {
        let exp = self.p.sub(&Int::one()).div(&self.q)?;
        let one = Int::one();

        // x^((p-1)/q) mod p != 1
        let cofactor_pow = generator.mod_exp(&exp, &self.p)?;
        if cofactor_pow.compare(&one).is_eq() {
            return Err(Error::InvalidGenerator);
        }

        // x^q mod p = 1
        let order_pow = generator.mod_exp(&self.q, &self.p)?;
        if !order_pow.compare(&one).is_eq() {
            return Err(Error::InvalidGenerator);
        }

        Ok(())
    }

    /// Validates an externally supplied group: primality and size of p and
    /// q, the safe-prime shape, and that g and h generate the order-q
    /// subgroup.
    pub fn validate(&self) -> Result<()> {
        let mut ctx = IntContext::new()?;

        self.validate_primes(&mut ctx)?;
        self.validate_generator(&self.g)?;
        self.validate_generator(&self.h)?;

        Ok(())
    }
}

/// Maps random elements of ℤ*ₚ into the order-q subgroup by raising them
/// to the cofactor (p-1)/q, resampling until the result is not the
/// identity.
fn sample_generator(
    ctx: &mut IntContext,
    mont: &MontgomeryContext,
    p: &Int,
    q: &Int,
) -> Result<Int> {
    let p_minus = p.sub(&Int::one());
    let two = Int::from_u64(2);

    let mut exp = p_minus.div(q)?;
    exp.set_constant_time();

    loop {
        let mut r = ctx.rand_int(&two, &p_minus)?;
        r.set_constant_time();

        let candidate = mont.mod_exp(&r, &exp)?;

        if !candidate.compare(&Int::one()).is_eq() {
            return Ok(candidate);
        }
    }
}
