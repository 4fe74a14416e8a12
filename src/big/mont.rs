// Copyright 2024-2026 The Pedersen-RS Authors.
//
// Code is licensed under GPLv3.0 License.

//! Montgomery modular arithmetic.
//!
//! A [`MontgomeryContext`] precomputes the Montgomery constants of an odd
//! modulus n once, so repeated exponentiations with the same modulus avoid
//! per-call divisions: with R = 2^k (k limb-aligned, R > n), products are
//! reduced with REDC, which costs two multiplications and shifts instead
//! of a division.

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

use super::{extend_gcd, Int};
use crate::errors::{Error, Result};

const LIMB_BITS: usize = 64;

/// Precomputed Montgomery form of an odd modulus.
pub struct MontgomeryContext {
    n: BigUint,
    rbits: usize,
    mask: BigUint,
    n_prime: BigUint,
    r_mod_n: BigUint,
    r2_mod_n: BigUint,
}

impl MontgomeryContext {
    /// Derives the Montgomery constants for `modulus`, which must be odd
    /// and greater than one.
    pub fn new(modulus: &Int) -> Result<MontgomeryContext> {
        if modulus.value.is_negative() || modulus.value.is_zero() {
            return Err(Error::backend("mont_ctx_set", "modulus must be positive"));
        }

        let n = modulus.value.magnitude().clone();

        if n.is_one() || !n.is_odd() {
            return Err(Error::backend("mont_ctx_set", "modulus must be odd"));
        }

        let nbits = n.bits() as usize;
        let rbits = (nbits + LIMB_BITS - 1) / LIMB_BITS * LIMB_BITS;
        let r = BigUint::one() << rbits;
        let mask = &r - BigUint::one();

        // n is odd, so n^-1 mod R exists.
        let (_, x, _) = extend_gcd(BigInt::from(n.clone()), BigInt::from(r.clone()));
        let n_inv = x.mod_floor(&BigInt::from(r.clone()));
        let n_prime = (BigInt::from(r.clone()) - n_inv)
            .magnitude()
            .clone()
            & &mask;

        let r_mod_n = &r % &n;
        let r2_mod_n = (&r_mod_n * &r_mod_n) % &n;

        Ok(MontgomeryContext {
            n,
            rbits,
            mask,
            n_prime,
            r_mod_n,
            r2_mod_n,
        })
    }

    /// Montgomery reduction: returns t·R⁻¹ mod n for t < R·n.
    fn redc(&self, t: BigUint) -> BigUint {
        let m = ((&t & &self.mask) * &self.n_prime) & &self.mask;
        let u = (t + m * &self.n) >> self.rbits;

        if u >= self.n {
            u - &self.n
        } else {
            u
        }
    }

    fn to_mont(&self, x: &BigUint) -> BigUint {
        self.redc(x * &self.r2_mod_n)
    }

    fn mont_mul(&self, a: &BigUint, b: &BigUint) -> BigUint {
        self.redc(a * b)
    }

    fn reduce(&self, x: &Int) -> BigUint {
        x.value
            .mod_floor(&BigInt::from(self.n.clone()))
            .magnitude()
            .clone()
    }

    /// Returns `(a * b) mod n` through the Montgomery representation.
    pub fn mod_mul(&self, a: &Int, b: &Int) -> Int {
        let am = self.to_mont(&self.reduce(a));
        let bm = self.to_mont(&self.reduce(b));
        let value = self.redc(self.mont_mul(&am, &bm));

        Int {
            value: BigInt::from(value),
            const_time: a.const_time || b.const_time,
        }
    }

    /// Returns `base^exponent mod n`. The exponent must be non-negative.
    ///
    /// A constant-time-flagged base or exponent selects a fixed-sequence
    /// ladder performing one multiplication and one squaring per modulus
    /// bit regardless of the exponent's bit pattern; otherwise a plain
    /// square-and-multiply over the exponent bits is used.
    pub fn mod_exp(&self, base: &Int, exponent: &Int) -> Result<Int> {
        if exponent.value.is_negative() {
            return Err(Error::backend("mod_exp_mont", "negative exponent"));
        }

        let b = self.to_mont(&self.reduce(base));
        let e = exponent.value.magnitude();
        let const_time = base.const_time || exponent.const_time;

        let acc = if const_time {
            self.ladder_exp(b, e)
        } else {
            self.window_exp(b, e)
        };

        Ok(Int {
            value: BigInt::from(self.redc(acc)),
            const_time,
        })
    }

    fn window_exp(&self, b: BigUint, e: &BigUint) -> BigUint {
        let mut acc = self.r_mod_n.clone();

        for i in (0..e.bits()).rev() {
            acc = self.mont_mul(&acc, &acc);
            if e.bit(i) {
                acc = self.mont_mul(&acc, &b);
            }
        }

        acc
    }

    fn ladder_exp(&self, b: BigUint, e: &BigUint) -> BigUint {
        let mut r0 = self.r_mod_n.clone();
        let mut r1 = b;
        let bits = (self.rbits as u64).max(e.bits());

        for i in (0..bits).rev() {
            if e.bit(i) {
                r0 = self.mont_mul(&r0, &r1);
                r1 = self.mont_mul(&r1, &r1);
            } else {
                r1 = self.mont_mul(&r0, &r1);
                r0 = self.mont_mul(&r0, &r0);
            }
        }

        r0
    }
}
