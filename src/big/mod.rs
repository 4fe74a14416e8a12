// Copyright 2024-2026 The Pedersen-RS Authors.
//
// Code is licensed under GPLv3.0 License.

//! Big-integer facade.
//!
//! The crate never touches `num-bigint` directly outside of this module.
//! [`Int`] wraps a signed arbitrary-precision integer together with a
//! constant-time flag: flagged values request data-independent algorithms
//! for exponent-sensitive operations, and the flag taints every result
//! computed from a flagged operand. [`IntContext`] is the per-worker
//! scratch context owning the CSPRNG; it is deliberately not `Sync`, one
//! per worker thread.

mod mont;
mod prime;

pub use mont::MontgomeryContext;

use std::cmp::Ordering;
use std::fmt;

use num_bigint::{BigInt, RandBigInt, Sign};
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};
use rand::rngs::{OsRng, StdRng};
use rand::SeedableRng;

use crate::errors::{Error, Result};

/// A signed multi-precision integer.
#[derive(Debug, Clone, Default)]
pub struct Int {
    value: BigInt,
    const_time: bool,
}

impl Int {
    /// Returns a new `Int` with value zero.
    pub fn new() -> Int {
        Int::default()
    }

    /// Returns an `Int` with value one.
    pub fn one() -> Int {
        Int::from_bigint(BigInt::one())
    }

    /// Returns an `Int` holding `v`.
    pub fn from_u64(v: u64) -> Int {
        Int::from_bigint(BigInt::from(v))
    }

    /// Interprets `bytes` as a big-endian unsigned integer.
    pub fn from_bytes_be(bytes: &[u8]) -> Int {
        Int::from_bigint(BigInt::from_bytes_be(Sign::Plus, bytes))
    }

    /// Parses a decimal string, with an optional leading `-`.
    pub fn from_dec_str(s: &str) -> Result<Int> {
        BigInt::parse_bytes(s.as_bytes(), 10)
            .map(Int::from_bigint)
            .ok_or(Error::InvalidParse)
    }

    /// Parses a hexadecimal string without any prefix.
    pub fn from_hex_str(s: &str) -> Result<Int> {
        BigInt::parse_bytes(s.as_bytes(), 16)
            .map(Int::from_bigint)
            .ok_or(Error::InvalidParse)
    }

    /// Parses a textual integer.
    ///
    /// A `0x`/`0X` prefix selects hexadecimal. Without a prefix the string
    /// is tried as decimal first and as hexadecimal second.
    pub fn parse(s: &str) -> Result<Int> {
        if s.is_empty() {
            return Ok(Int::new());
        }

        if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            return Int::from_hex_str(hex);
        }

        Int::from_dec_str(s).or_else(|_| Int::from_hex_str(s))
    }

    fn from_bigint(value: BigInt) -> Int {
        Int {
            value,
            const_time: false,
        }
    }

    /// Requests data-independent algorithms for operations where this
    /// value is exponent-sensitive. The flag propagates to results.
    pub fn set_constant_time(&mut self) {
        self.const_time = true;
    }

    /// Reports whether the constant-time flag is set.
    pub fn is_constant_time(&self) -> bool {
        self.const_time
    }

    fn tainted(&self, other: &Int, value: BigInt) -> Int {
        Int {
            value,
            const_time: self.const_time || other.const_time,
        }
    }

    /// Returns `self + other`.
    pub fn add(&self, other: &Int) -> Int {
        self.tainted(other, &self.value + &other.value)
    }

    /// Returns `self - other`.
    pub fn sub(&self, other: &Int) -> Int {
        self.tainted(other, &self.value - &other.value)
    }

    /// Returns `self * other`.
    pub fn mul(&self, other: &Int) -> Int {
        self.tainted(other, &self.value * &other.value)
    }

    /// Returns `self / other` rounded towards negative infinity.
    pub fn div(&self, other: &Int) -> Result<Int> {
        if other.value.is_zero() {
            return Err(Error::backend("div", "division by zero"));
        }

        Ok(self.tainted(other, self.value.div_floor(&other.value)))
    }

    /// Returns `self mod modulus`, non-negative for a positive modulus.
    pub fn rem(&self, modulus: &Int) -> Result<Int> {
        if modulus.value.is_zero() {
            return Err(Error::backend("mod", "division by zero"));
        }

        Ok(self.tainted(modulus, self.value.mod_floor(&modulus.value)))
    }

    /// Returns `(self * other) mod modulus`.
    pub fn mod_mul(&self, other: &Int, modulus: &Int) -> Result<Int> {
        self.mul(other).rem(modulus)
    }

    /// Returns `self^exponent mod modulus`.
    ///
    /// The exponent must be non-negative. For repeated exponentiations with
    /// the same modulus, [`MontgomeryContext::mod_exp`] avoids the per-call
    /// divisions.
    pub fn mod_exp(&self, exponent: &Int, modulus: &Int) -> Result<Int> {
        if exponent.value.is_negative() {
            return Err(Error::backend("mod_exp", "negative exponent"));
        }
        if modulus.value.is_zero() {
            return Err(Error::backend("mod_exp", "division by zero"));
        }

        let base = self.value.mod_floor(&modulus.value);
        let value = base.modpow(&exponent.value, &modulus.value);

        Ok(Int {
            value,
            const_time: self.const_time || exponent.const_time || modulus.const_time,
        })
    }

    /// Returns the multiplicative inverse of `self` in ℤ/modulusℤ.
    pub fn mod_inverse(&self, modulus: &Int) -> Result<Int> {
        if modulus.value.is_zero() {
            return Err(Error::backend("mod_inverse", "division by zero"));
        }

        let a = self.value.mod_floor(&modulus.value);
        let (g, x, _) = extend_gcd(a, modulus.value.clone());

        if !g.is_one() {
            return Err(Error::backend("mod_inverse", "no inverse exists"));
        }

        Ok(self.tainted(modulus, x.mod_floor(&modulus.value)))
    }

    /// Returns `self << n`.
    pub fn lshift(&self, n: usize) -> Int {
        Int {
            value: &self.value << n,
            const_time: self.const_time,
        }
    }

    /// Returns `self >> n`.
    pub fn rshift(&self, n: usize) -> Int {
        Int {
            value: &self.value >> n,
            const_time: self.const_time,
        }
    }

    /// Returns `self | other`.
    pub fn bitor(&self, other: &Int) -> Int {
        self.tainted(other, &self.value | &other.value)
    }

    /// Returns `self & other`.
    pub fn bitand(&self, other: &Int) -> Int {
        self.tainted(other, &self.value & &other.value)
    }

    /// Compares `self` and `other` numerically.
    pub fn compare(&self, other: &Int) -> Ordering {
        self.value.cmp(&other.value)
    }

    /// Reports whether the value is zero.
    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    /// Returns the bit length of the absolute value. Zero has length 0.
    pub fn bit_length(&self) -> usize {
        self.value.bits() as usize
    }

    /// Returns the byte length of the absolute value. Zero has length 0.
    pub fn byte_length(&self) -> usize {
        (self.bit_length() + 7) / 8
    }

    /// Tests whether the value is a probable prime.
    ///
    /// Performs trial division by a set of small primes followed by at
    /// least 64 rounds of Miller-Rabin (128 rounds for values larger than
    /// 2048 bits), for a false positive rate of at most 2^-128 (2^-256
    /// respectively). Values below two and negative values are not prime.
    pub fn probably_prime(&self, ctx: &mut IntContext) -> bool {
        if self.value.is_negative() {
            return false;
        }

        prime::probably_prime(self.value.magnitude(), &mut ctx.rng)
    }

    /// Returns the absolute value as a minimal big-endian byte string.
    /// Zero encodes to an empty slice.
    pub fn to_bytes_be(&self) -> Vec<u8> {
        if self.value.is_zero() {
            return Vec::new();
        }

        self.value.magnitude().to_bytes_be()
    }

    /// Fills `buf` with the absolute value as a big-endian byte string,
    /// left-padded with zeros. Fails when the value does not fit.
    pub fn fill_bytes_be(&self, buf: &mut [u8]) -> Result<()> {
        let bytes = self.to_bytes_be();

        if bytes.len() > buf.len() {
            return Err(Error::backend("fill_bytes", "buffer too small to fit value"));
        }

        let offset = buf.len() - bytes.len();
        buf[..offset].fill(0);
        buf[offset..].copy_from_slice(&bytes);

        Ok(())
    }

    /// Returns the lowercase hexadecimal representation, `-`-prefixed for
    /// negative values.
    pub fn to_hex(&self) -> String {
        self.value.to_str_radix(16)
    }

    /// Returns the value as a `u64` when it fits.
    pub fn to_u64(&self) -> Option<u64> {
        self.value.to_u64()
    }

    /// Compares `self` and `other` by the byte contents of their
    /// big-endian forms in time dependent only on their lengths.
    pub fn constant_time_eq(&self, other: &Int) -> bool {
        let a = self.to_bytes_be();
        let b = other.to_bytes_be();

        if a.len() != b.len() {
            return false;
        }

        let mut diff = 0u8;
        for (x, y) in a.iter().zip(b.iter()) {
            diff |= x ^ y;
        }

        diff == 0
    }
}

impl serde::Serialize for Int {
    /// Marshals as `"0x"` followed by the lowercase hexadecimal form.
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&format!("0x{}", self.to_hex()))
    }
}

impl<'de> serde::Deserialize<'de> for Int {
    /// Unmarshals `0x`-prefixed hexadecimal, plain decimal, or plain
    /// hexadecimal text (see [`Int::parse`]).
    fn deserialize<D>(deserializer: D) -> std::result::Result<Int, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let text = <String as serde::Deserialize>::deserialize(deserializer)?;
        Int::parse(&text).map_err(serde::de::Error::custom)
    }
}

impl PartialEq for Int {
    fn eq(&self, other: &Int) -> bool {
        self.value == other.value
    }
}

impl Eq for Int {}

impl PartialOrd for Int {
    fn partial_cmp(&self, other: &Int) -> Option<Ordering> {
        Some(self.compare(other))
    }
}

impl Ord for Int {
    fn cmp(&self, other: &Int) -> Ordering {
        self.compare(other)
    }
}

impl fmt::Display for Int {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Finds the greatest common divisor of *a* and *b* together with the
/// Bézout coefficients *x* and *y* such that *ax* + *by* = gcd(*a*, *b*).
///
/// This function is an implementation of the [extended Euclidean
/// algorithm](https://en.wikipedia.org/wiki/Extended_Euclidean_algorithm).
fn extend_gcd(a: BigInt, b: BigInt) -> (BigInt, BigInt, BigInt) {
    if a.is_zero() {
        (b, BigInt::zero(), BigInt::one())
    } else {
        let (g, x, y) = extend_gcd(b.mod_floor(&a), a.clone());
        (g, y - (b.div_floor(&a)) * &x, x)
    }
}

/// Per-worker scratch context for operations that consume randomness.
///
/// Owns a CSPRNG seeded from the operating system. The context is not
/// shareable across threads; every worker creates its own on entry and
/// drops it when its scope ends.
pub struct IntContext {
    rng: StdRng,
}

impl IntContext {
    /// Creates a context with a freshly seeded CSPRNG.
    pub fn new() -> Result<IntContext> {
        let rng = StdRng::from_rng(OsRng)
            .map_err(|_| Error::backend("int_context", "CSPRNG seeding failed"))?;

        Ok(IntContext { rng })
    }

    /// Generates a cryptographically strong pseudo-random number in the
    /// range [0, max).
    pub fn rand_range(&mut self, max: &Int) -> Result<Int> {
        if max.value <= BigInt::zero() {
            return Err(Error::backend("rand_range", "non-positive range"));
        }

        let value = self.rng.gen_bigint_range(&BigInt::zero(), &max.value);
        Ok(Int::from_bigint(value))
    }

    /// Generates a cryptographically strong pseudo-random number in the
    /// range [min, max).
    pub fn rand_int(&mut self, min: &Int, max: &Int) -> Result<Int> {
        if max.value <= min.value {
            return Err(Error::backend("rand_range", "empty range"));
        }

        let value = self.rng.gen_bigint_range(&min.value, &max.value);
        Ok(Int::from_bigint(value))
    }

    /// Generates a probable safe prime of the requested bit length, i.e. a
    /// prime p such that (p-1)/2 is also prime.
    pub fn generate_safe_prime(&mut self, bits: usize) -> Result<Int> {
        let p = prime::generate_safe_prime(bits, &mut self.rng)?;
        Ok(Int::from_bigint(BigInt::from_biguint(Sign::Plus, p)))
    }
}
