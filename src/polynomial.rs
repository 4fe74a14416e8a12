// Copyright 2024-2026 The Pedersen-RS Authors.
//
// Code is licensed under GPLv3.0 License.

//! Polynomials over ℤ/qℤ.
//!
//! A splitting polynomial has t = degree+1 coefficients; coefficient 0 is
//! the intercept (the secret chunk, or a random blinding value) and the
//! remaining coefficients are uniform samples. Polynomials are ephemeral:
//! they are evaluated at the abscissae and discarded.

use std::collections::HashSet;

use crate::big::{Int, IntContext};
use crate::errors::Result;

pub(crate) struct Polynomial {
    pub(crate) coefficients: Vec<Int>,
    order: Int,
}

impl Polynomial {
    /// Builds a polynomial of `degree + 1` coefficients over ℤ/orderℤ.
    ///
    /// Coefficient 0 is `intercept` when provided, otherwise uniform in
    /// [0, order). Every coefficient carries the constant-time flag since
    /// they all end up as exponents of the commitment bases.
    pub(crate) fn new(
        intercept: Option<&Int>,
        degree: usize,
        order: &Int,
        ctx: &mut IntContext,
    ) -> Result<Polynomial> {
        let mut coefficients = Vec::with_capacity(degree + 1);

        let mut c0 = match intercept {
            Some(value) => value.clone(),
            None => ctx.rand_range(order)?,
        };
        c0.set_constant_time();
        coefficients.push(c0);

        for _ in 0..degree {
            let mut coefficient = ctx.rand_range(order)?;
            coefficient.set_constant_time();
            coefficients.push(coefficient);
        }

        Ok(Polynomial {
            coefficients,
            order: order.clone(),
        })
    }

    /// Evaluates the polynomial at `x` with Horner's method; the result is
    /// in [0, order).
    ///
    /// x = 0 returns the intercept directly instead of running the
    /// low-exponent multiply chain.
    pub(crate) fn evaluate(&self, x: &Int) -> Result<Int> {
        if x.is_zero() {
            return Ok(self.coefficients[0].clone());
        }

        let degree = self.coefficients.len() - 1;
        let mut out = self.coefficients[degree].clone();

        for i in (0..degree).rev() {
            out = out.mul(x).add(&self.coefficients[i]).rem(&self.order)?;
        }

        Ok(out)
    }
}

/// Lagrange interpolation of the sample points at `x`, mod `order`.
///
/// The basis denominators (xₖ - xⱼ) must be invertible mod order, which is
/// guaranteed when order is prime and the abscissae are distinct mod
/// order.
pub(crate) fn interpolate(
    x_samples: &[Int],
    y_samples: &[Int],
    x: &Int,
    order: &Int,
) -> Result<Int> {
    let limit = x_samples.len();
    let mut result = Int::new();

    for j in 0..limit {
        let mut basis = Int::one();

        for k in 0..limit {
            if j == k {
                continue;
            }

            let num = x_samples[k].sub(x);
            let denom = x_samples[k].sub(&x_samples[j]);
            let denom_inv = denom.mod_inverse(order)?;

            basis = basis.mul(&num).mul(&denom_inv).rem(order)?;
        }

        result = result.add(&basis.mul(&y_samples[j]));
    }

    result.rem(order)
}

/// Fills a vector with `count` uniform samples in [min, max). When
/// `distinct` is set, collisions are resampled until the values are
/// pairwise distinct.
pub(crate) fn rand_ints(
    ctx: &mut IntContext,
    count: usize,
    min: &Int,
    max: &Int,
    distinct: bool,
) -> Result<Vec<Int>> {
    let mut values = Vec::with_capacity(count);
    let mut seen = HashSet::new();

    for _ in 0..count {
        let mut value = ctx.rand_int(min, max)?;

        if distinct {
            while !seen.insert(value.to_bytes_be()) {
                value = ctx.rand_int(min, max)?;
            }
        }

        values.push(value);
    }

    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order() -> Int {
        Int::from_dec_str("8817354639505262309").unwrap()
    }

    #[test]
    fn test_new_polynomial_len() {
        let mut ctx = IntContext::new().unwrap();
        let degree = 3;
        let polynomial = Polynomial::new(None, degree, &order(), &mut ctx).unwrap();

        assert_eq!(polynomial.coefficients.len(), degree + 1);
        for coefficient in &polynomial.coefficients {
            assert!(coefficient.is_constant_time());
            assert!(*coefficient < order());
        }
    }

    #[test]
    fn test_new_polynomial_intercept() {
        let mut ctx = IntContext::new().unwrap();
        let secret = Int::from_u64(42);
        let polynomial = Polynomial::new(Some(&secret), 2, &order(), &mut ctx).unwrap();

        assert_eq!(polynomial.coefficients[0], secret);
        assert_eq!(polynomial.evaluate(&Int::new()).unwrap(), secret);
    }

    #[test]
    fn test_evaluate_known_values() {
        let mut ctx = IntContext::new().unwrap();
        let order = Int::from_u64(97);
        let mut polynomial = Polynomial::new(None, 2, &order, &mut ctx).unwrap();

        // 3 + 2x + x^2
        polynomial.coefficients = vec![Int::from_u64(3), Int::from_u64(2), Int::from_u64(1)];

        assert_eq!(polynomial.evaluate(&Int::from_u64(2)).unwrap(), Int::from_u64(11));
        assert_eq!(polynomial.evaluate(&Int::from_u64(10)).unwrap(), Int::from_u64(26)); // 123 mod 97
    }

    #[test]
    fn test_interpolation_recovers_intercept() {
        let mut ctx = IntContext::new().unwrap();
        let order = order();

        for degree in [1usize, 2, 4] {
            let polynomial = Polynomial::new(None, degree, &order, &mut ctx).unwrap();

            let xs = rand_ints(&mut ctx, degree + 1, &Int::one(), &order, true).unwrap();
            let ys = xs
                .iter()
                .map(|x| polynomial.evaluate(x).unwrap())
                .collect::<Vec<_>>();

            let intercept = interpolate(&xs, &ys, &Int::new(), &order).unwrap();
            assert_eq!(intercept, polynomial.coefficients[0]);
        }
    }

    #[test]
    fn test_interpolation_at_sample_point() {
        let order = Int::from_u64(97);
        let xs = vec![Int::from_u64(1), Int::from_u64(2), Int::from_u64(3)];
        let ys = vec![Int::from_u64(6), Int::from_u64(11), Int::from_u64(18)];

        // points of x^2 + 2x + 3
        let y = interpolate(&xs, &ys, &Int::from_u64(2), &order).unwrap();
        assert_eq!(y, Int::from_u64(11));
        let c0 = interpolate(&xs, &ys, &Int::new(), &order).unwrap();
        assert_eq!(c0, Int::from_u64(3));
    }

    #[test]
    fn test_rand_ints_distinct() {
        let mut ctx = IntContext::new().unwrap();
        let max = Int::from_u64(16);

        let values = rand_ints(&mut ctx, 15, &Int::one(), &max, true).unwrap();

        let mut unique = values.iter().map(|v| v.to_bytes_be()).collect::<Vec<_>>();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), values.len());

        for value in &values {
            assert!(*value >= Int::one() && *value < max);
        }
    }
}
