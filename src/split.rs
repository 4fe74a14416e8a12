// Copyright 2024-2026 The Pedersen-RS Authors.
//
// Code is licensed under GPLv3.0 License.

//! Splitting secrets into verifiable shares.

use tracing::debug;

use crate::big::{Int, IntContext, MontgomeryContext};
use crate::chunks;
use crate::errors::{Error, Result};
use crate::pedersen::Pedersen;
use crate::polynomial::{self, Polynomial};
use crate::pool;
use crate::shares::{SecretPart, Shares};

struct SplitValue {
    secret_parts: Vec<SecretPart>,
    commitments: Vec<Int>,
}

impl Pedersen {
    /// Splits a secret into `parts` shares, `threshold` of which are
    /// required to reconstruct it.
    ///
    /// A secret that is not representable in the cyclic group is cut into
    /// chunks, and each chunk is split independently. The abscissae are
    /// the points the sharing polynomials are evaluated at; when `None`,
    /// distinct random abscissae in [1, q) are generated. Supplied
    /// abscissae must number at least `parts`.
    pub fn split(&self, secret: &[u8], abscissae: Option<&[Int]>) -> Result<Shares> {
        if secret.is_empty() {
            return Err(Error::EmptySecret);
        }

        let abscissae: Vec<Int> = match abscissae {
            Some(values) => {
                if values.len() < self.parts() {
                    return Err(Error::InsufficientAbscissae);
                }

                values[..self.parts()].to_vec()
            }
            None => {
                let mut ctx = IntContext::new()?;
                polynomial::rand_ints(&mut ctx, self.parts(), &Int::one(), &self.group().q, true)?
            }
        };

        let chunks = chunks::split_secret(secret, &self.group().q);
        let chunk_len = chunks.len();

        debug!(
            chunks = chunk_len,
            parts = self.parts(),
            threshold = self.threshold(),
            "splitting secret"
        );

        let limit = self.adjust_conc_limit(chunk_len);

        let values = pool::run_chunks(
            limit,
            chunk_len,
            || {
                // every worker owns its contexts, the scratchpads are not
                // thread-safe
                let ctx = IntContext::new()?;
                let mont = MontgomeryContext::new(&self.group().p)?;
                Ok((ctx, mont))
            },
            |state, index| {
                let (ctx, mont) = state;
                let chunk = &chunks[index];

                if *chunk >= self.group().q {
                    return Err(Error::InvalidPrimeSize);
                }

                self.split_chunk(mont, ctx, chunk, &abscissae)
            },
        )?;

        let mut parts = vec![vec![None; chunk_len]; self.parts()];
        let mut commitments = Vec::with_capacity(chunk_len);

        for (chunk_idx, value) in values.into_iter().enumerate() {
            for (share_idx, part) in value.secret_parts.into_iter().enumerate() {
                parts[share_idx][chunk_idx] = Some(part);
            }

            commitments.push(value.commitments);
        }

        Ok(Shares {
            abscissae,
            parts,
            commitments,
        })
    }

    /// Splits a single chunk: evaluates the secret polynomial F and the
    /// blinding polynomial K at every abscissa and commits to their
    /// coefficient pairs.
    fn split_chunk(
        &self,
        mont: &MontgomeryContext,
        ctx: &mut IntContext,
        secret: &Int,
        abscissae: &[Int],
    ) -> Result<SplitValue> {
        let degree = self.threshold() - 1;

        let f = Polynomial::new(Some(secret), degree, &self.group().q, ctx)?;
        let k = Polynomial::new(None, degree, &self.group().q, ctx)?;

        let mut secret_parts = Vec::with_capacity(self.parts());

        for abscissa in abscissae {
            let s_share = f.evaluate(abscissa)?;
            let t_share = k.evaluate(abscissa)?;

            secret_parts.push(SecretPart { s_share, t_share });
        }

        let mut commitments = Vec::with_capacity(self.threshold());

        for i in 0..self.threshold() {
            commitments.push(self.commit(mont, &f.coefficients[i], &k.coefficients[i])?);
        }

        Ok(SplitValue {
            secret_parts,
            commitments,
        })
    }
}
