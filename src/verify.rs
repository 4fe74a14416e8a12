// Copyright 2024-2026 The Pedersen-RS Authors.
//
// Code is licensed under GPLv3.0 License.

//! Verification of secret parts against the commitment matrix.
//!
//! A part (s, t) for abscissa x is valid for the commitments c₀..c_{t-1}
//! of its chunk when g^s · h^t ≡ Πₖ cₖ^(xᵏ) (mod p). The check needs no
//! other shareholder and nothing secret, so anyone holding the public
//! commitments can run it.

use tracing::debug;

use crate::big::{Int, MontgomeryContext};
use crate::errors::{Error, Result};
use crate::pedersen::Pedersen;
use crate::pool;
use crate::shares::{SecretPart, Shares};

impl Pedersen {
    /// Validates that `shares` has the shape this scheme produces.
    pub(crate) fn validate_shares(&self, shares: &Shares) -> Result<()> {
        if shares.abscissae.is_empty() && shares.parts.is_empty() {
            return Err(Error::NilShares);
        }

        if shares.abscissae.len() != self.parts() {
            return Err(Error::InsufficientAbscissae);
        }

        if shares.parts.len() != self.parts() {
            return Err(Error::InsufficientSharesParts);
        }

        let chunk_len = shares.parts[0].len();

        if shares.commitments.len() != chunk_len {
            return Err(Error::WrongSharesLen);
        }

        for chunk_idx in 0..chunk_len {
            if shares.commitments[chunk_idx].len() != self.threshold() {
                return Err(Error::InsufficientCommitments);
            }

            let mut filled = 0;

            for share_idx in 0..self.parts() {
                if shares.parts[share_idx].len() != chunk_len {
                    return Err(Error::WrongSharesLen);
                }

                if shares.parts[share_idx][chunk_idx].is_some() {
                    filled += 1;
                }
            }

            if filled < self.threshold() {
                return Err(Error::InsufficientSharesParts);
            }
        }

        Ok(())
    }

    /// The Vandermonde prefix [1, x, x², …, x^{t-1}] mod q of an abscissa.
    fn vandermonde_abscissa(&self, abscissa: &Int) -> Result<Vec<Int>> {
        let mut powers = Vec::with_capacity(self.threshold());
        powers.push(Int::one());

        for i in 1..self.threshold() {
            powers.push(powers[i - 1].mod_mul(abscissa, &self.group().q)?);
        }

        Ok(powers)
    }

    fn verify_with_context(
        &self,
        mont: &MontgomeryContext,
        vandermonde_abscissa: &[Int],
        part: &SecretPart,
        commitments: &[Int],
    ) -> Result<()> {
        if commitments.len() != self.threshold() {
            return Err(Error::InsufficientCommitments);
        }

        // rhs = c_0 * c_1^x * ... * c_j^{x^j}
        let mut rhs = commitments[0].clone();

        for j in 1..self.threshold() {
            let term = mont.mod_exp(&commitments[j], &vandermonde_abscissa[j])?;
            rhs = rhs.mod_mul(&term, &self.group().p)?;
        }

        let lhs = self.commit(mont, &part.s_share, &part.t_share)?;

        if !lhs.constant_time_eq(&rhs) {
            return Err(Error::WrongSecretPart);
        }

        Ok(())
    }

    /// Verifies a single secret part against its abscissa and the
    /// commitment vector of its chunk.
    pub fn verify(&self, abscissa: &Int, part: &SecretPart, commitments: &[Int]) -> Result<()> {
        let mont = MontgomeryContext::new(&self.group().p)?;
        let vandermonde_abscissa = self.vandermonde_abscissa(abscissa)?;

        self.verify_with_context(&mont, &vandermonde_abscissa, part, commitments)
    }

    /// Verifies every non-empty secret part of `shares`.
    ///
    /// Shareholders are checked in parallel ranges; each worker computes
    /// the Vandermonde prefix of its shareholder once and verifies every
    /// chunk against that shareholder's column.
    pub fn verify_shares(&self, shares: &Shares) -> Result<()> {
        self.validate_shares(shares)?;

        let chunk_len = shares.chunk_count();
        let limit = self.adjust_conc_limit(self.parts());

        debug!(chunks = chunk_len, parts = self.parts(), "verifying shares");

        pool::run_chunks(
            limit,
            self.parts(),
            || MontgomeryContext::new(&self.group().p),
            |mont, share_idx| {
                let vandermonde_abscissa =
                    self.vandermonde_abscissa(&shares.abscissae[share_idx])?;

                for chunk_idx in 0..chunk_len {
                    if let Some(part) = &shares.parts[share_idx][chunk_idx] {
                        self.verify_with_context(
                            mont,
                            &vandermonde_abscissa,
                            part,
                            &shares.commitments[chunk_idx],
                        )?;
                    }
                }

                Ok(())
            },
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_group;

    fn scheme(parts: usize, threshold: usize) -> Pedersen {
        Pedersen::builder(parts, threshold)
            .cyclic_group(test_group())
            .build()
            .unwrap()
    }

    fn one_part() -> Option<SecretPart> {
        Some(SecretPart {
            s_share: Int::one(),
            t_share: Int::one(),
        })
    }

    #[test]
    fn test_validate_empty_shares() {
        let pedersen = scheme(5, 3);
        let shares = Shares {
            abscissae: Vec::new(),
            parts: Vec::new(),
            commitments: Vec::new(),
        };

        assert!(matches!(
            pedersen.verify_shares(&shares),
            Err(Error::NilShares)
        ));
    }

    #[test]
    fn test_validate_empty_secret_parts() {
        let pedersen = scheme(5, 3);
        let shares = Shares {
            abscissae: vec![Int::one(); 5],
            parts: vec![vec![None]; 5],
            commitments: vec![vec![Int::one(); 3]],
        };

        assert!(matches!(
            pedersen.verify_shares(&shares),
            Err(Error::InsufficientSharesParts)
        ));
    }

    #[test]
    fn test_validate_wrong_commitments_len() {
        let pedersen = scheme(5, 3);
        let shares = Shares {
            abscissae: vec![Int::one(); 5],
            parts: vec![vec![one_part()]; 5],
            commitments: vec![vec![Int::one(); 2]],
        };

        assert!(matches!(
            pedersen.verify_shares(&shares),
            Err(Error::InsufficientCommitments)
        ));
    }

    #[test]
    fn test_validate_mismatched_rows() {
        let pedersen = scheme(5, 3);
        let shares = Shares {
            abscissae: vec![Int::one(); 5],
            parts: vec![
                vec![one_part(), one_part()],
                vec![one_part()],
                vec![one_part(), one_part()],
                vec![one_part(), one_part()],
                vec![one_part(), one_part()],
            ],
            commitments: vec![vec![Int::one(); 3]; 2],
        };

        assert!(matches!(
            pedersen.verify_shares(&shares),
            Err(Error::WrongSharesLen)
        ));
    }

    #[test]
    fn test_verify_split_shares() {
        let pedersen = scheme(5, 3);
        let shares = pedersen.split(b"verification target", None).unwrap();

        assert!(pedersen.verify_shares(&shares).is_ok());
    }

    #[test]
    fn test_verify_single_part() {
        let pedersen = scheme(5, 3);
        let shares = pedersen.split(b"test", None).unwrap();

        let part = shares.parts[2][0].as_ref().unwrap();
        assert!(pedersen
            .verify(&shares.abscissae[2], part, &shares.commitments[0])
            .is_ok());

        // wrong abscissa for this part
        assert!(matches!(
            pedersen.verify(&shares.abscissae[1], part, &shares.commitments[0]),
            Err(Error::WrongSecretPart)
        ));
    }

    #[test]
    fn test_verify_detects_corrupted_share() {
        let pedersen = scheme(5, 3);
        let mut shares = pedersen.split(b"test", None).unwrap();

        let part = shares.parts[0][0].as_mut().unwrap();
        part.s_share = part.s_share.add(&Int::one());

        assert!(matches!(
            pedersen.verify_shares(&shares),
            Err(Error::WrongSecretPart)
        ));
    }

    #[test]
    fn test_verify_detects_corrupted_blinding_share() {
        let pedersen = scheme(5, 3);
        let mut shares = pedersen.split(b"test", None).unwrap();

        let part = shares.parts[3][0].as_mut().unwrap();
        part.t_share = part.t_share.add(&Int::one());

        assert!(matches!(
            pedersen.verify_shares(&shares),
            Err(Error::WrongSecretPart)
        ));
    }

    #[test]
    fn test_verify_detects_corrupted_commitment() {
        let pedersen = scheme(5, 3);
        let mut shares = pedersen.split(b"test", None).unwrap();

        shares.commitments[0][1] = shares.commitments[0][1].add(&Int::one());

        assert!(matches!(
            pedersen.verify_shares(&shares),
            Err(Error::WrongSecretPart)
        ));
    }

    #[test]
    fn test_verify_skips_empty_parts() {
        let pedersen = scheme(5, 3);
        let mut shares = pedersen.split(b"test", None).unwrap();

        shares.parts[0][0] = None;
        shares.parts[1][0] = None;

        assert!(pedersen.verify_shares(&shares).is_ok());
    }
}
