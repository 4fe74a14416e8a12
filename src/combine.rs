// Copyright 2024-2026 The Pedersen-RS Authors.
//
// Code is licensed under GPLv3.0 License.

//! Reconstruction of secrets from shares.

use tracing::debug;
use zeroize::Zeroize;

use crate::big::Int;
use crate::chunks;
use crate::errors::Result;
use crate::pedersen::Pedersen;
use crate::polynomial;
use crate::pool;
use crate::shares::Shares;

impl Pedersen {
    /// Interpolates one chunk at x = 0 from the non-empty shareholder
    /// parts. Only the s-shares enter the reconstruction; the t-shares
    /// are blinding values used for verification alone.
    fn combine_chunk(&self, shares: &Shares, chunk_idx: usize) -> Result<Int> {
        let mut x_samples = Vec::new();
        let mut y_samples = Vec::new();

        for share_idx in 0..self.parts() {
            if let Some(part) = &shares.parts[share_idx][chunk_idx] {
                x_samples.push(shares.abscissae[share_idx].clone());
                y_samples.push(part.s_share.clone());
            }
        }

        polynomial::interpolate(&x_samples, &y_samples, &Int::new(), &self.group().q)
    }

    /// Combines the secret shares into the original secret.
    ///
    /// The shares must carry at least `threshold` non-empty parts per
    /// chunk. The commitments are not consulted; run
    /// [`verify_shares`](Pedersen::verify_shares) first when the shares
    /// come from an untrusted place.
    pub fn combine(&self, shares: &Shares) -> Result<Vec<u8>> {
        self.validate_shares(shares)?;

        let chunk_len = shares.chunk_count();
        let limit = self.adjust_conc_limit(chunk_len);

        debug!(chunks = chunk_len, "combining shares");

        let values = pool::run_chunks(
            limit,
            chunk_len,
            || Ok(()),
            |_, chunk_idx| self.combine_chunk(shares, chunk_idx),
        )?;

        let mut secret = Vec::new();

        for value in &values {
            let mut chunk = chunks::unpad(value)?;
            secret.extend_from_slice(&chunk);
            chunk.zeroize();
        }

        Ok(secret)
    }
}
