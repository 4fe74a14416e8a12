// Copyright 2024-2026 The Pedersen-RS Authors.
//
// Code is licensed under GPLv3.0 License.

use crate::big::Int;

/// A secret part associated to a shareholder: the evaluations of the
/// secret polynomial F and of the blinding polynomial K at the
/// shareholder's abscissa.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretPart {
    pub s_share: Int,
    pub t_share: Int,
}

/// The shares obtained from splitting a secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shares {
    /// The abscissae vector used for computing the ordinate values of the
    /// secret parts. There is one abscissa per shareholder, so
    /// `abscissae[shareholder_idx]` is the abscissa related to that
    /// shareholder.
    pub abscissae: Vec<Int>,

    /// The matrix of secret parts.
    ///
    /// If the secret is not representable in the cyclic group it is split
    /// into chunks, and each chunk is split into secret parts. The first
    /// index is the shareholder, the second the chunk
    /// (`parts[shareholder_idx][chunk_idx]`). `None` stands in for a
    /// missing or unused shareholder slot.
    pub parts: Vec<Vec<Option<SecretPart>>>,

    /// The matrix of commitments. The first index is the chunk, so
    /// `commitments[chunk_idx]` is the commitment vector of that chunk,
    /// one entry per polynomial coefficient.
    pub commitments: Vec<Vec<Int>>,
}

impl Shares {
    /// Number of chunks the secret was cut into.
    pub fn chunk_count(&self) -> usize {
        self.parts.first().map(Vec::len).unwrap_or(0)
    }
}
