// Copyright 2024-2026 The Pedersen-RS Authors.
//
// Code is licensed under GPLv3.0 License.

//! Wire records for groups, shares and commitments.
//!
//! The records mirror the core types but keep every field optional: files
//! come from outside, and a missing field must surface as the matching
//! taxonomy error instead of a decoder panic. Big integers travel as
//! `"0x"`-prefixed hexadecimal strings.

use serde::{Deserialize, Serialize};

use crate::big::Int;
use crate::errors::{Error, Result};
use crate::group::Group;
use crate::shares::{SecretPart, Shares};

/// Wire form of a Schnorr group.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename = "group")]
pub struct GroupRecord {
    pub p: Option<Int>,
    pub q: Option<Int>,
    pub g: Option<Int>,
    pub h: Option<Int>,
}

impl From<&Group> for GroupRecord {
    fn from(group: &Group) -> GroupRecord {
        GroupRecord {
            p: Some(group.p.clone()),
            q: Some(group.q.clone()),
            g: Some(group.g.clone()),
            h: Some(group.h.clone()),
        }
    }
}

impl TryFrom<GroupRecord> for Group {
    type Error = Error;

    fn try_from(record: GroupRecord) -> Result<Group> {
        Ok(Group {
            p: record.p.ok_or(Error::NilPrime)?,
            q: record.q.ok_or(Error::NilPrime)?,
            g: record.g.ok_or(Error::NilGenerator)?,
            h: record.h.ok_or(Error::NilGenerator)?,
        })
    }
}

/// Wire form of one secret part. An entirely empty record stands for an
/// unused shareholder slot; a half-empty one is invalid.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename = "part")]
pub struct SecretPartRecord {
    pub s_share: Option<Int>,
    pub t_share: Option<Int>,
}

impl SecretPartRecord {
    fn to_part(&self) -> Result<Option<SecretPart>> {
        match (&self.s_share, &self.t_share) {
            (Some(s_share), Some(t_share)) => Ok(Some(SecretPart {
                s_share: s_share.clone(),
                t_share: t_share.clone(),
            })),
            (None, None) => Ok(None),
            _ => Err(Error::NilShare),
        }
    }
}

impl From<&Option<SecretPart>> for SecretPartRecord {
    fn from(part: &Option<SecretPart>) -> SecretPartRecord {
        match part {
            Some(part) => SecretPartRecord {
                s_share: Some(part.s_share.clone()),
                t_share: Some(part.t_share.clone()),
            },
            None => SecretPartRecord::default(),
        }
    }
}

/// Wire form of one shareholder's share file: the shareholder's abscissa
/// and one secret part per chunk.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename = "shares")]
pub struct ShareRecord {
    pub abscissa: Option<Int>,
    #[serde(default)]
    pub parts: Vec<SecretPartRecord>,
}

impl ShareRecord {
    /// Extracts the record of one shareholder out of a [`Shares`] value.
    pub fn from_shares(shares: &Shares, shareholder_idx: usize) -> ShareRecord {
        ShareRecord {
            abscissa: Some(shares.abscissae[shareholder_idx].clone()),
            parts: shares.parts[shareholder_idx]
                .iter()
                .map(SecretPartRecord::from)
                .collect(),
        }
    }
}

/// Wire form of the commitments file: one commitment vector per chunk.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename = "commitments")]
pub struct CommitmentsRecord {
    #[serde(default)]
    pub commitments: Vec<ChunkCommitmentsRecord>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename = "chunk")]
pub struct ChunkCommitmentsRecord {
    #[serde(default)]
    pub commitment: Vec<Option<Int>>,
}

impl From<&Shares> for CommitmentsRecord {
    fn from(shares: &Shares) -> CommitmentsRecord {
        CommitmentsRecord {
            commitments: shares
                .commitments
                .iter()
                .map(|chunk| ChunkCommitmentsRecord {
                    commitment: chunk.iter().cloned().map(Some).collect(),
                })
                .collect(),
        }
    }
}

/// Reassembles a [`Shares`] value from every shareholder's record plus
/// the commitments record.
pub fn shares_from_records(
    records: Vec<ShareRecord>,
    commitments: CommitmentsRecord,
) -> Result<Shares> {
    let mut abscissae = Vec::with_capacity(records.len());
    let mut parts = Vec::with_capacity(records.len());

    for record in records {
        abscissae.push(record.abscissa.ok_or(Error::NilAbscissa)?);

        parts.push(
            record
                .parts
                .iter()
                .map(SecretPartRecord::to_part)
                .collect::<Result<Vec<_>>>()?,
        );
    }

    let commitments = commitments
        .commitments
        .into_iter()
        .map(|chunk| {
            chunk
                .commitment
                .into_iter()
                .map(|value| value.ok_or(Error::NilCommitment))
                .collect::<Result<Vec<_>>>()
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Shares {
        abscissae,
        parts,
        commitments,
    })
}
