// Copyright 2024-2026 The Pedersen-RS Authors.
//
// Code is licensed under GPLv3.0 License.

use pedersen::{Error, Group, Int, Pedersen, Shares};
use rand::seq::SliceRandom;
use rand::{thread_rng, RngCore};

/// A fixed 64-bit Schnorr group so the scenarios skip prime generation.
fn test_schnorr_group() -> Group {
    Group {
        p: Int::from_dec_str("17634709279010524619").unwrap(),
        q: Int::from_dec_str("8817354639505262309").unwrap(),
        g: Int::from_dec_str("8414335786771157015").unwrap(),
        h: Int::from_dec_str("15078279289296123424").unwrap(),
    }
}

fn scheme(parts: usize, threshold: usize) -> Pedersen {
    Pedersen::builder(parts, threshold)
        .cyclic_group(test_schnorr_group())
        .build()
        .unwrap()
}

/// Keeps a random threshold-sized subset of parts per chunk and empties
/// the rest.
fn shares_subset(shares: &Shares, threshold: usize) -> Shares {
    let mut subset = shares.clone();
    let mut rng = thread_rng();
    let indices = (0..shares.parts.len()).collect::<Vec<_>>();

    for chunk_idx in 0..shares.chunk_count() {
        let keep = indices
            .choose_multiple(&mut rng, threshold)
            .copied()
            .collect::<Vec<_>>();

        for share_idx in &indices {
            if !keep.contains(share_idx) {
                subset.parts[*share_idx][chunk_idx] = None;
            }
        }
    }

    subset
}

#[test]
fn test_split_combine_small_secret() {
    let pedersen = scheme(5, 3);
    let secret = b"test".to_vec();

    let shares = pedersen.split(&secret, None).unwrap();

    // all shares
    assert_eq!(pedersen.combine(&shares).unwrap(), secret);

    // every 3-subset keeps working
    for _ in 0..5 {
        let subset = shares_subset(&shares, 3);
        assert_eq!(pedersen.combine(&subset).unwrap(), secret);
    }
}

#[test]
fn test_split_combine_random_secret() {
    let pedersen = scheme(10, 5);

    let mut secret = vec![0u8; 128];
    thread_rng().fill_bytes(&mut secret);

    let shares = pedersen.split(&secret, None).unwrap();
    assert_eq!(pedersen.combine(&shares).unwrap(), secret);

    let subset = shares_subset(&shares, 5);
    assert_eq!(pedersen.combine(&subset).unwrap(), secret);
}

#[test]
fn test_split_combine_preserves_leading_zeros() {
    let pedersen = scheme(10, 5);
    let secret = vec![0, 0, 0, 1, 2, 3, 4, 5];

    let shares = pedersen.split(&secret, None).unwrap();
    assert_eq!(pedersen.combine(&shares).unwrap(), secret);

    let subset = shares_subset(&shares, 5);
    assert_eq!(pedersen.combine(&subset).unwrap(), secret);
}

#[test]
fn test_split_combine_interior_zero_chunks() {
    let pedersen = scheme(10, 5);
    let secret = vec![
        0x00, 0x00, 0x2d, 0x33, 0x00, 0x00, 0xe7, 0x00, 0x00, 0x1c, 0x82, 0xa4, 0x4c, 0xcb,
        0x11, 0x88,
    ];

    let shares = pedersen.split(&secret, None).unwrap();
    assert_eq!(pedersen.combine(&shares).unwrap(), secret);
}

#[test]
fn test_split_with_explicit_abscissae_verifies() {
    let pedersen = scheme(5, 3);
    let abscissae = (1..=5).map(Int::from_u64).collect::<Vec<_>>();

    let shares = pedersen.split(b"test", Some(abscissae.as_slice())).unwrap();

    assert_eq!(shares.abscissae, abscissae);
    assert!(pedersen.verify_shares(&shares).is_ok());
    assert_eq!(pedersen.combine(&shares).unwrap(), b"test");
}

#[test]
fn test_emptied_parts_still_verify_and_combine() {
    let pedersen = scheme(5, 3);
    let secret = b"test".to_vec();

    let mut shares = pedersen.split(&secret, None).unwrap();

    // two shareholders lose their first chunk, threshold still holds
    shares.parts[0][0] = None;
    shares.parts[1][0] = None;

    assert!(pedersen.verify_shares(&shares).is_ok());
    assert_eq!(pedersen.combine(&shares).unwrap(), secret);
}

#[test]
fn test_corrupted_share_detected() {
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
fn test_threshold_above_parts_rejected() {
    assert!(matches!(
        Pedersen::builder(3, 5)
            .cyclic_group(test_schnorr_group())
            .build(),
        Err(Error::InsufficientSharesParts)
    ));
}

#[test]
fn test_commitment_equation_holds() {
    let pedersen = scheme(5, 3);
    let group = test_schnorr_group();
    let shares = pedersen.split(b"commitment check", None).unwrap();

    for (share_idx, abscissa) in shares.abscissae.iter().enumerate() {
        for (chunk_idx, commitments) in shares.commitments.iter().enumerate() {
            let part = shares.parts[share_idx][chunk_idx].as_ref().unwrap();

            // lhs = g^s * h^t
            let lhs = group
                .g
                .mod_exp(&part.s_share, &group.p)
                .unwrap()
                .mod_mul(&group.h.mod_exp(&part.t_share, &group.p).unwrap(), &group.p)
                .unwrap();

            // rhs = prod c_k^(x^k)
            let mut rhs = Int::one();
            let mut power = Int::one();
            for commitment in commitments {
                rhs = rhs
                    .mod_mul(&commitment.mod_exp(&power, &group.p).unwrap(), &group.p)
                    .unwrap();
                power = power.mod_mul(abscissa, &group.q).unwrap();
            }

            assert_eq!(lhs, rhs);
        }
    }
}

#[test]
fn test_generated_group_roundtrip() {
    let group = Group::generate(256).unwrap();
    assert!(group.validate().is_ok());

    let pedersen = Pedersen::builder(5, 3)
        .cyclic_group(group)
        .build()
        .unwrap();

    let mut secret = vec![0u8; 64];
    thread_rng().fill_bytes(&mut secret);

    let shares = pedersen.split(&secret, None).unwrap();
    assert!(pedersen.verify_shares(&shares).is_ok());
    assert_eq!(pedersen.combine(&shares).unwrap(), secret);

    let subset = shares_subset(&shares, 3);
    assert_eq!(pedersen.combine(&subset).unwrap(), secret);
}

#[test]
fn test_concurrency_limit_invariance() {
    let mut secret = vec![0u8; 256];
    thread_rng().fill_bytes(&mut secret);

    let serial = Pedersen::builder(5, 3)
        .cyclic_group(test_schnorr_group())
        .conc_limit(1)
        .build()
        .unwrap();
    let parallel = Pedersen::builder(5, 3)
        .cyclic_group(test_schnorr_group())
        .conc_limit(16)
        .build()
        .unwrap();

    let shares = serial.split(&secret, None).unwrap();

    assert!(serial.verify_shares(&shares).is_ok());
    assert!(parallel.verify_shares(&shares).is_ok());
    assert_eq!(serial.combine(&shares).unwrap(), secret);
    assert_eq!(parallel.combine(&shares).unwrap(), secret);

    let shares = parallel.split(&secret, None).unwrap();
    assert!(serial.verify_shares(&shares).is_ok());
    assert_eq!(serial.combine(&shares).unwrap(), secret);
}

#[test]
fn test_default_group_generation() {
    // no group supplied: a fresh 128-bit group is generated
    let pedersen = Pedersen::new(5, 3).unwrap();

    assert_eq!(pedersen.group().p.bit_length(), 128);
    assert!(pedersen.group().validate().is_ok());

    let shares = pedersen.split(b"generated group", None).unwrap();
    assert!(pedersen.verify_shares(&shares).is_ok());
    assert_eq!(pedersen.combine(&shares).unwrap(), b"generated group");
}
