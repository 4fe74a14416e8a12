// Copyright 2024-2026 The Pedersen-RS Authors.
//
// Code is licensed under GPLv3.0 License.

//! Split a secret among five shareholders, verify every share, lose two
//! of them, and reconstruct the secret from the remaining quorum.

use pedersen::{Pedersen, Result};

fn main() -> Result<()> {
    let secret = b"correct horse battery staple";

    // 3-of-5 scheme over a freshly generated 128-bit Schnorr group
    let pedersen = Pedersen::new(5, 3)?;

    let mut shares = pedersen.split(secret, None)?;
    println!(
        "split {} bytes into {} shares of {} chunks",
        secret.len(),
        pedersen.parts(),
        shares.chunk_count()
    );

    pedersen.verify_shares(&shares)?;
    println!("all shares verified against the commitments");

    // two shareholders disappear
    for chunk_idx in 0..shares.chunk_count() {
        shares.parts[1][chunk_idx] = None;
        shares.parts[4][chunk_idx] = None;
    }

    let recovered = pedersen.combine(&shares)?;
    assert_eq!(recovered, secret);
    println!(
        "recovered secret from 3 shares: {}",
        String::from_utf8_lossy(&recovered)
    );

    Ok(())
}
