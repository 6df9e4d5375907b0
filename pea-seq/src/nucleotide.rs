//! Nucleotide normalization and reverse complement.

use pea_core::{PeaError, Result};

/// Unambiguous DNA bases accepted in reference sequences.
pub const DNA_BASES: &[u8] = b"ACGT";

fn complement(b: u8) -> u8 {
    match b {
        b'A' => b'T',
        b'T' => b'A',
        b'C' => b'G',
        b'G' => b'C',
        other => other,
    }
}

/// Return the reverse complement of `seq`.
///
/// Only `A`, `C`, `G` and `T` are complemented. Any other byte (`N`,
/// lowercase bases, ...) keeps its value and only moves to its reversed
/// position.
pub fn reverse_complement(seq: &[u8]) -> Vec<u8> {
    seq.iter().rev().map(|&b| complement(b)).collect()
}

/// Uppercase `bytes` and check that every base is one of `ACGT`.
///
/// Used for amplicon, target and intended-mutation sequences, which must be
/// unambiguous.
pub fn normalize_nucleotides(bytes: impl AsRef<[u8]>) -> Result<Vec<u8>> {
    let data: Vec<u8> = bytes.as_ref().iter().map(|b| b.to_ascii_uppercase()).collect();
    for (i, &b) in data.iter().enumerate() {
        if !DNA_BASES.contains(&b) {
            return Err(PeaError::InvalidInput(format!(
                "invalid DNA byte '{}' (0x{:02X}) at position {}",
                b as char, b, i
            )));
        }
    }
    Ok(data)
}
