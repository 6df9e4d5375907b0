//! Shared fixtures for unit tests.
//!
//! The fixture amplicon is 200 bp of deterministic pseudo-random DNA with the
//! target at `80..103` (PAM `100..103`). With the default configuration the
//! comparison window is `40..160` and the user region `97..127`, i.e. window
//! offsets `57..87`.

use crate::config::{AnalysisConfig, NamedSeq};

pub(crate) const TARGET_BEG: usize = 80;
pub(crate) const TARGET_END: usize = 103;

pub(crate) fn random_dna(len: usize, seed: u64) -> Vec<u8> {
    let bases = [b'A', b'C', b'G', b'T'];
    let mut seq = Vec::with_capacity(len);
    let mut state: u64 = seed;
    for _ in 0..len {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        seq.push(bases[((state >> 33) % 4) as usize]);
    }
    seq
}

pub(crate) fn amplicon() -> Vec<u8> {
    random_dna(200, 2024)
}

pub(crate) fn target() -> Vec<u8> {
    amplicon()[TARGET_BEG..TARGET_END].to_vec()
}

pub(crate) fn config() -> AnalysisConfig {
    let amplicon = String::from_utf8(amplicon()).unwrap();
    let target = String::from_utf8(target()).unwrap();
    AnalysisConfig::new(
        NamedSeq::parse(&format!("amp:{}", amplicon)).unwrap(),
        NamedSeq::parse(&format!("sg1:{}", target)).unwrap(),
    )
}

/// A different base, deterministic per input base.
pub(crate) fn other_base(b: u8) -> u8 {
    match b {
        b'A' => b'C',
        b'C' => b'T',
        b'G' => b'A',
        _ => b'G',
    }
}

/// A read spanning amplicon `10..190`.
pub(crate) fn wild_type_read() -> Vec<u8> {
    amplicon()[10..190].to_vec()
}

/// Wild-type read with the amplicon base at `pos` substituted.
pub(crate) fn substituted_read(pos: usize) -> Vec<u8> {
    let mut read = wild_type_read();
    read[pos - 10] = other_base(read[pos - 10]);
    read
}

/// Wild-type read missing amplicon bases `beg..end`.
pub(crate) fn deletion_read(beg: usize, end: usize) -> Vec<u8> {
    let amp = amplicon();
    let mut read = amp[10..beg].to_vec();
    read.extend_from_slice(&amp[end..190]);
    read
}

/// Wild-type read with `base` inserted before amplicon position `pos`.
pub(crate) fn insertion_read(pos: usize, base: u8) -> Vec<u8> {
    let amp = amplicon();
    let mut read = amp[10..pos].to_vec();
    read.push(base);
    read.extend_from_slice(&amp[pos..190]);
    read
}

/// A read unrelated to the amplicon.
pub(crate) fn junk_read() -> Vec<u8> {
    random_dna(180, 77)
}
