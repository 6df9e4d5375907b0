//! Sequence utilities for the pea editing-analysis workspace.
//!
//! - **Nucleotides**: [`reverse_complement`] and [`normalize_nucleotides`]
//! - **Anchor matching**: [`mismatch_count`] and [`bounded_mismatch_find`],
//!   the single-mismatch tolerant search used to locate indicator sequences
//! - **FASTQ reading**: [`read_sequences`] for fastqjoin input files
//!
//! # Example
//!
//! ```
//! use pea_seq::{bounded_mismatch_find, reverse_complement, SearchDirection};
//!
//! assert_eq!(reverse_complement(b"AACG"), b"CGTT");
//!
//! // One mismatch (T instead of G) is tolerated.
//! let hit = bounded_mismatch_find(b"ACGTAC", b"GGACTTACGG", SearchDirection::Forward);
//! assert_eq!(hit, Some(2));
//! ```

pub mod fastq;
pub mod matching;
pub mod nucleotide;

pub use fastq::read_sequences;
pub use matching::{bounded_mismatch_find, mismatch_count, SearchDirection};
pub use nucleotide::{normalize_nucleotides, reverse_complement};
