//! Pairwise alignment for the pea editing-analysis workspace.
//!
//! Provides global alignment (Needleman-Wunsch with affine gaps and `f64`
//! scores), an alignment type carrying an explicit marker track, and the
//! un-gapped → gapped [`CoordinateMap`] used to cut a user region out of an
//! alignment.
//!
//! # Quick start
//!
//! ```
//! use pea_align::{GlobalAligner, PairwiseAligner};
//!
//! let aligner = GlobalAligner::for_indels(true);
//! let aln = aligner.align(b"ACGTACGT", b"ACGAACGT").unwrap();
//! assert_eq!(aln.markers, b"|||.||||");
//! ```

pub mod aligner;
pub mod mapping;
pub mod needleman_wunsch;
pub mod scoring;
pub mod types;

pub use aligner::{GlobalAligner, PairwiseAligner};
pub use mapping::CoordinateMap;
pub use needleman_wunsch::needleman_wunsch;
pub use scoring::ScoringScheme;
pub use types::{PairwiseAlignment, GAP, MATCH, MISMATCH};
