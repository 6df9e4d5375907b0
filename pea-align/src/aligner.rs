//! The pairwise aligner seam used by the editing pipeline.

use crate::needleman_wunsch::needleman_wunsch;
use crate::scoring::ScoringScheme;
use crate::types::PairwiseAlignment;
use pea_core::Result;

/// A pairwise aligner returning the single best-scoring alignment.
///
/// `target` is the reference window, `query` the read fragment. The
/// returned tracks are ordered target, markers, query.
pub trait PairwiseAligner {
    fn align(&self, target: &[u8], query: &[u8]) -> Result<PairwiseAlignment>;
}

/// Global affine-gap aligner (Needleman-Wunsch / Gotoh).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GlobalAligner {
    scoring: ScoringScheme,
}

impl GlobalAligner {
    pub fn new(scoring: ScoringScheme) -> Self {
        Self { scoring }
    }

    /// Aligner with the editing-analysis scoring, see [`ScoringScheme::for_indels`].
    pub fn for_indels(indel_in_alignment: bool) -> Self {
        Self::new(ScoringScheme::for_indels(indel_in_alignment))
    }

    pub fn scoring(&self) -> &ScoringScheme {
        &self.scoring
    }
}

impl PairwiseAligner for GlobalAligner {
    fn align(&self, target: &[u8], query: &[u8]) -> Result<PairwiseAlignment> {
        needleman_wunsch(query, target, &self.scoring)
    }
}

impl<A: PairwiseAligner + ?Sized> PairwiseAligner for &A {
    fn align(&self, target: &[u8], query: &[u8]) -> Result<PairwiseAlignment> {
        (**self).align(target, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GAP;

    #[test]
    fn target_track_comes_first() {
        let aligner = GlobalAligner::default();
        let aln = aligner.align(b"ACGTTGCATC", b"ACGTTGCTATC").unwrap();
        let target: Vec<u8> = aln.aligned_target.iter().copied().filter(|&b| b != GAP).collect();
        let query: Vec<u8> = aln.aligned_query.iter().copied().filter(|&b| b != GAP).collect();
        assert_eq!(target, b"ACGTTGCATC");
        assert_eq!(query, b"ACGTTGCTATC");
    }

    #[test]
    fn works_through_trait_object() {
        let aligner: Box<dyn PairwiseAligner> = Box::new(GlobalAligner::for_indels(false));
        let aln = aligner.align(b"ACGT", b"ACGT").unwrap();
        assert_eq!(aln.markers, b"||||");
    }
}
