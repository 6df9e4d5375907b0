//! Scoring scheme for nucleotide pairwise alignment.

use pea_core::{PeaError, Result};

/// Gap-open score used when indels are allowed inside the alignment.
pub const INDEL_GAP_OPEN: f64 = -2.01;

/// Gap-open score large enough to keep indels out of any realistic alignment.
pub const NO_INDEL_GAP_OPEN: f64 = -20.0;

/// Match/mismatch scoring with affine gap penalties.
///
/// A gap of length `k` scores `gap_open + (k - 1) * gap_extend`. End gaps are
/// scored like internal gaps.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoringScheme {
    pub match_score: f64,
    pub mismatch_score: f64,
    pub gap_open: f64,
    pub gap_extend: f64,
}

impl ScoringScheme {
    /// Create a new scoring scheme.
    ///
    /// # Errors
    ///
    /// Returns an error if `match_score` is not positive, `mismatch_score` is not
    /// negative, `gap_open` is not negative or `gap_extend` is positive.
    pub fn new(match_score: f64, mismatch_score: f64, gap_open: f64, gap_extend: f64) -> Result<Self> {
        if match_score.is_nan() || match_score <= 0.0 {
            return Err(PeaError::InvalidInput("match_score must be positive".into()));
        }
        if mismatch_score.is_nan() || mismatch_score >= 0.0 {
            return Err(PeaError::InvalidInput("mismatch_score must be negative".into()));
        }
        if gap_open.is_nan() || gap_open >= 0.0 {
            return Err(PeaError::InvalidInput("gap_open must be negative".into()));
        }
        if gap_extend.is_nan() || gap_extend > 0.0 {
            return Err(PeaError::InvalidInput("gap_extend must not be positive".into()));
        }
        Ok(Self {
            match_score,
            mismatch_score,
            gap_open,
            gap_extend,
        })
    }

    /// Scoring for editing analysis: +1.0 match, -1.1 mismatch, free gap extension.
    ///
    /// With `indel_in_alignment` the gap-open score is [`INDEL_GAP_OPEN`],
    /// otherwise [`NO_INDEL_GAP_OPEN`].
    pub fn for_indels(indel_in_alignment: bool) -> Self {
        Self {
            match_score: 1.0,
            mismatch_score: -1.1,
            gap_open: if indel_in_alignment {
                INDEL_GAP_OPEN
            } else {
                NO_INDEL_GAP_OPEN
            },
            gap_extend: 0.0,
        }
    }

    /// Score a pair of bases. Case-insensitive.
    pub fn score_pair(&self, a: u8, b: u8) -> f64 {
        if a.to_ascii_uppercase() == b.to_ascii_uppercase() {
            self.match_score
        } else {
            self.mismatch_score
        }
    }

    /// Score of a gap run of length `len` (zero for an empty run).
    pub fn gap_run(&self, len: usize) -> f64 {
        if len == 0 {
            0.0
        } else {
            self.gap_open + (len - 1) as f64 * self.gap_extend
        }
    }
}

impl Default for ScoringScheme {
    fn default() -> Self {
        Self::for_indels(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_allows_indels() {
        let s = ScoringScheme::default();
        assert_eq!(s.gap_open, INDEL_GAP_OPEN);
        assert_eq!(s.gap_extend, 0.0);
        assert_eq!(s.score_pair(b'A', b'a'), 1.0);
        assert_eq!(s.score_pair(b'A', b'C'), -1.1);
    }

    #[test]
    fn no_indel_scheme() {
        assert_eq!(ScoringScheme::for_indels(false).gap_open, NO_INDEL_GAP_OPEN);
    }

    #[test]
    fn gap_run_is_affine() {
        let s = ScoringScheme::new(2.0, -1.0, -5.0, -2.0).unwrap();
        assert_eq!(s.gap_run(0), 0.0);
        assert_eq!(s.gap_run(1), -5.0);
        assert_eq!(s.gap_run(3), -9.0);
    }

    #[test]
    fn rejects_bad_parameters() {
        assert!(ScoringScheme::new(0.0, -1.0, -2.0, 0.0).is_err());
        assert!(ScoringScheme::new(1.0, 0.5, -2.0, 0.0).is_err());
        assert!(ScoringScheme::new(1.0, -1.0, 0.0, 0.0).is_err());
        assert!(ScoringScheme::new(1.0, -1.0, -2.0, 0.5).is_err());
        assert!(ScoringScheme::new(1.0, -1.0, f64::NAN, 0.0).is_err());
    }
}
