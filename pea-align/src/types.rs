//! Pairwise alignment result with an explicit marker track.

use core::fmt;

/// Marker for an aligned column whose bases are identical.
pub const MATCH: u8 = b'|';
/// Marker for an aligned column whose bases differ.
pub const MISMATCH: u8 = b'.';
/// Gap character, used both in sequence tracks and in the marker track.
pub const GAP: u8 = b'-';

/// Marker byte for one aligned column.
pub fn column_marker(target: u8, query: u8) -> u8 {
    if target == GAP || query == GAP {
        GAP
    } else if target.to_ascii_uppercase() == query.to_ascii_uppercase() {
        MATCH
    } else {
        MISMATCH
    }
}

/// The result of a pairwise sequence alignment.
///
/// The three tracks have equal length, one byte per alignment column:
/// the target (reference) with `-` where the query inserts, the marker track
/// (`|` match, `.` mismatch, `-` gap), and the query with `-` where it
/// deletes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PairwiseAlignment {
    /// Alignment score.
    pub score: f64,
    /// Aligned target sequence (with `-` for gaps).
    pub aligned_target: Vec<u8>,
    /// Per-column marker track.
    pub markers: Vec<u8>,
    /// Aligned query sequence (with `-` for gaps).
    pub aligned_query: Vec<u8>,
}

impl PairwiseAlignment {
    /// Build an alignment from its two sequence tracks, deriving the markers.
    ///
    /// Returns `None` if the tracks differ in length.
    pub fn from_tracks(score: f64, aligned_target: Vec<u8>, aligned_query: Vec<u8>) -> Option<Self> {
        if aligned_target.len() != aligned_query.len() {
            return None;
        }
        let markers = aligned_target
            .iter()
            .zip(&aligned_query)
            .map(|(&t, &q)| column_marker(t, q))
            .collect();
        Some(Self {
            score,
            aligned_target,
            markers,
            aligned_query,
        })
    }

    /// Number of alignment columns.
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// Whether the alignment has no columns.
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

impl pea_core::Scored for PairwiseAlignment {
    fn score(&self) -> f64 {
        self.score
    }
}

impl fmt::Display for PairwiseAlignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", String::from_utf8_lossy(&self.aligned_target))?;
        writeln!(f, "{}", String::from_utf8_lossy(&self.markers))?;
        write!(f, "{}", String::from_utf8_lossy(&self.aligned_query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markers_from_tracks() {
        let aln = PairwiseAlignment::from_tracks(0.0, b"AC-GT".to_vec(), b"ATAG-".to_vec()).unwrap();
        assert_eq!(aln.markers, b"|.-|-");
        assert_eq!(aln.len(), 5);
    }

    #[test]
    fn unequal_tracks_rejected() {
        assert!(PairwiseAlignment::from_tracks(0.0, b"ACG".to_vec(), b"AC".to_vec()).is_none());
    }

    #[test]
    fn empty_alignment() {
        let aln = PairwiseAlignment::from_tracks(0.0, Vec::new(), Vec::new()).unwrap();
        assert!(aln.is_empty());
    }

    #[test]
    fn display_renders_three_lines() {
        let aln = PairwiseAlignment::from_tracks(3.0, b"ACGT".to_vec(), b"ACCT".to_vec()).unwrap();
        assert_eq!(aln.to_string(), "ACGT\n||.|\nACCT");
    }

    #[test]
    fn scored_trait() {
        use pea_core::Scored;
        let aln = PairwiseAlignment::from_tracks(42.0, Vec::new(), Vec::new()).unwrap();
        assert!((aln.score() - 42.0).abs() < f64::EPSILON);
    }
}
