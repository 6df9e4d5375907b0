//! Query alignment and user-region slicing.

use log::{debug, trace, warn};
use pea_align::{CoordinateMap, PairwiseAligner, PairwiseAlignment, GAP};
use pea_core::{Result, Scored};

use crate::extract::QueryCount;
use crate::region::UserRegion;
use crate::target::TargetRegion;

/// The user-region columns of one alignment: reference, markers and read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserRegionAlignment {
    pub reference: String,
    pub alignment: String,
    pub read: String,
}

impl UserRegionAlignment {
    pub fn new(reference: impl Into<String>, alignment: impl Into<String>, read: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            alignment: alignment.into(),
            read: read.into(),
        }
    }

    /// Columns `[beg, end)` of all three tracks, clamped.
    pub fn from_columns(alignment: &PairwiseAlignment, beg: usize, end: usize) -> Self {
        Self {
            reference: slice_track(&alignment.aligned_target, beg, end),
            alignment: slice_track(&alignment.markers, beg, end),
            read: slice_track(&alignment.aligned_query, beg, end),
        }
    }

    /// The read fragment as sequenced.
    pub fn read_without_gaps(&self) -> String {
        self.read.chars().filter(|&c| c != GAP as char).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.reference.is_empty() && self.alignment.is_empty() && self.read.is_empty()
    }
}

/// `track[beg..end]` as text; out-of-range or inverted bounds give `""`.
pub(crate) fn slice_track(track: &[u8], beg: usize, end: usize) -> String {
    let end = end.min(track.len());
    if beg >= end {
        return String::new();
    }
    String::from_utf8_lossy(&track[beg..end]).into_owned()
}

/// Alignment columns of the window offsets `[ub, ue)`.
///
/// Without insertions the reference track is the window itself and the offsets
/// are used directly; otherwise both go through a [`CoordinateMap`].
pub fn user_region_columns(alignment: &PairwiseAlignment, window_len: usize, ub: usize, ue: usize) -> (usize, usize) {
    if alignment.aligned_target.len() == window_len {
        (ub, ue)
    } else {
        let map = CoordinateMap::new(&alignment.aligned_target);
        (map.column_or_end(ub), map.column_or_end(ue))
    }
}

/// Align `query` against the comparison window and cut out the user region.
pub fn align_and_map_user_region<A>(
    aligner: &A,
    query: &[u8],
    region: &TargetRegion,
    user: &UserRegion,
) -> Result<UserRegionAlignment>
where
    A: PairwiseAligner + ?Sized,
{
    let window = region.comparison_region();
    let alignment = aligner.align(window, query)?;
    trace!(
        "query {} aligned with score {:.2}",
        String::from_utf8_lossy(query),
        alignment.score()
    );
    let (ub, ue) = user.window_offsets(region);
    let (beg, end) = user_region_columns(&alignment, window.len(), ub, ue);
    Ok(UserRegionAlignment::from_columns(&alignment, beg, end))
}

/// Whether [`align_query_counts`] fans out over the rayon thread pool.
pub const PARALLEL_ALIGNMENT: bool = cfg!(feature = "parallel");

/// A user-region alignment weighted by the reads behind its query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightedAlignment {
    pub alignment: UserRegionAlignment,
    pub n_reads: u64,
}

/// Align every distinct query once.
///
/// A query that fails to align is logged and contributes empty fragments.
pub fn align_query_counts<A>(
    aligner: &A,
    counts: &[QueryCount],
    region: &TargetRegion,
    user: &UserRegion,
) -> Vec<WeightedAlignment>
where
    A: PairwiseAligner + Sync + ?Sized,
{
    let align_one = |qc: &QueryCount| -> WeightedAlignment {
        let alignment = align_and_map_user_region(aligner, &qc.sequence, region, user).unwrap_or_else(|e| {
            warn!(
                "alignment failed for query {}: {}",
                String::from_utf8_lossy(&qc.sequence),
                e
            );
            UserRegionAlignment::default()
        });
        WeightedAlignment {
            alignment,
            n_reads: qc.count,
        }
    };

    debug!(
        "aligning {} distinct queries ({})",
        counts.len(),
        if PARALLEL_ALIGNMENT { "parallel" } else { "sequential" }
    );

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        counts.par_iter().map(align_one).collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        counts.iter().map(align_one).collect()
    }
}
