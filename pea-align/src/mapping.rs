//! Un-gapped to gapped coordinate mapping.
//!
//! Positions in a reference window are un-gapped offsets; after alignment the
//! reference track may contain gap columns where the query inserted bases.
//! [`CoordinateMap`] translates an un-gapped offset into the alignment column
//! holding that reference base.

use crate::types::GAP;

/// Cumulative non-gap counts over an aligned reference track.
///
/// For column `c`, `mapper(c)` is the number of non-gap bytes in
/// `track[..=c]` minus one, i.e. the un-gapped coordinate of the last
/// reference base at or before `c` (`-1` for leading gap columns).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinateMap {
    /// `counts[c]` = number of non-gap bytes in `track[..=c]`.
    counts: Vec<usize>,
}

impl CoordinateMap {
    /// Build the map with a single forward scan of the aligned track.
    pub fn new(aligned_track: &[u8]) -> Self {
        let mut counts = Vec::with_capacity(aligned_track.len());
        let mut running = 0usize;
        for &b in aligned_track {
            if b != GAP {
                running += 1;
            }
            counts.push(running);
        }
        Self { counts }
    }

    /// Number of alignment columns.
    pub fn columns(&self) -> usize {
        self.counts.len()
    }

    /// Number of non-gap bytes in the track.
    pub fn ungapped_len(&self) -> usize {
        self.counts.last().copied().unwrap_or(0)
    }

    /// The `mapper` value of column `c` (see the type docs).
    pub fn mapper(&self, column: usize) -> Option<isize> {
        self.counts.get(column).map(|&n| n as isize - 1)
    }

    /// First alignment column whose mapper value equals `offset`.
    ///
    /// This is the column of the `offset`-th reference base; insertion columns
    /// in front of it are not included. Returns `None` when `offset` is at or
    /// beyond the un-gapped length.
    pub fn column(&self, offset: usize) -> Option<usize> {
        let wanted = offset + 1;
        let c = self.counts.partition_point(|&n| n < wanted);
        (c < self.counts.len() && self.counts[c] == wanted).then_some(c)
    }

    /// Like [`column`](Self::column), but maps offsets past the last reference
    /// base to the end of the alignment, so slicing stays truncating.
    pub fn column_or_end(&self, offset: usize) -> usize {
        self.column(offset).unwrap_or(self.counts.len())
    }
}
