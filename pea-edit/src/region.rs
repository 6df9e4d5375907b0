//! The user region: the part of the window whose edits are reported.

use crate::target::TargetRegion;

/// Half-open amplicon interval starting `offset` bases upstream of the PAM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UserRegion {
    pub beg: usize,
    pub end: usize,
}

impl UserRegion {
    pub fn new(pam_beg: usize, offset: usize, length: usize) -> Self {
        let beg = pam_beg.saturating_sub(offset);
        Self {
            beg,
            end: beg + length,
        }
    }

    /// User region of a located target.
    pub fn for_target(region: &TargetRegion, offset: usize, length: usize) -> Self {
        Self::new(region.pam_beg(), offset, length)
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.beg)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Offsets relative to the comparison window start.
    ///
    /// Not clamped to the window; slicing downstream truncates.
    pub fn window_offsets(&self, region: &TargetRegion) -> (usize, usize) {
        let cmp_beg = region.comparison_range().start;
        (
            self.beg.saturating_sub(cmp_beg),
            self.end.saturating_sub(cmp_beg),
        )
    }

    /// The reference content of the region, truncated at the amplicon end.
    pub fn reference_sequence<'a>(&self, region: &'a TargetRegion) -> &'a [u8] {
        region.slice(self.beg, self.end)
    }
}
