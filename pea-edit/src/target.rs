//! Target-site location in the amplicon.

use std::ops::Range;

use log::{debug, info};
use pea_core::{PeaError, Result, Summarizable};
use pea_seq::reverse_complement;

/// Amplicon orientation in which the target was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strand {
    Forward,
    /// The target matched the reverse complement of the amplicon; all
    /// coordinates refer to that complemented sequence.
    Reverse,
}

/// The located target, its PAM and the comparison window around the PAM.
///
/// All ranges are half-open offsets into [`amplicon`](Self::amplicon). The
/// window is `[pam_beg - radius, pam_beg + radius)` clamped to the amplicon;
/// its first and last bases serve as read indicators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetRegion {
    amplicon: Vec<u8>,
    target: Vec<u8>,
    strand: Strand,
    target_range: Range<usize>,
    pam: Range<usize>,
    comparison: Range<usize>,
}

impl TargetRegion {
    /// Locate the first exact occurrence of `target` in `amplicon`.
    pub fn locate(amplicon: &[u8], target: &[u8], radius: usize, pam_length: usize) -> Result<Self> {
        if target.is_empty() {
            return Err(PeaError::InvalidInput("empty target sequence".into()));
        }
        if pam_length > target.len() {
            return Err(PeaError::InvalidInput(format!(
                "PAM length {pam_length} exceeds the target length {}",
                target.len()
            )));
        }
        let beg = amplicon
            .windows(target.len())
            .position(|w| w == target)
            .ok_or_else(|| PeaError::TargetNotFound {
                target: String::from_utf8_lossy(target).into_owned(),
                amplicon: String::from_utf8_lossy(amplicon).into_owned(),
            })?;
        let end = beg + target.len();
        let pam_beg = end - pam_length;
        let cmp_beg = pam_beg.saturating_sub(radius);
        let cmp_end = cmp_beg.saturating_add(radius.saturating_mul(2)).min(amplicon.len());

        debug!(
            "target at {beg}..{end}, PAM at {pam_beg}..{end}, comparison window {cmp_beg}..{cmp_end}"
        );

        Ok(Self {
            amplicon: amplicon.to_vec(),
            target: target.to_vec(),
            strand: Strand::Forward,
            target_range: beg..end,
            pam: pam_beg..end,
            comparison: cmp_beg..cmp_end,
        })
    }

    /// Locate on the amplicon, falling back to its reverse complement.
    pub fn locate_on_either_strand(
        amplicon: &[u8],
        target: &[u8],
        radius: usize,
        pam_length: usize,
    ) -> Result<Self> {
        match Self::locate(amplicon, target, radius, pam_length) {
            Err(PeaError::TargetNotFound { .. }) => {}
            other => return other,
        }
        info!("target not found in the amplicon, trying the reverse-complemented amplicon");
        let rc = reverse_complement(amplicon);
        match Self::locate(&rc, target, radius, pam_length) {
            Ok(mut region) => {
                region.strand = Strand::Reverse;
                Ok(region)
            }
            Err(PeaError::TargetNotFound { .. }) => Err(PeaError::TargetNotFound {
                target: String::from_utf8_lossy(target).into_owned(),
                amplicon: String::from_utf8_lossy(amplicon).into_owned(),
            }),
            Err(e) => Err(e),
        }
    }

    /// The amplicon in the orientation the coordinates refer to.
    pub fn amplicon(&self) -> &[u8] {
        &self.amplicon
    }

    pub fn target(&self) -> &[u8] {
        &self.target
    }

    pub fn strand(&self) -> Strand {
        self.strand
    }

    pub fn target_range(&self) -> Range<usize> {
        self.target_range.clone()
    }

    pub fn pam_range(&self) -> Range<usize> {
        self.pam.clone()
    }

    pub fn pam_beg(&self) -> usize {
        self.pam.start
    }

    pub fn comparison_range(&self) -> Range<usize> {
        self.comparison.clone()
    }

    pub fn comparison_region(&self) -> &[u8] {
        &self.amplicon[self.comparison.clone()]
    }

    pub fn window_len(&self) -> usize {
        self.comparison.len()
    }

    /// First `len` bases of the comparison window.
    pub fn left_indicator(&self, len: usize) -> Result<&[u8]> {
        self.check_indicator_len(len)?;
        Ok(&self.comparison_region()[..len])
    }

    /// Last `len` bases of the comparison window.
    pub fn right_indicator(&self, len: usize) -> Result<&[u8]> {
        self.check_indicator_len(len)?;
        let window = self.comparison_region();
        Ok(&window[window.len() - len..])
    }

    fn check_indicator_len(&self, len: usize) -> Result<()> {
        if len == 0 || len > self.window_len() {
            return Err(PeaError::InvalidInput(format!(
                "indicator length {len} does not fit the comparison window of {} bases",
                self.window_len()
            )));
        }
        Ok(())
    }

    /// `amplicon[beg..end]`, truncated to the amplicon.
    pub fn slice(&self, beg: usize, end: usize) -> &[u8] {
        let end = end.min(self.amplicon.len());
        let beg = beg.min(end);
        &self.amplicon[beg..end]
    }
}

impl Summarizable for TargetRegion {
    fn summary(&self) -> String {
        let strand = match self.strand {
            Strand::Forward => "forward",
            Strand::Reverse => "reverse",
        };
        format!(
            "target {}..{} ({} strand), PAM {}..{}, comparison window {}..{}",
            self.target_range.start,
            self.target_range.end,
            strand,
            self.pam.start,
            self.pam.end,
            self.comparison.start,
            self.comparison.end,
        )
    }
}
