//! Indicator-based extraction of the comparison window from reads.
//!
//! A read is kept when the left indicator (searched left to right) and the
//! right indicator (searched right to left) are both found, each with at most
//! one mismatch, in an order the [`ExtractionPolicy`] accepts. Every read is
//! scanned as given and reverse-complemented; both orientations may
//! contribute a query.

use std::collections::HashMap;

use log::info;
use pea_core::Result;
use pea_seq::{bounded_mismatch_find, reverse_complement, SearchDirection};

use crate::target::TargetRegion;

/// Acceptance rule for the indicator positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionPolicy {
    /// Base and indel analysis: `left < right`.
    AlignMutations,
    /// Prime-editing analysis: `0 < left < right + |right indicator|`.
    PrimeEditing,
}

impl ExtractionPolicy {
    fn accepts(self, left: usize, right: usize, right_len: usize) -> bool {
        match self {
            ExtractionPolicy::AlignMutations => left < right,
            ExtractionPolicy::PrimeEditing => 0 < left && left < right + right_len,
        }
    }
}

/// The two anchors flanking the comparison window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Indicators {
    pub left: Vec<u8>,
    pub right: Vec<u8>,
}

impl Indicators {
    pub fn new(left: impl Into<Vec<u8>>, right: impl Into<Vec<u8>>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
        }
    }

    /// First and last `len` bases of the region's comparison window.
    pub fn from_region(region: &TargetRegion, len: usize) -> Result<Self> {
        Ok(Self::new(region.left_indicator(len)?, region.right_indicator(len)?))
    }
}

/// Cut `read[left .. right + |right|]` out of one read orientation.
///
/// The end is truncated at the read end.
pub fn extract_query_sequence<'r>(
    read: &'r [u8],
    indicators: &Indicators,
    policy: ExtractionPolicy,
) -> Option<&'r [u8]> {
    let left = bounded_mismatch_find(&indicators.left, read, SearchDirection::Forward)?;
    let right = bounded_mismatch_find(&indicators.right, read, SearchDirection::Reverse)?;
    let right_len = indicators.right.len();
    if !policy.accepts(left, right, right_len) {
        return None;
    }
    let end = (right + right_len).min(read.len());
    (left < end).then(|| &read[left..end])
}

/// One distinct query sequence and how many read candidates produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryCount {
    pub sequence: Vec<u8>,
    pub count: u64,
}

/// Deduplicated queries of a read batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryCounts {
    /// Sorted by count descending, then sequence ascending.
    pub counts: Vec<QueryCount>,
    /// Reads seen (each counted once, whatever the orientation).
    pub total_reads: u64,
    /// Candidates kept over both orientations.
    pub extracted: u64,
}

impl QueryCounts {
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }
}

/// Extract and count queries over every read in both orientations.
pub fn collect_query_counts<I, R>(reads: I, indicators: &Indicators, policy: ExtractionPolicy) -> QueryCounts
where
    I: IntoIterator<Item = R>,
    R: AsRef<[u8]>,
{
    let mut tally: HashMap<Vec<u8>, u64> = HashMap::new();
    let mut total_reads = 0u64;
    let mut extracted = 0u64;

    for read in reads {
        let read = read.as_ref();
        total_reads += 1;
        let rc = reverse_complement(read);
        for candidate in [read, rc.as_slice()] {
            if let Some(query) = extract_query_sequence(candidate, indicators, policy) {
                *tally.entry(query.to_vec()).or_insert(0) += 1;
                extracted += 1;
            }
        }
    }

    let mut counts: Vec<QueryCount> = tally
        .into_iter()
        .map(|(sequence, count)| QueryCount { sequence, count })
        .collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.sequence.cmp(&b.sequence)));

    info!(
        "{} reads, {} query sequences extracted ({} distinct)",
        total_reads,
        extracted,
        counts.len()
    );

    QueryCounts {
        counts,
        total_reads,
        extracted,
    }
}
