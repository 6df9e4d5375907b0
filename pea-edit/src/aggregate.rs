//! Aggregation of weighted user-region alignments into count tables.

use std::collections::BTreeMap;

use crate::engine::{UserRegionAlignment, WeightedAlignment};

/// One row of an align table.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlignCount {
    #[cfg_attr(feature = "serde", serde(rename = "ref"))]
    pub reference: String,
    pub alignment: String,
    pub read: String,
    pub n_reads: u64,
    pub ratio: f64,
}

impl AlignCount {
    pub fn key(&self) -> UserRegionAlignment {
        UserRegionAlignment::new(self.reference.clone(), self.alignment.clone(), self.read.clone())
    }
}

/// Distinct alignments sorted by read count (descending, ties by key).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlignCountTable {
    pub rows: Vec<AlignCount>,
}

impl AlignCountTable {
    pub fn total_reads(&self) -> u64 {
        self.rows.iter().map(|r| r.n_reads).sum()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Group by `(reference, alignment, read)` and sum the weights.
pub fn aggregate_alignments(records: impl IntoIterator<Item = WeightedAlignment>) -> AlignCountTable {
    let mut groups: BTreeMap<UserRegionAlignment, u64> = BTreeMap::new();
    for record in records {
        *groups.entry(record.alignment).or_insert(0) += record.n_reads;
    }
    let total: u64 = groups.values().sum();

    let mut rows: Vec<AlignCount> = groups
        .into_iter()
        .map(|(key, n_reads)| AlignCount {
            reference: key.reference,
            alignment: key.alignment,
            read: key.read,
            n_reads,
            ratio: ratio(n_reads, total),
        })
        .collect();
    // Stable: equal counts keep the key order from the map.
    rows.sort_by(|a, b| b.n_reads.cmp(&a.n_reads));

    AlignCountTable { rows }
}

pub(crate) fn ratio(n: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        n as f64 / total as f64
    }
}
