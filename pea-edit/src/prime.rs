//! Prime-editing outcome classification.

use std::collections::BTreeMap;

use pea_core::Summarizable;

use crate::aggregate::ratio;
use crate::engine::WeightedAlignment;

/// Outcome of one observed user-region sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimeEditOutcome {
    Unedited,
    /// Exactly the intended edit.
    TargetMutation,
    /// Length differs from the reference.
    IncorrectIndel,
    OtherMutation,
}

impl PrimeEditOutcome {
    pub fn classify(observed: &str, reference: &str, intended: Option<&str>) -> Self {
        if observed == reference {
            PrimeEditOutcome::Unedited
        } else if intended == Some(observed) {
            PrimeEditOutcome::TargetMutation
        } else if observed.len() != reference.len() {
            PrimeEditOutcome::IncorrectIndel
        } else {
            PrimeEditOutcome::OtherMutation
        }
    }
}

/// A gap-stripped read fragment and its read count.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegionQueryCount {
    pub user_region_query: String,
    pub n_reads: u64,
}

/// Group alignments by their gap-stripped read fragment.
///
/// Sorted by count descending, ties by sequence.
pub fn region_query_counts(records: impl IntoIterator<Item = WeightedAlignment>) -> Vec<RegionQueryCount> {
    let mut groups: BTreeMap<String, u64> = BTreeMap::new();
    for record in records {
        *groups.entry(record.alignment.read_without_gaps()).or_insert(0) += record.n_reads;
    }
    let mut counts: Vec<RegionQueryCount> = groups
        .into_iter()
        .map(|(user_region_query, n_reads)| RegionQueryCount {
            user_region_query,
            n_reads,
        })
        .collect();
    counts.sort_by(|a, b| b.n_reads.cmp(&a.n_reads));
    counts
}

/// Read totals per outcome for one sample.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrimeEditSummary {
    pub n_target_mutation: u64,
    pub n_incorrect_indel: u64,
    pub n_other_mutation: u64,
    pub n_unedited: u64,
    /// Reads whose user region could be aligned.
    pub n_aligned: u64,
    /// Reads in the input.
    pub n_all: u64,
}

impl PrimeEditSummary {
    pub fn from_counts(counts: &[RegionQueryCount], reference: &str, intended: Option<&str>, n_all: u64) -> Self {
        let mut summary = Self {
            n_all,
            ..Self::default()
        };
        for c in counts {
            summary.n_aligned += c.n_reads;
            match PrimeEditOutcome::classify(&c.user_region_query, reference, intended) {
                PrimeEditOutcome::Unedited => summary.n_unedited += c.n_reads,
                PrimeEditOutcome::TargetMutation => summary.n_target_mutation += c.n_reads,
                PrimeEditOutcome::IncorrectIndel => summary.n_incorrect_indel += c.n_reads,
                PrimeEditOutcome::OtherMutation => summary.n_other_mutation += c.n_reads,
            }
        }
        summary
    }

    pub fn target_mutation_ratio(&self) -> f64 {
        ratio(self.n_target_mutation, self.n_aligned)
    }

    pub fn incorrect_indel_ratio(&self) -> f64 {
        ratio(self.n_incorrect_indel, self.n_aligned)
    }

    pub fn other_mutation_ratio(&self) -> f64 {
        ratio(self.n_other_mutation, self.n_aligned)
    }
}

impl Summarizable for PrimeEditSummary {
    fn summary(&self) -> String {
        format!(
            "target mutation {} ({:.5}), incorrect indel {} ({:.5}), other mutation {} ({:.5}), {} of {} reads aligned",
            self.n_target_mutation,
            self.target_mutation_ratio(),
            self.n_incorrect_indel,
            self.incorrect_indel_ratio(),
            self.n_other_mutation,
            self.other_mutation_ratio(),
            self.n_aligned,
            self.n_all,
        )
    }
}
