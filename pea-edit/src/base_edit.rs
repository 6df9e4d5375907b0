//! Base-editing statistics over align tables.
//!
//! Each sample is one align table. After the indel policy is applied every
//! remaining row has a gap-free reference track, so alignment columns are
//! reference positions. Counts are weighted by `n_reads`.

use std::fmt;
use std::str::FromStr;

use log::warn;
use pea_align::{GAP, MISMATCH};
use pea_core::{PeaError, Result};
use pea_seq::nucleotide::DNA_BASES;

use crate::aggregate::AlignCount;
use crate::config::BaseEditingConfig;

/// A directed single-base substitution such as `CtoT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Substitution {
    pub from: u8,
    pub to: u8,
}

impl Substitution {
    pub fn new(from: u8, to: u8) -> Result<Self> {
        if !DNA_BASES.contains(&from) || !DNA_BASES.contains(&to) || from == to {
            return Err(PeaError::InvalidInput(format!(
                "invalid substitution {}to{}: expected one of {}",
                from as char,
                to as char,
                Self::all().iter().map(|s| s.to_string()).collect::<Vec<_>>().join(", ")
            )));
        }
        Ok(Self { from, to })
    }

    /// The 12 directed pairs over `ACGT`.
    pub fn all() -> Vec<Substitution> {
        let mut out = Vec::with_capacity(12);
        for &from in DNA_BASES {
            for &to in DNA_BASES {
                if from != to {
                    out.push(Substitution { from, to });
                }
            }
        }
        out
    }

    fn matches(&self, reference: u8, read: u8) -> bool {
        self.from == reference && self.to == read
    }
}

impl FromStr for Substitution {
    type Err = PeaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.as_bytes() {
            [from, b't', b'o', to] => Self::new(*from, *to),
            _ => Err(PeaError::InvalidInput(format!(
                "invalid substitution {s:?}: expected the form XtoY"
            ))),
        }
    }
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}to{}", self.from as char, self.to as char)
    }
}

/// One align table and its name.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub name: String,
    pub rows: Vec<AlignCount>,
}

pub fn contains_indel(row: &AlignCount) -> bool {
    row.alignment.as_bytes().contains(&GAP)
}

/// Remove the columns where the reference track has a gap.
pub fn mask_insertions(row: &AlignCount) -> AlignCount {
    let keep: Vec<bool> = row.reference.bytes().map(|b| b != GAP).collect();
    let filter = |track: &str| -> String {
        track
            .bytes()
            .zip(keep.iter().chain(std::iter::repeat(&false)))
            .filter(|&(_, &k)| k)
            .map(|(b, _)| b as char)
            .collect()
    };
    AlignCount {
        reference: filter(&row.reference),
        alignment: filter(&row.alignment),
        read: filter(&row.read),
        n_reads: row.n_reads,
        ratio: row.ratio,
    }
}

/// Drop indel rows, or mask insertion columns, then drop empty rows.
pub fn apply_indel_policy(rows: &[AlignCount], exclude_indel_reads: bool) -> Vec<AlignCount> {
    rows.iter()
        .filter_map(|row| {
            if exclude_indel_reads {
                (!contains_indel(row)).then(|| row.clone())
            } else {
                Some(mask_insertions(row))
            }
        })
        .filter(|row| !row.reference.is_empty())
        .collect()
}

/// Column names `{refBase}{1-based position}` of a reference fragment.
pub fn position_labels(reference: &str) -> Vec<String> {
    reference
        .bytes()
        .filter(|&b| b != GAP)
        .enumerate()
        .map(|(i, b)| format!("{}{}", b as char, i + 1))
        .collect()
}

/// `(column, reference base, read base)` at every mismatch or gap column.
fn variant_columns(row: &AlignCount) -> impl Iterator<Item = (usize, u8, u8)> + '_ {
    let reference = row.reference.as_bytes();
    let read = row.read.as_bytes();
    row.alignment
        .bytes()
        .enumerate()
        .filter(|&(_, m)| m == MISMATCH || m == GAP)
        .filter_map(move |(i, _)| Some((i, *reference.get(i)?, *read.get(i)?)))
}

/// Substitution labels of a row, `None` where the column matches.
pub fn variant_labels(row: &AlignCount) -> Vec<Option<String>> {
    let mut labels = vec![None; row.alignment.len()];
    for (i, r, q) in variant_columns(row) {
        labels[i] = Some(format!("{}to{}", r as char, q as char));
    }
    labels
}

/// Aligned-read totals of one sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadCounts {
    /// After the indel policy.
    pub n_aligned_noindel: u64,
    /// Before the indel policy.
    pub n_aligned_total: u64,
}

/// A sample after the indel policy.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleStats {
    pub name: String,
    pub read_counts: ReadCounts,
    pub rows: Vec<AlignCount>,
}

/// Weighted counts per reference position for one sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionCounts {
    pub sample: String,
    pub read_counts: ReadCounts,
    pub positions: Vec<u64>,
    /// Reads with at least one hit.
    pub any: u64,
}

/// Per-position counts of one substitution in one sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionPositions {
    pub substitution: Substitution,
    pub counts: PositionCounts,
}

/// Weighted read counts per category (substitution or base) for one sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCounts {
    pub sample: String,
    pub read_counts: ReadCounts,
    pub counts: Vec<u64>,
    /// Reads in at least one category.
    pub any: u64,
}

/// All `be-stats` tables.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseEditingReport {
    pub position_labels: Vec<String>,
    pub substitutions: Vec<Substitution>,
    pub non_x_bases: Vec<u8>,
    /// Samples in name order.
    pub samples: Vec<SampleStats>,
    /// Substitution-major, then sample.
    pub substitution_positions: Vec<SubstitutionPositions>,
    pub substitution_overall: Vec<CategoryCounts>,
    pub non_x_overall: Vec<CategoryCounts>,
    pub non_x_positions: Vec<PositionCounts>,
}

/// Compute every base-editing table.
///
/// Position columns come from the first remaining row of the first sample;
/// shorter or longer rows are padded with zeros or truncated.
pub fn analyze_base_editing(mut samples: Vec<Sample>, config: &BaseEditingConfig) -> BaseEditingReport {
    samples.sort_by(|a, b| a.name.cmp(&b.name));

    let stats: Vec<SampleStats> = samples
        .iter()
        .map(|sample| {
            if sample.rows.is_empty() {
                warn!("no reads to analyze: {}", sample.name);
            }
            let rows = apply_indel_policy(&sample.rows, config.exclude_indel_reads);
            SampleStats {
                name: sample.name.clone(),
                read_counts: ReadCounts {
                    n_aligned_noindel: rows.iter().map(|r| r.n_reads).sum(),
                    n_aligned_total: sample.rows.iter().map(|r| r.n_reads).sum(),
                },
                rows,
            }
        })
        .collect();

    let position_labels = stats
        .iter()
        .find_map(|s| s.rows.first())
        .map(|row| position_labels(&row.reference))
        .unwrap_or_default();
    let width = position_labels.len();

    let substitution_positions = config
        .substitutions
        .iter()
        .flat_map(|&substitution| {
            stats.iter().map(move |s| SubstitutionPositions {
                substitution,
                counts: position_counts(s, width, |r, q| substitution.matches(r, q)),
            })
        })
        .collect();

    let substitution_overall = stats
        .iter()
        .map(|s| {
            category_counts(s, &config.substitutions, |row, sub| {
                variant_columns(row).any(|(_, r, q)| sub.matches(r, q))
            })
        })
        .collect();

    let non_x_overall = stats
        .iter()
        .map(|s| {
            category_counts(s, &config.non_x_bases, |row, &base| {
                mismatch_columns(row).any(|(_, r)| r == base)
            })
        })
        .collect();

    let non_x_positions = stats
        .iter()
        .map(|s| {
            let mut positions = vec![0u64; width];
            let mut any = 0;
            for row in &s.rows {
                let mut hit = false;
                for (i, _) in mismatch_columns(row) {
                    hit = true;
                    if let Some(slot) = positions.get_mut(i) {
                        *slot += row.n_reads;
                    }
                }
                if hit {
                    any += row.n_reads;
                }
            }
            PositionCounts {
                sample: s.name.clone(),
                read_counts: s.read_counts,
                positions,
                any,
            }
        })
        .collect();

    BaseEditingReport {
        position_labels,
        substitutions: config.substitutions.clone(),
        non_x_bases: config.non_x_bases.clone(),
        samples: stats,
        substitution_positions,
        substitution_overall,
        non_x_overall,
        non_x_positions,
    }
}

/// `(column, reference base)` at every mismatch column.
fn mismatch_columns(row: &AlignCount) -> impl Iterator<Item = (usize, u8)> + '_ {
    let reference = row.reference.as_bytes();
    row.alignment
        .bytes()
        .enumerate()
        .filter(|&(_, m)| m == MISMATCH)
        .filter_map(move |(i, _)| Some((i, *reference.get(i)?)))
}

fn position_counts<F>(sample: &SampleStats, width: usize, hit: F) -> PositionCounts
where
    F: Fn(u8, u8) -> bool,
{
    let mut positions = vec![0u64; width];
    let mut any = 0;
    for row in &sample.rows {
        let mut carried = false;
        for (i, r, q) in variant_columns(row) {
            if hit(r, q) {
                carried = true;
                if let Some(slot) = positions.get_mut(i) {
                    *slot += row.n_reads;
                }
            }
        }
        if carried {
            any += row.n_reads;
        }
    }
    PositionCounts {
        sample: sample.name.clone(),
        read_counts: sample.read_counts,
        positions,
        any,
    }
}

fn category_counts<T, F>(sample: &SampleStats, categories: &[T], carries: F) -> CategoryCounts
where
    F: Fn(&AlignCount, &T) -> bool,
{
    let mut counts = vec![0u64; categories.len()];
    let mut any = 0;
    for row in &sample.rows {
        let mut carried = false;
        for (slot, category) in counts.iter_mut().zip(categories) {
            if carries(row, category) {
                *slot += row.n_reads;
                carried = true;
            }
        }
        if carried {
            any += row.n_reads;
        }
    }
    CategoryCounts {
        sample: sample.name.clone(),
        read_counts: sample.read_counts,
        counts,
        any,
    }
}
