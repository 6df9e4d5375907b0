//! Prime-editing outputs: region query counts and the one-line summary.

use std::fmt;
use std::path::Path;

use pea_core::{PeaError, Result};
use pea_edit::{PrimeEditSummary, RegionQueryCount};

use crate::{csv_error, table_writer};

/// Write `user_region_query,n_reads`.
pub fn write_region_counts(path: impl AsRef<Path>, counts: &[RegionQueryCount]) -> Result<()> {
    let path = path.as_ref();
    let mut writer = table_writer(path, b',')?;
    writer
        .write_record(["user_region_query", "n_reads"])
        .map_err(|e| csv_error(path, e))?;
    for row in counts {
        writer.serialize(row).map_err(|e| csv_error(path, e))?;
    }
    writer.flush().map_err(|e| PeaError::io_at(path, e))?;
    Ok(())
}

/// One tab-separated summary record.
///
/// Fields: sample, tag, amplicon name, target sequence, intended mutation
/// sequence, then count and ratio for target mutations, incorrect indels and
/// other mutations, then aligned and total reads.
#[derive(Debug, Clone, Copy)]
pub struct PrimeSummaryLine<'a> {
    pub sample: &'a str,
    pub tag: &'a str,
    pub amplicon_name: &'a str,
    pub target: &'a str,
    pub intended_mutation: &'a str,
    pub summary: &'a PrimeEditSummary,
}

impl fmt::Display for PrimeSummaryLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.summary;
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}\t{:.5}\t{}\t{:.5}\t{}\t{:.5}\t{}\t{}",
            self.sample,
            self.tag,
            self.amplicon_name,
            self.target,
            self.intended_mutation,
            s.n_target_mutation,
            s.target_mutation_ratio(),
            s.n_incorrect_indel,
            s.incorrect_indel_ratio(),
            s.n_other_mutation,
            s.other_mutation_ratio(),
            s.n_aligned,
            s.n_all,
        )
    }
}

pub fn write_prime_summary(path: impl AsRef<Path>, line: &PrimeSummaryLine<'_>) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, format!("{line}\n")).map_err(|e| PeaError::io_at(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn summary() -> PrimeEditSummary {
        PrimeEditSummary {
            n_target_mutation: 2,
            n_incorrect_indel: 1,
            n_other_mutation: 1,
            n_unedited: 4,
            n_aligned: 8,
            n_all: 9,
        }
    }

    #[test]
    fn summary_line_fields() {
        let s = summary();
        let line = PrimeSummaryLine {
            sample: "1.fastqjoin",
            tag: "out",
            amplicon_name: "amp",
            target: "TGGGCC",
            intended_mutation: "ACGT",
            summary: &s,
        };
        assert_eq!(
            line.to_string(),
            "1.fastqjoin\tout\tamp\tTGGGCC\tACGT\t2\t0.25000\t1\t0.12500\t1\t0.12500\t8\t9"
        );
    }

    #[test]
    fn zero_aligned_line() {
        let s = PrimeEditSummary {
            n_all: 3,
            ..PrimeEditSummary::default()
        };
        let line = PrimeSummaryLine {
            sample: "x",
            tag: "t",
            amplicon_name: "a",
            target: "CG",
            intended_mutation: "",
            summary: &s,
        };
        assert!(line.to_string().ends_with("\t0\t0.00000\t0\t0.00000\t0\t0.00000\t0\t3"));
    }

    #[test]
    fn files() {
        let dir = tempdir().unwrap();
        let counts = vec![
            RegionQueryCount {
                user_region_query: "ACGT".into(),
                n_reads: 5,
            },
            RegionQueryCount {
                user_region_query: "AGT".into(),
                n_reads: 1,
            },
        ];
        let count_path = dir.path().join("p.count.csv");
        write_region_counts(&count_path, &counts).unwrap();
        assert_eq!(
            std::fs::read_to_string(&count_path).unwrap(),
            "user_region_query,n_reads\nACGT,5\nAGT,1\n"
        );

        let s = summary();
        let summary_path = dir.path().join("p.summary.txt");
        let line = PrimeSummaryLine {
            sample: "1.fastqjoin",
            tag: "out",
            amplicon_name: "amp",
            target: "TGGGCC",
            intended_mutation: "ACGT",
            summary: &s,
        };
        write_prime_summary(&summary_path, &line).unwrap();
        let text = std::fs::read_to_string(&summary_path).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert_eq!(text.trim_end().split('\t').count(), 13);
    }
}
