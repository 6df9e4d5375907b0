//! `be-stats` output tables.

use std::path::{Path, PathBuf};

use log::info;
use pea_core::{PeaError, Result};
use pea_edit::base_edit::{CategoryCounts, PositionCounts, ReadCounts};
use pea_edit::BaseEditingReport;

use crate::{csv_error, table_writer};

/// File names of the `be-stats` outputs, relative to an output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseEditingOutputs {
    pub read_counts: String,
    pub all_mutation_raw: String,
    pub substitution_positions: String,
    pub substitution_overall: String,
    pub non_x_overall: String,
    pub non_x_positions: String,
}

impl Default for BaseEditingOutputs {
    fn default() -> Self {
        Self {
            read_counts: "read_counts.csv".into(),
            all_mutation_raw: "all_mutation_raw.csv".into(),
            substitution_positions: "summary.base_editing.csv".into(),
            substitution_overall: "summary.be_overall.csv".into(),
            non_x_overall: "summary.mutations.csv".into(),
            non_x_positions: "summary.nonX_per_pos.mutations.csv".into(),
        }
    }
}

fn write_rows(path: &Path, delimiter: u8, header: &[String], rows: &[Vec<String>]) -> Result<()> {
    let mut writer = table_writer(path, delimiter)?;
    writer.write_record(header).map_err(|e| csv_error(path, e))?;
    for row in rows {
        writer.write_record(row).map_err(|e| csv_error(path, e))?;
    }
    writer.flush().map_err(|e| PeaError::io_at(path, e))?;
    info!("wrote {}", path.display());
    Ok(())
}

fn header<I, S>(fields: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: ToString,
{
    fields.into_iter().map(|f| f.to_string()).collect()
}

fn read_count_fields(c: &ReadCounts) -> [String; 2] {
    [c.n_aligned_noindel.to_string(), c.n_aligned_total.to_string()]
}

fn position_fields(p: &PositionCounts) -> impl Iterator<Item = String> + '_ {
    p.positions
        .iter()
        .map(|n| n.to_string())
        .chain(std::iter::once(p.any.to_string()))
}

fn category_row(c: &CategoryCounts) -> Vec<String> {
    std::iter::once(c.sample.clone())
        .chain(c.counts.iter().map(|n| n.to_string()))
        .chain(std::iter::once(c.any.to_string()))
        .chain(read_count_fields(&c.read_counts))
        .collect()
}

/// Write every table of `report` into `dir`.
///
/// The substitution tables are only written when substitutions were
/// requested, the non-X tables only when bases were. Returns the written
/// paths.
pub fn write_base_editing_report(
    dir: impl AsRef<Path>,
    report: &BaseEditingReport,
    names: &BaseEditingOutputs,
) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let mut written = Vec::new();

    let path = dir.join(&names.read_counts);
    let rows: Vec<Vec<String>> = report
        .samples
        .iter()
        .map(|s| {
            std::iter::once(s.name.clone())
                .chain(read_count_fields(&s.read_counts))
                .collect()
        })
        .collect();
    write_rows(
        &path,
        b',',
        &header(["filename", "n_aligned_noindel", "n_aligned_total"]),
        &rows,
    )?;
    written.push(path);

    let path = dir.join(&names.all_mutation_raw);
    let rows: Vec<Vec<String>> = report
        .samples
        .iter()
        .flat_map(|s| {
            s.rows.iter().map(move |r| {
                vec![
                    r.reference.clone(),
                    r.alignment.clone(),
                    r.read.clone(),
                    r.n_reads.to_string(),
                    r.ratio.to_string(),
                    s.name.clone(),
                ]
            })
        })
        .collect();
    write_rows(
        &path,
        b',',
        &header(["ref", "alignment", "read", "n_reads", "ratio", "filename"]),
        &rows,
    )?;
    written.push(path);

    if !report.substitutions.is_empty() {
        let path = dir.join(&names.substitution_positions);
        let mut head = header(["mut", "filename", "n_aligned_noindel", "n_aligned_total"]);
        head.extend(report.position_labels.iter().cloned());
        head.push("any".into());
        let rows: Vec<Vec<String>> = report
            .substitution_positions
            .iter()
            .map(|sp| {
                [sp.substitution.to_string(), sp.counts.sample.clone()]
                    .into_iter()
                    .chain(read_count_fields(&sp.counts.read_counts))
                    .chain(position_fields(&sp.counts))
                    .collect()
            })
            .collect();
        write_rows(&path, b'\t', &head, &rows)?;
        written.push(path);

        let path = dir.join(&names.substitution_overall);
        let mut head = header(["filename"]);
        head.extend(report.substitutions.iter().map(|s| s.to_string()));
        head.extend(header(["any", "n_aligned_noindel", "n_aligned_total"]));
        let rows: Vec<Vec<String>> = report.substitution_overall.iter().map(category_row).collect();
        write_rows(&path, b'\t', &head, &rows)?;
        written.push(path);
    }

    if !report.non_x_bases.is_empty() {
        let path = dir.join(&names.non_x_overall);
        let mut head = header(["filename"]);
        head.extend(report.non_x_bases.iter().map(|&b| (b as char).to_string()));
        head.extend(header(["any", "n_aligned_noindel", "n_aligned_total"]));
        let rows: Vec<Vec<String>> = report.non_x_overall.iter().map(category_row).collect();
        write_rows(&path, b'\t', &head, &rows)?;
        written.push(path);

        let path = dir.join(&names.non_x_positions);
        let mut head = header(["nonX_per_pos"]);
        head.extend(report.position_labels.iter().cloned());
        head.extend(header(["n_mut_any", "n_aligned_noindel", "n_aligned_total"]));
        let rows: Vec<Vec<String>> = report
            .non_x_positions
            .iter()
            .map(|p| {
                std::iter::once(p.sample.clone())
                    .chain(position_fields(p))
                    .chain(read_count_fields(&p.read_counts))
                    .collect()
            })
            .collect();
        write_rows(&path, b'\t', &head, &rows)?;
        written.push(path);
    }

    Ok(written)
}
