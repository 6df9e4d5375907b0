//! Per-tag align tables written by `split-align`.

use std::path::{Path, PathBuf};

use log::info;
use pea_core::{PeaError, Result};
use pea_edit::TaggedRows;
use serde::Serialize;

use crate::align_table::ALIGN_TABLE_HEADER;
use crate::{csv_error, table_writer};

#[derive(Serialize)]
struct TaggedRecord<'a> {
    reference: &'a str,
    alignment: &'a str,
    read: &'a str,
    n_reads: u64,
    ratio: f64,
    tag: &'a str,
}

/// Write each group to `<dir>/<tag>.<input_name>`, creating `dir`.
pub fn write_split_tables(dir: impl AsRef<Path>, input_name: &str, groups: &[TaggedRows]) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir).map_err(|e| PeaError::io_at(dir, e))?;

    let mut written = Vec::with_capacity(groups.len());
    for group in groups {
        let path = dir.join(format!("{}.{}", group.tag, input_name));
        let mut writer = table_writer(&path, b',')?;
        writer
            .write_record(ALIGN_TABLE_HEADER.iter().chain(&["tag"]))
            .map_err(|e| csv_error(&path, e))?;
        for row in &group.rows {
            writer
                .serialize(TaggedRecord {
                    reference: &row.reference,
                    alignment: &row.alignment,
                    read: &row.read,
                    n_reads: row.n_reads,
                    ratio: row.ratio,
                    tag: &group.tag,
                })
                .map_err(|e| csv_error(&path, e))?;
        }
        writer.flush().map_err(|e| PeaError::io_at(&path, e))?;
        info!("wrote {} rows to {}", group.rows.len(), path.display());
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::read_align_table;
    use pea_edit::{split_by_tag, AlignCount};
    use tempfile::tempdir;

    fn row(reference: &str, alignment: &str, read: &str, n_reads: u64) -> AlignCount {
        AlignCount {
            reference: reference.into(),
            alignment: alignment.into(),
            read: read.into(),
            n_reads,
            ratio: 0.25,
        }
    }

    #[test]
    fn one_file_per_tag() {
        let rows = vec![
            row("ACGT", "||||", "ACGT", 2),
            row("ACGT", "|.||", "ATGT", 1),
            row("ACGT", "|-||", "A-GT", 1),
        ];
        let groups = split_by_tag(&rows, &[2], 2, 3).unwrap();
        let dir = tempdir().unwrap();
        let subdir = dir.path().join("trimmed");
        let written = write_split_tables(&subdir, "s.align.csv", &groups).unwrap();
        assert_eq!(written.len(), 2);
        assert_eq!(written[0], subdir.join("C2C.s.align.csv"));

        let text = std::fs::read_to_string(subdir.join("C2T.s.align.csv")).unwrap();
        assert_eq!(text, "ref,alignment,read,n_reads,ratio,tag\nCG,.|,TG,1,0.25,C2T\n");
        assert_eq!(read_align_table(&written[0]).unwrap()[0].n_reads, 2);
    }
}
