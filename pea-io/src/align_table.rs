//! Align tables: `ref,alignment,read,n_reads,ratio`.

use std::fs::File;
use std::path::Path;

use pea_core::{PeaError, Result};
use pea_edit::{AlignCount, AlignCountTable};

use crate::{csv_error, table_writer};

pub const ALIGN_TABLE_HEADER: [&str; 5] = ["ref", "alignment", "read", "n_reads", "ratio"];

/// Write an align table; an empty table is header-only.
pub fn write_align_table(path: impl AsRef<Path>, table: &AlignCountTable) -> Result<()> {
    let path = path.as_ref();
    let mut writer = table_writer(path, b',')?;
    writer
        .write_record(ALIGN_TABLE_HEADER)
        .map_err(|e| csv_error(path, e))?;
    for row in &table.rows {
        writer.serialize(row).map_err(|e| csv_error(path, e))?;
    }
    writer.flush().map_err(|e| PeaError::io_at(path, e))?;
    Ok(())
}

/// Read an align table written by [`write_align_table`].
///
/// Extra columns are ignored; a zero-byte file is an empty table.
pub fn read_align_table(path: impl AsRef<Path>) -> Result<Vec<AlignCount>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| PeaError::io_at(path, e))?;
    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(file);

    let mut rows = Vec::new();
    for record in reader.deserialize() {
        let row: AlignCount = record.map_err(|e| csv_error(path, e))?;
        rows.push(row);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    fn table() -> AlignCountTable {
        AlignCountTable {
            rows: vec![
                AlignCount {
                    reference: "ACGT".into(),
                    alignment: "||||".into(),
                    read: "ACGT".into(),
                    n_reads: 3,
                    ratio: 0.75,
                },
                AlignCount {
                    reference: "ACGT".into(),
                    alignment: "|-||".into(),
                    read: "A-GT".into(),
                    n_reads: 1,
                    ratio: 0.25,
                },
            ],
        }
    }

    #[test]
    fn written_layout() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("s.align.csv");
        write_align_table(&path, &table()).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "ref,alignment,read,n_reads,ratio");
        assert_eq!(lines[1], "ACGT,||||,ACGT,3,0.75");
        assert_eq!(lines[2], "ACGT,|-||,A-GT,1,0.25");
    }

    #[test]
    fn read_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("s.align.csv");
        write_align_table(&path, &table()).unwrap();
        assert_eq!(read_align_table(&path).unwrap(), table().rows);
    }

    #[test]
    fn empty_table_has_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.align.csv");
        write_align_table(&path, &AlignCountTable::default()).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap().trim(), "ref,alignment,read,n_reads,ratio");
        assert!(read_align_table(&path).unwrap().is_empty());
    }

    #[test]
    fn extra_columns_ignored() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "ref,alignment,read,n_reads,ratio,tag").unwrap();
        writeln!(file, "AC,|.,AT,2,1.0,C2T").unwrap();
        file.flush().unwrap();
        let rows = read_align_table(file.path()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].read, "AT");
    }

    #[test]
    fn malformed_row_is_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "ref,alignment,read,n_reads,ratio").unwrap();
        writeln!(file, "AC,||,AC,many,1.0").unwrap();
        file.flush().unwrap();
        assert!(matches!(read_align_table(file.path()), Err(PeaError::Parse(_))));
    }

    #[test]
    fn missing_file() {
        assert!(matches!(read_align_table("/nonexistent/x.align.csv"), Err(PeaError::Io(_))));
    }
}
