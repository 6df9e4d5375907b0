//! FASTQ read source.
//!
//! fastqjoin files produced by read-merging tools are plain FASTQ. Only the
//! sequence lines matter for editing analysis; names and qualities are
//! dropped while parsing. Parsing uses needletail.

use std::path::Path;

use pea_core::{PeaError, Result};

/// Read the sequence of every record in a FASTQ (or FASTA) file, in order.
///
/// A zero-byte file is an empty batch, not an error: downstream tables are
/// produced for every sample, including those without reads.
pub fn read_sequences(path: impl AsRef<Path>) -> Result<Vec<Vec<u8>>> {
    let path = path.as_ref();
    let metadata = std::fs::metadata(path).map_err(|e| PeaError::io_at(path, e))?;
    if metadata.len() == 0 {
        return Ok(Vec::new());
    }

    let mut reader =
        needletail::parse_fastx_file(path).map_err(|e| PeaError::Parse(e.to_string()))?;

    let mut sequences = Vec::new();
    while let Some(record) = reader.next() {
        let record = record.map_err(|e| PeaError::Parse(e.to_string()))?;
        sequences.push(record.seq().into_owned());
    }

    Ok(sequences)
}
