//! Result tables for pea.
//!
//! Every output is a delimited text table written with the `csv` crate:
//!
//! | Module | Files |
//! |--------|-------|
//! | [`align_table`] | `<prefix>.align.csv` (read back by `be-stats` and `split-align`) |
//! | [`prime_report`] | `<prefix>.count.csv`, `<prefix>.summary.txt` |
//! | [`be_report`] | `read_counts.csv`, `all_mutation_raw.csv` and the summary TSVs |
//! | [`split_writer`] | `<subdir>/<tag>.<input name>` |
//!
//! [`naming`] builds the output prefixes from the input path and sequence
//! names.

pub mod align_table;
pub mod be_report;
pub mod naming;
pub mod prime_report;
pub mod split_writer;

pub use align_table::{read_align_table, write_align_table};
pub use be_report::{write_base_editing_report, BaseEditingOutputs};
pub use naming::{align_mutations_prefix, prime_editor_prefix, sample_name};
pub use prime_report::{write_region_counts, write_prime_summary, PrimeSummaryLine};
pub use split_writer::write_split_tables;

use std::fs::File;
use std::path::Path;

use pea_core::{PeaError, Result};

pub(crate) fn csv_error(path: &Path, e: csv::Error) -> PeaError {
    PeaError::Parse(format!("{}: {}", path.display(), e))
}

/// A header-less writer; callers emit the header themselves so empty tables
/// still get one.
pub(crate) fn table_writer(path: &Path, delimiter: u8) -> Result<csv::Writer<File>> {
    let file = File::create(path).map_err(|e| PeaError::io_at(path, e))?;
    Ok(csv::WriterBuilder::new()
        .has_headers(false)
        .delimiter(delimiter)
        .from_writer(file))
}
