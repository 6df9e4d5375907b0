//! Splitting an align table by the alleles at chosen reference positions.

use std::collections::BTreeMap;

use log::debug;
use pea_align::{CoordinateMap, GAP};
use pea_core::{PeaError, Result};

use crate::aggregate::AlignCount;
use crate::engine::slice_track;

/// Tag of a row at 1-based reference `positions`: `{ref}{pos}{read}` joined
/// with `_`.
///
/// `None` when a position is `0` or past the reference fragment.
pub fn position_tag(row: &AlignCount, positions: &[usize]) -> Option<String> {
    let map = CoordinateMap::new(row.reference.as_bytes());
    let reference = row.reference.as_bytes();
    let read = row.read.as_bytes();
    let mut parts = Vec::with_capacity(positions.len());
    for &pos in positions {
        let column = map.column(pos.checked_sub(1)?)?;
        let r = *reference.get(column)?;
        let q = *read.get(column)?;
        parts.push(format!("{}{}{}", r as char, pos, q as char));
    }
    Some(parts.join("_"))
}

/// Keep the 1-based inclusive column range `[beg, end]` of all three tracks.
///
/// `beg = 1` keeps the first column. Older tooling sliced `[beg, end)` in
/// 0-based columns with the same flag values and so dropped it.
pub fn trim_columns(row: &AlignCount, beg: usize, end: usize) -> AlignCount {
    let from = beg.saturating_sub(1);
    AlignCount {
        reference: slice_track(row.reference.as_bytes(), from, end),
        alignment: slice_track(row.alignment.as_bytes(), from, end),
        read: slice_track(row.read.as_bytes(), from, end),
        n_reads: row.n_reads,
        ratio: row.ratio,
    }
}

/// Rows sharing one tag.
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedRows {
    pub tag: String,
    pub rows: Vec<AlignCount>,
}

/// Group rows by [`position_tag`] and trim them to `[beg, end]`.
///
/// Rows whose tag cannot be formed or contains a gap are dropped. Groups are
/// in tag order; rows keep their input order.
pub fn split_by_tag(rows: &[AlignCount], positions: &[usize], beg: usize, end: usize) -> Result<Vec<TaggedRows>> {
    if positions.is_empty() {
        return Err(PeaError::InvalidInput("at least one position is required".into()));
    }
    if beg == 0 || end < beg {
        return Err(PeaError::InvalidInput(format!(
            "invalid column range {beg}..={end}: expected 1 <= beg <= end"
        )));
    }

    let mut groups: BTreeMap<String, Vec<AlignCount>> = BTreeMap::new();
    let mut dropped = 0usize;
    for row in rows {
        match position_tag(row, positions) {
            Some(tag) if !tag.as_bytes().contains(&GAP) => {
                groups.entry(tag).or_default().push(trim_columns(row, beg, end));
            }
            _ => dropped += 1,
        }
    }
    debug!("{} rows split into {} tags, {} dropped", rows.len(), groups.len(), dropped);

    Ok(groups
        .into_iter()
        .map(|(tag, rows)| TaggedRows { tag, rows })
        .collect())
}
