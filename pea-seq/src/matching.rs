//! Single-mismatch tolerant anchor search.
//!
//! Indicator sequences are located in noisy reads with a fixed-offset
//! comparison, not an edit distance: [`mismatch_count`] compares two slices
//! position by position and charges any length difference as mismatches.
//! [`bounded_mismatch_find`] seeds candidates with exact hits of either half
//! of the target, so a single mismatch in one half never hides the match.

/// Largest number of mismatches an accepted candidate may carry.
pub const MAX_MISMATCHES: usize = 1;

/// Direction in which [`bounded_mismatch_find`] scans the haystack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchDirection {
    /// Left to right; the first valid start wins.
    Forward,
    /// Right to left; the last valid start wins.
    Reverse,
}

/// Count mismatches between `a` and `b` at fixed alignment.
///
/// Positions beyond the shorter slice each count as one mismatch, so
/// `mismatch_count(b"ACG", b"ACGT") == 1`.
pub fn mismatch_count(a: &[u8], b: &[u8]) -> usize {
    let n = a.len().min(b.len());
    let m = a.len().max(b.len());
    let differing = a[..n].iter().zip(&b[..n]).filter(|(x, y)| x != y).count();
    differing + (m - n)
}

/// All start offsets of `needle` in `haystack`, overlapping hits included.
///
/// The empty needle occurs at every offset `0..=haystack.len()`.
fn occurrences(needle: &[u8], haystack: &[u8]) -> Vec<usize> {
    if needle.is_empty() {
        return (0..=haystack.len()).collect();
    }
    haystack
        .windows(needle.len())
        .enumerate()
        .filter(|(_, w)| *w == needle)
        .map(|(i, _)| i)
        .collect()
}

/// Locate `target` in `haystack`, tolerating at most one mismatch.
///
/// The candidate at `beg` is `haystack[beg..beg + target.len()]`, truncated at
/// the haystack end; a one-base overhang is therefore the single allowed
/// mismatch. Candidates come from exact hits of the first half of `target`
/// (`beg = hit`), and only when none of those validates, from exact hits of
/// the second half (`beg = hit - half`). Within a pass, candidates are
/// visited in `direction` order and the first valid one is returned.
///
/// Returns `None` for an empty target or when no candidate validates.
pub fn bounded_mismatch_find(
    target: &[u8],
    haystack: &[u8],
    direction: SearchDirection,
) -> Option<usize> {
    if target.is_empty() {
        return None;
    }

    let half = target.len() / 2;
    let (first, second) = target.split_at(half);

    let accept = |beg: usize| -> bool {
        if beg >= haystack.len() {
            return false;
        }
        let end = (beg + target.len()).min(haystack.len());
        mismatch_count(&haystack[beg..end], target) <= MAX_MISMATCHES
    };

    let scan = |starts: Vec<usize>| -> Option<usize> {
        match direction {
            SearchDirection::Forward => starts.into_iter().find(|&b| accept(b)),
            SearchDirection::Reverse => starts.into_iter().rev().find(|&b| accept(b)),
        }
    };

    scan(occurrences(first, haystack)).or_else(|| {
        let starts = occurrences(second, haystack)
            .into_iter()
            .filter_map(|i| i.checked_sub(half))
            .collect();
        scan(starts)
    })
}
