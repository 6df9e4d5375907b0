//! Needleman-Wunsch global alignment with affine gap penalties.
//!
//! Uses a three-matrix dynamic programming formulation (Gotoh, 1982):
//!
//! - **H**: best score ending in a match/mismatch
//! - **E**: best score ending in a gap in the query (consuming target)
//! - **F**: best score ending in a gap in the target (consuming query)
//!
//! Scores are `f64` so fractional schemes such as `-1.1` mismatch and
//! `-2.01` gap open are represented exactly as configured.

use crate::scoring::ScoringScheme;
use crate::types::{PairwiseAlignment, GAP};
use pea_core::{PeaError, Result};

/// Perform global (Needleman-Wunsch) alignment with affine gap penalties.
///
/// Leading and trailing gaps are scored like internal gaps. On ties the
/// traceback prefers a diagonal step, then a gap in the query, then a gap in
/// the target.
///
/// # Errors
///
/// Returns an error if either sequence is empty.
pub fn needleman_wunsch(
    query: &[u8],
    target: &[u8],
    scoring: &ScoringScheme,
) -> Result<PairwiseAlignment> {
    let m = query.len();
    let n = target.len();

    if m == 0 || n == 0 {
        return Err(PeaError::InvalidInput(
            "sequences must not be empty".into(),
        ));
    }

    let gap_open = scoring.gap_open;
    let gap_extend = scoring.gap_extend;

    let rows = m + 1;
    let cols = n + 1;

    let mut h = vec![f64::NEG_INFINITY; rows * cols];
    let mut e = vec![f64::NEG_INFINITY; rows * cols];
    let mut f = vec![f64::NEG_INFINITY; rows * cols];

    let idx = |i: usize, j: usize| -> usize { i * cols + j };

    h[idx(0, 0)] = 0.0;

    for i in 1..rows {
        h[idx(i, 0)] = scoring.gap_run(i);
        f[idx(i, 0)] = h[idx(i, 0)];
    }

    for j in 1..cols {
        h[idx(0, j)] = scoring.gap_run(j);
        e[idx(0, j)] = h[idx(0, j)];
    }

    for i in 1..rows {
        for j in 1..cols {
            e[idx(i, j)] = (h[idx(i, j - 1)] + gap_open).max(e[idx(i, j - 1)] + gap_extend);
            f[idx(i, j)] = (h[idx(i - 1, j)] + gap_open).max(f[idx(i - 1, j)] + gap_extend);

            let diag = h[idx(i - 1, j - 1)] + scoring.score_pair(query[i - 1], target[j - 1]);
            h[idx(i, j)] = diag.max(e[idx(i, j)]).max(f[idx(i, j)]);
        }
    }

    let mut aligned_query = Vec::with_capacity(m + n);
    let mut aligned_target = Vec::with_capacity(m + n);

    let mut i = m;
    let mut j = n;

    #[derive(Clone, Copy, PartialEq)]
    enum State {
        H,
        E,
        F,
    }

    let mut state = State::H;

    while i > 0 || j > 0 {
        match state {
            State::H => {
                if i > 0 && j > 0 {
                    let diag =
                        h[idx(i - 1, j - 1)] + scoring.score_pair(query[i - 1], target[j - 1]);

                    if h[idx(i, j)] == diag {
                        aligned_query.push(query[i - 1]);
                        aligned_target.push(target[j - 1]);
                        i -= 1;
                        j -= 1;
                    } else if h[idx(i, j)] == e[idx(i, j)] {
                        state = State::E;
                    } else {
                        state = State::F;
                    }
                } else if j > 0 {
                    state = State::E;
                } else {
                    state = State::F;
                }
            }
            State::E => {
                aligned_query.push(GAP);
                aligned_target.push(target[j - 1]);

                if j == 1 || e[idx(i, j)] == h[idx(i, j - 1)] + gap_open {
                    state = State::H;
                }
                j -= 1;
            }
            State::F => {
                aligned_query.push(query[i - 1]);
                aligned_target.push(GAP);

                if i == 1 || f[idx(i, j)] == h[idx(i - 1, j)] + gap_open {
                    state = State::H;
                }
                i -= 1;
            }
        }
    }

    aligned_query.reverse();
    aligned_target.reverse();

    PairwiseAlignment::from_tracks(h[idx(m, n)], aligned_target, aligned_query)
        .ok_or_else(|| PeaError::Other("traceback produced tracks of unequal length".into()))
}
