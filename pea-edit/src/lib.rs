//! Editing-outcome analysis of amplicon reads.
//!
//! The pipeline, leaf to root:
//!
//! - **Target location**: [`TargetRegion`] finds the nuclease target (and its
//!   PAM) in the amplicon and derives the comparison window and indicators
//! - **User region**: [`UserRegion`], the sub-window whose content is scored
//! - **Extraction**: [`collect_query_counts`] cuts the window out of every read
//!   (both orientations) and deduplicates the resulting query sequences
//! - **Alignment engine**: [`align_and_map_user_region`] aligns a query against
//!   the window and slices the user region out of the alignment
//! - **Aggregation**: [`aggregate_alignments`], [`prime`] outcome summaries and
//!   [`base_edit`] substitution statistics
//!
//! [`pipeline`] wires these together behind [`AnalysisConfig`].
//!
//! # Example
//!
//! ```
//! use pea_edit::TargetRegion;
//!
//! let region = TargetRegion::locate(b"AAAATGGGCCCTTT", b"TGGGCC", 4, 3).unwrap();
//! assert_eq!(region.pam_range(), 7..10);
//! assert_eq!(region.comparison_range(), 3..11);
//! ```

pub mod aggregate;
pub mod base_edit;
pub mod config;
pub mod engine;
pub mod extract;
pub mod pipeline;
pub mod prime;
pub mod region;
pub mod split;
pub mod target;

#[cfg(test)]
mod testutil;

pub use aggregate::{aggregate_alignments, AlignCount, AlignCountTable};
pub use base_edit::{analyze_base_editing, BaseEditingReport, Sample, Substitution};
pub use config::{AnalysisConfig, BaseEditingConfig, NamedSeq};
pub use engine::{align_and_map_user_region, align_query_counts, UserRegionAlignment, WeightedAlignment};
pub use extract::{collect_query_counts, extract_query_sequence, ExtractionPolicy, Indicators, QueryCount, QueryCounts};
pub use pipeline::{run_align_mutations, run_prime_editor, AlignMutationsOutput, AnalysisContext, PrimeEditorOutput};
pub use prime::{PrimeEditOutcome, PrimeEditSummary, RegionQueryCount};
pub use region::UserRegion;
pub use split::{split_by_tag, TaggedRows};
pub use target::{Strand, TargetRegion};
