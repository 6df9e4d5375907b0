//! Per-sample analysis runs.
//!
//! [`AnalysisContext::prepare`] does all configuration-dependent work once
//! (validation, target location, indicators); the run functions then stream
//! reads through extraction, alignment and aggregation.

use log::{debug, info};
use pea_align::PairwiseAligner;
use pea_core::{Result, Summarizable};

use crate::aggregate::{aggregate_alignments, AlignCountTable};
use crate::config::AnalysisConfig;
use crate::engine::align_query_counts;
use crate::extract::{collect_query_counts, ExtractionPolicy, Indicators};
use crate::prime::{region_query_counts, PrimeEditSummary, RegionQueryCount};
use crate::region::UserRegion;
use crate::target::TargetRegion;

/// Located target and derived read anchors for one configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisContext {
    pub region: TargetRegion,
    pub user_region: UserRegion,
    pub indicators: Indicators,
}

impl AnalysisContext {
    /// Validate `config` and locate the target on either amplicon strand.
    pub fn prepare(config: &AnalysisConfig) -> Result<Self> {
        config.validate()?;
        let region = TargetRegion::locate_on_either_strand(
            config.amplicon.as_bytes(),
            config.target.as_bytes(),
            config.comparison_radius,
            config.pam_length,
        )?;
        info!("{} located: {}", config.target, region.summary());
        let indicators = Indicators::from_region(&region, config.indicator_length)?;
        let user_region = UserRegion::for_target(&region, config.user_region_offset, config.user_region_length);
        debug!(
            "user region {}..{}, window offsets {:?}",
            user_region.beg,
            user_region.end,
            user_region.window_offsets(&region)
        );
        Ok(Self {
            region,
            user_region,
            indicators,
        })
    }

    /// Reference content of the user region.
    pub fn user_region_sequence(&self) -> &[u8] {
        self.user_region.reference_sequence(&self.region)
    }
}

/// Result of an `align-mutations` run.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignMutationsOutput {
    pub table: AlignCountTable,
    pub total_reads: u64,
    pub extracted: u64,
}

pub fn run_align_mutations<I, R, A>(context: &AnalysisContext, reads: I, aligner: &A) -> AlignMutationsOutput
where
    I: IntoIterator<Item = R>,
    R: AsRef<[u8]>,
    A: PairwiseAligner + Sync + ?Sized,
{
    let queries = collect_query_counts(reads, &context.indicators, ExtractionPolicy::AlignMutations);
    let aligned = align_query_counts(aligner, &queries.counts, &context.region, &context.user_region);
    let table = aggregate_alignments(aligned);
    info!("{} distinct user-region alignments", table.len());
    AlignMutationsOutput {
        table,
        total_reads: queries.total_reads,
        extracted: queries.extracted,
    }
}

/// Result of a `prime-editor` run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimeEditorOutput {
    pub counts: Vec<RegionQueryCount>,
    pub summary: PrimeEditSummary,
}

pub fn run_prime_editor<I, R, A>(
    context: &AnalysisContext,
    reads: I,
    aligner: &A,
    intended_mutation: Option<&str>,
) -> PrimeEditorOutput
where
    I: IntoIterator<Item = R>,
    R: AsRef<[u8]>,
    A: PairwiseAligner + Sync + ?Sized,
{
    let queries = collect_query_counts(reads, &context.indicators, ExtractionPolicy::PrimeEditing);
    let aligned = align_query_counts(aligner, &queries.counts, &context.region, &context.user_region);
    let counts = region_query_counts(aligned);
    let reference = String::from_utf8_lossy(context.user_region_sequence()).into_owned();
    let summary = PrimeEditSummary::from_counts(&counts, &reference, intended_mutation, queries.total_reads);
    info!("{}", summary.summary());
    PrimeEditorOutput { counts, summary }
}
