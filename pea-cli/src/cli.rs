//! Command-line arguments.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use pea_edit::config::{
    DEFAULT_COMPARISON_RADIUS, DEFAULT_INDICATOR_LENGTH, DEFAULT_PAM_LENGTH, DEFAULT_USER_REGION_LENGTH,
    DEFAULT_USER_REGION_OFFSET,
};
use pea_edit::{AnalysisConfig, NamedSeq};

/// Prime and base editing analysis of amplicon sequencing reads
#[derive(Parser, Debug)]
#[command(name = "pea", version, about)]
pub struct Cli {
    /// Increase verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Tabulate user-region alignments of reads against the amplicon
    AlignMutations(AlignMutationsArgs),
    /// Classify prime-editing outcomes in the user region
    PrimeEditor(PrimeEditorArgs),
    /// Base-editing statistics over align tables
    BeStats(BeStatsArgs),
    /// Split align tables by the alleles at chosen positions
    SplitAlign(SplitAlignArgs),
}

/// Options shared by the read-level commands.
#[derive(Args, Debug, Clone)]
pub struct AnalysisArgs {
    /// Input fastqjoin (FASTQ) files
    #[arg(short = 'i', long = "input", required = true, num_args = 1..)]
    pub inputs: Vec<PathBuf>,

    /// Amplicon sequence, optionally named as NAME:SEQ
    #[arg(short = 'a', long)]
    pub amplicon_seq: NamedSeq,

    /// Target (protospacer + PAM) sequence, optionally named as NAME:SEQ
    #[arg(short = 't', long)]
    pub target_seq: NamedSeq,

    /// Half-width of the comparison window around the PAM (must exceed 20)
    #[arg(long, default_value_t = DEFAULT_COMPARISON_RADIUS)]
    pub comparison_radius: usize,

    /// Length of the indicator sequences at both window ends
    #[arg(long, default_value_t = DEFAULT_INDICATOR_LENGTH)]
    pub indicator_seq_length: usize,

    /// Length of the user region
    #[arg(long, default_value_t = DEFAULT_USER_REGION_LENGTH)]
    pub user_region_length: usize,

    /// Start of the user region, in bases upstream of the PAM
    #[arg(long, default_value_t = DEFAULT_USER_REGION_OFFSET)]
    pub user_region_beg_offset: usize,

    /// PAM length at the 3' end of the target
    #[arg(long, default_value_t = DEFAULT_PAM_LENGTH)]
    pub pam_length: usize,

    /// Allow indels in the read alignment
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub indel_in_alignment: bool,

    /// Tag appended to output file names
    #[arg(long, default_value = "out")]
    pub output_nametag: String,

    /// Directory for output files
    #[arg(short = 'o', long, default_value = ".")]
    pub output_dir: PathBuf,
}

impl AnalysisArgs {
    pub fn to_config(&self) -> AnalysisConfig {
        AnalysisConfig {
            comparison_radius: self.comparison_radius,
            indicator_length: self.indicator_seq_length,
            user_region_length: self.user_region_length,
            user_region_offset: self.user_region_beg_offset,
            pam_length: self.pam_length,
            indel_in_alignment: self.indel_in_alignment,
            ..AnalysisConfig::new(self.amplicon_seq.clone(), self.target_seq.clone())
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct AlignMutationsArgs {
    #[command(flatten)]
    pub analysis: AnalysisArgs,
}

#[derive(Args, Debug, Clone)]
pub struct PrimeEditorArgs {
    #[command(flatten)]
    pub analysis: AnalysisArgs,

    /// Intended user-region sequence after editing, optionally named as NAME:SEQ
    #[arg(short = 'm', long)]
    pub user_target_mutation: Option<NamedSeq>,
}

#[derive(Args, Debug, Clone)]
pub struct BeStatsArgs {
    /// Align tables written by align-mutations
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Substitution of interest, e.g. CtoT (repeatable)
    #[arg(long = "be-mut")]
    pub be_muts: Vec<String>,

    /// Reference base X for X-to-non-X statistics (repeatable)
    #[arg(long = "nonx-mut")]
    pub non_x_muts: Vec<String>,

    /// Drop reads with indels instead of masking insertion columns
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub exclude_indel_reads: bool,

    /// Directory for output files
    #[arg(short = 'o', long, default_value = ".")]
    pub output_dir: PathBuf,

    #[arg(long, default_value = "summary.base_editing.csv")]
    pub be_output: String,

    #[arg(long, default_value = "summary.be_overall.csv")]
    pub be_output_overall: String,

    #[arg(long, default_value = "summary.mutations.csv")]
    pub nonx_output: String,

    #[arg(long, default_value = "summary.nonX_per_pos.mutations.csv")]
    pub nonx_detail_output: String,
}

#[derive(Args, Debug, Clone)]
pub struct SplitAlignArgs {
    /// Align tables to split
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// 1-based reference position used in the tag (repeatable)
    #[arg(long = "pos", required = true)]
    pub positions: Vec<usize>,

    /// 1-based first column to keep (inclusive; 1 keeps the first column)
    #[arg(long)]
    pub beg: usize,

    /// 1-based last column to keep
    #[arg(long)]
    pub end: usize,

    /// Sub-directory for the split tables
    #[arg(long, default_value = "trimmed")]
    pub subdir: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn align_mutations_defaults() {
        let cli = Cli::try_parse_from([
            "pea",
            "align-mutations",
            "-i",
            "1.fastqjoin",
            "-a",
            "amp:ACGTACGT",
            "-t",
            "sg1:cgta",
        ])
        .unwrap();
        let Command::AlignMutations(args) = cli.command else {
            panic!("wrong subcommand");
        };
        let config = args.analysis.to_config();
        assert_eq!(config.target.sequence(), "CGTA");
        assert_eq!(config.comparison_radius, 60);
        assert!(config.indel_in_alignment);
        assert_eq!(args.analysis.output_nametag, "out");
    }

    #[test]
    fn prime_editor_flags() {
        let cli = Cli::try_parse_from([
            "pea",
            "-vv",
            "prime-editor",
            "-i",
            "a.fastqjoin",
            "b.fastqjoin",
            "-a",
            "ACGTACGT",
            "-t",
            "CGTA",
            "-m",
            "pe:ACCT",
            "--indel-in-alignment",
            "false",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let Command::PrimeEditor(args) = cli.command else {
            panic!("wrong subcommand");
        };
        assert_eq!(args.analysis.inputs.len(), 2);
        assert_eq!(args.user_target_mutation.unwrap().name(), "pe");
        assert!(!args.analysis.indel_in_alignment);
    }

    #[test]
    fn invalid_sequence_rejected() {
        let parsed = Cli::try_parse_from([
            "pea",
            "align-mutations",
            "-i",
            "x",
            "-a",
            "ACGN",
            "-t",
            "CG",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn be_stats_repeatable_flags() {
        let cli = Cli::try_parse_from([
            "pea", "be-stats", "a.csv", "b.csv", "--be-mut", "CtoT", "--be-mut", "AtoG", "--nonx-mut", "C",
        ])
        .unwrap();
        let Command::BeStats(args) = cli.command else {
            panic!("wrong subcommand");
        };
        assert_eq!(args.be_muts, vec!["CtoT", "AtoG"]);
        assert_eq!(args.non_x_muts, vec!["C"]);
        assert!(args.exclude_indel_reads);
    }
}
