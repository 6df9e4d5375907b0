//! Subcommand drivers.

use std::path::Path;

use anyhow::{Context, Result};
use log::{error, info};
use pea_align::GlobalAligner;
use pea_core::PeaError;
use pea_edit::{
    analyze_base_editing, run_align_mutations, run_prime_editor, split_by_tag, AnalysisConfig, AnalysisContext,
    BaseEditingConfig, Sample,
};
use pea_io::{
    align_mutations_prefix, prime_editor_prefix, read_align_table, sample_name, write_align_table,
    write_base_editing_report, write_prime_summary, write_region_counts, write_split_tables, BaseEditingOutputs,
    PrimeSummaryLine,
};
use pea_seq::read_sequences;

use crate::cli::{AlignMutationsArgs, BeStatsArgs, PrimeEditorArgs, SplitAlignArgs};

fn prepare(config: &AnalysisConfig) -> Result<AnalysisContext> {
    match AnalysisContext::prepare(config) {
        Ok(context) => Ok(context),
        Err(PeaError::TargetNotFound { target, amplicon }) => {
            error!("cannot find the target sequence in the amplicon sequence");
            error!("target sequence: {target}");
            error!("amplicon sequence: {amplicon}");
            Err(PeaError::TargetNotFound { target, amplicon }.into())
        }
        Err(e) => Err(e).context("invalid analysis configuration"),
    }
}

/// Reads of `input`, or `None` (logged) when the file does not exist.
fn load_reads(input: &Path) -> Result<Option<Vec<Vec<u8>>>> {
    if !input.is_file() {
        error!("input file not found: {}", input.display());
        return Ok(None);
    }
    info!("input: {}", input.display());
    let reads = read_sequences(input).with_context(|| format!("failed to read {}", input.display()))?;
    Ok(Some(reads))
}

pub fn align_mutations(args: &AlignMutationsArgs) -> Result<()> {
    let config = args.analysis.to_config();
    let context = prepare(&config)?;
    let aligner = GlobalAligner::for_indels(config.indel_in_alignment);

    for input in &args.analysis.inputs {
        let Some(reads) = load_reads(input)? else {
            continue;
        };
        let output = run_align_mutations(&context, &reads, &aligner);
        info!(
            "{} of {} reads extracted from {}",
            output.extracted,
            output.total_reads,
            input.display()
        );

        let prefix = align_mutations_prefix(input, &config.amplicon, &config.target, &args.analysis.output_nametag);
        let path = args.analysis.output_dir.join(format!("{prefix}.align.csv"));
        write_align_table(&path, &output.table).with_context(|| format!("failed to write {}", path.display()))?;
        info!("saved output to {}", path.display());
    }
    Ok(())
}

pub fn prime_editor(args: &PrimeEditorArgs) -> Result<()> {
    let mut config = args.analysis.to_config();
    config.intended_mutation = args.user_target_mutation.clone();
    let context = prepare(&config)?;
    let aligner = GlobalAligner::for_indels(config.indel_in_alignment);
    let intended = config.intended_mutation.as_ref().map(|m| m.sequence());

    for input in &args.analysis.inputs {
        let Some(reads) = load_reads(input)? else {
            continue;
        };
        let output = run_prime_editor(&context, &reads, &aligner, intended);

        let prefix = prime_editor_prefix(
            input,
            &config.amplicon,
            &config.target,
            config.intended_mutation.as_ref(),
            &args.analysis.output_nametag,
        );
        let summary_path = args.analysis.output_dir.join(format!("{prefix}.summary.txt"));
        let sample = sample_name(input);
        let line = PrimeSummaryLine {
            sample: &sample,
            tag: &args.analysis.output_nametag,
            amplicon_name: config.amplicon.name(),
            target: config.target.sequence(),
            intended_mutation: intended.unwrap_or(""),
            summary: &output.summary,
        };
        write_prime_summary(&summary_path, &line)
            .with_context(|| format!("failed to write {}", summary_path.display()))?;

        let count_path = args.analysis.output_dir.join(format!("{prefix}.count.csv"));
        write_region_counts(&count_path, &output.counts)
            .with_context(|| format!("failed to write {}", count_path.display()))?;
        info!("saved output to {} and {}", summary_path.display(), count_path.display());
    }
    Ok(())
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

pub fn be_stats(args: &BeStatsArgs) -> Result<()> {
    let config = BaseEditingConfig::from_args(&args.be_muts, &args.non_x_muts, args.exclude_indel_reads)
        .context("invalid base-editing options")?;

    let samples = args
        .inputs
        .iter()
        .map(|path| {
            let rows = read_align_table(path).with_context(|| format!("failed to read {}", path.display()))?;
            Ok(Sample {
                name: file_label(path),
                rows,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let report = analyze_base_editing(samples, &config);
    let names = BaseEditingOutputs {
        substitution_positions: args.be_output.clone(),
        substitution_overall: args.be_output_overall.clone(),
        non_x_overall: args.nonx_output.clone(),
        non_x_positions: args.nonx_detail_output.clone(),
        ..BaseEditingOutputs::default()
    };
    std::fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("failed to create {}", args.output_dir.display()))?;
    let written = write_base_editing_report(&args.output_dir, &report, &names)?;
    info!("wrote {} tables", written.len());
    Ok(())
}

pub fn split_align(args: &SplitAlignArgs) -> Result<()> {
    for input in &args.inputs {
        let rows = read_align_table(input).with_context(|| format!("failed to read {}", input.display()))?;
        let groups = split_by_tag(&rows, &args.positions, args.beg, args.end)?;
        let written = write_split_tables(&args.subdir, &file_label(input), &groups)?;
        info!("{}: {} tagged tables", input.display(), written.len());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{AnalysisArgs, Cli, Command};
    use clap::Parser;
    use pea_edit::NamedSeq;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn random_dna(len: usize, seed: u64) -> Vec<u8> {
        let bases = [b'A', b'C', b'G', b'T'];
        let mut seq = Vec::with_capacity(len);
        let mut state: u64 = seed;
        for _ in 0..len {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            seq.push(bases[((state >> 33) % 4) as usize]);
        }
        seq
    }

    fn write_fastq(path: &Path, reads: &[Vec<u8>]) {
        let mut file = std::fs::File::create(path).unwrap();
        for (i, read) in reads.iter().enumerate() {
            writeln!(file, "@read{i}").unwrap();
            file.write_all(read).unwrap();
            writeln!(file).unwrap();
            writeln!(file, "+").unwrap();
            writeln!(file, "{}", "I".repeat(read.len())).unwrap();
        }
    }

    struct Fixture {
        amplicon: Vec<u8>,
        _dir: tempfile::TempDir,
        input: PathBuf,
        out: PathBuf,
    }

    /// Three wild-type reads and one with a substitution in the user region.
    fn fixture() -> Fixture {
        let amplicon = random_dna(200, 2024);
        let wt = amplicon[10..190].to_vec();
        let mut edited = wt.clone();
        edited[95] = if edited[95] == b'A' { b'G' } else { b'A' };

        let dir = tempdir().unwrap();
        let input = dir.path().join("1.fastqjoin");
        write_fastq(&input, &[wt.clone(), wt.clone(), wt, edited]);
        let out = dir.path().join("out");
        std::fs::create_dir_all(&out).unwrap();
        Fixture {
            amplicon,
            _dir: dir,
            input,
            out,
        }
    }

    fn analysis_args(f: &Fixture, target: &[u8]) -> AnalysisArgs {
        let amp = String::from_utf8(f.amplicon.clone()).unwrap();
        let target = String::from_utf8(target.to_vec()).unwrap();
        let cli = Cli::try_parse_from([
            "pea".to_string(),
            "align-mutations".to_string(),
            "-i".to_string(),
            f.input.display().to_string(),
            "-a".to_string(),
            format!("amp:{amp}"),
            "-t".to_string(),
            format!("sg1:{target}"),
            "-o".to_string(),
            f.out.display().to_string(),
        ])
        .unwrap();
        match cli.command {
            Command::AlignMutations(args) => args.analysis,
            _ => unreachable!(),
        }
    }

    #[test]
    fn alignment_fan_out_follows_parallel_feature() {
        assert_eq!(pea_edit::engine::PARALLEL_ALIGNMENT, cfg!(feature = "parallel"));
    }

    #[test]
    fn align_mutations_writes_table() {
        let f = fixture();
        let analysis = analysis_args(&f, &f.amplicon[80..103]);
        let args = AlignMutationsArgs {
            analysis: analysis.clone(),
        };
        align_mutations(&args).unwrap();

        let prefix = align_mutations_prefix(&f.input, &analysis.amplicon_seq, &analysis.target_seq, "out");
        let rows = read_align_table(f.out.join(format!("{prefix}.align.csv"))).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].n_reads, 3);
        assert_eq!(rows[1].n_reads, 1);
        assert_eq!(rows[1].alignment.matches('.').count(), 1);
    }

    #[test]
    fn missing_input_is_skipped() {
        let f = fixture();
        let mut analysis = analysis_args(&f, &f.amplicon[80..103]);
        analysis.inputs = vec![f.out.join("absent.fastqjoin")];
        align_mutations(&AlignMutationsArgs { analysis }).unwrap();
        assert_eq!(std::fs::read_dir(&f.out).unwrap().count(), 0);
    }

    #[test]
    fn target_not_found_fails() {
        let f = fixture();
        let analysis = analysis_args(&f, b"ACGTACGTACGTACGTACGTACG");
        let err = align_mutations(&AlignMutationsArgs { analysis }).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PeaError>(),
            Some(PeaError::TargetNotFound { .. })
        ));
    }

    #[test]
    fn prime_editor_writes_summary_and_counts() {
        let f = fixture();
        let analysis = analysis_args(&f, &f.amplicon[80..103]);
        let mut intended = f.amplicon[97..127].to_vec();
        intended[8] = if intended[8] == b'A' { b'G' } else { b'A' };
        let mutation = NamedSeq::new("pe1", &intended).unwrap();
        let args = PrimeEditorArgs {
            analysis: analysis.clone(),
            user_target_mutation: Some(mutation.clone()),
        };
        prime_editor(&args).unwrap();

        let prefix = prime_editor_prefix(
            &f.input,
            &analysis.amplicon_seq,
            &analysis.target_seq,
            Some(&mutation),
            "out",
        );
        let summary = std::fs::read_to_string(f.out.join(format!("{prefix}.summary.txt"))).unwrap();
        let fields: Vec<&str> = summary.trim_end().split('\t').collect();
        assert_eq!(fields.len(), 13);
        assert_eq!(fields[1], "out");
        assert_eq!(fields[2], "amp");
        assert_eq!(fields[5], "1");
        assert_eq!(fields[6], "0.25000");
        assert_eq!(fields[11], "4");
        assert_eq!(fields[12], "4");
        assert!(f.out.join(format!("{prefix}.count.csv")).is_file());
    }

    #[test]
    fn be_stats_and_split_from_align_table() {
        let f = fixture();
        let analysis = analysis_args(&f, &f.amplicon[80..103]);
        align_mutations(&AlignMutationsArgs {
            analysis: analysis.clone(),
        })
        .unwrap();
        let prefix = align_mutations_prefix(&f.input, &analysis.amplicon_seq, &analysis.target_seq, "out");
        let table = f.out.join(format!("{prefix}.align.csv"));

        let be_dir = f.out.join("be");
        let cli = Cli::try_parse_from([
            "pea".to_string(),
            "be-stats".to_string(),
            table.display().to_string(),
            "--nonx-mut".to_string(),
            (f.amplicon[105] as char).to_string(),
            "-o".to_string(),
            be_dir.display().to_string(),
        ])
        .unwrap();
        let Command::BeStats(be_args) = cli.command else {
            panic!("wrong subcommand");
        };
        be_stats(&be_args).unwrap();
        let counts = std::fs::read_to_string(be_dir.join("read_counts.csv")).unwrap();
        assert!(counts.lines().nth(1).unwrap().ends_with(",4,4"));
        let non_x = std::fs::read_to_string(be_dir.join("summary.mutations.csv")).unwrap();
        assert!(non_x.lines().nth(1).unwrap().contains("\t1\t1\t4\t4"));

        let subdir = f.out.join("trimmed");
        split_align(&SplitAlignArgs {
            inputs: vec![table],
            positions: vec![9],
            beg: 1,
            end: 30,
            subdir: subdir.clone(),
        })
        .unwrap();
        assert_eq!(std::fs::read_dir(&subdir).unwrap().count(), 2);
    }
}
