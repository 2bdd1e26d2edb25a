use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use tracing::info;

use crate::aligner::BlastRunner;
use crate::catalog::table::GenotypeTable;
use crate::cli::OutputFormat;
use crate::matching;
use crate::matching::classifier::DEFAULT_MIN_IDENTITY;
use crate::metadata;
use crate::parsing;
use crate::parsing::fasta::sample_name_from_path;
use crate::report;

#[derive(Args)]
pub struct GenotypeArgs {
    /// Assembled FASTA to genotype
    #[arg(short = 'f', long)]
    pub fasta: PathBuf,

    /// Directory of reference FASTAs to BLAST against. Headers must be
    /// '<genotype-label> <sample-id> <gene-name>'. Defaults to
    /// dependencies/fastas next to the installed binary.
    #[arg(short = 'i', long)]
    pub reference_dir: Option<PathBuf>,

    /// Genotype reference table (TSV). Defaults to the embedded table.
    #[arg(short = 'c', long)]
    pub table: Option<PathBuf>,

    /// Force output to this sample name instead of deriving it from the
    /// FASTA file name
    #[arg(short = 'n', long)]
    pub sample_name: Option<String>,

    /// Minimum percent identity for trusting a segment call
    #[arg(long, default_value_t = DEFAULT_MIN_IDENTITY)]
    pub min_identity: f64,

    /// Sample metadata lookup TSV for decorating the report
    #[arg(long)]
    pub metadata: Option<PathBuf>,

    /// Keep intermediate BLAST files
    #[arg(short = 'd', long)]
    pub debug: bool,
}

/// Execute the genotype subcommand.
///
/// Biological ambiguities (no match, missing segments) complete normally
/// with a labelled result; only schema and database-integrity violations
/// return an error.
///
/// # Errors
///
/// Returns an error if the FASTA or reference table is unreadable or
/// malformed, or if a BLAST tool fails.
pub fn run(args: GenotypeArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let sample_id = args
        .sample_name
        .clone()
        .unwrap_or_else(|| sample_name_from_path(&args.fasta));

    let records = parsing::fasta::inspect_fasta_file(&args.fasta)
        .with_context(|| format!("Failed to read {}", args.fasta.display()))?;
    if verbose {
        eprintln!(
            "Parsed {} assembled sequences from {}",
            records.len(),
            args.fasta.display()
        );
    }

    let table = load_table(args.table.as_deref(), verbose)?;

    let reference_dir = resolve_reference_dir(args.reference_dir.as_deref())?;

    // Scratch space for the database and raw BLAST output; dropped unless
    // --debug retains it
    let scratch = tempfile::Builder::new()
        .prefix(&format!("{sample_id}_blast_"))
        .tempdir()?;

    let runner = BlastRunner::default();
    let db = runner.build_database(&reference_dir, scratch.path())?;
    let blast_out = scratch.path().join(format!("{sample_id}_blast_out.txt"));
    runner.run_blastn(&args.fasta, &db, &blast_out)?;

    let hits = parsing::blast::parse_blast_file(&blast_out)?;
    if verbose {
        eprintln!("Parsed {} alignment hits", hits.len());
    }

    let calls = matching::classify_hits(&hits, args.min_identity);
    let candidate = matching::candidate_fingerprint(&calls);
    let verdict = matching::find_match(&table, &candidate);
    let decoration = metadata::decoration(args.metadata.as_deref(), &sample_id);
    let result = matching::assemble(&sample_id, &calls, &verdict, decoration);

    let row = report::render(&result, Some(&args.fasta), args.min_identity);
    let report_path = report::write_tsv(&row, Path::new("."), &sample_id)?;
    info!("Report written to {}", report_path.display());

    crate::cli::emit_result(&result, &row, format)?;

    if args.debug {
        let retained = scratch.into_path();
        eprintln!("Retained intermediate files in {}", retained.display());
    }

    Ok(())
}

pub(crate) fn load_table(path: Option<&Path>, verbose: bool) -> anyhow::Result<GenotypeTable> {
    let table = match path {
        Some(path) => GenotypeTable::load_from_file(path)
            .with_context(|| format!("Invalid genotype table {}", path.display()))?,
        None => GenotypeTable::load_embedded()?,
    };
    if verbose {
        eprintln!("Loaded genotype table with {} genotypes", table.len());
    }
    Ok(table)
}

/// The curated reference FASTAs ship alongside the binary by default.
fn resolve_reference_dir(arg: Option<&Path>) -> anyhow::Result<PathBuf> {
    if let Some(dir) = arg {
        anyhow::ensure!(
            dir.is_dir(),
            "Reference directory {} does not exist",
            dir.display()
        );
        return Ok(dir.to_path_buf());
    }

    let exe = std::env::current_exe()?;
    let default = exe
        .parent()
        .and_then(Path::parent)
        .map(|root| root.join("dependencies").join("fastas"));

    match default {
        Some(dir) if dir.is_dir() => Ok(dir),
        _ => anyhow::bail!(
            "No reference FASTA directory: pass --reference-dir or install dependencies/fastas alongside the binary"
        ),
    }
}
