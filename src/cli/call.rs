use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::cli::OutputFormat;
use crate::matching;
use crate::matching::classifier::DEFAULT_MIN_IDENTITY;
use crate::metadata;
use crate::parsing;
use crate::parsing::fasta::sample_name_from_path;
use crate::report;

#[derive(Args)]
pub struct CallArgs {
    /// Tabular BLAST output to resolve (columns: qseqid qseq length nident
    /// pident mismatch evalue bitscore sacc stitle)
    #[arg(short = 'b', long)]
    pub blast_out: PathBuf,

    /// Genotype reference table (TSV). Defaults to the embedded table.
    #[arg(short = 'c', long)]
    pub table: Option<PathBuf>,

    /// Force output to this sample name instead of deriving it from the
    /// input file name
    #[arg(short = 'n', long)]
    pub sample_name: Option<String>,

    /// Minimum percent identity for trusting a segment call
    #[arg(long, default_value_t = DEFAULT_MIN_IDENTITY)]
    pub min_identity: f64,

    /// Sample metadata lookup TSV for decorating the report
    #[arg(long)]
    pub metadata: Option<PathBuf>,
}

/// Execute the call subcommand: the core pipeline over pre-computed BLAST
/// output, with no external tools and no report staging.
///
/// # Errors
///
/// Returns an error if the BLAST output or reference table is unreadable
/// or violates its schema.
pub fn run(args: CallArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let sample_id = args
        .sample_name
        .clone()
        .unwrap_or_else(|| sample_name_from_path(&args.blast_out));

    let table = super::genotype::load_table(args.table.as_deref(), verbose)?;

    let hits = parsing::blast::parse_blast_file(&args.blast_out)
        .with_context(|| format!("Failed to parse {}", args.blast_out.display()))?;
    if verbose {
        eprintln!("Parsed {} alignment hits", hits.len());
    }

    let calls = matching::classify_hits(&hits, args.min_identity);
    let candidate = matching::candidate_fingerprint(&calls);
    let verdict = matching::find_match(&table, &candidate);
    let decoration = metadata::decoration(args.metadata.as_deref(), &sample_id);
    let result = matching::assemble(&sample_id, &calls, &verdict, decoration);

    let row = report::render(&result, Some(&args.blast_out), args.min_identity);
    crate::cli::emit_result(&result, &row, format)
}
