//! Command-line interface for flu-genotyper.
//!
//! Available commands:
//!
//! - **genotype**: full pipeline — build the BLAST database, align the
//!   assembled FASTA, and resolve the genotype
//! - **call**: resolve a genotype from pre-computed BLAST tabular output
//!   (no external tools required)
//! - **table**: validate and inspect the genotype reference table
//!
//! ## Usage
//!
//! ```text
//! # Genotype an assembled influenza genome
//! flu-genotyper genotype -f A24-0042_final.fasta -i refs/fastas
//!
//! # Re-run the resolution logic on retained BLAST output
//! flu-genotyper call -b A24-0042_blast_out.txt
//!
//! # JSON output for scripting
//! flu-genotyper genotype -f sample.fasta -i refs/fastas --format json
//!
//! # Check a custom reference table
//! flu-genotyper table -c my_genotype_key.tsv
//! ```

use clap::{Parser, Subcommand};

use crate::core::result::GenotypeResult;
use crate::report::ReportRow;

pub mod call;
pub mod genotype;
pub mod table;

#[derive(Parser)]
#[command(name = "flu-genotyper")]
#[command(version)]
#[command(about = "Genotype assembled influenza genomes against a curated reference database")]
#[command(
    long_about = "flu-genotyper classifies an assembled influenza genome FASTA into a named genotype.\n\nEach gene segment is BLASTed against a curated reference database; the per-segment lineage labels form a fingerprint that is matched exactly against a table of known genotypes. Incomplete or unknown fingerprints are reported as labelled outcomes, never silently dropped."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Genotype an assembled FASTA (runs makeblastdb and blastn)
    Genotype(genotype::GenotypeArgs),

    /// Resolve a genotype from existing BLAST tabular output
    Call(call::CallArgs),

    /// Validate or inspect the genotype reference table
    Table(table::TableArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Print a result to stdout in the selected format. The text form always
/// ends with the `Genotype --> ...` line downstream scripts grep for.
pub(crate) fn emit_result(
    result: &GenotypeResult,
    row: &ReportRow,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            println!("Sample: {}", result.sample_id);
            for evidence in &result.evidence {
                let status = if evidence.passed { "pass" } else { "below threshold" };
                println!(
                    "  {:<10} {:<8} {:>7.2}%  {} mismatches ({status})",
                    evidence.segment.to_string(),
                    evidence.genotype_label,
                    evidence.percent_identity,
                    evidence.mismatch_count,
                );
            }
            println!(
                "Segments called: {}/{}",
                result.completeness_count,
                crate::core::segment::Segment::CANONICAL.len()
            );
            if result.metadata != crate::metadata::NO_METADATA {
                println!("Metadata: {}", result.metadata);
            }
            println!(
                "\nGenotype --> {}: {}",
                result.genotype_label,
                result.segments_used.join(", ")
            );
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(result)?);
        }
        OutputFormat::Tsv => {
            let keys: Vec<&str> = row.fields.iter().map(|(k, _)| k.as_str()).collect();
            let values: Vec<&str> = row.fields.iter().map(|(_, v)| v.as_str()).collect();
            println!("{}", keys.join("\t"));
            println!("{}", values.join("\t"));
        }
    }

    Ok(())
}
