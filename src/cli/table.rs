use std::path::PathBuf;

use clap::Args;

use crate::cli::OutputFormat;
use crate::core::segment::Segment;

#[derive(Args)]
pub struct TableArgs {
    /// Genotype reference table (TSV). Defaults to the embedded table.
    #[arg(short = 'c', long)]
    pub table: Option<PathBuf>,

    /// Show the fingerprint of a single genotype
    #[arg(long)]
    pub genotype: Option<String>,
}

/// Execute the table subcommand: load (and thereby validate) the reference
/// table, then list it or show one row.
///
/// # Errors
///
/// Returns an error if the table is unreadable or malformed, so this
/// command doubles as a validator for edited tables.
pub fn run(args: TableArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let table = super::genotype::load_table(args.table.as_deref(), verbose)?;

    if let Some(name) = &args.genotype {
        let row = table
            .get(name)
            .ok_or_else(|| anyhow::anyhow!("Genotype '{name}' not found in table"))?;

        match format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(row)?),
            _ => {
                println!("{}", row.name);
                for (segment, label) in row.fingerprint.iter() {
                    println!("  {segment}: {label}");
                }
            }
        }
        return Ok(());
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&table.rows)?),
        OutputFormat::Tsv => {
            let header: Vec<&str> = std::iter::once("Genotype")
                .chain(Segment::CANONICAL.iter().map(|s| s.as_str()))
                .collect();
            println!("{}", header.join("\t"));
            for row in &table.rows {
                let labels: Vec<&str> = Segment::CANONICAL
                    .iter()
                    .map(|s| row.fingerprint.get(*s).unwrap_or("-"))
                    .collect();
                println!("{}\t{}", row.name, labels.join("\t"));
            }
        }
        OutputFormat::Text => {
            println!("{} known genotypes:", table.len());
            for row in &table.rows {
                let labels: Vec<String> = row
                    .fingerprint
                    .iter()
                    .map(|(segment, label)| format!("{segment}:{label}"))
                    .collect();
                println!("  {:<8} {}", row.name, labels.join(", "));
            }
        }
    }

    Ok(())
}
