use clap::Parser;
use tracing_subscriber::EnvFilter;

mod aligner;
mod catalog;
mod cli;
mod core;
mod matching;
mod metadata;
mod parsing;
mod report;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("flu_genotyper=debug,info")
    } else {
        EnvFilter::new("flu_genotyper=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        cli::Commands::Genotype(args) => {
            cli::genotype::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Call(args) => {
            cli::call::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Table(args) => {
            cli::table::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
