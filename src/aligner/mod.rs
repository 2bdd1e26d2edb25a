//! External BLAST collaborator.
//!
//! Builds a nucleotide database from the curated reference FASTAs and runs
//! `blastn` against it, both as synchronous subprocesses. Everything here
//! stays out of the core pipeline: the core only ever sees the finished
//! tabular output file. All scratch files live under a caller-provided
//! work directory so that `--debug` can retain them.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use thiserror::Error;
use tracing::debug;

/// Tabular output columns requested from blastn. Must stay in sync with
/// `parsing::blast::FIELD_COUNT`.
pub const OUTFMT: &str = "6 qseqid qseq length nident pident mismatch evalue bitscore sacc stitle";

const MAKEBLASTDB: &str = "makeblastdb";
const BLASTN: &str = "blastn";

#[derive(Error, Debug)]
pub enum AlignerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No reference FASTA files found under {0}")]
    NoReferenceFastas(PathBuf),

    #[error("'{tool}' not found on PATH (is NCBI BLAST+ installed?)")]
    ToolMissing { tool: &'static str },

    #[error("{tool} exited with {status}: {stderr}")]
    ToolFailed {
        tool: &'static str,
        status: ExitStatus,
        stderr: String,
    },
}

/// Runner for the BLAST database build and search steps.
#[derive(Debug, Clone)]
pub struct BlastRunner {
    /// blastn word size
    pub word_size: u32,

    /// Alignments requested per query; fragmented queries may still
    /// produce extra rows
    pub num_alignments: u32,

    /// blastn worker threads
    pub num_threads: u32,
}

impl Default for BlastRunner {
    fn default() -> Self {
        Self {
            word_size: 11,
            num_alignments: 1,
            num_threads: 2,
        }
    }
}

impl BlastRunner {
    /// Concatenate the reference FASTAs and build a nucleotide database
    /// under `work_dir`. Returns the database path prefix.
    ///
    /// # Errors
    ///
    /// Returns `AlignerError::NoReferenceFastas` if the directory holds no
    /// FASTA files, or a tool error if `makeblastdb` fails.
    pub fn build_database(
        &self,
        reference_dir: &Path,
        work_dir: &Path,
    ) -> Result<PathBuf, AlignerError> {
        let mut fastas: Vec<PathBuf> = std::fs::read_dir(reference_dir)?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| crate::parsing::fasta::is_fasta_file(path))
            .collect();
        if fastas.is_empty() {
            return Err(AlignerError::NoReferenceFastas(reference_dir.to_path_buf()));
        }
        fastas.sort();

        let combined = work_dir.join("genotype_refs.fasta");
        let mut out = std::fs::File::create(&combined)?;
        for path in &fastas {
            let mut input = std::fs::File::open(path)?;
            std::io::copy(&mut input, &mut out)?;
        }
        debug!(
            "Combined {} reference FASTAs into {}",
            fastas.len(),
            combined.display()
        );

        let db = work_dir.join("flu_geno_db");
        let mut cmd = Command::new(MAKEBLASTDB);
        cmd.arg("-in")
            .arg(&combined)
            .arg("-dbtype")
            .arg("nucl")
            .arg("-out")
            .arg(&db)
            .arg("-title")
            .arg("flu_geno_db");
        run_tool(MAKEBLASTDB, &mut cmd)?;

        Ok(db)
    }

    /// Run blastn for the sample against the database, writing tabular
    /// output to `out`.
    ///
    /// # Errors
    ///
    /// Returns `AlignerError::ToolMissing` if blastn is not installed, or
    /// `AlignerError::ToolFailed` with its stderr on a non-zero exit.
    pub fn run_blastn(&self, query: &Path, db: &Path, out: &Path) -> Result<(), AlignerError> {
        let mut cmd = Command::new(BLASTN);
        cmd.arg("-query")
            .arg(query)
            .arg("-db")
            .arg(db)
            .arg("-word_size")
            .arg(self.word_size.to_string())
            .arg("-outfmt")
            .arg(OUTFMT)
            .arg("-num_alignments")
            .arg(self.num_alignments.to_string())
            .arg("-num_threads")
            .arg(self.num_threads.to_string())
            .arg("-out")
            .arg(out);
        run_tool(BLASTN, &mut cmd)
    }
}

fn run_tool(tool: &'static str, cmd: &mut Command) -> Result<(), AlignerError> {
    debug!("Running {cmd:?}");

    let output = cmd.output().map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            AlignerError::ToolMissing { tool }
        } else {
            AlignerError::Io(e)
        }
    })?;

    if !output.status.success() {
        return Err(AlignerError::ToolFailed {
            tool,
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_reference_dir_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let work = tempfile::tempdir().unwrap();

        let err = BlastRunner::default()
            .build_database(dir.path(), work.path())
            .unwrap_err();
        assert!(matches!(err, AlignerError::NoReferenceFastas(_)));
    }

    #[test]
    fn test_outfmt_matches_parser_schema() {
        // "6" plus one token per parsed column
        let columns = OUTFMT.split_whitespace().count() - 1;
        assert_eq!(columns, crate::parsing::blast::FIELD_COUNT);
    }
}
