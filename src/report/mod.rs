//! Report rendering: the result record flattened into ordered key/value
//! pairs suitable for a tabular report row, plus the TSV report writer.
//!
//! File-system staging lives here and in the CLI layer, never in the core.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::core::result::GenotypeResult;

/// Coverage placeholder for runs on a bare FASTA.
pub const NO_COVERAGE: &str = "Ran on FASTA - No Coverage Report";

/// One report row as ordered key/value pairs.
#[derive(Debug, Clone, Default)]
pub struct ReportRow {
    pub fields: Vec<(String, String)>,
}

impl ReportRow {
    fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.push((key.into(), value.into()));
    }

    /// Value for a key, if present
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Flatten a result into the report row layout.
///
/// The threshold in the "Genotype List Used" key reflects the configured
/// value so a non-default run is visible in the report itself.
#[must_use]
pub fn render(result: &GenotypeResult, source_file: Option<&Path>, min_identity: f64) -> ReportRow {
    let mut row = ReportRow::default();

    row.push("Sample", result.sample_id.as_str());
    row.push(
        "Date",
        chrono::Local::now().format("%Y-%m-%d_%H-%M-%S").to_string(),
    );
    row.push(
        "File Name",
        source_file.map_or_else(|| "-".to_string(), |p| p.display().to_string()),
    );
    row.push("Genotype", result.genotype_label.as_str());
    row.push(
        format!("Genotype List Used, >={min_identity}%"),
        result.segments_used.join(", "),
    );

    let titles: Vec<String> = result
        .evidence
        .iter()
        .map(|e| format!("{}:{}:{}", e.genotype_label, e.reference_sample, e.segment))
        .collect();
    row.push("Genotype Sample Title List", titles.join(", "));

    let pidents: Vec<String> = result
        .evidence
        .iter()
        .map(|e| format!("{:.2}%", e.percent_identity))
        .collect();
    row.push("Genotype Percent Match List", pidents.join(", "));

    let mismatches: Vec<String> = result
        .evidence
        .iter()
        .map(|e| group_thousands(e.mismatch_count))
        .collect();
    row.push("Genotype Mismatch List", mismatches.join(", "));

    let coverages: Vec<String> = result
        .evidence
        .iter()
        .filter_map(|e| e.coverage_depth.map(|d| format!("{d:.1}X")))
        .collect();
    row.push(
        "Genotype Average Depth of Coverage List",
        if coverages.is_empty() {
            NO_COVERAGE.to_string()
        } else {
            coverages.join(", ")
        },
    );

    row.push("Metadata", result.metadata.as_str());

    row
}

/// Write the row as a two-line TSV named
/// `<sample>_<date-stamp>_genotype.tsv` under `dir`. Returns the path.
///
/// # Errors
///
/// Returns any IO error from creating or writing the file.
pub fn write_tsv(row: &ReportRow, dir: &Path, sample_id: &str) -> std::io::Result<PathBuf> {
    let stamp = chrono::Local::now().format("%Y-%m-%d_%H-%M-%S");
    let path = dir.join(format!("{sample_id}_{stamp}_genotype.tsv"));

    let mut file = std::fs::File::create(&path)?;
    let keys: Vec<&str> = row.fields.iter().map(|(k, _)| k.as_str()).collect();
    let values: Vec<&str> = row.fields.iter().map(|(_, v)| v.as_str()).collect();
    writeln!(file, "{}", keys.join("\t"))?;
    writeln!(file, "{}", values.join("\t"))?;

    Ok(path)
}

/// Format an integer with comma thousands separators
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
