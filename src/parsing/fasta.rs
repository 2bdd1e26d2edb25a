//! Reader for the assembled sample FASTA using noodles.
//!
//! The genotyping pipeline never inspects sequence content itself; this
//! module only validates that the input is a readable FASTA and reports the
//! assembled segment names and lengths. Supports gzip compressed files.

use std::ffi::OsStr;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::GzDecoder;
use noodles::fasta;

use crate::parsing::blast::ParseError;

/// Name and length of one assembled sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentRecord {
    pub name: String,
    pub length: u64,
}

/// Check if the path has a FASTA extension
pub fn is_fasta_file(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();

    if path_str.ends_with(".fa.gz")
        || path_str.ends_with(".fasta.gz")
        || path_str.ends_with(".fna.gz")
    {
        return true;
    }

    matches!(
        path.extension()
            .and_then(OsStr::to_str)
            .map(str::to_lowercase)
            .as_deref(),
        Some("fa" | "fasta" | "fna")
    )
}

#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
fn is_gzipped(path: &Path) -> bool {
    path.to_string_lossy().to_lowercase().ends_with(".gz")
}

/// Read an assembled FASTA and list its sequence names and lengths.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or
/// `ParseError::InvalidFormat` if it is not parseable FASTA or holds no
/// sequences.
pub fn inspect_fasta_file(path: &Path) -> Result<Vec<SegmentRecord>, ParseError> {
    if is_gzipped(path) {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(GzDecoder::new(file));
        inspect_reader(&mut fasta::io::Reader::new(reader))
    } else {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        inspect_reader(&mut fasta::io::Reader::new(reader))
    }
}

fn inspect_reader<R: BufRead>(
    reader: &mut fasta::io::Reader<R>,
) -> Result<Vec<SegmentRecord>, ParseError> {
    let mut records = Vec::new();

    for result in reader.records() {
        let record = result
            .map_err(|e| ParseError::InvalidFormat(format!("Failed to parse FASTA record: {e}")))?;

        records.push(SegmentRecord {
            name: String::from_utf8_lossy(record.name()).to_string(),
            length: record.sequence().len() as u64,
        });
    }

    if records.is_empty() {
        return Err(ParseError::InvalidFormat(
            "No sequences found in FASTA file".to_string(),
        ));
    }

    Ok(records)
}

/// Derive the sample name from a FASTA path: the file name truncated at the
/// first `_` or `.`.
pub fn sample_name_from_path(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let truncated = match file_name.find(['_', '.']) {
        Some(idx) => &file_name[..idx],
        None => file_name.as_str(),
    };

    if truncated.is_empty() {
        file_name
    } else {
        truncated.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_is_fasta_file() {
        assert!(is_fasta_file(Path::new("sample.fa")));
        assert!(is_fasta_file(Path::new("sample.fasta")));
        assert!(is_fasta_file(Path::new("sample.fasta.gz")));
        assert!(!is_fasta_file(Path::new("sample_blast_out.txt")));
        assert!(!is_fasta_file(Path::new("genotype_key.tsv")));
    }

    #[test]
    fn test_inspect_fasta_file() {
        let mut temp = NamedTempFile::with_suffix(".fasta").unwrap();
        temp.write_all(b">seg_1 PB2\nACGTACGT\nACGT\n>seg_2 PB1\nGGGG\n")
            .unwrap();
        temp.flush().unwrap();

        let records = inspect_fasta_file(temp.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "seg_1");
        assert_eq!(records[0].length, 12);
        assert_eq!(records[1].length, 4);
    }

    #[test]
    fn test_inspect_empty_fasta() {
        let mut temp = NamedTempFile::with_suffix(".fasta").unwrap();
        temp.write_all(b"").unwrap();
        temp.flush().unwrap();

        assert!(inspect_fasta_file(temp.path()).is_err());
    }

    #[test]
    fn test_sample_name_from_path() {
        assert_eq!(
            sample_name_from_path(Path::new("/data/A24-0042_final.fasta")),
            "A24-0042"
        );
        assert_eq!(sample_name_from_path(Path::new("sample.fasta")), "sample");
        assert_eq!(sample_name_from_path(Path::new("plain")), "plain");
    }
}
