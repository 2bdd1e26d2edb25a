use std::path::Path;

use thiserror::Error;

use crate::core::hit::{AlignmentHit, ReferenceTitle, TitleError};

/// Fixed column count of the aligner's tabular output:
/// `qseqid qseq length nident pident mismatch evalue bitscore sacc stitle`
pub const FIELD_COUNT: usize = 10;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Line {line} has {found} fields, expected {FIELD_COUNT}: '{raw}'")]
    FieldCount {
        line: usize,
        found: usize,
        raw: String,
    },

    #[error("Invalid {field} on line {line}: '{value}'")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("Line {line}: {source}")]
    Title {
        line: usize,
        #[source]
        source: TitleError,
    },

    #[error("Invalid input: {0}")]
    InvalidFormat(String),
}

/// Parse a tabular BLAST output file into alignment hits.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse
/// errors if a line violates the fixed schema.
pub fn parse_blast_file(path: &Path) -> Result<Vec<AlignmentHit>, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_blast_text(&content)
}

/// Parse tabular BLAST output text into alignment hits, preserving input
/// order.
///
/// Multiple rows per query are kept as-is; selecting the authoritative one
/// is the classifier's job. A short line or an unparsable subject title is
/// fatal, since it indicates a corrupt or incompatible reference database
/// rather than a sample-specific problem.
///
/// # Errors
///
/// Returns `ParseError::FieldCount`, `ParseError::InvalidNumber`, or
/// `ParseError::Title` with the offending raw content.
pub fn parse_blast_text(text: &str) -> Result<Vec<AlignmentHit>, ParseError> {
    let mut hits = Vec::new();

    for (i, line) in text.lines().enumerate() {
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }

        // Line numbers in errors are 1-based for user friendliness
        let line_num = i + 1;

        // The subject title is the final column and contains spaces, so cap
        // the split at the schema's field count.
        let fields: Vec<&str> = line.splitn(FIELD_COUNT, '\t').collect();
        if fields.len() < FIELD_COUNT {
            return Err(ParseError::FieldCount {
                line: line_num,
                found: fields.len(),
                raw: line.to_string(),
            });
        }

        let title = ReferenceTitle::parse(fields[9]).map_err(|source| ParseError::Title {
            line: line_num,
            source,
        })?;

        // fields[1] is the aligned query sequence; nothing downstream needs it
        hits.push(AlignmentHit {
            query_id: fields[0].to_string(),
            alignment_length: parse_u64(fields[2], "alignment length", line_num)?,
            identical_count: parse_u64(fields[3], "identical count", line_num)?,
            percent_identity: parse_f64(fields[4], "percent identity", line_num)?,
            mismatch_count: parse_u64(fields[5], "mismatch count", line_num)?,
            e_value: parse_f64(fields[6], "e-value", line_num)?,
            bit_score: parse_f64(fields[7], "bit score", line_num)?,
            reference_accession: fields[8].to_string(),
            title,
        });
    }

    Ok(hits)
}

fn parse_u64(value: &str, field: &'static str, line: usize) -> Result<u64, ParseError> {
    value.trim().parse().map_err(|_| ParseError::InvalidNumber {
        line,
        field,
        value: value.to_string(),
    })
}

fn parse_f64(value: &str, field: &'static str, line: usize) -> Result<f64, ParseError> {
    value.trim().parse().map_err(|_| ParseError::InvalidNumber {
        line,
        field,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::segment::Segment;

    fn row(query: &str, pident: &str, title: &str) -> String {
        format!("{query}\tACGT\t2280\t2269\t{pident}\t11\t0.0\t4100.5\tEPI000001\t{title}")
    }

    #[test]
    fn test_parse_single_row() {
        let text = row("seg_1", "99.52", "ea1 A0123456 PB2");
        let hits = parse_blast_text(&text).unwrap();

        assert_eq!(hits.len(), 1);
        let hit = &hits[0];
        assert_eq!(hit.query_id, "seg_1");
        assert_eq!(hit.alignment_length, 2280);
        assert_eq!(hit.identical_count, 2269);
        assert!((hit.percent_identity - 99.52).abs() < f64::EPSILON);
        assert_eq!(hit.mismatch_count, 11);
        assert_eq!(hit.reference_accession, "EPI000001");
        assert_eq!(hit.segment(), Segment::Pb2);
        assert_eq!(hit.title.genotype_label, "ea1");
    }

    #[test]
    fn test_parse_preserves_input_order() {
        let text = [
            row("seg_1", "99.5", "ea1 A0123456 PB2"),
            row("seg_1", "97.0", "ea2 A0999999 PB2"),
            row("seg_2", "98.8", "ea1 A0123456 PB1"),
        ]
        .join("\n");

        let hits = parse_blast_text(&text).unwrap();
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].title.genotype_label, "ea1");
        assert_eq!(hits[1].title.genotype_label, "ea2");
        assert_eq!(hits[2].segment(), Segment::Pb1);
    }

    #[test]
    fn test_parse_skips_blank_lines() {
        let text = format!("\n{}\n\n", row("seg_1", "99.5", "ea1 A0123456 PB2"));
        let hits = parse_blast_text(&text).unwrap();
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_parse_empty_output_is_not_an_error() {
        // Zero hits is a valid (if unfortunate) aligner outcome
        assert!(parse_blast_text("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_short_line_is_fatal() {
        let err = parse_blast_text("seg_1\tACGT\t2280\n").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("expected 10"), "unexpected message: {msg}");
        assert!(msg.contains("seg_1"));
    }

    #[test]
    fn test_parse_malformed_title_is_fatal() {
        // Two tokens instead of three: a typo in the reference database
        let text = row("seg_1", "99.5", "ea1 PB2");
        let err = parse_blast_text(&text).unwrap_err();
        assert!(
            err.to_string().contains("ea1 PB2"),
            "offending title missing from: {err}"
        );
    }

    #[test]
    fn test_parse_bad_number() {
        let text = "seg_1\tACGT\t2280\t2269\tNaN%\t11\t0.0\t4100\tEPI1\tea1 A0123456 PB2";
        let err = parse_blast_text(text).unwrap_err();
        assert!(err.to_string().contains("percent identity"));
    }
}
