use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::segment::Segment;

#[derive(Error, Debug)]
pub enum TitleError {
    #[error(
        "Reference title '{raw}' does not split into genotype, sample, and gene ({found} tokens)"
    )]
    WrongShape { raw: String, found: usize },

    #[error("Reference title '{raw}' names unknown gene segment '{gene}'")]
    UnknownSegment { raw: String, gene: String },
}

/// Structured form of a reference FASTA header.
///
/// Every entry in the curated database is titled
/// `<genotype-label> <sample-id> <gene-name>`; anything else indicates the
/// database was edited incorrectly and is rejected at ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceTitle {
    /// Lineage label for this segment (e.g. `ea1`, `am2.2`)
    pub genotype_label: String,

    /// Identifier of the reference sample the sequence came from
    pub sample_id: String,

    /// Gene segment named by the last token
    pub segment: Segment,
}

impl ReferenceTitle {
    /// Decompose a raw subject title into its three fields.
    ///
    /// # Errors
    ///
    /// Returns `TitleError::WrongShape` if the title does not split into
    /// exactly three whitespace-separated tokens, or
    /// `TitleError::UnknownSegment` if the gene token is not a known segment.
    pub fn parse(raw: &str) -> Result<Self, TitleError> {
        let tokens: Vec<&str> = raw.split_whitespace().collect();
        if tokens.len() != 3 {
            return Err(TitleError::WrongShape {
                raw: raw.to_string(),
                found: tokens.len(),
            });
        }

        let segment = Segment::parse(tokens[2]).ok_or_else(|| TitleError::UnknownSegment {
            raw: raw.to_string(),
            gene: tokens[2].to_string(),
        })?;

        Ok(Self {
            genotype_label: tokens[0].to_string(),
            sample_id: tokens[1].to_string(),
            segment,
        })
    }
}

impl std::fmt::Display for ReferenceTitle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.genotype_label, self.sample_id, self.segment
        )
    }
}

/// One row of tabular BLAST output for a query sequence.
///
/// The aligner may emit several rows for one query when the assembly is
/// chimeric or low quality; rows are kept in emission order and the
/// authoritative one is selected later by the classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentHit {
    /// Query sequence name from the assembled FASTA
    pub query_id: String,

    /// Length of the alignment
    pub alignment_length: u64,

    /// Number of identical bases
    pub identical_count: u64,

    /// Percent identity, 0-100
    pub percent_identity: f64,

    /// Number of mismatched bases
    pub mismatch_count: u64,

    /// Expect value
    pub e_value: f64,

    /// Bit score; the aligner orders rows by this, descending, per query
    pub bit_score: f64,

    /// Subject accession
    pub reference_accession: String,

    /// Structured subject title
    pub title: ReferenceTitle,
}

impl AlignmentHit {
    /// Gene segment this hit identifies, taken from the reference title.
    #[must_use]
    pub fn segment(&self) -> Segment {
        self.title.segment
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_title() {
        let title = ReferenceTitle::parse("ea1 A0123456 PB2").unwrap();
        assert_eq!(title.genotype_label, "ea1");
        assert_eq!(title.sample_id, "A0123456");
        assert_eq!(title.segment, Segment::Pb2);
    }

    #[test]
    fn test_parse_title_two_tokens() {
        let err = ReferenceTitle::parse("ea1 PB2").unwrap_err();
        match &err {
            TitleError::WrongShape { raw, found } => {
                assert_eq!(raw, "ea1 PB2");
                assert_eq!(*found, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
        // The offending title must be visible to the operator
        assert!(err.to_string().contains("ea1 PB2"));
    }

    #[test]
    fn test_parse_title_four_tokens() {
        assert!(ReferenceTitle::parse("ea1 A0123456 PB2 extra").is_err());
    }

    #[test]
    fn test_parse_title_unknown_gene() {
        let err = ReferenceTitle::parse("ea1 A0123456 HA1").unwrap_err();
        assert!(matches!(err, TitleError::UnknownSegment { .. }));
        assert!(err.to_string().contains("HA1"));
    }

    #[test]
    fn test_parse_title_marker_segment() {
        let title = ReferenceTitle::parse("marker MN908947 SARS-CoV-2").unwrap();
        assert_eq!(title.segment, Segment::Sc2);
    }
}
