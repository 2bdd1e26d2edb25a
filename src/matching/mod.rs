//! Genotype resolution: authoritative-hit selection, exact fingerprint
//! matching, and final result assembly.
//!
//! The pipeline is Parser -> Classifier -> Matcher -> Assembler, each stage
//! a pure transformation over the previous stage's output. Running it twice
//! on the same aligner output and reference table yields identical results.

pub mod assembler;
pub mod classifier;
pub mod engine;

pub use assembler::{assemble, NOT_ASSIGNED_NO_MATCH};
pub use classifier::{classify_hits, SegmentCalls, DEFAULT_MIN_IDENTITY};
pub use engine::{candidate_fingerprint, find_match, MatchVerdict, NO_MATCH_LABEL};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::table::GenotypeTable;
    use crate::metadata::NO_METADATA;
    use crate::parsing::blast::parse_blast_text;

    const HEADER: &str = "Genotype\tPB2\tPB1\tPA\tHA\tNP\tNA\tMP\tNS";

    fn blast_row(query: &str, pident: f64, title: &str) -> String {
        format!("{query}\tACGT\t2280\t2269\t{pident}\t11\t0.0\t4100\tEPI000001\t{title}")
    }

    fn b3_13_rows() -> Vec<String> {
        let labels = [
            ("PB2", "am2.2"),
            ("PB1", "ea1"),
            ("PA", "am1"),
            ("HA", "ea1"),
            ("NP", "am8"),
            ("NA", "ea1"),
            ("MP", "ea1"),
            ("NS", "am1.1"),
        ];
        labels
            .iter()
            .enumerate()
            .map(|(i, (gene, label))| {
                blast_row(
                    &format!("seg_{}", i + 1),
                    99.5,
                    &format!("{label} A0123456 {gene}"),
                )
            })
            .collect()
    }

    fn run_pipeline(blast_text: &str, table: &GenotypeTable) -> crate::core::GenotypeResult {
        let hits = parse_blast_text(blast_text).unwrap();
        let calls = classify_hits(&hits, DEFAULT_MIN_IDENTITY);
        let candidate = candidate_fingerprint(&calls);
        let verdict = find_match(table, &candidate);
        assemble("sample1", &calls, &verdict, NO_METADATA.to_string())
    }

    #[test]
    fn test_full_pipeline_assigns_b3_13() {
        let table = GenotypeTable::from_tsv_text(&format!(
            "{HEADER}\nB3.13\tam2.2\tea1\tam1\tea1\tam8\tea1\tea1\tam1.1\n"
        ))
        .unwrap();
        let text = b3_13_rows().join("\n");

        let result = run_pipeline(&text, &table);
        assert!(result.matched);
        assert_eq!(result.genotype_label, "B3.13");
        assert_eq!(result.segments_used.len(), 8);
    }

    #[test]
    fn test_pipeline_is_idempotent() {
        let table = GenotypeTable::load_embedded().unwrap();
        let text = b3_13_rows().join("\n");

        let first = run_pipeline(&text, &table);
        let second = run_pipeline(&text, &table);

        assert_eq!(first, second);
        // Byte-identical once serialized, too
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_pipeline_incomplete_sample() {
        let table = GenotypeTable::load_embedded().unwrap();
        let text = b3_13_rows()[..7].join("\n");

        let result = run_pipeline(&text, &table);
        assert!(!result.matched);
        assert_eq!(result.genotype_label, "Not Assigned: Only 7 Segments Found");
    }

    #[test]
    fn test_pipeline_unknown_fingerprint() {
        // All eight segments pass but the combination is absent from the key
        let table = GenotypeTable::from_tsv_text(&format!(
            "{HEADER}\nA1\tea1\tea1\tea1\tea1\tea1\tea1\tea1\tea1\n"
        ))
        .unwrap();
        let text = b3_13_rows().join("\n");

        let result = run_pipeline(&text, &table);
        assert!(!result.matched);
        assert_eq!(result.genotype_label, NOT_ASSIGNED_NO_MATCH);
    }
}
