use crate::core::result::{GenotypeResult, SegmentEvidence};
use crate::core::segment::Segment;
use crate::matching::classifier::SegmentCalls;
use crate::matching::engine::MatchVerdict;

/// Label when all eight segments were called but no fingerprint matched:
/// points the analyst at reference-table drift.
pub const NOT_ASSIGNED_NO_MATCH: &str = "Not Assigned: No Matching Genotypes";

/// Compose the classifier's evidence and the matcher's verdict into the
/// final result record.
///
/// When no exact match exists, the display label distinguishes the two
/// root causes: a complete-but-unknown fingerprint (suspect database
/// drift) versus missing segments (suspect assembly or sequencing
/// quality).
#[must_use]
pub fn assemble(
    sample_id: &str,
    calls: &SegmentCalls,
    verdict: &MatchVerdict,
    metadata: String,
) -> GenotypeResult {
    let segments_used: Vec<String> = calls
        .iter()
        .filter(|(segment, call)| segment.is_canonical() && call.passes_threshold)
        .map(|(segment, call)| format!("{segment}:{}", call.genotype_label()))
        .collect();
    let completeness_count = segments_used.len();

    let genotype_label = if verdict.matched {
        verdict.genotype_label.clone()
    } else if completeness_count == Segment::CANONICAL.len() {
        NOT_ASSIGNED_NO_MATCH.to_string()
    } else {
        format!("Not Assigned: Only {completeness_count} Segments Found")
    };

    let evidence: Vec<SegmentEvidence> = calls
        .values()
        .map(|call| SegmentEvidence {
            segment: call.segment,
            genotype_label: call.genotype_label().to_string(),
            reference_sample: call.best_hit.title.sample_id.clone(),
            percent_identity: call.best_hit.percent_identity,
            mismatch_count: call.best_hit.mismatch_count,
            coverage_depth: call.coverage_depth,
            passed: call.passes_threshold,
        })
        .collect();

    GenotypeResult {
        sample_id: sample_id.to_string(),
        matched: verdict.matched,
        genotype_label,
        segments_used,
        evidence,
        completeness_count,
        metadata,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::call::SegmentCall;
    use crate::core::hit::{AlignmentHit, ReferenceTitle};
    use crate::matching::engine::NO_MATCH_LABEL;
    use crate::metadata::NO_METADATA;

    fn call(title: &str, pident: f64, passes: bool) -> SegmentCall {
        SegmentCall::new(
            AlignmentHit {
                query_id: format!("q_{title}"),
                alignment_length: 2280,
                identical_count: 2269,
                percent_identity: pident,
                mismatch_count: 11,
                e_value: 0.0,
                bit_score: 4100.0,
                reference_accession: "EPI000001".to_string(),
                title: ReferenceTitle::parse(title).unwrap(),
            },
            passes,
        )
    }

    fn passing_calls(n: usize) -> SegmentCalls {
        let mut calls = SegmentCalls::new();
        for segment in Segment::CANONICAL.into_iter().take(n) {
            calls.insert(
                segment,
                call(&format!("ea1 A0123456 {segment}"), 99.5, true),
            );
        }
        calls
    }

    fn no_match() -> MatchVerdict {
        MatchVerdict {
            matched: false,
            genotype_label: NO_MATCH_LABEL.to_string(),
        }
    }

    #[test]
    fn test_matched_result_uses_table_label() {
        let calls = passing_calls(8);
        let verdict = MatchVerdict {
            matched: true,
            genotype_label: "B3.13".to_string(),
        };

        let result = assemble("sample1", &calls, &verdict, NO_METADATA.to_string());
        assert!(result.matched);
        assert_eq!(result.genotype_label, "B3.13");
        assert_eq!(result.segments_used.len(), 8);
        assert_eq!(result.completeness_count, 8);
        assert!(result.is_complete());
        assert_eq!(result.segments_used[0], "PB2:ea1");
    }

    #[test]
    fn test_complete_but_unknown_fingerprint() {
        let result = assemble("sample1", &passing_calls(8), &no_match(), NO_METADATA.to_string());
        assert!(!result.matched);
        assert_eq!(result.genotype_label, NOT_ASSIGNED_NO_MATCH);
    }

    #[test]
    fn test_incomplete_segments_labelled_with_count() {
        let result = assemble("sample1", &passing_calls(7), &no_match(), NO_METADATA.to_string());
        assert!(!result.matched);
        assert_eq!(result.genotype_label, "Not Assigned: Only 7 Segments Found");
        assert_eq!(result.completeness_count, 7);
    }

    #[test]
    fn test_failing_call_kept_as_evidence_but_not_used() {
        let mut calls = passing_calls(7);
        calls.insert(Segment::Ns, call("ea1 A0123456 NS", 92.0, false));

        let result = assemble("sample1", &calls, &no_match(), NO_METADATA.to_string());
        assert_eq!(result.completeness_count, 7);
        assert_eq!(result.evidence.len(), 8);
        let ns = result
            .evidence
            .iter()
            .find(|e| e.segment == Segment::Ns)
            .unwrap();
        assert!(!ns.passed);
    }

    #[test]
    fn test_marker_segment_excluded_from_completeness() {
        let mut calls = passing_calls(8);
        calls.insert(
            Segment::Sc2,
            call("marker MN908947 SARS-CoV-2", 99.9, true),
        );

        let result = assemble("sample1", &calls, &no_match(), NO_METADATA.to_string());
        assert_eq!(result.completeness_count, 8);
        assert_eq!(result.segments_used.len(), 8);
        // Marker still shows up in the evidence list
        assert_eq!(result.evidence.len(), 9);
    }

    #[test]
    fn test_coverage_carried_into_evidence() {
        let mut calls = SegmentCalls::new();
        calls.insert(
            Segment::Pb2,
            call("ea1 A0123456 PB2", 99.5, true).with_coverage(182.3),
        );

        let result = assemble("sample1", &calls, &no_match(), NO_METADATA.to_string());
        assert_eq!(result.evidence[0].coverage_depth, Some(182.3));
    }

    #[test]
    fn test_no_calls_at_all() {
        let result = assemble(
            "sample1",
            &SegmentCalls::new(),
            &no_match(),
            NO_METADATA.to_string(),
        );
        assert_eq!(result.genotype_label, "Not Assigned: Only 0 Segments Found");
        assert!(result.evidence.is_empty());
    }
}
