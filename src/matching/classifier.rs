use std::collections::{BTreeMap, HashSet};

use tracing::warn;

use crate::core::call::SegmentCall;
use crate::core::hit::AlignmentHit;
use crate::core::segment::Segment;

/// Default identity threshold for trusting a segment call, in percent.
pub const DEFAULT_MIN_IDENTITY: f64 = 98.0;

/// Authoritative calls keyed by segment; iteration follows canonical order.
pub type SegmentCalls = BTreeMap<Segment, SegmentCall>;

/// Resolve raw alignment hits into one authoritative call per segment.
///
/// Hits must be consumed in the order the aligner emitted them: BLAST sorts
/// hits by descending bit score within each query, so the first row seen
/// for a query id is its best identification. Preserving input order is a
/// correctness requirement, not an optimization.
///
/// When two distinct queries resolve to the same segment (a duplicated or
/// split assembly), the later query replaces the earlier one:
/// last-write-wins by input order. The replacement is logged since it
/// usually signals an assembly worth a second look.
pub fn classify_hits(hits: &[AlignmentHit], min_identity: f64) -> SegmentCalls {
    let mut seen_queries: HashSet<&str> = HashSet::new();
    let mut calls = SegmentCalls::new();

    for hit in hits {
        if !seen_queries.insert(hit.query_id.as_str()) {
            // Lower-ranked fragment of an already-identified query
            continue;
        }

        let segment = hit.segment();
        if let Some(previous) = calls.get(&segment) {
            warn!(
                "{} called by both '{}' and '{}'; keeping the later query",
                segment, previous.best_hit.query_id, hit.query_id
            );
        }

        let passes = hit.percent_identity >= min_identity;
        calls.insert(segment, SegmentCall::new(hit.clone(), passes));
    }

    calls
}
