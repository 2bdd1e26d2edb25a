use serde::{Deserialize, Serialize};

use crate::core::hit::AlignmentHit;
use crate::core::segment::Segment;

/// The resolved, authoritative identification for one gene segment.
///
/// Created once per run by the classifier and immutable thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentCall {
    /// Gene segment this call identifies
    pub segment: Segment,

    /// The highest-ranked alignment for the segment's query sequence
    pub best_hit: AlignmentHit,

    /// Whether the hit's percent identity reached the configured threshold
    pub passes_threshold: bool,

    /// Average depth of coverage, when the upstream assembler reported one.
    /// Runs on a bare FASTA have no coverage information.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coverage_depth: Option<f64>,
}

impl SegmentCall {
    #[must_use]
    pub fn new(best_hit: AlignmentHit, passes_threshold: bool) -> Self {
        Self {
            segment: best_hit.segment(),
            best_hit,
            passes_threshold,
            coverage_depth: None,
        }
    }

    #[must_use]
    pub fn with_coverage(mut self, depth: f64) -> Self {
        self.coverage_depth = Some(depth);
        self
    }

    /// Lineage label the reference database assigns this segment.
    #[must_use]
    pub fn genotype_label(&self) -> &str {
        &self.best_hit.title.genotype_label
    }
}
