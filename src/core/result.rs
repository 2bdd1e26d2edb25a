use serde::{Deserialize, Serialize};

use crate::core::segment::Segment;

/// Per-segment evidence backing a genotype call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentEvidence {
    /// Gene segment
    pub segment: Segment,

    /// Lineage label of the best hit
    pub genotype_label: String,

    /// Reference sample the best hit came from
    pub reference_sample: String,

    /// Percent identity of the best hit, 0-100
    pub percent_identity: f64,

    /// Mismatch count of the best hit
    pub mismatch_count: u64,

    /// Average depth of coverage, if the run had any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coverage_depth: Option<f64>,

    /// Whether this segment passed the identity threshold
    pub passed: bool,
}

/// Final output record for one sample run.
///
/// Created once by the result assembler and never mutated; a no-match or
/// an incomplete segment set is a valid outcome here, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenotypeResult {
    /// Sample identifier
    pub sample_id: String,

    /// Whether the candidate fingerprint exactly matched a known genotype
    pub matched: bool,

    /// Display label: a known genotype name, or a "Not Assigned: ..." reason
    pub genotype_label: String,

    /// Passing segment calls as "GENE:label", in canonical segment order
    pub segments_used: Vec<String>,

    /// Evidence for every authoritative call, marker segment included
    pub evidence: Vec<SegmentEvidence>,

    /// Number of canonical segments with a passing call, out of 8
    pub completeness_count: usize,

    /// Free-text decoration from the metadata lookup, or a placeholder
    pub metadata: String,
}

impl GenotypeResult {
    /// Whether every canonical segment received a passing call.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completeness_count == Segment::CANONICAL.len()
    }
}
