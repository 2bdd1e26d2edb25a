use serde::{Deserialize, Serialize};

use crate::catalog::table::{GenotypeFingerprint, GenotypeTable};
use crate::matching::classifier::SegmentCalls;

/// Label reported when no reference fingerprint matches.
pub const NO_MATCH_LABEL: &str = "No Match";

/// Outcome of matching a candidate fingerprint against the table.
///
/// A no-match is a valid biological outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchVerdict {
    pub matched: bool,
    pub genotype_label: String,
}

/// Build the candidate fingerprint from a sample's calls: canonical
/// segments with a passing identification only.
#[must_use]
pub fn candidate_fingerprint(calls: &SegmentCalls) -> GenotypeFingerprint {
    let mut fingerprint = GenotypeFingerprint::new();
    for (segment, call) in calls {
        if segment.is_canonical() && call.passes_threshold {
            fingerprint.insert(*segment, call.genotype_label());
        }
    }
    fingerprint
}

/// Compare the candidate against every reference row for exact equality:
/// identical segment sets and identical labels for every segment.
///
/// Partial overlap is never a match. A candidate missing even one canonical
/// segment cannot equal any reference row, since reference rows always
/// carry all eight. Rows are walked in load order and the first equal row
/// wins, which makes duplicate fingerprints harmless.
#[must_use]
pub fn find_match(table: &GenotypeTable, candidate: &GenotypeFingerprint) -> MatchVerdict {
    for row in &table.rows {
        if row.fingerprint == *candidate {
            return MatchVerdict {
                matched: true,
                genotype_label: row.name.clone(),
            };
        }
    }

    MatchVerdict {
        matched: false,
        genotype_label: NO_MATCH_LABEL.to_string(),
    }
}
