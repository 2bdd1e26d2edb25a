use serde::{Deserialize, Serialize};

/// One gene segment of the influenza genome, plus the auxiliary
/// non-influenza marker sequence carried by the reference database.
///
/// Variant order is the canonical display order, so the derived `Ord`
/// sorts segment calls the way reports list them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Segment {
    #[serde(rename = "PB2")]
    Pb2,
    #[serde(rename = "PB1")]
    Pb1,
    #[serde(rename = "PA")]
    Pa,
    #[serde(rename = "HA")]
    Ha,
    #[serde(rename = "NP")]
    Np,
    #[serde(rename = "NA")]
    Na,
    #[serde(rename = "MP")]
    Mp,
    #[serde(rename = "NS")]
    Ns,
    /// Contamination marker; never part of a genotype fingerprint.
    #[serde(rename = "SARS-CoV-2")]
    Sc2,
}

impl Segment {
    /// The eight influenza segments, in canonical order.
    pub const CANONICAL: [Segment; 8] = [
        Segment::Pb2,
        Segment::Pb1,
        Segment::Pa,
        Segment::Ha,
        Segment::Np,
        Segment::Na,
        Segment::Mp,
        Segment::Ns,
    ];

    /// Canonical segments followed by the contamination marker.
    pub const DISPLAY_ORDER: [Segment; 9] = [
        Segment::Pb2,
        Segment::Pb1,
        Segment::Pa,
        Segment::Ha,
        Segment::Np,
        Segment::Na,
        Segment::Mp,
        Segment::Ns,
        Segment::Sc2,
    ];

    /// Parse a gene name as it appears in reference FASTA headers.
    /// Returns `None` for anything outside the known segment set.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PB2" => Some(Self::Pb2),
            "PB1" => Some(Self::Pb1),
            "PA" => Some(Self::Pa),
            "HA" => Some(Self::Ha),
            "NP" => Some(Self::Np),
            "NA" => Some(Self::Na),
            "MP" => Some(Self::Mp),
            "NS" => Some(Self::Ns),
            "SARS-CoV-2" => Some(Self::Sc2),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pb2 => "PB2",
            Self::Pb1 => "PB1",
            Self::Pa => "PA",
            Self::Ha => "HA",
            Self::Np => "NP",
            Self::Na => "NA",
            Self::Mp => "MP",
            Self::Ns => "NS",
            Self::Sc2 => "SARS-CoV-2",
        }
    }

    /// Whether this segment participates in genotype fingerprints.
    #[must_use]
    pub fn is_canonical(self) -> bool {
        !matches!(self, Self::Sc2)
    }
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trip() {
        for segment in Segment::DISPLAY_ORDER {
            assert_eq!(Segment::parse(segment.as_str()), Some(segment));
        }
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!(Segment::parse("HA1"), None);
        assert_eq!(Segment::parse("ha"), None);
        assert_eq!(Segment::parse(""), None);
    }

    #[test]
    fn test_ord_follows_display_order() {
        let mut segments = vec![Segment::Ns, Segment::Ha, Segment::Pb2, Segment::Sc2];
        segments.sort();
        assert_eq!(
            segments,
            vec![Segment::Pb2, Segment::Ha, Segment::Ns, Segment::Sc2]
        );
    }

    #[test]
    fn test_marker_is_not_canonical() {
        assert!(!Segment::Sc2.is_canonical());
        assert!(Segment::CANONICAL.iter().all(|s| s.is_canonical()));
    }
}
