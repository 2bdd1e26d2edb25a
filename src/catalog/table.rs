use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::segment::Segment;

/// Name of the column holding genotype names in the reference table.
pub const GENOTYPE_COLUMN: &str = "Genotype";

#[derive(Error, Debug)]
pub enum TableError {
    #[error("Failed to read genotype table: {0}")]
    Io(#[from] std::io::Error),

    #[error("Genotype table has no header line")]
    MissingHeader,

    #[error("Genotype table is missing required column '{0}'")]
    MissingColumn(String),

    #[error("Row {line} has {found} fields, expected {expected}: '{raw}'")]
    FieldCount {
        line: usize,
        found: usize,
        expected: usize,
        raw: String,
    },

    #[error("Row {line} has an empty genotype name: '{raw}'")]
    MissingName { line: usize, raw: String },

    #[error("Row {line} ({genotype}) has no label for {segment}: '{raw}'")]
    MissingCell {
        line: usize,
        genotype: String,
        segment: Segment,
        raw: String,
    },

    #[error("Duplicate genotype name '{0}' in table")]
    DuplicateName(String),

    #[error("Genotype table contains no rows")]
    Empty,
}

/// Mapping from canonical gene segments to lineage labels.
///
/// A reference fingerprint always carries all eight segments; a candidate
/// built from a sample may carry fewer, in which case it can never equal a
/// reference fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GenotypeFingerprint(BTreeMap<Segment, String>);

impl GenotypeFingerprint {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the lineage label for a canonical segment.
    pub fn insert(&mut self, segment: Segment, label: impl Into<String>) {
        debug_assert!(segment.is_canonical(), "marker segment in fingerprint");
        self.0.insert(segment, label.into());
    }

    #[must_use]
    pub fn get(&self, segment: Segment) -> Option<&str> {
        self.0.get(&segment).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether all eight canonical segments are present.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.0.len() == Segment::CANONICAL.len()
    }

    /// Iterate entries in canonical segment order.
    pub fn iter(&self) -> impl Iterator<Item = (Segment, &str)> {
        self.0.iter().map(|(s, l)| (*s, l.as_str()))
    }
}

/// One named row of the reference table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenotypeRow {
    pub name: String,
    pub fingerprint: GenotypeFingerprint,
}

/// The table of known genotype fingerprints.
#[derive(Debug, Clone)]
pub struct GenotypeTable {
    /// Rows in file order; exact-match lookup walks them in this order
    pub rows: Vec<GenotypeRow>,

    name_to_index: HashMap<String, usize>,
}

impl GenotypeTable {
    /// Load the default table compiled into the binary.
    ///
    /// # Errors
    ///
    /// Returns `TableError` if the embedded table is malformed, which would
    /// indicate a broken build rather than a user problem.
    pub fn load_embedded() -> Result<Self, TableError> {
        const EMBEDDED_TABLE: &str = include_str!("../../data/genotype_key.tsv");
        Self::from_tsv_text(EMBEDDED_TABLE)
    }

    /// Load a table from a TSV file.
    ///
    /// # Errors
    ///
    /// Returns `TableError::Io` if the file cannot be read, or a validation
    /// error naming the offending row.
    pub fn load_from_file(path: &Path) -> Result<Self, TableError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_tsv_text(&content)
    }

    /// Parse and validate table text.
    ///
    /// Every row must name a genotype and supply a non-empty label for each
    /// of the eight canonical segments; anything less is a fatal
    /// configuration error reported with the raw row content.
    ///
    /// # Errors
    ///
    /// Returns a `TableError` describing the first violation found.
    pub fn from_tsv_text(text: &str) -> Result<Self, TableError> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim_end()))
            .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'));

        let (_, header) = lines.next().ok_or(TableError::MissingHeader)?;
        let columns: Vec<&str> = header.split('\t').map(str::trim).collect();

        let column_index = |name: &str| -> Result<usize, TableError> {
            columns
                .iter()
                .position(|c| *c == name)
                .ok_or_else(|| TableError::MissingColumn(name.to_string()))
        };

        let name_idx = column_index(GENOTYPE_COLUMN)?;
        let mut segment_indices = Vec::with_capacity(Segment::CANONICAL.len());
        for segment in Segment::CANONICAL {
            segment_indices.push((segment, column_index(segment.as_str())?));
        }

        let mut rows = Vec::new();
        let mut name_to_index = HashMap::new();

        for (line_num, line) in lines {
            let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
            if fields.len() < columns.len() {
                return Err(TableError::FieldCount {
                    line: line_num,
                    found: fields.len(),
                    expected: columns.len(),
                    raw: line.to_string(),
                });
            }

            let name = fields[name_idx];
            if name.is_empty() {
                return Err(TableError::MissingName {
                    line: line_num,
                    raw: line.to_string(),
                });
            }

            let mut fingerprint = GenotypeFingerprint::new();
            for &(segment, idx) in &segment_indices {
                let label = fields[idx];
                if label.is_empty() {
                    return Err(TableError::MissingCell {
                        line: line_num,
                        genotype: name.to_string(),
                        segment,
                        raw: line.to_string(),
                    });
                }
                fingerprint.insert(segment, label);
            }

            if name_to_index
                .insert(name.to_string(), rows.len())
                .is_some()
            {
                return Err(TableError::DuplicateName(name.to_string()));
            }
            rows.push(GenotypeRow {
                name: name.to_string(),
                fingerprint,
            });
        }

        if rows.is_empty() {
            return Err(TableError::Empty);
        }

        Ok(Self {
            rows,
            name_to_index,
        })
    }

    /// Get a row by genotype name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&GenotypeRow> {
        self.name_to_index.get(name).map(|&idx| &self.rows[idx])
    }

    /// Number of genotypes in the table
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
