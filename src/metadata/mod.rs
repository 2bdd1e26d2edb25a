//! Optional sample-metadata decoration.
//!
//! When a lookup file is supplied and holds the sample, the result is
//! decorated with an `A/{species}/{state}/{sample}/{year}` string. Every
//! failure mode degrades to the literal `"No Metadata"` placeholder; a
//! missing collaborator must never fail a run.

use std::path::Path;

use tracing::debug;

/// Placeholder when no decoration is available.
pub const NO_METADATA: &str = "No Metadata";

/// Look up the decoration string for a sample, falling back to the
/// placeholder when the lookup file is absent, unreadable, or does not
/// know the sample.
///
/// The lookup file is a TSV with columns `sample`, `species`, `state`, and
/// `collection_year` (header names case-insensitive). A `-submissionfile`
/// suffix on the sample name is stripped before lookup.
pub fn decoration(lookup: Option<&Path>, sample_name: &str) -> String {
    let root = sample_name
        .strip_suffix("-submissionfile")
        .unwrap_or(sample_name);

    let Some(path) = lookup else {
        return NO_METADATA.to_string();
    };

    match lookup_decoration(path, root) {
        Some(decoration) => decoration,
        None => {
            debug!("No usable metadata for '{root}' in {}", path.display());
            NO_METADATA.to_string()
        }
    }
}

fn lookup_decoration(path: &Path, root: &str) -> Option<String> {
    let text = std::fs::read_to_string(path).ok()?;
    let mut lines = text.lines();

    let header: Vec<&str> = lines.next()?.split('\t').map(str::trim).collect();
    let column = |name: &str| header.iter().position(|h| h.eq_ignore_ascii_case(name));
    let sample_idx = column("sample")?;
    let species_idx = column("species")?;
    let state_idx = column("state")?;
    let year_idx = column("collection_year")?;

    for line in lines {
        let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
        if fields.get(sample_idx).copied() != Some(root) {
            continue;
        }

        let species = fields.get(species_idx).filter(|s| !s.is_empty())?;
        let state = fields.get(state_idx).filter(|s| !s.is_empty())?;
        // An unparsable collection year degrades to "n/a" rather than
        // discarding the rest of the decoration
        let year = fields
            .get(year_idx)
            .and_then(|y| y.parse::<i32>().ok())
            .map_or_else(|| "n/a".to_string(), |y| y.to_string());

        return Some(format!("A/{species}/{state}/{root}/{year}"));
    }

    None
}
