//! The reference table of known genotype fingerprints.
//!
//! One row per named genotype, one column per canonical gene segment. A
//! default table curated alongside the reference FASTAs is compiled into
//! the binary; `--table` points at a replacement TSV.

pub mod table;

pub use table::{GenotypeFingerprint, GenotypeRow, GenotypeTable, TableError};
