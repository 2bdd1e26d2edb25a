//! # flu-genotyper
//!
//! A library for genotyping assembled influenza genomes.
//!
//! An influenza genome carries eight gene segments, and reassortment mixes
//! segments from different lineages into new combinations. A "genotype" is
//! a named combination: one lineage label per segment. This crate BLASTs
//! each assembled segment against a curated reference database, keeps the
//! best hit per segment, and matches the resulting fingerprint exactly
//! against a table of known genotypes.
//!
//! A segment call is only trusted when its percent identity reaches a
//! threshold (98% by default). Samples with fewer than eight trusted
//! segments, or with a fingerprint absent from the table, are reported as
//! labelled "Not Assigned" outcomes rather than errors, so an analyst can
//! tell assembly problems apart from reference-table drift.
//!
//! ## Example
//!
//! ```rust
//! use flu_genotyper::catalog::table::GenotypeTable;
//! use flu_genotyper::matching::{self, DEFAULT_MIN_IDENTITY};
//! use flu_genotyper::parsing::blast::parse_blast_text;
//!
//! let table = GenotypeTable::load_embedded().unwrap();
//!
//! // One line of tabular BLAST output (10 fixed columns)
//! let blast = "seg_1\tACGT\t2280\t2269\t99.52\t11\t0.0\t4100\tEPI000001\tam2.2 A0123456 PB2";
//! let hits = parse_blast_text(blast).unwrap();
//!
//! let calls = matching::classify_hits(&hits, DEFAULT_MIN_IDENTITY);
//! let candidate = matching::candidate_fingerprint(&calls);
//! let verdict = matching::find_match(&table, &candidate);
//!
//! // One passing segment out of eight: a labelled incomplete outcome
//! let result = matching::assemble("sample1", &calls, &verdict, "No Metadata".into());
//! assert_eq!(result.genotype_label, "Not Assigned: Only 1 Segments Found");
//! ```
//!
//! ## Modules
//!
//! - [`core`]: data types for segments, hits, calls, and results
//! - [`parsing`]: BLAST tabular output and sample FASTA parsers
//! - [`catalog`]: the reference table of known genotype fingerprints
//! - [`matching`]: classifier, exact matcher, and result assembler
//! - [`aligner`]: makeblastdb/blastn subprocess collaborator
//! - [`metadata`]: optional sample-metadata decoration
//! - [`report`]: report row rendering and TSV writer
//! - [`cli`]: command-line interface implementation

pub mod aligner;
pub mod catalog;
pub mod cli;
pub mod core;
pub mod matching;
pub mod metadata;
pub mod parsing;
pub mod report;

// Re-export commonly used types for convenience
pub use crate::catalog::table::{GenotypeFingerprint, GenotypeTable};
pub use crate::core::call::SegmentCall;
pub use crate::core::hit::{AlignmentHit, ReferenceTitle};
pub use crate::core::result::GenotypeResult;
pub use crate::core::segment::Segment;
pub use crate::matching::engine::MatchVerdict;
