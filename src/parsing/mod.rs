//! Parsers for the aligner's tabular output and the sample FASTA.
//!
//! - **BLAST outfmt-6 tables**: fixed 10-column schema, one line per
//!   alignment, kept in emission order
//! - **FASTA files**: sample inspection only; gzip supported
//!
//! Schema violations are fatal here: a short row or an unparsable subject
//! title means the reference database is corrupt or incompatible, so the
//! offending raw content is carried in the error instead of being skipped.

pub mod blast;
pub mod fasta;

pub use blast::ParseError;
