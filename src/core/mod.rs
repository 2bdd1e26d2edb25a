//! Core data types for segments, alignment hits, calls, and results.
//!
//! Everything here is a plain in-memory value: the core pipeline performs
//! no I/O and no stage mutates shared state, so these types can be unit
//! tested without any file or process access.

pub mod call;
pub mod hit;
pub mod result;
pub mod segment;

pub use call::SegmentCall;
pub use hit::{AlignmentHit, ReferenceTitle, TitleError};
pub use result::{GenotypeResult, SegmentEvidence};
pub use segment::Segment;
