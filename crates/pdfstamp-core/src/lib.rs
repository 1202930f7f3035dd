//! Bounded-memory incremental PDF stamping
//!
//! This crate stamps text onto selected pages of a PDF without rewriting
//! the document: the original file's bytes are copied verbatim into the
//! output, then each batch of stamped pages is appended as a self-contained
//! incremental update section. The output stays a valid, loadable PDF after
//! every batch boundary, and peak memory scales with one batch's objects
//! rather than with document size.
//!
//! Pieces:
//! - [`reader`]: pull-based byte-range input ([`RangeReader`])
//! - [`sink`]: append-only output with a verbatim copy phase ([`AppendSink`])
//! - [`page_ranges`]: the page selection spec (`all` / lists / ranges)
//! - [`structure`]: byte-level document access over classic xref tables
//! - [`delta`]: incremental update section serialization
//! - [`stamp`]: the batch orchestration loop and the stamp mutation

pub mod delta;
pub mod error;
pub mod page_ranges;
pub mod reader;
pub mod sink;
pub mod stamp;
pub mod structure;

pub use error::StampError;
pub use page_ranges::parse_page_spec;
pub use reader::{FileRangeReader, RangeReader};
pub use sink::AppendSink;
pub use stamp::{stamp_document, stamp_file, StampOptions, StampReport, DEFAULT_STEP};
pub use structure::{ObjRef, PdfStructure};
