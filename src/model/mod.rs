//! Document model types.
//!
//! These types bridge the document sources and the two analysis pipelines:
//! spans and pages go in, outlines and ranked sections come out.

mod document;
mod outline;
mod section;
mod span;

pub use document::{Document, Page};
pub use outline::{HeadingLevel, Label, OutlineEntry, OutlineResult, EMPTY_DOCUMENT_TITLE};
pub use section::{
    DetectionMethod, DocumentMetadata, RankedSection, Section, SectionAnalysis,
};
pub use span::{round_points, Line, Span, BOLD_FLAG};
