//! Document-level types.

use super::Span;
use crate::layout::FontStatistics;
use serde::{Deserialize, Serialize};

/// One page as delivered by a document source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-indexed)
    pub number: u32,

    /// Typographic spans in content-stream order
    pub spans: Vec<Span>,

    /// Plain extracted text of the page
    pub text: String,
}

impl Page {
    /// Create an empty page.
    pub fn new(number: u32) -> Self {
        Self {
            number,
            ..Default::default()
        }
    }

    /// Set the page spans.
    pub fn with_spans(mut self, spans: Vec<Span>) -> Self {
        self.spans = spans;
        self
    }

    /// Set the plain page text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Check if the page has neither spans nor text.
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty() && self.text.trim().is_empty()
    }
}

/// A loaded document ready for analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Document name (usually the file name)
    pub name: String,

    /// Pages in reading order
    pub pages: Vec<Page>,

    /// Most common rounded font size across the document
    pub body_size: i32,
}

impl Document {
    /// Create a document and compute its body size.
    pub fn new(name: impl Into<String>, pages: Vec<Page>) -> Self {
        let stats = FontStatistics::from_spans(pages.iter().flat_map(|p| p.spans.iter()));
        let name = name.into();
        log::debug!("{}: body size {}pt", name, stats.body_size);
        Self {
            name,
            pages,
            body_size: stats.body_size,
        }
    }

    /// Get the number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Check if the document has any pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Total number of characters of plain text.
    pub fn char_count(&self) -> usize {
        self.pages.iter().map(|p| p.text.chars().count()).sum()
    }
}
