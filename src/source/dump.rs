//! JSON span dumps.
//!
//! A span dump is the block/line/span tree an external extractor writes for
//! each page. Coordinates are top-down; bit 4 of `flags` marks bold text.
//! Missing fields take their defaults, and non-text blocks (any `type` other
//! than 0) are ignored.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::layout::{lines_to_text, reconstruct_lines};
use crate::model::{Document, Page, Span};

/// Block type of text blocks.
const TEXT_BLOCK: u32 = 0;

/// A whole-document span dump.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpanDump {
    #[serde(default)]
    pub pages: Vec<DumpPage>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DumpPage {
    #[serde(default)]
    pub blocks: Vec<DumpBlock>,
    /// Plain page text; rebuilt from the spans when absent
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DumpBlock {
    #[serde(default, rename = "type")]
    pub kind: u32,
    #[serde(default)]
    pub lines: Vec<DumpLine>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DumpLine {
    #[serde(default)]
    pub spans: Vec<DumpSpan>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DumpSpan {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub size: f32,
    #[serde(default)]
    pub flags: u32,
    #[serde(default)]
    pub bbox: [f32; 4],
}

impl SpanDump {
    /// Read a span dump file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_slice(&data)
    }

    pub fn from_slice(data: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(data)?)
    }

    /// Build a document; pages are numbered from 1 in dump order.
    pub fn into_document(self, name: impl Into<String>) -> Document {
        let pages = self
            .pages
            .into_iter()
            .enumerate()
            .map(|(i, page)| page.into_page(i as u32 + 1))
            .collect();
        Document::new(name, pages)
    }
}

impl DumpPage {
    /// Text spans of the page in block, line, span order.
    pub fn spans(&self) -> Vec<Span> {
        self.blocks
            .iter()
            .filter(|block| block.kind == TEXT_BLOCK)
            .flat_map(|block| block.lines.iter())
            .flat_map(|line| line.spans.iter())
            .map(|span| Span::with_flags(span.text.clone(), span.size, span.flags, span.bbox))
            .collect()
    }

    fn into_page(self, number: u32) -> Page {
        let spans = self.spans();
        let text = match self.text {
            Some(text) if !text.trim().is_empty() => text,
            _ => lines_to_text(&reconstruct_lines(&spans, number)),
        };
        Page::new(number).with_spans(spans).with_text(text)
    }
}
