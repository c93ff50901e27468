//! Structural labels and outline types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Title used when a document has no pages.
pub const EMPTY_DOCUMENT_TITLE: &str = "Empty Document";

/// Structural label assigned to a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    Title,
    H1,
    H2,
    H3,
    H4,
    Body,
}

impl Label {
    /// All labels in declaration order.
    pub const ALL: [Label; 6] = [
        Label::Title,
        Label::H1,
        Label::H2,
        Label::H3,
        Label::H4,
        Label::Body,
    ];

    /// Heading level for outline labels, `None` for Title and Body.
    pub fn heading_level(self) -> Option<HeadingLevel> {
        match self {
            Label::H1 => Some(HeadingLevel::H1),
            Label::H2 => Some(HeadingLevel::H2),
            Label::H3 => Some(HeadingLevel::H3),
            Label::H4 => Some(HeadingLevel::H4),
            Label::Title | Label::Body => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Label::Title => "Title",
            Label::H1 => "H1",
            Label::H2 => "H2",
            Label::H3 => "H3",
            Label::H4 => "H4",
            Label::Body => "Body",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Label {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Label::ALL
            .iter()
            .copied()
            .find(|label| label.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown label '{}'", s))
    }
}

/// Outline heading level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
    H4,
}

impl HeadingLevel {
    /// Numeric depth (1-4).
    pub fn depth(self) -> u8 {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
            HeadingLevel::H4 => 4,
        }
    }
}

/// One heading in a document outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineEntry {
    pub level: HeadingLevel,
    pub text: String,
    /// Page number (1-indexed)
    pub page: u32,
}

/// Title and ordered headings of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineResult {
    pub title: String,
    pub outline: Vec<OutlineEntry>,
}

impl OutlineResult {
    /// The result for a document without pages.
    pub fn empty() -> Self {
        Self {
            title: EMPTY_DOCUMENT_TITLE.to_string(),
            outline: Vec::new(),
        }
    }
}
