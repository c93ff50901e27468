//! Section types produced by section detection and ranking.

use crate::persona::{PersonaSummary, SectionInsight};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Strategy that produced a candidate section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectionMethod {
    Header,
    Paragraph,
    List,
}

impl DetectionMethod {
    /// Confidence contributed by the detection strategy.
    pub fn weight(self) -> f64 {
        match self {
            DetectionMethod::Header => 0.3,
            DetectionMethod::Paragraph => 0.2,
            DetectionMethod::List => 0.1,
        }
    }
}

impl fmt::Display for DetectionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DetectionMethod::Header => "header",
            DetectionMethod::Paragraph => "paragraph",
            DetectionMethod::List => "list",
        };
        f.write_str(name)
    }
}

/// A document section.
///
/// Candidates come out of the detector with an empty id and zero
/// confidence; the scorer fills in id, position, word count and confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    #[serde(rename = "section_id")]
    pub id: String,
    #[serde(rename = "section_title")]
    pub title: String,
    #[serde(rename = "page_number")]
    pub page: u32,
    pub content: String,
    pub detection_method: DetectionMethod,
    #[serde(rename = "confidence_score")]
    pub confidence: f64,
    pub word_count: usize,
    /// Zero-based position among the kept sections of the document
    pub position: usize,
}

impl Section {
    /// Create an unscored candidate section.
    pub fn candidate(
        title: impl Into<String>,
        page: u32,
        content: impl Into<String>,
        detection_method: DetectionMethod,
    ) -> Self {
        Self {
            id: String::new(),
            title: title.into(),
            page,
            content: content.into(),
            detection_method,
            confidence: 0.0,
            word_count: 0,
            position: 0,
        }
    }
}

/// A section with its persona relevance score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedSection {
    #[serde(flatten)]
    pub section: Section,
    pub relevance_score: f64,
}

/// Summary information about an analyzed document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub filename: String,
    pub total_pages: u32,
    pub total_characters: usize,
    pub total_sections: usize,
    pub processing_timestamp: DateTime<Utc>,
}

/// Full section analysis of one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionAnalysis {
    pub metadata: DocumentMetadata,
    pub sections: Vec<Section>,
    pub ranked_sections: Vec<RankedSection>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub insights: Vec<SectionInsight>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persona_analysis: Option<PersonaSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_weights() {
        assert_eq!(DetectionMethod::Header.weight(), 0.3);
        assert_eq!(DetectionMethod::Paragraph.weight(), 0.2);
        assert_eq!(DetectionMethod::List.weight(), 0.1);
    }

    #[test]
    fn test_ranked_section_serialization() {
        let mut section = Section::candidate("Overview", 3, "Some text", DetectionMethod::Header);
        section.id = "doc.pdf_section_1".to_string();
        let ranked = RankedSection {
            section,
            relevance_score: 0.5,
        };
        let value = serde_json::to_value(&ranked).unwrap();
        assert_eq!(value["section_id"], "doc.pdf_section_1");
        assert_eq!(value["section_title"], "Overview");
        assert_eq!(value["page_number"], 3);
        assert_eq!(value["detection_method"], "header");
        assert_eq!(value["relevance_score"], 0.5);
    }
}
