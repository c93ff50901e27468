//! Section detection over plain page text.
//!
//! Three strategies run independently over every page:
//!
//! - **header**: lines matching one of the [`HeaderRules`] start a section
//!   made of the lines that follow
//! - **paragraph**: blank-line separated chunks of reasonable size
//! - **list**: bulleted or numbered runs
//!
//! Candidates are concatenated in strategy order (all header sections, then
//! all paragraph sections, then all list sections) and handed to the
//! [`SectionScorer`]. Strategies overlap: the same text may be
//! found more than once and the scorer only drops exact title repeats.

mod header;
mod list;
mod paragraph;
mod rules;
mod scorer;

pub use rules::{HeaderRule, HeaderRules};
pub use scorer::SectionScorer;

use header::HeaderStrategy;
use list::ListStrategy;
use paragraph::ParagraphStrategy;

use crate::model::{Page, Section};
use crate::options::DetectorOptions;

/// Runs the detection strategies and scores their output.
#[derive(Debug, Clone)]
pub struct SectionDetector {
    options: DetectorOptions,
    header: HeaderStrategy,
    paragraph: ParagraphStrategy,
    list: ListStrategy,
}

impl SectionDetector {
    /// Create a detector with the built-in header rules.
    pub fn new(options: DetectorOptions) -> Self {
        Self::with_rules(options, HeaderRules::builtin())
    }

    /// Create a detector with a custom header rule list.
    pub fn with_rules(options: DetectorOptions, rules: HeaderRules) -> Self {
        Self {
            options,
            header: HeaderStrategy::new(rules),
            paragraph: ParagraphStrategy::new(),
            list: ListStrategy::new(),
        }
    }

    pub fn options(&self) -> &DetectorOptions {
        &self.options
    }

    pub fn rules(&self) -> &HeaderRules {
        self.header.rules()
    }

    /// Unscored candidates in strategy order.
    pub fn detect_candidates(&self, pages: &[Page]) -> Vec<Section> {
        let texts: Vec<(u32, &str)> = pages.iter().map(|p| (p.number, p.text.trim())).collect();
        let mut candidates = Vec::new();

        for (number, text) in &texts {
            candidates.extend(self.header.detect(*number, text, &self.options));
        }
        for (number, text) in &texts {
            candidates.extend(self.paragraph.detect(*number, text, &self.options));
        }
        for (number, text) in &texts {
            candidates.extend(self.list.detect(*number, text, &self.options));
        }

        candidates
    }

    /// Detect, deduplicate and score the sections of a document.
    pub fn detect(&self, doc_name: &str, pages: &[Page]) -> Vec<Section> {
        let candidates = self.detect_candidates(pages);
        let found = candidates.len();
        let sections = SectionScorer::new(self.options.max_sections).score(doc_name, candidates);
        log::debug!(
            "{}: {} candidate sections, {} kept",
            doc_name,
            found,
            sections.len()
        );
        sections
    }
}

impl Default for SectionDetector {
    fn default() -> Self {
        Self::new(DetectorOptions::default())
    }
}

/// Cut a title to `max_chars` characters, marking the cut with "...".
pub(crate) fn truncate_title(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let mut title: String = text.chars().take(max_chars).collect();
        title.push_str("...");
        title
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DetectionMethod;

    #[test]
    fn test_truncate_title() {
        assert_eq!(truncate_title("short", 50), "short");
        assert_eq!(truncate_title("abcdef", 3), "abc...");
        assert_eq!(truncate_title("ééééé", 4), "éééé...");
    }

    #[test]
    fn test_strategy_order() {
        let pages = vec![
            Page::new(1).with_text("- first item of a fairly long list here\n- second item"),
            Page::new(2).with_text(
                "INTRODUCTION\nThis report covers the year.\nIt has two parts.\n\nThe second paragraph follows here.",
            ),
        ];
        let candidates = SectionDetector::default().detect_candidates(&pages);
        let methods: Vec<_> = candidates.iter().map(|s| s.detection_method).collect();
        let first_paragraph = methods
            .iter()
            .position(|m| *m == DetectionMethod::Paragraph)
            .unwrap();
        let first_list = methods
            .iter()
            .position(|m| *m == DetectionMethod::List)
            .unwrap();
        assert_eq!(methods[0], DetectionMethod::Header);
        assert_eq!(candidates[0].page, 2);
        assert!(first_paragraph < first_list);
    }

    #[test]
    fn test_detect_scores_candidates() {
        let pages = vec![Page::new(1).with_text(
            "INTRODUCTION\nThis report covers the year.\nIt has two parts.\n\nThe second paragraph follows here.",
        )];
        let sections = SectionDetector::default().detect("report.pdf", &pages);
        assert_eq!(sections[0].title, "INTRODUCTION");
        assert_eq!(sections[0].id, "report.pdf_section_1");
        assert!(sections.iter().all(|s| s.confidence > 0.0));
    }

    #[test]
    fn test_blank_pages() {
        let pages = vec![Page::new(1), Page::new(2).with_text("   ")];
        assert!(SectionDetector::default().detect("blank.pdf", &pages).is_empty());
    }
}
