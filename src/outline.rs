//! Outline assembly: title detection plus per-page heading classification.

use std::sync::Arc;

use crate::classify::HeadingClassifier;
use crate::layout::{features, reconstruct_lines, FeatureVector};
use crate::model::{Document, Line, OutlineEntry, OutlineResult};

/// Title used when the first page has no text lines.
pub const UNTITLED_DOCUMENT: &str = "Untitled Document";

/// Lines within this many points of the largest size are part of the title.
const TITLE_SIZE_TOLERANCE: f32 = 1.0;

/// Detect the document title from the lines of the first page.
///
/// The title is every line set within one point of the largest font size on
/// the page, joined in baseline order.
pub fn find_title(first_page: &[Line]) -> String {
    let Some(max_size) = first_page
        .iter()
        .map(|l| l.size)
        .max_by(|a, b| a.total_cmp(b))
    else {
        return UNTITLED_DOCUMENT.to_string();
    };

    first_page
        .iter()
        .filter(|l| l.size >= max_size - TITLE_SIZE_TOLERANCE)
        .map(|l| l.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Builds document outlines with an injected heading classifier.
#[derive(Clone)]
pub struct OutlineAssembler {
    classifier: Arc<dyn HeadingClassifier>,
}

impl OutlineAssembler {
    pub fn new(classifier: Arc<dyn HeadingClassifier>) -> Self {
        Self { classifier }
    }

    /// Name of the classifier backend in use.
    pub fn classifier_name(&self) -> &str {
        self.classifier.name()
    }

    /// Extract the title and ordered headings of a document.
    ///
    /// Page-one headings whose text occurs inside the title are left out so
    /// the title is not repeated in the outline.
    pub fn assemble(&self, doc: &Document) -> OutlineResult {
        if doc.is_empty() {
            return OutlineResult::empty();
        }

        let pages: Vec<Vec<Line>> = doc
            .pages
            .iter()
            .enumerate()
            .map(|(i, page)| reconstruct_lines(&page.spans, i as u32 + 1))
            .collect();

        let title = find_title(&pages[0]);
        let mut outline = Vec::new();

        for (page_index, lines) in pages.iter().enumerate() {
            if lines.is_empty() {
                continue;
            }

            let vectors: Vec<FeatureVector> =
                lines.iter().map(|l| features(l, doc.body_size)).collect();
            let labels = self.classifier.classify(&vectors);

            for (line, label) in lines.iter().zip(labels) {
                let Some(level) = label.heading_level() else {
                    continue;
                };
                if page_index == 0 && title.contains(line.text.as_str()) {
                    continue;
                }
                outline.push(OutlineEntry {
                    level,
                    text: line.text.clone(),
                    page: page_index as u32 + 1,
                });
            }
        }

        log::debug!(
            "{}: {} outline entries ({} classifier)",
            doc.name,
            outline.len(),
            self.classifier.name()
        );

        OutlineResult { title, outline }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::HeuristicClassifier;
    use crate::model::{HeadingLevel, Label, Page, Span};

    fn assembler() -> OutlineAssembler {
        OutlineAssembler::new(Arc::new(HeuristicClassifier::new()))
    }

    fn line(text: &str, size: f32, y: i32) -> Line {
        Line {
            text: text.to_string(),
            size,
            bold: false,
            y_pos: y,
            page: 1,
        }
    }

    #[test]
    fn test_find_title_joins_largest_lines() {
        let lines = vec![
            line("ANNUAL", 24.0, 50),
            line("REPORT", 23.5, 80),
            line("Body text", 12.0, 120),
            line("More body", 12.0, 140),
        ];
        assert_eq!(find_title(&lines), "ANNUAL REPORT");
    }

    #[test]
    fn test_find_title_empty_page() {
        assert_eq!(find_title(&[]), UNTITLED_DOCUMENT);
    }

    #[test]
    fn test_empty_document() {
        let doc = Document::new("empty.pdf", vec![]);
        let result = assembler().assemble(&doc);
        assert_eq!(result.title, "Empty Document");
        assert!(result.outline.is_empty());
    }

    #[test]
    fn test_title_lines_not_in_outline() {
        let mut spans = vec![
            Span::new("PROJECT", 24.0, true, 72.0, 40.0),
            Span::new("OVERVIEW", 24.0, true, 72.0, 70.0),
        ];
        for i in 0..10 {
            spans.push(Span::new(
                "plain body text on the page",
                12.0,
                false,
                72.0,
                120.0 + i as f32 * 14.0,
            ));
        }
        let page2 = vec![
            Span::new("OVERVIEW", 18.0, true, 72.0, 40.0),
            Span::new("body", 12.0, false, 72.0, 60.0),
        ];
        let doc = Document::new(
            "doc.pdf",
            vec![
                Page::new(1).with_spans(spans),
                Page::new(2).with_spans(page2),
            ],
        );

        let result = assembler().assemble(&doc);
        assert_eq!(result.title, "PROJECT OVERVIEW");
        // Same text on page 2 is still a heading
        assert_eq!(result.outline.len(), 1);
        assert_eq!(result.outline[0].text, "OVERVIEW");
        assert_eq!(result.outline[0].page, 2);
        assert_eq!(result.outline[0].level, HeadingLevel::H1);
    }

    #[test]
    fn test_title_label_is_not_an_outline_entry() {
        struct AlwaysTitle;
        impl HeadingClassifier for AlwaysTitle {
            fn name(&self) -> &str {
                "always-title"
            }
            fn classify(&self, features: &[FeatureVector]) -> Vec<Label> {
                vec![Label::Title; features.len()]
            }
        }

        let doc = Document::new(
            "doc.pdf",
            vec![
                Page::new(1).with_spans(vec![Span::new("Cover", 20.0, true, 0.0, 10.0)]),
                Page::new(2).with_spans(vec![Span::new("Heading", 20.0, true, 0.0, 10.0)]),
            ],
        );
        let result = OutlineAssembler::new(Arc::new(AlwaysTitle)).assemble(&doc);
        assert!(result.outline.is_empty());
    }
}
