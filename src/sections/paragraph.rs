use regex::Regex;

use super::truncate_title;
use crate::model::{DetectionMethod, Section};
use crate::options::DetectorOptions;

/// Treats every blank-line separated chunk of reasonable size as a section.
#[derive(Debug, Clone)]
pub(crate) struct ParagraphStrategy {
    separator: Regex,
}

impl ParagraphStrategy {
    pub(crate) fn new() -> Self {
        Self {
            separator: Regex::new(r"\n\s*\n").expect("paragraph separator pattern"),
        }
    }

    pub(crate) fn detect(&self, page: u32, text: &str, options: &DetectorOptions) -> Vec<Section> {
        self.separator
            .split(text)
            .map(str::trim)
            .filter(|chunk| {
                let len = chunk.chars().count();
                !chunk.is_empty()
                    && len >= options.min_section_length
                    && len <= options.max_section_length
            })
            .map(|chunk| {
                let first_sentence = chunk.split(". ").next().unwrap_or(chunk);
                Section::candidate(
                    truncate_title(first_sentence, options.title_max_chars),
                    page,
                    chunk,
                    DetectionMethod::Paragraph,
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(text: &str) -> Vec<Section> {
        ParagraphStrategy::new().detect(2, text, &DetectorOptions::default())
    }

    #[test]
    fn test_paragraph_titles_from_first_sentence() {
        let text = "Solar output rose sharply. Storage lagged behind demand.\n\nshort\n\n  \n\nWind capacity doubled in the northern region this year";
        let sections = detect(text);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title, "Solar output rose sharply");
        assert_eq!(
            sections[0].content,
            "Solar output rose sharply. Storage lagged behind demand."
        );
        assert_eq!(sections[1].title, "Wind capacity doubled in the northern region this ...");
        assert_eq!(sections[1].page, 2);
        assert!(sections
            .iter()
            .all(|s| s.detection_method == DetectionMethod::Paragraph));
    }

    #[test]
    fn test_length_bounds() {
        let exact_min = "a".repeat(30);
        let too_long = "b".repeat(2001);
        let text = format!("{}\n\n{}", exact_min, too_long);
        let sections = detect(&text);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].content, exact_min);
    }
}
