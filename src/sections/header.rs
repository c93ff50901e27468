use regex::Regex;

use super::rules::HeaderRules;
use crate::model::{DetectionMethod, Section};
use crate::options::DetectorOptions;

/// Header titles must be longer than this many characters...
const MIN_TITLE_CHARS: usize = 5;
/// ...and shorter than this many.
const MAX_TITLE_CHARS: usize = 80;

/// Finds header lines and gathers the text that follows them.
#[derive(Debug, Clone)]
pub(crate) struct HeaderStrategy {
    rules: HeaderRules,
    boundaries: Vec<Regex>,
}

impl HeaderStrategy {
    pub(crate) fn new(rules: HeaderRules) -> Self {
        let boundaries = [r"^[A-Z][A-Z\s]{5,}$", r"^\d+\.?\s+[A-Z]"]
            .iter()
            .map(|p| Regex::new(p).expect("header boundary pattern"))
            .collect();
        Self { rules, boundaries }
    }

    pub(crate) fn rules(&self) -> &HeaderRules {
        &self.rules
    }

    /// A line that looks like the start of another section.
    fn is_boundary(&self, line: &str) -> bool {
        self.boundaries.iter().any(|re| re.is_match(line))
    }

    pub(crate) fn detect(&self, page: u32, text: &str, options: &DetectorOptions) -> Vec<Section> {
        let lines: Vec<&str> = text.split('\n').collect();
        let mut sections = Vec::new();

        for (idx, raw) in lines.iter().enumerate() {
            let line = raw.trim();
            if line.chars().count() < options.min_header_line {
                continue;
            }

            let Some(title) = self
                .rules
                .match_title(line, MIN_TITLE_CHARS, MAX_TITLE_CHARS)
            else {
                continue;
            };

            let content = self.gather_content(&lines[idx + 1..], options.max_section_length);
            if !content.is_empty() {
                sections.push(Section::candidate(
                    title,
                    page,
                    content,
                    DetectionMethod::Header,
                ));
            }
        }

        sections
    }

    /// Join the lines after a header until the next header-like line or
    /// until the content grows past `max_len` characters.
    fn gather_content(&self, following: &[&str], max_len: usize) -> String {
        let mut parts: Vec<&str> = Vec::new();
        let mut joined_len = 0;

        for raw in following {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            if self.is_boundary(line) || joined_len > max_len {
                break;
            }
            if !parts.is_empty() {
                joined_len += 1;
            }
            joined_len += line.chars().count();
            parts.push(line);
        }

        parts.join(" ")
    }
}
