use regex::Regex;

use super::truncate_title;
use crate::model::{DetectionMethod, Section};
use crate::options::DetectorOptions;

/// Builds sections out of bulleted or numbered list runs.
#[derive(Debug, Clone)]
pub(crate) struct ListStrategy {
    item: Regex,
    capitalized: Regex,
}

impl ListStrategy {
    pub(crate) fn new() -> Self {
        Self {
            item: Regex::new(r"^(?:[•\-*]|\d+[.)])\s+.+").expect("list item pattern"),
            capitalized: Regex::new(r"^[A-Z]").expect("capitalized line pattern"),
        }
    }

    pub(crate) fn detect(&self, page: u32, text: &str, options: &DetectorOptions) -> Vec<Section> {
        let lines: Vec<&str> = text.split('\n').collect();
        let mut sections = Vec::new();

        for (idx, raw) in lines.iter().enumerate() {
            let line = raw.trim();
            if !self.item.is_match(line) {
                continue;
            }

            let end = lines.len().min(idx + options.max_lookahead_lines + 1);
            let content = self.gather(line, &lines[idx + 1..end]);
            if content.chars().count() > options.min_section_length {
                sections.push(Section::candidate(
                    truncate_title(line, options.title_max_chars),
                    page,
                    content,
                    DetectionMethod::List,
                ));
            }
        }

        sections
    }

    /// Items go on their own line, lowercase continuations are appended to
    /// the current one, and any other line ends the run.
    fn gather(&self, first: &str, window: &[&str]) -> String {
        let mut content = first.to_string();

        for raw in window {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            if self.item.is_match(line) {
                content.push('\n');
            } else if !self.capitalized.is_match(line) {
                content.push(' ');
            } else {
                break;
            }
            content.push_str(line);
        }

        content
    }
}
