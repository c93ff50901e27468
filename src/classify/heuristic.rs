use super::HeadingClassifier;
use crate::layout::FeatureVector;
use crate::model::Label;

/// Lines with more words than this are always body text.
const MAX_HEADING_WORDS: usize = 25;
/// Lines longer than this (in characters) are always body text.
const MAX_HEADING_LENGTH: usize = 200;

/// Deterministic scoring classifier used when no model is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicClassifier;

impl HeuristicClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Heading score of a line.
    pub fn score(fv: &FeatureVector) -> i32 {
        let mut score = 0;
        if fv.size_vs_body > 0 {
            score += 2 * fv.size_vs_body;
        }
        if fv.is_bold {
            score += 5;
        }
        if fv.is_all_caps {
            score += 3;
        }
        if fv.starts_with_number {
            score += 2;
        }
        if fv.ends_with_colon {
            score += 2;
        }
        score
    }

    /// Label a single line.
    pub fn label(fv: &FeatureVector) -> Label {
        if fv.word_count > MAX_HEADING_WORDS || fv.line_length > MAX_HEADING_LENGTH {
            return Label::Body;
        }
        if fv.size_vs_body <= 0 && !fv.is_bold {
            return Label::Body;
        }
        if fv.ends_with_period && !fv.is_all_caps {
            return Label::Body;
        }

        match Self::score(fv) {
            s if s > 15 => Label::H1,
            s if s > 9 => Label::H2,
            s if s > 3 => Label::H3,
            s if s > 0 => Label::H4,
            _ => Label::Body,
        }
    }
}

impl HeadingClassifier for HeuristicClassifier {
    fn name(&self) -> &str {
        "heuristic"
    }

    fn classify(&self, features: &[FeatureVector]) -> Vec<Label> {
        features.iter().map(Self::label).collect()
    }
}
