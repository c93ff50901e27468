use std::collections::HashSet;

use crate::model::Section;

/// Base confidence of every kept section.
const BASE_CONFIDENCE: f64 = 0.5;
/// Bonus for sections with substantial content or a descriptive title.
const QUALITY_BONUS: f64 = 0.1;

/// Deduplicates candidate sections and attaches id, position, word count and
/// confidence.
#[derive(Debug, Clone)]
pub struct SectionScorer {
    max_sections: usize,
}

impl SectionScorer {
    pub fn new(max_sections: usize) -> Self {
        Self { max_sections }
    }

    /// Walk candidates in detection order, keeping the first section for each
    /// distinct title.
    ///
    /// Running the scorer again over its own output returns the same list.
    pub fn score(&self, doc_name: &str, candidates: Vec<Section>) -> Vec<Section> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut kept = Vec::new();

        for mut section in candidates {
            if kept.len() >= self.max_sections {
                break;
            }
            if section.title.chars().count() <= 3 || seen.contains(&section.title) {
                continue;
            }
            seen.insert(section.title.clone());

            section.position = kept.len();
            section.id = format!("{}_section_{}", doc_name, kept.len() + 1);
            section.word_count = section.content.split_whitespace().count();
            section.confidence = confidence(&section);
            kept.push(section);
        }

        kept
    }
}

impl Default for SectionScorer {
    fn default() -> Self {
        Self::new(50)
    }
}

fn confidence(section: &Section) -> f64 {
    let mut score = BASE_CONFIDENCE + section.detection_method.weight();
    if section.content.chars().count() > 100 {
        score += QUALITY_BONUS;
    }
    if section.title.chars().count() > 10 {
        score += QUALITY_BONUS;
    }
    score.min(1.0)
}
