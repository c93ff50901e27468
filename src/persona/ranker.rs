use std::collections::{BTreeSet, HashMap};

use super::PersonaContext;
use crate::model::{RankedSection, Section};

const SEMANTIC_WEIGHT: f64 = 0.6;
const LENGTH_WEIGHT: f64 = 0.3;
const POSITION_WEIGHT: f64 = 0.1;

/// Semantic score used when the persona context has no keywords.
const NEUTRAL_SEMANTIC_SCORE: f64 = 0.5;

/// Scores sections against a persona context.
#[derive(Debug, Clone)]
pub struct PersonaRanker {
    keywords: BTreeSet<String>,
}

impl PersonaRanker {
    pub fn new(context: &PersonaContext) -> Self {
        let keywords = context.keywords();
        if keywords.is_empty() {
            log::debug!("Persona context has no keywords, semantic scores are neutral");
        }
        Self { keywords }
    }

    pub fn keywords(&self) -> &BTreeSet<String> {
        &self.keywords
    }

    /// Relevance of one section in `[0, 1]`.
    pub fn relevance(&self, section: &Section) -> f64 {
        if section.content.trim().is_empty() {
            return 0.0;
        }

        let word_count = section.content.split_whitespace().count();
        let score = SEMANTIC_WEIGHT * self.semantic_score(&section.content)
            + LENGTH_WEIGHT * length_score(word_count)
            + POSITION_WEIGHT * position_score(section.position);
        score.clamp(0.0, 1.0)
    }

    /// Rank sections by relevance, highest first.
    ///
    /// The sort is stable: sections with equal scores keep their input
    /// order.
    pub fn rank(&self, sections: &[Section]) -> Vec<RankedSection> {
        let mut ranked: Vec<RankedSection> = sections
            .iter()
            .map(|section| RankedSection {
                relevance_score: self.relevance(section),
                section: section.clone(),
            })
            .collect();
        ranked.sort_by(|a, b| b.relevance_score.total_cmp(&a.relevance_score));
        ranked
    }

    /// Keyword weight in the content: term frequency times a smoothed
    /// inverse count, summed over keywords that occur.
    fn semantic_score(&self, content: &str) -> f64 {
        if self.keywords.is_empty() {
            return NEUTRAL_SEMANTIC_SCORE;
        }

        let lowered = content.to_lowercase();
        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut total = 0usize;
        for token in lowered.split_whitespace() {
            *counts.entry(token).or_default() += 1;
            total += 1;
        }
        if total == 0 {
            return 0.0;
        }

        let score: f64 = self
            .keywords
            .iter()
            .filter_map(|keyword| counts.get(keyword.as_str()))
            .map(|&count| {
                let tf = count as f64 / total as f64;
                tf * (1.0 + 1.0 / count as f64).ln()
            })
            .sum();
        score.clamp(0.0, 1.0)
    }
}

fn length_score(word_count: usize) -> f64 {
    match word_count {
        0..=9 => 0.3,
        10..=49 => 0.8,
        50..=199 => 1.0,
        200..=499 => 0.7,
        _ => 0.4,
    }
}

fn position_score(position: usize) -> f64 {
    match position {
        0..=2 => 1.0,
        3..=9 => 0.8,
        _ => 0.6,
    }
}
