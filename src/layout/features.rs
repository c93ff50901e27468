use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::model::{round_points, Line};

/// Number of features consumed by a heading model.
pub const MODEL_FEATURE_COUNT: usize = 9;

/// Model feature names, in model input order.
pub const MODEL_FEATURE_NAMES: [&str; MODEL_FEATURE_COUNT] = [
    "font_size",
    "size_vs_body",
    "is_bold",
    "y_pos",
    "line_length",
    "word_count",
    "is_all_caps",
    "starts_with_number",
    "ends_with_colon",
];

/// Engineered features of one line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Rounded font size
    pub font_size: i32,
    /// Rounded font size minus the document body size (may be negative)
    pub size_vs_body: i32,
    pub is_bold: bool,
    pub y_pos: i32,
    /// Length of the text in characters
    pub line_length: usize,
    pub word_count: usize,
    pub is_all_caps: bool,
    pub starts_with_number: bool,
    pub ends_with_colon: bool,
    /// Trimmed text ends with a period. Used by the heuristic rules only,
    /// never part of the model input.
    #[serde(default)]
    pub ends_with_period: bool,
}

impl FeatureVector {
    /// The nine model features as numbers, in `MODEL_FEATURE_NAMES` order.
    pub fn to_model_input(&self) -> [f32; MODEL_FEATURE_COUNT] {
        [
            self.font_size as f32,
            self.size_vs_body as f32,
            flag(self.is_bold),
            self.y_pos as f32,
            self.line_length as f32,
            self.word_count as f32,
            flag(self.is_all_caps),
            flag(self.starts_with_number),
            flag(self.ends_with_colon),
        ]
    }
}

fn flag(value: bool) -> f32 {
    if value {
        1.0
    } else {
        0.0
    }
}

fn numbered_prefix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*\d+(\.\d+)*\s+").expect("numbered prefix pattern"))
}

/// Compute the feature vector of a line against the document body size.
pub fn features(line: &Line, body_size: i32) -> FeatureVector {
    let text = line.text.as_str();
    let trimmed = text.trim();
    let font_size = round_points(line.size);

    FeatureVector {
        font_size,
        size_vs_body: font_size - body_size,
        is_bold: line.bold,
        y_pos: line.y_pos,
        line_length: text.chars().count(),
        word_count: text.split_whitespace().count(),
        is_all_caps: is_all_caps(text),
        starts_with_number: numbered_prefix().is_match(text),
        ends_with_colon: trimmed.ends_with(':'),
        ends_with_period: trimmed.ends_with('.'),
    }
}

/// Uppercase check that ignores uncased characters.
///
/// Requires at least one uppercase letter, no lowercase letter and more than
/// one character, so a lone "A" is not treated as an all-caps line.
pub fn is_all_caps(text: &str) -> bool {
    text.chars().count() > 1
        && text.chars().any(char::is_uppercase)
        && !text.chars().any(char::is_lowercase)
}
