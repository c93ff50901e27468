//! Layout analysis: from typographic spans to featured lines.
//!
//! Spans are grouped into lines by baseline, document font statistics give
//! the body size, and each line is turned into a fixed feature vector that the
//! heading classifiers consume.

mod features;
mod lines;
mod stats;

pub use features::{
    features, is_all_caps, FeatureVector, MODEL_FEATURE_COUNT, MODEL_FEATURE_NAMES,
};
pub use lines::{lines_to_text, reconstruct_lines};
pub use stats::{FontStatistics, DEFAULT_BODY_SIZE};
