//! Heading classification.
//!
//! A classifier maps the feature vectors of a page to structural labels.
//! Two interchangeable backends exist: a pre-trained decision forest and a
//! deterministic scoring heuristic. The backend is picked once at startup and
//! handed to the outline assembler; nothing below depends on which one runs.

mod forest;
mod heuristic;

pub use forest::{DecisionTree, ForestClassifier, ForestModel, TreeNode};
pub use heuristic::HeuristicClassifier;

use std::path::Path;
use std::sync::Arc;

use crate::layout::FeatureVector;
use crate::model::Label;

/// Capability shared by all heading classifier backends.
///
/// Implementations must return exactly one label per input, and classifying
/// a batch must give the same labels as classifying each line on its own.
pub trait HeadingClassifier: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &str;

    /// Label a batch of lines.
    fn classify(&self, features: &[FeatureVector]) -> Vec<Label>;
}

/// Build the classifier for this run.
///
/// Uses the forest model at `model_path` when it can be loaded and falls back
/// to the heuristic otherwise.
pub fn load_classifier(model_path: Option<&Path>) -> Arc<dyn HeadingClassifier> {
    let Some(path) = model_path else {
        log::info!("No heading model configured, using heuristic classifier");
        return Arc::new(HeuristicClassifier::new());
    };

    match ForestClassifier::load(path) {
        Ok(forest) => {
            log::info!(
                "Loaded heading model {} ({} trees)",
                path.display(),
                forest.tree_count()
            );
            Arc::new(forest)
        }
        Err(e) => {
            log::warn!("{}; falling back to heuristic classifier", e);
            Arc::new(HeuristicClassifier::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_fallback_without_model() {
        assert_eq!(load_classifier(None).name(), "heuristic");
    }

    #[test]
    fn test_fallback_on_missing_model() {
        let classifier = load_classifier(Some(Path::new("/nonexistent/model.json")));
        assert_eq!(classifier.name(), "heuristic");
    }

    #[test]
    fn test_fallback_on_invalid_model() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{\"classes\": []}").unwrap();
        let classifier = load_classifier(Some(file.path()));
        assert_eq!(classifier.name(), "heuristic");
    }

    #[test]
    fn test_loads_forest_model() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"classes": ["Body"], "trees": [{"nodes": [{"value": [1.0]}]}]}"#)
            .unwrap();
        let classifier = load_classifier(Some(file.path()));
        assert_eq!(classifier.name(), "forest");
        assert_eq!(
            classifier.classify(&[FeatureVector::default()]),
            vec![Label::Body]
        );
    }
}
