//! Decision-forest heading model.
//!
//! Models are trained elsewhere and exported as JSON:
//!
//! ```json
//! {
//!   "classes": ["Body", "H1", "H2", "H3", "H4", "Title"],
//!   "trees": [
//!     { "nodes": [
//!         { "feature": 1, "threshold": 2.5, "left": 1, "right": 2 },
//!         { "value": [9.0, 0.0, 0.0, 1.0, 0.0, 0.0] },
//!         { "value": [0.0, 7.0, 2.0, 0.0, 0.0, 1.0] }
//!     ] }
//!   ]
//! }
//! ```
//!
//! Split nodes send a sample left when `x[feature] <= threshold`. Leaf values
//! are per-class weights; the forest predicts the class with the largest sum
//! over all trees.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::HeadingClassifier;
use crate::error::{Error, Result};
use crate::layout::{FeatureVector, MODEL_FEATURE_COUNT, MODEL_FEATURE_NAMES};
use crate::model::Label;

/// Serialized forest model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestModel {
    /// Class label for each leaf value slot
    pub classes: Vec<Label>,
    pub trees: Vec<DecisionTree>,
    /// Optional feature names; must match the extractor's order when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,
}

/// One tree as a flat node array rooted at index 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f32,
        left: usize,
        right: usize,
    },
    Leaf {
        value: Vec<f32>,
    },
}

impl DecisionTree {
    fn leaf_for(&self, x: &[f32; MODEL_FEATURE_COUNT]) -> &[f32] {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if x[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
                TreeNode::Leaf { value } => return value,
            }
        }
    }
}

/// Heading classifier backed by a pre-trained decision forest.
#[derive(Debug, Clone)]
pub struct ForestClassifier {
    model: ForestModel,
}

impl ForestClassifier {
    /// Load and validate a model file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::MissingModel(path.to_path_buf()));
        }
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Parse and validate a model from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        let model: ForestModel =
            serde_json::from_str(json).map_err(|e| Error::InvalidModel(e.to_string()))?;
        Self::from_model(model)
    }

    /// Validate an in-memory model.
    pub fn from_model(model: ForestModel) -> Result<Self> {
        validate(&model)?;
        Ok(Self { model })
    }

    /// Number of trees in the forest.
    pub fn tree_count(&self) -> usize {
        self.model.trees.len()
    }

    /// Predict the label of one feature vector.
    pub fn predict(&self, fv: &FeatureVector) -> Label {
        let x = fv.to_model_input();
        let mut votes = vec![0.0f32; self.model.classes.len()];
        for tree in &self.model.trees {
            for (vote, weight) in votes.iter_mut().zip(tree.leaf_for(&x)) {
                *vote += weight;
            }
        }

        let mut best = 0;
        for (i, vote) in votes.iter().enumerate() {
            if *vote > votes[best] {
                best = i;
            }
        }
        self.model.classes[best]
    }
}

impl HeadingClassifier for ForestClassifier {
    fn name(&self) -> &str {
        "forest"
    }

    fn classify(&self, features: &[FeatureVector]) -> Vec<Label> {
        features.iter().map(|fv| self.predict(fv)).collect()
    }
}

fn validate(model: &ForestModel) -> Result<()> {
    let invalid = |msg: String| Err(Error::InvalidModel(msg));

    if model.classes.is_empty() {
        return invalid("model has no classes".into());
    }
    if model.trees.is_empty() {
        return invalid("model has no trees".into());
    }
    if let Some(ref names) = model.feature_names {
        if names.iter().map(String::as_str).ne(MODEL_FEATURE_NAMES.iter().copied()) {
            return invalid(format!(
                "feature names {:?} do not match {:?}",
                names, MODEL_FEATURE_NAMES
            ));
        }
    }

    for (t, tree) in model.trees.iter().enumerate() {
        if tree.nodes.is_empty() {
            return invalid(format!("tree {} has no nodes", t));
        }
        for (i, node) in tree.nodes.iter().enumerate() {
            match node {
                TreeNode::Split {
                    feature,
                    left,
                    right,
                    ..
                } => {
                    if *feature >= MODEL_FEATURE_COUNT {
                        return invalid(format!(
                            "tree {} node {}: feature {} out of range",
                            t, i, feature
                        ));
                    }
                    // Children must come after their parent, which also rules out cycles.
                    for child in [*left, *right] {
                        if child <= i || child >= tree.nodes.len() {
                            return invalid(format!(
                                "tree {} node {}: bad child index {}",
                                t, i, child
                            ));
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    if value.len() != model.classes.len() {
                        return invalid(format!(
                            "tree {} node {}: {} leaf values for {} classes",
                            t,
                            i,
                            value.len(),
                            model.classes.len()
                        ));
                    }
                }
            }
        }
    }
    Ok(())
}
