//! Random forest classifier
//!
//! Trees are stored as flat node arrays (node 0 is the root). A split node
//! sends a sample left when `x[feature] <= threshold`. A leaf holds per-class
//! weights; the forest averages each tree's normalized leaf distribution and
//! predicts the class with the highest mean probability.

use serde::{Deserialize, Serialize};
use shared::{EncodedRecord, RainLabel, FEATURE_COUNT, FEATURE_ORDER};
use thiserror::Error;

/// Failures raised while classifying a record
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictError {
    #[error("feature '{0}' is not a finite number")]
    NonFiniteFeature(&'static str),

    #[error("tree {tree} is malformed at node {node}")]
    MalformedTree { tree: usize, node: usize },

    #[error("model produced unknown class {0}")]
    UnknownClass(i64),
}

/// A trained binary classifier over fully encoded records
pub trait Classifier: Send + Sync {
    fn predict(&self, record: &EncodedRecord) -> Result<RainLabel, PredictError>;
}

fn no_child() -> i32 {
    -1
}

/// A decision tree node (split or leaf)
///
/// Leaves have `feature == -1` and carry `value`; split nodes carry
/// `threshold`, `left` and `right`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TreeNode {
    pub feature: i32,
    #[serde(default)]
    pub threshold: f64,
    #[serde(default = "no_child")]
    pub left: i32,
    #[serde(default = "no_child")]
    pub right: i32,
    #[serde(default)]
    pub value: Vec<f64>,
}

impl TreeNode {
    pub fn split(feature: usize, threshold: f64, left: usize, right: usize) -> Self {
        Self {
            feature: feature as i32,
            threshold,
            left: left as i32,
            right: right as i32,
            value: Vec::new(),
        }
    }

    pub fn leaf(value: Vec<f64>) -> Self {
        Self {
            feature: -1,
            threshold: 0.0,
            left: -1,
            right: -1,
            value,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.feature < 0
    }
}

/// A single decision tree
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    pub fn new(nodes: Vec<TreeNode>) -> Self {
        Self { nodes }
    }

    /// Walk from the root to a leaf and return that leaf's weights.
    ///
    /// `tree` is only used to label errors. The walk is bounded by the node
    /// count, so a cyclic tree fails instead of looping.
    fn leaf_for(&self, tree: usize, features: &[f64]) -> Result<&[f64], PredictError> {
        let malformed = |node: usize| PredictError::MalformedTree { tree, node };

        let mut idx = 0usize;
        for _ in 0..=self.nodes.len() {
            let node = self.nodes.get(idx).ok_or_else(|| malformed(idx))?;
            if node.is_leaf() {
                return Ok(&node.value);
            }

            let value = features
                .get(node.feature as usize)
                .ok_or_else(|| malformed(idx))?;
            let next = if *value <= node.threshold {
                node.left
            } else {
                node.right
            };
            idx = usize::try_from(next).map_err(|_| malformed(idx))?;
        }

        Err(malformed(idx))
    }
}

/// Ensemble of decision trees voting by averaged class probability
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RandomForest {
    /// Column names the model was trained on, if the exporter recorded them
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
    pub n_classes: usize,
    /// Class value for each position of a leaf's `value` vector
    pub classes: Vec<i64>,
    pub trees: Vec<DecisionTree>,
}

impl RandomForest {
    pub fn new(classes: Vec<i64>, trees: Vec<DecisionTree>) -> Self {
        Self {
            feature_names: Some(FEATURE_ORDER.iter().map(|f| f.column().to_string()).collect()),
            n_classes: classes.len(),
            classes,
            trees,
        }
    }

    /// Structural checks run once at load time
    pub fn validate(&self) -> Result<(), String> {
        if let Some(names) = &self.feature_names {
            let expected: Vec<&str> = FEATURE_ORDER.iter().map(|f| f.column()).collect();
            if names.iter().map(String::as_str).ne(expected.iter().copied()) {
                return Err(format!(
                    "feature_names {:?} do not match expected columns {:?}",
                    names, expected
                ));
            }
        }

        if self.n_classes == 0 || self.n_classes != self.classes.len() {
            return Err(format!(
                "n_classes is {} but {} classes are listed",
                self.n_classes,
                self.classes.len()
            ));
        }
        if let Some(class) = self
            .classes
            .iter()
            .find(|c| RainLabel::from_class(**c).is_none())
        {
            return Err(format!("class {} is not a binary rain label", class));
        }
        if self.trees.is_empty() {
            return Err("forest has no trees".to_string());
        }

        for (t, tree) in self.trees.iter().enumerate() {
            if tree.nodes.is_empty() {
                return Err(format!("tree {} has no nodes", t));
            }
            for (n, node) in tree.nodes.iter().enumerate() {
                if node.is_leaf() {
                    if node.value.len() != self.n_classes {
                        return Err(format!(
                            "tree {} node {}: leaf has {} values, expected {}",
                            t,
                            n,
                            node.value.len(),
                            self.n_classes
                        ));
                    }
                    if node.value.iter().any(|v| !v.is_finite() || *v < 0.0)
                        || node.value.iter().sum::<f64>() <= 0.0
                    {
                        return Err(format!("tree {} node {}: invalid leaf weights", t, n));
                    }
                    continue;
                }

                if node.feature as usize >= FEATURE_COUNT {
                    return Err(format!(
                        "tree {} node {}: feature index {} out of range",
                        t, n, node.feature
                    ));
                }
                if !node.threshold.is_finite() {
                    return Err(format!("tree {} node {}: threshold is not finite", t, n));
                }
                for child in [node.left, node.right] {
                    let in_range = usize::try_from(child)
                        .map(|c| c < tree.nodes.len() && c != n)
                        .unwrap_or(false);
                    if !in_range {
                        return Err(format!(
                            "tree {} node {}: child index {} out of range",
                            t, n, child
                        ));
                    }
                }
            }
        }

        Ok(())
    }

    /// Mean class probabilities across all trees, in `classes` order
    pub fn predict_proba(&self, record: &EncodedRecord) -> Result<Vec<f64>, PredictError> {
        let features = record.features();
        if let Some(idx) = features.iter().position(|v| !v.is_finite()) {
            return Err(PredictError::NonFiniteFeature(FEATURE_ORDER[idx].column()));
        }

        let mut totals = vec![0.0; self.n_classes];
        for (t, tree) in self.trees.iter().enumerate() {
            let leaf = tree.leaf_for(t, &features)?;
            let sum: f64 = leaf.iter().sum();
            if leaf.len() != self.n_classes || sum <= 0.0 {
                return Err(PredictError::MalformedTree { tree: t, node: 0 });
            }
            for (total, weight) in totals.iter_mut().zip(leaf) {
                *total += weight / sum;
            }
        }

        let n_trees = self.trees.len().max(1) as f64;
        Ok(totals.into_iter().map(|p| p / n_trees).collect())
    }
}

impl Classifier for RandomForest {
    fn predict(&self, record: &EncodedRecord) -> Result<RainLabel, PredictError> {
        let proba = self.predict_proba(record)?;

        // Ties go to the lowest class index
        let mut best = 0usize;
        for (idx, p) in proba.iter().enumerate() {
            if *p > proba[best] {
                best = idx;
            }
        }

        let class = *self
            .classes
            .get(best)
            .ok_or(PredictError::UnknownClass(best as i64))?;
        RainLabel::from_class(class).ok_or(PredictError::UnknownClass(class))
    }
}
