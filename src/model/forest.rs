use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};
use crate::model::layers::argmax;
use crate::model::Classifier;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Split {
    pub feature_idx: usize,
    pub threshold: f64,
    pub left: Box<TreeNode>,
    pub right: Box<TreeNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Leaf {
    pub class_weights: Vec<f64>,
}

impl Leaf {
    pub fn distribution(&self) -> Vec<f64> {
        let total: f64 = self.class_weights.iter().sum();
        self.class_weights.iter().map(|w| w / total).collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TreeNode {
    Split(Split),
    Leaf(Leaf),
}

impl TreeNode {
    fn validate(&self, n_features: usize, n_classes: usize) -> Result<()> {
        match self {
            TreeNode::Split(split) => {
                if split.feature_idx >= n_features {
                    return Err(DashboardError::InvalidModel(format!(
                        "split on feature {} but schema has {n_features} features",
                        split.feature_idx
                    )));
                }
                if !split.threshold.is_finite() {
                    return Err(DashboardError::InvalidModel(
                        "split threshold is not finite".into(),
                    ));
                }
                split.left.validate(n_features, n_classes)?;
                split.right.validate(n_features, n_classes)
            }
            TreeNode::Leaf(leaf) => {
                if leaf.class_weights.len() != n_classes {
                    return Err(DashboardError::InvalidModel(format!(
                        "leaf has {} class weights for {n_classes} classes",
                        leaf.class_weights.len()
                    )));
                }
                let valid = leaf.class_weights.iter().all(|w| w.is_finite() && *w >= 0.0);
                if !valid || leaf.class_weights.iter().sum::<f64>() <= 0.0 {
                    return Err(DashboardError::InvalidModel(
                        "leaf weights must be non-negative with a positive total".into(),
                    ));
                }
                Ok(())
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    pub root: TreeNode,
}

impl DecisionTree {
    pub fn leaf(&self, x: &[f64]) -> &Leaf {
        let mut node = &self.root;
        loop {
            match node {
                TreeNode::Leaf(leaf) => return leaf,
                TreeNode::Split(split) => {
                    node = if x[split.feature_idx] <= split.threshold {
                        split.left.as_ref()
                    } else {
                        split.right.as_ref()
                    };
                }
            }
        }
    }
}

/// Soft-voting forest: probabilities are the mean of the per-tree leaf
/// distributions, and the label is their argmax.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    pub trees: Vec<DecisionTree>,
}

impl RandomForest {
    fn probabilities(&self, x: &[f64]) -> Vec<f64> {
        let mut total: Vec<f64> = Vec::new();
        for tree in &self.trees {
            let dist = tree.leaf(x).distribution();
            if total.is_empty() {
                total = dist;
            } else {
                total.iter_mut().zip(dist).for_each(|(t, p)| *t += p);
            }
        }
        let n_trees = self.trees.len() as f64;
        total.iter_mut().for_each(|t| *t /= n_trees);
        total
    }
}

impl Classifier for RandomForest {
    fn kind(&self) -> &'static str {
        "Random Forest Classifier"
    }

    fn validate(&self, n_features: usize, n_classes: usize) -> Result<()> {
        if self.trees.is_empty() {
            return Err(DashboardError::InvalidModel("forest has no trees".into()));
        }
        for tree in &self.trees {
            tree.root.validate(n_features, n_classes)?;
        }
        Ok(())
    }

    fn predict(&self, x: &[f64]) -> usize {
        argmax(&self.probabilities(x))
    }

    fn predict_proba(&self, x: &[f64]) -> Option<Vec<f64>> {
        Some(self.probabilities(x))
    }
}
