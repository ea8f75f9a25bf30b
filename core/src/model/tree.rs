use serde::{Deserialize, Serialize};

/// Internal decision node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Column of the encoded feature vector to split on
    pub feature_idx: usize,
    /// Samples with `value <= threshold` go left
    pub threshold: f64,
    pub left: Box<TreeNode>,
    pub right: Box<TreeNode>,
}

/// Terminal node carrying a class vote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Leaf {
    pub class_label: usize,
    /// Training samples that reached this leaf, informational only
    #[serde(default)]
    pub n_samples: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TreeNode {
    Node(Node),
    Leaf(Leaf),
}

impl TreeNode {
    pub fn leaf(class_label: usize) -> Self {
        TreeNode::Leaf(Leaf {
            class_label,
            n_samples: 0,
        })
    }

    pub fn split(feature_idx: usize, threshold: f64, left: TreeNode, right: TreeNode) -> Self {
        TreeNode::Node(Node {
            feature_idx,
            threshold,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    /// Walks the tree for one encoded sample.
    ///
    /// Callers validate column indices beforehand; a missing column reads as 0.
    pub fn predict_one(&self, sample: &[f64]) -> usize {
        let mut node = self;
        loop {
            match node {
                TreeNode::Leaf(leaf) => return leaf.class_label,
                TreeNode::Node(split) => {
                    let value = sample.get(split.feature_idx).copied().unwrap_or(0.0);
                    node = if value <= split.threshold {
                        &split.left
                    } else {
                        &split.right
                    };
                }
            }
        }
    }

    /// Largest column index referenced by any split.
    pub fn max_feature_idx(&self) -> Option<usize> {
        match self {
            TreeNode::Leaf(_) => None,
            TreeNode::Node(split) => [
                Some(split.feature_idx),
                split.left.max_feature_idx(),
                split.right.max_feature_idx(),
            ]
            .into_iter()
            .flatten()
            .max(),
        }
    }

    /// Largest class label any leaf can vote for.
    pub fn max_class_label(&self) -> usize {
        match self {
            TreeNode::Leaf(leaf) => leaf.class_label,
            TreeNode::Node(split) => split
                .left
                .max_class_label()
                .max(split.right.max_class_label()),
        }
    }
}
