use crate::model::artifact::FeatureLayout;
use crate::model::tree::TreeNode;
use crate::prelude::{Classifier, SelectorResult};
use crate::record::InputRecord;
use log::debug;
use std::collections::BTreeMap;

/// Majority-vote decision forest over an encoded `InputRecord`.
#[derive(Debug, Clone)]
pub struct ForestClassifier {
    layout: FeatureLayout,
    trees: Vec<TreeNode>,
}

impl ForestClassifier {
    pub fn new(layout: FeatureLayout, trees: Vec<TreeNode>) -> Self {
        Self { layout, trees }
    }

    pub fn layout(&self) -> &FeatureLayout {
        &self.layout
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    /// Counts each tree's vote; ties resolve to the smallest class index.
    fn vote(&self, sample: &[f64]) -> usize {
        let mut votes: BTreeMap<usize, usize> = BTreeMap::new();
        for tree in &self.trees {
            *votes.entry(tree.predict_one(sample)).or_insert(0) += 1;
        }
        let mut best = (0, 0);
        for (class, count) in votes {
            if count > best.1 {
                best = (class, count);
            }
        }
        best.0
    }
}

impl Classifier for ForestClassifier {
    fn predict(&self, record: &InputRecord) -> SelectorResult<usize> {
        let sample = self.layout.encode(record);
        let class = self.vote(&sample);
        debug!("forest voted class {} for sample {:?}", class, sample);
        Ok(class)
    }
}
