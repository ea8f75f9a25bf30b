pub mod artifact;
pub mod forest;
pub mod tree;

pub use artifact::{Encoding, FeatureLayout, FeatureSpec, ModelArtifact, DEFAULT_MODEL_PATH};
pub use forest::ForestClassifier;
pub use tree::{Leaf, Node, TreeNode};
