use crate::model::forest::ForestClassifier;
use crate::model::tree::TreeNode;
use crate::prelude::{SelectorError, SelectorResult};
use crate::record::{EnvType, InputRecord};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Default location of the serialized classifier.
pub const DEFAULT_MODEL_PATH: &str = "models/best_model.json";

/// How a named feature is turned into columns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Encoding {
    /// One column per category, in the listed order.
    OneHot(Vec<String>),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureSpec {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<Encoding>,
}

/// On-disk form of the classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub classes: Option<usize>,
    pub features: Vec<FeatureSpec>,
    pub trees: Vec<TreeNode>,
}

impl ModelArtifact {
    /// Reads and validates the artifact at `path`.
    ///
    /// Any failure here is a startup failure; nothing is deferred to
    /// prediction time.
    pub fn load<P: AsRef<Path>>(path: P) -> SelectorResult<ForestClassifier> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref).map_err(|source| SelectorError::ModelIo {
            path: path_ref.to_path_buf(),
            source,
        })?;
        let artifact = Self::parse(&contents)?;
        let name = artifact
            .name
            .clone()
            .unwrap_or_else(|| path_ref.display().to_string());
        let forest = artifact.into_classifier()?;
        info!(
            "loaded model {} from {} ({} trees, {} columns)",
            name,
            path_ref.display(),
            forest.tree_count(),
            forest.layout().width()
        );
        Ok(forest)
    }

    pub fn parse(contents: &str) -> SelectorResult<Self> {
        serde_json::from_str(contents)
            .map_err(|err| SelectorError::ModelFormat(format!("invalid JSON: {err}")))
    }

    pub fn into_classifier(self) -> SelectorResult<ForestClassifier> {
        let layout = FeatureLayout::from_specs(&self.features)?;
        if self.trees.is_empty() {
            return Err(SelectorError::ModelFormat("artifact contains no trees".into()));
        }
        for (idx, tree) in self.trees.iter().enumerate() {
            if let Some(column) = tree.max_feature_idx() {
                if column >= layout.width() {
                    return Err(SelectorError::ModelFormat(format!(
                        "tree {idx} splits on column {column} but only {} columns are encoded",
                        layout.width()
                    )));
                }
            }
            if let Some(classes) = self.classes {
                let label = tree.max_class_label();
                if label >= classes {
                    return Err(SelectorError::ModelFormat(format!(
                        "tree {idx} votes for class {label} but the artifact declares {classes} classes"
                    )));
                }
            }
        }
        Ok(ForestClassifier::new(layout, self.trees))
    }
}

/// Record field a numeric column reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum NumericField {
    DistanceM,
    NumWalls,
    HasMetal,
    FrequencyMhz,
}

/// Record field feeding one or more columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum RecordField {
    EnvType,
    Numeric(NumericField),
}

impl RecordField {
    const ALL: [RecordField; 5] = [
        RecordField::EnvType,
        RecordField::Numeric(NumericField::DistanceM),
        RecordField::Numeric(NumericField::NumWalls),
        RecordField::Numeric(NumericField::HasMetal),
        RecordField::Numeric(NumericField::FrequencyMhz),
    ];

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }

    fn name(&self) -> &'static str {
        match self {
            RecordField::EnvType => "env_type",
            RecordField::Numeric(NumericField::DistanceM) => "distance_m",
            RecordField::Numeric(NumericField::NumWalls) => "num_walls",
            RecordField::Numeric(NumericField::HasMetal) => "has_metal",
            RecordField::Numeric(NumericField::FrequencyMhz) => "frequency_mhz",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Column {
    Numeric(NumericField),
    EnvIs(EnvType),
}

/// Maps an `InputRecord` onto the column order the trees were built with.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureLayout {
    columns: Vec<Column>,
}

impl FeatureLayout {
    pub fn from_specs(specs: &[FeatureSpec]) -> SelectorResult<Self> {
        let mut seen = HashSet::new();
        let mut columns = Vec::new();

        for spec in specs {
            let field = RecordField::from_name(&spec.name).ok_or_else(|| {
                SelectorError::ModelFormat(format!("unknown feature '{}'", spec.name))
            })?;
            if !seen.insert(field) {
                return Err(SelectorError::ModelFormat(format!(
                    "feature '{}' listed more than once",
                    spec.name
                )));
            }
            match (field, &spec.encoding) {
                (RecordField::EnvType, Some(Encoding::OneHot(categories))) => {
                    if categories.is_empty() {
                        return Err(SelectorError::ModelFormat(
                            "env_type one-hot encoding has no categories".into(),
                        ));
                    }
                    let mut seen_categories = HashSet::new();
                    for category in categories {
                        let env = category.parse::<EnvType>().map_err(|err| {
                            SelectorError::ModelFormat(format!("env_type encoding: {err}"))
                        })?;
                        if !seen_categories.insert(env) {
                            return Err(SelectorError::ModelFormat(format!(
                                "env_type category '{category}' listed more than once"
                            )));
                        }
                        columns.push(Column::EnvIs(env));
                    }
                }
                (RecordField::EnvType, None) => {
                    return Err(SelectorError::ModelFormat(
                        "env_type requires a one_hot encoding".into(),
                    ));
                }
                (RecordField::Numeric(_), Some(_)) => {
                    return Err(SelectorError::ModelFormat(format!(
                        "feature '{}' is numeric and takes no encoding",
                        spec.name
                    )));
                }
                (RecordField::Numeric(numeric), None) => columns.push(Column::Numeric(numeric)),
            }
        }

        let missing: Vec<&str> = RecordField::ALL
            .iter()
            .filter(|field| !seen.contains(*field))
            .map(RecordField::name)
            .collect();
        if !missing.is_empty() {
            return Err(SelectorError::ModelFormat(format!(
                "artifact does not declare features: {}",
                missing.join(", ")
            )));
        }

        Ok(Self { columns })
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn encode(&self, record: &InputRecord) -> Vec<f64> {
        self.columns
            .iter()
            .map(|column| match column {
                Column::EnvIs(env) => f64::from(u8::from(record.env_type == *env)),
                Column::Numeric(NumericField::DistanceM) => record.distance_m,
                Column::Numeric(NumericField::NumWalls) => record.num_walls as f64,
                Column::Numeric(NumericField::HasMetal) => f64::from(record.metal_code()),
                Column::Numeric(NumericField::FrequencyMhz) => record.frequency_mhz,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::Classifier;
    use crate::record::EnvType;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const FOREST: &str = r#"{
        "name": "fixture",
        "classes": 3,
        "features": [
            { "name": "frequency_mhz" },
            { "name": "env_type", "encoding": { "one_hot": ["indoor", "rural", "urban"] } },
            { "name": "distance_m" },
            { "name": "num_walls" },
            { "name": "has_metal" }
        ],
        "trees": [
            { "Node": { "feature_idx": 3, "threshold": 0.5,
                "left": { "Leaf": { "class_label": 0 } },
                "right": { "Leaf": { "class_label": 1 } } } },
            { "Node": { "feature_idx": 0, "threshold": 2400.0,
                "left": { "Leaf": { "class_label": 1 } },
                "right": { "Leaf": { "class_label": 2 } } } },
            { "Leaf": { "class_label": 2 } }
        ]
    }"#;

    fn specs(json: &str) -> Vec<FeatureSpec> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn load_reads_forest_from_disk() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(FOREST.as_bytes()).unwrap();
        let path = temp.into_temp_path();

        let forest = ModelArtifact::load(&path).unwrap();
        assert_eq!(forest.tree_count(), 3);
        assert_eq!(forest.layout().width(), 7);

        let urban = InputRecord::new(EnvType::Urban, 100.0, 0, false, 2400.0);
        assert_eq!(forest.predict(&urban).unwrap(), 1);
    }

    #[test]
    fn missing_artifact_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("models/best_model.json");
        match ModelArtifact::load(&path) {
            Err(err @ SelectorError::ModelIo { .. }) => {
                // the io error stays in the source chain only
                assert_eq!(
                    err.to_string(),
                    format!("failed to read model artifact {}", path.display())
                );
                assert!(std::error::Error::source(&err).is_some());
            }
            other => panic!("expected ModelIo, got {other:?}"),
        }
    }

    #[test]
    fn garbage_is_a_format_error() {
        assert!(matches!(
            ModelArtifact::parse("not json"),
            Err(SelectorError::ModelFormat(_))
        ));
    }

    #[test]
    fn layout_honours_declared_order() {
        let layout = FeatureLayout::from_specs(&specs(
            r#"[{ "name": "has_metal" },
                { "name": "num_walls" },
                { "name": "env_type", "encoding": { "one_hot": ["urban", "indoor"] } },
                { "name": "frequency_mhz" },
                { "name": "distance_m" }]"#,
        ))
        .unwrap();
        let record = InputRecord::new(EnvType::Indoor, 12.0, 4, true, 900.0);
        assert_eq!(layout.encode(&record), vec![1.0, 4.0, 0.0, 1.0, 900.0, 12.0]);
    }

    #[test]
    fn layout_rejects_unknown_missing_and_duplicate_features() {
        let unknown = specs(r#"[{ "name": "humidity" }]"#);
        assert!(FeatureLayout::from_specs(&unknown).is_err());

        let missing = specs(
            r#"[{ "name": "distance_m" }, { "name": "num_walls" },
                { "name": "has_metal" }, { "name": "frequency_mhz" }]"#,
        );
        let err = FeatureLayout::from_specs(&missing).unwrap_err();
        assert!(err.to_string().contains("env_type"));

        let duplicate = specs(r#"[{ "name": "distance_m" }, { "name": "distance_m" }]"#);
        assert!(FeatureLayout::from_specs(&duplicate).is_err());
    }

    #[test]
    fn layout_rejects_repeated_categories() {
        let repeated = specs(
            r#"[{ "name": "env_type", "encoding": { "one_hot": ["urban", "rural", "urban"] } },
                { "name": "distance_m" },
                { "name": "num_walls" },
                { "name": "has_metal" },
                { "name": "frequency_mhz" }]"#,
        );
        let err = FeatureLayout::from_specs(&repeated).unwrap_err();
        assert!(err.to_string().contains("'urban' listed more than once"));
    }

    #[test]
    fn layout_rejects_mismatched_encodings() {
        let plain_env = specs(r#"[{ "name": "env_type" }]"#);
        assert!(FeatureLayout::from_specs(&plain_env).is_err());

        let encoded_distance = specs(
            r#"[{ "name": "distance_m", "encoding": { "one_hot": ["urban"] } }]"#,
        );
        assert!(FeatureLayout::from_specs(&encoded_distance).is_err());
    }

    #[test]
    fn split_past_encoded_width_is_rejected() {
        let mut artifact = ModelArtifact::parse(FOREST).unwrap();
        artifact.trees.push(TreeNode::split(
            7,
            0.0,
            TreeNode::leaf(0),
            TreeNode::leaf(1),
        ));
        let err = artifact.into_classifier().unwrap_err();
        assert!(err.to_string().contains("column 7"));
    }

    #[test]
    fn leaf_past_declared_classes_is_rejected() {
        let mut artifact = ModelArtifact::parse(FOREST).unwrap();
        artifact.trees.push(TreeNode::leaf(3));
        assert!(artifact.into_classifier().is_err());
    }

    #[test]
    fn empty_forest_is_rejected() {
        let mut artifact = ModelArtifact::parse(FOREST).unwrap();
        artifact.trees.clear();
        assert!(matches!(
            artifact.into_classifier(),
            Err(SelectorError::ModelFormat(_))
        ));
    }
}
