use crate::catalog::AntennaCatalog;
use crate::model::DEFAULT_MODEL_PATH;
use crate::prelude::{SelectorError, SelectorResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Where the front-end finds its model artifact and design images.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SelectorConfig {
    pub model_path: PathBuf,
    /// Directory the `designs/*.png` paths resolve against; working
    /// directory when unset.
    pub asset_root: Option<PathBuf>,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            asset_root: None,
        }
    }
}

impl SelectorConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> SelectorResult<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref).map_err(|err| SelectorError::Config {
            path: path_ref.to_path_buf(),
            message: err.to_string(),
        })?;
        serde_yaml::from_str(&contents).map_err(|err| SelectorError::Config {
            path: path_ref.to_path_buf(),
            message: err.to_string(),
        })
    }

    /// Starts from `path` when given, otherwise from defaults.
    pub fn resolve(path: Option<&Path>) -> SelectorResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Command-line values win over the file.
    pub fn with_overrides(
        mut self,
        model_path: Option<PathBuf>,
        asset_root: Option<PathBuf>,
    ) -> Self {
        if let Some(model_path) = model_path {
            self.model_path = model_path;
        }
        if asset_root.is_some() {
            self.asset_root = asset_root;
        }
        self
    }

    pub fn catalog(&self) -> AntennaCatalog {
        match &self.asset_root {
            Some(root) => AntennaCatalog::with_asset_root(root),
            None => AntennaCatalog::new(),
        }
    }
}
