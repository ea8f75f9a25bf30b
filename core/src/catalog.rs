use crate::prelude::{SelectorError, SelectorResult};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Antenna design a class index stands for.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct AntennaDesign {
    pub class: usize,
    pub name: &'static str,
    /// Relative to the catalog's asset root.
    pub image: &'static str,
}

pub const DESIGNS: [AntennaDesign; 3] = [
    AntennaDesign {
        class: 0,
        name: "Sierpinski Fractal Antenna",
        image: "designs/sierpinski.png",
    },
    AntennaDesign {
        class: 1,
        name: "Koch Fractal Antenna",
        image: "designs/koch.png",
    },
    AntennaDesign {
        class: 2,
        name: "Monopole Antenna",
        image: "designs/monopole.png",
    },
];

/// Whether a design's image could be found on disk.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub enum ImageStatus {
    Found(PathBuf),
    Missing(PathBuf),
}

impl ImageStatus {
    pub fn path(&self) -> &Path {
        match self {
            ImageStatus::Found(path) | ImageStatus::Missing(path) => path,
        }
    }

    /// Warning text for a missing image, `None` when it exists.
    pub fn warning(&self) -> Option<String> {
        match self {
            ImageStatus::Found(_) => None,
            ImageStatus::Missing(path) => Some(format!("Image not found: {}", path.display())),
        }
    }
}

impl fmt::Display for ImageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageStatus::Found(path) => write!(f, "Image: {}", path.display()),
            ImageStatus::Missing(path) => write!(f, "Image not found: {}", path.display()),
        }
    }
}

/// Fixed class-index table plus the directory image paths resolve against.
#[derive(Debug, Clone, Default)]
pub struct AntennaCatalog {
    asset_root: PathBuf,
}

impl AntennaCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves image paths under `root` instead of the working directory.
    pub fn with_asset_root<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            asset_root: root.into(),
        }
    }

    pub fn lookup(&self, class: usize) -> SelectorResult<&'static AntennaDesign> {
        DESIGNS
            .iter()
            .find(|design| design.class == class)
            .ok_or(SelectorError::UnknownClass(class))
    }

    pub fn image_path(&self, design: &AntennaDesign) -> PathBuf {
        self.asset_root.join(design.image)
    }

    pub fn image_status(&self, design: &AntennaDesign) -> ImageStatus {
        let path = self.image_path(design);
        if path.exists() {
            ImageStatus::Found(path)
        } else {
            ImageStatus::Missing(path)
        }
    }
}
