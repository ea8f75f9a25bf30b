//! Prediction core for the fractal antenna selector.
//!
//! Turns one form submission into an antenna recommendation: the record is
//! checked against soft bounds, handed to a classifier loaded at startup, and
//! the resulting class index is resolved through a fixed design catalog.

pub mod catalog;
pub mod config;
pub mod model;
pub mod predictor;
pub mod prelude;
pub mod record;
pub mod telemetry;

pub use catalog::{AntennaCatalog, AntennaDesign, ImageStatus};
pub use config::SelectorConfig;
pub use predictor::{PredictionView, Predictor};
pub use prelude::{Classifier, SelectorError, SelectorResult};
pub use record::{EnvType, InputRecord, MetalObstruction};
