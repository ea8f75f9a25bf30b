pub mod bounds;
pub mod input;
pub mod summary;

pub use bounds::{advisories, parse_finite, Advisory, Field, FieldSpec};
pub use input::{EnvType, InputRecord, MetalObstruction};
pub use summary::InputSummary;
