use crate::catalog::AntennaDesign;
use crate::prelude::SelectorError;
use crate::record::{Advisory, InputRecord};
use log::{error, info, warn};

/// Routes prediction lifecycle events to the `log` facade.
pub struct LogManager;

impl LogManager {
    pub fn new() -> Self {
        Self
    }

    pub fn submission(&self, record: &InputRecord) {
        info!(
            "predict env={} distance_m={} num_walls={} has_metal={} frequency_mhz={}",
            record.env_type,
            record.distance_m,
            record.num_walls,
            record.metal_code(),
            record.frequency_mhz
        );
    }

    pub fn advisory(&self, advisory: &Advisory) {
        warn!("{:?}: {}", advisory.field, advisory.message);
    }

    pub fn prediction(&self, design: &AntennaDesign) {
        info!("class {} -> {}", design.class, design.name);
    }

    pub fn failure(&self, err: &SelectorError) {
        error!("prediction failed: {}", err);
    }
}

impl Default for LogManager {
    fn default() -> Self {
        Self::new()
    }
}
