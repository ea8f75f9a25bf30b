use antennacore::{InputRecord, PredictionView, Predictor, SelectorConfig};
use anyhow::Context;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Loads the classifier once and answers prediction requests.
pub struct Runner {
    predictor: Predictor,
}

impl Runner {
    pub fn new(config: &SelectorConfig) -> anyhow::Result<Self> {
        let predictor = Predictor::from_artifact(&config.model_path, config.catalog())
            .with_context(|| {
                format!("loading model artifact {}", config.model_path.display())
            })?;
        Ok(Self { predictor })
    }

    pub fn execute(&self, record: &InputRecord) -> anyhow::Result<PredictionView> {
        self.predictor
            .submit(record)
            .context("resolving predicted antenna")
    }

    #[cfg(test)]
    pub fn predictor(&self) -> &Predictor {
        &self.predictor
    }

    /// Appends one JSON line per prediction.
    pub fn append_report(&self, view: &PredictionView, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating report directory {}", parent.display()))?;
            }
        }
        let line = serde_json::to_string(view).context("serializing prediction report")?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening report {}", path.display()))?;
        writeln!(file, "{line}")?;
        Ok(())
    }
}
