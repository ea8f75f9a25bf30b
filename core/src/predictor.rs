use crate::catalog::{AntennaCatalog, AntennaDesign, ImageStatus};
use crate::model::ModelArtifact;
use crate::prelude::{Classifier, SelectorResult};
use crate::record::{advisories, Advisory, InputRecord, InputSummary};
use crate::telemetry::{LogManager, MetricsRecorder};
use serde::Serialize;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Everything the front-end shows after one submit.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionView {
    pub record: InputRecord,
    pub design: AntennaDesign,
    pub image: ImageStatus,
    pub advisories: Vec<Advisory>,
    pub summary: InputSummary,
}

impl PredictionView {
    pub fn banner(&self) -> String {
        format!("Best Antenna: {}", self.design.name)
    }

    /// Advisory messages followed by the missing-image warning, if any.
    pub fn warnings(&self) -> Vec<String> {
        self.advisories
            .iter()
            .map(|advisory| advisory.message.clone())
            .chain(self.image.warning())
            .collect()
    }
}

impl fmt::Display for PredictionView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for advisory in &self.advisories {
            writeln!(f, "warning: {}", advisory.message)?;
        }
        writeln!(f, "{}", self.banner())?;
        match self.image.warning() {
            Some(warning) => writeln!(f, "warning: {warning}")?,
            None => writeln!(f, "{}", self.image)?,
        }
        writeln!(f)?;
        writeln!(f, "Input Summary:")?;
        write!(f, "{}", self.summary)
    }
}

/// Request handler bound to the submit action.
///
/// Holds the classifier built at startup; it is never reloaded or mutated.
pub struct Predictor {
    classifier: Arc<dyn Classifier>,
    catalog: AntennaCatalog,
    logger: LogManager,
    metrics: MetricsRecorder,
}

impl Predictor {
    pub fn new(classifier: Arc<dyn Classifier>, catalog: AntennaCatalog) -> Self {
        Self {
            classifier,
            catalog,
            logger: LogManager::new(),
            metrics: MetricsRecorder::new(),
        }
    }

    /// Loads the model artifact eagerly so a bad path fails at startup.
    pub fn from_artifact<P: AsRef<Path>>(
        model_path: P,
        catalog: AntennaCatalog,
    ) -> SelectorResult<Self> {
        let forest = ModelArtifact::load(model_path)?;
        Ok(Self::new(Arc::new(forest), catalog))
    }

    pub fn metrics(&self) -> &MetricsRecorder {
        &self.metrics
    }

    /// Runs one prediction. The record reaches the classifier unchanged
    /// whatever advisories it raises; only non-finite measurements are refused.
    pub fn submit(&self, record: &InputRecord) -> SelectorResult<PredictionView> {
        if let Err(err) = record.ensure_finite() {
            self.logger.failure(&err);
            self.metrics.record_failure();
            return Err(err);
        }
        self.logger.submission(record);
        let advisories = advisories(record);
        for advisory in &advisories {
            self.logger.advisory(advisory);
        }

        let design = match self
            .classifier
            .predict(record)
            .and_then(|class| self.catalog.lookup(class))
        {
            Ok(design) => *design,
            Err(err) => {
                self.logger.failure(&err);
                self.metrics.record_failure();
                return Err(err);
            }
        };
        self.logger.prediction(&design);

        let image = self.catalog.image_status(&design);
        self.metrics
            .record_prediction(advisories.len(), matches!(image, ImageStatus::Missing(_)));

        Ok(PredictionView {
            record: *record,
            design,
            image,
            advisories,
            summary: InputSummary::from(record),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::SelectorError;
    use crate::record::EnvType;
    use std::path::PathBuf;
    use std::sync::Mutex;

    /// Returns a fixed class and remembers what it was asked.
    struct StubClassifier {
        class: usize,
        seen: Mutex<Vec<InputRecord>>,
    }

    impl StubClassifier {
        fn returning(class: usize) -> Arc<Self> {
            Arc::new(Self {
                class,
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    impl Classifier for StubClassifier {
        fn predict(&self, record: &InputRecord) -> SelectorResult<usize> {
            self.seen.lock().unwrap().push(*record);
            Ok(self.class)
        }
    }

    fn empty_asset_root() -> (tempfile::TempDir, AntennaCatalog) {
        let dir = tempfile::tempdir().unwrap();
        let catalog = AntennaCatalog::with_asset_root(dir.path());
        (dir, catalog)
    }

    #[test]
    fn urban_reference_record_yields_koch() {
        let stub = StubClassifier::returning(1);
        let predictor = Predictor::new(stub.clone(), AntennaCatalog::new());
        let record = InputRecord::new(EnvType::Urban, 100.0, 0, false, 2400.0);

        let view = predictor.submit(&record).unwrap();
        assert_eq!(view.design.name, "Koch Fractal Antenna");
        assert_eq!(view.banner(), "Best Antenna: Koch Fractal Antenna");
        assert!(view.advisories.is_empty());
    }

    #[test]
    fn advisories_do_not_alter_the_record() {
        let stub = StubClassifier::returning(0);
        let (_dir, catalog) = empty_asset_root();
        let predictor = Predictor::new(stub.clone(), catalog);
        let record = InputRecord::new(EnvType::Indoor, 750.0, 25, true, 5200.0);

        let view = predictor.submit(&record).unwrap();
        assert_eq!(view.advisories.len(), 3);
        assert_eq!(stub.seen.lock().unwrap().as_slice(), &[record]);
        assert_eq!(view.record, record);
    }

    #[test]
    fn missing_image_warning_names_expected_path() {
        let (dir, catalog) = empty_asset_root();
        let predictor = Predictor::new(StubClassifier::returning(2), catalog);

        let view = predictor.submit(&InputRecord::default()).unwrap();
        let expected: PathBuf = dir.path().join("designs/monopole.png");
        assert_eq!(view.image, ImageStatus::Missing(expected.clone()));
        assert_eq!(
            view.warnings(),
            vec![format!("Image not found: {}", expected.display())]
        );
        assert_eq!(predictor.metrics().snapshot().missing_images, 1);
    }

    #[test]
    fn present_image_is_found() {
        let (dir, catalog) = empty_asset_root();
        std::fs::create_dir_all(dir.path().join("designs")).unwrap();
        std::fs::write(dir.path().join("designs/sierpinski.png"), b"png").unwrap();
        let predictor = Predictor::new(StubClassifier::returning(0), catalog);

        let view = predictor.submit(&InputRecord::default()).unwrap();
        assert!(matches!(view.image, ImageStatus::Found(_)));
        assert!(view.warnings().is_empty());
    }

    #[test]
    fn summary_echoes_metal_flag_as_code() {
        let predictor = Predictor::new(StubClassifier::returning(1), AntennaCatalog::new());
        let record = InputRecord::new(EnvType::Rural, 12.0, 3, true, 868.0);

        let view = predictor.submit(&record).unwrap();
        let rows: Vec<(&str, &str)> = view.summary.rows().collect();
        assert_eq!(rows[0], ("env_type", "rural"));
        assert_eq!(rows[3], ("has_metal", "1"));
        assert_eq!(rows[4], ("frequency_mhz", "868.0"));
    }

    #[test]
    fn unknown_class_surfaces_as_error() {
        let predictor = Predictor::new(StubClassifier::returning(7), AntennaCatalog::new());
        let err = predictor.submit(&InputRecord::default()).unwrap_err();
        assert!(matches!(err, SelectorError::UnknownClass(7)));
        assert_eq!(predictor.metrics().snapshot().failures, 1);
        assert_eq!(predictor.metrics().snapshot().predictions, 0);
    }

    #[test]
    fn non_finite_record_never_reaches_classifier() {
        let stub = StubClassifier::returning(1);
        let predictor = Predictor::new(stub.clone(), AntennaCatalog::new());
        let record = InputRecord::new(EnvType::Urban, f64::NAN, 0, false, f64::INFINITY);

        let err = predictor.submit(&record).unwrap_err();
        assert!(matches!(err, SelectorError::InvalidInput(_)));
        assert!(stub.seen.lock().unwrap().is_empty());
        assert_eq!(predictor.metrics().snapshot().failures, 1);
    }

    #[test]
    fn missing_model_fails_at_construction() {
        let dir = tempfile::tempdir().unwrap();
        let result = Predictor::from_artifact(dir.path().join("absent.json"), AntennaCatalog::new());
        assert!(matches!(result, Err(SelectorError::ModelIo { .. })));
    }

    #[test]
    fn report_lists_banner_warnings_and_summary() {
        let (_dir, catalog) = empty_asset_root();
        let predictor = Predictor::new(StubClassifier::returning(1), catalog);
        let record = InputRecord::new(EnvType::Urban, 600.0, 0, false, 2400.0);

        let report = predictor.submit(&record).unwrap().to_string();
        assert!(report.contains("warning: Distance beyond 500 m"));
        assert!(report.contains("Best Antenna: Koch Fractal Antenna"));
        assert!(report.contains("warning: Image not found:"));
        assert!(report.contains("Input Summary:"));
        assert!(report.contains("600.0"));
    }
}
