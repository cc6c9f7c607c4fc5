//! Prediction service: validate, encode, classify, present

use shared::{
    snap_record, validate_weather_record, EncodedRecord, Language, PredictionOutcome, RainLabel,
    WeatherRecord,
};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crate::artifacts::{Artifacts, Classifier, EncoderRegistry};
use crate::error::{AppError, AppResult};
use crate::services::encoding::encode_record;
use crate::services::presenter::Presenter;

/// Wraps the loaded classifier so that every failure, including a panic inside
/// the model, surfaces as a single prediction error
#[derive(Clone)]
pub struct Predictor {
    classifier: Arc<dyn Classifier>,
}

impl Predictor {
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self { classifier }
    }

    pub fn predict(&self, record: &EncodedRecord) -> AppResult<RainLabel> {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.classifier.predict(record)));

        match outcome {
            Ok(Ok(label)) => Ok(label),
            Ok(Err(err)) => {
                tracing::error!(error = %err, "Classifier rejected record");
                Err(AppError::Prediction(err.to_string()))
            }
            Err(_) => {
                tracing::error!("Classifier panicked");
                Err(AppError::Prediction("classifier panicked".to_string()))
            }
        }
    }
}

/// Runs one submission from raw record to presented outcome
#[derive(Clone)]
pub struct ForecastService {
    encoders: EncoderRegistry,
    predictor: Predictor,
    presenter: Presenter,
}

impl ForecastService {
    /// Create a new ForecastService from loaded artifacts
    pub fn new(artifacts: Artifacts, presenter: Presenter) -> Self {
        Self {
            encoders: artifacts.encoders,
            predictor: Predictor::new(artifacts.classifier),
            presenter,
        }
    }

    pub fn presenter(&self) -> &Presenter {
        &self.presenter
    }

    /// Forecast tomorrow's rain for one submitted record
    pub fn forecast(
        &self,
        record: &WeatherRecord,
        language: Language,
    ) -> AppResult<PredictionOutcome> {
        validate_weather_record(record)?;

        let mut record = record.clone();
        snap_record(&mut record);

        let (encoded, warnings) = encode_record(&self.encoders, &record);
        let label = self.predictor.predict(&encoded)?;
        let presentation = self.presenter.present(label, language);

        tracing::info!(
            label = %label,
            warnings = warnings.len(),
            image = presentation.image.is_some(),
            "Forecast complete"
        );

        Ok(PredictionOutcome::new(presentation, warnings))
    }
}
