//! Business logic services for the rain forecast server

pub mod encoding;
pub mod prediction;
pub mod presenter;
pub mod session;

pub use encoding::{encode_record, safe_transform, SafeEncoding};
pub use prediction::{ForecastService, Predictor};
pub use presenter::{Presenter, IMAGE_ROUTE};
pub use session::{Phase, Session, SessionState, Submission};

use std::sync::Arc;

use crate::artifacts::{ArtifactError, Artifacts};
use crate::error::{AppError, AppResult};

/// Whether the server can forecast, decided once at startup
#[derive(Clone)]
pub enum Forecaster {
    Ready(Arc<ForecastService>),
    /// Artifacts failed to load; holds the user-facing reason
    Halted(Arc<str>),
}

impl Forecaster {
    pub fn from_artifacts(
        artifacts: Result<Artifacts, ArtifactError>,
        presenter: Presenter,
    ) -> Self {
        match artifacts {
            Ok(artifacts) => Forecaster::Ready(Arc::new(ForecastService::new(artifacts, presenter))),
            Err(err) => {
                tracing::error!(error = %err, "Artifacts unavailable, forecasting halted");
                Forecaster::Halted(Arc::from(err.to_string()))
            }
        }
    }

    pub fn service(&self) -> AppResult<&ForecastService> {
        match self {
            Forecaster::Ready(service) => Ok(service),
            Forecaster::Halted(reason) => Err(AppError::ArtifactsUnavailable(reason.to_string())),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Forecaster::Ready(_))
    }
}
