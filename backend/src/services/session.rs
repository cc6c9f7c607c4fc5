//! Submission lifecycle
//!
//! `Idle -> FormFilled -> Submitted -> {Predicted | Errored} -> Idle`
//!
//! A session lives for one request. Nothing is carried over between
//! submissions; finishing a session hands back the record and its result and
//! returns the session to `Idle`.

use shared::{Language, PredictionOutcome, WeatherRecord};
use std::fmt;

use crate::error::{AppError, AppResult};
use crate::services::prediction::ForecastService;

/// Session phase without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    FormFilled,
    Submitted,
    Predicted,
    Errored,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Idle => "idle",
            Phase::FormFilled => "form filled",
            Phase::Submitted => "submitted",
            Phase::Predicted => "predicted",
            Phase::Errored => "errored",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug)]
pub enum SessionState {
    Idle,
    FormFilled(WeatherRecord),
    Submitted(WeatherRecord),
    Predicted {
        record: WeatherRecord,
        outcome: PredictionOutcome,
    },
    Errored {
        record: WeatherRecord,
        error: AppError,
    },
}

impl SessionState {
    pub fn phase(&self) -> Phase {
        match self {
            SessionState::Idle => Phase::Idle,
            SessionState::FormFilled(_) => Phase::FormFilled,
            SessionState::Submitted(_) => Phase::Submitted,
            SessionState::Predicted { .. } => Phase::Predicted,
            SessionState::Errored { .. } => Phase::Errored,
        }
    }
}

/// A finished submission: the record as entered and what came of it
#[derive(Debug)]
pub struct Submission {
    pub record: WeatherRecord,
    pub result: Result<PredictionOutcome, AppError>,
}

#[derive(Debug)]
pub struct Session {
    state: SessionState,
    language: Language,
}

impl Session {
    pub fn new(language: Language) -> Self {
        Self {
            state: SessionState::Idle,
            language,
        }
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Record the form contents. Allowed while idle or still editing.
    pub fn fill(&mut self, record: WeatherRecord) -> AppResult<()> {
        match self.phase() {
            Phase::Idle | Phase::FormFilled => {
                self.state = SessionState::FormFilled(record);
                Ok(())
            }
            phase => Err(invalid("fill the form", phase)),
        }
    }

    /// Explicit submit; only a filled form can be submitted
    pub fn submit(&mut self) -> AppResult<()> {
        match std::mem::replace(&mut self.state, SessionState::Idle) {
            SessionState::FormFilled(record) => {
                self.state = SessionState::Submitted(record);
                Ok(())
            }
            other => {
                let phase = other.phase();
                self.state = other;
                Err(invalid("submit", phase))
            }
        }
    }

    /// Run the forecast for a submitted record, ending in `Predicted` or `Errored`
    pub fn resolve(&mut self, service: &ForecastService) -> AppResult<Phase> {
        let record = match std::mem::replace(&mut self.state, SessionState::Idle) {
            SessionState::Submitted(record) => record,
            other => {
                let phase = other.phase();
                self.state = other;
                return Err(invalid("run a forecast", phase));
            }
        };

        self.state = match service.forecast(&record, self.language) {
            Ok(outcome) => SessionState::Predicted { record, outcome },
            Err(error) => {
                tracing::warn!(error = %error, "Submission failed");
                SessionState::Errored { record, error }
            }
        };

        Ok(self.phase())
    }

    /// Hand back the finished submission and return to `Idle`
    pub fn finish(&mut self) -> AppResult<Submission> {
        match std::mem::replace(&mut self.state, SessionState::Idle) {
            SessionState::Predicted { record, outcome } => Ok(Submission {
                record,
                result: Ok(outcome),
            }),
            SessionState::Errored { record, error } => Ok(Submission {
                record,
                result: Err(error),
            }),
            other => {
                let phase = other.phase();
                self.state = other;
                Err(invalid("finish", phase))
            }
        }
    }

    /// Fill, submit, resolve and finish in one go
    pub fn run(&mut self, record: WeatherRecord, service: &ForecastService) -> AppResult<Submission> {
        self.fill(record)?;
        self.submit()?;
        self.resolve(service)?;
        self.finish()
    }
}

fn invalid(action: &str, phase: Phase) -> AppError {
    AppError::InvalidStateTransition(format!("cannot {} while {}", action, phase))
}
