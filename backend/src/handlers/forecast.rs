//! HTTP handlers for the forecast form and API

use axum::{
    extract::{rejection::FormRejection, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form, Json,
};
use serde::Deserialize;
use shared::{FormSchema, Language, PredictionOutcome, WeatherRecord};

use crate::error::{AppError, AppResult};
use crate::services::{Session, Submission};
use crate::views;
use crate::AppState;

/// Optional `?lang=th|en` override
#[derive(Debug, Default, Deserialize)]
pub struct LanguageQuery {
    pub lang: Option<Language>,
}

impl LanguageQuery {
    fn resolve(&self, state: &AppState) -> Language {
        self.lang.unwrap_or(state.config.presentation.language)
    }
}

fn halted_response(error: &AppError, language: Language) -> Response {
    let (status, detail) = error.detail();
    (status, Html(views::halted_page(&detail, language))).into_response()
}

/// Render the empty form, or the startup error if forecasting is halted
pub async fn show_form(
    State(state): State<AppState>,
    Query(query): Query<LanguageQuery>,
) -> Response {
    let language = query.resolve(&state);

    if let Err(err) = state.forecaster.service() {
        return halted_response(&err, language);
    }

    Html(views::form_page(
        &FormSchema::standard(),
        &WeatherRecord::default(),
        language,
        None,
    ))
    .into_response()
}

/// Handle a form submission and render the form again with the result
pub async fn submit_form(
    State(state): State<AppState>,
    Query(query): Query<LanguageQuery>,
    form: Result<Form<WeatherRecord>, FormRejection>,
) -> Response {
    let language = query.resolve(&state);

    let service = match state.forecaster.service() {
        Ok(service) => service,
        Err(err) => return halted_response(&err, language),
    };

    let record = match form {
        Ok(Form(record)) => record,
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "Rejected form submission");
            let submission = Submission {
                record: WeatherRecord::default(),
                result: Err(AppError::InvalidSubmission(rejection.body_text())),
            };
            return submission_response(&submission, language);
        }
    };

    let mut session = Session::new(language);
    let submission = match session.run(record, service) {
        Ok(submission) => submission,
        Err(err) => return err.into_response(),
    };

    submission_response(&submission, language)
}

/// The form again, pre-filled with the submitted record, plus its result
fn submission_response(submission: &Submission, language: Language) -> Response {
    let status = match &submission.result {
        Ok(_) => StatusCode::OK,
        Err(err) => err.detail().0,
    };

    let html = views::form_page(
        &FormSchema::standard(),
        &submission.record,
        language,
        Some(submission),
    );
    (status, Html(html)).into_response()
}

/// Describe the form fields
pub async fn get_form_schema() -> Json<FormSchema> {
    Json(FormSchema::standard())
}

/// Forecast from a JSON record
pub async fn predict(
    State(state): State<AppState>,
    Query(query): Query<LanguageQuery>,
    Json(record): Json<WeatherRecord>,
) -> AppResult<Json<PredictionOutcome>> {
    let language = query.resolve(&state);
    let service = state.forecaster.service()?;

    let mut session = Session::new(language);
    let submission = session.run(record, service)?;
    let outcome = submission.result?;
    Ok(Json(outcome))
}
