//! WebAssembly module for the Rain Forecast form
//!
//! Provides client-side helpers for:
//! - Rendering the form from its schema
//! - Snapping slider values to their step
//! - Validating a record before it is submitted

use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

/// Form schema (sliders and selectors) as JSON
#[wasm_bindgen]
pub fn form_schema_json() -> Result<String, JsValue> {
    serde_json::to_string(&FormSchema::standard())
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize form schema: {}", e)))
}

/// Check a record's numeric fields before submission
#[wasm_bindgen]
pub fn validate_record_json(record_json: &str) -> Result<(), JsValue> {
    let record: WeatherRecord = serde_json::from_str(record_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid record JSON: {}", e)))?;

    validate_weather_record(&record).map_err(|violation| JsValue::from_str(&violation.to_string()))
}

/// Snap a slider value to the 0.1 grid within the column's bounds
#[wasm_bindgen]
pub fn snap_numeric(column: &str, value: f64) -> Result<f64, JsValue> {
    let field = NumericField::from_column(column)
        .ok_or_else(|| JsValue::from_str(&format!("Unknown numeric column: {}", column)))?;
    Ok(snap_to_step(value, &NumericFieldSpec::for_field(field)))
}

/// Whether the selector for `column` offers `value`
#[wasm_bindgen]
pub fn is_offered_option(column: &str, value: &str) -> bool {
    CategoricalField::from_column(column)
        .map(|field| is_declared_option(field, value))
        .unwrap_or(false)
}

/// Result message for a class label (0 = no rain, 1 = rain)
#[wasm_bindgen]
pub fn rain_message(class: i32, language: &str) -> Option<String> {
    let language = match language {
        "en" | "english" => Language::English,
        _ => Language::Thai,
    };
    RainLabel::from_class(i64::from(class)).map(|label| label.message(&language).to_string())
}
