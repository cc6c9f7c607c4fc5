//! Validation utilities for the forecast form

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

use crate::models::{CategoricalField, NumericField, WeatherRecord};
use crate::types::NumericFieldSpec;

/// A numeric value the form would never have produced
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{}: {}", .field.column(), .message)]
pub struct FieldViolation {
    pub field: NumericField,
    pub message: String,
}

// ============================================================================
// Record Validations
// ============================================================================

/// Validate that every numeric field is finite and within its slider bounds
pub fn validate_weather_record(record: &WeatherRecord) -> Result<(), FieldViolation> {
    for field in NumericField::ALL {
        let value = record.numeric(field);
        if !value.is_finite() {
            return Err(FieldViolation {
                field,
                message: "value must be a finite number".to_string(),
            });
        }
        let (min, max) = field.bounds();
        if value < min || value > max {
            return Err(FieldViolation {
                field,
                message: format!("value must be between {:.1} and {:.1}", min, max),
            });
        }
    }

    Ok(())
}

/// Whether `value` is one of the options the form offers for `field`
pub fn is_declared_option(field: CategoricalField, value: &str) -> bool {
    field.options().contains(&value)
}

// ============================================================================
// Slider Helpers
// ============================================================================

/// Snap a slider value onto its step grid, clamped to the slider bounds
///
/// Uses decimal arithmetic so `0.1` steps land exactly (e.g. `21.34 -> 21.3`).
pub fn snap_to_step(value: f64, spec: &NumericFieldSpec) -> f64 {
    let Ok(decimal) = Decimal::try_from(value) else {
        return spec.default.to_f64().unwrap_or(0.0);
    };
    let clamped = decimal.clamp(spec.min, spec.max);
    if spec.step.is_zero() {
        return clamped.to_f64().unwrap_or(0.0);
    }
    // Half steps round up, matching a browser range input
    let steps = ((clamped - spec.min) / spec.step)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let snapped = (spec.min + steps * spec.step).clamp(spec.min, spec.max);
    snapped.normalize().to_f64().unwrap_or(0.0)
}

/// Snap every numeric field of a record onto its step grid
pub fn snap_record(record: &mut WeatherRecord) {
    for field in NumericField::ALL {
        let spec = NumericFieldSpec::for_field(field);
        let snapped = snap_to_step(record.numeric(field), &spec);
        record.set_numeric(field, snapped);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_record_is_valid() {
        assert!(validate_weather_record(&WeatherRecord::default()).is_ok());
    }

    #[test]
    fn test_out_of_range_names_field() {
        let mut record = WeatherRecord::default();
        record.humidity_3pm = 120.0;
        let err = validate_weather_record(&record).unwrap_err();
        assert_eq!(err.field, NumericField::Humidity3pm);
        assert!(err.to_string().starts_with("Humidity3pm"));
    }

    #[test]
    fn test_first_violation_in_column_order() {
        let mut record = WeatherRecord::default();
        record.temp_3pm = 99.0;
        record.rainfall = -1.0;
        let err = validate_weather_record(&record).unwrap_err();
        assert_eq!(err.field, NumericField::Rainfall);
    }

    #[test]
    fn test_non_finite_rejected() {
        let mut record = WeatherRecord::default();
        record.wind_gust_speed = f64::NAN;
        let err = validate_weather_record(&record).unwrap_err();
        assert_eq!(err.field, NumericField::WindGustSpeed);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let mut record = WeatherRecord::default();
        record.min_temp = -20.0;
        record.max_temp = 60.0;
        record.rainfall = 400.0;
        assert!(validate_weather_record(&record).is_ok());
    }

    #[test]
    fn test_snap_to_step() {
        let spec = NumericFieldSpec::for_field(NumericField::Temp9am);
        assert_eq!(snap_to_step(21.34, &spec), 21.3);
        assert_eq!(snap_to_step(21.36, &spec), 21.4);
        assert_eq!(snap_to_step(-25.0, &spec), -20.0);
        assert_eq!(snap_to_step(75.0, &spec), 60.0);
    }

    #[test]
    fn test_half_step_rounds_up() {
        let rainfall = NumericFieldSpec::for_field(NumericField::Rainfall);
        assert_eq!(snap_to_step(0.25, &rainfall), 0.3);
        assert_eq!(snap_to_step(0.35, &rainfall), 0.4);
        assert_eq!(snap_to_step(12.25, &rainfall), 12.3);

        // Steps count from the slider minimum, so negative temperatures round up too
        let temp = NumericFieldSpec::for_field(NumericField::MinTemp);
        assert_eq!(snap_to_step(-3.25, &temp), -3.2);
    }

    #[test]
    fn test_declared_options() {
        assert!(is_declared_option(CategoricalField::WindGustDir, "WNW"));
        assert!(!is_declared_option(CategoricalField::WindGustDir, "ENE"));
        assert!(is_declared_option(CategoricalField::RainToday, "Yes"));
        assert!(!is_declared_option(CategoricalField::RainToday, "yes"));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Snapped values always stay on the slider
            #[test]
            fn snapped_value_within_bounds(value in -1000.0f64..1000.0) {
                for field in NumericField::ALL {
                    let spec = NumericFieldSpec::for_field(field);
                    let (min, max) = field.bounds();
                    let snapped = snap_to_step(value, &spec);
                    prop_assert!(snapped >= min && snapped <= max);
                }
            }

            /// A snapped record always passes validation
            #[test]
            fn snapped_record_is_valid(value in -1000.0f64..1000.0) {
                let mut record = WeatherRecord::default();
                for field in NumericField::ALL {
                    record.set_numeric(field, value);
                }
                snap_record(&mut record);
                prop_assert!(validate_weather_record(&record).is_ok());
            }
        }
    }
}
