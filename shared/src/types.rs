//! Common types used across the forecast form

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{CategoricalField, NumericField};

/// Supported languages
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    #[serde(alias = "th")]
    Thai,
    #[serde(alias = "en")]
    English,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::Thai => "th",
            Language::English => "en",
        }
    }
}

/// Slider definition for one numeric field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NumericFieldSpec {
    pub field: NumericField,
    pub name: String,
    pub label: String,
    pub unit: String,
    pub min: Decimal,
    pub max: Decimal,
    pub step: Decimal,
    pub default: Decimal,
}

impl NumericFieldSpec {
    pub fn for_field(field: NumericField) -> Self {
        let (min, max) = field.bounds();
        Self {
            field,
            name: field.column().to_string(),
            label: format!("{} ({})", field.column(), field.unit()),
            unit: field.unit().to_string(),
            min: Decimal::try_from(min).unwrap_or_default(),
            max: Decimal::try_from(max).unwrap_or_default(),
            step: Decimal::new(1, 1),
            default: Decimal::ZERO,
        }
    }
}

/// Selector definition for one categorical field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoricalFieldSpec {
    pub field: CategoricalField,
    pub name: String,
    pub options: Vec<String>,
    pub default: String,
}

impl CategoricalFieldSpec {
    pub fn for_field(field: CategoricalField) -> Self {
        let options: Vec<String> = field.options().iter().map(|o| o.to_string()).collect();
        Self {
            field,
            name: field.column().to_string(),
            default: options.first().cloned().unwrap_or_default(),
            options,
        }
    }
}

/// The complete input form: ten sliders and four selectors
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FormSchema {
    pub numeric: Vec<NumericFieldSpec>,
    pub categorical: Vec<CategoricalFieldSpec>,
}

impl FormSchema {
    pub fn standard() -> Self {
        Self {
            numeric: NumericField::ALL
                .into_iter()
                .map(NumericFieldSpec::for_field)
                .collect(),
            categorical: CategoricalField::ALL
                .into_iter()
                .map(CategoricalFieldSpec::for_field)
                .collect(),
        }
    }

    pub fn numeric_spec(&self, field: NumericField) -> Option<&NumericFieldSpec> {
        self.numeric.iter().find(|s| s.field == field)
    }
}

impl Default for FormSchema {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_schema_shape() {
        let schema = FormSchema::standard();
        assert_eq!(schema.numeric.len(), 10);
        assert_eq!(schema.categorical.len(), 4);
        for spec in &schema.numeric {
            assert_eq!(spec.default, Decimal::ZERO);
            assert_eq!(spec.step, Decimal::new(1, 1));
            assert!(spec.min <= spec.default && spec.default <= spec.max);
        }
    }

    #[test]
    fn test_rainfall_bounds() {
        let schema = FormSchema::standard();
        let spec = schema.numeric_spec(NumericField::Rainfall).unwrap();
        assert_eq!(spec.min, Decimal::ZERO);
        assert_eq!(spec.max, Decimal::from(400));
        assert_eq!(spec.label, "Rainfall (mm)");
    }

    #[test]
    fn test_language_aliases() {
        let en: Language = serde_json::from_str("\"en\"").unwrap();
        let th: Language = serde_json::from_str("\"thai\"").unwrap();
        assert_eq!(en, Language::English);
        assert_eq!(th, Language::Thai);
        assert_eq!(Language::default().code(), "th");
    }
}
