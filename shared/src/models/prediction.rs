//! Prediction outcome models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::types::Language;

/// Binary classifier output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RainLabel {
    /// Class 0
    NoRain,
    /// Class 1
    Rain,
}

impl RainLabel {
    /// Map a raw class value onto a label; anything other than 0 or 1 is rejected
    pub fn from_class(class: i64) -> Option<Self> {
        match class {
            0 => Some(RainLabel::NoRain),
            1 => Some(RainLabel::Rain),
            _ => None,
        }
    }

    pub fn class(&self) -> u8 {
        match self {
            RainLabel::NoRain => 0,
            RainLabel::Rain => 1,
        }
    }

    /// Result message shown to the user
    pub fn message(&self, language: &Language) -> &'static str {
        match (self, language) {
            (RainLabel::Rain, Language::Thai) => "พรุ่งนี้จะมีฝน",
            (RainLabel::Rain, Language::English) => "It will rain tomorrow",
            (RainLabel::NoRain, Language::Thai) => "พรุ่งนี้จะไม่มีฝน",
            (RainLabel::NoRain, Language::English) => "It will not rain tomorrow",
        }
    }

    pub fn caption(&self) -> &'static str {
        match self {
            RainLabel::Rain => "Sad! ☔",
            RainLabel::NoRain => "Yay! 🌤️",
        }
    }

    /// Warning shown when this label's image is not on disk
    pub fn missing_image_warning(&self) -> &'static str {
        match self {
            RainLabel::Rain => "Image for 'Rain' not found.",
            RainLabel::NoRain => "Image for 'No Rain' not found.",
        }
    }
}

impl fmt::Display for RainLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RainLabel::Rain => write!(f, "Rain"),
            RainLabel::NoRain => write!(f, "No Rain"),
        }
    }
}

/// A categorical value that the encoder never saw during training
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnseenValueWarning {
    pub field: String,
    pub value: String,
    /// First known class substituted for `value`
    pub substituted: String,
    pub message: String,
}

impl UnseenValueWarning {
    pub fn new(field: &str, value: &str, substituted: &str) -> Self {
        Self {
            field: field.to_string(),
            value: value.to_string(),
            substituted: substituted.to_string(),
            message: format!(
                "Warning: The value '{}' for column '{}' was not seen during training.",
                value, field
            ),
        }
    }
}

/// Image shown alongside a result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultImage {
    pub url: String,
    pub caption: String,
}

/// What the user sees for a label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Presentation {
    pub label: RainLabel,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ResultImage>,
    /// Set instead of `image` when the image resource is missing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_resource: Option<String>,
}

/// Complete result of one submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionOutcome {
    pub id: Uuid,
    pub label: RainLabel,
    pub presentation: Presentation,
    pub warnings: Vec<UnseenValueWarning>,
    pub predicted_at: DateTime<Utc>,
}

impl PredictionOutcome {
    pub fn new(presentation: Presentation, warnings: Vec<UnseenValueWarning>) -> Self {
        Self {
            id: Uuid::new_v4(),
            label: presentation.label,
            presentation,
            warnings,
            predicted_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_from_class() {
        assert_eq!(RainLabel::from_class(0), Some(RainLabel::NoRain));
        assert_eq!(RainLabel::from_class(1), Some(RainLabel::Rain));
        assert_eq!(RainLabel::from_class(2), None);
        assert_eq!(RainLabel::from_class(-1), None);
    }

    #[test]
    fn test_unseen_warning_names_field_and_value() {
        let warning = UnseenValueWarning::new("WindGustDir", "XX", "E");
        assert!(warning.message.contains("'XX'"));
        assert!(warning.message.contains("'WindGustDir'"));
        assert_eq!(warning.substituted, "E");
    }

    #[test]
    fn test_label_messages() {
        assert_eq!(RainLabel::Rain.message(&Language::Thai), "พรุ่งนี้จะมีฝน");
        assert_eq!(RainLabel::NoRain.message(&Language::Thai), "พรุ่งนี้จะไม่มีฝน");
        assert_eq!(RainLabel::Rain.to_string(), "Rain");
    }
}
