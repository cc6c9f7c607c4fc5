//! Categorical encoders
//!
//! A label encoder maps each class it was fit on to its index in the learned
//! vocabulary. The registry holds one encoder per categorical column and
//! precomputes the fallback (first known class) for each.

use serde::{Deserialize, Serialize};
use shared::CategoricalField;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

use super::ArtifactError;

/// The value was not part of the vocabulary the encoder was fit on
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("y contains previously unseen label: '{0}'")]
pub struct EncodeError(pub String);

/// A fitted mapping from string labels to integer codes
pub trait CategoricalEncoder: Send + Sync {
    /// Encode a single label. Never partially succeeds.
    fn encode(&self, value: &str) -> Result<u32, EncodeError>;

    /// Full known vocabulary, in code order
    fn classes(&self) -> &[String];
}

/// Encoder whose code for a label is that label's position in `classes`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    /// Build an encoder from an explicit, ordered vocabulary
    pub fn new(classes: Vec<String>) -> Self {
        Self { classes }
    }

    /// Fit on observed labels: the vocabulary is the sorted set of distinct labels
    pub fn fit<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut classes: Vec<String> = labels.into_iter().map(Into::into).collect();
        classes.sort();
        classes.dedup();
        Self { classes }
    }
}

impl CategoricalEncoder for LabelEncoder {
    fn encode(&self, value: &str) -> Result<u32, EncodeError> {
        self.classes
            .iter()
            .position(|c| c == value)
            .map(|idx| idx as u32)
            .ok_or_else(|| EncodeError(value.to_string()))
    }

    fn classes(&self) -> &[String] {
        &self.classes
    }
}

/// An encoder bound to its column, with the fallback resolved up front
#[derive(Clone)]
pub struct RegisteredEncoder {
    field: CategoricalField,
    encoder: Arc<dyn CategoricalEncoder>,
    fallback_label: String,
    fallback_code: u32,
}

impl RegisteredEncoder {
    /// Rejects encoders with an empty or duplicated vocabulary, or whose first
    /// known class does not encode
    pub fn new(
        field: CategoricalField,
        encoder: Arc<dyn CategoricalEncoder>,
    ) -> Result<Self, ArtifactError> {
        let invalid = |reason: String| ArtifactError::InvalidEncoder {
            field: field.column().to_string(),
            reason,
        };

        let classes = encoder.classes();
        let fallback_label = classes
            .first()
            .cloned()
            .ok_or_else(|| invalid("encoder has no known classes".to_string()))?;

        for (idx, class) in classes.iter().enumerate() {
            if classes[..idx].contains(class) {
                return Err(invalid(format!("class '{}' appears more than once", class)));
            }
        }

        let fallback_code = encoder
            .encode(&fallback_label)
            .map_err(|e| invalid(format!("first known class does not encode: {}", e)))?;

        Ok(Self {
            field,
            encoder,
            fallback_label,
            fallback_code,
        })
    }

    pub fn field(&self) -> CategoricalField {
        self.field
    }

    pub fn encoder(&self) -> &dyn CategoricalEncoder {
        self.encoder.as_ref()
    }

    pub fn encode(&self, value: &str) -> Result<u32, EncodeError> {
        self.encoder.encode(value)
    }

    /// First known class and its code
    pub fn fallback(&self) -> (&str, u32) {
        (&self.fallback_label, self.fallback_code)
    }
}

/// The four required encoders, one per categorical column
#[derive(Clone)]
pub struct EncoderRegistry {
    wind_gust_dir: RegisteredEncoder,
    wind_dir_9am: RegisteredEncoder,
    wind_dir_3pm: RegisteredEncoder,
    rain_today: RegisteredEncoder,
}

impl EncoderRegistry {
    /// Pick the required encoders out of a bundle keyed by column name.
    ///
    /// Columns are checked in [`CategoricalField::ALL`] order and the first
    /// missing one is reported. Extra entries are ignored.
    pub fn from_encoders<E>(mut bundle: HashMap<String, E>) -> Result<Self, ArtifactError>
    where
        E: CategoricalEncoder + 'static,
    {
        let mut take = |field: CategoricalField| -> Result<RegisteredEncoder, ArtifactError> {
            let encoder = bundle
                .remove(field.column())
                .ok_or_else(|| ArtifactError::MissingEncoder(field.column().to_string()))?;
            RegisteredEncoder::new(field, Arc::new(encoder))
        };

        let registry = Self {
            wind_gust_dir: take(CategoricalField::WindGustDir)?,
            wind_dir_9am: take(CategoricalField::WindDir9am)?,
            wind_dir_3pm: take(CategoricalField::WindDir3pm)?,
            rain_today: take(CategoricalField::RainToday)?,
        };

        for extra in bundle.keys() {
            tracing::debug!(column = %extra, "Ignoring encoder for unused column");
        }

        Ok(registry)
    }

    pub fn get(&self, field: CategoricalField) -> &RegisteredEncoder {
        match field {
            CategoricalField::WindGustDir => &self.wind_gust_dir,
            CategoricalField::WindDir9am => &self.wind_dir_9am,
            CategoricalField::WindDir3pm => &self.wind_dir_3pm,
            CategoricalField::RainToday => &self.rain_today,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundle(skip: Option<CategoricalField>) -> HashMap<String, LabelEncoder> {
        CategoricalField::ALL
            .into_iter()
            .filter(|f| Some(*f) != skip)
            .map(|f| (f.column().to_string(), LabelEncoder::fit(f.options().iter().copied())))
            .collect()
    }

    #[test]
    fn test_fit_sorts_and_dedups() {
        let encoder = LabelEncoder::fit(["S", "N", "E", "N"]);
        assert_eq!(encoder.classes(), ["E", "N", "S"]);
        assert_eq!(encoder.encode("N"), Ok(1));
        assert_eq!(encoder.encode("W"), Err(EncodeError("W".to_string())));
    }

    #[test]
    fn test_registry_complete() {
        let registry = EncoderRegistry::from_encoders(bundle(None)).unwrap();
        let rain_today = registry.get(CategoricalField::RainToday);
        assert_eq!(rain_today.fallback(), ("No", 0));
        assert_eq!(rain_today.encode("Yes"), Ok(1));
        assert_eq!(registry.get(CategoricalField::WindGustDir).fallback(), ("E", 0));
    }

    #[test]
    fn test_registry_reports_missing_encoder() {
        for field in CategoricalField::ALL {
            let err = EncoderRegistry::from_encoders(bundle(Some(field)))
                .err()
                .unwrap();
            match err {
                ArtifactError::MissingEncoder(name) => assert_eq!(name, field.column()),
                other => panic!("unexpected error: {other}"),
            }
        }
    }

    #[test]
    fn test_empty_vocabulary_rejected() {
        let mut encoders = bundle(None);
        encoders.insert("RainToday".to_string(), LabelEncoder::new(Vec::new()));
        let err = EncoderRegistry::from_encoders(encoders).err().unwrap();
        assert!(matches!(err, ArtifactError::InvalidEncoder { ref field, .. } if field == "RainToday"));
    }

    #[test]
    fn test_duplicate_vocabulary_rejected() {
        let mut encoders = bundle(None);
        encoders.insert(
            "WindDir9am".to_string(),
            LabelEncoder::new(vec!["N".to_string(), "S".to_string(), "N".to_string()]),
        );
        let err = EncoderRegistry::from_encoders(encoders).err().unwrap();
        assert!(err.to_string().contains("more than once"));
    }
}
