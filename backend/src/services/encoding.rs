//! Safe categorical encoding
//!
//! Every categorical value is encoded with its column's encoder. A value the
//! encoder never saw during training is replaced by the encoder's first known
//! class, and the substitution is reported as a warning. Encoding therefore
//! never fails.

use shared::{CategoricalField, EncodedRecord, UnseenValueWarning, WeatherRecord};

use crate::artifacts::{EncoderRegistry, RegisteredEncoder};

/// Code for one value, plus the warning if the fallback was used
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafeEncoding {
    pub code: u32,
    pub warning: Option<UnseenValueWarning>,
}

/// Encode `raw`, falling back to the first known class when it is unseen
pub fn safe_transform(encoder: &RegisteredEncoder, raw: &str) -> SafeEncoding {
    match encoder.encode(raw) {
        Ok(code) => SafeEncoding {
            code,
            warning: None,
        },
        Err(err) => {
            let column = encoder.field().column();
            let (substitute, code) = encoder.fallback();
            tracing::warn!(
                column,
                value = raw,
                substitute,
                error = %err,
                "Categorical value not seen during training, using first known class"
            );
            SafeEncoding {
                code,
                warning: Some(UnseenValueWarning::new(column, raw, substitute)),
            }
        }
    }
}

/// Encode all four categorical columns of a record
pub fn encode_record(
    registry: &EncoderRegistry,
    record: &WeatherRecord,
) -> (EncodedRecord, Vec<UnseenValueWarning>) {
    let mut codes = [0u32; 4];
    let mut warnings = Vec::new();

    for (slot, field) in codes.iter_mut().zip(CategoricalField::ALL) {
        let encoded = safe_transform(registry.get(field), record.categorical(field));
        *slot = encoded.code;
        warnings.extend(encoded.warning);
    }

    (EncodedRecord::new(record, codes), warnings)
}
