//! Weather observation models
//!
//! A [`WeatherRecord`] is what the form submits: ten numeric measurements and
//! four raw categorical values. An [`EncodedRecord`] is the same observation
//! after the categorical values have been replaced by encoder codes, laid out
//! in the column order the classifier was trained on.

use serde::{Deserialize, Serialize};

/// Compass codes offered for the three wind direction selectors
pub const WIND_DIRECTIONS: [&str; 15] = [
    "N", "NE", "E", "SE", "S", "SW", "W", "NW", "NNW", "NNE", "ESE", "SSE", "SSW", "WSW", "WNW",
];

/// Options offered for the `RainToday` selector
pub const RAIN_TODAY_OPTIONS: [&str; 2] = ["No", "Yes"];

/// Numeric measurements collected by the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NumericField {
    MinTemp,
    MaxTemp,
    Rainfall,
    WindGustSpeed,
    WindSpeed9am,
    WindSpeed3pm,
    Humidity9am,
    Humidity3pm,
    Temp9am,
    Temp3pm,
}

impl NumericField {
    pub const ALL: [NumericField; 10] = [
        NumericField::MinTemp,
        NumericField::MaxTemp,
        NumericField::Rainfall,
        NumericField::WindGustSpeed,
        NumericField::WindSpeed9am,
        NumericField::WindSpeed3pm,
        NumericField::Humidity9am,
        NumericField::Humidity3pm,
        NumericField::Temp9am,
        NumericField::Temp3pm,
    ];

    /// Column name used by the trained model and the form
    pub fn column(&self) -> &'static str {
        match self {
            NumericField::MinTemp => "MinTemp",
            NumericField::MaxTemp => "MaxTemp",
            NumericField::Rainfall => "Rainfall",
            NumericField::WindGustSpeed => "WindGustSpeed",
            NumericField::WindSpeed9am => "WindSpeed9am",
            NumericField::WindSpeed3pm => "WindSpeed3pm",
            NumericField::Humidity9am => "Humidity9am",
            NumericField::Humidity3pm => "Humidity3pm",
            NumericField::Temp9am => "Temp9am",
            NumericField::Temp3pm => "Temp3pm",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            NumericField::MinTemp
            | NumericField::MaxTemp
            | NumericField::Temp9am
            | NumericField::Temp3pm => "°C",
            NumericField::Rainfall => "mm",
            NumericField::WindGustSpeed
            | NumericField::WindSpeed9am
            | NumericField::WindSpeed3pm => "km/h",
            NumericField::Humidity9am | NumericField::Humidity3pm => "%",
        }
    }

    /// Inclusive slider bounds as `(min, max)`
    pub fn bounds(&self) -> (f64, f64) {
        match self {
            NumericField::MinTemp
            | NumericField::MaxTemp
            | NumericField::Temp9am
            | NumericField::Temp3pm => (-20.0, 60.0),
            NumericField::Rainfall => (0.0, 400.0),
            NumericField::WindGustSpeed
            | NumericField::WindSpeed9am
            | NumericField::WindSpeed3pm => (0.0, 150.0),
            NumericField::Humidity9am | NumericField::Humidity3pm => (0.0, 100.0),
        }
    }

    /// Look up a field by its column name
    pub fn from_column(column: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.column() == column)
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

/// Categorical measurements collected by the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoricalField {
    WindGustDir,
    WindDir9am,
    WindDir3pm,
    RainToday,
}

impl CategoricalField {
    /// Order in which encoders are looked up at startup
    pub const ALL: [CategoricalField; 4] = [
        CategoricalField::WindGustDir,
        CategoricalField::WindDir9am,
        CategoricalField::WindDir3pm,
        CategoricalField::RainToday,
    ];

    pub fn column(&self) -> &'static str {
        match self {
            CategoricalField::WindGustDir => "WindGustDir",
            CategoricalField::WindDir9am => "WindDir9am",
            CategoricalField::WindDir3pm => "WindDir3pm",
            CategoricalField::RainToday => "RainToday",
        }
    }

    /// Closed option list offered by the form selector
    pub fn options(&self) -> &'static [&'static str] {
        match self {
            CategoricalField::RainToday => &RAIN_TODAY_OPTIONS,
            _ => &WIND_DIRECTIONS,
        }
    }

    pub fn from_column(column: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.column() == column)
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

/// One model input column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    Numeric(NumericField),
    Categorical(CategoricalField),
}

impl Feature {
    pub fn column(&self) -> &'static str {
        match self {
            Feature::Numeric(f) => f.column(),
            Feature::Categorical(f) => f.column(),
        }
    }
}

/// Column order the classifier was trained on
pub const FEATURE_ORDER: [Feature; 14] = [
    Feature::Numeric(NumericField::MinTemp),
    Feature::Numeric(NumericField::MaxTemp),
    Feature::Numeric(NumericField::Rainfall),
    Feature::Categorical(CategoricalField::WindGustDir),
    Feature::Numeric(NumericField::WindGustSpeed),
    Feature::Categorical(CategoricalField::WindDir9am),
    Feature::Categorical(CategoricalField::WindDir3pm),
    Feature::Numeric(NumericField::WindSpeed9am),
    Feature::Numeric(NumericField::WindSpeed3pm),
    Feature::Numeric(NumericField::Humidity9am),
    Feature::Numeric(NumericField::Humidity3pm),
    Feature::Numeric(NumericField::Temp9am),
    Feature::Numeric(NumericField::Temp3pm),
    Feature::Categorical(CategoricalField::RainToday),
];

/// Number of model input columns
pub const FEATURE_COUNT: usize = FEATURE_ORDER.len();

/// A single submitted observation, before categorical encoding
///
/// Serialized with the model's column names so the same shape is accepted by
/// the HTML form and the JSON API. Categorical values are kept as raw strings:
/// anything outside the encoder vocabulary is resolved later by the fallback
/// encoder, not rejected here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WeatherRecord {
    pub min_temp: f64,
    pub max_temp: f64,
    pub rainfall: f64,
    pub wind_gust_dir: String,
    pub wind_gust_speed: f64,
    pub wind_dir_9am: String,
    pub wind_dir_3pm: String,
    pub wind_speed_9am: f64,
    pub wind_speed_3pm: f64,
    pub humidity_9am: f64,
    pub humidity_3pm: f64,
    pub temp_9am: f64,
    pub temp_3pm: f64,
    pub rain_today: String,
}

impl Default for WeatherRecord {
    /// The untouched form: every slider at 0.0, every selector on its first option
    fn default() -> Self {
        Self {
            min_temp: 0.0,
            max_temp: 0.0,
            rainfall: 0.0,
            wind_gust_dir: WIND_DIRECTIONS[0].to_string(),
            wind_gust_speed: 0.0,
            wind_dir_9am: WIND_DIRECTIONS[0].to_string(),
            wind_dir_3pm: WIND_DIRECTIONS[0].to_string(),
            wind_speed_9am: 0.0,
            wind_speed_3pm: 0.0,
            humidity_9am: 0.0,
            humidity_3pm: 0.0,
            temp_9am: 0.0,
            temp_3pm: 0.0,
            rain_today: RAIN_TODAY_OPTIONS[0].to_string(),
        }
    }
}

impl WeatherRecord {
    pub fn numeric(&self, field: NumericField) -> f64 {
        match field {
            NumericField::MinTemp => self.min_temp,
            NumericField::MaxTemp => self.max_temp,
            NumericField::Rainfall => self.rainfall,
            NumericField::WindGustSpeed => self.wind_gust_speed,
            NumericField::WindSpeed9am => self.wind_speed_9am,
            NumericField::WindSpeed3pm => self.wind_speed_3pm,
            NumericField::Humidity9am => self.humidity_9am,
            NumericField::Humidity3pm => self.humidity_3pm,
            NumericField::Temp9am => self.temp_9am,
            NumericField::Temp3pm => self.temp_3pm,
        }
    }

    pub fn set_numeric(&mut self, field: NumericField, value: f64) {
        let slot = match field {
            NumericField::MinTemp => &mut self.min_temp,
            NumericField::MaxTemp => &mut self.max_temp,
            NumericField::Rainfall => &mut self.rainfall,
            NumericField::WindGustSpeed => &mut self.wind_gust_speed,
            NumericField::WindSpeed9am => &mut self.wind_speed_9am,
            NumericField::WindSpeed3pm => &mut self.wind_speed_3pm,
            NumericField::Humidity9am => &mut self.humidity_9am,
            NumericField::Humidity3pm => &mut self.humidity_3pm,
            NumericField::Temp9am => &mut self.temp_9am,
            NumericField::Temp3pm => &mut self.temp_3pm,
        };
        *slot = value;
    }

    pub fn categorical(&self, field: CategoricalField) -> &str {
        match field {
            CategoricalField::WindGustDir => &self.wind_gust_dir,
            CategoricalField::WindDir9am => &self.wind_dir_9am,
            CategoricalField::WindDir3pm => &self.wind_dir_3pm,
            CategoricalField::RainToday => &self.rain_today,
        }
    }

    pub fn set_categorical(&mut self, field: CategoricalField, value: impl Into<String>) {
        let slot = match field {
            CategoricalField::WindGustDir => &mut self.wind_gust_dir,
            CategoricalField::WindDir9am => &mut self.wind_dir_9am,
            CategoricalField::WindDir3pm => &mut self.wind_dir_3pm,
            CategoricalField::RainToday => &mut self.rain_today,
        };
        *slot = value.into();
    }
}

/// A weather record whose categorical fields have been replaced by codes
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedRecord {
    numeric: [f64; 10],
    codes: [u32; 4],
}

impl EncodedRecord {
    /// Combine the numeric part of `record` with the categorical `codes`,
    /// given in [`CategoricalField::ALL`] order
    pub fn new(record: &WeatherRecord, codes: [u32; 4]) -> Self {
        let mut numeric = [0.0; 10];
        for (slot, field) in numeric.iter_mut().zip(NumericField::ALL) {
            *slot = record.numeric(field);
        }
        Self { numeric, codes }
    }

    pub fn code(&self, field: CategoricalField) -> u32 {
        self.codes[field.index()]
    }

    pub fn numeric(&self, field: NumericField) -> f64 {
        self.numeric[field.index()]
    }

    /// Feature vector in [`FEATURE_ORDER`]
    pub fn features(&self) -> [f64; FEATURE_COUNT] {
        let mut out = [0.0; FEATURE_COUNT];
        for (slot, feature) in out.iter_mut().zip(FEATURE_ORDER) {
            *slot = match feature {
                Feature::Numeric(f) => self.numeric(f),
                Feature::Categorical(f) => f64::from(self.code(f)),
            };
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_columns_match_model_names() {
        let json = serde_json::to_value(WeatherRecord::default()).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), FEATURE_COUNT);
        for feature in FEATURE_ORDER {
            assert!(obj.contains_key(feature.column()), "{}", feature.column());
        }
    }

    #[test]
    fn test_default_record_is_untouched_form() {
        let record = WeatherRecord::default();
        for field in NumericField::ALL {
            assert_eq!(record.numeric(field), 0.0);
        }
        assert_eq!(record.wind_gust_dir, "N");
        assert_eq!(record.rain_today, "No");
    }

    #[test]
    fn test_features_follow_training_order() {
        let mut record = WeatherRecord::default();
        record.set_numeric(NumericField::MinTemp, 1.5);
        record.set_numeric(NumericField::Rainfall, 3.0);
        record.set_numeric(NumericField::Temp3pm, 22.4);
        let encoded = EncodedRecord::new(&record, [7, 8, 9, 1]);
        let features = encoded.features();
        assert_eq!(features[0], 1.5);
        assert_eq!(features[2], 3.0);
        assert_eq!(features[3], 7.0);
        assert_eq!(features[5], 8.0);
        assert_eq!(features[6], 9.0);
        assert_eq!(features[12], 22.4);
        assert_eq!(features[13], 1.0);
    }

    #[test]
    fn test_field_lookup() {
        assert_eq!(NumericField::from_column("Humidity3pm"), Some(NumericField::Humidity3pm));
        assert_eq!(CategoricalField::from_column("RainToday"), Some(CategoricalField::RainToday));
        assert_eq!(CategoricalField::from_column("Rainfall"), None);
        assert_eq!(CategoricalField::WindDir3pm.options().len(), 15);
    }
}
