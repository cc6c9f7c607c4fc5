//! Fixtures shared by the backend integration tests

#![allow(dead_code)]

use rain_forecast_backend::artifacts::{
    Artifacts, DecisionTree, EncoderRegistry, LabelEncoder, RandomForest, TreeNode,
};
use rain_forecast_backend::config::{ArtifactsConfig, PresentationConfig};
use rain_forecast_backend::services::{ForecastService, Presenter};
use shared::{CategoricalField, Feature, FEATURE_ORDER};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use uuid::Uuid;

/// Wind direction vocabulary as the training data produced it (sorted, includes ENE)
pub const TRAINED_WIND_CLASSES: [&str; 16] = [
    "E", "ENE", "ESE", "N", "NE", "NNE", "NNW", "NW", "S", "SE", "SSE", "SSW", "SW", "W", "WNW",
    "WSW",
];

pub fn feature_index(feature: Feature) -> usize {
    FEATURE_ORDER
        .iter()
        .position(|f| *f == feature)
        .expect("feature in column order")
}

/// Encoders fit the way the training pipeline fit them
pub fn label_encoders() -> HashMap<String, LabelEncoder> {
    CategoricalField::ALL
        .into_iter()
        .map(|field| {
            let encoder = match field {
                CategoricalField::RainToday => LabelEncoder::fit(["No", "Yes"]),
                _ => LabelEncoder::fit(TRAINED_WIND_CLASSES),
            };
            (field.column().to_string(), encoder)
        })
        .collect()
}

/// Three small trees over humidity, rainfall and RainToday
pub fn sample_forest() -> RandomForest {
    use shared::{CategoricalField as C, NumericField as N};

    let humidity_3pm = feature_index(Feature::Numeric(N::Humidity3pm));
    let humidity_9am = feature_index(Feature::Numeric(N::Humidity9am));
    let rainfall = feature_index(Feature::Numeric(N::Rainfall));
    let gust_speed = feature_index(Feature::Numeric(N::WindGustSpeed));
    let rain_today = feature_index(Feature::Categorical(C::RainToday));

    RandomForest::new(
        vec![0, 1],
        vec![
            DecisionTree::new(vec![
                TreeNode::split(humidity_3pm, 65.0, 1, 2),
                TreeNode::leaf(vec![80.0, 20.0]),
                TreeNode::split(rain_today, 0.5, 3, 4),
                TreeNode::leaf(vec![35.0, 65.0]),
                TreeNode::leaf(vec![15.0, 85.0]),
            ]),
            DecisionTree::new(vec![
                TreeNode::split(rainfall, 1.2, 1, 4),
                TreeNode::split(gust_speed, 48.5, 2, 3),
                TreeNode::leaf(vec![90.0, 10.0]),
                TreeNode::leaf(vec![55.0, 45.0]),
                TreeNode::leaf(vec![30.0, 70.0]),
            ]),
            DecisionTree::new(vec![
                TreeNode::split(humidity_9am, 80.0, 1, 2),
                TreeNode::leaf(vec![75.0, 25.0]),
                TreeNode::leaf(vec![25.0, 75.0]),
            ]),
        ],
    )
}

pub fn sample_artifacts() -> Artifacts {
    let encoders = EncoderRegistry::from_encoders(label_encoders()).expect("complete encoders");
    Artifacts::new(Arc::new(sample_forest()), encoders)
}

/// Scratch directory under the system temp dir, removed on drop
pub struct TempDir(PathBuf);

impl TempDir {
    pub fn new() -> Self {
        let path = std::env::temp_dir().join(format!("rain-forecast-{}", Uuid::new_v4()));
        std::fs::create_dir_all(&path).expect("create temp dir");
        Self(path)
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    pub fn write(&self, name: &str, contents: &[u8]) -> PathBuf {
        let path = self.0.join(name);
        std::fs::write(&path, contents).expect("write temp file");
        path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}

/// Write the sample forest and encoders as JSON artifacts
pub fn write_artifacts(dir: &TempDir) -> ArtifactsConfig {
    let model = serde_json::to_vec(&sample_forest()).expect("serialize forest");
    let encoders = serde_json::to_vec(&label_encoders()).expect("serialize encoders");
    ArtifactsConfig {
        model_path: dir.write("randforest.json", &model),
        encoders_path: dir.write("label_encoders.json", &encoders),
    }
}

/// Presentation config pointing at `dir`, with both result images present
pub fn presentation_with_images(dir: &TempDir) -> PresentationConfig {
    let config = PresentationConfig {
        image_dir: dir.path().to_path_buf(),
        ..PresentationConfig::default()
    };
    dir.write(&config.rain_image, b"rain");
    dir.write(&config.no_rain_image, b"sun");
    config
}

pub fn service(presentation: &PresentationConfig) -> ForecastService {
    ForecastService::new(sample_artifacts(), Presenter::new(presentation))
}
