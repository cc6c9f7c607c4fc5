//! Result presentation
//!
//! Picks the message and image for a label. A missing image only downgrades
//! the result to a warning; it never changes the label.

use shared::{Language, Presentation, RainLabel, ResultImage};
use std::path::PathBuf;

use crate::config::PresentationConfig;

/// Route the image directory is served under
pub const IMAGE_ROUTE: &str = "/picture";

#[derive(Debug, Clone)]
pub struct Presenter {
    image_dir: PathBuf,
    rain_image: String,
    no_rain_image: String,
}

impl Presenter {
    pub fn new(config: &PresentationConfig) -> Self {
        Self {
            image_dir: config.image_dir.clone(),
            rain_image: config.rain_image.clone(),
            no_rain_image: config.no_rain_image.clone(),
        }
    }

    pub fn image_file(&self, label: RainLabel) -> &str {
        match label {
            RainLabel::Rain => &self.rain_image,
            RainLabel::NoRain => &self.no_rain_image,
        }
    }

    pub fn image_path(&self, label: RainLabel) -> PathBuf {
        self.image_dir.join(self.image_file(label))
    }

    pub fn present(&self, label: RainLabel, language: Language) -> Presentation {
        let message = label.message(&language).to_string();
        let path = self.image_path(label);

        if path.is_file() {
            Presentation {
                label,
                message,
                image: Some(ResultImage {
                    url: format!("{}/{}", IMAGE_ROUTE, self.image_file(label)),
                    caption: label.caption().to_string(),
                }),
                missing_resource: None,
            }
        } else {
            tracing::warn!(path = %path.display(), label = %label, "Result image not found");
            Presentation {
                label,
                message,
                image: None,
                missing_resource: Some(label.missing_image_warning().to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn presenter_in(dir: PathBuf) -> Presenter {
        Presenter::new(&PresentationConfig {
            image_dir: dir,
            ..PresentationConfig::default()
        })
    }

    #[test]
    fn test_missing_image_becomes_warning() {
        let dir = std::env::temp_dir().join(format!("rain-forecast-{}", Uuid::new_v4()));
        let presentation = presenter_in(dir).present(RainLabel::Rain, Language::Thai);
        assert_eq!(presentation.message, "พรุ่งนี้จะมีฝน");
        assert!(presentation.image.is_none());
        assert_eq!(
            presentation.missing_resource.as_deref(),
            Some("Image for 'Rain' not found.")
        );
    }

    #[test]
    fn test_existing_image_is_linked() {
        let dir = std::env::temp_dir().join(format!("rain-forecast-{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("yay.jpg"), b"jpg").unwrap();

        let presentation = presenter_in(dir.clone()).present(RainLabel::NoRain, Language::English);
        assert_eq!(presentation.message, "It will not rain tomorrow");
        let image = presentation.image.unwrap();
        assert_eq!(image.url, "/picture/yay.jpg");
        assert_eq!(image.caption, "Yay! 🌤️");
        assert!(presentation.missing_resource.is_none());

        std::fs::remove_dir_all(dir).ok();
    }
}
