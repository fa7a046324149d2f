use std::env;
use std::path::PathBuf;

pub const DEFAULT_MODEL_ID: &str = "gemini-2.5-flash-image-preview";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL_NAME: &str = "Carl";
/// Uploaded reference and props images are capped at 5 MB.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct StudioConfig {
    pub api_key: Option<String>,
    pub model_id: String,
    pub base_url: String,
    pub output_dir: PathBuf,
    pub max_upload_bytes: u64,
    pub model_name: String,
}

impl Default for StudioConfig {
    fn default() -> Self {
        StudioConfig {
            api_key: None,
            model_id: DEFAULT_MODEL_ID.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            output_dir: PathBuf::from("."),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            model_name: DEFAULT_MODEL_NAME.to_string(),
        }
    }
}

impl StudioConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let defaults = Self::default();

        let api_key = env::var("GEMINI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());
        let model_id = env::var("GEMINI_MODEL").unwrap_or(defaults.model_id);
        let base_url = env::var("GEMINI_BASE_URL").unwrap_or(defaults.base_url);
        let output_dir = env::var("STUDIO_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.output_dir);
        let max_upload_bytes = env::var("STUDIO_MAX_UPLOAD_BYTES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.max_upload_bytes);
        let model_name = env::var("STUDIO_MODEL_NAME").unwrap_or(defaults.model_name);

        StudioConfig {
            api_key,
            model_id,
            base_url,
            output_dir,
            max_upload_bytes,
            model_name,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_model(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = model_id.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_max_upload_bytes(mut self, limit: u64) -> Self {
        self.max_upload_bytes = limit;
        self
    }

    pub fn with_model_name(mut self, name: impl Into<String>) -> Self {
        self.model_name = name.into();
        self
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_deref()
            .map_or(false, |key| !key.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_the_image_preview_model() {
        let config = StudioConfig::new();
        assert_eq!(config.model_id, "gemini-2.5-flash-image-preview");
        assert_eq!(config.max_upload_bytes, 5 * 1024 * 1024);
        assert_eq!(config.model_name, "Carl");
        assert!(!config.has_api_key());
    }

    #[test]
    fn builders_override_fields() {
        let config = StudioConfig::new()
            .with_api_key("  ")
            .with_base_url("http://localhost:8080/v1beta/")
            .with_output_dir("shots");
        assert!(!config.has_api_key());
        assert_eq!(config.base_url, "http://localhost:8080/v1beta");
        assert_eq!(config.output_dir, PathBuf::from("shots"));
    }
}
