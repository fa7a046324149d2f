pub mod wire;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use uuid::Uuid;

use crate::{
    config::StudioConfig,
    error::{Result, StudioError},
    models::{GenerationRequest, ImageData},
};
use wire::{ErrorResponse, GenerateContentRequest};

pub use wire::GenerateContentResponse;

/// Something that turns request content into one image.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate(&self, api_key: &str, request: &GenerationRequest) -> Result<ImageData>;
}

#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
    model_id: String,
}

impl GeminiClient {
    pub fn new(config: &StudioConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model_id: config.model_id.clone(),
        }
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model_id)
    }

    /// Sends one `generateContent` call and returns the decoded body.
    pub async fn generate_content(
        &self,
        api_key: &str,
        request: &GenerationRequest,
    ) -> Result<GenerateContentResponse> {
        let request_id = Uuid::new_v4();
        let payload = GenerateContentRequest::from(request);

        log::info!(
            "Generating image with model {} [req:{}]",
            self.model_id,
            request_id
        );
        log::debug!(
            "Request carries {} reference image(s), prompt: {:?} [req:{}]",
            request.images().count(),
            request.prompt().unwrap_or_default(),
            request_id
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                log::error!("Request failed [req:{}]: {}", request_id, e);
                StudioError::from(e)
            })?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let error = api_error(status, body);
            log::error!("Gemini returned {} [req:{}]: {}", status, request_id, error);
            return Err(error);
        }

        serde_json::from_str(&body).map_err(|e| {
            log::error!("Unreadable response [req:{}]: {}", request_id, e);
            StudioError::Serialization(e.to_string())
        })
    }
}

#[async_trait]
impl ImageGenerator for GeminiClient {
    async fn generate(&self, api_key: &str, request: &GenerationRequest) -> Result<ImageData> {
        let response = self.generate_content(api_key, request).await?;
        image_from_response(&response)
    }
}

/// Maps a non-2xx reply to an API error, keeping the service's own message
/// when the body carries one.
fn api_error(status: StatusCode, body: String) -> StudioError {
    let message = match serde_json::from_str::<ErrorResponse>(&body) {
        Ok(error) => error.error.message,
        Err(_) if body.trim().is_empty() => format!("HTTP {}", status),
        Err(_) => body,
    };
    StudioError::Api {
        status: Some(status.as_u16()),
        message,
    }
}

/// The first image of a successful reply, or `NoImageData` when the model
/// answered with text only or the prompt was blocked.
fn image_from_response(response: &GenerateContentResponse) -> Result<ImageData> {
    match response.first_image()? {
        Some(image) => {
            log::debug!("Received {} ({} bytes)", image.mime_type, image.len());
            Ok(image)
        }
        None => {
            if let Some(reason) = response.block_reason() {
                log::warn!("Prompt blocked: {}", reason);
            }
            let text = response.text();
            if !text.is_empty() {
                log::warn!("Model answered with text only: {}", text);
            }
            Err(StudioError::NoImageData)
        }
    }
}
