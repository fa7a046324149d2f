pub mod codec;
pub mod config;
pub mod download;
pub mod error;
pub mod gemini;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod prompt;
pub mod request;
pub mod session;
pub mod studio;

#[cfg(test)]
pub(crate) mod testing;

pub use config::StudioConfig;
pub use error::{Result, StudioError, ValidationError};
pub use gemini::{GeminiClient, ImageGenerator};
pub use models::{
    GenerationRequest, ImageData, ModelAttribute, ModelSpec, Part, StudioSpec,
};
pub use orchestrator::{generate_batch, regenerate, RegenerationPlan, ShotPlan};
pub use session::{AppState, Effect, Event, ImageRef, Tab};
pub use studio::Studio;
