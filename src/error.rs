use thiserror::Error;

/// Input problems caught before any request leaves the process.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please define the model specifications first.")]
    MissingPrompt,
    #[error("Please enter your Gemini API key")]
    MissingApiKey,
    #[error("no base model generated: please generate a model from the 'Model' tab first.")]
    MissingBaseImage,
    #[error("no image at index {index} (gallery holds {len})")]
    InvalidIndex { index: usize, len: usize },
    #[error("another generation is still in progress")]
    Busy,
    #[error("image is {size} bytes, the upload limit is {limit} bytes")]
    ImageTooLarge { size: u64, limit: u64 },
}

#[derive(Debug, Error)]
pub enum StudioError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Transport or service failure; `message` is shown to the user as-is.
    #[error("{message}")]
    Api {
        status: Option<u16>,
        message: String,
    },
    #[error("No image data found in response")]
    NoImageData,
    #[error("Decode error: {0}")]
    Decode(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for StudioError {
    fn from(e: reqwest::Error) -> Self {
        StudioError::Api {
            status: e.status().map(|s| s.as_u16()),
            message: e.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, StudioError>;
