use super::image::ImageData;

/// One element of a generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    InlineData(ImageData),
    Text(String),
}

impl Part {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Part::Text(text) => Some(text),
            Part::InlineData(_) => None,
        }
    }

    pub fn as_image(&self) -> Option<&ImageData> {
        match self {
            Part::InlineData(image) => Some(image),
            Part::Text(_) => None,
        }
    }
}

/// Ordered request content. The endpoint is position-sensitive: reference
/// images precede the text part.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationRequest {
    pub parts: Vec<Part>,
}

impl GenerationRequest {
    pub fn new(parts: Vec<Part>) -> Self {
        Self { parts }
    }

    /// The text of the last text part, if any.
    pub fn prompt(&self) -> Option<&str> {
        self.parts.iter().rev().find_map(Part::as_text)
    }

    pub fn images(&self) -> impl Iterator<Item = &ImageData> {
        self.parts.iter().filter_map(Part::as_image)
    }
}
