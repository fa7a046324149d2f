//! Assembly of request content from prompts and reference images.

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::models::{GenerationRequest, ImageData, Part};

/// Pose modifiers; each photoshoot shot draws one at random.
pub const POSES: [&str; 8] = [
    "in a different pose",
    "smiling",
    "looking away from the camera",
    "with hands in pockets",
    "leaning against something",
    "sitting down",
    "walking",
    "laughing",
];

/// A prompt-only request.
pub fn text_request(prompt: impl Into<String>) -> GenerationRequest {
    GenerationRequest::new(vec![Part::Text(prompt.into())])
}

/// `[base] [props] text`, skipping absent images.
pub fn build_request(
    base: Option<&ImageData>,
    props: Option<&ImageData>,
    text: impl Into<String>,
) -> GenerationRequest {
    let mut parts = Vec::with_capacity(3);
    if let Some(base) = base {
        parts.push(Part::InlineData(base.clone()));
    }
    if let Some(props) = props {
        parts.push(Part::InlineData(props.clone()));
    }
    parts.push(Part::Text(text.into()));
    GenerationRequest::new(parts)
}

pub fn pick_pose<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    // POSES is non-empty, so choose always yields.
    POSES.choose(rng).copied().unwrap_or(POSES[0])
}

/// One photoshoot shot: the session prompt with a random pose appended.
pub fn build_shot<R: Rng + ?Sized>(
    prompt: &str,
    base: &ImageData,
    props: Option<&ImageData>,
    rng: &mut R,
) -> GenerationRequest {
    let pose = pick_pose(rng);
    build_request(Some(base), props, format!("{}, {}.", prompt, pose))
}
