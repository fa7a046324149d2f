//! Deterministic prompt templates.

use crate::models::{ModelSpec, StudioSpec};

/// Free-text prompts offered as starting points for custom generations.
pub const EXAMPLE_PROMPTS: [&str; 4] = [
    "A futuristic cityscape at sunset with flying cars",
    "A cute robot watering plants in a garden",
    "A magical forest with glowing mushrooms",
    "A cat wearing a spacesuit on the moon",
];

pub fn compose_model_prompt(spec: &ModelSpec) -> String {
    format!(
        "photo of a {} model named {}, {}, {}, with a {} body, {} eyes, {} {} hair, wearing {} of {} color.",
        spec.gender.to_lowercase(),
        spec.name,
        spec.ethnicity.to_lowercase(),
        spec.age.to_lowercase(),
        spec.body_type.to_lowercase(),
        spec.eye_color.to_lowercase(),
        spec.hair_color.to_lowercase(),
        spec.hair_style.to_lowercase(),
        spec.clothing_style.to_lowercase(),
        spec.clothing_color.to_lowercase(),
    )
}

pub fn compose_studio_prompt(spec: &StudioSpec) -> String {
    let props = if spec.prioritize_props {
        "Close up shot on props."
    } else {
        ""
    };
    format!(
        "Studio photoshoot, {}, aspect ratio {}, solid {} background, wearing {}. {}",
        spec.lighting, spec.aspect_ratio, spec.background_color, spec.outfit_style, props
    )
}

/// The session prompt sent with every photoshoot shot.
pub fn combine_prompts(model_prompt: &str, studio_prompt: &str) -> String {
    format!("{}, {}", model_prompt, studio_prompt)
}

pub fn regeneration_prompt(previous: &str, extra: &str) -> String {
    format!("{}, {}.", previous, extra)
}
