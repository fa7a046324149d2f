use serde::{Deserialize, Serialize};

pub const LIGHTING_OPTIONS: &[&str] = &[
    "Soft, diffused studio light",
    "Natural light",
    "Dramatic light",
];

pub const ASPECT_RATIOS: &[&str] = &["3:4", "1:1", "16:9", "4:3"];

pub const OUTFIT_STYLES: &[&str] = &["Casual (Jeans and t-shirt)", "Formal (Suit)", "Sporty"];

/// Photo counts offered by the session form.
pub const PHOTO_COUNTS: &[usize] = &[1, 3, 5];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackgroundSwatch {
    pub name: &'static str,
    pub hex: &'static str,
}

pub const BACKGROUND_SWATCHES: &[BackgroundSwatch] = &[
    BackgroundSwatch { name: "White", hex: "#f0f0f0" },
    BackgroundSwatch { name: "Beige", hex: "#f5f5dc" },
    BackgroundSwatch { name: "Light Blue", hex: "#add8e6" },
    BackgroundSwatch { name: "Light Green", hex: "#90ee90" },
    BackgroundSwatch { name: "Light Pink", hex: "#ffb6c1" },
];

/// Looks a swatch up by name (case-insensitive) or hex value.
pub fn find_swatch(key: &str) -> Option<&'static BackgroundSwatch> {
    let key = key.trim();
    BACKGROUND_SWATCHES
        .iter()
        .find(|swatch| swatch.name.eq_ignore_ascii_case(key) || swatch.hex.eq_ignore_ascii_case(key))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudioSpec {
    pub lighting: String,
    pub aspect_ratio: String,
    /// Hex colour, e.g. `#f5f5dc`.
    pub background_color: String,
    pub outfit_style: String,
    pub prioritize_props: bool,
    pub num_photos: usize,
}

impl Default for StudioSpec {
    fn default() -> Self {
        StudioSpec {
            lighting: "Soft, diffused studio light".to_string(),
            aspect_ratio: "3:4".to_string(),
            background_color: "#e0e0e0".to_string(),
            outfit_style: "Casual (Jeans and t-shirt)".to_string(),
            prioritize_props: false,
            num_photos: 5,
        }
    }
}

impl StudioSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lighting(mut self, lighting: impl Into<String>) -> Self {
        self.lighting = lighting.into();
        self
    }

    pub fn with_aspect_ratio(mut self, ratio: impl Into<String>) -> Self {
        self.aspect_ratio = ratio.into();
        self
    }

    /// Accepts a swatch name or any hex value.
    pub fn with_background(mut self, background: &str) -> Self {
        self.background_color = find_swatch(background)
            .map(|swatch| swatch.hex.to_string())
            .unwrap_or_else(|| background.trim().to_string());
        self
    }

    pub fn with_outfit(mut self, outfit: impl Into<String>) -> Self {
        self.outfit_style = outfit.into();
        self
    }

    pub fn with_props_priority(mut self, enabled: bool) -> Self {
        self.prioritize_props = enabled;
        self
    }

    pub fn with_photos(mut self, count: usize) -> Self {
        self.num_photos = count;
        self
    }
}
