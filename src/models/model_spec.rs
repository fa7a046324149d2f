use serde::{Deserialize, Serialize};

/// The descriptive attributes of the generated model.
///
/// Values are free strings so callers can go beyond the catalogue; the
/// catalogue itself is exposed through [`ModelAttribute::options`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelSpec {
    pub name: String,
    pub gender: String,
    pub ethnicity: String,
    pub body_type: String,
    pub age: String,
    pub eye_color: String,
    pub hair_color: String,
    pub hair_style: String,
    pub clothing_style: String,
    pub clothing_color: String,
}

impl Default for ModelSpec {
    fn default() -> Self {
        ModelSpec {
            name: "Carl".to_string(),
            gender: "Man".to_string(),
            ethnicity: "Middle Eastern".to_string(),
            body_type: "Athletic".to_string(),
            age: "Teenager (13-19)".to_string(),
            eye_color: "Green".to_string(),
            hair_color: "Brown".to_string(),
            hair_style: "Buzz cut".to_string(),
            clothing_style: "Casual (Jeans and t-shirt)".to_string(),
            clothing_color: "Black".to_string(),
        }
    }
}

impl ModelSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with(mut self, attribute: ModelAttribute, value: impl Into<String>) -> Self {
        self.set(attribute, value);
        self
    }

    pub fn get(&self, attribute: ModelAttribute) -> &str {
        match attribute {
            ModelAttribute::Gender => &self.gender,
            ModelAttribute::Ethnicity => &self.ethnicity,
            ModelAttribute::BodyType => &self.body_type,
            ModelAttribute::Age => &self.age,
            ModelAttribute::EyeColor => &self.eye_color,
            ModelAttribute::HairColor => &self.hair_color,
            ModelAttribute::HairStyle => &self.hair_style,
            ModelAttribute::ClothingStyle => &self.clothing_style,
            ModelAttribute::ClothingColor => &self.clothing_color,
        }
    }

    pub fn set(&mut self, attribute: ModelAttribute, value: impl Into<String>) {
        let slot = match attribute {
            ModelAttribute::Gender => &mut self.gender,
            ModelAttribute::Ethnicity => &mut self.ethnicity,
            ModelAttribute::BodyType => &mut self.body_type,
            ModelAttribute::Age => &mut self.age,
            ModelAttribute::EyeColor => &mut self.eye_color,
            ModelAttribute::HairColor => &mut self.hair_color,
            ModelAttribute::HairStyle => &mut self.hair_style,
            ModelAttribute::ClothingStyle => &mut self.clothing_style,
            ModelAttribute::ClothingColor => &mut self.clothing_color,
        };
        *slot = value.into();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ModelAttribute {
    Gender,
    Ethnicity,
    BodyType,
    Age,
    EyeColor,
    HairColor,
    HairStyle,
    ClothingStyle,
    ClothingColor,
}

impl ModelAttribute {
    pub const ALL: [ModelAttribute; 9] = [
        ModelAttribute::Gender,
        ModelAttribute::Ethnicity,
        ModelAttribute::BodyType,
        ModelAttribute::Age,
        ModelAttribute::EyeColor,
        ModelAttribute::HairColor,
        ModelAttribute::HairStyle,
        ModelAttribute::ClothingStyle,
        ModelAttribute::ClothingColor,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ModelAttribute::Gender => "Gender",
            ModelAttribute::Ethnicity => "Ethnicity",
            ModelAttribute::BodyType => "Body Type",
            ModelAttribute::Age => "Age",
            ModelAttribute::EyeColor => "Eye Color",
            ModelAttribute::HairColor => "Hair Color",
            ModelAttribute::HairStyle => "Hair Style",
            ModelAttribute::ClothingStyle => "Clothing Style",
            ModelAttribute::ClothingColor => "Clothing Color",
        }
    }

    pub fn options(&self) -> &'static [&'static str] {
        match self {
            ModelAttribute::Gender => &["Man", "Woman"],
            ModelAttribute::Ethnicity => &[
                "Asian",
                "Black",
                "Caucasian",
                "Hispanic/Latino",
                "Indian",
                "Middle Eastern",
                "Native American",
            ],
            ModelAttribute::BodyType => &["Slim", "Athletic", "Average", "Heavyset"],
            ModelAttribute::Age => &[
                "Baby (0-2)",
                "Child (3-12)",
                "Teenager (13-19)",
                "Young Adult (20-29)",
                "Adult (30-59)",
                "Senior (60+)",
            ],
            ModelAttribute::EyeColor => &["Amber", "Blue", "Brown", "Gray", "Green", "Hazel"],
            ModelAttribute::HairColor => &["Black", "Brown", "Blonde", "Red", "Gray", "White"],
            ModelAttribute::HairStyle => &[
                "Long", "Short", "Curly", "Straight", "Wavy", "Bald", "Buzz cut",
            ],
            ModelAttribute::ClothingStyle => &[
                "Casual (Jeans and t-shirt)",
                "Formal",
                "Sporty",
                "Streetwear",
                "Bohemian",
            ],
            ModelAttribute::ClothingColor => &[
                "Black", "White", "Red", "Blue", "Green", "Yellow", "Gray", "Brown", "Orange",
                "Purple",
            ],
        }
    }

    /// Case-insensitive catalogue membership.
    pub fn is_known(&self, value: &str) -> bool {
        self.options()
            .iter()
            .any(|option| option.eq_ignore_ascii_case(value.trim()))
    }
}
