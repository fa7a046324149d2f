//! Application state of a studio session and its transitions.
//!
//! [`AppState::apply`] is the only writer. User events validate and return the
//! effects to run; completion events fold results back in and never fail.

use serde::{Deserialize, Serialize};

use crate::{
    error::ValidationError,
    models::{GenerationRequest, ImageData, ModelSpec, StudioSpec},
    orchestrator::{RegenerationPlan, ShotPlan},
    prompt::{combine_prompts, compose_model_prompt, compose_studio_prompt},
    request::text_request,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Model,
    Photoshoot,
}

/// Which image a save refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageRef {
    Preview,
    Gallery(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    SetApiKey(String),
    SubmitApiKey,
    ChangeApiKey,
    SelectTab(Tab),
    SetModelSpec(ModelSpec),
    SetStudioSpec(StudioSpec),
    SetPropsImage(Option<ImageData>),
    /// Uses an uploaded picture as the model instead of generating one.
    UploadBaseImage(ImageData),
    SetAdditionalPrompt(String),
    /// Uses the composed model prompt unless overridden with free text.
    GenerateModel { prompt_override: Option<String> },
    GeneratePhotoshoot { prompt_override: Option<String> },
    RegenerateImage { index: usize },
    SaveImage(ImageRef),
    ModelGenerated(Result<ImageData, String>),
    PhotoshootGenerated {
        prompt: String,
        result: Result<Vec<ImageData>, String>,
    },
    ImageRegenerated {
        index: usize,
        result: Result<ImageData, String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    GenerateModel {
        api_key: String,
        request: GenerationRequest,
    },
    GeneratePhotoshoot {
        api_key: String,
        plan: ShotPlan,
    },
    Regenerate {
        api_key: String,
        plan: RegenerationPlan,
    },
    Save { which: ImageRef, image: ImageData },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub api_key: String,
    pub show_api_input: bool,
    pub active_tab: Tab,
    pub model_spec: ModelSpec,
    pub studio_spec: StudioSpec,
    pub props_image: Option<ImageData>,
    pub additional_prompt: String,
    pub preview: Option<ImageData>,
    pub gallery: Vec<ImageData>,
    /// Prompt of the last successful photoshoot; regenerations extend it.
    pub regeneration_prompt: String,
    pub loading: bool,
    pub regenerating: Option<usize>,
    pub error: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            show_api_input: true,
            active_tab: Tab::Model,
            model_spec: ModelSpec::default(),
            studio_spec: StudioSpec::default(),
            props_image: None,
            additional_prompt: String::new(),
            preview: None,
            gallery: Vec::new(),
            regeneration_prompt: String::new(),
            loading: false,
            regenerating: None,
            error: None,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn model_prompt(&self) -> String {
        compose_model_prompt(&self.model_spec)
    }

    pub fn studio_prompt(&self) -> String {
        compose_studio_prompt(&self.studio_spec)
    }

    pub fn photoshoot_prompt(&self) -> String {
        combine_prompts(&self.model_prompt(), &self.studio_prompt())
    }

    pub fn has_images(&self) -> bool {
        self.preview.is_some() || !self.gallery.is_empty()
    }

    pub fn panel_title(&self) -> String {
        if self.has_images() {
            format!("Model: {}", self.model_spec.name)
        } else {
            "Generated Model".to_string()
        }
    }

    pub fn can_regenerate(&self) -> bool {
        !self.loading && self.regenerating.is_none()
    }

    pub fn image(&self, which: ImageRef) -> Option<&ImageData> {
        match which {
            ImageRef::Preview => self.preview.as_ref(),
            ImageRef::Gallery(index) => self.gallery.get(index),
        }
    }

    fn reject(&mut self, error: ValidationError) -> Result<Vec<Effect>, ValidationError> {
        log::warn!("Rejected: {}", error);
        self.error = Some(error.to_string());
        Err(error)
    }

    fn require_api_key(&mut self) -> Result<String, ValidationError> {
        let key = self.api_key.trim();
        if key.is_empty() {
            self.error = Some(ValidationError::MissingApiKey.to_string());
            return Err(ValidationError::MissingApiKey);
        }
        Ok(key.to_string())
    }

    pub fn apply(&mut self, event: Event) -> Result<Vec<Effect>, ValidationError> {
        match event {
            Event::SetApiKey(key) => {
                self.api_key = key;
                Ok(vec![])
            }
            Event::SubmitApiKey => {
                if self.api_key.trim().is_empty() {
                    self.error = Some("Please enter a valid API key".to_string());
                    return Err(ValidationError::MissingApiKey);
                }
                self.show_api_input = false;
                self.error = None;
                Ok(vec![])
            }
            Event::ChangeApiKey => {
                self.show_api_input = true;
                self.preview = None;
                self.gallery.clear();
                Ok(vec![])
            }
            Event::SelectTab(tab) => {
                self.active_tab = tab;
                Ok(vec![])
            }
            Event::SetModelSpec(spec) => {
                self.model_spec = spec;
                Ok(vec![])
            }
            Event::SetStudioSpec(spec) => {
                self.studio_spec = spec;
                Ok(vec![])
            }
            Event::SetPropsImage(image) => {
                self.props_image = image;
                Ok(vec![])
            }
            Event::SetAdditionalPrompt(text) => {
                self.additional_prompt = text;
                Ok(vec![])
            }
            Event::UploadBaseImage(image) => {
                self.preview = Some(image);
                self.gallery.clear();
                self.error = None;
                Ok(vec![])
            }
            Event::GenerateModel { prompt_override } => self.start_model(prompt_override),
            Event::GeneratePhotoshoot { prompt_override } => self.start_photoshoot(prompt_override),
            Event::RegenerateImage { index } => self.start_regeneration(index),
            Event::SaveImage(which) => Ok(self
                .image(which)
                .cloned()
                .map(|image| Effect::Save { which, image })
                .into_iter()
                .collect()),
            Event::ModelGenerated(result) => {
                self.loading = false;
                match result {
                    Ok(image) => self.preview = Some(image),
                    Err(message) => {
                        self.error = Some(format!("Failed to generate model: {}", message))
                    }
                }
                Ok(vec![])
            }
            Event::PhotoshootGenerated { prompt, result } => {
                self.loading = false;
                match result {
                    Ok(images) => {
                        self.gallery = images;
                        self.regeneration_prompt = prompt;
                    }
                    Err(message) => {
                        self.error = Some(format!("Failed to generate photoshoot: {}", message))
                    }
                }
                Ok(vec![])
            }
            Event::ImageRegenerated { index, result } => {
                self.regenerating = None;
                match result {
                    Ok(image) => match self.gallery.get_mut(index) {
                        Some(slot) => *slot = image,
                        None => log::warn!(
                            "Dropping regenerated image for slot {}, gallery now holds {}",
                            index,
                            self.gallery.len()
                        ),
                    },
                    Err(message) => {
                        self.error = Some(format!("Failed to regenerate image: {}", message))
                    }
                }
                Ok(vec![])
            }
        }
    }

    fn start_model(
        &mut self,
        prompt_override: Option<String>,
    ) -> Result<Vec<Effect>, ValidationError> {
        let prompt = prompt_override.unwrap_or_else(|| self.model_prompt());
        if prompt.trim().is_empty() {
            return self.reject(ValidationError::MissingPrompt);
        }
        let api_key = self.require_api_key()?;

        self.loading = true;
        self.error = None;
        self.preview = None;
        self.gallery.clear();

        Ok(vec![Effect::GenerateModel {
            api_key,
            request: text_request(prompt),
        }])
    }

    fn start_photoshoot(
        &mut self,
        prompt_override: Option<String>,
    ) -> Result<Vec<Effect>, ValidationError> {
        let Some(base) = self.preview.clone() else {
            return self.reject(ValidationError::MissingBaseImage);
        };
        let prompt = prompt_override.unwrap_or_else(|| self.photoshoot_prompt());
        let api_key = self.require_api_key()?;

        self.loading = true;
        self.error = None;

        Ok(vec![Effect::GeneratePhotoshoot {
            api_key,
            plan: ShotPlan {
                prompt,
                base,
                props: self.props_image.clone(),
                count: self.studio_spec.num_photos,
            },
        }])
    }

    fn start_regeneration(&mut self, index: usize) -> Result<Vec<Effect>, ValidationError> {
        if !self.can_regenerate() {
            return self.reject(ValidationError::Busy);
        }
        let api_key = self.require_api_key()?;
        let Some(base) = self.preview.clone() else {
            return self.reject(ValidationError::MissingBaseImage);
        };
        if index >= self.gallery.len() {
            return self.reject(ValidationError::InvalidIndex {
                index,
                len: self.gallery.len(),
            });
        }

        self.regenerating = Some(index);

        Ok(vec![Effect::Regenerate {
            api_key,
            plan: RegenerationPlan {
                index,
                previous_prompt: self.regeneration_prompt.clone(),
                extra: self.additional_prompt.clone(),
                base,
                props: self.props_image.clone(),
            },
        }])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Part;

    fn keyed() -> AppState {
        let mut state = AppState::new();
        state.apply(Event::SetApiKey("secret".into())).unwrap();
        state.apply(Event::SubmitApiKey).unwrap();
        state
    }

    fn with_gallery(n: u8) -> AppState {
        let mut state = keyed();
        state.preview = Some(ImageData::png(vec![0xaa]));
        state.gallery = (0..n).map(|i| ImageData::png(vec![i])).collect();
        state.regeneration_prompt = "model, studio".into();
        state
    }

    #[test]
    fn blank_api_key_blocks_every_generation() {
        let mut state = AppState::new();
        state.apply(Event::SetApiKey("   ".into())).unwrap();
        assert_eq!(
            state.apply(Event::GenerateModel { prompt_override: None }),
            Err(ValidationError::MissingApiKey)
        );
        assert_eq!(state.error.as_deref(), Some("Please enter your Gemini API key"));
        assert!(!state.loading);

        state.preview = Some(ImageData::png(vec![1]));
        assert_eq!(
            state.apply(Event::GeneratePhotoshoot { prompt_override: None }),
            Err(ValidationError::MissingApiKey)
        );

        state.gallery = vec![ImageData::png(vec![2])];
        assert_eq!(
            state.apply(Event::RegenerateImage { index: 0 }),
            Err(ValidationError::MissingApiKey)
        );
        assert_eq!(state.regenerating, None);
    }

    #[test]
    fn submit_requires_a_key() {
        let mut state = AppState::new();
        assert!(state.apply(Event::SubmitApiKey).is_err());
        assert!(state.show_api_input);
        assert_eq!(state.error.as_deref(), Some("Please enter a valid API key"));

        let state = keyed();
        assert!(!state.show_api_input);
        assert_eq!(state.error, None);
    }

    #[test]
    fn model_generation_clears_previous_images() {
        let mut state = with_gallery(2);
        let effects = state
            .apply(Event::GenerateModel { prompt_override: None })
            .unwrap();
        assert!(state.loading);
        assert!(state.preview.is_none());
        assert!(state.gallery.is_empty());

        let [Effect::GenerateModel { api_key, request }] = effects.as_slice() else {
            panic!("unexpected effects {:?}", effects);
        };
        assert_eq!(api_key, "secret");
        assert_eq!(request.parts, vec![Part::Text(state.model_prompt())]);
    }

    #[test]
    fn blank_prompt_override_is_rejected() {
        let mut state = keyed();
        assert_eq!(
            state.apply(Event::GenerateModel {
                prompt_override: Some(" ".into())
            }),
            Err(ValidationError::MissingPrompt)
        );
    }

    #[test]
    fn photoshoot_requires_a_base_model() {
        let mut state = keyed();
        assert_eq!(
            state.apply(Event::GeneratePhotoshoot { prompt_override: None }),
            Err(ValidationError::MissingBaseImage)
        );
        assert!(!state.loading);
    }

    #[test]
    fn uploaded_base_unlocks_the_photoshoot() {
        let mut state = with_gallery(2);
        state
            .apply(Event::UploadBaseImage(ImageData::new("image/jpeg", vec![5])))
            .unwrap();
        assert!(state.gallery.is_empty());
        let effects = state
            .apply(Event::GeneratePhotoshoot {
                prompt_override: Some("custom".into()),
            })
            .unwrap();
        let [Effect::GeneratePhotoshoot { plan, .. }] = effects.as_slice() else {
            panic!("unexpected effects {:?}", effects);
        };
        assert_eq!(plan.base, ImageData::new("image/jpeg", vec![5]));
        assert_eq!(plan.prompt, "custom");
    }

    #[test]
    fn photoshoot_plan_uses_combined_prompt_and_props() {
        let mut state = keyed();
        state.preview = Some(ImageData::png(vec![1]));
        state
            .apply(Event::SetPropsImage(Some(ImageData::png(vec![2]))))
            .unwrap();
        state
            .apply(Event::SetStudioSpec(StudioSpec::new().with_photos(3)))
            .unwrap();

        let effects = state
            .apply(Event::GeneratePhotoshoot { prompt_override: None })
            .unwrap();
        let expected = ShotPlan {
            prompt: state.photoshoot_prompt(),
            base: ImageData::png(vec![1]),
            props: Some(ImageData::png(vec![2])),
            count: 3,
        };
        assert_eq!(
            effects,
            vec![Effect::GeneratePhotoshoot {
                api_key: "secret".into(),
                plan: expected
            }]
        );
    }

    #[test]
    fn failed_batch_keeps_previous_gallery() {
        let mut state = with_gallery(2);
        let before = state.gallery.clone();
        state
            .apply(Event::GeneratePhotoshoot { prompt_override: None })
            .unwrap();
        state
            .apply(Event::PhotoshootGenerated {
                prompt: "new".into(),
                result: Err("quota exceeded".into()),
            })
            .unwrap();

        assert!(!state.loading);
        assert_eq!(state.gallery, before);
        assert_eq!(state.regeneration_prompt, "model, studio");
        assert_eq!(
            state.error.as_deref(),
            Some("Failed to generate photoshoot: quota exceeded")
        );
    }

    #[test]
    fn successful_batch_replaces_gallery_and_remembers_prompt() {
        let mut state = with_gallery(1);
        let images = vec![ImageData::png(vec![7]), ImageData::png(vec![8])];
        state
            .apply(Event::PhotoshootGenerated {
                prompt: "fresh prompt".into(),
                result: Ok(images.clone()),
            })
            .unwrap();
        assert_eq!(state.gallery, images);
        assert_eq!(state.regeneration_prompt, "fresh prompt");
    }

    #[test]
    fn regeneration_replaces_only_its_slot() {
        let mut state = with_gallery(3);
        state
            .apply(Event::SetAdditionalPrompt("wearing a hat".into()))
            .unwrap();
        let before = state.gallery.clone();

        let effects = state.apply(Event::RegenerateImage { index: 1 }).unwrap();
        assert_eq!(state.regenerating, Some(1));
        let [Effect::Regenerate { plan, .. }] = effects.as_slice() else {
            panic!("unexpected effects {:?}", effects);
        };
        assert_eq!(plan.request().prompt(), Some("model, studio, wearing a hat."));

        let fresh = ImageData::png(vec![0xff]);
        state
            .apply(Event::ImageRegenerated {
                index: 1,
                result: Ok(fresh.clone()),
            })
            .unwrap();

        assert_eq!(state.regenerating, None);
        assert_eq!(state.gallery[0], before[0]);
        assert_eq!(state.gallery[1], fresh);
        assert_eq!(state.gallery[2], before[2]);
    }

    #[test]
    fn regeneration_is_refused_while_busy() {
        let mut state = with_gallery(2);
        state.apply(Event::RegenerateImage { index: 0 }).unwrap();
        assert_eq!(
            state.apply(Event::RegenerateImage { index: 1 }),
            Err(ValidationError::Busy)
        );

        let mut state = with_gallery(2);
        state.loading = true;
        assert!(!state.can_regenerate());
        assert_eq!(
            state.apply(Event::RegenerateImage { index: 0 }),
            Err(ValidationError::Busy)
        );
    }

    #[test]
    fn regeneration_index_must_exist() {
        let mut state = with_gallery(2);
        assert_eq!(
            state.apply(Event::RegenerateImage { index: 2 }),
            Err(ValidationError::InvalidIndex { index: 2, len: 2 })
        );
    }

    #[test]
    fn stale_regeneration_is_dropped() {
        let mut state = with_gallery(2);
        state.apply(Event::RegenerateImage { index: 1 }).unwrap();
        state.gallery.truncate(1);
        state
            .apply(Event::ImageRegenerated {
                index: 1,
                result: Ok(ImageData::png(vec![9])),
            })
            .unwrap();
        assert_eq!(state.gallery, vec![ImageData::png(vec![0])]);
        assert_eq!(state.regenerating, None);
    }

    #[test]
    fn failed_regeneration_keeps_the_image() {
        let mut state = with_gallery(2);
        state.apply(Event::RegenerateImage { index: 0 }).unwrap();
        state
            .apply(Event::ImageRegenerated {
                index: 0,
                result: Err("No image data found in response".into()),
            })
            .unwrap();
        assert_eq!(state.gallery[0], ImageData::png(vec![0]));
        assert_eq!(
            state.error.as_deref(),
            Some("Failed to regenerate image: No image data found in response")
        );
    }

    #[test]
    fn save_targets_existing_images_only() {
        let mut state = with_gallery(1);
        assert_eq!(
            state.apply(Event::SaveImage(ImageRef::Gallery(0))).unwrap(),
            vec![Effect::Save {
                which: ImageRef::Gallery(0),
                image: ImageData::png(vec![0])
            }]
        );
        assert!(state
            .apply(Event::SaveImage(ImageRef::Gallery(5)))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn change_api_key_resets_the_session_view() {
        let mut state = with_gallery(2);
        state.apply(Event::SelectTab(Tab::Photoshoot)).unwrap();
        assert_eq!(state.active_tab, Tab::Photoshoot);
        assert_eq!(state.panel_title(), "Model: Carl");
        state.apply(Event::ChangeApiKey).unwrap();
        assert!(state.show_api_input);
        assert!(!state.has_images());
        assert_eq!(state.panel_title(), "Generated Model");
    }
}
