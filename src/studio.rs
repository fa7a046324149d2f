//! Runs the effects requested by [`AppState`] and feeds the results back.

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;

use crate::{
    config::StudioConfig,
    download::{save_image, timestamped_filename},
    error::{Result, StudioError},
    gemini::{GeminiClient, ImageGenerator},
    orchestrator::{generate_batch, regenerate},
    session::{AppState, Effect, Event, ImageRef},
};

pub struct Studio<G, R = StdRng> {
    state: AppState,
    generator: G,
    rng: R,
    output_dir: PathBuf,
}

impl Studio<GeminiClient, StdRng> {
    /// A studio talking to Gemini, keyed from the config when a key is present.
    pub fn from_config(config: &StudioConfig) -> Self {
        let mut studio = Studio::new(
            GeminiClient::new(config),
            StdRng::from_rng(&mut rand::rng()),
            config.output_dir.clone(),
        );
        studio.state.model_spec.name = config.model_name.clone();
        if let Some(key) = &config.api_key {
            studio.state.api_key = key.clone();
        }
        studio
    }
}

impl<G, R> Studio<G, R>
where
    G: ImageGenerator,
    R: Rng,
{
    pub fn new(generator: G, rng: R, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            state: AppState::new(),
            generator,
            rng,
            output_dir: output_dir.into(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Applies `event`, runs its effects to completion and returns the paths
    /// of any images written. The first failure is returned after the state
    /// has recorded it.
    pub async fn dispatch(&mut self, event: Event) -> Result<Vec<PathBuf>> {
        let effects = self.state.apply(event)?;

        let mut saved = Vec::new();
        let mut first_error = None;
        for effect in effects {
            match self.run(effect).await {
                Ok(Some(path)) => saved.push(path),
                Ok(None) => {}
                Err(e) => {
                    first_error.get_or_insert(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(saved),
        }
    }

    /// Writes every gallery shot to the output directory.
    pub async fn save_gallery(&mut self) -> Result<Vec<PathBuf>> {
        let mut saved = Vec::new();
        for index in 0..self.state.gallery.len() {
            saved.extend(self.dispatch(Event::SaveImage(ImageRef::Gallery(index))).await?);
        }
        Ok(saved)
    }

    /// Regenerates each slot in turn and saves the ones that succeed. A failed
    /// slot is skipped; the failures come back alongside the saved paths.
    pub async fn regenerate_shots(&mut self, indices: &[usize]) -> (Vec<PathBuf>, Vec<StudioError>) {
        let mut saved = Vec::new();
        let mut failures = Vec::new();
        for &index in indices {
            let outcome = match self.dispatch(Event::RegenerateImage { index }).await {
                Ok(_) => {
                    self.dispatch(Event::SaveImage(ImageRef::Gallery(index)))
                        .await
                }
                Err(e) => Err(e),
            };
            match outcome {
                Ok(paths) => saved.extend(paths),
                Err(e) => {
                    log::error!("Shot #{} kept as it was: {}", index + 1, e);
                    failures.push(e);
                }
            }
        }
        (saved, failures)
    }

    async fn run(&mut self, effect: Effect) -> Result<Option<PathBuf>> {
        match effect {
            Effect::GenerateModel { api_key, request } => {
                let outcome = self.generator.generate(&api_key, &request).await;
                let (result, error) = settle(outcome);
                self.state.apply(Event::ModelGenerated(result))?;
                error.map_or(Ok(None), Err)
            }
            Effect::GeneratePhotoshoot { api_key, plan } => {
                let outcome = generate_batch(&self.generator, &api_key, &plan, &mut self.rng).await;
                let (result, error) = settle(outcome);
                self.state.apply(Event::PhotoshootGenerated {
                    prompt: plan.prompt,
                    result,
                })?;
                error.map_or(Ok(None), Err)
            }
            Effect::Regenerate { api_key, plan } => {
                let outcome = regenerate(&self.generator, &api_key, &plan).await;
                let (result, error) = settle(outcome);
                self.state.apply(Event::ImageRegenerated {
                    index: plan.index,
                    result,
                })?;
                error.map_or(Ok(None), Err)
            }
            Effect::Save { which, image } => {
                let filename = timestamped_filename(which, &image, Utc::now());
                save_image(&self.output_dir, &image, &filename).map(Some)
            }
        }
    }
}

/// Splits an outcome into the message-carrying result the state stores and
/// the typed error handed back to the caller.
fn settle<T>(outcome: Result<T>) -> (std::result::Result<T, String>, Option<StudioError>) {
    match outcome {
        Ok(value) => (Ok(value), None),
        Err(e) => {
            log::error!("{}", e);
            (Err(e.to_string()), Some(e))
        }
    }
}
