use clap::{Args, Parser, Subcommand};
use genstudio::{
    codec::load_image_file,
    logger::{self, LogLevel, LoggerConfig},
    models::{ModelAttribute, ModelSpec, StudioSpec, BACKGROUND_SWATCHES},
    prompt::{compose_model_prompt, compose_studio_prompt, combine_prompts, EXAMPLE_PROMPTS},
    Event, ImageRef, Studio, StudioConfig,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "genstudio", version, about = "AI model photoshoots on the Gemini image API")]
struct Cli {
    /// Gemini API key; falls back to GEMINI_API_KEY.
    #[arg(long, global = true)]
    api_key: Option<String>,
    #[arg(long, global = true)]
    model_id: Option<String>,
    #[arg(long, global = true)]
    base_url: Option<String>,
    /// Where generated images are written.
    #[arg(long, short, global = true)]
    output_dir: Option<PathBuf>,
    #[arg(long, global = true, default_value = "info")]
    log_level: LogLevel,
    #[arg(long, global = true)]
    json_logs: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the prompts the current options compose to.
    Prompt {
        #[command(flatten)]
        model: ModelArgs,
        #[command(flatten)]
        studio: StudioArgs,
    },
    /// List the attribute catalogues and studio options.
    Options,
    /// Print sample free-text prompts.
    Examples,
    /// Generate the model preview and save it.
    Model {
        #[command(flatten)]
        model: ModelArgs,
        /// Free-text prompt used instead of the composed one.
        #[arg(long)]
        prompt: Option<String>,
    },
    /// Run a studio session against a generated or uploaded model.
    Photoshoot {
        #[command(flatten)]
        model: ModelArgs,
        #[command(flatten)]
        studio: StudioArgs,
        /// Use this picture as the model instead of generating one.
        #[arg(long)]
        base: Option<PathBuf>,
        /// Props or product picture shown alongside the model.
        #[arg(long)]
        props: Option<PathBuf>,
        /// Free-text prompt used instead of the composed one.
        #[arg(long)]
        prompt: Option<String>,
        /// Shot numbers (1-based) to regenerate after the batch.
        #[arg(long, value_delimiter = ',')]
        regenerate: Vec<usize>,
        /// Extra instruction for regenerated shots, e.g. "wearing a hat".
        #[arg(long, default_value = "")]
        extra: String,
    },
}

#[derive(Args)]
struct ModelArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    gender: Option<String>,
    #[arg(long)]
    ethnicity: Option<String>,
    #[arg(long)]
    body_type: Option<String>,
    #[arg(long)]
    age: Option<String>,
    #[arg(long)]
    eye_color: Option<String>,
    #[arg(long)]
    hair_color: Option<String>,
    #[arg(long)]
    hair_style: Option<String>,
    #[arg(long)]
    clothing_style: Option<String>,
    #[arg(long)]
    clothing_color: Option<String>,
}

impl ModelArgs {
    fn into_spec(self, default_name: &str) -> ModelSpec {
        let mut spec = ModelSpec::default().with_name(self.name.unwrap_or_else(|| default_name.to_string()));
        let values = [
            (ModelAttribute::Gender, self.gender),
            (ModelAttribute::Ethnicity, self.ethnicity),
            (ModelAttribute::BodyType, self.body_type),
            (ModelAttribute::Age, self.age),
            (ModelAttribute::EyeColor, self.eye_color),
            (ModelAttribute::HairColor, self.hair_color),
            (ModelAttribute::HairStyle, self.hair_style),
            (ModelAttribute::ClothingStyle, self.clothing_style),
            (ModelAttribute::ClothingColor, self.clothing_color),
        ];
        for (attribute, value) in values {
            if let Some(value) = value {
                if !attribute.is_known(&value) {
                    log::warn!(
                        "{} '{}' is not one of: {}",
                        attribute.label(),
                        value,
                        attribute.options().join(", ")
                    );
                }
                spec.set(attribute, value);
            }
        }
        spec
    }
}

#[derive(Args)]
struct StudioArgs {
    #[arg(long)]
    lighting: Option<String>,
    #[arg(long)]
    aspect_ratio: Option<String>,
    /// Swatch name (e.g. "Light Blue") or hex colour.
    #[arg(long)]
    background: Option<String>,
    #[arg(long)]
    outfit: Option<String>,
    /// Favour close-ups of the props.
    #[arg(long)]
    prioritize_props: bool,
    /// Number of photos in the session.
    #[arg(long, short = 'n')]
    photos: Option<usize>,
}

impl StudioArgs {
    fn into_spec(self) -> StudioSpec {
        let mut spec = StudioSpec::default().with_props_priority(self.prioritize_props);
        if let Some(lighting) = self.lighting {
            spec = spec.with_lighting(lighting);
        }
        if let Some(ratio) = self.aspect_ratio {
            spec = spec.with_aspect_ratio(ratio);
        }
        if let Some(background) = self.background {
            spec = spec.with_background(&background);
        }
        if let Some(outfit) = self.outfit {
            spec = spec.with_outfit(outfit);
        }
        if let Some(photos) = self.photos {
            spec = spec.with_photos(photos);
        }
        spec
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv_loaded = dotenv::dotenv().is_ok();
    let cli = Cli::parse();

    logger::init_with_config(
        LoggerConfig::new()
            .with_level(cli.log_level)
            .with_json_output(cli.json_logs),
    )?;
    if dotenv_loaded {
        log::debug!(".env file loaded");
    }

    let mut config = StudioConfig::from_env();
    if let Some(key) = cli.api_key {
        config = config.with_api_key(key);
    }
    if let Some(model_id) = cli.model_id {
        config = config.with_model(model_id);
    }
    if let Some(base_url) = cli.base_url {
        config = config.with_base_url(base_url);
    }
    if let Some(dir) = cli.output_dir {
        config = config.with_output_dir(dir);
    }

    match cli.command {
        Command::Prompt { model, studio } => {
            let model_prompt = compose_model_prompt(&model.into_spec(&config.model_name));
            let studio_prompt = compose_studio_prompt(&studio.into_spec());
            println!("model:      {}", model_prompt);
            println!("studio:     {}", studio_prompt);
            println!("photoshoot: {}", combine_prompts(&model_prompt, &studio_prompt));
        }
        Command::Options => {
            for attribute in ModelAttribute::ALL {
                println!("{}: {}", attribute.label(), attribute.options().join(" | "));
            }
            println!("Lighting: {}", genstudio::models::LIGHTING_OPTIONS.join(" | "));
            println!("Aspect Ratio: {}", genstudio::models::ASPECT_RATIOS.join(" | "));
            println!("Outfit Style: {}", genstudio::models::OUTFIT_STYLES.join(" | "));
            let swatches: Vec<String> = BACKGROUND_SWATCHES
                .iter()
                .map(|swatch| format!("{} ({})", swatch.name, swatch.hex))
                .collect();
            println!("Background: {}", swatches.join(" | "));
        }
        Command::Examples => {
            for example in EXAMPLE_PROMPTS {
                println!("{}", example);
            }
        }
        Command::Model { model, prompt } => {
            logger::log_startup_info("genstudio", env!("CARGO_PKG_VERSION"));
            logger::log_config_info(&config);

            let mut studio = Studio::from_config(&config);
            studio.dispatch(Event::SubmitApiKey).await?;
            studio
                .dispatch(Event::SetModelSpec(model.into_spec(&config.model_name)))
                .await?;
            studio
                .dispatch(Event::GenerateModel {
                    prompt_override: prompt,
                })
                .await?;
            for path in studio.dispatch(Event::SaveImage(ImageRef::Preview)).await? {
                println!("{}", path.display());
            }
        }
        Command::Photoshoot {
            model,
            studio: studio_args,
            base,
            props,
            prompt,
            regenerate,
            extra,
        } => {
            let redo = regenerate
                .iter()
                .map(|shot| shot.checked_sub(1).ok_or("shot numbers start at 1"))
                .collect::<Result<Vec<usize>, _>>()?;

            logger::log_startup_info("genstudio", env!("CARGO_PKG_VERSION"));
            logger::log_config_info(&config);

            let mut studio = Studio::from_config(&config);
            studio.dispatch(Event::SubmitApiKey).await?;
            studio
                .dispatch(Event::SetModelSpec(model.into_spec(&config.model_name)))
                .await?;
            studio
                .dispatch(Event::SetStudioSpec(studio_args.into_spec()))
                .await?;
            if let Some(path) = props {
                let image = load_image_file(&path, config.max_upload_bytes)?;
                studio.dispatch(Event::SetPropsImage(Some(image))).await?;
            }

            match base {
                Some(path) => {
                    let image = load_image_file(&path, config.max_upload_bytes)?;
                    studio.dispatch(Event::UploadBaseImage(image)).await?;
                }
                None => {
                    studio
                        .dispatch(Event::GenerateModel {
                            prompt_override: None,
                        })
                        .await?;
                    for path in studio.dispatch(Event::SaveImage(ImageRef::Preview)).await? {
                        println!("{}", path.display());
                    }
                }
            }

            studio
                .dispatch(Event::GeneratePhotoshoot {
                    prompt_override: prompt,
                })
                .await?;
            for path in studio.save_gallery().await? {
                println!("{}", path.display());
            }

            studio.dispatch(Event::SetAdditionalPrompt(extra)).await?;
            let (redone, failures) = studio.regenerate_shots(&redo).await;
            for path in redone {
                println!("{}", path.display());
            }
            if let Some(e) = failures.into_iter().next() {
                return Err(e.into());
            }
        }
    }

    Ok(())
}
