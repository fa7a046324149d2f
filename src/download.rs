use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::models::ImageData;
use crate::session::ImageRef;

/// `gemini-generated-image-<unix millis>[-<shot>].<ext>`
///
/// Gallery shots carry their 1-based position so a batch saved within the
/// same millisecond does not overwrite itself.
pub fn timestamped_filename(which: ImageRef, image: &ImageData, now: DateTime<Utc>) -> String {
    let millis = now.timestamp_millis();
    match which {
        ImageRef::Preview => format!("gemini-generated-image-{}.{}", millis, image.extension()),
        ImageRef::Gallery(index) => format!(
            "gemini-generated-image-{}-{}.{}",
            millis,
            index + 1,
            image.extension()
        ),
    }
}

/// Writes the image into `dir`, creating the directory when missing.
pub fn save_image(dir: impl AsRef<Path>, image: &ImageData, filename: &str) -> Result<PathBuf> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;
    let path = dir.join(filename);
    fs::write(&path, &image.bytes)?;
    log::info!("💾 Image saved to: {}", path.display());
    Ok(path)
}
