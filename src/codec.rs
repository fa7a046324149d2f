//! Data-URL encoding of images and loading of uploaded image files.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::path::Path;

use crate::error::{Result, StudioError, ValidationError};
use crate::models::{ImageData, MIME_GIF, MIME_JPEG, MIME_PNG, MIME_WEBP};

pub fn encode_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

pub fn decode_base64(payload: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(payload.trim())
        .map_err(|e| StudioError::Decode(format!("invalid base64 payload: {}", e)))
}

/// `data:<mime>;base64,<payload>`
pub fn encode_data_url(image: &ImageData) -> String {
    format!(
        "data:{};base64,{}",
        image.mime_type,
        encode_base64(&image.bytes)
    )
}

pub fn decode_data_url(url: &str) -> Result<ImageData> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| StudioError::Decode("missing 'data:' prefix".into()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| StudioError::Decode("missing ',' separator".into()))?;
    let mime_type = header
        .strip_suffix(";base64")
        .ok_or_else(|| StudioError::Decode("only base64 data URLs are supported".into()))?;

    let mime_type = if mime_type.is_empty() {
        MIME_PNG
    } else {
        mime_type
    };

    Ok(ImageData::new(mime_type, decode_base64(payload)?))
}

/// Sniffs the MIME type from the leading bytes.
pub fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(&[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n']) {
        Some(MIME_PNG)
    } else if bytes.starts_with(&[0xff, 0xd8, 0xff]) {
        Some(MIME_JPEG)
    } else if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        Some(MIME_WEBP)
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        Some(MIME_GIF)
    } else {
        None
    }
}

fn mime_from_extension(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some(MIME_PNG),
        "jpg" | "jpeg" => Some(MIME_JPEG),
        "webp" => Some(MIME_WEBP),
        "gif" => Some(MIME_GIF),
        _ => None,
    }
}

/// Reads an uploaded reference or props image, enforcing the size cap.
pub fn load_image_file(path: impl AsRef<Path>, max_bytes: u64) -> Result<ImageData> {
    let path = path.as_ref();
    let size = std::fs::metadata(path)?.len();
    if size > max_bytes {
        return Err(ValidationError::ImageTooLarge {
            size,
            limit: max_bytes,
        }
        .into());
    }

    let bytes = std::fs::read(path)?;
    let mime_type = sniff_mime(&bytes)
        .or_else(|| mime_from_extension(path))
        .ok_or_else(|| {
            StudioError::Decode(format!("{} is not a recognised image", path.display()))
        })?;

    log::debug!(
        "Loaded {} ({}, {} bytes)",
        path.display(),
        mime_type,
        bytes.len()
    );
    Ok(ImageData::new(mime_type, bytes))
}
