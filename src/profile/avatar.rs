//! Avatar images
//!
//! A selected image file is embedded into the profile as a `data:` URI so
//! the profile record stays self-contained.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::path::Path;
use thiserror::Error;

/// Errors raised while turning a file into an avatar
#[derive(Error, Debug)]
pub enum AvatarError {
    #[error("Failed to read avatar file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Avatar file is empty")]
    Empty,

    #[error("Not an image file: {0}")]
    NotAnImage(String),
}

/// An image file picked by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl AvatarFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Read an image file from disk
    pub fn from_path(path: &Path) -> Result<Self, AvatarError> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Ok(Self { name, bytes })
    }

    /// Detect the image type from the file signature, then the extension
    pub fn mime_type(&self) -> Option<&'static str> {
        sniff_image(&self.bytes).or_else(|| mime_from_extension(&self.name))
    }

    /// Encode as `data:<mime>;base64,<payload>`
    pub fn to_data_uri(&self) -> Result<String, AvatarError> {
        if self.bytes.is_empty() {
            return Err(AvatarError::Empty);
        }
        let mime = self
            .mime_type()
            .ok_or_else(|| AvatarError::NotAnImage(self.name.clone()))?;
        Ok(format!("data:{};base64,{}", mime, STANDARD.encode(&self.bytes)))
    }
}

fn sniff_image(bytes: &[u8]) -> Option<&'static str> {
    const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    if bytes.starts_with(PNG) {
        Some("image/png")
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("image/jpeg")
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        Some("image/gif")
    } else if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        Some("image/webp")
    } else if bytes.starts_with(b"BM") {
        Some("image/bmp")
    } else {
        None
    }
}

fn mime_from_extension(name: &str) -> Option<&'static str> {
    let ext = Path::new(name).extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "bmp" => Some("image/bmp"),
        "svg" => Some("image/svg+xml"),
        "ico" => Some("image/x-icon"),
        "avif" => Some("image/avif"),
        _ => None,
    }
}
