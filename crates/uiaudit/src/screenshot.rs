//! Screenshot capture artifacts.
//!
//! Engines hand back raw RGBA frames; this module encodes them to PNG and
//! writes them under the run's screenshots directory so issues can point at
//! the file that shows the defect.

use chrono::Local;
use image::ImageFormat;
use std::fs;
use std::io::{Cursor, Seek, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Holds raw screenshot data as captured by the automation engine.
#[derive(Debug, Clone)]
pub struct Screenshot {
    /// Raw RGBA image data
    pub image_data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl Screenshot {
    /// Encodes the screenshot data to the specified format and writes it to
    /// the provided writer.
    pub fn write_to<W: Write + Seek>(
        &self,
        writer: &mut W,
        format: ImageFormat,
    ) -> Result<(), image::ImageError> {
        use image::ImageEncoder;
        match format {
            ImageFormat::Png => {
                let encoder = image::codecs::png::PngEncoder::new(writer);
                encoder.write_image(
                    &self.image_data,
                    self.width,
                    self.height,
                    image::ExtendedColorType::Rgba8,
                )
            }
            _ => {
                // Other formats go through DynamicImage, which copies the data
                let img = image::ImageBuffer::<image::Rgba<u8>, _>::from_raw(
                    self.width,
                    self.height,
                    self.image_data.clone(),
                )
                .ok_or(image::ImageError::Parameter(
                    image::error::ParameterError::from_kind(
                        image::error::ParameterErrorKind::DimensionMismatch,
                    ),
                ))?;
                let dynamic_image = image::DynamicImage::ImageRgba8(img);
                dynamic_image.write_to(writer, format)
            }
        }
    }

    /// Encode to PNG bytes.
    pub fn to_png(&self) -> Result<Vec<u8>, image::ImageError> {
        let mut cursor = Cursor::new(Vec::new());
        self.write_to(&mut cursor, ImageFormat::Png)?;
        Ok(cursor.into_inner())
    }
}

/// Generate a timestamp-based file prefix for an artifact label.
/// Format: YYYYMMDD_HHMMSS_label
pub fn generate_prefix(label: &str) -> String {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let clean: String = label
        .replace("::", "_")
        .replace(' ', "_")
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '-' || *c == '_')
        .collect();
    format!("{timestamp}_{clean}")
}

/// Save a screenshot as `<timestamp>_<name>.png` under `dir`, so artifacts
/// from successive runs do not overwrite each other.
/// Returns the path to the saved file, or None if saving failed; a missing
/// artifact never fails the check that captured it.
pub fn save_screenshot(shot: &Screenshot, dir: &Path, name: &str) -> Option<PathBuf> {
    if let Err(e) = fs::create_dir_all(dir) {
        warn!("failed to create screenshots dir {}: {}", dir.display(), e);
        return None;
    }

    let path = dir.join(format!("{}.png", generate_prefix(name)));
    let png_bytes = match shot.to_png() {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("failed to encode PNG for {}: {}", name, e);
            return None;
        }
    };

    if let Err(e) = fs::write(&path, &png_bytes) {
        warn!("failed to save {}: {}", path.display(), e);
        return None;
    }

    info!(
        "saved screenshot: {} ({}KB)",
        path.display(),
        png_bytes.len() / 1024
    );
    Some(path)
}
