/// PNG conversion of downloaded image bytes
/// Decodes whatever format the bytes are in and writes RGBA8 PNG to disk
use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{PipelineError, PipelineResult};

/// A PNG file the converter has just written.
///
/// Only `convert_to_png` can create one, so anything holding a `SavedPng`
/// points at a complete file rather than a stale or partial one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedPng {
    path: PathBuf,
}

impl SavedPng {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

pub type ConvertResult = PipelineResult<SavedPng>;

/// Convert image bytes to a PNG file at `destination`
///
/// Runs on a blocking worker since decode and deflate are CPU-bound.
pub async fn convert_to_png(bytes: Vec<u8>, destination: PathBuf, quality: u8) -> ConvertResult {
    tokio::task::spawn_blocking(move || convert_to_png_blocking(&bytes, &destination, quality))
        .await
        .map_err(|e| PipelineError::Write(format!("Task join error: {}", e)))?
}

/// Blocking version of the conversion
pub fn convert_to_png_blocking(bytes: &[u8], destination: &Path, quality: u8) -> ConvertResult {
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| PipelineError::Decode(format!("Failed to decode image: {}", e)))?;

    // RGBA keeps transparency for palette and grey sources
    let rgba = decoded.to_rgba8();

    let file = File::create(destination).map_err(|e| write_error(destination, e))?;
    let mut writer = BufWriter::new(file);

    let encoder = PngEncoder::new_with_quality(
        &mut writer,
        compression_for(quality),
        PngFilter::Adaptive,
    );
    rgba.write_with_encoder(encoder)
        .map_err(|e| write_error(destination, e))?;
    writer.flush().map_err(|e| write_error(destination, e))?;

    info!(
        "💾 Saved {}x{} PNG to {}",
        rgba.width(),
        rgba.height(),
        destination.display()
    );

    Ok(SavedPng {
        path: destination.to_path_buf(),
    })
}

/// Map the 0-100 quality hint onto deflate effort.
/// PNG is lossless, so this only trades speed against file size.
fn compression_for(quality: u8) -> CompressionType {
    match quality {
        90..=u8::MAX => CompressionType::Best,
        50..=89 => CompressionType::Default,
        _ => CompressionType::Fast,
    }
}

fn write_error(destination: &Path, err: impl std::fmt::Display) -> PipelineError {
    PipelineError::Write(format!("Failed to write {}: {}", destination.display(), err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::test_support::{encode, gradient, PNG_SIGNATURE};
    use image::{ColorType, DynamicImage, GenericImageView, ImageFormat};

    #[test]
    fn test_jpeg_becomes_png_with_same_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out.png");
        let jpeg = encode(&DynamicImage::ImageRgb8(gradient(64, 48)), ImageFormat::Jpeg);

        let saved = convert_to_png_blocking(&jpeg, &dest, 97).unwrap();
        assert_eq!(saved.path(), dest.as_path());

        let written = std::fs::read(&dest).unwrap();
        assert_eq!(&written[..8], PNG_SIGNATURE);

        let reopened = image::open(&dest).unwrap();
        assert_eq!(reopened.dimensions(), (64, 48));
        assert_eq!(reopened.color(), ColorType::Rgba8);
    }

    #[test]
    fn test_grey_source_is_normalized_to_rgba() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("grey.png");
        let grey = DynamicImage::ImageRgb8(gradient(10, 20)).grayscale();
        let bytes = encode(&grey, ImageFormat::Png);

        convert_to_png_blocking(&bytes, &dest, 97).unwrap();

        let reopened = image::open(&dest).unwrap();
        assert_eq!(reopened.color(), ColorType::Rgba8);
        assert_eq!(reopened.dimensions(), (10, 20));
        // Lossless source, so every pixel survives
        assert_eq!(reopened.to_luma8(), grey.to_luma8());
    }

    #[test]
    fn test_quality_does_not_change_pixels() {
        let dir = tempfile::tempdir().unwrap();
        let bytes = encode(&DynamicImage::ImageRgb8(gradient(32, 32)), ImageFormat::Png);

        let fast = dir.path().join("fast.png");
        let best = dir.path().join("best.png");
        convert_to_png_blocking(&bytes, &fast, 10).unwrap();
        convert_to_png_blocking(&bytes, &best, 97).unwrap();

        assert_eq!(
            image::open(&fast).unwrap().to_rgba8(),
            image::open(&best).unwrap().to_rgba8()
        );
    }

    #[test]
    fn test_corrupt_bytes_are_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("never.png");

        let result = convert_to_png_blocking(b"<html>not an image</html>", &dest, 97);
        assert!(matches!(result, Err(PipelineError::Decode(_))));
        assert!(!dest.exists());
    }

    #[test]
    fn test_missing_directory_is_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("no/such/dir/out.png");
        let bytes = encode(&DynamicImage::ImageRgb8(gradient(4, 4)), ImageFormat::Png);

        let result = convert_to_png_blocking(&bytes, &dest, 97);
        assert!(matches!(result, Err(PipelineError::Write(_))));
    }

    #[test]
    fn test_compression_mapping() {
        assert!(matches!(compression_for(97), CompressionType::Best));
        assert!(matches!(compression_for(75), CompressionType::Default));
        assert!(matches!(compression_for(0), CompressionType::Fast));
    }

    #[tokio::test]
    async fn test_async_conversion() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("async.png");
        let bytes = encode(&DynamicImage::ImageRgb8(gradient(8, 8)), ImageFormat::Jpeg);

        let saved = convert_to_png(bytes, dest.clone(), 97).await.unwrap();
        assert!(saved.path().exists());
    }
}
