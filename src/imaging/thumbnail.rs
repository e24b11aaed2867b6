use image::{imageops::FilterType, DynamicImage};
use log::info;
use std::fs;

use super::convert::SavedPng;
use super::size::human_readable_size;
use crate::error::{PipelineError, PipelineResult};
use crate::state::data::PreviewInfo;

pub type PreviewResult = PipelineResult<PreviewInfo>;

/// Shrink an image to fit a `bound` x `bound` box, keeping its aspect ratio.
/// Images that already fit are returned untouched (never upscaled).
pub fn make_thumbnail(img: &DynamicImage, bound: u32) -> DynamicImage {
    if img.width() <= bound && img.height() <= bound {
        return img.clone();
    }
    img.resize(bound, bound, FilterType::Lanczos3)
}

/// Build the preview for a freshly written PNG
pub async fn render_preview(saved: SavedPng, bound: u32) -> PreviewResult {
    // Spawn blocking task for CPU-bound work
    tokio::task::spawn_blocking(move || render_preview_blocking(&saved, bound))
        .await
        .map_err(|e| PipelineError::Preview(format!("Task join error: {}", e)))?
}

/// Blocking version of preview generation
pub fn render_preview_blocking(saved: &SavedPng, bound: u32) -> PreviewResult {
    let path = saved.path();

    let img = image::open(path)
        .map_err(|e| PipelineError::Preview(format!("Failed to open {}: {}", path.display(), e)))?;
    let thumbnail = make_thumbnail(&img, bound).to_rgba8();

    let size_bytes = fs::metadata(path)
        .map_err(|e| PipelineError::Preview(format!("Failed to read size of {}: {}", path.display(), e)))?
        .len();

    info!(
        "📸 Preview {}x{} for {} ({})",
        thumbnail.width(),
        thumbnail.height(),
        path.display(),
        human_readable_size(size_bytes)
    );

    Ok(PreviewInfo {
        path: path.to_path_buf(),
        thumbnail,
        size_bytes,
        size_label: format!("File size: {}", human_readable_size(size_bytes)),
    })
}
