/// Shared data structures for the application state
/// 
/// These structs represent the data model that flows between
/// the pipeline and the UI layer.
use image::RgbaImage;
use std::path::PathBuf;

use crate::error::{PipelineError, PipelineResult};

/// One user-triggered run: where to download from and where to save
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    /// Remote image URL, passed to the HTTP client as typed
    pub url: String,
    /// Destination of the PNG file
    pub destination: PathBuf,
}

impl ImageRequest {
    /// Build a request from the form fields.
    /// Both fields must contain something other than whitespace.
    pub fn from_form(url: &str, destination: &str) -> PipelineResult<Self> {
        let url = url.trim();
        let destination = destination.trim();

        if url.is_empty() || destination.is_empty() {
            return Err(PipelineError::InputValidation(
                "Please provide both URL and file path.".to_string(),
            ));
        }

        Ok(Self {
            url: url.to_string(),
            destination: PathBuf::from(destination),
        })
    }
}

/// What the preview pane shows after a successful run
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewInfo {
    /// The PNG this preview was built from
    pub path: PathBuf,
    /// Downscaled copy fitting the preview box
    pub thumbnail: RgbaImage,
    /// Size of the file on disk
    pub size_bytes: u64,
    /// e.g. "File size: 12.34 KB"
    pub size_label: String,
}
