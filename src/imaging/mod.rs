/// Image processing module
///
/// This module handles:
/// - Decoding downloaded bytes and re-encoding them as PNG
/// - Generating bounded thumbnails for the preview pane
/// - Formatting file sizes for display

pub mod convert;
pub mod thumbnail;
pub mod size;

pub use convert::{convert_to_png, ConvertResult, SavedPng};
pub use thumbnail::{render_preview, PreviewResult};

#[cfg(test)]
pub mod test_support;
