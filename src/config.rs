/// Application settings
///
/// There is no config file or command line: everything comes from the
/// defaults below. Log verbosity is controlled separately through `RUST_LOG`.
use std::path::PathBuf;
use std::time::Duration;

/// Side of the square box thumbnails must fit in
pub const THUMBNAIL_BOX: u32 = 300;

/// Compression-effort hint passed to the PNG encoder (0-100)
pub const PNG_QUALITY: u8 = 97;

/// Window dimensions in logical pixels
pub const WINDOW_SIZE: (f32, f32) = (500.0, 600.0);

pub const WINDOW_TITLE: &str = "Image Downloader";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    /// Thumbnails are scaled down to fit `thumbnail_box` x `thumbnail_box`
    pub thumbnail_box: u32,
    /// PNG compression hint, never changes pixels
    pub png_quality: u8,
    /// `None` leaves the HTTP client without a timeout
    pub fetch_timeout: Option<Duration>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            thumbnail_box: THUMBNAIL_BOX,
            png_quality: PNG_QUALITY,
            fetch_timeout: None,
        }
    }
}

/// Starting directory for the save dialog
/// Pictures on every platform that has one, home otherwise
pub fn default_save_dir() -> Option<PathBuf> {
    dirs::picture_dir().or_else(dirs::home_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.thumbnail_box, 300);
        assert_eq!(settings.png_quality, 97);
        assert!(settings.fetch_timeout.is_none());
    }
}
