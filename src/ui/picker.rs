use log::info;
use rfd::FileDialog;
use std::path::PathBuf;

use crate::config;

/// Ask the user where to save the PNG.
/// Returns `None` if the dialog was cancelled.
pub fn pick_save_path() -> Option<String> {
    let mut dialog = FileDialog::new()
        .set_title("Save image as")
        .add_filter("PNG files", &["png"])
        .set_file_name("image.png");

    if let Some(dir) = config::default_save_dir() {
        dialog = dialog.set_directory(dir);
    }

    let picked = dialog.save_file()?;
    let path = normalize_picked_path(picked, cfg!(windows));
    info!("📁 Save path: {}", path);
    Some(path)
}

/// Force a `.png` extension and, on Windows, backslash separators
pub fn normalize_picked_path(mut path: PathBuf, windows: bool) -> String {
    if path.extension().is_none() {
        path.set_extension("png");
    }

    let path = path.to_string_lossy().into_owned();
    if windows {
        path.replace('/', "\\")
    } else {
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_extension_defaults_to_png() {
        let path = normalize_picked_path(PathBuf::from("/home/me/cat"), false);
        assert_eq!(path, "/home/me/cat.png");
    }

    #[test]
    fn test_existing_extension_is_kept() {
        let path = normalize_picked_path(PathBuf::from("/home/me/cat.PNG"), false);
        assert_eq!(path, "/home/me/cat.PNG");
    }

    #[test]
    fn test_forward_slashes_become_backslashes_on_windows() {
        let path = normalize_picked_path(PathBuf::from("C:/Users/me/cat.png"), true);
        assert_eq!(path, "C:\\Users\\me\\cat.png");
    }

    #[test]
    fn test_other_platforms_keep_forward_slashes() {
        let path = normalize_picked_path(PathBuf::from("/tmp/a/b.png"), false);
        assert_eq!(path, "/tmp/a/b.png");
    }
}
