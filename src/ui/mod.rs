/// Thin wrappers around native dialogs
///
/// - `picker.rs` - save-location dialog and path normalization
/// - `dialog.rs` - modal warning/error notifications

pub mod picker;
pub mod dialog;
