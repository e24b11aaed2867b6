use rfd::{AsyncMessageDialog, MessageButtons, MessageLevel};

use crate::error::PipelineError;

/// Show a modal for a pipeline error and wait for it to be dismissed.
///
/// Async so the window repaints (progress bar stopped, status updated)
/// before the dialog takes over.
pub async fn notify(err: PipelineError) {
    let level = if err.is_warning() {
        MessageLevel::Warning
    } else {
        MessageLevel::Error
    };

    let _ = AsyncMessageDialog::new()
        .set_level(level)
        .set_title(err.title())
        .set_description(err.to_string())
        .set_buttons(MessageButtons::Ok)
        .show()
        .await;
}
