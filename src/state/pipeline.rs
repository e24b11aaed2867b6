/// Download-convert-preview controller
///
/// The controller owns the run state machine:
///
/// ```text
/// Idle -> Downloading -> Converting -> Previewing -> Done
///              \              \
///               +-> Failed <---+
/// ```
///
/// Every run gets an id; preview results carrying another run's id are
/// dropped so an old thumbnail never replaces a newer one.
///
/// It never does I/O itself. Each transition hands back a `Job`; the caller
/// executes it with `perform` and feeds the resulting `Event` into `advance`.
/// The iced shell does this through `Task::perform`, tests do it in a loop.
use log::{error, info, warn};
use std::sync::Arc;

use super::data::{ImageRequest, PreviewInfo};
use crate::config::Settings;
use crate::error::{PipelineError, PipelineResult};
use crate::imaging::{convert_to_png, render_preview, ConvertResult, PreviewResult, SavedPng};
use crate::net::{FetchResult, Fetcher};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Downloading,
    Converting,
    /// File written, thumbnail being rendered
    Previewing,
    Done,
    Failed,
}

impl Stage {
    /// Status line shown next to the progress bar
    pub fn status_text(&self) -> &'static str {
        match self {
            Stage::Idle => "",
            Stage::Downloading => "Downloading...",
            Stage::Converting => "Converting to PNG...",
            Stage::Previewing | Stage::Done => "Done",
            Stage::Failed => "Failed",
        }
    }

    /// A run is in flight; new runs are refused
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            Stage::Downloading | Stage::Converting | Stage::Previewing
        )
    }

    /// The progress indicator only animates while downloading
    pub fn shows_progress(&self) -> bool {
        matches!(self, Stage::Downloading)
    }
}

/// Work the controller asks its caller to carry out
#[derive(Debug, Clone)]
pub enum Job {
    Fetch(ImageRequest),
    Convert { request: ImageRequest, bytes: Vec<u8> },
    Preview { run: u64, saved: SavedPng },
}

/// Result of a finished `Job`
#[derive(Debug, Clone)]
pub enum Event {
    Fetched(FetchResult),
    Converted(ConvertResult),
    Previewed { run: u64, result: PreviewResult },
}

impl Event {
    fn name(&self) -> &'static str {
        match self {
            Event::Fetched(_) => "fetch result",
            Event::Converted(_) => "convert result",
            Event::Previewed { .. } => "preview result",
        }
    }
}

/// What the caller should do after an event
#[derive(Debug, Clone)]
pub enum Outcome {
    /// Perform the next job
    Continue(Job),
    /// Replace the displayed preview
    Finished(PreviewInfo),
    /// Show the error; the run is over
    Failed(PipelineError),
    /// Event did not belong to the current stage
    Ignored,
}

#[derive(Debug)]
pub struct Controller {
    stage: Stage,
    /// Request of the run in flight, dropped once the file is written
    request: Option<ImageRequest>,
    /// Id of the latest accepted run
    run: u64,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller {
    pub fn new() -> Self {
        Self {
            stage: Stage::Idle,
            request: None,
            run: 0,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn is_busy(&self) -> bool {
        self.stage.is_busy()
    }

    pub fn status_text(&self) -> &'static str {
        self.stage.status_text()
    }

    /// Start a run from the form fields.
    ///
    /// Accepted from `Idle`, `Done` and `Failed`. Empty fields leave the
    /// controller `Idle` and no job is issued.
    pub fn run(&mut self, url: &str, destination: &str) -> PipelineResult<Job> {
        if self.stage.is_busy() {
            return Err(PipelineError::Busy(
                "A download is already in progress.".to_string(),
            ));
        }

        let request = match ImageRequest::from_form(url, destination) {
            Ok(request) => request,
            Err(e) => {
                warn!("⚠️  {}", e);
                self.stage = Stage::Idle;
                self.request = None;
                return Err(e);
            }
        };

        info!("⏳ Downloading {} -> {}", request.url, request.destination.display());
        self.run += 1;
        self.stage = Stage::Downloading;
        self.request = Some(request.clone());

        Ok(Job::Fetch(request))
    }

    /// Feed the result of a job back into the state machine
    pub fn advance(&mut self, event: Event) -> Outcome {
        match (self.stage, event) {
            (Stage::Downloading, Event::Fetched(Ok(bytes))) => {
                let Some(request) = self.request.clone() else {
                    return self.fail(PipelineError::Network(
                        "Download finished without a pending request".to_string(),
                    ));
                };
                info!("🔄 Converting {} bytes to PNG", bytes.len());
                self.stage = Stage::Converting;
                Outcome::Continue(Job::Convert { request, bytes })
            }
            (Stage::Converting, Event::Converted(Ok(saved))) => {
                info!("✅ Done: {}", saved.path().display());
                self.stage = Stage::Previewing;
                self.request = None;
                Outcome::Continue(Job::Preview {
                    run: self.run,
                    saved,
                })
            }
            (Stage::Downloading, Event::Fetched(Err(e)))
            | (Stage::Converting, Event::Converted(Err(e))) => self.fail(e),
            (Stage::Previewing, Event::Previewed { run, result }) if run == self.run => {
                // The file is on disk either way, so the run ends Done
                self.stage = Stage::Done;
                match result {
                    Ok(preview) => Outcome::Finished(preview),
                    Err(e) => {
                        error!("❌ {}", e);
                        Outcome::Failed(e)
                    }
                }
            }
            (stage, event) => {
                warn!("Ignoring {} while {:?}", event.name(), stage);
                Outcome::Ignored
            }
        }
    }

    fn fail(&mut self, e: PipelineError) -> Outcome {
        error!("❌ Run failed while {:?}: {}", self.stage, e);
        self.stage = Stage::Failed;
        self.request = None;
        Outcome::Failed(e)
    }
}

/// Execute a job and report its result as an event
pub async fn perform(job: Job, fetcher: Arc<dyn Fetcher>, settings: Settings) -> Event {
    match job {
        Job::Fetch(request) => Event::Fetched(fetcher.fetch(&request.url).await),
        Job::Convert { request, bytes } => Event::Converted(
            convert_to_png(bytes, request.destination, settings.png_quality).await,
        ),
        Job::Preview { run, saved } => Event::Previewed {
            run,
            result: render_preview(saved, settings.thumbnail_box).await,
        },
    }
}
