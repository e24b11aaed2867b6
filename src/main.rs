use iced::widget::image::Handle;
use iced::widget::{button, column, container, image as image_view, progress_bar, row, text, text_input, Column};
use iced::{time, Alignment, Element, Length, Subscription, Task, Theme};
use log::info;
use std::sync::Arc;
use std::time::Duration;

mod config;
mod error;
mod imaging;
mod net;
mod state;
mod ui;

use config::Settings;
use error::PipelineError;
use net::{Fetcher, HttpFetcher};
use state::data::PreviewInfo;
use state::pipeline::{self, Controller, Event, Job, Outcome};

/// Width of the field labels so both inputs line up
const LABEL_WIDTH: f32 = 80.0;

/// The thumbnail and size label currently on screen
struct DisplayedPreview {
    handle: Handle,
    size_label: String,
}

impl From<PreviewInfo> for DisplayedPreview {
    fn from(preview: PreviewInfo) -> Self {
        info!(
            "🖼️  Showing {} ({} bytes)",
            preview.path.display(),
            preview.size_bytes
        );
        let (width, height) = preview.thumbnail.dimensions();
        Self {
            handle: Handle::from_rgba(width, height, preview.thumbnail.into_raw()),
            size_label: preview.size_label,
        }
    }
}

/// Main application state
struct ImageDownloader {
    /// Contents of the URL field
    url: String,
    /// Contents of the save path field
    save_path: String,
    /// Run state machine
    controller: Controller,
    fetcher: Arc<dyn Fetcher>,
    settings: Settings,
    /// Position of the indeterminate progress animation (0-100)
    pulse: f32,
    /// Replaced (and the old one dropped) on every successful run
    preview: Option<DisplayedPreview>,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    UrlChanged(String),
    SavePathChanged(String),
    /// User clicked "Browse"
    Browse,
    /// User clicked "GO" or pressed Enter in the URL field
    Go,
    /// A pipeline job finished
    Pipeline(Event),
    /// Progress animation frame
    Tick,
    /// Error dialog dismissed
    DialogClosed,
}

impl ImageDownloader {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let settings = Settings::default();

        // If this fails, we panic because the app cannot function without an HTTP client
        let fetcher = HttpFetcher::new(&settings)
            .expect("Failed to initialize HTTP client. Check TLS support.");

        info!("🎨 Image Downloader ready");

        (
            ImageDownloader {
                url: String::new(),
                save_path: String::new(),
                controller: Controller::new(),
                fetcher: Arc::new(fetcher),
                settings,
                pulse: 0.0,
                preview: None,
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::UrlChanged(url) => {
                self.url = url;
                Task::none()
            }
            Message::SavePathChanged(path) => {
                self.save_path = path;
                Task::none()
            }
            Message::Browse => {
                // Show the native save dialog; cancelling keeps the current path
                if let Some(path) = ui::picker::pick_save_path() {
                    self.save_path = path;
                }
                Task::none()
            }
            Message::Go => match self.controller.run(&self.url, &self.save_path) {
                Ok(job) => {
                    self.pulse = 0.0;
                    self.start(job)
                }
                Err(e) => report(e),
            },
            Message::Pipeline(event) => match self.controller.advance(event) {
                Outcome::Continue(job) => self.start(job),
                Outcome::Finished(preview) => {
                    self.preview = Some(DisplayedPreview::from(preview));
                    Task::none()
                }
                Outcome::Failed(e) => report(e),
                Outcome::Ignored => Task::none(),
            },
            Message::Tick => {
                self.pulse = (self.pulse + 2.0) % 100.0;
                Task::none()
            }
            Message::DialogClosed => Task::none(),
        }
    }

    /// Launch a pipeline job in the background
    fn start(&self, job: Job) -> Task<Message> {
        Task::perform(
            pipeline::perform(job, Arc::clone(&self.fetcher), self.settings),
            Message::Pipeline,
        )
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let url_row = row![
            text("URL:").width(LABEL_WIDTH),
            text_input("https://example.com/picture.jpg", &self.url)
                .on_input(Message::UrlChanged)
                .on_submit(Message::Go)
                .padding(5),
        ]
        .spacing(5)
        .align_y(Alignment::Center);

        let path_row = row![
            text("Save Path:").width(LABEL_WIDTH),
            text_input("", &self.save_path)
                .on_input(Message::SavePathChanged)
                .padding(5),
            button("Browse")
                .on_press(Message::Browse)
                .padding(5),
        ]
        .spacing(5)
        .align_y(Alignment::Center);

        let go = button("GO")
            .on_press_maybe((!self.controller.is_busy()).then_some(Message::Go))
            .padding(10);

        let progress = if self.controller.stage().shows_progress() {
            self.pulse
        } else {
            0.0
        };

        let status_row = row![
            progress_bar(0.0..=100.0, progress)
                .width(Length::Fixed(150.0))
                .height(Length::Fixed(12.0)),
            text(self.controller.status_text()).size(16),
        ]
        .spacing(10)
        .align_y(Alignment::Center);

        let mut content: Column<Message> = column![url_row, path_row, go, status_row]
            .spacing(15)
            .padding(20)
            .align_x(Alignment::Center);

        if let Some(preview) = &self.preview {
            content = content
                .push(text(&preview.size_label))
                .push(image_view(preview.handle.clone()));
        }

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .into()
    }

    /// Animate the progress bar only while downloading
    fn subscription(&self) -> Subscription<Message> {
        if self.controller.stage().shows_progress() {
            time::every(Duration::from_millis(30)).map(|_| Message::Tick)
        } else {
            Subscription::none()
        }
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// Surface an error as a modal dialog
fn report(err: PipelineError) -> Task<Message> {
    Task::perform(ui::dialog::notify(err), |_| Message::DialogClosed)
}

fn main() -> iced::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    iced::application(
        config::WINDOW_TITLE,
        ImageDownloader::update,
        ImageDownloader::view,
    )
    .subscription(ImageDownloader::subscription)
    .theme(ImageDownloader::theme)
    .window_size(config::WINDOW_SIZE)
    .centered()
    .run_with(ImageDownloader::new)
}
