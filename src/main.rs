use base64::{engine::general_purpose::STANDARD, Engine as _};
use iced::widget::image::Handle;
use iced::widget::{button, column, container, row, text};
use iced::{event, window, Alignment, Element, Event, Length, Subscription, Task, Theme};
use rfd::{FileDialog, MessageDialog, MessageLevel};
use std::path::PathBuf;

mod intake;
mod state;
mod tryon;
mod ui;

use intake::IntakeError;
use state::data::SlotKind;
use state::session::Session;
use tryon::client::{TryOnClient, TryOnError};

/// Suggested filename for saving the generated look
const RESULT_FILENAME: &str = "fit-studio-tryon.png";

/// Main application state
struct FitStudio {
    /// The try-on session state machine
    session: Session,
    /// Client for the generative API, credential injected at startup
    client: TryOnClient,
    /// Whether a file is currently dragged over the window (visual only)
    hovering: bool,
    /// Decoded result image, cached for display
    result_preview: Option<Handle>,
    /// Status message to display to the user
    status_line: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// User asked to browse for an image for one slot
    PickImage(SlotKind),
    /// Background intake finished for one slot
    ImageLoaded(SlotKind, Result<state::data::EncodedImage, IntakeError>),
    /// User cleared one slot
    ClearSlot(SlotKind),
    /// A file is dragged over the window
    FileHovered,
    /// The dragged file left the window
    FileHoverLeft,
    /// A file was dropped onto the window
    FileDropped(PathBuf),
    /// User clicked the generate button
    Generate,
    /// The remote call for the tagged attempt finished
    GenerationFinished(u64, Result<String, TryOnError>),
    /// User started over
    Reset,
    /// User asked to save the result image
    SaveResult,
    /// Background save finished
    ResultSaved(Result<PathBuf, String>),
}

impl FitStudio {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let client = TryOnClient::from_env();

        println!(
            "🧵 Fit Studio initialized (credential configured: {})",
            client.has_credential()
        );

        let status_line = if client.has_credential() {
            "Ready. Add a model photo and a garment to begin.".to_string()
        } else {
            format!(
                "⚠️  {} is not set; generation will fail until it is.",
                tryon::client::API_KEY_VAR
            )
        };

        (
            FitStudio {
                session: Session::new(),
                client,
                hovering: false,
                result_preview: None,
                status_line,
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PickImage(kind) => {
                // Show the native file picker dialog
                let title = format!("Select an image for {}", kind.label());
                let file = FileDialog::new()
                    .set_title(title.as_str())
                    .add_filter("Images", &["png", "jpg", "jpeg", "gif", "webp", "bmp"])
                    .pick_file();

                match file {
                    Some(path) => load_slot_task(kind, path),
                    None => Task::none(),
                }
            }

            Message::ImageLoaded(kind, Ok(image)) => {
                self.session.set_slot(kind, image);
                self.status_line = format!("{} loaded.", kind.label());
                Task::none()
            }

            Message::ImageLoaded(_, Err(error)) => {
                // Immediate alert; the session stays untouched
                let description = error.to_string();
                MessageDialog::new()
                    .set_level(MessageLevel::Warning)
                    .set_title("Cannot use this file")
                    .set_description(description.as_str())
                    .show();
                Task::none()
            }

            Message::ClearSlot(kind) => {
                self.session.clear_slot(kind);
                self.status_line = format!("{} cleared.", kind.label());
                Task::none()
            }

            Message::FileHovered => {
                self.hovering = true;
                Task::none()
            }

            Message::FileHoverLeft => {
                self.hovering = false;
                Task::none()
            }

            Message::FileDropped(path) => {
                self.hovering = false;
                match self.session.first_empty_slot() {
                    Some(kind) => load_slot_task(kind, path),
                    None => {
                        self.status_line =
                            "Both slots are full. Remove an image first.".to_string();
                        Task::none()
                    }
                }
            }

            Message::Generate => {
                if let Some((token, person, garment)) = self.session.begin_generation() {
                    self.result_preview = None;
                    self.status_line = "Generating your look…".to_string();

                    let client = self.client.clone();
                    return Task::perform(
                        async move { client.generate(&person, &garment).await },
                        move |result| Message::GenerationFinished(token, result),
                    );
                }

                Task::none()
            }

            Message::GenerationFinished(token, result) => {
                let outcome = result.clone().map_err(|e| e.to_string());
                if self.session.complete(token, outcome) {
                    match result {
                        Ok(image_url) => {
                            self.result_preview = decode_preview(&image_url);
                            self.status_line = "✅ Look generated.".to_string();
                        }
                        Err(error) => {
                            self.status_line = "Generation failed.".to_string();
                            eprintln!("⚠️  Try-on failed: {}", error);
                        }
                    }
                } else {
                    // The session was reset or superseded while the call
                    // was in flight
                    println!("🗑️  Discarded a stale generation result");
                }
                Task::none()
            }

            Message::Reset => {
                self.session.reset();
                self.hovering = false;
                self.result_preview = None;
                self.status_line = "Ready. Add a model photo and a garment to begin.".to_string();
                Task::none()
            }

            Message::SaveResult => {
                let Some(bytes) = self.session.result_image().and_then(decode_payload) else {
                    return Task::none();
                };

                let file = FileDialog::new()
                    .set_title("Save Try-On Image")
                    .set_file_name(RESULT_FILENAME)
                    .save_file();

                match file {
                    Some(path) => Task::perform(
                        async move {
                            match tokio::fs::write(&path, &bytes).await {
                                Ok(()) => Ok(path),
                                Err(e) => Err(e.to_string()),
                            }
                        },
                        Message::ResultSaved,
                    ),
                    None => Task::none(),
                }
            }

            Message::ResultSaved(Ok(path)) => {
                self.status_line = format!("💾 Saved to {}", path.display());
                Task::none()
            }

            Message::ResultSaved(Err(error)) => {
                self.status_line = format!("Failed to save image: {}", error);
                Task::none()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let slots = row![
            ui::slot::upload_slot(
                SlotKind::Model,
                self.session.slot(SlotKind::Model),
                self.hovering
            ),
            ui::slot::upload_slot(
                SlotKind::Garment,
                self.session.slot(SlotKind::Garment),
                self.hovering
            ),
        ]
        .spacing(20);

        let controls = row![
            button("Generate Look")
                .on_press_maybe(self.session.ready().then(|| Message::Generate))
                .padding(10),
            button("Start Over").on_press(Message::Reset).padding(10),
        ]
        .spacing(20);

        let content = column![
            text("Fit Studio").size(40),
            text("Upload a photo of yourself and a garment you love; the model blends them into one look.")
                .size(14),
            slots,
            controls,
            ui::panel::result_panel(&self.session, self.result_preview.as_ref()),
            text(&self.status_line).size(14),
        ]
        .spacing(20)
        .padding(30)
        .align_x(Alignment::Center)
        .max_width(900);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .into()
    }

    /// Window file-drag events feed the upload slots
    fn subscription(&self) -> Subscription<Message> {
        event::listen_with(|event, _status, _window| match event {
            Event::Window(window::Event::FileHovered(_)) => Some(Message::FileHovered),
            Event::Window(window::Event::FilesHoveredLeft) => Some(Message::FileHoverLeft),
            Event::Window(window::Event::FileDropped(path)) => Some(Message::FileDropped(path)),
            _ => None,
        })
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    iced::application("Fit Studio", FitStudio::update, FitStudio::view)
        .subscription(FitStudio::subscription)
        .theme(FitStudio::theme)
        .centered()
        .run_with(FitStudio::new)
}

/// Launch the async intake for a slot
fn load_slot_task(kind: SlotKind, path: PathBuf) -> Task<Message> {
    Task::perform(intake::load_image(path), move |result| {
        Message::ImageLoaded(kind, result)
    })
}

/// Decode a result data URL into displayable bytes
fn decode_payload(data_url: &str) -> Option<Vec<u8>> {
    let (_, payload) = data_url.split_once(',')?;
    STANDARD.decode(payload).ok()
}

/// Build an image handle for the result preview
fn decode_preview(data_url: &str) -> Option<Handle> {
    decode_payload(data_url).map(Handle::from_bytes)
}
