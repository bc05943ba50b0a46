use iced::widget::{button, column, image, text};
use iced::{Alignment, Element, Length};

use crate::state::data::GenerationStatus;
use crate::state::session::Session;
use crate::Message;

/// The result panel: conditional rendering on the generation status,
/// no logic of its own.
pub fn result_panel<'a>(
    session: &'a Session,
    preview: Option<&'a image::Handle>,
) -> Element<'a, Message> {
    let body: Element<Message> = match session.status() {
        GenerationStatus::Idle => text("Your generated look will appear here.")
            .size(16)
            .into(),

        GenerationStatus::Loading => column![
            text("Generating your look…").size(20),
            text("Analyzing fabric drape and lighting.").size(14),
        ]
        .spacing(8)
        .align_x(Alignment::Center)
        .into(),

        GenerationStatus::Success => {
            let picture: Element<Message> = match preview {
                Some(handle) => image(handle.clone()).width(Length::Fill).into(),
                // Outcome arrived but its payload did not decode
                None => text("The result image could not be displayed.").into(),
            };

            column![
                picture,
                button("Save Image").on_press(Message::SaveResult).padding(8),
            ]
            .spacing(12)
            .align_x(Alignment::Center)
            .into()
        }

        GenerationStatus::Error => column![
            text("Generation failed").size(20),
            text(session.error_message().unwrap_or("Unknown error")).size(14),
            text("Adjust the photos and try again, or start over.").size(12),
        ]
        .spacing(8)
        .align_x(Alignment::Center)
        .into(),
    };

    column![text("Virtual Try-On Result").size(16), body]
        .spacing(10)
        .width(Length::Fill)
        .align_x(Alignment::Center)
        .into()
}
