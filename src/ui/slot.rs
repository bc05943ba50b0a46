use iced::widget::{button, column, container, image, text};
use iced::{Alignment, Element, Length};

use crate::state::data::{EncodedImage, SlotKind};
use crate::Message;

/// One labeled upload slot: a preview with a clear affordance once an
/// image is loaded, a browse affordance otherwise.
pub fn upload_slot(
    kind: SlotKind,
    slot: Option<&EncodedImage>,
    hovering: bool,
) -> Element<'_, Message> {
    let body: Element<Message> = match slot {
        Some(loaded) => column![
            image(image::Handle::from_bytes(loaded.bytes.clone())).width(Length::Fill),
            button("Remove").on_press(Message::ClearSlot(kind)).padding(6),
        ]
        .spacing(10)
        .align_x(Alignment::Center)
        .into(),

        None => {
            let placeholder = match kind {
                SlotKind::Model => "Upload person",
                SlotKind::Garment => "Upload clothes",
            };
            let hint = if hovering {
                "Drop the file to add it"
            } else {
                "or drop a file onto the window"
            };

            column![
                button(placeholder).on_press(Message::PickImage(kind)).padding(10),
                text(hint).size(12),
            ]
            .spacing(10)
            .align_x(Alignment::Center)
            .into()
        }
    };

    column![
        text(kind.label()).size(16),
        container(body).width(Length::Fill).padding(10),
    ]
    .spacing(8)
    .width(Length::FillPortion(1))
    .into()
}
