/// One capture slot (face or tongue)
///
/// Renders one of three states:
/// 1. Live camera: mirrored preview, shutter (disabled until the first
///    frame arrived) and cancel.
/// 2. Image preview: the captured/uploaded picture with a clear button.
/// 3. Empty: camera and upload buttons, plus the localized capture error
///    when the camera could not be acquired.

use iced::widget::image::Handle;
use iced::widget::{button, column, container, row, text};
use iced::{Alignment, Color, Element, Length};

use crate::capture::CameraFeed;
use crate::i18n::UiText;
use crate::state::data::Slot;
use crate::Message;

const SLOT_WIDTH: f32 = 340.0;
const SLOT_HEIGHT: f32 = 300.0;

pub fn view<'a>(
    slot: Slot,
    label: &'static str,
    tag: &'static str,
    t: UiText,
    preview: Option<&'a Handle>,
    feed: Option<&'a CameraFeed>,
    error: Option<&'a str>,
) -> Element<'a, Message> {
    let heading = row![
        text(label).size(18),
        text(tag).size(14).color(Color::from_rgb(0.35, 0.55, 0.95)),
    ]
    .spacing(6)
    .align_y(Alignment::Center);

    let body: Element<'a, Message> = if let Some(feed) = feed {
        camera_view(slot, feed)
    } else if let Some(handle) = preview {
        preview_view(slot, handle)
    } else {
        empty_view(slot, t, error)
    };

    column![
        heading,
        container(body)
            .center_x(Length::Fixed(SLOT_WIDTH))
            .center_y(Length::Fixed(SLOT_HEIGHT))
            .style(container::rounded_box),
    ]
    .spacing(8)
    .align_x(Alignment::Center)
    .into()
}

/// Live feed with shutter and cancel controls
fn camera_view<'a>(slot: Slot, feed: &'a CameraFeed) -> Element<'a, Message> {
    // The worker stores frames already mirrored, so the preview shows
    // exactly what a snapshot would keep.
    let preview: Element<'a, Message> = match feed.latest_frame() {
        Some(frame) => {
            let (width, height) = frame.dimensions();
            let rgba = image::DynamicImage::ImageRgb8(frame).into_rgba8();
            iced::widget::image(Handle::from_rgba(width, height, rgba.into_raw()))
                .width(Length::Fill)
                .height(Length::Fill)
                .into()
        }
        None => text("...").size(24).into(),
    };

    // Shutter stays disabled until the feed produced a decodable frame
    let shutter = button(text("●").size(22))
        .padding([6.0, 16.0])
        .on_press_maybe(feed.is_ready().then_some(Message::TakeSnapshot(slot)));

    let cancel = button(text("✕").size(16))
        .style(button::secondary)
        .padding([6.0, 12.0])
        .on_press(Message::CancelCamera(slot));

    column![
        container(preview).height(Length::Fill),
        row![cancel, shutter].spacing(16),
    ]
    .spacing(8)
    .align_x(Alignment::Center)
    .into()
}

/// Captured/uploaded image with a clear control
fn preview_view<'a>(slot: Slot, handle: &'a Handle) -> Element<'a, Message> {
    column![
        iced::widget::image(handle.clone())
            .width(Length::Fill)
            .height(Length::Fill),
        button(text("✕").size(14))
            .style(button::danger)
            .padding([4.0, 10.0])
            .on_press(Message::ClearImage(slot)),
    ]
    .spacing(8)
    .align_x(Alignment::Center)
    .into()
}

/// Empty slot: the two acquisition buttons
fn empty_view<'a>(slot: Slot, t: UiText, error: Option<&'a str>) -> Element<'a, Message> {
    let mut content = column![
        button(text(t.start_camera).size(14))
            .padding([8.0, 20.0])
            .on_press(Message::StartCamera(slot)),
        button(text(t.upload_photo).size(14))
            .style(button::secondary)
            .padding([8.0, 20.0])
            .on_press(Message::PickFile(slot)),
    ]
    .spacing(10)
    .align_x(Alignment::Center);

    if let Some(message) = error {
        content = content.push(
            text(message)
                .size(13)
                .color(Color::from_rgb(0.9, 0.3, 0.3)),
        );
    }

    content.into()
}
