/// Application title bar with the language toggle

use iced::widget::{button, column, container, row, text, Space};
use iced::{Alignment, Color, Element, Length};

use crate::i18n::UiText;
use crate::state::data::Language;
use crate::Message;

pub fn view<'a>(language: Language, t: UiText) -> Element<'a, Message> {
    let title = column![
        text(t.app_title).size(20),
        text(t.app_subtitle)
            .size(12)
            .color(Color::from_rgb(0.55, 0.55, 0.55)),
    ]
    .spacing(2);

    let toggle = row![
        language_button("中文", Language::Zh, language),
        language_button("Tiếng Việt", Language::Vi, language),
    ]
    .spacing(4);

    container(
        row![title, Space::with_width(Length::Fill), toggle]
            .align_y(Alignment::Center)
            .padding([10.0, 16.0]),
    )
    .width(Length::Fill)
    .style(container::rounded_box)
    .into()
}

fn language_button<'a>(
    label: &'a str,
    language: Language,
    selected: Language,
) -> Element<'a, Message> {
    let style = if language == selected {
        button::primary
    } else {
        button::secondary
    };

    button(text(label).size(14))
        .style(style)
        .padding([4.0, 10.0])
        .on_press(Message::LanguageSelected(language))
        .into()
}
