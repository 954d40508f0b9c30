/// The analysis report panel
///
/// Shows nothing extra while idle, a progress header while analyzing, a
/// failure banner on error, and on success the conclusion with a score
/// gauge plus the diagnosis and therapy cards.

use iced::widget::canvas::{self, Path, Stroke};
use iced::widget::{column, container, row, text, Space};
use iced::{Alignment, Color, Element, Length, Radians};

use crate::i18n::UiText;
use crate::state::data::{AnalysisResult, LoadingState};
use crate::Message;

pub fn view<'a>(
    loading: LoadingState,
    result: Option<&'a AnalysisResult>,
    t: UiText,
) -> Element<'a, Message> {
    let mut panel = column![].spacing(16).width(Length::Fill);

    if let Some(header) = header_view(loading, result, t) {
        panel = panel.push(header);
    }

    let diagnosis = card_view(
        t.diagnosis_title,
        result.map(|r| r.diagnosis.as_str()),
        loading,
        t,
    );
    let therapy = card_view(
        t.therapy_title,
        result.map(|r| r.therapy.as_str()),
        loading,
        t,
    );

    panel = panel.push(row![diagnosis, therapy].spacing(16).width(Length::Fill));
    panel.into()
}

/// Conclusion + score when a result exists, progress or failure banner
/// otherwise; nothing while idle with no result
fn header_view<'a>(
    loading: LoadingState,
    result: Option<&'a AnalysisResult>,
    t: UiText,
) -> Option<Element<'a, Message>> {
    let content: Element<'a, Message> = if let Some(result) = result {
        let gauge = iced::widget::canvas(ScoreGauge {
            score: result.score,
        })
        .width(Length::Fixed(84.0))
        .height(Length::Fixed(84.0));

        row![
            column![
                text(&result.conclusion).size(24),
                text("AI-TCM Holistic Diagnosis")
                    .size(12)
                    .color(Color::from_rgb(0.55, 0.55, 0.55)),
            ]
            .spacing(4),
            Space::with_width(Length::Fill),
            column![
                text(t.score)
                    .size(13)
                    .color(Color::from_rgb(0.55, 0.55, 0.55)),
                gauge,
            ]
            .spacing(4)
            .align_x(Alignment::Center),
        ]
        .align_y(Alignment::Center)
        .into()
    } else if loading == LoadingState::Analyzing {
        column![
            text(t.analyzing_title).size(18),
            text(t.analyzing_desc)
                .size(13)
                .color(Color::from_rgb(0.55, 0.55, 0.55)),
        ]
        .spacing(4)
        .into()
    } else if loading == LoadingState::Error {
        text(t.error_title)
            .size(18)
            .color(Color::from_rgb(0.9, 0.3, 0.3))
            .into()
    } else {
        return None;
    };

    Some(
        container(content)
            .padding(16)
            .width(Length::Fill)
            .style(container::rounded_box)
            .into(),
    )
}

/// One titled report card; shows the waiting placeholder until a result
/// is available
fn card_view<'a>(
    title: &'static str,
    body: Option<&'a str>,
    loading: LoadingState,
    t: UiText,
) -> Element<'a, Message> {
    let content: Element<'a, Message> = match body {
        Some(body) => text(body).size(14).into(),
        None => {
            let placeholder = if loading == LoadingState::Analyzing {
                t.analyzing_title
            } else {
                t.waiting
            };
            text(placeholder)
                .size(13)
                .color(Color::from_rgb(0.45, 0.45, 0.45))
                .into()
        }
    };

    container(column![text(title).size(17), content].spacing(10))
        .padding(16)
        .width(Length::FillPortion(1))
        .style(container::rounded_box)
        .into()
}

/// Color band for the health score: green above 80, yellow above 60,
/// red otherwise
pub fn score_color(score: u32) -> Color {
    if score > 80 {
        Color::from_rgb(0.3, 0.85, 0.45)
    } else if score > 60 {
        Color::from_rgb(0.95, 0.8, 0.25)
    } else {
        Color::from_rgb(0.9, 0.3, 0.3)
    }
}

/// Circular score gauge: a full track plus an arc proportional to the
/// score, with the number in the middle
#[derive(Debug, Clone, Copy)]
pub struct ScoreGauge {
    pub score: u32,
}

impl canvas::Program<Message> for ScoreGauge {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        _theme: &iced::Theme,
        bounds: iced::Rectangle,
        _cursor: iced::mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());
        let center = frame.center();
        let radius = frame.width().min(frame.height()) / 2.0 - 5.0;

        let track = Path::circle(center, radius);
        frame.stroke(
            &track,
            Stroke::default()
                .with_color(Color::from_rgb(0.2, 0.2, 0.2))
                .with_width(6.0),
        );

        // Sweep clockwise from 12 o'clock
        let start = -std::f32::consts::FRAC_PI_2;
        let sweep = self.score.min(100) as f32 / 100.0 * std::f32::consts::TAU;
        if sweep > 0.0 {
            let mut builder = canvas::path::Builder::new();
            builder.arc(canvas::path::Arc {
                center,
                radius,
                start_angle: Radians(start),
                end_angle: Radians(start + sweep),
            });
            frame.stroke(
                &builder.build(),
                Stroke::default()
                    .with_color(score_color(self.score))
                    .with_width(6.0),
            );
        }

        frame.fill_text(canvas::Text {
            content: self.score.to_string(),
            position: center,
            color: score_color(self.score),
            size: 26.0.into(),
            horizontal_alignment: iced::alignment::Horizontal::Center,
            vertical_alignment: iced::alignment::Vertical::Center,
            ..canvas::Text::default()
        });

        vec![frame.into_geometry()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_color_bands() {
        assert_eq!(score_color(90), Color::from_rgb(0.3, 0.85, 0.45));
        assert_eq!(score_color(81), Color::from_rgb(0.3, 0.85, 0.45));
        assert_eq!(score_color(75), Color::from_rgb(0.95, 0.8, 0.25));
        assert_eq!(score_color(60), Color::from_rgb(0.9, 0.3, 0.3));
        assert_eq!(score_color(0), Color::from_rgb(0.9, 0.3, 0.3));
    }
}
