use std::time::Duration;

use iced::widget::image::Handle;
use iced::widget::{button, column, container, row, scrollable, text};
use iced::{Alignment, Element, Length, Subscription, Task, Theme};
use log::{error, info, warn};
use rfd::FileDialog;

mod capture;
mod config;
mod gemini;
mod i18n;
mod state;
mod ui;

use capture::{file, CameraFeed, CaptureError};
use config::Config;
use gemini::AnalysisClient;
use i18n::UiText;
use state::data::{AnalysisRequest, AnalysisResult, ImageFile, Language, Slot};
use state::session::{Session, SessionEvent};

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// User switched the display language
    LanguageSelected(Language),
    /// User pressed the camera button on one slot
    StartCamera(Slot),
    /// Background camera acquisition finished
    CameraStarted(Slot, Result<CameraFeed, CaptureError>),
    /// Preview refresh while a camera feed is live
    CameraTick,
    /// User pressed the shutter
    TakeSnapshot(Slot),
    /// User closed the camera without taking a picture
    CancelCamera(Slot),
    /// User pressed the upload button on one slot
    PickFile(Slot),
    /// Background file read finished
    FileLoaded(Slot, Result<ImageFile, CaptureError>),
    /// User cleared one slot's image
    ClearImage(Slot),
    /// User pressed the analyze button
    Analyze,
    /// The Gemini call finished (error already stringified for the log)
    AnalysisFinished(Result<AnalysisResult, String>),
}

/// UI-only state for one capture slot
///
/// The canonical image lives in the session; this holds the live feed
/// handle, the decoded preview texture, and the last capture error.
#[derive(Default)]
struct SlotUi {
    feed: Option<CameraFeed>,
    preview: Option<Handle>,
    error: Option<CaptureError>,
}

/// Main application state
struct FaceScan {
    /// The analysis session state machine
    session: Session,
    /// Gemini client built from startup configuration
    client: AnalysisClient,
    face_ui: SlotUi,
    tongue_ui: SlotUi,
}

impl FaceScan {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let config = Config::load();
        let client = AnalysisClient::new(&config);

        info!("🩺 FaceHealth Scan initialized");

        (
            FaceScan {
                session: Session::new(),
                client,
                face_ui: SlotUi::default(),
                tongue_ui: SlotUi::default(),
            },
            Task::none(),
        )
    }

    fn slot_ui(&self, slot: Slot) -> &SlotUi {
        match slot {
            Slot::Face => &self.face_ui,
            Slot::Tongue => &self.tongue_ui,
        }
    }

    fn slot_ui_mut(&mut self, slot: Slot) -> &mut SlotUi {
        match slot {
            Slot::Face => &mut self.face_ui,
            Slot::Tongue => &mut self.tongue_ui,
        }
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::LanguageSelected(language) => {
                self.apply_session(SessionEvent::LanguageChanged(language))
            }

            Message::StartCamera(slot) => {
                if self.slot_ui(slot).feed.is_some() {
                    return Task::none();
                }
                self.slot_ui_mut(slot).error = None;
                Task::perform(CameraFeed::start(), move |result| {
                    Message::CameraStarted(slot, result)
                })
            }

            Message::CameraStarted(slot, Ok(feed)) => {
                let slot_ui = self.slot_ui_mut(slot);
                if slot_ui.feed.is_some() {
                    // A feed is already live for this slot; release the
                    // extra device lock immediately.
                    feed.stop();
                } else {
                    slot_ui.feed = Some(feed);
                }
                Task::none()
            }

            Message::CameraStarted(slot, Err(e)) => {
                error!("camera acquisition failed: {}", e);
                self.slot_ui_mut(slot).error = Some(e);
                Task::none()
            }

            // The message itself forces a redraw; the view re-reads the
            // latest frame from the feed.
            Message::CameraTick => Task::none(),

            Message::TakeSnapshot(slot) => {
                if let Some(feed) = self.slot_ui(slot).feed.clone() {
                    if let Some(image) = feed.snapshot() {
                        feed.stop();
                        self.slot_ui_mut(slot).feed = None;
                        return self.set_image(slot, image);
                    }
                    // Feed not ready yet: no-op, keep streaming
                }
                Task::none()
            }

            Message::CancelCamera(slot) => {
                if let Some(feed) = self.slot_ui_mut(slot).feed.take() {
                    feed.stop();
                }
                Task::none()
            }

            Message::PickFile(slot) => {
                // Native picker blocks briefly; the actual file read
                // happens on the async task.
                let picked = FileDialog::new()
                    .set_title("Select Photo")
                    .add_filter("Images", file::IMAGE_EXTENSIONS)
                    .pick_file();

                match picked {
                    Some(path) => Task::perform(file::load_image_file(path), move |result| {
                        Message::FileLoaded(slot, result)
                    }),
                    None => Task::none(),
                }
            }

            Message::FileLoaded(slot, Ok(image)) => self.set_image(slot, image),

            Message::FileLoaded(slot, Err(e)) => {
                error!("file intake failed: {}", e);
                self.slot_ui_mut(slot).error = Some(e);
                Task::none()
            }

            Message::ClearImage(slot) => {
                self.slot_ui_mut(slot).preview = None;
                self.apply_session(SessionEvent::ImageCleared(slot))
            }

            Message::Analyze => self.apply_session(SessionEvent::AnalyzeRequested),

            Message::AnalysisFinished(Ok(result)) => {
                info!("✅ Analysis complete (score {})", result.score);
                self.apply_session(SessionEvent::AnalysisSucceeded(result))
            }

            Message::AnalysisFinished(Err(e)) => {
                // Diagnostics only; the user sees the generic failure
                // banner, never this text.
                error!("analysis failed: {}", e);
                self.apply_session(SessionEvent::AnalysisFailed)
            }
        }
    }

    /// Store a freshly captured image and its decoded preview
    fn set_image(&mut self, slot: Slot, image: ImageFile) -> Task<Message> {
        match image.decode() {
            Ok(bytes) => self.slot_ui_mut(slot).preview = Some(Handle::from_bytes(bytes)),
            Err(e) => warn!("preview decode failed: {}", e),
        }
        self.slot_ui_mut(slot).error = None;
        self.apply_session(SessionEvent::ImageSelected(slot, image))
    }

    /// Run one event through the session; start the Gemini call when the
    /// transition demands one
    fn apply_session(&mut self, event: SessionEvent) -> Task<Message> {
        match self.session.apply(event) {
            Some(request) => self.spawn_analysis(request),
            None => Task::none(),
        }
    }

    fn spawn_analysis(&self, request: AnalysisRequest) -> Task<Message> {
        info!("🩺 Starting analysis ({:?})", request.language);
        let client = self.client.clone();
        Task::perform(
            async move { client.analyze(request).await.map_err(|e| e.to_string()) },
            Message::AnalysisFinished,
        )
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let t = UiText::for_language(self.session.language());

        let face_slot = ui::capture_slot::view(
            Slot::Face,
            t.face_label,
            t.mandatory,
            t,
            self.face_ui.preview.as_ref(),
            self.face_ui.feed.as_ref(),
            self.face_ui.error.as_ref().map(|_| t.error_camera),
        );

        let tongue_slot = ui::capture_slot::view(
            Slot::Tongue,
            t.tongue_label,
            t.optional,
            t,
            self.tongue_ui.preview.as_ref(),
            self.tongue_ui.feed.as_ref(),
            self.tongue_ui.error.as_ref().map(|_| t.error_camera),
        );

        let mut action = column![button(text(t.start).size(16))
            .padding([10.0, 28.0])
            .on_press_maybe(self.session.can_analyze().then_some(Message::Analyze))]
        .spacing(8)
        .align_x(Alignment::Center);

        if self.session.image(Slot::Face).is_none() {
            action = action.push(
                text(t.need_face_hint)
                    .size(12)
                    .color(iced::Color::from_rgb(0.55, 0.55, 0.55)),
            );
        }

        let capture_row = row![face_slot, action, tongue_slot]
            .spacing(24)
            .align_y(Alignment::Center);

        let report = ui::report::view(self.session.loading(), self.session.result(), t);

        let content = column![
            ui::header::view(self.session.language(), t),
            container(capture_row).center_x(Length::Fill),
            report,
        ]
        .spacing(20)
        .padding(20);

        scrollable(content).into()
    }

    /// Preview refresh ticks, only while a camera feed is live
    fn subscription(&self) -> Subscription<Message> {
        if self.face_ui.feed.is_some() || self.tongue_ui.feed.is_some() {
            iced::time::every(Duration::from_millis(33)).map(|_| Message::CameraTick)
        } else {
            Subscription::none()
        }
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    env_logger::init();

    iced::application("AI FaceHealth Scan", FaceScan::update, FaceScan::view)
        .subscription(FaceScan::subscription)
        .theme(FaceScan::theme)
        .centered()
        .run_with(FaceScan::new)
}
