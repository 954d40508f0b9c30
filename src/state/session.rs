/// The analysis session state machine
///
/// One `Session` owns the two image slots, the loading state, the latest
/// result, and the display language. Every external event (user action or
/// I/O completion) goes through the single `apply` transition function,
/// which returns the one side-effect the caller may have to perform:
/// issuing a Gemini call.
///
/// Invariants maintained here:
/// - Face image absent implies Idle with no result (the displayed
///   diagnosis always matches a currently-present face image).
/// - At most one analysis call in flight: triggering while Analyzing
///   emits nothing.

use super::data::{AnalysisRequest, AnalysisResult, ImageFile, Language, LoadingState, Slot};

/// Discrete external events driving the session
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// A capture or upload completed for one slot
    ImageSelected(Slot, ImageFile),
    /// The user cleared one slot
    ImageCleared(Slot),
    /// The user pressed the analyze button
    AnalyzeRequested,
    /// The in-flight Gemini call returned a result
    AnalysisSucceeded(AnalysisResult),
    /// The in-flight Gemini call failed (detail already logged)
    AnalysisFailed,
    /// The user switched the display language
    LanguageChanged(Language),
}

/// Application session state; exclusive owner of images, loading state
/// and the current result
#[derive(Debug, Clone, Default)]
pub struct Session {
    face: Option<ImageFile>,
    tongue: Option<ImageFile>,
    loading: LoadingState,
    result: Option<AnalysisResult>,
    language: Language,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    // Read-only projections for the view layer

    pub fn image(&self, slot: Slot) -> Option<&ImageFile> {
        match slot {
            Slot::Face => self.face.as_ref(),
            Slot::Tongue => self.tongue.as_ref(),
        }
    }

    pub fn loading(&self) -> LoadingState {
        self.loading
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// True when the analyze button should be clickable
    pub fn can_analyze(&self) -> bool {
        self.face.is_some() && self.loading != LoadingState::Analyzing
    }

    /// The single transition function
    ///
    /// Returns `Some(request)` exactly when the caller must start one
    /// Gemini call for this session; `None` otherwise.
    pub fn apply(&mut self, event: SessionEvent) -> Option<AnalysisRequest> {
        match event {
            SessionEvent::ImageSelected(slot, image) => {
                match slot {
                    Slot::Face => self.face = Some(image),
                    Slot::Tongue => self.tongue = Some(image),
                }
                None
            }

            SessionEvent::ImageCleared(slot) => {
                match slot {
                    Slot::Face => {
                        // Whenever the face image goes away, any result is
                        // stale and the session resets unconditionally.
                        self.face = None;
                        self.result = None;
                        self.loading = LoadingState::Idle;
                    }
                    Slot::Tongue => self.tongue = None,
                }
                None
            }

            SessionEvent::AnalyzeRequested => self.start_analysis(),

            SessionEvent::AnalysisSucceeded(result) => {
                // Stale completion guard: clearing the face mid-flight
                // resets to Idle, and a late result must not resurrect a
                // diagnosis for an image that is gone.
                if self.loading == LoadingState::Analyzing {
                    self.result = Some(result);
                    self.loading = LoadingState::Success;
                }
                None
            }

            SessionEvent::AnalysisFailed => {
                if self.loading == LoadingState::Analyzing {
                    self.result = None;
                    self.loading = LoadingState::Error;
                }
                None
            }

            SessionEvent::LanguageChanged(language) => {
                self.language = language;
                // A displayed result must match the selector, so a language
                // change after success re-issues the whole analysis. With
                // no result present only the labels change.
                if self.result.is_some() && self.face.is_some() {
                    self.start_analysis()
                } else {
                    None
                }
            }
        }
    }

    /// Begin one analysis if the preconditions hold
    fn start_analysis(&mut self) -> Option<AnalysisRequest> {
        // Face image is mandatory; a second trigger while one call is in
        // flight is ignored.
        let face = self.face.clone()?;
        if self.loading == LoadingState::Analyzing {
            return None;
        }

        self.loading = LoadingState::Analyzing;
        Some(AnalysisRequest {
            face,
            tongue: self.tongue.clone(),
            language: self.language,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_image(tag: &str) -> ImageFile {
        use base64::Engine;
        ImageFile {
            data: base64::engine::general_purpose::STANDARD.encode(tag.as_bytes()),
            mime_type: "image/jpeg".to_string(),
        }
    }

    fn sample_result() -> AnalysisResult {
        AnalysisResult {
            score: 78,
            conclusion: "Balanced but fatigued".to_string(),
            diagnosis: "1. ...\n\n2. ...".to_string(),
            therapy: "1. ...\n\n2. ...".to_string(),
        }
    }

    /// Face absent must always mean Idle with no result
    fn assert_core_invariant(session: &Session) {
        if session.image(Slot::Face).is_none() {
            assert_eq!(session.loading(), LoadingState::Idle);
            assert!(session.result().is_none());
        }
    }

    #[test]
    fn test_analyze_without_face_is_noop() {
        let mut session = Session::new();
        let request = session.apply(SessionEvent::AnalyzeRequested);

        assert!(request.is_none());
        assert_eq!(session.loading(), LoadingState::Idle);
        assert_core_invariant(&session);
    }

    #[test]
    fn test_tongue_alone_does_not_enable_analysis() {
        let mut session = Session::new();
        session.apply(SessionEvent::ImageSelected(Slot::Tongue, sample_image("tongue")));

        assert!(!session.can_analyze());
        assert!(session.apply(SessionEvent::AnalyzeRequested).is_none());
        assert_core_invariant(&session);
    }

    #[test]
    fn test_analyze_with_face_reaches_success() {
        let mut session = Session::new();
        session.apply(SessionEvent::ImageSelected(Slot::Face, sample_image("face")));

        let request = session.apply(SessionEvent::AnalyzeRequested).expect("one call issued");
        assert_eq!(session.loading(), LoadingState::Analyzing);
        assert_eq!(request.face, sample_image("face"));
        assert!(request.tongue.is_none());

        session.apply(SessionEvent::AnalysisSucceeded(sample_result()));
        assert_eq!(session.loading(), LoadingState::Success);
        assert_eq!(session.result(), Some(&sample_result()));
    }

    #[test]
    fn test_failure_reaches_error_with_no_result() {
        let mut session = Session::new();
        session.apply(SessionEvent::ImageSelected(Slot::Face, sample_image("face")));
        session.apply(SessionEvent::AnalyzeRequested);

        session.apply(SessionEvent::AnalysisFailed);
        assert_eq!(session.loading(), LoadingState::Error);
        assert!(session.result().is_none());
    }

    #[test]
    fn test_second_trigger_while_analyzing_is_ignored() {
        let mut session = Session::new();
        session.apply(SessionEvent::ImageSelected(Slot::Face, sample_image("face")));

        assert!(session.apply(SessionEvent::AnalyzeRequested).is_some());
        assert!(!session.can_analyze());

        // No second call while one is pending
        assert!(session.apply(SessionEvent::AnalyzeRequested).is_none());
        assert_eq!(session.loading(), LoadingState::Analyzing);
    }

    #[test]
    fn test_retrigger_allowed_from_error() {
        let mut session = Session::new();
        session.apply(SessionEvent::ImageSelected(Slot::Face, sample_image("face")));
        session.apply(SessionEvent::AnalyzeRequested);
        session.apply(SessionEvent::AnalysisFailed);

        // Manual re-trigger after a failure issues a fresh call
        assert!(session.apply(SessionEvent::AnalyzeRequested).is_some());
        assert_eq!(session.loading(), LoadingState::Analyzing);
    }

    #[test]
    fn test_tongue_is_included_when_present() {
        let mut session = Session::new();
        session.apply(SessionEvent::ImageSelected(Slot::Face, sample_image("face")));
        session.apply(SessionEvent::ImageSelected(Slot::Tongue, sample_image("tongue")));

        let request = session.apply(SessionEvent::AnalyzeRequested).unwrap();
        assert_eq!(request.tongue, Some(sample_image("tongue")));
    }

    #[test]
    fn test_clearing_face_in_success_resets_to_idle() {
        let mut session = Session::new();
        session.apply(SessionEvent::ImageSelected(Slot::Face, sample_image("face")));
        session.apply(SessionEvent::AnalyzeRequested);
        session.apply(SessionEvent::AnalysisSucceeded(sample_result()));
        assert_eq!(session.loading(), LoadingState::Success);

        session.apply(SessionEvent::ImageCleared(Slot::Face));
        assert_eq!(session.loading(), LoadingState::Idle);
        assert!(session.result().is_none());
        assert_core_invariant(&session);
    }

    #[test]
    fn test_clearing_tongue_keeps_result() {
        let mut session = Session::new();
        session.apply(SessionEvent::ImageSelected(Slot::Face, sample_image("face")));
        session.apply(SessionEvent::ImageSelected(Slot::Tongue, sample_image("tongue")));
        session.apply(SessionEvent::AnalyzeRequested);
        session.apply(SessionEvent::AnalysisSucceeded(sample_result()));

        session.apply(SessionEvent::ImageCleared(Slot::Tongue));
        assert_eq!(session.loading(), LoadingState::Success);
        assert!(session.result().is_some());
    }

    #[test]
    fn test_language_change_after_success_reissues_once() {
        let mut session = Session::new();
        session.apply(SessionEvent::ImageSelected(Slot::Face, sample_image("face")));
        session.apply(SessionEvent::AnalyzeRequested);
        session.apply(SessionEvent::AnalysisSucceeded(sample_result()));

        let request = session
            .apply(SessionEvent::LanguageChanged(Language::Vi))
            .expect("exactly one re-issued call");
        assert_eq!(request.language, Language::Vi);
        assert_eq!(session.loading(), LoadingState::Analyzing);
    }

    #[test]
    fn test_language_change_while_idle_issues_nothing() {
        let mut session = Session::new();
        assert!(session.apply(SessionEvent::LanguageChanged(Language::Vi)).is_none());
        assert_eq!(session.language(), Language::Vi);
        assert_eq!(session.loading(), LoadingState::Idle);

        // Same with a face image but no result yet: labels only
        session.apply(SessionEvent::ImageSelected(Slot::Face, sample_image("face")));
        assert!(session.apply(SessionEvent::LanguageChanged(Language::Zh)).is_none());
        assert_eq!(session.loading(), LoadingState::Idle);
    }

    #[test]
    fn test_stale_completion_is_ignored() {
        let mut session = Session::new();
        session.apply(SessionEvent::ImageSelected(Slot::Face, sample_image("face")));

        // Completion events outside Analyzing change nothing
        session.apply(SessionEvent::AnalysisSucceeded(sample_result()));
        assert_eq!(session.loading(), LoadingState::Idle);
        assert!(session.result().is_none());

        session.apply(SessionEvent::AnalysisFailed);
        assert_eq!(session.loading(), LoadingState::Idle);
    }

    #[test]
    fn test_late_result_after_face_cleared_mid_flight_is_dropped() {
        let mut session = Session::new();
        session.apply(SessionEvent::ImageSelected(Slot::Face, sample_image("face")));
        session.apply(SessionEvent::AnalyzeRequested);

        // Face removed while the call is still in flight
        session.apply(SessionEvent::ImageCleared(Slot::Face));
        assert_eq!(session.loading(), LoadingState::Idle);

        // The completion arrives afterwards and must not resurrect a
        // diagnosis for an image that is gone
        session.apply(SessionEvent::AnalysisSucceeded(sample_result()));
        assert_eq!(session.loading(), LoadingState::Idle);
        assert!(session.result().is_none());
        assert_core_invariant(&session);
    }

    #[test]
    fn test_recapture_replaces_image_wholesale() {
        let mut session = Session::new();
        session.apply(SessionEvent::ImageSelected(Slot::Face, sample_image("first")));
        session.apply(SessionEvent::ImageSelected(Slot::Face, sample_image("second")));

        assert_eq!(session.image(Slot::Face), Some(&sample_image("second")));
    }
}
