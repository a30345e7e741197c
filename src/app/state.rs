use tracing::{debug, info, warn};

use super::controllers::presentation::{RenderParams, RenderedView, render};
use super::domain::preferences::{clamp_font_size, clamp_line_spacing};
use super::domain::{
    Document, Effect, ExtractionJob, InputType, Message, Mode, Preferences, RequestId,
    StyleOverrides, TimerState, UtteranceId,
};
use super::infrastructure::error::{ExtractionError, FailureKind};

/// The reading session. All changes go through [`AppState::update`], which
/// returns the side effects the caller has to carry out.
#[derive(Debug, Clone)]
pub struct AppState {
    pub document: Document,
    pub input_type: InputType,
    pub url: String,
    pub loading: bool,
    pub mode: Mode,
    pub dark_mode: bool,
    pub font_size: u32,
    pub line_spacing: f32,
    pub overrides: StyleOverrides,
    pub focus_line: bool,
    pub timer: TimerState,
    /// Kind of the failure whose message is currently displayed.
    pub last_failure: Option<FailureKind>,
    in_flight: Option<RequestId>,
    next_request: u64,
    speaking: Option<UtteranceId>,
    next_utterance: u64,
}

impl AppState {
    pub fn new(prefs: Preferences, dark_mode: bool) -> Self {
        let prefs = prefs.clamped();
        Self {
            document: Document::empty(),
            input_type: InputType::default(),
            url: String::new(),
            loading: false,
            mode: prefs.mode,
            dark_mode,
            font_size: prefs.font_size,
            line_spacing: prefs.line_spacing,
            overrides: StyleOverrides::default(),
            focus_line: false,
            timer: TimerState::default(),
            last_failure: None,
            in_flight: None,
            next_request: 0,
            speaking: None,
            next_utterance: 0,
        }
    }

    pub fn preferences(&self) -> Preferences {
        Preferences {
            mode: self.mode,
            font_size: self.font_size,
            line_spacing: self.line_spacing,
        }
    }

    /// The acquisition whose result will be accepted, if any.
    pub fn in_flight(&self) -> Option<RequestId> {
        self.in_flight
    }

    pub fn is_speaking(&self) -> bool {
        self.speaking.is_some()
    }

    pub fn render_params(&self) -> RenderParams<'_> {
        RenderParams {
            text: self.document.display_text(),
            mode: self.mode,
            dark: self.dark_mode,
            overrides: &self.overrides,
            font_size: self.font_size,
            line_spacing: self.line_spacing,
            focus_line: self.focus_line,
        }
    }

    pub fn rendered(&self) -> RenderedView {
        render(&self.render_params())
    }

    pub fn update(&mut self, message: Message) -> Vec<Effect> {
        match message {
            Message::SetInputType(input_type) => {
                self.input_type = input_type;
                Vec::new()
            }
            Message::SetDirectText(text) => {
                self.supersede_in_flight();
                self.accept(Ok(Document::direct(text)));
                Vec::new()
            }
            Message::SetUrl(url) => {
                self.url = url;
                Vec::new()
            }
            Message::SubmitUrl => {
                let url = self.url.trim();
                if url.is_empty() {
                    return Vec::new();
                }
                let job = ExtractionJob::Url(url.to_string());
                self.loading = true;
                vec![self.start(job)]
            }
            Message::UploadFile(upload) => {
                // OCR leaves the loading flag alone
                if upload.is_pdf() {
                    self.loading = true;
                }
                vec![self.start(ExtractionJob::File(upload))]
            }
            Message::AcquisitionFinished { request, outcome } => {
                if self.in_flight != Some(request) {
                    debug!(
                        "Discarding stale acquisition {:?} (current {:?})",
                        request, self.in_flight
                    );
                    return Vec::new();
                }
                self.in_flight = None;
                self.loading = false;
                self.accept(outcome);
                Vec::new()
            }

            Message::NextMode => self.set_mode(self.mode.next()),
            Message::PreviousMode => self.set_mode(self.mode.prev()),
            Message::SetMode(mode) => self.set_mode(mode),
            Message::ToggleDarkMode => {
                self.dark_mode = !self.dark_mode;
                Vec::new()
            }
            Message::SetFontSize(size) => {
                let size = clamp_font_size(size);
                if size == self.font_size {
                    return Vec::new();
                }
                self.font_size = size;
                self.persist()
            }
            Message::SetLineSpacing(spacing) => {
                let spacing = clamp_line_spacing(spacing);
                if spacing == self.line_spacing {
                    return Vec::new();
                }
                self.line_spacing = spacing;
                self.persist()
            }
            Message::SetFocusLine(enabled) => {
                self.focus_line = enabled;
                Vec::new()
            }

            Message::ToggleBold => {
                self.overrides.bold = !self.overrides.bold;
                Vec::new()
            }
            Message::ToggleItalic => {
                self.overrides.italic = !self.overrides.italic;
                Vec::new()
            }
            Message::ToggleUnderline => {
                self.overrides.underline = !self.overrides.underline;
                Vec::new()
            }
            Message::SetColor(color) => {
                self.overrides.color = color;
                Vec::new()
            }

            Message::SetTimerMinutes(minutes) => {
                self.timer.set_duration_minutes(minutes);
                Vec::new()
            }
            Message::StartTimer => {
                self.timer.start();
                Vec::new()
            }
            Message::PauseTimer => {
                self.timer.pause();
                Vec::new()
            }
            Message::ResetTimer => {
                self.timer.reset();
                Vec::new()
            }
            Message::TimerTick => {
                if self.timer.tick() {
                    info!("Focus timer finished");
                }
                Vec::new()
            }

            Message::ToggleSpeech => self.toggle_speech(),
            Message::SpeechEnded(utterance) => {
                if self.speaking == Some(utterance) {
                    self.speaking = None;
                } else {
                    debug!("Ignoring end of old utterance {:?}", utterance);
                }
                Vec::new()
            }
        }
    }

    fn start(&mut self, job: ExtractionJob) -> Effect {
        self.next_request += 1;
        let request = RequestId(self.next_request);
        self.in_flight = Some(request);
        Effect::Extract { request, job }
    }

    /// Forget the in-flight acquisition so its result is discarded.
    fn supersede_in_flight(&mut self) {
        if let Some(request) = self.in_flight.take() {
            debug!("Acquisition {:?} superseded", request);
        }
        self.loading = false;
    }

    fn accept(&mut self, outcome: Result<Document, ExtractionError>) {
        match outcome {
            Ok(document) => {
                self.document = document;
                self.last_failure = None;
            }
            Err(e) => {
                warn!("Acquisition failed: {}", e);
                self.document = Document::failure(&e);
                self.last_failure = Some(e.kind());
            }
        }
    }

    fn set_mode(&mut self, mode: Mode) -> Vec<Effect> {
        if mode == self.mode {
            return Vec::new();
        }
        self.mode = mode;
        self.persist()
    }

    fn persist(&self) -> Vec<Effect> {
        vec![Effect::PersistPreferences(self.preferences())]
    }

    fn toggle_speech(&mut self) -> Vec<Effect> {
        if self.speaking.take().is_some() {
            return vec![Effect::CancelSpeech];
        }

        let text = self.document.display_text();
        if text.trim().is_empty() {
            debug!("Nothing to speak");
            return Vec::new();
        }

        self.next_utterance += 1;
        let utterance = UtteranceId(self.next_utterance);
        self.speaking = Some(utterance);
        vec![Effect::Speak {
            utterance,
            text: text.to_string(),
        }]
    }
}
