use super::document::{Document, InputType, RequestId};
use super::mode::Mode;
use super::preferences::Preferences;
use super::style::HexColor;
use super::upload::FileUpload;
use crate::app::infrastructure::error::ExtractionError;

/// Id of one spoken utterance, so a late end notification from a cancelled
/// utterance cannot clear the flag of the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UtteranceId(pub u64);

/// Work the acquirer runs off the state owner's thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionJob {
    File(FileUpload),
    Url(String),
}

/// All messages that can be sent to [`AppState::update`](crate::app::AppState::update).
/// Front ends send one of these per user action; workers send the completions.
#[derive(Debug, Clone)]
pub enum Message {
    // Input
    SetInputType(InputType),
    SetDirectText(String),
    SetUrl(String),
    SubmitUrl,
    UploadFile(FileUpload),
    AcquisitionFinished {
        request: RequestId,
        outcome: Result<Document, ExtractionError>,
    },

    // View
    NextMode,
    PreviousMode,
    SetMode(Mode),
    ToggleDarkMode,
    SetFontSize(u32),
    SetLineSpacing(f32),
    SetFocusLine(bool),

    // Format
    ToggleBold,
    ToggleItalic,
    ToggleUnderline,
    SetColor(Option<HexColor>),

    // Timer
    SetTimerMinutes(u32),
    StartTimer,
    PauseTimer,
    ResetTimer,
    TimerTick,

    // Speech
    ToggleSpeech,
    SpeechEnded(UtteranceId),
}

/// Side effects requested by a state transition, executed by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    PersistPreferences(Preferences),
    Extract { request: RequestId, job: ExtractionJob },
    Speak { utterance: UtteranceId, text: String },
    CancelSpeech,
}
