//! Domain layer - core data structures and types.
//!
//! This module contains the fundamental domain models:
//! - Document, its source and the acquisition request ids
//! - Accessibility modes and style overrides
//! - Persisted preferences and the focus timer
//! - Message and effect types for the reducer

pub mod document;
pub mod messages;
pub mod mode;
pub mod preferences;
pub mod style;
pub mod timer;
pub mod upload;

pub use document::{Document, DocumentSource, InputType, RequestId};
pub use messages::{Effect, ExtractionJob, Message, UtteranceId};
pub use mode::{Mode, ModeStyle};
pub use preferences::{Preferences, SETTINGS_KEY};
pub use style::{ContainerStyle, HexColor, StyleOverrides, TextStyle, compute_style};
pub use timer::TimerState;
pub use upload::FileUpload;
