//! Application layer - organized by Clean Architecture principles.
//!
//! # Structure
//!
//! - `domain/` - Core data structures (Document, Mode, Preferences, Messages)
//! - `controllers/` - Orchestration (acquisition workers, presentation)
//! - `services/` - Extraction, content cleaning, speech, preference storage
//! - `infrastructure/` - Errors, config, durable storage, platform detection
//! - `state.rs` - Main application reducer

pub mod controllers;
pub mod domain;
pub mod infrastructure;
pub mod services;
pub mod state;

// Re-exports for convenient external access
pub use controllers::acquisition::{Acquirer, Extractors};
pub use controllers::presentation::{RenderedView, render};
pub use domain::{
    Document, DocumentSource, Effect, ExtractionJob, FileUpload, HexColor, InputType, Message,
    Mode, Preferences, RequestId, StyleOverrides, TimerState, UtteranceId,
};
pub use infrastructure::config::AppConfig;
pub use infrastructure::error::{AppError, ExtractionError, FailureKind};
pub use infrastructure::platform::detect_system_dark_mode;
pub use services::cleaner::clean_html;
pub use state::AppState;
