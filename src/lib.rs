//! ReadEase - a reading-accessibility toolkit.
//!
//! Text comes in from the keyboard, a PDF, an image (OCR) or a web page,
//! lands in a single [`Document`](app::Document), and is rendered with an
//! accessibility [`Mode`](app::Mode) plus the reader's own typography.

pub mod app;
