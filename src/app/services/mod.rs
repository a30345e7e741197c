//! Services layer - extraction and persistence operations.
//!
//! This module contains the work behind each acquisition path and the
//! supporting services:
//! - PDF text extraction
//! - OCR for images
//! - Web page scraping and content cleaning
//! - Preference persistence
//! - Text-to-speech

pub mod cleaner;
pub mod ocr;
pub mod pdf;
pub mod scraper;
pub mod session;
pub mod speech;
