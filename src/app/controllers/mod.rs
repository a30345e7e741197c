//! Controllers layer - orchestration and coordination.
//!
//! This module contains controllers that coordinate between
//! domain models, services, and the front end:
//! - Acquisition workers for files and URLs
//! - Presentation of the display text

pub mod acquisition;
pub mod presentation;
