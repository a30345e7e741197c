//! Infrastructure layer - external integrations and utilities.
//!
//! This module contains code that interfaces with external systems:
//! - Configuration file loading
//! - Durable key/value storage
//! - Platform-specific detection
//! - Error types

pub mod config;
pub mod error;
pub mod platform;
pub mod storage;
