//! Error types for Sigma operations.
//!
//! This module provides the main error type [`SigmaError`] which wraps
//! the error conditions that can occur while rendering and interacting
//! with a schema diagram.

use std::io;

use thiserror::Error;

use sigma_core::model::ProjectError;

use crate::layout::LayoutError;

/// The main error type for Sigma operations.
///
/// Domain lookups that miss (`Project`) and malformed layout descriptors
/// (`Layout`) are distinct conditions: the former indicate a stale reference
/// between the visual tree and the domain snapshot, the latter a descriptor
/// bug that must fail fast at render time. Neither is retried here.
#[derive(Debug, Error)]
pub enum SigmaError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Project(#[from] ProjectError),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}
