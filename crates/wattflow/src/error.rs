//! Error types for Wattflow operations.
//!
//! This module provides the main error type [`WattflowError`] which wraps
//! the failures of every pipeline stage.

use std::{io, ops::Range};

use thiserror::Error;

use crate::layout::LayoutError;

/// The main error type for Wattflow operations.
///
/// # Diagnostic Variants
///
/// The `Input` variant keeps the offending source text and, when known, the
/// byte range of the error so front ends can point at it.
#[derive(Debug, Error)]
pub enum WattflowError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid input graph: {message}")]
    Input {
        message: String,
        span: Option<Range<usize>>,
        src: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),
}

impl From<crate::export::Error> for WattflowError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl WattflowError {
    /// Create a new `Input` error with the associated source text.
    pub fn new_input_error(
        message: impl Into<String>,
        span: Option<Range<usize>>,
        src: impl Into<String>,
    ) -> Self {
        Self::Input {
            message: message.into(),
            span,
            src: src.into(),
        }
    }
}
