//! Export of rendered flow diagrams.
//!
//! # Pipeline Position
//!
//! ```text
//! FlowGraph
//!     ↓ compute_layout
//! Layout
//!     ↓ render onto a Surface
//! Surface content
//!     ↓ export (this module)
//! Output document
//! ```
//!
//! # Available Backends
//!
//! - [`svg`] - SVG output via [`svg::SvgSurface`]
//!
//! # Error Handling
//!
//! Export operations return [`Error`], covering rendering failures and I/O
//! errors. [`Error`] converts into [`WattflowError::Export`] at the crate
//! boundary.
//!
//! [`WattflowError::Export`]: crate::WattflowError::Export

/// SVG export backend.
pub mod svg;

use std::path::Path;

use crate::{layout::Layout, render::RenderStyle};

/// Abstraction for diagram export backends.
pub trait Exporter {
    /// Renders `layout` with `style` and writes the result to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the layout cannot be encoded, or
    /// [`Error::Io`] if writing the output fails.
    fn export_layout(&mut self, layout: &Layout, style: &RenderStyle, path: &Path) -> Result<(), Error>;
}

/// Errors that can occur during diagram export.
#[derive(Debug)]
pub enum Error {
    /// A rendering or conversion failure described by `message`.
    Render(String),
    /// An I/O error encountered while writing output.
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}
