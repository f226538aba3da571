//! # Quill Core
//!
//! Presentation-layer logic for the Quill patient record front end.
//!
//! This crate contains pure display operations that views call with plain data:
//! - National identifier classification and formatting ([`identifier`])
//! - Responsive breakpoint resolution ([`breakpoint`])
//! - Demographic display helpers ([`demographics`])
//! - Avatar gradient selection ([`avatar`])
//! - Display configuration loaded once at startup ([`config`])
//!
//! **No rendering or I/O concerns**: evaluating media queries, fetching records and drawing
//! widgets belong to the caller. The only I/O here is reading the config file on request.

pub mod avatar;
pub mod breakpoint;
pub mod config;
pub mod constants;
pub mod demographics;
pub mod error;
pub mod identifier;

pub use breakpoint::{resolve, BreakpointSet, BreakpointWatcher, BreakpointWidths};
pub use config::DisplayConfig;
pub use error::{DisplayError, DisplayResult};
pub use identifier::{
    ClassifiedIdentifier, IdentifierClassifier, IdentifierRenderer, LabelledRenderer,
    NationalIdentifier, PlainRenderer,
};

// Re-export the shared vocabulary so callers need only one dependency.
pub use quill_types::{Breakpoint, Gender, IdentifierScheme, TypeError};
