//! Result type alias for Shotport
//!
//! Used by configuration, materialization and the presentation context. The
//! export and refresh entry points do not return it: their failures end up in
//! a notification or a refresh outcome.

use super::errors::ShotportError;

/// Result of a fallible Shotport operation
pub type Result<T> = std::result::Result<T, ShotportError>;
