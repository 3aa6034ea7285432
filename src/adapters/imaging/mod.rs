//! Capture materialization
//!
//! Encodes captures to temporary image files with the `image` crate.

pub mod materializer;

pub use materializer::{CaptureMaterializer, TempFileMaterializer, DEFAULT_FILENAME_PATTERN};
