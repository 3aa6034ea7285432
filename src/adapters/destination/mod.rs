//! Destination abstraction layer
//!
//! The [`Destination`] trait is implemented by:
//! - [`crate::adapters::document::DocumentDestination`] (with live children)
//! - [`crate::adapters::hosting::HostingDestination`]

pub mod traits;

pub use traits::{Destination, ExportContext, RefreshOutcome};
