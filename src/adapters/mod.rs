//! External system integrations for Shotport.
//!
//! - [`destination`] - The destination contract (trait-based)
//! - [`document`] - Document application destination with live children
//! - [`hosting`] - Image hosting upload destination
//! - [`imaging`] - Writing captures to temporary image files
//! - [`language`] - Localized message templates
//!
//! # Design Pattern
//!
//! Adapters follow the **Adapter Pattern** to isolate external dependencies and
//! enable testing with fake implementations. The automation of a document
//! application sits behind [`document::DocumentAutomation`] so tests can swap
//! the external commands for an in-process fake.
//!
//! ```rust,no_run
//! use shotport::adapters::document::CommandAutomation;
//!
//! let automation = CommandAutomation::new(
//!     vec!["doc-bridge".into(), "list".into()],
//!     vec!["doc-bridge".into(), "insert".into(), "{target}".into(), "{file}".into()],
//!     vec!["doc-bridge".into(), "new".into(), "{file}".into()],
//! );
//! # let _ = automation;
//! ```

pub mod destination;
pub mod document;
pub mod hosting;
pub mod imaging;
pub mod language;
