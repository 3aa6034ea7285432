//! Document application destination
//!
//! - [`automation`] - The automation boundary and its command-based implementation
//! - [`destination`] - Root and leaf destinations, child discovery

pub mod automation;
pub mod destination;

pub use automation::{expand_command, CommandAutomation, DocumentAutomation};
pub use destination::{leaf_destination, DocumentDestination, DocumentProfile, DocumentTarget};
