//! Image hosting destination
//!
//! - [`client`] - HTTP upload client
//! - [`destination`] - The destination exposed to the registry

pub mod client;
pub mod destination;

pub use client::{HostedImage, HostingClient};
pub use destination::HostingDestination;
