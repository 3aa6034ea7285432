//! Destination identity types
//!
//! This module provides the newtype wrapper for destination designations and
//! the opaque icon handle attached to every destination.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stable short identifier of a destination kind
///
/// Unique among destinations of the same kind (for instance the logical name
/// of the target application). Children discovered under a container share
/// their parent's designation.
///
/// # Examples
///
/// ```
/// use shotport::domain::ids::Designation;
/// use std::str::FromStr;
///
/// let designation = Designation::from_str("Writer").unwrap();
/// assert_eq!(designation.as_str(), "Writer");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Designation(String);

impl Designation {
    /// Creates a new Designation from a string
    ///
    /// Surrounding whitespace is trimmed.
    ///
    /// # Returns
    ///
    /// Returns `Ok(Designation)` if the designation is valid, `Err` otherwise
    pub fn new(designation: impl Into<String>) -> Result<Self, String> {
        let designation = designation.into();
        let trimmed = designation.trim();
        if trimmed.is_empty() {
            return Err("Designation cannot be empty".to_string());
        }
        if trimmed.contains(['\n', '\r']) {
            return Err(format!(
                "Designation must be a single line, got: {designation:?}"
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the designation as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Designation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Designation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for Designation {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Opaque presentational handle for a destination
///
/// Rendering is left to whatever front end consumes the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Icon {
    /// The target application itself ("create a new target")
    Application,
    /// One live document inside the target application
    Document,
    /// A remote upload service
    Upload,
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Icon::Application => "application",
            Icon::Document => "document",
            Icon::Upload => "upload",
        };
        f.write_str(name)
    }
}
