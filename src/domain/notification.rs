//! Result record of one export attempt
//!
//! A [`Notification`] is created fresh by the export orchestrator for each
//! attempt and is never mutated after it is returned. Fields are private and
//! only readable through accessors.

use crate::domain::ids::Designation;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Outcome of the export attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    /// The capture reached the destination
    Success,
    /// The export failed; see `error_text`
    Fail,
}

/// Kind of component that produced the notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationSourceType {
    /// An export destination
    Destination,
}

/// Result record of one export attempt
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    id: Uuid,
    notification_type: NotificationType,
    source: Designation,
    source_type: NotificationSourceType,
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    link: Option<String>,
    created_at: DateTime<Utc>,
}

impl Notification {
    fn new(
        notification_type: NotificationType,
        source: Designation,
        text: String,
        error_text: Option<String>,
        link: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            notification_type,
            source,
            source_type: NotificationSourceType::Destination,
            text,
            error_text,
            link,
            created_at: Utc::now(),
        }
    }

    /// Creates a success notification
    pub fn success(source: Designation, text: impl Into<String>) -> Self {
        Self::new(NotificationType::Success, source, text.into(), None, None)
    }

    /// Creates a success notification pointing at where the capture ended up
    pub fn success_with_link(
        source: Designation,
        text: impl Into<String>,
        link: impl Into<String>,
    ) -> Self {
        Self::new(
            NotificationType::Success,
            source,
            text.into(),
            None,
            Some(link.into()),
        )
    }

    /// Creates a failure notification carrying the underlying error message
    pub fn fail(
        source: Designation,
        text: impl Into<String>,
        error_text: impl Into<String>,
    ) -> Self {
        Self::new(
            NotificationType::Fail,
            source,
            text.into(),
            Some(error_text.into()),
            None,
        )
    }

    /// Unique id of this notification
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Success or Fail
    pub fn notification_type(&self) -> NotificationType {
        self.notification_type
    }

    /// Returns true for a Success notification
    pub fn is_success(&self) -> bool {
        self.notification_type == NotificationType::Success
    }

    /// Designation of the destination that produced this notification
    pub fn source(&self) -> &Designation {
        &self.source
    }

    /// Kind of the source
    pub fn source_type(&self) -> NotificationSourceType {
        self.source_type
    }

    /// Human readable message
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Underlying failure message, for Fail notifications
    pub fn error_text(&self) -> Option<&str> {
        self.error_text.as_deref()
    }

    /// Location of the exported capture, when the destination reports one
    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    /// When the notification was created
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
