//! Notification feed entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::fields::NotificationKind;

/// A message in the notification feed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// Input for posting a notification.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationDraft {
    pub message: String,
    pub kind: NotificationKind,
    pub read: bool,
}

impl NotificationDraft {
    /// Unread notification of the given kind.
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        NotificationDraft {
            message: message.into(),
            kind,
            read: false,
        }
    }
}

impl Notification {
    pub fn from_draft(id: String, draft: NotificationDraft, now: DateTime<Utc>) -> Self {
        Notification {
            id,
            message: draft.message,
            kind: draft.kind,
            read: draft.read,
            created_at: now,
        }
    }
}
