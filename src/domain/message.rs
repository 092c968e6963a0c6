use chrono::{DateTime, Local, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    pub fn label(self) -> &'static str {
        match self {
            Sender::User => "you",
            Sender::Bot => "bot",
        }
    }
}

/// One entry of a discussion. Messages are never edited after being appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub sender: Sender,
    /// ISO-8601 UTC timestamp, millisecond precision.
    #[serde(rename = "time")]
    pub timestamp: String,
    pub content: String,
}

impl Message {
    pub fn from_user(content: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            sender: Sender::User,
            timestamp: format_timestamp(at),
            content: content.into(),
        }
    }

    /// Parsed timestamp, `None` when the stored value is not RFC 3339.
    pub fn sent_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.timestamp)
            .ok()
            .map(|at| at.with_timezone(&Utc))
    }

    /// Local wall-clock `HH:MM` for rendering.
    pub fn display_time(&self) -> String {
        self.sent_at()
            .map(|at| at.with_timezone(&Local).format("%H:%M").to_string())
            .unwrap_or_else(|| "--:--".to_owned())
    }
}

pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
