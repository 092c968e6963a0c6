use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::message::Message;

const ID_PREFIX: &str = "disc";
const ID_SUFFIX_LEN: usize = 7;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discussion {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub messages: Vec<Message>,
}

impl Discussion {
    /// Creates an empty discussion with a freshly generated id.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: generate_discussion_id(Utc::now(), &mut rand::thread_rng()),
            title: title.into(),
            messages: Vec::new(),
        }
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Returns a copy with `message` appended.
    pub fn with_message(&self, message: Message) -> Self {
        let mut messages = self.messages.clone();
        messages.push(message);

        Self {
            id: self.id.clone(),
            title: self.title.clone(),
            messages,
        }
    }
}

/// `disc-<unix millis>-<7 base-36 chars>`.
pub fn generate_discussion_id(now: DateTime<Utc>, rng: &mut impl Rng) -> String {
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();

    format!("{ID_PREFIX}-{}-{suffix}", now.timestamp_millis())
}
