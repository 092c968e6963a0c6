//! Plain-text rendering of discussions and messages.

use chrono::{Local, NaiveDate};

use crate::domain::{discussion::Discussion, message::Message};

const PREVIEW_CHARS: usize = 40;

pub const HELP_LINES: [&str; 11] = [
    "/register <login> <pseudo>  create an account and sign in",
    "/login <login>              sign in",
    "/logout                     sign out",
    "/whoami                     show the signed-in account",
    "/list                       list your discussions",
    "/new <title>                start a discussion",
    "/open <number|id>           open a discussion",
    "/delete <number|id>         delete a discussion",
    "/help                       show this help",
    "/quit                       leave",
    "anything else               send it to the open discussion",
];

pub fn discussion_list_lines(discussions: &[Discussion]) -> Vec<String> {
    if discussions.is_empty() {
        return vec!["No discussions yet. Start one with /new <title>.".to_owned()];
    }

    discussions
        .iter()
        .enumerate()
        .map(|(index, discussion)| discussion_line(index + 1, discussion))
        .collect()
}

fn discussion_line(position: usize, discussion: &Discussion) -> String {
    let mut line = format!(
        "{position}. {} [{}]",
        discussion.title,
        discussion.messages.len()
    );
    if let Some(last) = discussion.last_message() {
        line.push_str("  ");
        line.push_str(&preview(&last.content));
    }
    line
}

pub fn discussion_header(discussion: &Discussion) -> String {
    format!("== {} ({}) ==", discussion.title, discussion.id)
}

/// Message lines with a date separator whenever the local day changes.
pub fn message_lines(messages: &[Message]) -> Vec<String> {
    if messages.is_empty() {
        return vec!["No messages yet.".to_owned()];
    }

    let mut lines = Vec::with_capacity(messages.len());
    let mut previous_date: Option<NaiveDate> = None;

    for message in messages {
        let date = message
            .sent_at()
            .map(|at| at.with_timezone(&Local).date_naive());
        if let Some(date) = date.filter(|date| previous_date != Some(*date)) {
            lines.push(format!("--- {} ---", date.format("%d %b %Y")));
            previous_date = Some(date);
        }
        lines.push(message_line(message));
    }

    lines
}

pub fn message_line(message: &Message) -> String {
    format!(
        "[{}] {}: {}",
        message.display_time(),
        message.sender.label(),
        message.content
    )
}

pub fn reply_line(reply: &str) -> String {
    format!("bot> {reply}")
}

fn preview(text: &str) -> String {
    let single_line = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if single_line.chars().count() <= PREVIEW_CHARS {
        return single_line;
    }

    let mut truncated: String = single_line.chars().take(PREVIEW_CHARS - 1).collect();
    truncated.push('…');
    truncated
}
