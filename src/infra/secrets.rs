use std::panic;

const REDACTED: &str = "[REDACTED]";

const SENSITIVE_MARKERS: [&str; 6] = [
    "password", "passwd", "secret", "api_key", "apikey", "token",
];

/// Google API keys start with this prefix.
const API_KEY_PREFIX: &str = "AIza";

pub fn redact_text(input: &str) -> String {
    input
        .split_whitespace()
        .map(redact_chunk)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Short, non-reversible rendering of a secret for logs and debug output.
pub fn mask_secret(value: &str) -> String {
    match value.chars().count() {
        0 => "<unset>".to_owned(),
        1..=8 => "****".to_owned(),
        _ => format!("{}****", value.chars().take(4).collect::<String>()),
    }
}

pub fn install_panic_redaction_hook() {
    panic::set_hook(Box::new(|panic_info| {
        let payload = panic_info
            .payload()
            .downcast_ref::<&str>()
            .map(ToString::to_string)
            .or_else(|| panic_info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "panic payload omitted".to_owned());

        let scrubbed = redact_text(&payload);

        if let Some(location) = panic_info.location() {
            eprintln!(
                "chatinside panic: {} at {}:{}:{}",
                scrubbed,
                location.file(),
                location.line(),
                location.column()
            );
        } else {
            eprintln!("chatinside panic: {}", scrubbed);
        }
    }));
}

fn redact_chunk(chunk: &str) -> String {
    let lowered = chunk.to_ascii_lowercase();
    if SENSITIVE_MARKERS
        .iter()
        .any(|marker| lowered.contains(marker))
        || looks_like_api_key(chunk)
    {
        REDACTED.to_owned()
    } else {
        chunk.to_owned()
    }
}

fn looks_like_api_key(value: &str) -> bool {
    let cleaned =
        value.trim_matches(|ch: char| !ch.is_ascii_alphanumeric() && ch != '_' && ch != '-');

    cleaned.starts_with(API_KEY_PREFIX) && cleaned.len() >= 20
}
