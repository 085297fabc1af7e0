use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use shared::error::GenerationError;

#[derive(Debug, Serialize)]
pub(crate) struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: [ChatMessage<'a>; 2],
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

#[derive(Deserialize)]
pub(crate) struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: Option<ErrorBody>,
    detail: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

pub(crate) fn extract_text(response: ChatCompletionResponse) -> Option<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
}

pub(crate) fn map_http_error(status: StatusCode, body: String) -> GenerationError {
    let parsed = serde_json::from_str::<ErrorResponse>(&body).ok();
    let message = parsed
        .and_then(|wrapper| {
            wrapper.error.map(|error| error.message).or_else(|| {
                wrapper.detail.map(|detail| match detail {
                    serde_json::Value::String(text) => text,
                    other => other.to_string(),
                })
            })
        })
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("empty error body")
                    .to_string()
            } else {
                trimmed.to_string()
            }
        });

    GenerationError::upstream(Some(status.as_u16()), message)
}

const REASONING_MARKERS: [&str; 3] = ["Let me", "I need to", "From the search results"];
const META_PHRASES: [&str; 4] = ["Let me", "I need to", "From the search", "The user wants"];
const MIN_POST_PARAGRAPH_CHARS: usize = 50;

/// Drops chain-of-thought the model sometimes emits around the post.
///
/// `<think>` blocks are removed outright. If what remains still reads like
/// reasoning, the last substantial paragraph free of meta phrases is taken as
/// the post; without such a paragraph the text is returned as is.
pub fn strip_reasoning(raw: &str) -> String {
    let without_think = remove_think_blocks(raw);
    let text = without_think.trim();

    if !REASONING_MARKERS.iter().any(|marker| text.contains(marker)) {
        return text.to_string();
    }

    text.rsplit("\n\n")
        .map(str::trim)
        .find(|paragraph| {
            paragraph.chars().count() > MIN_POST_PARAGRAPH_CHARS
                && !META_PHRASES.iter().any(|phrase| paragraph.contains(phrase))
        })
        .unwrap_or(text)
        .to_string()
}

fn remove_think_blocks(raw: &str) -> String {
    const OPEN: &str = "<think>";
    const CLOSE: &str = "</think>";

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(start) = rest.find(OPEN) {
        out.push_str(&rest[..start]);
        let after_open = &rest[start + OPEN.len()..];
        rest = match after_open.find(CLOSE) {
            Some(end) => &after_open[end + CLOSE.len()..],
            // unterminated block: everything after it is reasoning
            None => "",
        };
    }
    out.push_str(rest);
    out
}
