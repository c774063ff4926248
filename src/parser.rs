//! Raw bytes to message tree extraction

use crate::error::{DecodeError, Error, Result};
use crate::types::{ContentType, Message, Payload};
use mailparse::body::Body;
use mailparse::{MailHeader, ParsedMail};
use tracing::{debug, warn};

/// Parse raw email bytes into an owned [`Message`] tree.
///
/// Only structurally invalid input fails. Decoding problems inside a part are
/// stored on that leaf and surface through [`Message::content`].
pub fn extract_message(raw: &[u8]) -> Result<Message> {
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Err(Error::Parse("empty message".into()));
    }

    let parsed = mailparse::parse_mail(raw).map_err(|e| Error::Parse(e.to_string()))?;
    let message = convert(&parsed);

    debug!(
        "Extracted {} message with {} nodes",
        message.content_type.mimetype,
        message.walk().count()
    );

    Ok(message)
}

/// Parse a batch of raw buffers. Each result is independent of its siblings.
pub fn extract_messages<B: AsRef<[u8]>>(raw_buffers: &[B]) -> Vec<Result<Message>> {
    raw_buffers
        .iter()
        .enumerate()
        .map(|(index, raw)| {
            extract_message(raw.as_ref()).inspect_err(|e| warn!("Skipping message {index}: {e}"))
        })
        .collect()
}

fn convert(parsed: &ParsedMail) -> Message {
    let headers = collect_headers(&parsed.headers);
    let content_type = ContentType::new(&parsed.ctype.mimetype, &parsed.ctype.charset);

    if content_type.is_multipart() {
        let children = parsed.subparts.iter().map(convert).collect();
        return Message::multipart(headers, content_type, children);
    }

    let decoded = parsed.get_body().map_err(|e| DecodeError {
        content_type: content_type.mimetype.clone(),
        details: e.to_string(),
    });

    let payload = Payload {
        raw: encoded_bytes(parsed),
        decoded,
    };

    Message::leaf(headers, content_type, payload)
}

fn collect_headers(headers: &[MailHeader]) -> Vec<(String, String)> {
    headers.iter().map(|h| (h.get_key(), h.get_value())).collect()
}

fn encoded_bytes(parsed: &ParsedMail) -> Vec<u8> {
    match parsed.get_body_encoded() {
        Body::Base64(body) | Body::QuotedPrintable(body) => body.get_raw().to_vec(),
        Body::SevenBit(body) | Body::EightBit(body) => body.get_raw().to_vec(),
        Body::Binary(body) => body.get_raw().to_vec(),
    }
}
