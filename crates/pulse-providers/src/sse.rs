use serde_json::Value;

/// One decoded server-sent event from a chat-completion stream
#[derive(Debug, Clone, PartialEq)]
pub enum SseEvent {
    Delta(String),
    Error(String),
    Done,
}

/// Incremental decoder for OpenAI-style `data: {json}` streams.
///
/// Bytes are buffered until a full line is available, so events split across
/// network chunks (including multi-byte characters) decode correctly.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
    done: bool,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Feed raw bytes, returning every event completed by them
    pub fn push(&mut self, bytes: &[u8]) -> Vec<SseEvent> {
        self.buffer.extend_from_slice(bytes);

        let mut events = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            if self.done {
                continue;
            }
            let line = String::from_utf8_lossy(&line);
            if let Some(event) = decode_line(line.trim_end_matches(['\n', '\r'])) {
                if event == SseEvent::Done {
                    self.done = true;
                }
                events.push(event);
            }
        }
        events
    }
}

fn decode_line(line: &str) -> Option<SseEvent> {
    // Blank separators and `:` keep-alive comments carry nothing
    let payload = line.strip_prefix("data:")?.trim();
    if payload == "[DONE]" {
        return Some(SseEvent::Done);
    }

    let value: Value = match serde_json::from_str(payload) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!("Skipping undecodable stream event: {}", e);
            return None;
        }
    };

    if let Some(error) = value.get("error") {
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("Unknown streaming error");
        return Some(SseEvent::Error(message.to_string()));
    }

    value
        .get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("delta"))
        .and_then(|d| d.get("content"))
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(|s| SseEvent::Delta(s.to_string()))
}
