// ── Client reachability classifier ──
//
// Turns the outcome of one `check` call into a `ClientStatus`. Decoding is
// split into small pure steps so each precedence rule is testable alone:
// body token first (JSON `status` field, then a bare string body), raw
// HTTP code last.

use serde_json::Value;

use crate::model::ClientStatus;

/// What came back from the domain-check endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Any HTTP response, success or not.
    Responded { code: u16, body: String },
    /// No response at all: refused, DNS, TLS, timeout.
    Unreachable,
}

/// An explicit status signal found in a response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusToken {
    Flag(bool),
    Word(ClientStatus),
}

impl StatusToken {
    fn into_status(self) -> ClientStatus {
        match self {
            Self::Flag(true) => ClientStatus::Online,
            Self::Flag(false) => ClientStatus::Offline,
            Self::Word(status) => status,
        }
    }
}

/// Boolean `status` value.
pub fn decode_flag(value: &Value) -> Option<bool> {
    value.as_bool()
}

/// Known status words, case-insensitive. Unknown words are not tokens.
pub fn decode_word(word: &str) -> Option<ClientStatus> {
    match word.trim().to_ascii_uppercase().as_str() {
        "ONLINE" => Some(ClientStatus::Online),
        "ONLINE_PROTECTED" | "PROTECTED" => Some(ClientStatus::Protected),
        "OFFLINE" => Some(ClientStatus::Offline),
        _ => None,
    }
}

fn token_from_value(value: &Value) -> Option<StatusToken> {
    decode_flag(value)
        .map(StatusToken::Flag)
        .or_else(|| value.as_str().and_then(decode_word).map(StatusToken::Word))
}

/// Find an explicit status token in a response body.
///
/// Accepts `{"status": true}`, `{"status": "ONLINE"}`, a JSON string body
/// (`"OFFLINE"`), or a plain-text body (`PROTECTED`).
pub fn extract_token(body: &str) -> Option<StatusToken> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Object(map)) => map.get("status").and_then(token_from_value),
        Ok(Value::String(word)) => decode_word(&word).map(StatusToken::Word),
        Ok(_) => None,
        Err(_) => decode_word(trimmed).map(StatusToken::Word),
    }
}

/// Fallback when the body says nothing.
pub fn classify_code(code: u16) -> ClientStatus {
    match code {
        403 | 503 => ClientStatus::Protected,
        100..=599 => ClientStatus::Online,
        _ => ClientStatus::Offline,
    }
}

/// Classify one check outcome.
pub fn classify(outcome: &CheckOutcome) -> ClientStatus {
    match outcome {
        CheckOutcome::Unreachable => ClientStatus::Offline,
        CheckOutcome::Responded { code, body } => extract_token(body)
            .map_or_else(|| classify_code(*code), StatusToken::into_status),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn responded(code: u16, body: &str) -> CheckOutcome {
        CheckOutcome::Responded {
            code,
            body: body.to_owned(),
        }
    }

    #[test]
    fn boolean_tokens() {
        for b in [true, false] {
            let expected = if b {
                ClientStatus::Online
            } else {
                ClientStatus::Offline
            };
            assert_eq!(classify(&responded(200, &format!(r#"{{"status":{b}}}"#))), expected);
            // Token wins over a code that would otherwise say "protected".
            assert_eq!(classify(&responded(503, &format!(r#"{{"status":{b}}}"#))), expected);
        }
    }

    #[test]
    fn string_tokens_any_case() {
        let cases = [
            ("ONLINE", ClientStatus::Online),
            ("online_protected", ClientStatus::Protected),
            ("Protected", ClientStatus::Protected),
            ("offline", ClientStatus::Offline),
        ];
        for (word, expected) in cases {
            assert_eq!(classify(&responded(200, &format!(r#"{{"status":"{word}"}}"#))), expected);
            assert_eq!(classify(&responded(500, &format!("\"{word}\""))), expected);
            assert_eq!(classify(&responded(200, &format!("  {word}\n"))), expected);
        }
    }

    #[test]
    fn explicit_offline_beats_success_code() {
        assert_eq!(
            classify(&responded(200, r#"{"status":"OFFLINE"}"#)),
            ClientStatus::Offline
        );
    }

    #[test]
    fn code_fallback() {
        assert_eq!(classify(&responded(403, "")), ClientStatus::Protected);
        assert_eq!(classify(&responded(503, "<html>challenge</html>")), ClientStatus::Protected);
        assert_eq!(classify(&responded(200, "")), ClientStatus::Online);
        assert_eq!(classify(&responded(500, "boom")), ClientStatus::Online);
        assert_eq!(classify(&responded(0, "")), ClientStatus::Offline);
        assert_eq!(classify(&responded(700, "")), ClientStatus::Offline);
        assert_eq!(classify(&CheckOutcome::Unreachable), ClientStatus::Offline);
    }

    #[test]
    fn unknown_words_and_shapes_are_not_tokens() {
        assert_eq!(extract_token(r#"{"status":"MAYBE"}"#), None);
        assert_eq!(extract_token(r#"{"status":200}"#), None);
        assert_eq!(extract_token(r#"{"state":"ONLINE"}"#), None);
        assert_eq!(extract_token("[1,2,3]"), None);
        assert_eq!(extract_token(""), None);
    }
}
