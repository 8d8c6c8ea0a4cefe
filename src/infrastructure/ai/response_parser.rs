//! Response parsing utilities for model outputs
//!
//! Models asked for JSON frequently wrap it in markdown fences or surround it
//! with narrative text; extraction tries progressively looser strategies.

use serde::de::DeserializeOwned;

use crate::domain::simulation::SimulationError;

/// Utilities for extracting and parsing JSON from model responses.
pub struct ResponseParser;

impl ResponseParser {
    /// Parse a JSON value from a model response.
    ///
    /// Strategy order:
    /// 1) Try the full trimmed content as JSON.
    /// 2) Extract a fenced JSON code block (```json ... ```).
    /// 3) Extract any fenced code block (``` ... ```).
    /// 4) Extract the first valid JSON object/array found in the text.
    pub fn parse_json<T: DeserializeOwned>(content: &str) -> Result<T, SimulationError> {
        let trimmed = content.trim();
        if let Ok(parsed) = serde_json::from_str::<T>(trimmed) {
            return Ok(parsed);
        }

        if let Some(json) = Self::extract_fenced_block(trimmed, Some("json")) {
            if let Ok(parsed) = serde_json::from_str::<T>(&json) {
                return Ok(parsed);
            }
        }

        if let Some(json) = Self::extract_fenced_block(trimmed, None) {
            if let Ok(parsed) = serde_json::from_str::<T>(&json) {
                return Ok(parsed);
            }
        }

        if let Some(json) = Self::extract_first_json_value(trimmed) {
            if let Ok(parsed) = serde_json::from_str::<T>(&json) {
                return Ok(parsed);
            }
        }

        Err(SimulationError::external(
            "model",
            "failed to extract valid JSON from model response",
        ))
    }

    /// Extract the first valid JSON value (object or array) from text.
    ///
    /// Uses `serde_json::Deserializer` to detect a valid JSON prefix.
    fn extract_first_json_value(content: &str) -> Option<String> {
        for (idx, ch) in content.char_indices() {
            if ch == '{' || ch == '[' {
                let candidate = &content[idx..];
                let mut de =
                    serde_json::Deserializer::from_str(candidate).into_iter::<serde_json::Value>();
                if let Some(Ok(_value)) = de.next() {
                    let end = de.byte_offset();
                    if end > 0 && end <= candidate.len() {
                        return Some(candidate[..end].to_string());
                    }
                }
            }
        }
        None
    }

    fn extract_fenced_block(content: &str, language: Option<&str>) -> Option<String> {
        let fence = "```";
        let mut search = content;

        loop {
            let start = search.find(fence)?;
            let after_start = &search[start + fence.len()..];

            let (lang_tag, rest) = match after_start.find('\n') {
                Some(line_end) => (after_start[..line_end].trim(), &after_start[line_end + 1..]),
                None => return None,
            };

            if let Some(expected) = language {
                if !lang_tag.eq_ignore_ascii_case(expected) {
                    search = after_start;
                    continue;
                }
            }

            let end = rest.find(fence)?;
            return Some(rest[..end].trim().to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(serde::Deserialize, Debug, PartialEq)]
    struct Payload {
        key: String,
    }

    #[test]
    fn test_parse_json_direct() {
        let parsed: Payload = ResponseParser::parse_json(r#"{"key": "value"}"#).unwrap();
        assert_eq!(parsed.key, "value");
    }

    #[test]
    fn test_parse_json_fenced() {
        let content = "Here is the analysis:\n```json\n{\"key\": \"value\"}\n```\nDone.";
        let parsed: Payload = ResponseParser::parse_json(content).unwrap();
        assert_eq!(parsed.key, "value");
    }

    #[test]
    fn test_parse_json_unlabeled_fence() {
        let content = "```\n{\"key\": \"value\"}\n```";
        let parsed: Payload = ResponseParser::parse_json(content).unwrap();
        assert_eq!(parsed.key, "value");
    }

    #[test]
    fn test_parse_json_embedded_in_prose() {
        let content = "The model says {\"key\": \"value\"} which looks right.";
        let parsed: Payload = ResponseParser::parse_json(content).unwrap();
        assert_eq!(parsed.key, "value");
    }

    #[test]
    fn test_parse_json_failure() {
        let result: Result<Payload, _> = ResponseParser::parse_json("no json here at all");
        let err = result.unwrap_err();
        assert!(err.is_external());
    }
}
