//! Interpretation of raw generation-provider replies.
//!
//! The model is instructed to return a bare JSON object; anything that does
//! not match the expected schema is a hard failure, never coerced into a
//! partial result. The one allowance is a surrounding markdown code fence,
//! which chat models add even when told not to.

use std::collections::HashSet;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{AppError, AppResult};
use crate::models::TestCase;

/// The shape the model is instructed to return. Token/model fields in the
/// reply body are ignored; authoritative counts come from provider usage.
#[derive(Debug, Deserialize)]
struct ModelReply {
    cases: Vec<TestCase>,
}

/// Parse the raw model reply into validated test cases.
///
/// Rejects replies missing `cases`, malformed case entries (missing title,
/// steps not a sequence, missing expectedResult or category), or anything
/// that is not a JSON object after fence stripping.
pub fn interpret_reply(raw: &str) -> AppResult<Vec<TestCase>> {
    let body = strip_code_fence(raw);

    let reply: ModelReply = serde_json::from_str(body).map_err(|e| {
        warn!("Model reply failed schema validation: {}", e);
        debug!("Offending reply text: {}", raw);
        AppError::InvalidReply(format!("reply did not match the expected schema: {}", e))
    })?;

    Ok(reply.cases)
}

/// Strip a single surrounding markdown code fence (``` or ```json), if any.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(inner) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // Drop the info string ("json") on the opening fence line
    match inner.split_once('\n') {
        Some((_, body)) => body.trim(),
        None => inner.trim(),
    }
}

/// Renumber colliding test-case IDs so they are pairwise distinct.
///
/// First occurrence of an ID keeps it; later collisions get the next free
/// `TC-NNN`. Order is preserved. The prompt already demands unique IDs, but
/// the model's self-policing is not trusted.
pub fn ensure_unique_ids(cases: &mut [TestCase]) {
    let mut seen: HashSet<String> = HashSet::new();
    let mut next = 1usize;

    for case in cases.iter_mut() {
        if seen.insert(case.id.clone()) {
            continue;
        }

        let replacement = loop {
            let candidate = format!("TC-{:03}", next);
            next += 1;
            if !seen.contains(&candidate) {
                break candidate;
            }
        };
        warn!(
            "Duplicate test case id '{}' renumbered to '{}'",
            case.id, replacement
        );
        seen.insert(replacement.clone());
        case.id = replacement;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_REPLY: &str = r#"{
        "cases": [
            {
                "id": "TC-001",
                "title": "Valid login",
                "steps": ["Open login page", "Submit valid credentials"],
                "expectedResult": "Dashboard shown",
                "category": "Positive"
            },
            {
                "id": "TC-002",
                "title": "Wrong password",
                "steps": ["Open login page", "Submit wrong password"],
                "testData": "user@example.com / wrong",
                "expectedResult": "Error message shown",
                "category": "Negative",
                "storyName": "Login"
            }
        ],
        "model": "gpt-4o-mini",
        "promptTokens": 0,
        "completionTokens": 0
    }"#;

    #[test]
    fn test_valid_reply_parses() {
        let cases = interpret_reply(VALID_REPLY).unwrap();
        assert_eq!(cases.len(), 2);
        assert_eq!(cases[0].id, "TC-001");
        assert_eq!(cases[1].story_name.as_deref(), Some("Login"));
    }

    #[test]
    fn test_fenced_reply_parses() {
        let fenced = format!("```json\n{}\n```", VALID_REPLY);
        let cases = interpret_reply(&fenced).unwrap();
        assert_eq!(cases.len(), 2);
    }

    #[test]
    fn test_missing_cases_rejected() {
        let raw = r#"{"promptTokens": 0, "completionTokens": 0}"#;
        assert!(matches!(
            interpret_reply(raw),
            Err(AppError::InvalidReply(_))
        ));
    }

    #[test]
    fn test_missing_expected_result_rejected() {
        let raw = r#"{"cases": [{"id": "TC-001", "title": "t", "steps": [], "category": "Positive"}]}"#;
        assert!(interpret_reply(raw).is_err());
    }

    #[test]
    fn test_steps_must_be_a_sequence() {
        let raw = r#"{"cases": [{"id": "TC-001", "title": "t", "steps": "click things",
                      "expectedResult": "ok", "category": "Positive"}]}"#;
        assert!(interpret_reply(raw).is_err());
    }

    #[test]
    fn test_non_json_rejected() {
        assert!(interpret_reply("Sure! Here are your test cases:").is_err());
    }

    #[test]
    fn test_extra_surrounding_prose_rejected() {
        let raw = format!("Here you go:\n{}", VALID_REPLY);
        assert!(interpret_reply(&raw).is_err());
    }

    fn case(id: &str) -> TestCase {
        TestCase {
            id: id.to_string(),
            title: "t".to_string(),
            steps: vec![],
            test_data: None,
            expected_result: "ok".to_string(),
            category: "Positive".to_string(),
            story_name: None,
        }
    }

    #[test]
    fn test_unique_ids_untouched() {
        let mut cases = vec![case("TC-001"), case("TC-002")];
        ensure_unique_ids(&mut cases);
        assert_eq!(cases[0].id, "TC-001");
        assert_eq!(cases[1].id, "TC-002");
    }

    #[test]
    fn test_colliding_ids_renumbered_pairwise_distinct() {
        let mut cases = vec![case("TC-001"), case("TC-001"), case("TC-002"), case("TC-002")];
        ensure_unique_ids(&mut cases);

        let ids: Vec<&str> = cases.iter().map(|c| c.id.as_str()).collect();
        let unique: HashSet<&str> = ids.iter().copied().collect();
        assert_eq!(unique.len(), cases.len());
        // First occurrences keep their ids, order preserved
        assert_eq!(ids[0], "TC-001");
        assert_eq!(ids[2], "TC-002");
    }

    #[test]
    fn test_renumbering_skips_taken_ids() {
        let mut cases = vec![case("TC-001"), case("TC-002"), case("TC-001")];
        ensure_unique_ids(&mut cases);
        assert_eq!(cases[2].id, "TC-003");
    }
}
