//! Test case and generation response models.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A structured, steppable verification scenario derived from a story.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    /// Identifier in the form "TC-" + zero-padded sequence ("TC-001")
    pub id: String,
    /// Test case title
    pub title: String,
    /// Ordered imperative instructions
    pub steps: Vec<String>,
    /// Optional test data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_data: Option<String>,
    /// Expected, measurable outcome
    pub expected_result: String,
    /// Category label (Positive, Negative, Edge, Authorization,
    /// Non-Functional); open string, not a closed enum
    pub category: String,
    /// Source story title, set when generated from a multi-story batch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub story_name: Option<String>,
}

/// Response to a generation request.
///
/// Unsigned token counts make negative values a deserialization error
/// rather than something to check after the fact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    /// Generated test cases, IDs pairwise distinct within the response
    pub cases: Vec<TestCase>,
    /// Model that produced the cases
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Tokens consumed by the prompt
    pub prompt_tokens: u32,
    /// Tokens produced by the completion
    pub completion_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_response() -> GenerateResponse {
        GenerateResponse {
            cases: vec![TestCase {
                id: "TC-001".to_string(),
                title: "Valid login".to_string(),
                steps: vec![
                    "Open the login page".to_string(),
                    "Enter valid credentials".to_string(),
                    "Click login".to_string(),
                ],
                test_data: Some("user@example.com / hunter2".to_string()),
                expected_result: "Dashboard is shown".to_string(),
                category: "Positive".to_string(),
                story_name: None,
            }],
            model: Some("gpt-4o-mini".to_string()),
            prompt_tokens: 120,
            completion_tokens: 340,
        }
    }

    #[test]
    fn test_round_trip_is_lossless() {
        let response = sample_response();
        let wire = serde_json::to_string(&response).unwrap();
        let decoded: GenerateResponse = serde_json::from_str(&wire).unwrap();
        assert_eq!(decoded, response);
    }

    #[test]
    fn test_wire_uses_camel_case_names() {
        let wire = serde_json::to_value(sample_response()).unwrap();
        assert!(wire.get("promptTokens").is_some());
        assert!(wire.get("completionTokens").is_some());
        assert!(wire["cases"][0].get("expectedResult").is_some());
        assert!(wire["cases"][0].get("testData").is_some());
    }

    #[test]
    fn test_negative_token_counts_rejected() {
        let raw = r#"{"cases":[],"promptTokens":-1,"completionTokens":0}"#;
        assert!(serde_json::from_str::<GenerateResponse>(raw).is_err());
    }

    #[test]
    fn test_absent_optional_fields_not_serialized() {
        let mut response = sample_response();
        response.model = None;
        response.cases[0].test_data = None;
        let wire = serde_json::to_value(&response).unwrap();
        assert!(wire.get("model").is_none());
        assert!(wire["cases"][0].get("testData").is_none());
    }
}
