//! Generation request models: single-story and multi-story input shapes.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

/// Request to generate test cases from a single user story.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    /// Story title
    pub story_title: String,
    /// Acceptance criteria text
    pub acceptance_criteria: String,
    /// Optional free-text description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Optional additional context for the generator
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<String>,
}

impl GenerateRequest {
    /// Validate field-level rules, collecting every violation.
    pub fn validate(&self) -> AppResult<()> {
        let mut violations = Vec::new();

        if self.story_title.is_empty() {
            violations.push("storyTitle: Story title is required".to_string());
        }
        if self.acceptance_criteria.is_empty() {
            violations.push("acceptanceCriteria: Acceptance criteria is required".to_string());
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(violations))
        }
    }
}

/// A user story, typically sourced from the issue tracker.
///
/// `description` must be present as a field but may be empty text; the
/// tracker client substitutes the story title when the tracker has none.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserStory {
    /// Opaque tracker-issue identifier
    pub id: String,
    /// Tracker-issue key (e.g. "PROJ-42")
    pub key: String,
    /// Story title
    pub title: String,
    /// Story description (may be empty)
    pub description: String,
}

/// Request to generate test cases from a batch of user stories.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateMultiRequest {
    /// Ordered, non-empty sequence of stories
    pub stories: Vec<UserStory>,
    /// Optional additional context for the generator
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<String>,
}

impl GenerateMultiRequest {
    /// Validate field-level rules, collecting every violation.
    ///
    /// Story `id`s are not required to be unique; uniqueness applies to
    /// generated test-case IDs, not to input stories.
    pub fn validate(&self) -> AppResult<()> {
        let mut violations = Vec::new();

        if self.stories.is_empty() {
            violations.push("stories: At least one story is required".to_string());
        }
        for (idx, story) in self.stories.iter().enumerate() {
            if story.id.is_empty() {
                violations.push(format!("stories[{}].id: id is required", idx));
            }
            if story.key.is_empty() {
                violations.push(format!("stories[{}].key: key is required", idx));
            }
            if story.title.is_empty() {
                violations.push(format!("stories[{}].title: title is required", idx));
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(violations))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn story(id: &str, key: &str, title: &str) -> UserStory {
        UserStory {
            id: id.to_string(),
            key: key.to_string(),
            title: title.to_string(),
            description: String::new(),
        }
    }

    #[test]
    fn test_valid_request_passes() {
        let req = GenerateRequest {
            story_title: "Login".to_string(),
            acceptance_criteria: "User can log in".to_string(),
            description: None,
            additional_info: None,
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_empty_title_cites_story_title() {
        let req = GenerateRequest {
            story_title: String::new(),
            acceptance_criteria: "x".to_string(),
            description: None,
            additional_info: None,
        };
        let err = req.validate().unwrap_err();
        assert!(err.to_string().contains("storyTitle"));
    }

    #[test]
    fn test_all_violations_reported_at_once() {
        let req = GenerateRequest {
            story_title: String::new(),
            acceptance_criteria: String::new(),
            description: None,
            additional_info: None,
        };
        match req.validate().unwrap_err() {
            crate::error::AppError::Validation(violations) => {
                assert_eq!(violations.len(), 2);
            }
            other => panic!("expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn test_multi_request_rejects_empty_stories() {
        let req = GenerateMultiRequest {
            stories: vec![],
            additional_info: None,
        };
        let err = req.validate().unwrap_err();
        assert!(err.to_string().contains("stories"));
    }

    #[test]
    fn test_multi_request_accepts_duplicate_story_ids() {
        let req = GenerateMultiRequest {
            stories: vec![story("1", "PROJ-1", "First"), story("1", "PROJ-2", "Second")],
            additional_info: None,
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_multi_request_names_the_offending_story() {
        let req = GenerateMultiRequest {
            stories: vec![story("1", "PROJ-1", "First"), story("", "PROJ-2", "")],
            additional_info: None,
        };
        let err = req.validate().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("stories[1].id"));
        assert!(msg.contains("stories[1].title"));
    }

    #[test]
    fn test_missing_description_field_is_a_deserialization_error() {
        let raw = r#"{"id":"1","key":"PROJ-1","title":"Login"}"#;
        assert!(serde_json::from_str::<UserStory>(raw).is_err());
    }

    #[test]
    fn test_wire_field_names_are_camel_case() {
        let raw = r#"{"storyTitle":"Login","acceptanceCriteria":"AC","additionalInfo":"extra"}"#;
        let req: GenerateRequest = serde_json::from_str(raw).unwrap();
        assert_eq!(req.story_title, "Login");
        assert_eq!(req.additional_info.as_deref(), Some("extra"));
    }
}
