//! Prompt construction for the generation provider.
//!
//! Pure string assembly: same input always yields the same prompt text,
//! nothing here touches the network or mutates its input.

use crate::models::{GenerateRequest, UserStory};

/// System instruction describing the exact output schema the model must return.
pub const SYSTEM_PROMPT: &str = r#"You are a senior QA engineer with expertise in creating comprehensive test cases from user stories. Your task is to analyze user stories and generate detailed test cases.

CRITICAL: You must return ONLY valid JSON matching this exact schema:

{
  "cases": [
    {
      "id": "TC-001",
      "title": "string",
      "steps": ["string", "..."],
      "testData": "string (optional)",
      "expectedResult": "string",
      "category": "string (e.g., Positive|Negative|Edge|Authorization|Non-Functional)",
      "storyName": "string (optional - the story this test case belongs to)"
    }
  ],
  "model": "string (optional)",
  "promptTokens": 0,
  "completionTokens": 0
}

Guidelines:
- Generate test case IDs like TC-001, TC-002, etc.
- Write concise, imperative steps (e.g., "Click login button", "Enter valid email")
- Include Positive, Negative, and Edge test cases where relevant
- Categories: Positive, Negative, Edge, Authorization, Non-Functional
- Steps should be actionable and specific
- Expected results should be clear and measurable
- If multiple stories, include the story name/title in the storyName field so test cases are tracked with their source

Return ONLY the JSON object, no additional text or formatting."#;

/// Build the user instruction for a single story.
pub fn build_prompt(request: &GenerateRequest) -> String {
    let mut prompt = format!(
        "Generate comprehensive test cases for the following user story:\n\n\
         Story Title: {}\n\n\
         Acceptance Criteria:\n{}\n",
        request.story_title, request.acceptance_criteria
    );

    if let Some(ref description) = request.description {
        prompt.push_str(&format!("\nDescription:\n{}\n", description));
    }

    if let Some(ref additional_info) = request.additional_info {
        prompt.push_str(&format!("\nAdditional Information:\n{}\n", additional_info));
    }

    prompt.push_str(
        "\nGenerate test cases covering positive scenarios, negative scenarios, edge cases, \
         and any authorization or non-functional requirements as applicable. \
         Return only the JSON response.",
    );

    prompt
}

/// Build the user instruction for a batch of stories.
///
/// Every story gets a numbered "Story k:" block in input order; the closing
/// directive requires coverage of all stories, a `storyName` equal to the
/// source story's title, and test-case IDs unique across the combined set.
pub fn build_multi_prompt(stories: &[UserStory], additional_info: Option<&str>) -> String {
    let mut prompt = format!(
        "Generate comprehensive test cases for the following {} user stories:\n\n",
        stories.len()
    );

    for (index, story) in stories.iter().enumerate() {
        prompt.push_str(&format!(
            "Story {}:\nKey: {}\nTitle: {}\nDescription: {}\n\n",
            index + 1,
            story.key,
            story.title,
            story.description
        ));
    }

    if let Some(info) = additional_info {
        prompt.push_str(&format!("\nAdditional Information:\n{}\n", info));
    }

    prompt.push_str(
        "\nIMPORTANT: Generate comprehensive test cases for ALL the above user stories, \
         covering positive scenarios, negative scenarios, edge cases, and any authorization \
         or non-functional requirements as applicable.\n\n\
         For EACH test case generated, set the \"storyName\" field to the story's title so \
         test cases are correctly associated with their source stories. This is critical for \
         multi-story test generation.\n\n\
         Ensure test case IDs are unique across all stories (TC-001, TC-002, etc.). \
         Return only the JSON response.",
    );

    prompt
}
