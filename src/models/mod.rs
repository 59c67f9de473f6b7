//! Domain models for the story-to-test-case server.

pub mod generate;
pub mod jira;
pub mod test_case;

// Re-export commonly used types
pub use generate::{GenerateMultiRequest, GenerateRequest, UserStory};
pub use jira::{
    ConnectionTestResponse, JiraConnectionRequest, JiraProject, ProjectsResponse, Sprint,
    SprintsRequest, SprintsResponse, StoriesRequest, StoriesResponse,
};
pub use test_case::{GenerateResponse, TestCase};
