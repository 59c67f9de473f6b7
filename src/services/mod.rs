//! Outbound collaborators: Jira client, generation provider, reply handling.

pub mod adf;
pub mod generation;
pub mod interpreter;
pub mod jira;

pub use generation::GenerationClient;
pub use jira::JiraClient;
