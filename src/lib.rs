//! StoryGen server library.
//!
//! Turns user stories (typed in or pulled from Jira) into structured test
//! cases via a generation provider, exposing the flow over an HTTP API.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod prompt;
pub mod services;
