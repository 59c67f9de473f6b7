//! API endpoint modules.

pub mod generate;
pub mod health;
pub mod jira;
pub mod openapi;

pub use generate::configure_routes as configure_generate_routes;
pub use health::configure_health_routes;
pub use jira::configure_routes as configure_jira_routes;
pub use openapi::ApiDoc;
