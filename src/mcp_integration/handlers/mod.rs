//! MCP integration handlers
//!
//! Tool implementations organized by Okta resource. Every handler that talks
//! to Okta takes a `&dyn OktaApi` and the raw tool arguments and returns the
//! JSON content of the tool result.

pub mod access_analysis;
pub mod apps;
pub mod args;
pub mod datetime;
pub mod groups;
pub mod log_events;
pub mod login_risk;
pub mod policies;
pub mod users;
