//! MCP tool schema definitions
//!
//! JSON schema definitions for the tools agents can discover and call,
//! organized by functional area:
//! - [`user_schemas`] - User queries
//! - [`group_schemas`] - Group queries
//! - [`app_schemas`] - Application queries
//! - [`log_schemas`] - System Log queries
//! - [`policy_schemas`] - Policies, rules and network zones
//! - [`datetime_schemas`] - Time helpers that need no Okta access
//! - [`analysis_schemas`] - Access and login risk analysis
//!
//! These schemas are consumed by the MCP protocol layer for `tools/list`.

pub mod analysis_schemas;
pub mod app_schemas;
pub mod datetime_schemas;
pub mod group_schemas;
pub mod log_schemas;
pub mod policy_schemas;
pub mod user_schemas;
