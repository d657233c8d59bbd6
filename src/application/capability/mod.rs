//! # Capabilities
//!
//! Named, described units of behaviour an agent loop can invoke by name:
//! tools (external actions) and, for the super agent, other agents.
//!
//! - [`Registry`] - case-insensitive name index that rejects collisions
//! - [`Tool`] / [`ToolSpec`] - executable tools and their parameter contract
//! - [`builtin`] - HTTP fetch tools instantiated from config

pub mod builtin;
mod error;
mod parameter;
mod registry;
mod tool;

pub use error::{RegistryError, ToolError};
pub use parameter::ToolParameter;
pub use registry::{Capability, Registry};
pub use tool::{Tool, ToolSpec};
