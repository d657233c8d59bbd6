//! Model infrastructure module
//!
//! # Structure
//! - `types` - Request, Response, Error types
//! - `traits` - GenerationPort, DocumentStore traits
//! - `adapter` - Prompt bundle to wire payload conversion
//! - `factory` - API key resolution and client construction
//! - `clients` - HTTP client implementations

pub mod adapter;
pub mod clients;
pub mod factory;
pub mod traits;
pub mod types;

pub use clients::GeminiClient;
pub use traits::{DocumentStore, GenerationPort};
pub use types::{GenerationRequest, GenerationResponse, ModelError};
