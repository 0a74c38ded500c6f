//! # Ironforge Common
//!
//! Common types, utilities, and shared abstractions for Ironforge.
//!
//! This crate provides foundational types used across all Ironforge crates:
//! - Base materials of the host game
//! - Item stacks as seen by the plugin
//! - ID types (RecipeId, TemplateId)
//! - Version information for data file schemas
//! - Common error types
//! - Prelude for convenient imports

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod ids;
pub mod material;
pub mod stack;
pub mod version;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::*;
    pub use crate::ids::*;
    pub use crate::material::*;
    pub use crate::stack::*;
    pub use crate::version::*;
}

pub use prelude::*;
