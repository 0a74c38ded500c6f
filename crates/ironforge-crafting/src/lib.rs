//! # Ironforge Crafting
//!
//! Custom recipe matching for the 3x3 crafting grid.
//!
//! This crate decides whether a grid snapshot satisfies a registered recipe
//! and what the recipe produces:
//! - Ingredient requirements (material, tag, item template)
//! - Shaped recipes placed anywhere inside the grid
//! - Shapeless recipes matched as a multiset, with an optional strict mode
//! - Result resolution through an item template resolver
//! - A registry consulted by the crafting GUI layer
//!
//! Tag and template lookups are collaborators supplied by the host; this crate
//! only consumes them.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod grid;
pub mod ingredient;
pub mod recipe;
pub mod registry;
pub mod shaped;
pub mod shapeless;
pub mod tags;
pub mod template;


/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::*;
    pub use crate::grid::*;
    pub use crate::ingredient::*;
    pub use crate::recipe::*;
    pub use crate::registry::*;
    pub use crate::shaped::*;
    pub use crate::shapeless::*;
    pub use crate::tags::*;
    pub use crate::template::*;
}

pub use prelude::*;
