//! Rendering support: frame composition and atlas layout.

pub mod atlas;
pub mod compose;

pub use atlas::{AtlasError, AtlasLayout};
pub use compose::composite_frame;
