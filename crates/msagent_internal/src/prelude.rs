//! Prelude module for `msagent_internal`.

#[doc(inline)]
pub use msagent_types::prelude::*;
