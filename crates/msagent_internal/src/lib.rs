//! Internal crate for `msagent-rs`.
//!
//! This module is separated into its own crate to keep the public facade crate thin,
//! and should not be used directly.
//!
//! # Examples
//!
//! ```rust
//! use msagent_internal::prelude::*;
//!
//! // All commonly used types are available
//! let size = IntSize::new(128, 128);
//! assert!(!size.is_empty());
//! ```

/// `use msagent_internal::prelude::*;` to import commonly used items.
pub mod prelude;

// Re-export msagent_types for convenience
pub use msagent_types;
pub use msagent_types::*;
