#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! `msagent-rs` is a project that revives the classic Microsoft Agent characters
//! (Clippy and friends) and brings their animations to modern platforms using Rust.
//!
pub use msagent_internal::*;
