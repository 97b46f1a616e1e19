//! Introspective help document pipeline.
//!
//! Walks a composed command group into an arena-backed tree of display
//! metadata, then renders that tree into an ordered sequence of indented,
//! emphasis-classified text blocks. Turning emphasis into actual terminal
//! styling is the job of [`crate::theme`].

pub mod info;
pub mod render;
pub mod tree;
