//! TUI pane rendering modules
//!
//! This module provides the rendering logic for all visual panes in the TUI,
//! organized by responsibility for maintainability.
//!
//! # Pane Modules
//!
//! - [`source`]: Definition text with token highlighting, selected span and error marker
//! - [`tree`]: Foldable syntax tree with field labels and leaf text
//! - [`status`]: Status bar with keybindings and tree statistics
//!
//! # Architecture
//!
//! Each pane module exports:
//! - A primary `render_*` function
//! - A `*RenderData` struct bundling the borrowed state it draws

pub mod source;
pub mod status;
pub mod tree;

// Re-export render functions for convenience
pub use source::{render_source_pane, SourceRenderData};
pub use status::{render_status_bar, StatusRenderData};
pub use tree::{render_tree_pane, TreeRenderData};
