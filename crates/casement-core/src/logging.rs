//! Logging and debugging facilities for Casement.
//!
//! This module provides:
//! - Target and span names for filtering `tracing` output by subsystem
//! - Options for the element-tree dump produced by `ElementTree::format_tree`
//!
//! # Tracing Integration
//!
//! Casement uses the `tracing` crate for instrumentation. Install a subscriber
//! in the compositor to see the logs:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("casement::window=debug,casement::layout=trace")
//!     .init();
//! ```

/// Span names used throughout Casement for tracing.
pub mod span_names {
    /// One deferred layout pass over all dirty containers.
    pub const LAYOUT_SETTLE: &str = "casement::layout_settle";
    /// Delivery of one pointer event into the tree.
    pub const POINTER_DISPATCH: &str = "casement::pointer_dispatch";
    /// Matching a committed serial against pending window updates.
    pub const SERIAL_RECONCILE: &str = "casement::serial_reconcile";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core infrastructure target.
    pub const CORE: &str = "casement_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "casement_core::signal";
    /// Element tree structure (insert, add, remove, destroy).
    pub const TREE: &str = "casement::tree";
    /// Layout invalidation and box arrangement.
    pub const LAYOUT: &str = "casement::layout";
    /// Pointer event routing and focus.
    pub const INPUT: &str = "casement::input";
    /// Window requests and pending-update reconciliation.
    pub const WINDOW: &str = "casement::window";
    /// Scene backend node management.
    pub const SCENE: &str = "casement::scene";
}

/// Style options for element tree visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
    /// Compact single-line representation.
    Compact,
}

/// Configuration for element tree debug output.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    /// The style of tree visualization.
    pub style: TreeStyle,
    /// Whether to show element IDs.
    pub show_ids: bool,
    /// Whether to show type names.
    pub show_types: bool,
    /// Whether to show position and dimensions.
    pub show_geometry: bool,
    /// Whether to list hidden elements.
    pub show_hidden: bool,
    /// Maximum depth to traverse (None for unlimited).
    pub max_depth: Option<usize>,
    /// Indent size for each level.
    pub indent_size: usize,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_ids: true,
            show_types: true,
            show_geometry: true,
            show_hidden: true,
            max_depth: None,
            indent_size: 2,
        }
    }
}

impl TreeFormatOptions {
    /// Create options for detailed debugging output.
    pub fn detailed() -> Self {
        Self::default()
    }

    /// Create options for minimal output: type names only, visible elements.
    pub fn minimal() -> Self {
        Self {
            show_ids: false,
            show_geometry: false,
            show_hidden: false,
            ..Default::default()
        }
    }

    /// Whether a node at `depth` is past the configured limit.
    pub fn exceeds_depth(&self, depth: usize) -> bool {
        self.max_depth.is_some_and(|max| depth > max)
    }

    /// Build the prefix string for a tree node.
    pub fn prefix(&self, depth: usize, is_last: bool) -> String {
        if depth == 0 {
            return String::new();
        }

        let (branch, tee, corner) = match self.style {
            TreeStyle::Ascii => ("|", "+--", "`--"),
            TreeStyle::Unicode => ("\u{2502}", "\u{251c}\u{2500}\u{2500}", "\u{2514}\u{2500}\u{2500}"),
            TreeStyle::Compact => ("", "-", "-"),
        };

        let mut prefix = String::new();
        for _ in 0..(depth - 1) {
            prefix.push_str(branch);
            for _ in 0..self.indent_size {
                prefix.push(' ');
            }
        }
        prefix.push_str(if is_last { corner } else { tee });
        prefix.push(' ');
        prefix
    }
}
