//! Logging and debugging facilities for Headline.
//!
//! This module provides:
//! - Integration with the `tracing` crate for structured logging
//! - Debug visualization for the widget ownership tree
//!
//! # Tracing Integration
//!
//! Headline uses the `tracing` crate for instrumentation. To see logs,
//! install a tracing subscriber in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt::init();
//!     // Your application code...
//! }
//! ```
//!
//! # Debug Visualization
//!
//! Use [`ObjectTreeDebug`] to inspect the ownership hierarchy:
//!
//! ```ignore
//! use headline_core::logging::ObjectTreeDebug;
//!
//! let debug = ObjectTreeDebug::new();
//! println!("{}", debug.format_tree());
//! ```

use std::fmt::Write as FmtWrite;

use crate::object::{ObjectId, global_registry};

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "headline_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "headline_core::signal";
    /// Object model target.
    pub const OBJECT: &str = "headline_core::object";
}

/// Style options for ownership tree visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
}

impl TreeStyle {
    fn branch(&self, last: bool) -> &'static str {
        match (self, last) {
            (Self::Ascii, false) => "|-- ",
            (Self::Ascii, true) => "`-- ",
            (Self::Unicode, false) => "├── ",
            (Self::Unicode, true) => "└── ",
        }
    }

    fn pipe(&self, last: bool) -> &'static str {
        match (self, last) {
            (Self::Ascii, false) => "|   ",
            (Self::Unicode, false) => "│   ",
            (_, true) => "    ",
        }
    }
}

/// Formats the global object registry's ownership tree for debugging.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectTreeDebug {
    style: TreeStyle,
}

impl ObjectTreeDebug {
    /// Create a formatter with the default (Unicode) style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a formatter with an explicit style.
    pub fn with_style(style: TreeStyle) -> Self {
        Self { style }
    }

    /// Render every root object and its descendants.
    pub fn format_tree(&self) -> String {
        let registry = global_registry();
        let mut out = String::new();
        for root in registry.roots() {
            self.format_node(&mut out, root, "", true, true);
        }
        out
    }

    fn format_node(&self, out: &mut String, id: ObjectId, prefix: &str, last: bool, root: bool) {
        let registry = global_registry();
        let label = {
            let name = registry.name(id).unwrap_or_default();
            let type_name = registry
                .type_name(id)
                .map(short_type_name)
                .unwrap_or("<destroyed>");
            if name.is_empty() {
                format!("{type_name} ({id:?})")
            } else {
                format!("{type_name} \"{name}\" ({id:?})")
            }
        };

        if root {
            let _ = writeln!(out, "{label}");
        } else {
            let _ = writeln!(out, "{prefix}{}{label}", self.style.branch(last));
        }

        let children = registry.children(id).unwrap_or_default();
        let child_prefix = if root {
            String::new()
        } else {
            format!("{prefix}{}", self.style.pipe(last))
        };
        for (index, &child) in children.iter().enumerate() {
            let child_last = index + 1 == children.len();
            self.format_node(out, child, &child_prefix, child_last, false);
        }
    }
}

/// Strip module path segments from a fully qualified type name.
fn short_type_name(full: &'static str) -> &'static str {
    full.rsplit("::").next().unwrap_or(full)
}
