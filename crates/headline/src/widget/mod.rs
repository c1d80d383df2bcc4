//! Widget system for Headline.
//!
//! A widget is a registered [`Object`] that owns a DOM subtree. Parents own
//! children as `Box<dyn Widget>` and are responsible for tearing them down
//! before releasing their own resources, so a destroyed parent never leaves
//! orphaned nodes or handlers behind.
//!
//! # Key Types
//!
//! - [`Widget`] - The trait every widget implements
//! - [`widgets::Toolbar`] - Header toolbar with back affordance and button cluster
//! - [`widgets::ToolButton`] - Owned button for the toolbar's right region
//!
//! # Related
//!
//! - [`crate::dom`] - The adapter surface widgets are written against

pub mod widgets;

use headline_core::Object;

use crate::Result;
use crate::dom::{DomAdapter, NodeId};

/// A DOM-backed widget.
///
/// Every widget is registered in the global object registry (via its
/// [`Object`] impl) and owns exactly one root node. `teardown` releases the
/// widget's DOM resources; registry unregistration happens through the
/// normal object lifecycle, either a parent's cascade or drop.
pub trait Widget: Object {
    /// The widget's root node.
    fn root(&self) -> NodeId;

    /// Release the widget's DOM resources.
    ///
    /// Owning parents call this for each child before removing their own
    /// subtree. Idempotent teardown is not required; callers invoke it at
    /// most once.
    fn teardown(&mut self, dom: &dyn DomAdapter) -> Result<()>;
}
