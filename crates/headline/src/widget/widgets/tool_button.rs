//! Tool button widget implementation.
//!
//! This module provides [`ToolButton`], a labeled button intended to be
//! handed to [`Toolbar::add_buttons`](super::Toolbar::add_buttons), which
//! takes ownership and places it in the toolbar's right-hand cluster.
//!
//! # Example
//!
//! ```ignore
//! use headline::dom::MemoryDom;
//! use headline::widget::widgets::ToolButton;
//!
//! let dom = MemoryDom::new();
//! let button = ToolButton::new(&dom, "Share")?;
//!
//! button.clicked.connect(|_| {
//!     println!("share requested");
//! });
//! ```

use std::sync::Arc;

use headline_core::{Object, ObjectBase, ObjectId, Signal};

use crate::Result;
use crate::dom::{DomAdapter, NodeId};
use crate::widget::Widget;

// ============================================================================
// Tool Button
// ============================================================================

/// A labeled button backed by a `span.ui-btn` element.
///
/// The click binding is installed once at construction; clicking the
/// element emits [`clicked`](Self::clicked). The button owns its node and
/// removes it on [`Widget::teardown`].
pub struct ToolButton {
    base: ObjectBase,
    root: NodeId,
    label: String,

    /// Emitted when the button's element is clicked.
    pub clicked: Arc<Signal<()>>,
}

impl ToolButton {
    /// Create a detached button with the given label.
    pub fn new(dom: &dyn DomAdapter, label: &str) -> Result<Self> {
        let root = dom.create_element("span");
        dom.add_class(root, "ui-btn")?;
        dom.set_text(root, label)?;

        let clicked = Arc::new(Signal::new());
        let emitter = clicked.clone();
        dom.bind_click(
            root,
            Arc::new(move |_dom| {
                emitter.emit(());
            }),
        )?;

        Ok(Self {
            base: ObjectBase::new::<ToolButton>(),
            root,
            label: label.to_string(),
            clicked,
        })
    }

    /// The button's label text.
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Object for ToolButton {
    fn object_id(&self) -> ObjectId {
        self.base.id()
    }
}

impl Widget for ToolButton {
    fn root(&self) -> NodeId {
        self.root
    }

    fn teardown(&mut self, dom: &dyn DomAdapter) -> Result<()> {
        tracing::trace!(target: "headline::widget", id = ?self.object_id(), "tearing down tool button");
        dom.remove(self.root)?;
        Ok(())
    }
}
