//! Fixed-position monitor.
//!
//! Keeps a toolbar pinned to the viewport once the page scrolls past it.
//! Activation wraps the toolbar root in a height-preserving placeholder,
//! installs a visual ghost behind it, and subscribes to the viewport event
//! stream; the handler flips the root between flow and `position: fixed` on
//! every scroll-class event.
//!
//! The handler runs unthrottled and is O(1) and allocation-free. Throttling
//! to animation frames is a candidate once a host exposes a frame clock.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::Result;
use crate::dom::{DomAdapter, NodeId, SubscriptionId, ViewportEvent};

use super::FixPosition;

/// Scroll-pinning machinery for a toolbar root.
///
/// One monitor per toolbar; the viewport subscription is per-instance and
/// released in [`teardown`](Self::teardown) before any node the handler
/// captures is removed.
pub(super) struct FixedPositionMonitor {
    root: NodeId,
    placeholder: NodeId,
    subscription: SubscriptionId,
    currently_fixed: Arc<AtomicBool>,
}

impl FixedPositionMonitor {
    /// Wrap `root` in a placeholder, install the ghost, and start watching
    /// the viewport.
    ///
    /// `root` must be attached; the placeholder takes its place in the
    /// parent and the root moves inside it.
    pub fn activate(
        dom: &dyn DomAdapter,
        root: NodeId,
        position: FixPosition,
    ) -> Result<Self> {
        let height = dom.offset_height(root)?;
        let placeholder = dom.create_element("div");
        dom.add_class(placeholder, "ui-toolbar-placeholder")?;
        dom.set_style(placeholder, "height", &format!("{height}px"))?;
        dom.insert_before(placeholder, root)?;
        dom.append_child(placeholder, root)?;

        // The ghost sits behind the real toolbar to mask content scrolling
        // underneath while the root is pinned.
        let ghost = dom.clone_node(root, true)?;
        dom.set_style(ghost, "z-index", "-1")?;
        dom.set_style(ghost, "position", "absolute")?;
        dom.set_style(ghost, "top", "0")?;
        dom.append_child(placeholder, ghost)?;

        let original_top = dom.offset_top(root)?;
        let currently_fixed = Arc::new(AtomicBool::new(false));

        let flag = currently_fixed.clone();
        let pin_top = position.top;
        let subscription = dom.subscribe_viewport(Arc::new(
            move |_event: ViewportEvent, dom: &dyn DomAdapter| {
                let fixed = dom.scroll_top() > original_top;
                let applied = if fixed {
                    dom.set_style(root, "position", "fixed")
                        .and_then(|_| dom.set_style(root, "top", &format!("{pin_top}px")))
                } else {
                    dom.remove_style(root, "position")
                        .and_then(|_| dom.remove_style(root, "top"))
                };
                match applied {
                    Ok(()) => flag.store(fixed, Ordering::SeqCst),
                    Err(error) => {
                        tracing::warn!(target: "headline::widget", %error, "pin update failed");
                    }
                }
            },
        ));

        tracing::debug!(target: "headline::widget", ?root, original_top, "fixed-position monitor active");

        Ok(Self {
            root,
            placeholder,
            subscription,
            currently_fixed,
        })
    }

    /// Whether the root is currently pinned to the viewport.
    pub fn currently_fixed(&self) -> bool {
        self.currently_fixed.load(Ordering::SeqCst)
    }

    /// Unsubscribe, restore the root to normal flow, and remove the
    /// placeholder (the ghost goes with it).
    pub fn teardown(&mut self, dom: &dyn DomAdapter) -> Result<()> {
        dom.unsubscribe_viewport(self.subscription)?;
        dom.remove_style(self.root, "position")?;
        dom.remove_style(self.root, "top")?;
        dom.insert_before(self.root, self.placeholder)?;
        dom.remove(self.placeholder)?;
        self.currently_fixed.store(false, Ordering::SeqCst);
        Ok(())
    }
}
