//! DOM abstraction for Headline widgets.
//!
//! Widgets never touch a document directly; every structural mutation,
//! measurement, style change, and event subscription goes through the
//! [`DomAdapter`] trait. This keeps the widget logic testable against an
//! in-memory document ([`MemoryDom`]) and lets hosts bind the same widgets
//! to whatever rendering surface they actually have.
//!
//! # Key Types
//!
//! - [`DomAdapter`] - The primitive-operation seam widgets are written against
//! - [`NodeId`] - Stable handle to a document node
//! - [`ViewportEvent`] - The scroll-class event family
//! - [`MemoryDom`] - In-memory adapter used for headless operation and tests
//!
//! # Concurrency
//!
//! Adapter methods take `&self`; implementations use interior mutability.
//! Handlers registered through [`DomAdapter::bind_click`] and
//! [`DomAdapter::subscribe_viewport`] are invoked synchronously during
//! dispatch, on the dispatching thread.

use std::sync::Arc;

use slotmap::new_key_type;

mod memory;

pub use memory::MemoryDom;

new_key_type! {
    /// A stable handle to a node in the document.
    ///
    /// Becomes invalid when the node (or an ancestor) is removed.
    pub struct NodeId;
}

new_key_type! {
    /// Handle for a viewport event subscription.
    ///
    /// Every subscription is per-instance and must be released with
    /// [`DomAdapter::unsubscribe_viewport`]; the viewport event stream is
    /// shared, never owned.
    pub struct SubscriptionId;
}

new_key_type! {
    /// Handle for a bound click handler.
    pub struct HandlerId;
}

/// The scroll-class event family dispatched by the viewport.
///
/// A viewport subscription covers all five members; widgets that care only
/// that "a scroll-class event occurred" can ignore the discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportEvent {
    /// A touch gesture began.
    TouchStart,
    /// A touch point moved.
    TouchMove,
    /// A touch gesture ended.
    TouchEnd,
    /// A touch gesture was cancelled.
    TouchCancel,
    /// The viewport scrolled.
    Scroll,
}

/// Callback invoked when a node receives a click.
pub type ClickHandler = Arc<dyn Fn(&dyn DomAdapter) + Send + Sync>;

/// Callback invoked for every dispatched viewport event.
pub type ViewportHandler = Arc<dyn Fn(ViewportEvent, &dyn DomAdapter) + Send + Sync>;

/// Errors raised by DOM adapter primitives.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// The node handle is invalid or the node has been removed.
    #[error("node is not in the document")]
    NodeNotFound,

    /// The operation requires a node with a parent.
    #[error("node has no parent")]
    Detached,

    /// Inserting the node would make it its own ancestor.
    #[error("node cannot be inserted into its own subtree")]
    CircularHierarchy,

    /// The viewport subscription is invalid or already released.
    #[error("viewport subscription is invalid or already released")]
    InvalidSubscription,
}

/// Result type alias for DOM operations.
pub type DomResult<T> = std::result::Result<T, DomError>;

/// Primitive document operations.
///
/// This is the complete surface widgets are allowed to use: element
/// creation, tree mutation, cloning, measurement, styles, classes, click
/// binding, viewport subscription, and history navigation. Anything richer
/// belongs in the widget layer.
pub trait DomAdapter: Send + Sync {
    // =========================================================================
    // Elements
    // =========================================================================

    /// Create a detached element with the given tag name.
    fn create_element(&self, tag: &str) -> NodeId;

    /// The document body.
    fn body(&self) -> NodeId;

    /// Detach `node` from its parent and release its whole subtree.
    ///
    /// Click handlers bound anywhere in the subtree are released with it.
    fn remove(&self, node: NodeId) -> DomResult<()>;

    /// Clone a node: tag, classes, attributes, styles, text, geometry.
    ///
    /// The clone is detached and carries no bound handlers. With `deep`,
    /// descendants are cloned recursively.
    fn clone_node(&self, node: NodeId, deep: bool) -> DomResult<NodeId>;

    // =========================================================================
    // Tree
    // =========================================================================

    /// Append `child` as the last child of `parent`, detaching it from any
    /// current parent first.
    fn append_child(&self, parent: NodeId, child: NodeId) -> DomResult<()>;

    /// Insert `new` immediately before `reference` under the same parent,
    /// detaching `new` from any current parent first.
    ///
    /// Fails with [`DomError::Detached`] if `reference` has no parent.
    fn insert_before(&self, new: NodeId, reference: NodeId) -> DomResult<()>;

    /// Direct children, in document order.
    fn children(&self, node: NodeId) -> DomResult<Vec<NodeId>>;

    /// The parent node, if attached.
    fn parent(&self, node: NodeId) -> DomResult<Option<NodeId>>;

    // =========================================================================
    // Content, attributes, classes
    // =========================================================================

    /// The element's tag name, lowercase.
    fn tag(&self, node: NodeId) -> DomResult<String>;

    /// Replace the element's text content.
    fn set_text(&self, node: NodeId, text: &str) -> DomResult<()>;

    /// The element's text content.
    fn text(&self, node: NodeId) -> DomResult<String>;

    /// Set an attribute.
    fn set_attribute(&self, node: NodeId, name: &str, value: &str) -> DomResult<()>;

    /// Read an attribute.
    fn attribute(&self, node: NodeId, name: &str) -> DomResult<Option<String>>;

    /// Add a class to the element's class list (no-op if present).
    fn add_class(&self, node: NodeId, class: &str) -> DomResult<()>;

    /// Whether the element's class list contains `class`.
    fn has_class(&self, node: NodeId, class: &str) -> DomResult<bool>;

    // =========================================================================
    // Styles and geometry
    // =========================================================================

    /// Set an inline style property.
    fn set_style(&self, node: NodeId, property: &str, value: &str) -> DomResult<()>;

    /// Remove an inline style property, restoring the default.
    fn remove_style(&self, node: NodeId, property: &str) -> DomResult<()>;

    /// Read an inline style property.
    fn style(&self, node: NodeId, property: &str) -> DomResult<Option<String>>;

    /// The node's offset from the document top, in pixels.
    fn offset_top(&self, node: NodeId) -> DomResult<f64>;

    /// The node's rendered height, in pixels.
    fn offset_height(&self, node: NodeId) -> DomResult<f64>;

    // =========================================================================
    // Viewport and interaction
    // =========================================================================

    /// The viewport's current vertical scroll offset, in pixels.
    fn scroll_top(&self) -> f64;

    /// Subscribe to the shared viewport event stream.
    ///
    /// The handler fires for every [`ViewportEvent`], unthrottled. The
    /// returned handle must be released with
    /// [`unsubscribe_viewport`](Self::unsubscribe_viewport) before any node
    /// the handler captures is removed, or the subscription keeps a
    /// reference to a detached subtree.
    fn subscribe_viewport(&self, handler: ViewportHandler) -> SubscriptionId;

    /// Release a viewport subscription.
    fn unsubscribe_viewport(&self, id: SubscriptionId) -> DomResult<()>;

    /// Bind a click handler to a node.
    ///
    /// The handler is released when the node is removed.
    fn bind_click(&self, node: NodeId, handler: ClickHandler) -> DomResult<HandlerId>;

    /// Dispatch a click on a node, invoking its bound handlers. Clicking a
    /// link follows its `href` (the default navigation path) instead of any
    /// widget-level callback.
    fn click(&self, node: NodeId) -> DomResult<()>;

    /// Navigate back `steps` entries in the session history.
    fn history_back(&self, steps: u32);

    // =========================================================================
    // Provided helpers
    // =========================================================================

    /// Whether the node is a navigational link (`a` element).
    fn is_link(&self, node: NodeId) -> DomResult<bool> {
        Ok(self.tag(node)? == "a")
    }

    /// Whether the node is a heading-class element (`h1`–`h4`).
    fn is_heading(&self, node: NodeId) -> DomResult<bool> {
        Ok(matches!(
            self.tag(node)?.as_str(),
            "h1" | "h2" | "h3" | "h4"
        ))
    }
}
