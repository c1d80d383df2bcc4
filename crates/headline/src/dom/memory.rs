//! In-memory DOM adapter.
//!
//! [`MemoryDom`] implements the full [`DomAdapter`] surface over an arena of
//! nodes, with explicit geometry records and a synthetic viewport. It backs
//! every test in this crate and lets hosts run widgets headless.
//!
//! Geometry is not computed from layout: `offset_top` / `offset_height`
//! report whatever [`MemoryDom::set_geometry`] recorded (zero by default).

use std::collections::HashMap;

use parking_lot::RwLock;
use slotmap::SlotMap;

use super::{
    ClickHandler, DomAdapter, DomError, DomResult, HandlerId, NodeId, SubscriptionId,
    ViewportEvent, ViewportHandler,
};

#[derive(Clone)]
struct NodeData {
    tag: String,
    classes: Vec<String>,
    text: String,
    attributes: HashMap<String, String>,
    styles: HashMap<String, String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    /// Document-relative offset from the top, in pixels.
    top: f64,
    /// Rendered height, in pixels.
    height: f64,
}

impl NodeData {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            classes: Vec::new(),
            text: String::new(),
            attributes: HashMap::new(),
            styles: HashMap::new(),
            parent: None,
            children: Vec::new(),
            top: 0.0,
            height: 0.0,
        }
    }
}

struct DomState {
    nodes: SlotMap<NodeId, NodeData>,
    body: NodeId,
    scroll_top: f64,
    back_count: u64,
    navigations: Vec<String>,
    click_handlers: SlotMap<HandlerId, (NodeId, ClickHandler)>,
    subscriptions: SlotMap<SubscriptionId, ViewportHandler>,
    /// Dispatch order; SlotMap iteration order is not insertion order.
    subscription_order: Vec<SubscriptionId>,
}

impl DomState {
    fn node(&self, id: NodeId) -> DomResult<&NodeData> {
        self.nodes.get(id).ok_or(DomError::NodeNotFound)
    }

    fn node_mut(&mut self, id: NodeId) -> DomResult<&mut NodeData> {
        self.nodes.get_mut(id).ok_or(DomError::NodeNotFound)
    }

    /// Remove `id` from its parent's child list, keeping the node alive.
    fn detach(&mut self, id: NodeId) {
        if let Some(parent_id) = self.nodes.get(id).and_then(|n| n.parent) {
            if let Some(parent) = self.nodes.get_mut(parent_id) {
                parent.children.retain(|&child| child != id);
            }
            if let Some(node) = self.nodes.get_mut(id) {
                node.parent = None;
            }
        }
    }

    /// Whether `node` is `ancestor` or lives anywhere under it.
    fn in_subtree(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes.get(id).and_then(|n| n.parent);
        }
        false
    }

    /// Collect `id` and every descendant.
    fn collect_subtree(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = vec![id];
        let mut index = 0;
        while index < result.len() {
            if let Some(node) = self.nodes.get(result[index]) {
                result.extend(node.children.iter().copied());
            }
            index += 1;
        }
        result
    }

    fn clone_subtree(&mut self, id: NodeId, deep: bool) -> NodeId {
        let mut data = self.nodes[id].clone();
        let children = std::mem::take(&mut data.children);
        data.parent = None;
        let clone = self.nodes.insert(data);
        if deep {
            for child in children {
                let child_clone = self.clone_subtree(child, true);
                self.nodes[child_clone].parent = Some(clone);
                self.nodes[clone].children.push(child_clone);
            }
        }
        clone
    }
}

/// An in-memory document implementing [`DomAdapter`].
///
/// Beyond the trait surface, `MemoryDom` exposes the knobs a host or test
/// harness needs to drive widgets: geometry records, the scroll offset,
/// viewport event dispatch, and observation points for navigation and
/// history traffic.
pub struct MemoryDom {
    state: RwLock<DomState>,
}

impl MemoryDom {
    /// Create an empty document containing only a body element.
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let body = nodes.insert(NodeData::new("body"));
        Self {
            state: RwLock::new(DomState {
                nodes,
                body,
                scroll_top: 0.0,
                back_count: 0,
                navigations: Vec::new(),
                click_handlers: SlotMap::with_key(),
                subscriptions: SlotMap::with_key(),
                subscription_order: Vec::new(),
            }),
        }
    }

    /// Record a node's document offset and height.
    pub fn set_geometry(&self, node: NodeId, top: f64, height: f64) -> DomResult<()> {
        let mut state = self.state.write();
        let data = state.node_mut(node)?;
        data.top = top;
        data.height = height;
        Ok(())
    }

    /// Set the viewport scroll offset and dispatch a [`ViewportEvent::Scroll`].
    pub fn set_scroll_top(&self, offset: f64) {
        self.state.write().scroll_top = offset;
        self.dispatch_viewport(ViewportEvent::Scroll);
    }

    /// Dispatch a viewport event to every subscription, in subscription order.
    pub fn dispatch_viewport(&self, event: ViewportEvent) {
        // Snapshot, then invoke without holding the lock: handlers read and
        // mutate the document.
        let handlers: Vec<ViewportHandler> = {
            let state = self.state.read();
            state
                .subscription_order
                .iter()
                .filter_map(|&id| state.subscriptions.get(id).cloned())
                .collect()
        };
        tracing::trace!(target: "headline::dom", ?event, handler_count = handlers.len(), "dispatching viewport event");
        for handler in handlers {
            handler(event, self);
        }
    }

    /// How many session-history steps have been navigated back.
    pub fn history_back_count(&self) -> u64 {
        self.state.read().back_count
    }

    /// Every `href` followed through the default link click path.
    pub fn navigations(&self) -> Vec<String> {
        self.state.read().navigations.clone()
    }

    /// Whether the node is still in the arena.
    pub fn contains(&self, node: NodeId) -> bool {
        self.state.read().nodes.contains_key(node)
    }

    /// Number of live viewport subscriptions.
    pub fn subscription_count(&self) -> usize {
        self.state.read().subscriptions.len()
    }
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl DomAdapter for MemoryDom {
    fn create_element(&self, tag: &str) -> NodeId {
        self.state.write().nodes.insert(NodeData::new(tag))
    }

    fn body(&self) -> NodeId {
        self.state.read().body
    }

    fn remove(&self, node: NodeId) -> DomResult<()> {
        let mut state = self.state.write();
        state.node(node)?;
        state.detach(node);
        let subtree = state.collect_subtree(node);
        for id in &subtree {
            state.nodes.remove(*id);
        }
        state
            .click_handlers
            .retain(|_, (target, _)| !subtree.contains(target));
        Ok(())
    }

    fn clone_node(&self, node: NodeId, deep: bool) -> DomResult<NodeId> {
        let mut state = self.state.write();
        state.node(node)?;
        Ok(state.clone_subtree(node, deep))
    }

    fn append_child(&self, parent: NodeId, child: NodeId) -> DomResult<()> {
        let mut state = self.state.write();
        state.node(parent)?;
        state.node(child)?;
        if state.in_subtree(child, parent) {
            return Err(DomError::CircularHierarchy);
        }
        state.detach(child);
        state.nodes[child].parent = Some(parent);
        state.nodes[parent].children.push(child);
        Ok(())
    }

    fn insert_before(&self, new: NodeId, reference: NodeId) -> DomResult<()> {
        if new == reference {
            return Ok(());
        }
        let mut state = self.state.write();
        state.node(new)?;
        let parent = state.node(reference)?.parent.ok_or(DomError::Detached)?;
        if state.in_subtree(new, parent) {
            return Err(DomError::CircularHierarchy);
        }
        state.detach(new);
        let index = state.nodes[parent]
            .children
            .iter()
            .position(|&child| child == reference)
            .ok_or(DomError::Detached)?;
        state.nodes[new].parent = Some(parent);
        state.nodes[parent].children.insert(index, new);
        Ok(())
    }

    fn children(&self, node: NodeId) -> DomResult<Vec<NodeId>> {
        Ok(self.state.read().node(node)?.children.clone())
    }

    fn parent(&self, node: NodeId) -> DomResult<Option<NodeId>> {
        Ok(self.state.read().node(node)?.parent)
    }

    fn tag(&self, node: NodeId) -> DomResult<String> {
        Ok(self.state.read().node(node)?.tag.clone())
    }

    fn set_text(&self, node: NodeId, text: &str) -> DomResult<()> {
        self.state.write().node_mut(node)?.text = text.to_string();
        Ok(())
    }

    fn text(&self, node: NodeId) -> DomResult<String> {
        Ok(self.state.read().node(node)?.text.clone())
    }

    fn set_attribute(&self, node: NodeId, name: &str, value: &str) -> DomResult<()> {
        self.state
            .write()
            .node_mut(node)?
            .attributes
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn attribute(&self, node: NodeId, name: &str) -> DomResult<Option<String>> {
        Ok(self.state.read().node(node)?.attributes.get(name).cloned())
    }

    fn add_class(&self, node: NodeId, class: &str) -> DomResult<()> {
        let mut state = self.state.write();
        let data = state.node_mut(node)?;
        if !data.classes.iter().any(|c| c == class) {
            data.classes.push(class.to_string());
        }
        Ok(())
    }

    fn has_class(&self, node: NodeId, class: &str) -> DomResult<bool> {
        Ok(self
            .state
            .read()
            .node(node)?
            .classes
            .iter()
            .any(|c| c == class))
    }

    fn set_style(&self, node: NodeId, property: &str, value: &str) -> DomResult<()> {
        self.state
            .write()
            .node_mut(node)?
            .styles
            .insert(property.to_string(), value.to_string());
        Ok(())
    }

    fn remove_style(&self, node: NodeId, property: &str) -> DomResult<()> {
        self.state.write().node_mut(node)?.styles.remove(property);
        Ok(())
    }

    fn style(&self, node: NodeId, property: &str) -> DomResult<Option<String>> {
        Ok(self.state.read().node(node)?.styles.get(property).cloned())
    }

    fn offset_top(&self, node: NodeId) -> DomResult<f64> {
        Ok(self.state.read().node(node)?.top)
    }

    fn offset_height(&self, node: NodeId) -> DomResult<f64> {
        Ok(self.state.read().node(node)?.height)
    }

    fn scroll_top(&self) -> f64 {
        self.state.read().scroll_top
    }

    fn subscribe_viewport(&self, handler: ViewportHandler) -> SubscriptionId {
        let mut state = self.state.write();
        let id = state.subscriptions.insert(handler);
        state.subscription_order.push(id);
        id
    }

    fn unsubscribe_viewport(&self, id: SubscriptionId) -> DomResult<()> {
        let mut state = self.state.write();
        state
            .subscriptions
            .remove(id)
            .ok_or(DomError::InvalidSubscription)?;
        state.subscription_order.retain(|&sub| sub != id);
        Ok(())
    }

    fn bind_click(&self, node: NodeId, handler: ClickHandler) -> DomResult<HandlerId> {
        let mut state = self.state.write();
        state.node(node)?;
        Ok(state.click_handlers.insert((node, handler)))
    }

    fn click(&self, node: NodeId) -> DomResult<()> {
        // Links take the default navigation path; bound handlers only fire
        // on non-link elements.
        let handlers: Vec<ClickHandler> = {
            let mut state = self.state.write();
            let data = state.node(node)?;
            if data.tag == "a" {
                let href = data.attributes.get("href").cloned().unwrap_or_default();
                state.navigations.push(href);
                return Ok(());
            }
            state
                .click_handlers
                .values()
                .filter(|(target, _)| *target == node)
                .map(|(_, handler)| handler.clone())
                .collect()
        };
        for handler in handlers {
            handler(self);
        }
        Ok(())
    }

    fn history_back(&self, steps: u32) {
        self.state.write().back_count += u64::from(steps);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use parking_lot::Mutex;

    use super::*;

    #[test]
    fn test_append_preserves_order() {
        let dom = MemoryDom::new();
        let parent = dom.create_element("div");
        let a = dom.create_element("span");
        let b = dom.create_element("span");

        dom.append_child(parent, a).unwrap();
        dom.append_child(parent, b).unwrap();

        assert_eq!(dom.children(parent).unwrap(), vec![a, b]);
        assert_eq!(dom.parent(a).unwrap(), Some(parent));
    }

    #[test]
    fn test_append_moves_between_parents() {
        let dom = MemoryDom::new();
        let first = dom.create_element("div");
        let second = dom.create_element("div");
        let child = dom.create_element("span");

        dom.append_child(first, child).unwrap();
        dom.append_child(second, child).unwrap();

        assert!(dom.children(first).unwrap().is_empty());
        assert_eq!(dom.children(second).unwrap(), vec![child]);
    }

    #[test]
    fn test_insert_before() {
        let dom = MemoryDom::new();
        let parent = dom.create_element("div");
        let reference = dom.create_element("span");
        let new = dom.create_element("span");

        dom.append_child(parent, reference).unwrap();
        dom.insert_before(new, reference).unwrap();

        assert_eq!(dom.children(parent).unwrap(), vec![new, reference]);
    }

    #[test]
    fn test_insert_before_detached_reference() {
        let dom = MemoryDom::new();
        let reference = dom.create_element("span");
        let new = dom.create_element("span");
        assert_eq!(dom.insert_before(new, reference), Err(DomError::Detached));
    }

    #[test]
    fn test_circular_hierarchy_rejected() {
        let dom = MemoryDom::new();
        let outer = dom.create_element("div");
        let inner = dom.create_element("div");
        dom.append_child(outer, inner).unwrap();

        assert_eq!(
            dom.append_child(inner, outer),
            Err(DomError::CircularHierarchy)
        );
        assert_eq!(
            dom.append_child(outer, outer),
            Err(DomError::CircularHierarchy)
        );
    }

    #[test]
    fn test_remove_releases_subtree_and_handlers() {
        let dom = MemoryDom::new();
        let parent = dom.create_element("div");
        let child = dom.create_element("span");
        dom.append_child(dom.body(), parent).unwrap();
        dom.append_child(parent, child).unwrap();
        dom.bind_click(child, Arc::new(|_| {})).unwrap();

        dom.remove(parent).unwrap();

        assert!(!dom.contains(parent));
        assert!(!dom.contains(child));
        assert_eq!(dom.children(dom.body()).unwrap(), Vec::new());
        assert_eq!(dom.click(child), Err(DomError::NodeNotFound));
    }

    #[test]
    fn test_clone_deep_copies_structure_not_handlers() {
        let dom = MemoryDom::new();
        let original = dom.create_element("div");
        let child = dom.create_element("span");
        dom.add_class(original, "ui-toolbar").unwrap();
        dom.set_style(original, "color", "red").unwrap();
        dom.set_geometry(original, 40.0, 44.0).unwrap();
        dom.append_child(original, child).unwrap();

        let fired = Arc::new(AtomicUsize::new(0));
        let fired_clone = fired.clone();
        dom.bind_click(original, Arc::new(move |_| {
            fired_clone.fetch_add(1, Ordering::SeqCst);
        }))
        .unwrap();

        let clone = dom.clone_node(original, true).unwrap();

        assert!(dom.has_class(clone, "ui-toolbar").unwrap());
        assert_eq!(dom.style(clone, "color").unwrap().as_deref(), Some("red"));
        assert_eq!(dom.offset_height(clone).unwrap(), 44.0);
        assert_eq!(dom.children(clone).unwrap().len(), 1);
        assert_eq!(dom.parent(clone).unwrap(), None);

        dom.click(clone).unwrap();
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_shallow_clone_has_no_children() {
        let dom = MemoryDom::new();
        let original = dom.create_element("div");
        let child = dom.create_element("span");
        dom.append_child(original, child).unwrap();

        let clone = dom.clone_node(original, false).unwrap();
        assert!(dom.children(clone).unwrap().is_empty());
    }

    #[test]
    fn test_click_invokes_handlers_on_non_link() {
        let dom = MemoryDom::new();
        let button = dom.create_element("span");
        let fired = Arc::new(AtomicUsize::new(0));

        let fired_clone = fired.clone();
        dom.bind_click(button, Arc::new(move |_| {
            fired_clone.fetch_add(1, Ordering::SeqCst);
        }))
        .unwrap();

        dom.click(button).unwrap();
        dom.click(button).unwrap();
        assert_eq!(fired.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_click_on_link_navigates_without_handlers() {
        let dom = MemoryDom::new();
        let link = dom.create_element("a");
        dom.set_attribute(link, "href", "/inbox").unwrap();
        let fired = Arc::new(AtomicUsize::new(0));

        let fired_clone = fired.clone();
        dom.bind_click(link, Arc::new(move |_| {
            fired_clone.fetch_add(1, Ordering::SeqCst);
        }))
        .unwrap();

        dom.click(link).unwrap();

        assert_eq!(dom.navigations(), vec!["/inbox".to_string()]);
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_viewport_dispatch_in_subscription_order() {
        let dom = MemoryDom::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for i in 0..3 {
            let order_clone = order.clone();
            dom.subscribe_viewport(Arc::new(move |event, _| {
                assert_eq!(event, ViewportEvent::Scroll);
                order_clone.lock().push(i);
            }));
        }

        dom.set_scroll_top(10.0);
        assert_eq!(*order.lock(), vec![0, 1, 2]);
        assert_eq!(dom.scroll_top(), 10.0);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let dom = MemoryDom::new();
        let count = Arc::new(AtomicUsize::new(0));

        let count_clone = count.clone();
        let sub = dom.subscribe_viewport(Arc::new(move |_, _| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        }));

        dom.dispatch_viewport(ViewportEvent::TouchMove);
        dom.unsubscribe_viewport(sub).unwrap();
        dom.dispatch_viewport(ViewportEvent::TouchMove);

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(
            dom.unsubscribe_viewport(sub),
            Err(DomError::InvalidSubscription)
        );
        assert_eq!(dom.subscription_count(), 0);
    }

    #[test]
    fn test_handler_can_mutate_document_during_dispatch() {
        let dom = MemoryDom::new();
        let target = dom.create_element("div");
        dom.append_child(dom.body(), target).unwrap();

        dom.subscribe_viewport(Arc::new(move |_, dom| {
            dom.set_style(target, "position", "fixed").unwrap();
        }));

        dom.dispatch_viewport(ViewportEvent::Scroll);
        assert_eq!(
            dom.style(target, "position").unwrap().as_deref(),
            Some("fixed")
        );
    }

    #[test]
    fn test_history_back_accumulates() {
        let dom = MemoryDom::new();
        dom.history_back(1);
        dom.history_back(2);
        assert_eq!(dom.history_back_count(), 3);
    }

    #[test]
    fn test_heading_and_link_helpers() {
        let dom = MemoryDom::new();
        let h2 = dom.create_element("H2");
        let div = dom.create_element("div");
        let a = dom.create_element("a");

        assert!(dom.is_heading(h2).unwrap());
        assert!(!dom.is_heading(div).unwrap());
        assert!(dom.is_link(a).unwrap());
        assert!(!dom.is_link(div).unwrap());
    }
}
