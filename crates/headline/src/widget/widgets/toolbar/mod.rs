//! Header toolbar widget implementation.
//!
//! This module provides [`Toolbar`], a page-header widget composed of a back
//! affordance, an optional title, and a right-hand button cluster. A toolbar
//! is built in one of two modes: render (every element created from a
//! [`ToolbarConfig`]) or setup (an existing node's children are adopted and
//! redistributed). After construction, [`Toolbar::init`] activates the
//! widget: optional scroll pinning, the initial hidden presentation, and the
//! `initialized` signal.
//!
//! # Example
//!
//! ```ignore
//! use headline::dom::MemoryDom;
//! use headline::widget::widgets::{Toolbar, ToolbarConfig};
//!
//! let dom = MemoryDom::new();
//! let config = ToolbarConfig::new()
//!     .with_title("Inbox")
//!     .with_use_fix(true);
//!
//! let mut toolbar = Toolbar::render(&dom, config)?;
//! toolbar.shown.connect(|_| println!("toolbar visible"));
//! toolbar.init(&dom)?;
//! toolbar.show(&dom)?;
//! ```
//!
//! # Related
//!
//! - [`ToolButton`](super::ToolButton) - The owned handle type for `add_buttons`
//! - [`crate::dom::DomAdapter`] - Where all presentation actually happens

mod fix;
mod registry;
mod structure;

pub use structure::BuildMode;

use std::sync::Arc;

use headline_core::{Object, ObjectBase, ObjectId, Signal, global_registry};

use crate::Result;
use crate::dom::{DomAdapter, NodeId};
use crate::widget::Widget;

use fix::FixedPositionMonitor;
use registry::ButtonRegistry;
use structure::StructureBuilder;

// ============================================================================
// Back Handler
// ============================================================================

/// Callback bound to a non-link back affordance.
pub type BackHandler = Arc<dyn Fn(&dyn DomAdapter) + Send + Sync>;

// ============================================================================
// Fix Position
// ============================================================================

/// Where a pinned toolbar sits relative to the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixPosition {
    /// Offset from the viewport top while pinned, in pixels.
    pub top: f64,
}

impl Default for FixPosition {
    fn default() -> Self {
        Self { top: 0.0 }
    }
}

// ============================================================================
// Toolbar Config
// ============================================================================

/// Construction-time configuration for a [`Toolbar`].
///
/// Immutable once the toolbar is built. `btns` carries raw nodes that are
/// appended to the right region but never tracked; ownership tracking is
/// reserved for widgets passed to [`Toolbar::add_buttons`].
#[derive(Clone)]
pub struct ToolbarConfig {
    /// Parent for the toolbar root. `None` keeps an adopted root where it
    /// is and attaches a rendered root to the document body.
    pub container: Option<NodeId>,
    /// Title text. Empty means no title region in render mode.
    pub title: String,
    /// Label for a back affordance created in render mode.
    pub back_button_text: String,
    /// When non-empty, the rendered back affordance is a plain link with
    /// this `href` and `on_back` is never bound.
    pub back_button_href: String,
    /// Raw nodes appended to the right region, in order. Untracked.
    pub btns: Vec<NodeId>,
    /// Whether to activate the fixed-position monitor at init.
    pub use_fix: bool,
    /// Pinned placement, when `use_fix` is set.
    pub position: FixPosition,
    /// Handler for a non-link back affordance.
    pub on_back: BackHandler,
}

impl ToolbarConfig {
    /// Configuration with the stock defaults: body container, no title,
    /// "Back" affordance that walks the session history, no pinning.
    pub fn new() -> Self {
        Self {
            container: None,
            title: String::new(),
            back_button_text: "Back".to_string(),
            back_button_href: String::new(),
            btns: Vec::new(),
            use_fix: false,
            position: FixPosition::default(),
            on_back: Arc::new(|dom| dom.history_back(1)),
        }
    }

    /// Set the parent node for the toolbar root.
    pub fn with_container(mut self, container: NodeId) -> Self {
        self.container = Some(container);
        self
    }

    /// Set the title text.
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    /// Set the back affordance label.
    pub fn with_back_button_text(mut self, text: &str) -> Self {
        self.back_button_text = text.to_string();
        self
    }

    /// Make the back affordance a navigational link.
    pub fn with_back_button_href(mut self, href: &str) -> Self {
        self.back_button_href = href.to_string();
        self
    }

    /// Set raw nodes for the right region.
    pub fn with_buttons(mut self, btns: Vec<NodeId>) -> Self {
        self.btns = btns;
        self
    }

    /// Enable or disable scroll pinning.
    pub fn with_use_fix(mut self, use_fix: bool) -> Self {
        self.use_fix = use_fix;
        self
    }

    /// Set the pinned placement.
    pub fn with_position(mut self, position: FixPosition) -> Self {
        self.position = position;
        self
    }

    /// Replace the back handler.
    pub fn with_on_back<F>(mut self, on_back: F) -> Self
    where
        F: Fn(&dyn DomAdapter) + Send + Sync + 'static,
    {
        self.on_back = Arc::new(on_back);
        self
    }
}

impl Default for ToolbarConfig {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Toolbar
// ============================================================================

/// A page-header toolbar: back affordance, optional title, button cluster.
///
/// Construction builds the DOM structure; [`init`](Self::init) activates the
/// widget. The split exists so callers can connect to `initialized` before
/// it fires.
pub struct Toolbar {
    base: ObjectBase,
    mode: BuildMode,
    config: ToolbarConfig,

    root: NodeId,
    left: NodeId,
    title: Option<NodeId>,
    right: NodeId,
    back: Option<NodeId>,

    is_shown: bool,
    did_init: bool,
    buttons: ButtonRegistry,
    monitor: Option<FixedPositionMonitor>,

    /// Emitted once, at the end of [`init`](Self::init).
    pub initialized: Signal<()>,
    /// Emitted on every [`show`](Self::show), including redundant ones.
    pub shown: Signal<()>,
    /// Emitted on every [`hide`](Self::hide), including redundant ones.
    pub hidden: Signal<()>,
    /// Emitted during [`destroy`](Self::destroy), after the DOM is released.
    pub destroyed: Signal<()>,
}

impl Toolbar {
    // =========================================================================
    // Construction
    // =========================================================================

    /// Render mode: create the full structure from configuration.
    pub fn render(dom: &dyn DomAdapter, config: ToolbarConfig) -> Result<Self> {
        let regions = StructureBuilder::new(dom, &config).build()?;
        tracing::debug!(target: "headline::widget", root = ?regions.root, "toolbar rendered");
        Ok(Self::from_regions(BuildMode::Render, config, regions))
    }

    /// Setup mode: adopt `node`, redistributing its direct children into
    /// the toolbar's regions.
    pub fn adopt(dom: &dyn DomAdapter, node: NodeId, config: ToolbarConfig) -> Result<Self> {
        let regions = StructureBuilder::new(dom, &config).adopt(node)?;
        tracing::debug!(target: "headline::widget", root = ?regions.root, "toolbar adopted existing markup");
        Ok(Self::from_regions(BuildMode::Setup, config, regions))
    }

    fn from_regions(mode: BuildMode, config: ToolbarConfig, regions: structure::Regions) -> Self {
        Self {
            base: ObjectBase::new::<Toolbar>(),
            mode,
            config,
            root: regions.root,
            left: regions.left,
            title: regions.title,
            right: regions.right,
            back: regions.back,
            is_shown: false,
            did_init: false,
            buttons: ButtonRegistry::new(),
            monitor: None,
            initialized: Signal::new(),
            shown: Signal::new(),
            hidden: Signal::new(),
            destroyed: Signal::new(),
        }
    }

    /// Activate the toolbar: start the fixed-position monitor when
    /// configured, apply the initial hidden presentation, and emit
    /// [`initialized`](Self::initialized). Idempotent; only the first call
    /// does anything.
    pub fn init(&mut self, dom: &dyn DomAdapter) -> Result<&mut Self> {
        if self.did_init {
            return Ok(self);
        }
        if self.config.use_fix {
            self.monitor = Some(FixedPositionMonitor::activate(
                dom,
                self.root,
                self.config.position,
            )?);
        }
        dom.set_style(self.root, "display", "none")?;
        self.did_init = true;
        self.initialized.emit(());
        Ok(self)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// How the structure was built.
    pub fn mode(&self) -> BuildMode {
        self.mode
    }

    /// The left region node.
    pub fn left(&self) -> NodeId {
        self.left
    }

    /// The title node, when one exists.
    pub fn title(&self) -> Option<NodeId> {
        self.title
    }

    /// The right region node.
    pub fn right(&self) -> NodeId {
        self.right
    }

    /// The back affordance, when one exists.
    pub fn back(&self) -> Option<NodeId> {
        self.back
    }

    /// Whether the toolbar is currently presented.
    pub fn is_shown(&self) -> bool {
        self.is_shown
    }

    /// Whether the root is currently pinned to the viewport.
    pub fn currently_fixed(&self) -> bool {
        self.monitor
            .as_ref()
            .is_some_and(FixedPositionMonitor::currently_fixed)
    }

    /// Number of widgets owned through [`add_buttons`](Self::add_buttons).
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    // =========================================================================
    // Buttons
    // =========================================================================

    /// Append widgets to the right region and take ownership of them.
    ///
    /// Each widget's root lands after the region's existing content, in the
    /// order given. Ownership is cascading: the widgets are torn down when
    /// the toolbar is destroyed, never individually.
    pub fn add_buttons(&mut self, dom: &dyn DomAdapter, widgets: Vec<Box<dyn Widget>>) -> Result<&mut Self> {
        for widget in widgets {
            dom.append_child(self.right, widget.root())?;
            global_registry().set_parent(widget.object_id(), Some(self.object_id()))?;
            self.buttons.track(widget);
        }
        Ok(self)
    }

    // =========================================================================
    // Visibility
    // =========================================================================

    /// Present the toolbar and emit [`shown`](Self::shown).
    ///
    /// Re-applies the presentation and re-emits even when already shown.
    pub fn show(&mut self, dom: &dyn DomAdapter) -> Result<&mut Self> {
        dom.remove_style(self.root, "display")?;
        self.is_shown = true;
        tracing::trace!(target: "headline::widget", id = ?self.object_id(), "toolbar shown");
        self.shown.emit(());
        Ok(self)
    }

    /// Conceal the toolbar and emit [`hidden`](Self::hidden).
    pub fn hide(&mut self, dom: &dyn DomAdapter) -> Result<&mut Self> {
        dom.set_style(self.root, "display", "none")?;
        self.is_shown = false;
        tracing::trace!(target: "headline::widget", id = ?self.object_id(), "toolbar hidden");
        self.hidden.emit(());
        Ok(self)
    }

    /// Flip visibility: hidden toolbars show, shown toolbars hide.
    pub fn toggle(&mut self, dom: &dyn DomAdapter) -> Result<&mut Self> {
        if self.is_shown {
            self.hide(dom)
        } else {
            self.show(dom)
        }
    }

    // =========================================================================
    // Destruction
    // =========================================================================

    /// Destroy the toolbar: tear down owned buttons, release the
    /// fixed-position machinery, remove the root, emit
    /// [`destroyed`](Self::destroyed), and cascade-unregister from the
    /// object registry.
    pub fn destroy(mut self, dom: &dyn DomAdapter) -> Result<()> {
        self.release(dom)?;
        global_registry().destroy(self.object_id())?;
        Ok(())
    }

    fn release(&mut self, dom: &dyn DomAdapter) -> Result<()> {
        tracing::debug!(target: "headline::widget", id = ?self.object_id(), "destroying toolbar");
        self.buttons.teardown_all(dom)?;
        if let Some(mut monitor) = self.monitor.take() {
            monitor.teardown(dom)?;
        }
        dom.remove(self.root)?;
        self.destroyed.emit(());
        Ok(())
    }
}

impl Object for Toolbar {
    fn object_id(&self) -> ObjectId {
        self.base.id()
    }
}

impl Widget for Toolbar {
    fn root(&self) -> NodeId {
        self.root
    }

    fn teardown(&mut self, dom: &dyn DomAdapter) -> Result<()> {
        self.release(dom)
    }
}

#[cfg(test)]
mod tests {
    use headline_core::init_global_registry;

    use super::*;
    use crate::dom::MemoryDom;

    fn setup() {
        init_global_registry();
    }

    #[test]
    fn test_config_defaults() {
        setup();
        let config = ToolbarConfig::new();
        assert!(config.container.is_none());
        assert!(config.title.is_empty());
        assert_eq!(config.back_button_text, "Back");
        assert!(config.back_button_href.is_empty());
        assert!(config.btns.is_empty());
        assert!(!config.use_fix);
        assert_eq!(config.position.top, 0.0);
    }

    #[test]
    fn test_default_back_handler_walks_history() {
        setup();
        let dom = MemoryDom::new();
        let mut toolbar = Toolbar::render(&dom, ToolbarConfig::new()).unwrap();
        toolbar.init(&dom).unwrap();

        let back = toolbar.back().unwrap();
        dom.click(back).unwrap();
        assert_eq!(dom.history_back_count(), 1);
        assert!(dom.navigations().is_empty());
    }

    #[test]
    fn test_mode_is_fixed_at_construction() {
        setup();
        let dom = MemoryDom::new();
        let rendered = Toolbar::render(&dom, ToolbarConfig::new()).unwrap();
        assert_eq!(rendered.mode(), BuildMode::Render);

        let node = dom.create_element("div");
        dom.append_child(dom.body(), node).unwrap();
        let adopted = Toolbar::adopt(&dom, node, ToolbarConfig::new()).unwrap();
        assert_eq!(adopted.mode(), BuildMode::Setup);
    }

    #[test]
    fn test_init_is_idempotent_and_hides_root() {
        setup();
        let dom = MemoryDom::new();
        let mut toolbar = Toolbar::render(&dom, ToolbarConfig::new()).unwrap();

        let count = Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let count_clone = count.clone();
        toolbar.initialized.connect(move |_| {
            count_clone.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        });

        toolbar.init(&dom).unwrap();
        toolbar.init(&dom).unwrap();

        assert_eq!(count.load(std::sync::atomic::Ordering::SeqCst), 1);
        assert!(!toolbar.is_shown());
        assert_eq!(
            dom.style(toolbar.root(), "display").unwrap().as_deref(),
            Some("none")
        );
    }

    #[test]
    fn test_show_hide_toggle_track_presentation() {
        setup();
        let dom = MemoryDom::new();
        let mut toolbar = Toolbar::render(&dom, ToolbarConfig::new()).unwrap();
        toolbar.init(&dom).unwrap();

        toolbar.toggle(&dom).unwrap();
        assert!(toolbar.is_shown());
        assert!(dom.style(toolbar.root(), "display").unwrap().is_none());

        toolbar.toggle(&dom).unwrap();
        assert!(!toolbar.is_shown());
        assert_eq!(
            dom.style(toolbar.root(), "display").unwrap().as_deref(),
            Some("none")
        );
    }

    #[test]
    fn test_redundant_show_re_emits() {
        setup();
        let dom = MemoryDom::new();
        let mut toolbar = Toolbar::render(&dom, ToolbarConfig::new()).unwrap();
        toolbar.init(&dom).unwrap();

        let count = Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let count_clone = count.clone();
        toolbar.shown.connect(move |_| {
            count_clone.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        });

        toolbar.show(&dom).unwrap();
        toolbar.show(&dom).unwrap();
        assert_eq!(count.load(std::sync::atomic::Ordering::SeqCst), 2);
        assert!(toolbar.is_shown());
    }

    #[test]
    fn test_config_btns_are_untracked() {
        setup();
        let dom = MemoryDom::new();
        let raw = dom.create_element("span");
        let config = ToolbarConfig::new().with_buttons(vec![raw]);
        let mut toolbar = Toolbar::render(&dom, config).unwrap();
        toolbar.init(&dom).unwrap();

        assert_eq!(dom.children(toolbar.right()).unwrap(), vec![raw]);
        assert_eq!(toolbar.button_count(), 0);
    }
}
