//! Toolbar structure builder.
//!
//! Builds the toolbar's DOM skeleton in one of two modes: [`BuildMode::Render`]
//! creates every element from configuration, [`BuildMode::Setup`] adopts the
//! direct children of an existing node and redistributes them into regions.
//! Both paths produce the same [`Regions`] shape, so the rest of the toolbar
//! never cares which mode built it.

use crate::Result;
use crate::dom::{DomAdapter, NodeId};

use super::ToolbarConfig;

// ============================================================================
// Build Mode
// ============================================================================

/// How a toolbar's structure was produced.
///
/// Fixed at construction; adopting markup and rendering from configuration
/// converge on the same region layout but differ in where the content came
/// from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildMode {
    /// Every element was created from configuration.
    Render,
    /// An existing node's children were adopted and redistributed.
    Setup,
}

// ============================================================================
// Regions
// ============================================================================

/// The node handles a built toolbar structure exposes.
pub(super) struct Regions {
    /// `div.ui-toolbar` (or the adopted node).
    pub root: NodeId,
    /// `div.ui-toolbar-left`.
    pub left: NodeId,
    /// The title element, when one exists.
    pub title: Option<NodeId>,
    /// `div.ui-toolbar-right`.
    pub right: NodeId,
    /// The back affordance, when one exists.
    pub back: Option<NodeId>,
}

// ============================================================================
// Structure Builder
// ============================================================================

/// Builds a toolbar's regions from configuration or existing markup.
pub(super) struct StructureBuilder<'a> {
    dom: &'a dyn DomAdapter,
    config: &'a ToolbarConfig,
}

impl<'a> StructureBuilder<'a> {
    pub fn new(dom: &'a dyn DomAdapter, config: &'a ToolbarConfig) -> Self {
        Self { dom, config }
    }

    /// Render mode: create the full skeleton from configuration.
    pub fn build(&self) -> Result<Regions> {
        let dom = self.dom;
        let config = self.config;

        let root = dom.create_element("div");
        dom.add_class(root, "ui-toolbar")?;
        let container = config.container.unwrap_or_else(|| dom.body());
        dom.append_child(container, root)?;

        let wrap = dom.create_element("div");
        dom.add_class(wrap, "ui-toolbar-wrap")?;
        dom.append_child(root, wrap)?;

        let left = dom.create_element("div");
        dom.add_class(left, "ui-toolbar-left")?;
        dom.append_child(wrap, left)?;

        let back = self.create_back_affordance()?;
        dom.append_child(left, back)?;

        let title = if config.title.is_empty() {
            None
        } else {
            let title = dom.create_element("h2");
            dom.add_class(title, "ui-toolbar-title")?;
            dom.set_text(title, &config.title)?;
            dom.append_child(wrap, title)?;
            Some(title)
        };

        let right = dom.create_element("div");
        dom.add_class(right, "ui-toolbar-right")?;
        dom.append_child(wrap, right)?;

        for &btn in &config.btns {
            dom.append_child(right, btn)?;
        }

        Ok(Regions {
            root,
            left,
            title,
            right,
            back: Some(back),
        })
    }

    /// Setup mode: adopt `node`, redistributing its direct children.
    ///
    /// The first heading-class child (`h1`-`h4`) splits the children: those
    /// before it go left, the heading becomes the title, those after it go
    /// right. Without a heading the first child goes left and the rest go
    /// right. The first element landing in the left region is promoted to
    /// the back affordance.
    pub fn adopt(&self, node: NodeId) -> Result<Regions> {
        let dom = self.dom;
        let config = self.config;

        let root = node;
        dom.add_class(root, "ui-toolbar")?;
        let children = dom.children(root)?;

        let wrap = dom.create_element("div");
        dom.add_class(wrap, "ui-toolbar-wrap")?;
        dom.append_child(root, wrap)?;

        let left = dom.create_element("div");
        dom.add_class(left, "ui-toolbar-left")?;
        dom.append_child(wrap, left)?;

        let right = dom.create_element("div");
        dom.add_class(right, "ui-toolbar-right")?;

        let heading_index = {
            let mut found = None;
            for (index, &child) in children.iter().enumerate() {
                if dom.is_heading(child)? {
                    found = Some(index);
                    break;
                }
            }
            found
        };

        let title = match heading_index {
            None => {
                if let Some((&first, rest)) = children.split_first() {
                    dom.append_child(left, first)?;
                    for &child in rest {
                        dom.append_child(right, child)?;
                    }
                }
                None
            }
            Some(index) => {
                for &child in &children[..index] {
                    dom.append_child(left, child)?;
                }
                let title = children[index];
                dom.add_class(title, "ui-toolbar-title")?;
                dom.append_child(wrap, title)?;
                for &child in &children[index + 1..] {
                    dom.append_child(right, child)?;
                }
                Some(title)
            }
        };

        dom.append_child(wrap, right)?;

        let back = match dom.children(left)?.first().copied() {
            Some(first) => {
                dom.add_class(first, "ui-toolbar-backbtn")?;
                if !dom.is_link(first)? {
                    dom.bind_click(first, config.on_back.clone())?;
                }
                Some(first)
            }
            None => None,
        };

        for &btn in &config.btns {
            dom.append_child(right, btn)?;
        }

        if let Some(container) = config.container {
            dom.append_child(container, root)?;
        }

        Ok(Regions {
            root,
            left,
            title,
            right,
            back,
        })
    }

    fn create_back_affordance(&self) -> Result<NodeId> {
        let dom = self.dom;
        let config = self.config;
        let back = if config.back_button_href.is_empty() {
            let back = dom.create_element("span");
            dom.bind_click(back, config.on_back.clone())?;
            back
        } else {
            let back = dom.create_element("a");
            dom.set_attribute(back, "href", &config.back_button_href)?;
            back
        };
        dom.add_class(back, "ui-toolbar-backbtn")?;
        dom.set_text(back, &config.back_button_text)?;
        Ok(back)
    }
}
