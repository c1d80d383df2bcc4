//! Button registry: ordered ownership of the toolbar's right-cluster widgets.

use crate::Result;
use crate::dom::DomAdapter;
use crate::widget::Widget;

/// Owned widgets added through `add_buttons`, in insertion order.
///
/// Insertion order is display order. There is no duplicate detection; the
/// caller owns the handles it passes in and re-adding a root it already gave
/// away is its own bug. Registered widgets live exactly as long as the
/// toolbar: teardown is cascading and happens only when the toolbar itself
/// is destroyed.
pub(super) struct ButtonRegistry {
    children: Vec<Box<dyn Widget>>,
}

impl ButtonRegistry {
    pub fn new() -> Self {
        Self {
            children: Vec::new(),
        }
    }

    /// Take ownership of a widget.
    pub fn track(&mut self, widget: Box<dyn Widget>) {
        self.children.push(widget);
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Tear down every tracked widget, in insertion order, then drop them.
    pub fn teardown_all(&mut self, dom: &dyn DomAdapter) -> Result<()> {
        for child in &mut self.children {
            child.teardown(dom)?;
        }
        self.children.clear();
        Ok(())
    }
}
