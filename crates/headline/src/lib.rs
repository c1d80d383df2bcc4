//! Headline - DOM-backed header toolbar widgets.
//!
//! Headline provides a page-header toolbar (back affordance, optional
//! title, right-hand button cluster) that runs entirely against the
//! [`dom::DomAdapter`] seam: render it from configuration or adopt existing
//! markup, own child buttons with cascading teardown, drive visibility
//! through a small state machine, and optionally pin the header to the
//! viewport on scroll.
//!
//! The core object/signal systems live in `headline-core` and are
//! re-exported here.
//!
//! # Example
//!
//! ```no_run
//! use headline::dom::MemoryDom;
//! use headline::widget::widgets::{Toolbar, ToolbarConfig};
//!
//! fn main() -> headline::Result<()> {
//!     headline::init_global_registry();
//!
//!     let dom = MemoryDom::new();
//!     let config = ToolbarConfig::new().with_title("Inbox");
//!     let mut toolbar = Toolbar::render(&dom, config)?;
//!     toolbar.init(&dom)?;
//!     toolbar.show(&dom)?;
//!     Ok(())
//! }
//! ```

pub use headline_core::*;

pub mod dom;
pub mod error;
pub mod widget;

pub use error::{Error, Result};
