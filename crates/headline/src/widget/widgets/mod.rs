//! Concrete widget implementations.

mod tool_button;
mod toolbar;

pub use tool_button::ToolButton;
pub use toolbar::{
    BackHandler, BuildMode, FixPosition, Toolbar, ToolbarConfig,
};
