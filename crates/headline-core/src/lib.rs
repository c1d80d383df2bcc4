//! Core systems for Headline.
//!
//! This crate provides the foundational components of the Headline widget
//! toolkit:
//!
//! - **Object Model**: Parent-child ownership with cascade destroy
//! - **Signal/Slot System**: Type-safe inter-object communication
//! - **Logging**: `tracing` integration and ownership-tree debugging
//!
//! # Signal/Slot Example
//!
//! ```
//! use headline_core::Signal;
//!
//! // Create a signal that notifies when a value changes
//! let value_changed = Signal::<i32>::new();
//!
//! // Connect a slot to handle the signal
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! // Emit the signal
//! value_changed.emit(42);
//!
//! // Disconnect when done
//! value_changed.disconnect(conn_id);
//! ```
//!
//! # Object Tree Example
//!
//! ```
//! use headline_core::{global_registry, ObjectRegistry};
//!
//! let registry = global_registry();
//! // Widgets register themselves; destroying a parent removes every
//! // descendant from the registry, children first.
//! ```

pub mod logging;
pub mod object;
pub mod signal;

pub use logging::{ObjectTreeDebug, TreeStyle};
pub use object::{
    Object, ObjectBase, ObjectError, ObjectId, ObjectRegistry, ObjectResult,
    SharedObjectRegistry, global_registry, init_global_registry,
};
pub use signal::{ConnectionGuard, ConnectionId, Signal};
