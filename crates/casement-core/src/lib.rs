//! Core systems for Casement.
//!
//! This crate provides the widget-agnostic foundation the toolkit is built on:
//!
//! - **Element IDs**: arena keys shared by the element tree and its errors
//! - **Errors**: the [`ToolkitError`] taxonomy and [`Result`] alias
//! - **Geometry**: integer [`Point`], [`Size`] and [`Bounds`]
//! - **Serials**: wraparound-aware [`Serial`] numbers for async size requests
//! - **Signal/Slot System**: [`Signal`] for observable widget events
//! - **Task Queue**: deferred closures run once the current operation completes
//! - **Logging**: tracing targets and tree-format options
//!
//! # Signal Example
//!
//! ```
//! use casement_core::Signal;
//!
//! let clicked = Signal::<()>::new();
//! let id = clicked.connect(|_| println!("clicked"));
//! clicked.emit(());
//! clicked.disconnect(id);
//! ```
//!
//! # Serial Example
//!
//! ```
//! use casement_core::Serial;
//!
//! let first = Serial::new(u32::MAX);
//! let second = first.next();
//! assert_eq!(second.get(), 0);
//! assert!(first.is_at_or_before(second));
//! ```

mod error;
pub mod geometry;
mod id;
pub mod logging;
mod serial;
pub mod signal;
mod task;

pub use error::{PreconditionViolation, Result, ToolkitError};
pub use geometry::{Bounds, Point, Size};
pub use id::{ElementId, RenderNodeId};
pub use logging::{TreeFormatOptions, TreeStyle};
pub use serial::Serial;
pub use signal::{ConnectionId, Signal};
pub use task::{TaskId, TaskQueue};
