//! Core systems for Trellis.
//!
//! This crate provides the foundational pieces shared by every other Trellis
//! crate:
//!
//! - **Object identifiers**: [`ObjectId`], unique per widget instance
//! - **Signal/Slot System**: [`Signal`] for change notification and
//!   [`Callback`] for single-target activation handlers
//! - **Errors**: the [`Error`] type returned by the fallible edges of the core
//! - **Logging**: `tracing` target names used across the framework
//!
//! # Signal Example
//!
//! ```
//! use trellis_core::Signal;
//!
//! let text_changed = Signal::<String>::new();
//! let id = text_changed.connect(|text| println!("text is now {text}"));
//!
//! text_changed.emit("hello".to_string());
//! text_changed.disconnect(id);
//! ```

pub mod error;
pub mod logging;
pub mod object;
pub mod signal;

pub use error::{Error, Result};
pub use object::ObjectId;
pub use signal::{callback, Callback, ConnectionId, Signal};
