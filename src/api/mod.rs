//! Practice Sheet WASM API
//!
//! This module provides the JavaScript-facing API for the worksheet UI.
//!
//! # Module Structure
//!
//! - `helpers`: console logging, serde conversions and error mapping
//! - `core`: stateless pipeline functions (annotate, lay out, render, export)
//! - `session`: the `PracticeSheet` class wrapping the debounced session
//! - `storage`: `localStorage` preference store

pub mod helpers;
pub mod core;
pub mod session;
pub mod storage;

pub use core::*;
pub use session::PracticeSheet;
pub use storage::LocalStorageStore;
