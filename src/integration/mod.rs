//! Integration layer
//!
//! Centralized configuration shared by the responder, the speech controller
//! and the widget.

pub mod config;

pub use config::ChatConfig;
