//! Widget-facing layer
//!
//! This module provides:
//! - Visual handles the speech controller drives
//! - The chat widget state behind the panel

pub mod handle;
pub mod state;

pub use handle::{VisualHandle, VisualState};
pub use state::{ChatWidget, PanelState};
