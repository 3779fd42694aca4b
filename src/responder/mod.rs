//! Canned reply selection
//!
//! This module provides:
//! - The ordered keyword rule table
//! - First-match reply selection over that table

pub mod rules;
pub mod selector;

pub use rules::{RuleEntry, RuleTable};
pub use selector::ResponseSelector;
