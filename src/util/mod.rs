//! Utility modules for templtree.
//!
//! Contains text helpers for template values.

pub mod text;
