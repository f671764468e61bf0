//! # templtree
//!
//! An arena-based tree for hierarchical configuration templates: named nodes
//! with attributes and text content, composed by union and layered merge,
//! searched by literal name path, and flattened into ordered leaf strings.
//!
//! Decoding a serialized document into a [`Tree`] is left to the caller.
//!
//! ## Quick Start
//!
//! ```
//! use templtree::Tree;
//!
//! let mut default = Tree::new_plain("template");
//! let root = default.root();
//! let counters = default.new_child(root, "counters", "");
//! default.new_child(counters, "cpu_busy", "cpu_busy");
//!
//! let mut custom = Tree::new_plain("template");
//! let custom_root = custom.root();
//! let custom_counters = custom.new_child(custom_root, "counters", "");
//! custom.new_child(custom_counters, "cpu_busy", "cpu_busy => busy");
//! custom.new_child(custom_counters, "avg_latency", "avg_latency");
//!
//! default.merge(root, Some(custom), &[]);
//!
//! let paths = [["template", "counters", "cpu_busy"]];
//! let found = default.search_content(root, &["template"], &paths);
//! assert_eq!(found, Some(vec!["cpu_busy => busy"]));
//! assert_eq!(default.all_child_names(counters), vec!["cpu_busy", "avg_latency"]);
//! ```

pub mod error;
pub mod tree;
pub mod util;

// Re-export primary types at the crate root for convenience.
pub use error::TreeError;
pub use tree::{Attribute, NodeId, NodeName, TemplateOptions, Tree};
