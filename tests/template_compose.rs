//! Composition tests over realistic collector templates.
//!
//! A default template is layered with a custom one the way a poller loads
//! its configuration: preprocess both, merge the custom template over the
//! default, then read values back by path.

#![allow(clippy::unwrap_used)]

use std::sync::Once;

use templtree::{NodeId, TemplateOptions, Tree};

static TRACING: Once = Once::new();

fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

// ---------------------------------------------------------------------------
// Template builders
// ---------------------------------------------------------------------------

/// Builds the default volume template.
fn default_template() -> Tree {
    let mut tree = Tree::new_plain("template");
    let root = tree.root();
    tree.new_child(root, "name", "Volume");
    tree.new_child(root, "query", "volume");
    tree.new_child(root, "object", "volume");

    let counters = tree.new_child(root, "counters", "");
    tree.new_child(counters, "", "read_ops");
    tree.new_child(counters, "", "write_ops");
    tree.new_child(counters, "", "avg_latency => latency (microsec)");

    let plugins = tree.new_child(root, "plugins", "");
    let agent = tree.new_child(plugins, "LabelAgent", "");
    tree.new_child(agent, "split", "node `/` ,aggr");

    let export = tree.new_child(root, "export_options", "");
    let keys = tree.new_child(export, "instance_keys", "");
    tree.new_child(keys, "", "volume");
    tree.new_child(keys, "", "svm");
    tree
}

/// Builds a site-specific override of the volume template.
fn custom_template() -> Tree {
    let mut tree = Tree::new_plain("template");
    let root = tree.root();
    tree.new_child(root, "schedule", "3m");

    let counters = tree.new_child(root, "counters", "");
    tree.new_child(counters, "", "read_ops");
    tree.new_child(counters, "", "other_ops");

    let plugins = tree.new_child(root, "plugins", "");
    let agent = tree.new_child(plugins, "LabelAgent", "");
    tree.new_child(agent, "split", "svm `-` ,site");

    let export = tree.new_child(root, "export_options", "");
    let keys = tree.new_child(export, "instance_keys", "");
    tree.new_child(keys, "", "svm");
    tree.new_child(keys, "", "aggr");
    tree
}

fn contents_at(tree: &Tree, path: &[&str]) -> Vec<String> {
    let nodes = tree.search_children(tree.root(), path).unwrap();
    assert_eq!(nodes.len(), 1, "expected one node at {path:?}");
    tree.all_child_contents(nodes[0])
        .into_iter()
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// Layering
// ---------------------------------------------------------------------------

#[test]
fn test_layer_custom_over_default() {
    init_tracing();
    let mut base = default_template();
    let root = base.root();
    let mut custom = custom_template();
    let custom_root = custom.root();

    base.preprocess_template(root);
    custom.preprocess_template(custom_root);
    base.merge(root, Some(custom), &["LabelAgent"]);

    assert_eq!(base.child_content(root, "name"), Some("Volume"));
    assert_eq!(base.child_content(root, "schedule"), Some("3m"));

    assert_eq!(
        contents_at(&base, &["template", "counters"]),
        vec![
            "read_ops",
            "write_ops",
            "avg_latency => latency (microsec)",
            "other_ops",
        ]
    );
    assert_eq!(
        contents_at(&base, &["template", "export_options", "instance_keys"]),
        vec!["volume", "svm", "aggr"]
    );
    // Preprocessing turned each split rule into a list entry, so both rules survive.
    assert_eq!(
        contents_at(&base, &["template", "plugins", "LabelAgent", "split"]),
        vec!["node `/` ,aggr", "svm `-` ,site"]
    );
}

#[test]
fn test_merge_without_preprocess_accumulates_rules() {
    init_tracing();
    let mut base = default_template();
    let root = base.root();
    base.merge(root, Some(custom_template()), &["LabelAgent"]);

    let split = base
        .search_content(root, &["plugins"], &[["plugins", "LabelAgent", "split"]])
        .unwrap();
    assert_eq!(split, vec!["node `/` ,aggr,svm `-` ,site"]);
}

#[test]
fn test_merge_without_skip_replaces_rules() {
    let mut base = default_template();
    let root = base.root();
    base.merge(root, Some(custom_template()), &[]);

    let split = base
        .search_content(root, &["plugins"], &[["plugins", "LabelAgent", "split"]])
        .unwrap();
    assert_eq!(split, vec!["svm `-` ,site"]);
}

#[test]
fn test_merge_optional_override_absent() {
    let mut base = default_template();
    let root = base.root();
    let before = base.print(root, 0);
    base.merge(root, None, &["LabelAgent"]);
    assert_eq!(base.print(root, 0), before);
}

#[test]
fn test_merge_keeps_source_independent_when_copied() {
    let mut base = default_template();
    let root = base.root();
    let custom = custom_template();
    let custom_root = custom.root();

    base.merge(root, Some(custom.copy(custom_root)), &[]);
    base.set_child_content(root, "schedule", "5m");

    assert_eq!(custom.child_content(custom_root, "schedule"), Some("3m"));
}

// ---------------------------------------------------------------------------
// Union vs merge
// ---------------------------------------------------------------------------

fn single_leaf(value: &str) -> Tree {
    let mut tree = Tree::new_plain("root");
    let root = tree.root();
    tree.new_child(root, "A", value);
    tree
}

#[test]
fn test_union_and_merge_agree_on_leaf_collision() {
    let mut merged = single_leaf("1");
    let merged_root = merged.root();
    merged.merge(merged_root, Some(single_leaf("2")), &[]);

    let mut unioned = single_leaf("1");
    let unioned_root = unioned.root();
    unioned.union(unioned_root, single_leaf("2"));

    assert_eq!(merged.child_content(merged_root, "A"), Some("2"));
    assert_eq!(unioned.child_content(unioned_root, "A"), Some("2"));
}

#[test]
fn test_union_keeps_populated_subtree_content() {
    let mut base = Tree::new_plain("root");
    let root = base.root();
    let group = base.new_child(root, "group", "base");
    base.new_child(group, "x", "1");

    let mut source = Tree::new_plain("root");
    let src_root = source.root();
    let src_group = source.new_child(src_root, "group", "source");
    source.new_child(src_group, "y", "2");

    let mut merged = base.clone();
    let merged_group = merged.child(merged.root(), "group").unwrap();
    merged.merge(merged.root(), Some(source.clone()), &[]);
    base.union(root, source);

    assert_eq!(base.raw_content(group), "base");
    assert_eq!(base.all_child_names(group), vec!["x", "y"]);
    assert_eq!(merged.raw_content(merged_group), "source");
    assert_eq!(merged.all_child_names(merged_group), vec!["x", "y"]);
}

#[test]
fn test_union_twice_matches_once() {
    let mut once = default_template();
    let once_root = once.root();
    once.union(once_root, custom_template());

    let mut twice = default_template();
    let twice_root = twice.root();
    twice.union(twice_root, custom_template());
    twice.union(twice_root, custom_template());

    assert_eq!(once.print(once_root, 0), twice.print(twice_root, 0));
}

// ---------------------------------------------------------------------------
// Search and flatten
// ---------------------------------------------------------------------------

#[test]
fn test_search_children_exact_match_only() {
    let mut tree = Tree::new_plain("root");
    let root = tree.root();
    let counters = tree.new_child(root, "counters", "");
    let busy = tree.new_child(counters, "cpu_busy", "busy");
    tree.new_child(busy, "cpu_busy", "nested");
    let other = tree.new_child(root, "other", "");
    let other_counters = tree.new_child(other, "counters", "");
    tree.new_child(other_counters, "cpu_busy", "elsewhere");

    let found: Vec<NodeId> = tree
        .search_children(root, &["root", "counters", "cpu_busy"])
        .unwrap();
    assert_eq!(found, vec![busy]);
}

#[test]
fn test_flat_list_after_merge() {
    let mut base = default_template();
    let root = base.root();
    base.merge(root, Some(custom_template()), &[]);

    let counters = base.child(root, "counters").unwrap();
    let mut list = Vec::new();
    base.flat_list(counters, &mut list, "");
    assert_eq!(list, vec!["read_ops", "write_ops", "avg_latency", "other_ops"]);
}

#[test]
fn test_flat_list_with_custom_container() {
    let mut tree = Tree::new_plain("volume");
    let root = tree.root();
    let metrics = tree.new_child(root, "metrics", "");
    tree.new_child(metrics, "", "read_data");
    let counters = tree.new_child(root, "counters", "");
    tree.new_child(counters, "", "write_data");

    let opts = TemplateOptions::default().reserved_container("metrics");
    let mut list = Vec::new();
    tree.flat_list_with_options(root, &mut list, "", &opts);
    assert_eq!(list, vec!["volume read_data", "volume counters write_data"]);
}

#[test]
fn test_qualified_tree_round_trips_through_copy() {
    let mut tree = Tree::new_qualified("netapp");
    let root = tree.root();
    let attrs = tree.new_child(root, "desired-attributes", "");
    tree.new_attribute(attrs, "xmlns", "http://www.netapp.com/filer/admin");
    tree.new_child(attrs, "volume-id-attributes", "");

    let copy = tree.copy(root);
    let copy_attrs = copy.child(copy.root(), "desired-attributes").unwrap();
    assert_eq!(copy.qualified_name(copy.root()), Some("netapp"));
    assert_eq!(copy.qualified_name(copy_attrs), Some("desired-attributes"));
    assert_eq!(
        copy.attribute_value(copy_attrs, "xmlns"),
        Some("http://www.netapp.com/filer/admin")
    );
    assert_eq!(copy.print(copy.root(), 0), tree.print(root, 0));
}
