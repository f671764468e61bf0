#![no_main]
use libfuzzer_sys::fuzz_target;
use templtree::Tree;

const NAMES: [&str; 6] = ["", "a", "b", "labels", "LabelAgent", "counters"];

/// Builds a tree from a byte stream. Each byte picks a name, a content, and
/// how far back up the current branch the next node attaches.
fn build(bytes: &[u8]) -> Tree {
    let mut tree = Tree::new_plain("root");
    let mut branch = vec![tree.root()];
    for &byte in bytes {
        let name = NAMES[usize::from(byte) % NAMES.len()];
        let content = match byte >> 6 {
            0 => String::new(),
            1 => "<x/>".to_string(),
            _ => format!("v{}", byte % 7),
        };
        let up = usize::from((byte >> 3) & 0b11);
        branch.truncate(branch.len().saturating_sub(up).max(1));
        let parent = branch[branch.len() - 1];
        let child = tree.new_child(parent, name, content);
        branch.push(child);
    }
    tree
}

fuzz_target!(|data: &[u8]| {
    let split = data.len() / 2;
    let (left, right) = data.split_at(split);

    // Merge, union, preprocess, search and flatten should never panic
    let mut base = build(left);
    let root = base.root();
    base.preprocess_template(root);
    base.merge(root, Some(build(right)), &["labels"]);
    base.union(root, build(right));

    let _ = base.search_content(root, &["root"], &[["root", "a", "b"], ["root", "labels", ""]]);
    let _ = base.search_children(root, &["a", "b"]);
    let mut list = Vec::new();
    base.flat_list(root, &mut list, "");
    let copy = base.copy(root);
    let _ = copy.print(copy.root(), 0);
});
