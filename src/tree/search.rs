//! Literal path search, flattening, and the debug dump.
//!
//! A search walks the subtree depth-first, keeping a running path of visited
//! names. A node only contributes its name once the walk is anchored, that
//! is once a node named like the first expected segment has been entered, so
//! names above the anchor never pad the running path.

use std::fmt::Write;

use super::{NodeId, TemplateOptions, Tree};
use crate::util::text::simple_name;

/// Width of the name column in [`Tree::print`].
const PRINT_NAME_WIDTH: usize = 50;
/// Width of the right-aligned content column in [`Tree::print`].
const PRINT_CONTENT_WIDTH: usize = 35;

fn path_eq<S: AsRef<str>>(current: &[&str], path: &[S]) -> bool {
    current.len() == path.len() && current.iter().zip(path).all(|(a, b)| *a == b.as_ref())
}

impl Tree {
    /// Pushes `id`'s name onto the running path if the walk is anchored.
    fn enter<'a>(&'a self, id: NodeId, anchor: &str, current: &mut Vec<&'a str>) -> bool {
        let name = self.name(id);
        if current.is_empty() && name != anchor {
            return false;
        }
        current.push(name);
        true
    }

    /// Collects the raw content of every node whose anchored name path
    /// equals one of `paths`.
    ///
    /// The walk is anchored on `prefix[0]`; the rest of `prefix` is not
    /// consulted. Matches are returned in pre-order. Returns `None` when
    /// nothing matches, or when `prefix` or `paths` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use templtree::Tree;
    ///
    /// let mut tree = Tree::new_plain("template");
    /// let root = tree.root();
    /// let counters = tree.new_child(root, "counters", "");
    /// tree.new_child(counters, "cpu_busy", "busy");
    ///
    /// let found = tree.search_content(root, &["counters"], &[["counters", "cpu_busy"]]);
    /// assert_eq!(found, Some(vec!["busy"]));
    /// ```
    #[must_use]
    pub fn search_content<P, S>(&self, id: NodeId, prefix: &[S], paths: &[P]) -> Option<Vec<&str>>
    where
        P: AsRef<[S]>,
        S: AsRef<str>,
    {
        let anchor = prefix.first()?.as_ref();
        let max_len = paths.iter().map(|p| p.as_ref().len()).max()?;
        let mut current = Vec::new();
        let mut matches = Vec::new();
        self.search_content_at(id, anchor, paths, max_len, &mut current, &mut matches);
        (!matches.is_empty()).then_some(matches)
    }

    fn search_content_at<'a, P, S>(
        &'a self,
        id: NodeId,
        anchor: &str,
        paths: &[P],
        max_len: usize,
        current: &mut Vec<&'a str>,
        matches: &mut Vec<&'a str>,
    ) where
        P: AsRef<[S]>,
        S: AsRef<str>,
    {
        let anchored = self.enter(id, anchor, current);
        if paths.iter().any(|p| path_eq(current.as_slice(), p.as_ref())) {
            matches.push(self.raw_content(id));
        }
        // No deeper node can shorten the running path back to a candidate.
        if current.len() < max_len {
            for child in self.children(id) {
                self.search_content_at(child, anchor, paths, max_len, current, matches);
            }
        }
        if anchored {
            current.pop();
        }
    }

    /// Returns every node whose anchored name path equals `path` exactly.
    ///
    /// The walk is anchored on `path[0]` and does not descend below a match.
    /// Matches are returned in pre-order. Returns `None` when nothing
    /// matches or `path` is empty.
    #[must_use]
    pub fn search_children<S: AsRef<str>>(&self, id: NodeId, path: &[S]) -> Option<Vec<NodeId>> {
        let anchor = path.first()?.as_ref();
        let mut current = Vec::new();
        let mut matches = Vec::new();
        self.search_children_at(id, anchor, path, &mut current, &mut matches);
        (!matches.is_empty()).then_some(matches)
    }

    fn search_children_at<'a, S: AsRef<str>>(
        &'a self,
        id: NodeId,
        anchor: &str,
        path: &[S],
        current: &mut Vec<&'a str>,
        matches: &mut Vec<NodeId>,
    ) {
        let anchored = self.enter(id, anchor, current);
        if path_eq(current.as_slice(), path) {
            matches.push(id);
        } else if current.len() < path.len() {
            for child in self.children(id) {
                self.search_children_at(child, anchor, path, current, matches);
            }
        }
        if anchored {
            current.pop();
        }
    }

    /// Flattens the subtree at `id` into one string per leaf.
    ///
    /// Uses the default [`TemplateOptions`].
    pub fn flat_list(&self, id: NodeId, list: &mut Vec<String>, prefix: &str) {
        self.flat_list_with_options(id, list, prefix, &TemplateOptions::default());
    }

    /// Flattens the subtree at `id` into one string per leaf, in pre-order.
    ///
    /// Each leaf contributes `"<prefix> <word>"` (or just `<word>` with an
    /// empty prefix), where `<word>` is the [`simple_name`] of its raw
    /// content. Inner nodes extend the prefix with their own name unless the
    /// name is empty or equals `options.reserved_container`.
    ///
    /// # Examples
    ///
    /// ```
    /// use templtree::Tree;
    ///
    /// let mut tree = Tree::new_plain("counters");
    /// let root = tree.root();
    /// let cpu = tree.new_child(root, "cpu", "");
    /// tree.new_child(cpu, "busy", "cpu_busy => busy (percent)");
    /// tree.new_child(root, "", "total-ops");
    ///
    /// let mut list = Vec::new();
    /// tree.flat_list(root, &mut list, "");
    /// assert_eq!(list, vec!["cpu cpu_busy", "total-ops"]);
    /// ```
    pub fn flat_list_with_options(
        &self,
        id: NodeId,
        list: &mut Vec<String>,
        prefix: &str,
        options: &TemplateOptions,
    ) {
        if !self.has_children(id) {
            let word = simple_name(self.raw_content(id));
            if prefix.is_empty() {
                list.push(word.to_string());
            } else {
                list.push(format!("{prefix} {word}"));
            }
            return;
        }

        let name = self.name(id);
        let prefix = if name.is_empty() || name == options.reserved_container {
            prefix.to_string()
        } else if prefix.is_empty() {
            name.to_string()
        } else {
            format!("{prefix} {name}")
        };
        for child in self.children(id) {
            self.flat_list_with_options(child, list, &prefix, options);
        }
    }

    /// Renders an indented dump of the subtree at `id` for debugging.
    ///
    /// Each line holds the node name indented by `depth` and its content
    /// right-aligned. Anonymous nodes print as `*`; content that is empty or
    /// starts with `<` prints as `*` as well.
    #[must_use]
    pub fn print(&self, id: NodeId, depth: usize) -> String {
        let mut out = String::new();
        self.print_at(id, depth, &mut out);
        out
    }

    fn print_at(&self, id: NodeId, depth: usize, out: &mut String) {
        let name = match self.name(id) {
            "" => "* ",
            name => name,
        };
        let raw = self.raw_content(id);
        let content = if raw.is_empty() || raw.starts_with('<') {
            " *"
        } else {
            raw
        };
        let label = format!("{}[{name}]", "  ".repeat(depth));
        let _ = writeln!(
            out,
            "{label:<name_width$} - {content:>content_width$}",
            name_width = PRINT_NAME_WIDTH,
            content_width = PRINT_CONTENT_WIDTH,
        );
        for child in self.children(id) {
            self.print_at(child, depth + 1, out);
        }
    }
}
