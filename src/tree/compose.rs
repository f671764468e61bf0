//! Template composition: copy, union, merge, and preprocessing.
//!
//! `union` and `merge` take their source tree by value. Source children that
//! the receiver lacks are moved into the receiver's arena wholesale, so the
//! receiver never aliases storage owned by another live tree. Callers that
//! need to keep the source around compose a [`copy`](Tree::copy) instead.

use tracing::{debug, trace};

use super::{NodeId, TemplateOptions, Tree};

impl Tree {
    /// Deep-copies the subtree rooted at `id` into a new standalone tree.
    ///
    /// Names keep their convention, attributes are cloned, and each node
    /// receives its source's effective [`content`](Tree::content). The copy
    /// shares no storage with `self`.
    #[must_use]
    pub fn copy(&self, id: NodeId) -> Tree {
        let mut tree = Tree::with_root(self.node(id).name.clone());
        let root = tree.root();
        tree.set_content(root, self.content(id));
        tree.node_mut(root).attributes = self.node(id).attributes.clone();
        for child in self.children(id) {
            tree.copy_under(root, self, child);
        }
        tree
    }

    fn copy_under(&mut self, parent: NodeId, src: &Tree, from: NodeId) {
        let id = self.create_node(src.node(from).name.clone());
        self.node_mut(id).content = src.content(from).to_string();
        self.node_mut(id).attributes = src.node(from).attributes.clone();
        self.append_child(parent, id);
        for child in src.children(from) {
            self.copy_under(id, src, child);
        }
    }

    /// Moves the subtree `from` of `src` to the end of `parent`'s children.
    ///
    /// Raw content, attributes, naming convention and child order are kept.
    fn adopt(&mut self, parent: NodeId, src: &Tree, from: NodeId) -> NodeId {
        let data = src.node(from);
        let id = self.create_node(data.name.clone());
        self.node_mut(id).content.clone_from(&data.content);
        self.node_mut(id).attributes.clone_from(&data.attributes);
        self.append_child(parent, id);
        for child in src.children(from) {
            self.adopt(id, src, child);
        }
        id
    }

    /// Merges `source` into the subtree at `target`, favoring existing data.
    ///
    /// - `target` adopts the source root's content if its own effective
    ///   content is empty.
    /// - A source child with no same-named child under `target` is moved in.
    /// - A same-named child that has children of its own is unioned with the
    ///   source child recursively.
    /// - A same-named leaf takes the source child's content: on leaf
    ///   collisions the source wins.
    ///
    /// # Examples
    ///
    /// ```
    /// use templtree::Tree;
    ///
    /// let mut base = Tree::new_plain("root");
    /// let root = base.root();
    /// base.new_child(root, "a", "1");
    ///
    /// let mut source = Tree::new_plain("root");
    /// let src_root = source.root();
    /// source.new_child(src_root, "a", "2");
    /// source.new_child(src_root, "b", "3");
    ///
    /// base.union(root, source);
    /// assert_eq!(base.child_content(root, "a"), Some("2"));
    /// assert_eq!(base.child_content(root, "b"), Some("3"));
    /// ```
    #[allow(clippy::needless_pass_by_value)]
    pub fn union(&mut self, target: NodeId, source: Tree) {
        debug!(node = self.name(target), "union template");
        self.union_at(target, &source, source.root());
    }

    fn union_at(&mut self, target: NodeId, src: &Tree, from: NodeId) {
        if self.content(target).is_empty() {
            self.set_content(target, src.content(from));
        }
        for child in src.children(from) {
            let name = src.name(child);
            match self.child(target, name) {
                None => {
                    trace!(node = name, "union adopts child");
                    self.adopt(target, src, child);
                }
                Some(mine) if self.has_children(mine) => self.union_at(mine, src, child),
                Some(mine) => {
                    trace!(node = name, "union overwrites leaf");
                    self.set_content(mine, src.raw_content(child));
                }
            }
        }
    }

    /// Composes an override template into the base subtree at `target`.
    ///
    /// Uses the default [`TemplateOptions`]; see
    /// [`merge_with_options`](Tree::merge_with_options).
    pub fn merge(&mut self, target: NodeId, subtemplate: Option<Tree>, skip_overwrite: &[&str]) {
        self.merge_with_options(target, subtemplate, skip_overwrite, &TemplateOptions::default());
    }

    /// Composes an override template into the base subtree at `target`.
    ///
    /// A `None` subtemplate leaves the receiver unchanged. Otherwise:
    ///
    /// - `target` adopts the subtemplate root's raw content if its own raw
    ///   content is empty.
    /// - An anonymous (empty-named) override child is a list entry. It is
    ///   appended beside the receiver's first anonymous child, under that
    ///   child's parent, unless that parent already holds an entry with the
    ///   same content; failing that it is appended under `target` unless
    ///   `target` already holds one.
    /// - A named override child missing from `target` is moved in.
    /// - A named override child that collides with `mine` replaces `mine`'s
    ///   content, or, when the name of `mine`'s parent is listed in
    ///   `skip_overwrite`, is appended to it after `options.separator`.
    ///   Composition then continues one level down in `mine`.
    ///
    /// # Examples
    ///
    /// ```
    /// use templtree::Tree;
    ///
    /// let mut base = Tree::new_plain("root");
    /// let root = base.root();
    /// let labels = base.new_child(root, "labels", "");
    /// base.new_child(labels, "node", "a");
    ///
    /// let mut custom = Tree::new_plain("root");
    /// let custom_root = custom.root();
    /// let custom_labels = custom.new_child(custom_root, "labels", "");
    /// custom.new_child(custom_labels, "node", "b");
    ///
    /// base.merge(root, Some(custom), &["labels"]);
    /// assert_eq!(base.child_content(labels, "node"), Some("a,b"));
    /// ```
    #[allow(clippy::needless_pass_by_value)]
    pub fn merge_with_options(
        &mut self,
        target: NodeId,
        subtemplate: Option<Tree>,
        skip_overwrite: &[&str],
        options: &TemplateOptions,
    ) {
        let Some(subtemplate) = subtemplate else {
            return;
        };
        debug!(node = self.name(target), "merge subtemplate");
        self.merge_at(target, &subtemplate, subtemplate.root(), skip_overwrite, options);
    }

    fn merge_at(
        &mut self,
        target: NodeId,
        src: &Tree,
        from: NodeId,
        skip_overwrite: &[&str],
        options: &TemplateOptions,
    ) {
        if self.raw_content(target).is_empty() {
            self.set_content(target, src.raw_content(from));
        }
        for child in src.children(from) {
            let name = src.name(child);
            let mine = self.child(target, name);

            if name.is_empty() {
                let content = src.raw_content(child);
                let host = mine
                    .and_then(|m| self.parent(m))
                    .filter(|&p| self.child_by_content(p, content).is_none());
                if let Some(host) = host {
                    trace!(content, "merge appends list entry beside match");
                    self.adopt(host, src, child);
                } else if self.child_by_content(target, content).is_none() {
                    trace!(content, "merge appends list entry");
                    self.adopt(target, src, child);
                }
                continue;
            }

            let Some(mine) = mine else {
                trace!(node = name, "merge adopts child");
                self.adopt(target, src, child);
                continue;
            };

            let accumulate = self
                .parent(mine)
                .is_some_and(|p| skip_overwrite.iter().any(|s| *s == self.name(p)));
            let content = if accumulate {
                trace!(node = name, "merge accumulates content");
                format!(
                    "{}{}{}",
                    self.raw_content(mine),
                    options.separator,
                    src.raw_content(child)
                )
            } else {
                trace!(node = name, "merge overwrites content");
                src.raw_content(child).to_string()
            };
            self.set_content(mine, content);
            self.merge_at(mine, src, child, skip_overwrite, options);
        }
    }

    /// Normalizes nodes under the sentinel ancestor so their value travels
    /// as an anonymous child entry rather than inline content.
    ///
    /// Uses the default [`TemplateOptions`].
    pub fn preprocess_template(&mut self, id: NodeId) {
        self.preprocess_template_with_options(id, &TemplateOptions::default());
    }

    /// Normalizes nodes under `options.sentinel_label`.
    ///
    /// For each named child of `id`, its first same-named sibling `mine` is
    /// examined: if `mine` lives below an ancestor named by the sentinel
    /// label and holds content, the content moves into a new anonymous child
    /// of `mine` and `mine`'s own content is cleared. The walk then descends
    /// into `mine`.
    pub fn preprocess_template_with_options(&mut self, id: NodeId, options: &TemplateOptions) {
        debug!(node = self.name(id), "preprocess template");
        self.preprocess_at(id, &options.sentinel_label);
    }

    fn preprocess_at(&mut self, id: NodeId, label: &str) {
        let children: Vec<NodeId> = self.children(id).collect();
        for child in children {
            if self.name(child).is_empty() {
                continue;
            }
            let Some(mine) = self.child(id, self.name(child)) else {
                continue;
            };
            if self.search_ancestor(mine, label).is_some() && !self.raw_content(mine).is_empty() {
                let content = std::mem::take(&mut self.node_mut(mine).content);
                trace!(node = self.name(mine), "preprocess demotes content");
                self.new_child(mine, "", content);
            }
            self.preprocess_at(mine, label);
        }
    }
}
