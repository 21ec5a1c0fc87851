//! Flattened outline for jump-to-symbol lists.

use serde::Serialize;

use super::OutlineNode;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutlineEntry {
    pub key: String,
    pub line: usize,
    pub depth: usize,
    pub has_children: bool,
}

/// Depth-first pre-order listing of the forest.
pub fn flatten(nodes: &[OutlineNode]) -> Vec<OutlineEntry> {
    let mut out = Vec::new();
    // explicit stack, children pushed in reverse to keep pre-order
    let mut stack: Vec<(&OutlineNode, usize)> = nodes.iter().rev().map(|n| (n, 0)).collect();

    while let Some((node, depth)) = stack.pop() {
        out.push(OutlineEntry {
            key: node.key.clone(),
            line: node.line,
            depth,
            has_children: !node.children.is_empty(),
        });
        stack.extend(node.children.iter().rev().map(|c| (c, depth + 1)));
    }

    out
}

/// Case-insensitive substring filter on the key. Order and depth are kept.
pub fn filter(entries: &[OutlineEntry], query: &str) -> Vec<OutlineEntry> {
    if query.is_empty() {
        return entries.to_vec();
    }
    let needle = query.to_lowercase();
    entries
        .iter()
        .filter(|e| e.key.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Keyboard state of a jump-to-symbol list: a query and a selected row that
/// wraps around at both ends.
#[derive(Debug, Clone, Default)]
pub struct OutlineNavigator {
    all: Vec<OutlineEntry>,
    visible: Vec<OutlineEntry>,
    query: String,
    selected: usize,
}

impl OutlineNavigator {
    pub fn new(nodes: &[OutlineNode]) -> Self {
        let all = flatten(nodes);
        Self {
            visible: all.clone(),
            all,
            query: String::new(),
            selected: 0,
        }
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.visible = filter(&self.all, query);
        self.selected = 0;
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn visible(&self) -> &[OutlineEntry] {
        &self.visible
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn move_down(&mut self) {
        if !self.visible.is_empty() {
            self.selected = (self.selected + 1) % self.visible.len();
        }
    }

    pub fn move_up(&mut self) {
        if !self.visible.is_empty() {
            self.selected = (self.selected + self.visible.len() - 1) % self.visible.len();
        }
    }

    pub fn select(&mut self, idx: usize) {
        if idx < self.visible.len() {
            self.selected = idx;
        }
    }

    pub fn selected(&self) -> Option<&OutlineEntry> {
        self.visible.get(self.selected)
    }

    /// Line to jump to for the current selection.
    pub fn selected_line(&self) -> Option<usize> {
        self.selected().map(|e| e.line)
    }
}
