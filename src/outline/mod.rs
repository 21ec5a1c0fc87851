//! Jump-to-symbol outlines
//!
//! [`parse_structure`] recovers a forest of named symbols from raw text. Three
//! grammars are routed by language tag: indentation for YAML, brace depth for
//! JSON/JSONC, and a flat declaration scan for everything else.

pub mod braces;
pub mod declarations;
pub mod indentation;
pub mod language;
pub mod search;

use serde::{Deserialize, Serialize};

pub use language::language_for_file;
pub use search::{filter, flatten, OutlineEntry, OutlineNavigator};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineNode {
    pub key: String,
    /// 1-based line of the match.
    pub line: usize,
    pub children: Vec<OutlineNode>,
}

impl OutlineNode {
    pub fn new(key: impl Into<String>, line: usize) -> Self {
        Self {
            key: key.into(),
            line,
            children: Vec::new(),
        }
    }
}

pub fn parse_structure(content: &str, language: &str) -> Vec<OutlineNode> {
    match language {
        "yaml" => indentation::parse(content),
        "json" | "jsonc" => braces::parse(content),
        _ => declarations::parse(content),
    }
}

/// Builds a forest from an explicit ancestor stack of `(node, level)` pairs.
///
/// Open nodes stay on the stack until a node at the same or a shallower level
/// arrives; they are attached to their parent (or the roots) when popped, so
/// sibling order follows line order.
#[derive(Default)]
pub(crate) struct ForestBuilder {
    roots: Vec<OutlineNode>,
    stack: Vec<(OutlineNode, isize)>,
}

impl ForestBuilder {
    /// Pops every open node whose level is >= `level`.
    pub(crate) fn close_to(&mut self, level: isize) {
        while self.stack.last().is_some_and(|(_, top)| *top >= level) {
            if let Some((node, _)) = self.stack.pop() {
                self.attach(node);
            }
        }
    }

    /// Keeps `node` open so later matches can nest under it.
    pub(crate) fn open(&mut self, node: OutlineNode, level: isize) {
        self.stack.push((node, level));
    }

    /// Attaches `node` to the innermost open node, or to the roots.
    pub(crate) fn attach(&mut self, node: OutlineNode) {
        match self.stack.last_mut() {
            Some((parent, _)) => parent.children.push(node),
            None => self.roots.push(node),
        }
    }

    pub(crate) fn finish(mut self) -> Vec<OutlineNode> {
        self.close_to(isize::MIN);
        self.roots
    }
}

#[cfg(test)]
pub(crate) fn keys(nodes: &[OutlineNode]) -> Vec<&str> {
    nodes.iter().map(|n| n.key.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes_yaml() {
        let result = parse_structure("key: value", "yaml");
        assert_eq!(keys(&result), vec!["key"]);
    }

    #[test]
    fn test_routes_json_and_jsonc() {
        let json = "{\n  \"key\": \"value\"\n}";
        assert_eq!(keys(&parse_structure(json, "json")), vec!["key"]);
        assert_eq!(keys(&parse_structure(json, "jsonc")), vec!["key"]);
    }

    #[test]
    fn test_routes_everything_else_to_declarations() {
        let result = parse_structure("function test() {}", "python");
        assert_eq!(result.len(), 1);
        // a YAML-looking line is not a declaration
        assert!(parse_structure("key: value", "markdown").is_empty());
    }

    #[test]
    fn test_forest_builder_orders_siblings() {
        let mut builder = ForestBuilder::default();
        builder.close_to(0);
        builder.open(OutlineNode::new("a", 1), 0);
        builder.close_to(2);
        builder.open(OutlineNode::new("x", 2), 2);
        builder.close_to(2);
        builder.attach(OutlineNode::new("y", 3));
        builder.close_to(0);
        builder.open(OutlineNode::new("b", 4), 0);

        let forest = builder.finish();
        assert_eq!(keys(&forest), vec!["a", "b"]);
        assert_eq!(keys(&forest[0].children), vec!["x", "y"]);
    }
}
