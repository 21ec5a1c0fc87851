//! Indentation grammar: `key:` lines nested by leading whitespace.

use lazy_static::lazy_static;
use regex::Regex;

use super::{ForestBuilder, OutlineNode};

lazy_static! {
    static ref KEY_RE: Regex = Regex::new(r"^(\s*)([A-Za-z0-9_][A-Za-z0-9_.*-]*)\s*:")
        .expect("indented key regex");
}

pub fn parse(content: &str) -> Vec<OutlineNode> {
    let mut builder = ForestBuilder::default();

    for (idx, line) in content.split('\n').enumerate() {
        let Some(caps) = KEY_RE.captures(line) else {
            continue;
        };
        let indent = caps.get(1).map_or(0, |m| m.as_str().len()) as isize;
        let key = caps.get(2).map_or("", |m| m.as_str());

        builder.close_to(indent);
        builder.open(OutlineNode::new(key, idx + 1), indent);
    }

    builder.finish()
}
