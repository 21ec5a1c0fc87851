//! Brace-depth grammar for JSON and JSONC.
//!
//! Opening `{`/`[` on a line are counted before the key test and closing
//! `}`/`]` after it. A key is recorded at the depth it was declared in, i.e.
//! the depth before its own line's openings. Only keys whose own line opens a
//! scope can receive children; a value that opens on a later line is not
//! detected.

use lazy_static::lazy_static;
use regex::Regex;

use super::{ForestBuilder, OutlineNode};

lazy_static! {
    static ref QUOTED_KEY_RE: Regex =
        Regex::new(r#"^\s*"([A-Za-z0-9_][A-Za-z0-9_.*-]*)"\s*:"#)
            .expect("quoted key regex");
}

fn is_open(ch: char) -> bool {
    ch == '{' || ch == '['
}

fn is_close(ch: char) -> bool {
    ch == '}' || ch == ']'
}

pub fn parse(content: &str) -> Vec<OutlineNode> {
    let mut builder = ForestBuilder::default();
    let mut depth: isize = 0;

    for (idx, line) in content.split('\n').enumerate() {
        let declared_at = depth;
        let opens = line.chars().filter(|&c| is_open(c)).count() as isize;
        depth += opens;

        if let Some(key) = QUOTED_KEY_RE.captures(line).and_then(|c| c.get(1)) {
            let node = OutlineNode::new(key.as_str(), idx + 1);

            builder.close_to(declared_at);
            if opens > 0 {
                builder.open(node, declared_at);
            } else {
                builder.attach(node);
            }
        }

        depth -= line.chars().filter(|&c| is_close(c)).count() as isize;
    }

    builder.finish()
}
