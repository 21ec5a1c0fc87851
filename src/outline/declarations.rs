use lazy_static::lazy_static;
use regex::Regex;

use super::OutlineNode;

lazy_static! {
    static ref DECLARATION_RE: Regex = Regex::new(concat!(
        r"^\s*(?:export\s+)?(?:async\s+)?",
        r"(?:function|class|interface|type|enum|const|def|fn|pub\s+fn|func)",
        r"\s+([A-Za-z0-9_]+)",
    ))
    .expect("declaration regex");
}

/// Flat list of declarations, one per matching line.
pub fn parse(content: &str) -> Vec<OutlineNode> {
    content
        .split('\n')
        .enumerate()
        .filter_map(|(idx, line)| {
            DECLARATION_RE
                .captures(line)
                .and_then(|c| c.get(1))
                .map(|name| OutlineNode::new(name.as_str(), idx + 1))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::keys;

    #[test]
    fn test_functions() {
        let code = "function hello() {\n  return 1;\n}\n\nfunction world() {\n  return 2;\n}";
        let result = parse(code);
        assert_eq!(keys(&result), vec!["hello", "world"]);
        assert_eq!(result[1].line, 5);
    }

    #[test]
    fn test_export_async_function() {
        let result = parse("export async function fetchData() {}");
        assert_eq!(keys(&result), vec!["fetchData"]);
        assert_eq!(result[0].line, 1);
        assert!(result[0].children.is_empty());
    }

    #[test]
    fn test_class_interface_type_enum_const() {
        let code = [
            "class MyClass {}",
            "interface Foo {",
            "  bar: string;",
            "}",
            "type Baz = string;",
            "enum Color { Red }",
            "const MAX_SIZE = 100;",
        ]
        .join("\n");
        assert_eq!(
            keys(&parse(&code)),
            vec!["MyClass", "Foo", "Baz", "Color", "MAX_SIZE"]
        );
    }

    #[test]
    fn test_python_rust_go() {
        assert_eq!(keys(&parse("def hello():\n    pass")), vec!["hello"]);
        assert_eq!(
            keys(&parse("fn private_fn() {}\n\npub fn public_fn() {}")),
            vec!["private_fn", "public_fn"]
        );
        assert_eq!(keys(&parse("func main() {\n}")), vec!["main"]);
    }

    #[test]
    fn test_line_numbers_count_blank_lines() {
        let result = parse("\n\nfunction third() {}");
        assert_eq!(result[0].line, 3);
    }

    #[test]
    fn test_no_declarations() {
        assert!(parse("// just a comment\nlet x = 1 + 2;").is_empty());
    }
}
