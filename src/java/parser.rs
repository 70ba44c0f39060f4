#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::fmt::Formatter;

use anyhow::{Context, Result, anyhow};
use tree_sitter::{Node, Query, QueryCursor, StreamingIterator, Tree};

use crate::Dict;

/// A struct that wraps a tree-sitter parse tree and the source it was built
/// from
pub struct Parser {
    /// the source code being parsed
    code: String,
    /// the parse tree
    tree: Tree,
    /// the tree-sitter java grammar language
    lang: tree_sitter::Language,
}

/// Returns the compiled tree-sitter Java language.
fn java_language() -> tree_sitter::Language {
    tree_sitter_java::LANGUAGE.into()
}

impl std::fmt::Debug for Parser {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser")
            .field("bytes", &self.code.len())
            .finish_non_exhaustive()
    }
}

impl Parser {
    /// Parses `source_code` as a Java compilation unit. Syntax errors do not
    /// fail the parse; they show up as `ERROR` nodes in the tree.
    ///
    /// * `source_code`: the source code to be parsed
    pub fn new(source_code: String) -> Result<Self> {
        let mut parser = tree_sitter::Parser::new();
        let language = java_language();

        parser
            .set_language(&language)
            .with_context(|| "Failed to load Java grammar")?;
        let tree = parser
            .parse(source_code.as_str(), None)
            .ok_or_else(|| anyhow!("Error parsing Java code"))?;

        Ok(Self {
            code: source_code,
            tree,
            lang: language,
        })
    }

    /// A getter for parser's source code
    pub fn code(&self) -> &str {
        self.code.as_str()
    }

    /// The `program` node at the root of the tree
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Source text covered by `node`.
    pub fn text(&self, node: Node<'_>) -> &str {
        node.utf8_text(self.code.as_bytes()).unwrap_or_default()
    }

    /// Applies a tree sitter query and returns the result as a collection of
    /// HashMaps, one per match, keyed by capture name
    ///
    /// * `q`: the tree-sitter query to be applied
    pub fn query(&self, q: &str) -> Result<Vec<Dict>> {
        let mut results = vec![];

        let query = Query::new(&self.lang, q)
            .with_context(|| format!("Failed to compile tree-sitter query: {q}"))?;
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&query, self.tree.root_node(), self.code.as_bytes());
        let names = query.capture_names();

        while let Some(m) = matches.next() {
            let mut result = Dict::new();
            for capture in m.captures {
                let name = names
                    .get(capture.index as usize)
                    .ok_or_else(|| anyhow!("Capture index {} has no name.", capture.index))?;
                let value = capture
                    .node
                    .utf8_text(self.code.as_bytes())
                    .with_context(|| format!("Cannot map capture {name} to source text"))?;
                result.insert(name.to_string(), value.to_string());
            }
            results.push(result);
        }

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::java::queries::PACKAGE_QUERY;

    #[test]
    fn broken_code_still_parses() {
        let parser = Parser::new("class A { int x = ; }".to_string()).expect("parse");
        assert!(parser.root().has_error());
        assert_eq!(parser.code(), "class A { int x = ; }");
    }

    #[test]
    fn package_query_captures_the_name() {
        let parser = Parser::new("@Deprecated\npackage com.example.model;\nclass A {}".to_string())
            .expect("parse");
        let found = parser.query(PACKAGE_QUERY).expect("query runs");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].get("name").map(String::as_str), Some("com.example.model"));
    }
}
