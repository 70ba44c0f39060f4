//! Tree-sitter query strings used by the extractor.

/// Tree-sitter query that returns name of the package
/// * `name`: name of the package
pub const PACKAGE_QUERY: &str = include_str!("package.scm");
