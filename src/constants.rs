#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// File extension scanned when no other extension is configured
pub const DEFAULT_EXTENSION: &str = "java";

/// Reserved words that can never be a type name.
pub const RESERVED: &[&str] = &[
    "abstract",
    "assert",
    "break",
    "case",
    "catch",
    "class",
    "const",
    "continue",
    "default",
    "do",
    "else",
    "enum",
    "extends",
    "final",
    "finally",
    "for",
    "goto",
    "if",
    "implements",
    "import",
    "instanceof",
    "interface",
    "native",
    "new",
    "package",
    "private",
    "protected",
    "public",
    "return",
    "static",
    "strictfp",
    "super",
    "switch",
    "synchronized",
    "this",
    "throw",
    "throws",
    "transient",
    "try",
    "volatile",
    "while",
    "true",
    "false",
    "null",
];

/// Longest snippet of source kept in an unrecognized-declaration warning
pub const SNIPPET_LIMIT: usize = 80;
