#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Catalog assembly, relationship resolution and queries.
pub mod catalog;
/// Records produced by a scan.
pub mod entry;
/// Fatal scan errors and per-file warnings.
pub mod error;
/// Turning one file's text into type entries.
pub mod extract;
/// Tree-sitter parser wrapper.
pub mod parser;
/// Grammar normalizing supertype references.
pub mod parsers;
/// Tree-sitter queries.
pub mod queries;
/// Table rows for terminal output.
pub mod report;

pub use catalog::{Catalog, Link, LinkKind, UnresolvedRef, resolve_relationship, scan};
pub use entry::{ClassType, FieldEntry, SourceFile, TypeEntry};
pub use error::{ScanError, ScanWarning};
