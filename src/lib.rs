//! # jstruct
//!
//! A tolerant structural scanner for Java source trees. It reads every
//! `.java` file under a directory, pulls out declared types with their
//! supertypes and fields, and links supertypes to each other by simple name.
//!
//! It is not a compiler front end: there is no symbol table and no type
//! resolution, and anything the heuristics do not understand is skipped.

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Options for a single scan
pub mod config;
/// A module defining a bunch of constant values to be used throughout
pub mod constants;
/// Java source scanning, catalog assembly and relationship resolution
pub mod java;
/// Utility functions for convenience
pub mod util;

/// Capture name to captured text, one map per query match
pub type Dict = std::collections::HashMap<String, String>;

pub use config::ScanConfig;
pub use java::{
    Catalog, ClassType, FieldEntry, ScanError, ScanWarning, SourceFile, TypeEntry,
    resolve_relationship, scan,
};
