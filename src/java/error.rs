#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Conditions that stop a scan before it starts.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// The root directory does not exist
    #[error("scan root {} does not exist", .0.display())]
    MissingRoot(PathBuf),
    /// The root exists but is a file
    #[error("scan root {} is not a directory", .0.display())]
    NotADirectory(PathBuf),
    /// The root cannot be turned into a glob pattern
    #[error("scan root {} is not valid UTF-8", .0.display())]
    NonUtf8Root(PathBuf),
    /// The glob pattern built from the root was rejected
    #[error("could not build a search pattern")]
    Pattern(#[from] glob::PatternError),
}

/// Things that went wrong for a single file or declaration. None of these
/// stop a scan; they are collected on the catalog.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScanWarning {
    /// A matched file could not be read or was not valid UTF-8
    #[error("could not read {}: {reason}", .path.display())]
    UnreadableFile {
        /// the file
        path:   PathBuf,
        /// the I/O error, rendered
        reason: String,
    },
    /// A file was read but the Java parser could not be run on it
    #[error("could not parse {}: {reason}", .path.display())]
    UnparsableFile {
        /// the file
        path:   PathBuf,
        /// the parser error, rendered
        reason: String,
    },
    /// A directory entry could not be inspected during the walk
    #[error("could not access {}: {reason}", .path.display())]
    UnreadablePath {
        /// the path
        path:   PathBuf,
        /// the I/O error, rendered
        reason: String,
    },
    /// Top-level code that is not a type declaration
    #[error("{}:{line}: unrecognized declaration `{header}`", .path.display())]
    UnrecognizedDeclaration {
        /// the file
        path:   PathBuf,
        /// 1-based line of the header
        line:   usize,
        /// the header text, collapsed and shortened
        header: String,
    },
    /// A file that was read but declared no types
    #[error("{}: no type declarations found", .path.display())]
    NoDeclarations {
        /// the file
        path: PathBuf,
    },
}

impl ScanWarning {
    /// The file or directory this warning is about.
    pub fn path(&self) -> &std::path::Path {
        match self {
            ScanWarning::UnreadableFile { path, .. }
            | ScanWarning::UnparsableFile { path, .. }
            | ScanWarning::UnreadablePath { path, .. }
            | ScanWarning::UnrecognizedDeclaration { path, .. }
            | ScanWarning::NoDeclarations { path } => path,
        }
    }

    /// Short label for tables.
    pub fn label(&self) -> &'static str {
        match self {
            ScanWarning::UnreadableFile { .. } => "unreadable file",
            ScanWarning::UnparsableFile { .. } => "unparsable file",
            ScanWarning::UnreadablePath { .. } => "unreadable path",
            ScanWarning::UnrecognizedDeclaration { .. } => "unrecognized declaration",
            ScanWarning::NoDeclarations { .. } => "no declarations",
        }
    }
}
