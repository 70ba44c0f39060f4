#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_EXTENSION;

#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(on(String, into))]
/// Knobs for a single scan. Nothing here is read from the environment or from
/// disk; callers build it explicitly.
pub struct ScanConfig {
    /// Extension (without the dot) of files to parse.
    #[builder(default = DEFAULT_EXTENSION.to_string())]
    extension:      String,
    /// Deepest directory level to descend into; a file directly under the
    /// root is at depth 1. `None` means unlimited.
    max_depth:      Option<usize>,
    /// Also walk files and directories whose name starts with a dot.
    #[builder(default)]
    include_hidden: bool,
    /// Emit member types as their own catalog entries.
    #[builder(default)]
    include_nested: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl ScanConfig {
    /// Extension of the files this scan parses.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Maximum directory depth, if any.
    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// Whether dot-prefixed paths are walked.
    pub fn include_hidden(&self) -> bool {
        self.include_hidden
    }

    /// Whether nested type declarations become catalog entries.
    pub fn include_nested(&self) -> bool {
        self.include_nested
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_scan_java_top_level_only() {
        let config = ScanConfig::default();
        assert_eq!(config.extension(), "java");
        assert_eq!(config.max_depth(), None);
        assert!(!config.include_hidden());
        assert!(!config.include_nested());
    }

    #[test]
    fn builder_overrides_apply() {
        let config = ScanConfig::builder()
            .extension("jav")
            .max_depth(2)
            .include_nested(true)
            .build();
        assert_eq!(config.extension(), "jav");
        assert_eq!(config.max_depth(), Some(2));
        assert!(config.include_nested());
        assert!(!config.include_hidden());
    }
}
