#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::path::{Component, Path, PathBuf};

use glob::{MatchOptions, Paths, Pattern, PatternError, glob_with};

/// A glob utility function to find paths to files with certain extension,
/// at any depth below `root_dir`.
///
/// * `extension`: the file extension to find paths for
/// * `root_dir`: the root directory where search starts
/// * `include_hidden`: whether `**` and `*` may match dot-prefixed names
///
/// Returns `None` if `root_dir` is not valid UTF-8.
pub fn find_files(
    extension: &str,
    root_dir: &Path,
    include_hidden: bool,
) -> Option<Result<Paths, PatternError>> {
    let root = root_dir.to_str()?;
    let pattern = Path::new(&Pattern::escape(root))
        .join("**")
        .join(format!("*.{}", Pattern::escape(extension)));

    let options = MatchOptions {
        case_sensitive:              true,
        require_literal_separator:   true,
        require_literal_leading_dot: !include_hidden,
    };

    Some(glob_with(pattern.to_str()?, options))
}

/// Drops `.` components, so that `./src` and `src` name the same tree and
/// `.` becomes the empty path. `glob` reports matches without them.
pub fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// Directory segments between `root_dir` and the file's parent, used as a
/// stand-in for the package name.
pub fn relative_package(path: &Path, root_dir: &Path) -> Vec<String> {
    path.parent()
        .and_then(|parent| parent.strip_prefix(root_dir).ok())
        .map(|rel| {
            rel.components()
                .filter_map(|c| match c {
                    Component::Normal(seg) => Some(seg.to_string_lossy().into_owned()),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Number of path components of `path` below `root_dir`; a file directly in
/// the root has depth 1.
pub fn depth_below(path: &Path, root_dir: &Path) -> usize {
    path.strip_prefix(root_dir)
        .map(|rel| rel.components().count())
        .unwrap_or_else(|_| path.components().count())
}

/// Whether any component of `path` below `root_dir` starts with a dot.
pub fn is_hidden_below(path: &Path, root_dir: &Path) -> bool {
    path.strip_prefix(root_dir)
        .map(|rel| {
            rel.components().any(|c| match c {
                Component::Normal(seg) => seg.to_string_lossy().starts_with('.'),
                _ => false,
            })
        })
        .unwrap_or(false)
}

/// Sorts discovered paths so that a walk over the same tree is repeatable.
pub fn sorted(mut paths: Vec<PathBuf>) -> Vec<PathBuf> {
    paths.sort();
    paths
}
