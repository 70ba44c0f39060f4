#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{
    collections::{HashMap, HashSet},
    path::Path,
};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::{
    entry::{SourceFile, TypeEntry},
    error::{ScanError, ScanWarning},
    extract::{Origin, extract},
};
use crate::{
    config::ScanConfig,
    util::{depth_below, find_files, is_hidden_below, normalize, relative_package, sorted},
};

/// How one entry refers to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    /// superclass or first super-interface
    Extends,
    /// implemented (or additional super-) interface
    Implements,
}

/// A supertype reference and, if it names a catalog entry, that entry's index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// kind of reference
    pub kind:   LinkKind,
    /// the name as written
    pub name:   String,
    /// index into [`Catalog::entries`] of the first entry with that name
    pub target: Option<usize>,
}

/// A reference that names no catalog entry, usually a library type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnresolvedRef {
    /// qualified name of the referring entry
    pub from: String,
    /// kind of reference
    pub kind: LinkKind,
    /// the dangling name
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Every type found by one scan, in scan order, plus the files visited and
/// what went wrong along the way. Entries are only ever appended.
pub struct Catalog {
    /// declared types in scan order
    entries:  Vec<TypeEntry>,
    /// files that were read, in scan order
    files:    Vec<SourceFile>,
    /// non-fatal problems met during the scan
    warnings: Vec<ScanWarning>,
}

/// Walks `root` and extracts every type declaration under it.
///
/// Files are visited in sorted path order, so two scans of an unchanged tree
/// produce equal catalogs. Only a missing or unusable root is an error;
/// per-file problems end up in [`Catalog::warnings`].
pub fn scan(root: impl AsRef<Path>, config: &ScanConfig) -> Result<Catalog, ScanError> {
    let given = root.as_ref();
    if !given.exists() {
        return Err(ScanError::MissingRoot(given.to_path_buf()));
    }
    if !given.is_dir() {
        return Err(ScanError::NotADirectory(given.to_path_buf()));
    }
    let root = normalize(given);
    let root = root.as_path();

    let found = find_files(config.extension(), root, config.include_hidden())
        .ok_or_else(|| ScanError::NonUtf8Root(given.to_path_buf()))??;

    let mut catalog = Catalog::default();
    let mut paths = Vec::new();
    for result in found {
        match result {
            Ok(path) => {
                let path = normalize(&path);
                let within_depth = config
                    .max_depth()
                    .is_none_or(|max| depth_below(&path, root) <= max);
                let visible = config.include_hidden() || !is_hidden_below(&path, root);
                if within_depth && visible && path.is_file() {
                    paths.push(path);
                }
            }
            Err(e) => {
                warn!("Could not access {}: {}", e.path().display(), e.error());
                catalog.warnings.push(ScanWarning::UnreadablePath {
                    path:   e.path().to_path_buf(),
                    reason: e.error().to_string(),
                });
            }
        }
    }

    for path in sorted(paths) {
        let source = match std::fs::read_to_string(&path) {
            Ok(s) => s,
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                catalog.warnings.push(ScanWarning::UnreadableFile {
                    path,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        let package = relative_package(&path, root);
        let origin = Origin {
            path:             &path,
            relative_package: &package,
        };
        let extraction = match extract(&source, origin, config.include_nested()) {
            Ok(extraction) => extraction,
            Err(e) => {
                warn!("Could not parse {}: {:#}", path.display(), e);
                catalog.warnings.push(ScanWarning::UnparsableFile {
                    path,
                    reason: format!("{e:#}"),
                });
                continue;
            }
        };

        for rejected in extraction.rejected {
            debug!(
                "{}:{}: not a type declaration: {}",
                path.display(),
                rejected.line,
                rejected.header
            );
            catalog.warnings.push(ScanWarning::UnrecognizedDeclaration {
                path:   path.clone(),
                line:   rejected.line,
                header: rejected.header,
            });
        }

        let count = extraction.entries.len();
        if count == 0 {
            debug!("{}: no type declarations", path.display());
            catalog.warnings.push(ScanWarning::NoDeclarations { path: path.clone() });
        }

        catalog.entries.extend(extraction.entries);
        catalog
            .files
            .push(SourceFile::new(path, package, extraction.package, count));
    }

    info!(
        "Scanned {} files under {}: {} types, {} warnings",
        catalog.files.len(),
        given.display(),
        catalog.entries.len(),
        catalog.warnings.len()
    );

    Ok(catalog)
}

/// Resolves `entry`'s `extends` reference against `catalog`: the first entry
/// in scan order with exactly that name, or `None` if the supertype lives
/// outside the scanned tree.
pub fn resolve_relationship<'c>(entry: &TypeEntry, catalog: &'c Catalog) -> Option<&'c TypeEntry> {
    entry.extends().and_then(|name| catalog.resolve(name))
}

impl Catalog {
    /// Builds a catalog from already extracted entries.
    pub fn from_entries(entries: impl IntoIterator<Item = TypeEntry>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
            ..Self::default()
        }
    }

    /// All entries, in scan order
    pub fn entries(&self) -> &[TypeEntry] {
        &self.entries
    }

    /// Files that were read, in scan order
    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    /// Problems met during the scan
    pub fn warnings(&self) -> &[ScanWarning] {
        &self.warnings
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the scan found no types
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over entries in scan order
    pub fn iter(&self) -> std::slice::Iter<'_, TypeEntry> {
        self.entries.iter()
    }

    /// Index of the first entry named exactly `name`.
    pub fn resolve_index(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.name() == name)
    }

    /// Each distinct name mapped to the index of its first entry, for
    /// answering many lookups with one pass over the catalog.
    fn name_index(&self) -> HashMap<&str, usize> {
        let mut index = HashMap::with_capacity(self.entries.len());
        for (i, entry) in self.entries.iter().enumerate() {
            index.entry(entry.name()).or_insert(i);
        }
        index
    }

    /// The first entry named exactly `name`. Same-named entries from other
    /// packages are shadowed by whichever was scanned first.
    pub fn resolve(&self, name: &str) -> Option<&TypeEntry> {
        self.resolve_index(name).map(|i| &self.entries[i])
    }

    /// Resolves each `implements` reference of `entry`, keeping order.
    pub fn resolve_implements<'c>(
        &'c self,
        entry: &'c TypeEntry,
    ) -> Vec<(&'c str, Option<&'c TypeEntry>)> {
        entry
            .implements()
            .iter()
            .map(|name| (name.as_str(), self.resolve(name)))
            .collect()
    }

    /// Every supertype reference of `entry` with its resolution.
    pub fn links(&self, entry: &TypeEntry) -> Vec<Link> {
        links_in(&self.name_index(), entry)
    }

    /// The `extends` chain above `entry`, nearest first. Stops at the first
    /// name that does not resolve, or when a type would repeat.
    pub fn ancestors(&self, entry: &TypeEntry) -> Vec<&TypeEntry> {
        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        let names = self.name_index();
        let mut next = entry.extends();

        while let Some(name) = next {
            let Some(&index) = names.get(name) else {
                break;
            };
            if !seen.insert(index) {
                break;
            }
            let parent = &self.entries[index];
            chain.push(parent);
            next = parent.extends();
        }

        chain
    }

    /// Entries that name `name` directly in `extends` or `implements`.
    pub fn subtypes(&self, name: &str) -> Vec<&TypeEntry> {
        self.entries
            .iter()
            .filter(|e| e.references().any(|r| r == name))
            .collect()
    }

    /// Every entry named exactly `name`, in scan order.
    pub fn find_all(&self, name: &str) -> Vec<&TypeEntry> {
        self.entries.iter().filter(|e| e.name() == name).collect()
    }

    /// Entries whose name contains `name` and whose dotted relative package
    /// contains `package`. `None` matches everything.
    pub fn filter(&self, name: Option<&str>, package: Option<&str>) -> Vec<&TypeEntry> {
        self.entries
            .iter()
            .filter(|e| name.is_none_or(|n| e.name().contains(n)))
            .filter(|e| package.is_none_or(|p| e.package().contains(p)))
            .collect()
    }

    /// Every supertype reference that names no catalog entry.
    pub fn unresolved(&self) -> Vec<UnresolvedRef> {
        let names = self.name_index();
        self.entries
            .iter()
            .flat_map(|entry| {
                links_in(&names, entry)
                    .into_iter()
                    .filter(|link| link.target.is_none())
                    .map(move |link| UnresolvedRef {
                        from: entry.qualified_name(),
                        kind: link.kind,
                        name: link.name,
                    })
            })
            .collect()
    }
}

/// Supertype references of `entry`, resolved through a first-occurrence
/// name index.
fn links_in(names: &HashMap<&str, usize>, entry: &TypeEntry) -> Vec<Link> {
    let extends = entry.extends().map(|name| (LinkKind::Extends, name));
    let implements = entry
        .implements()
        .iter()
        .map(|name| (LinkKind::Implements, name.as_str()));

    extends
        .into_iter()
        .chain(implements)
        .map(|(kind, name)| Link {
            kind,
            name: name.to_string(),
            target: names.get(name).copied(),
        })
        .collect()
}

impl<'a> IntoIterator for &'a Catalog {
    type IntoIter = std::slice::Iter<'a, TypeEntry>;
    type Item = &'a TypeEntry;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::java::entry::ClassType;

    fn class(name: &str, package: &str, extends: Option<&str>) -> TypeEntry {
        TypeEntry::builder()
            .name(name)
            .class_type(ClassType::Class)
            .extends(extends.map(str::to_string))
            .relative_package(vec![package.to_string()])
            .build()
    }

    #[test]
    fn ancestors_stop_at_cycles() {
        let catalog = Catalog::from_entries([
            class("A", "p", Some("B")),
            class("B", "p", Some("A")),
        ]);
        let chain: Vec<_> = catalog
            .ancestors(&catalog.entries()[0])
            .into_iter()
            .map(TypeEntry::name)
            .collect();
        assert_eq!(chain, vec!["B", "A"]);
    }

    #[test]
    fn ancestors_stop_at_unresolved_names() {
        let catalog = Catalog::from_entries([
            class("Base", "p", Some("Object")),
            class("Mid", "p", Some("Base")),
            class("Leaf", "p", Some("Mid")),
        ]);
        let chain: Vec<_> = catalog
            .ancestors(&catalog.entries()[2])
            .into_iter()
            .map(TypeEntry::name)
            .collect();
        assert_eq!(chain, vec!["Mid", "Base"]);
    }

    #[test]
    fn links_point_at_the_first_of_duplicate_names() {
        let catalog = Catalog::from_entries([
            class("Config", "a", None),
            class("Config", "b", None),
            class("App", "c", Some("Config")),
        ]);
        let links = catalog.links(&catalog.entries()[2]);
        assert_eq!(
            links,
            vec![Link {
                kind:   LinkKind::Extends,
                name:   "Config".to_string(),
                target: Some(0),
            }]
        );
        assert!(catalog.unresolved().is_empty());
    }

    #[test]
    fn filter_by_name_and_package() {
        let catalog = Catalog::from_entries([
            class("UserConfig", "model", None),
            class("Config", "legacy", None),
            class("Player", "model", None),
        ]);
        let names = |v: Vec<&TypeEntry>| v.into_iter().map(|e| e.name().to_string()).collect::<Vec<_>>();
        assert_eq!(names(catalog.filter(Some("Config"), None)), vec!["UserConfig", "Config"]);
        assert_eq!(names(catalog.filter(Some("Config"), Some("mod"))), vec!["UserConfig"]);
        assert_eq!(names(catalog.filter(None, None)).len(), 3);
    }
}
