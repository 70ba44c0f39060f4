#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use itertools::Itertools;
use tabled::Tabled;

use super::{
    catalog::{Catalog, LinkKind, UnresolvedRef},
    entry::{FieldEntry, TypeEntry},
    error::ScanWarning,
};

#[derive(Tabled, Clone, Debug)]
/// One catalog entry, flattened for a table
pub struct EntryRow {
    /// * `package`: dotted relative package
    #[tabled(rename = "Package")]
    package:    String,
    /// * `name`: declared name (with enclosing types)
    #[tabled(rename = "Type")]
    name:       String,
    /// * `kind`: declaration kind
    #[tabled(rename = "Kind")]
    kind:       String,
    /// * `extends`: superclass, or empty
    #[tabled(rename = "Extends")]
    extends:    String,
    /// * `implements`: comma separated interfaces
    #[tabled(rename = "Implements")]
    implements: String,
    /// * `fields`: number of fields
    #[tabled(rename = "Fields")]
    fields:     usize,
}

impl From<&TypeEntry> for EntryRow {
    fn from(entry: &TypeEntry) -> Self {
        let name = match entry.enclosing() {
            Some(outer) => format!("{outer}.{}", entry.name()),
            None => entry.name().to_string(),
        };

        EntryRow {
            package: entry.package(),
            name,
            kind: entry.class_type().to_string(),
            extends: entry.extends().unwrap_or_default().to_string(),
            implements: entry.implements().iter().join(", "),
            fields: entry.fields().len(),
        }
    }
}

#[derive(Tabled, Clone, Debug)]
/// One field of an entry
pub struct FieldRow {
    /// * `name`: field name
    #[tabled(rename = "Field")]
    name: String,
    /// * `ty`: declared type
    #[tabled(rename = "Type")]
    ty:   String,
}

impl From<&FieldEntry> for FieldRow {
    fn from(field: &FieldEntry) -> Self {
        FieldRow {
            name: field.name().to_string(),
            ty:   field.ty().to_string(),
        }
    }
}

#[derive(Tabled, Clone, Debug)]
/// A scan warning or a dangling reference
pub struct ProblemRow {
    /// * `kind`: what went wrong
    #[tabled(rename = "Problem")]
    kind:   String,
    /// * `place`: file, or referring type
    #[tabled(rename = "Where")]
    place:  String,
    /// * `detail`: message
    #[tabled(rename = "Detail")]
    detail: String,
}

impl From<&ScanWarning> for ProblemRow {
    fn from(warning: &ScanWarning) -> Self {
        let detail = match warning {
            ScanWarning::UnreadableFile { reason, .. }
            | ScanWarning::UnparsableFile { reason, .. }
            | ScanWarning::UnreadablePath { reason, .. } => reason.clone(),
            ScanWarning::UnrecognizedDeclaration { line, header, .. } => {
                format!("line {line}: {header}")
            }
            ScanWarning::NoDeclarations { .. } => String::new(),
        };

        ProblemRow {
            kind: warning.label().to_string(),
            place: warning.path().display().to_string(),
            detail,
        }
    }
}

impl From<&UnresolvedRef> for ProblemRow {
    fn from(unresolved: &UnresolvedRef) -> Self {
        let verb = match unresolved.kind {
            LinkKind::Extends => "extends",
            LinkKind::Implements => "implements",
        };

        ProblemRow {
            kind:   "unresolved reference".to_string(),
            place:  unresolved.from.clone(),
            detail: format!("{verb} {}", unresolved.name),
        }
    }
}

/// Rows for every warning followed by every dangling reference.
pub fn problems(catalog: &Catalog) -> Vec<ProblemRow> {
    catalog
        .warnings()
        .iter()
        .map(ProblemRow::from)
        .chain(catalog.unresolved().iter().map(ProblemRow::from))
        .collect()
}
