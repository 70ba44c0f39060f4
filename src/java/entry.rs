#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{
    fmt::{self, Display},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// Kinds of type declarations -
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ClassType {
    /// - `class`
    Class,
    /// - `interface`
    Interface,
    /// - `record`
    Record,
    /// - `enum`
    Enum,
    /// - `@interface`
    Annotation,
}

impl ClassType {
    /// Lowercase name of the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            ClassType::Class => "class",
            ClassType::Interface => "interface",
            ClassType::Record => "record",
            ClassType::Enum => "enum",
            ClassType::Annotation => "annotation",
        }
    }
}

impl Display for ClassType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
#[builder(field_defaults(setter(into)))]
/// A field declared directly in a type body
pub struct FieldEntry {
    /// * `name`: the variable name
    name: String,
    /// * `ty`: declared type text, generics left as written
    #[serde(rename = "type")]
    ty:   String,
}

impl FieldEntry {
    /// Returns the field name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared type text
    pub fn ty(&self) -> &str {
        &self.ty
    }
}

impl Display for FieldEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.ty)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
#[builder(field_defaults(setter(into)))]
#[builder(doc)]
/// One type declaration found in a source file.
///
/// `extends` and `implements` hold names exactly as written (type arguments
/// dropped); they are matched against other entries by name later and may
/// point outside the scanned tree.
pub struct TypeEntry {
    /// * `name`: declared identifier
    name:             String,
    /// * `class_type`: declaration kind
    class_type:       ClassType,
    /// * `extends`: superclass, or first super-interface of an interface
    #[builder(default)]
    extends:          Option<String>,
    /// * `implements`: implemented interfaces, in source order
    #[builder(default)]
    implements:       Vec<String>,
    /// * `fields`: fields in declaration order
    #[builder(default)]
    fields:           Vec<FieldEntry>,
    /// * `relative_package`: directory segments below the scan root
    #[builder(default)]
    relative_package: Vec<String>,
    /// * `path`: file this entry was read from
    #[builder(default)]
    path:             PathBuf,
    /// * `line`: 1-based line of the declaration header
    #[builder(default = 1)]
    line:             usize,
    /// * `type_parameters`: raw `<...>` text, if generic
    #[builder(default)]
    type_parameters:  Option<String>,
    /// * `modifiers`: modifier keywords in source order
    #[builder(default)]
    modifiers:        Vec<String>,
    /// * `enclosing`: name of the enclosing type, for member types
    #[builder(default)]
    enclosing:        Option<String>,
}

impl TypeEntry {
    /// Returns the declared name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declaration kind
    pub fn class_type(&self) -> ClassType {
        self.class_type
    }

    /// Returns the `extends` reference, if any
    pub fn extends(&self) -> Option<&str> {
        self.extends.as_deref()
    }

    /// Returns the `implements` references
    pub fn implements(&self) -> &[String] {
        &self.implements
    }

    /// Returns the fields in declaration order
    pub fn fields(&self) -> &[FieldEntry] {
        &self.fields
    }

    /// Returns the directory segments below the scan root
    pub fn relative_package(&self) -> &[String] {
        &self.relative_package
    }

    /// Dotted form of the relative package, e.g. `com.example`
    pub fn package(&self) -> String {
        self.relative_package.join(".")
    }

    /// Package-qualified name built from the directory layout, with
    /// enclosing types for member types: `com.example.Outer.Inner`.
    pub fn qualified_name(&self) -> String {
        let mut parts: Vec<&str> = self.relative_package.iter().map(String::as_str).collect();
        if let Some(outer) = self.enclosing.as_deref() {
            parts.push(outer);
        }
        parts.push(&self.name);
        parts.join(".")
    }

    /// Returns the source file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the header's line number
    pub fn line(&self) -> usize {
        self.line
    }

    /// Returns the raw type parameter text
    pub fn type_parameters(&self) -> Option<&str> {
        self.type_parameters.as_deref()
    }

    /// Returns the modifiers
    pub fn modifiers(&self) -> &[String] {
        &self.modifiers
    }

    /// Returns the enclosing type's name for member types
    pub fn enclosing(&self) -> Option<&str> {
        self.enclosing.as_deref()
    }

    /// Every supertype reference: `extends` first, then `implements`.
    pub fn references(&self) -> impl Iterator<Item = &str> {
        self.extends
            .as_deref()
            .into_iter()
            .chain(self.implements.iter().map(String::as_str))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// A source file visited by a scan
pub struct SourceFile {
    /// path to the file, as discovered under the root
    path:             PathBuf,
    /// directory segments between the root and the file
    relative_package: Vec<String>,
    /// the `package` statement, when the file has one
    declared_package: Option<String>,
    /// number of catalog entries contributed by this file
    type_count:       usize,
}

impl SourceFile {
    /// Creates a record for a file that has been read and parsed.
    pub fn new(
        path: PathBuf,
        relative_package: Vec<String>,
        declared_package: Option<String>,
        type_count: usize,
    ) -> Self {
        Self {
            path,
            relative_package,
            declared_package,
            type_count,
        }
    }

    /// Returns the file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the directory segments below the root
    pub fn relative_package(&self) -> &[String] {
        &self.relative_package
    }

    /// Returns the declared package, if any
    pub fn declared_package(&self) -> Option<&str> {
        self.declared_package.as_deref()
    }

    /// Returns how many entries this file contributed
    pub fn type_count(&self) -> usize {
        self.type_count
    }
}
