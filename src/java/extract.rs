#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::path::Path;

use anyhow::Result;
use tree_sitter::Node;

use super::{
    entry::{ClassType, FieldEntry, TypeEntry},
    parser::Parser,
    parsers::{collapse, reference_name},
    queries::PACKAGE_QUERY,
};
use crate::constants::SNIPPET_LIMIT;

/// Where extracted entries come from.
#[derive(Debug, Clone, Copy)]
pub struct Origin<'a> {
    /// the file being read
    pub path:             &'a Path,
    /// its directory segments below the scan root
    pub relative_package: &'a [String],
}

/// Top-level code that is neither a type declaration nor a package or
/// import statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejected {
    /// 1-based line where the code starts
    pub line:   usize,
    /// shortened source text, up to any body
    pub header: String,
}

/// Everything pulled out of one compilation unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// the `package` statement, if present
    pub package:  Option<String>,
    /// declared types, in source order
    pub entries:  Vec<TypeEntry>,
    /// top-level constructs that were skipped
    pub rejected: Vec<Rejected>,
}

/// Shared state while walking one file.
struct Extractor<'a> {
    /// the parsed file
    parser:         &'a Parser,
    /// file the entries belong to
    origin:         Origin<'a>,
    /// whether member types become entries
    include_nested: bool,
}

/// Declaration kind of a syntax node, if it declares a type.
fn class_type_of(node: Node<'_>) -> Option<ClassType> {
    match node.kind() {
        "class_declaration" => Some(ClassType::Class),
        "interface_declaration" => Some(ClassType::Interface),
        "enum_declaration" => Some(ClassType::Enum),
        "record_declaration" => Some(ClassType::Record),
        "annotation_type_declaration" => Some(ClassType::Annotation),
        _ => None,
    }
}

/// Named children of `node`, in source order.
fn named_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    let children: Vec<_> = node.named_children(&mut cursor).collect();
    children
}

/// First direct child of `node` with the given kind.
fn child_of_kind<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).find(|c| c.kind() == kind);
    found
}

/// 1-based line on which `node` starts.
fn line_of(node: Node<'_>) -> usize {
    node.start_position().row + 1
}

/// Extracts type declarations from Java source text.
///
/// Only top-level declarations become entries unless `include_nested` is set,
/// in which case member types follow their enclosing type depth-first. Bodies
/// of methods, initializers, anonymous classes and skipped member types never
/// contribute fields. Syntax errors are tolerated: whatever tree-sitter
/// recovers as a declaration is used, and the rest is reported as rejected.
pub fn extract(source: &str, origin: Origin<'_>, include_nested: bool) -> Result<Extraction> {
    let parser = Parser::new(source.trim_start_matches('\u{feff}').to_string())?;
    let package = parser
        .query(PACKAGE_QUERY)?
        .into_iter()
        .find_map(|mut captures| captures.remove("name"))
        .map(|name| collapse(&name));

    let extractor = Extractor {
        parser: &parser,
        origin,
        include_nested,
    };
    let mut out = Extraction {
        package,
        ..Extraction::default()
    };

    for node in named_children(parser.root()) {
        match node.kind() {
            "package_declaration" | "import_declaration" | "line_comment" | "block_comment" => {}
            _ => match class_type_of(node) {
                Some(class_type) => extractor.declare(node, class_type, None, &mut out),
                None => out.rejected.push(extractor.rejected(node)),
            },
        }
    }

    Ok(out)
}

impl Extractor<'_> {
    /// Turns a type declaration node into an entry, then recurses into
    /// member types when enabled.
    fn declare(
        &self,
        node: Node<'_>,
        class_type: ClassType,
        enclosing: Option<&str>,
        out: &mut Extraction,
    ) {
        let name = node
            .child_by_field_name("name")
            .filter(|n| !n.is_missing())
            .map(|n| self.parser.text(n))
            .filter(|n| !n.is_empty());
        let Some(name) = name else {
            out.rejected.push(self.rejected(node));
            return;
        };

        let mut fields = node
            .child_by_field_name("parameters")
            .map(|params| self.components(params))
            .unwrap_or_default();

        let mut nested = Vec::new();
        for member in node
            .child_by_field_name("body")
            .map(|body| self.members(body))
            .unwrap_or_default()
        {
            match member.kind() {
                "field_declaration" | "constant_declaration" => {
                    fields.extend(self.fields(member));
                }
                _ => {
                    if let Some(inner) = class_type_of(member)
                        && self.include_nested
                    {
                        nested.push((member, inner));
                    }
                }
            }
        }

        // An interface may extend several interfaces; only the first is kept
        // as `extends`, the rest are listed with `implements`.
        let mut supers = ["superclass", "extends_interfaces"]
            .into_iter()
            .filter_map(|kind| child_of_kind(node, kind))
            .flat_map(|clause| self.type_names(clause))
            .collect::<Vec<_>>()
            .into_iter();
        let extends = supers.next();
        let implements: Vec<String> = supers
            .chain(
                child_of_kind(node, "super_interfaces")
                    .map(|clause| self.type_names(clause))
                    .unwrap_or_default(),
            )
            .collect();

        let outer = match enclosing {
            Some(e) => format!("{e}.{name}"),
            None => name.to_string(),
        };

        out.entries.push(
            TypeEntry::builder()
                .name(name)
                .class_type(class_type)
                .extends(extends)
                .implements(implements)
                .fields(fields)
                .relative_package(self.origin.relative_package.to_vec())
                .path(self.origin.path)
                .line(line_of(node))
                .type_parameters(
                    node.child_by_field_name("type_parameters")
                        .map(|tp| collapse(self.parser.text(tp))),
                )
                .modifiers(self.modifiers(node))
                .enclosing(enclosing.map(str::to_string))
                .build(),
        );

        for (member, inner) in nested {
            self.declare(member, inner, Some(&outer), out);
        }
    }

    /// Member nodes of a type body. Enum constants are skipped; only the
    /// declarations after the constant list count.
    fn members<'t>(&self, body: Node<'t>) -> Vec<Node<'t>> {
        let section = match body.kind() {
            "enum_body" => child_of_kind(body, "enum_body_declarations"),
            _ => Some(body),
        };
        section.map(named_children).unwrap_or_default()
    }

    /// Keyword modifiers of a declaration, annotations left out.
    fn modifiers(&self, node: Node<'_>) -> Vec<String> {
        let Some(modifiers) = child_of_kind(node, "modifiers") else {
            return Vec::new();
        };
        let mut cursor = modifiers.walk();
        let keywords: Vec<String> = modifiers
            .children(&mut cursor)
            .filter(|c| !matches!(c.kind(), "annotation" | "marker_annotation"))
            .map(|c| self.parser.text(c).to_string())
            .collect();
        keywords
    }

    /// Reference names listed in an `extends`/`implements` clause.
    fn type_names(&self, clause: Node<'_>) -> Vec<String> {
        let types = child_of_kind(clause, "type_list")
            .map(named_children)
            .unwrap_or_else(|| named_children(clause));
        types
            .into_iter()
            .map(|ty| reference_name(self.parser.text(ty)))
            .filter(|name| !name.is_empty())
            .collect()
    }

    /// One entry per declarator of a field or constant declaration.
    fn fields(&self, decl: Node<'_>) -> Vec<FieldEntry> {
        let Some(ty) = decl.child_by_field_name("type") else {
            return Vec::new();
        };
        let base = collapse(self.parser.text(ty));

        let mut cursor = decl.walk();
        let fields: Vec<FieldEntry> = decl
            .children_by_field_name("declarator", &mut cursor)
            .filter_map(|declarator| self.variable(declarator, &base))
            .collect();
        fields
    }

    /// Record components, in order, as fields.
    fn components(&self, params: Node<'_>) -> Vec<FieldEntry> {
        named_children(params)
            .into_iter()
            .filter_map(|param| match param.kind() {
                "formal_parameter" => {
                    let ty = collapse(self.parser.text(param.child_by_field_name("type")?));
                    self.variable(param, &ty)
                }
                "spread_parameter" => {
                    let children = named_children(param);
                    let ty = children
                        .iter()
                        .find(|c| !matches!(c.kind(), "modifiers" | "variable_declarator"))?;
                    let declarator = children.iter().find(|c| c.kind() == "variable_declarator")?;
                    let ty = format!("{}...", collapse(self.parser.text(*ty)));
                    self.variable(*declarator, &ty)
                }
                _ => None,
            })
            .collect()
    }

    /// A field from a node carrying `name` and optional `dimensions`, with
    /// trailing `[]` folded into the type.
    fn variable(&self, node: Node<'_>, base: &str) -> Option<FieldEntry> {
        let name = node.child_by_field_name("name").filter(|n| !n.is_missing())?;
        let dims = node
            .child_by_field_name("dimensions")
            .map(|d| self.parser.text(d).matches('[').count())
            .unwrap_or(0);

        Some(
            FieldEntry::builder()
                .name(self.parser.text(name))
                .ty(format!("{base}{}", "[]".repeat(dims)))
                .build(),
        )
    }

    /// Describes a top-level node that declares no type.
    fn rejected(&self, node: Node<'_>) -> Rejected {
        let text = self.parser.text(node);
        let head = match node.child_by_field_name("body") {
            Some(body) => &text[..body.start_byte().saturating_sub(node.start_byte()).min(text.len())],
            None => text,
        };
        Rejected {
            line:   line_of(node),
            header: snippet(head),
        }
    }
}

/// Single-line, length-limited version of some source for warnings.
fn snippet(text: &str) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let flat = flat.trim_end_matches(';').trim_end();
    if flat.chars().count() > SNIPPET_LIMIT {
        let cut: String = flat.chars().take(SNIPPET_LIMIT).collect();
        format!("{cut}...")
    } else {
        flat.to_string()
    }
}
