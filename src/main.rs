#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! # jstruct
//!
//! Prints the structure of a Java source tree: declared types, their
//! supertypes and fields, and whatever could not be parsed or resolved.

use std::path::PathBuf;

use anyhow::{Context, Result};
use bpaf::*;
use colored::Colorize;
use itertools::Itertools;
use jstruct::{
    Catalog, ScanConfig, TypeEntry,
    constants::DEFAULT_EXTENSION,
    java::report::{EntryRow, FieldRow, problems},
    scan,
};
use tabled::{Table, settings::Style};
use tracing::{Level, metadata::LevelFilter};
use tracing_subscriber::{fmt, prelude::*, util::SubscriberInitExt};

/// Options shared by every subcommand.
#[derive(Debug, Clone)]
struct ScanArgs {
    /// Extension of files to scan
    ext:       String,
    /// Deepest directory level to scan
    max_depth: Option<usize>,
    /// Whether member types are listed
    nested:    bool,
    /// Whether dot-prefixed paths are walked
    hidden:    bool,
    /// Root directory
    root:      PathBuf,
}

impl ScanArgs {
    /// Runs the scan these arguments describe.
    fn scan(&self) -> Result<Catalog> {
        let config = ScanConfig::builder()
            .extension(self.ext.as_str())
            .maybe_max_depth(self.max_depth)
            .include_nested(self.nested)
            .include_hidden(self.hidden)
            .build();

        scan(&self.root, &config).with_context(|| format!("Could not scan {}", self.root.display()))
    }
}

/// Subcommands.
#[derive(Debug, Clone)]
enum Cmd {
    /// List types, optionally filtered
    List {
        /// scan options
        scan:    ScanArgs,
        /// name substring
        name:    Option<String>,
        /// package substring
        package: Option<String>,
        /// print JSON instead of a table
        json:    bool,
    },
    /// Show fields and supertypes of a type
    Show {
        /// scan options
        scan: ScanArgs,
        /// exact type name
        name: String,
    },
    /// Print the resolved supertype chain of a type
    Resolve {
        /// scan options
        scan: ScanArgs,
        /// exact type name
        name: String,
    },
    /// Print scan warnings and unresolved references
    Check {
        /// scan options
        scan: ScanArgs,
    },
}

/// Parsed command line.
#[derive(Debug, Clone)]
struct Cli {
    /// Print debug logs
    verbose: bool,
    /// What to do
    cmd:     Cmd,
}

/// Parse the command line arguments and return a `Cli`
fn options() -> Cli {
    /// parses the shared scan options and the root directory
    fn s() -> impl Parser<ScanArgs> {
        let ext = long("ext")
            .help("Extension of source files to scan")
            .argument::<String>("EXT")
            .fallback(DEFAULT_EXTENSION.to_string());
        let max_depth = long("max-depth")
            .help("Deepest directory level to descend into")
            .argument::<usize>("N")
            .optional();
        let nested = long("nested")
            .help("Also list nested member types")
            .switch();
        let hidden = long("hidden")
            .help("Also scan files and directories starting with a dot")
            .switch();
        let root = positional::<PathBuf>("ROOT").help("Root directory of the Java sources");
        construct!(ScanArgs {
            ext,
            max_depth,
            nested,
            hidden,
            root
        })
    }

    /// parses an exact type name
    fn n() -> impl Parser<String> {
        positional("NAME").help("Exact name of the type")
    }

    let list = {
        let scan = s();
        let name = long("name")
            .help("Only types whose name contains this")
            .argument::<String>("TEXT")
            .optional();
        let package = long("package")
            .help("Only types whose package contains this")
            .argument::<String>("TEXT")
            .optional();
        let json = long("json").help("Print JSON instead of a table").switch();
        construct!(Cmd::List {
            name,
            package,
            json,
            scan
        })
        .to_options()
        .command("list")
        .help("List the types found under ROOT")
    };

    let show = {
        let scan = s();
        let name = n();
        construct!(Cmd::Show { scan, name })
            .to_options()
            .command("show")
            .help("Show fields and supertypes of a type")
    };

    let resolve = {
        let scan = s();
        let name = n();
        construct!(Cmd::Resolve { scan, name })
            .to_options()
            .command("resolve")
            .help("Print the resolved supertype chain of a type")
    };

    let check = {
        let scan = s();
        construct!(Cmd::Check { scan })
            .to_options()
            .command("check")
            .help("Print files and references that could not be handled")
    };

    let verbose = short('v').long("verbose").help("Print debug logs").switch();
    let cmd = construct!([list, show, resolve, check]);

    construct!(Cli { verbose, cmd })
        .to_options()
        .descr("Structural scanner for Java source trees")
        .run()
}

/// Renders a supertype name, in yellow when it names nothing scanned.
fn render_ref(catalog: &Catalog, name: &str) -> String {
    match catalog.resolve(name) {
        Some(target) => format!("{} ({})", name.bold(), target.qualified_name()),
        None => format!("{} {}", name.yellow(), "(external)".dimmed()),
    }
}

/// Prints one entry with its fields and supertypes.
fn show_entry(catalog: &Catalog, entry: &TypeEntry) {
    println!(
        "{} {} {}",
        entry.class_type(),
        entry.qualified_name().bold(),
        format!("{}:{}", entry.path().display(), entry.line()).dimmed()
    );
    if let Some(parent) = entry.extends() {
        println!("  extends    {}", render_ref(catalog, parent));
    }
    if !entry.implements().is_empty() {
        let rendered = entry
            .implements()
            .iter()
            .map(|name| render_ref(catalog, name))
            .join(", ");
        println!("  implements {rendered}");
    }
    if entry.fields().is_empty() {
        println!("  (no fields)");
    } else {
        let rows: Vec<FieldRow> = entry.fields().iter().map(FieldRow::from).collect();
        println!("{}", Table::new(rows).with(Style::modern()));
    }
}

fn main() -> Result<()> {
    let cli = options();

    let fmt = fmt::layer()
        .without_time()
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr);
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::registry()
        .with(fmt)
        .with(LevelFilter::from_level(level))
        .init();

    match cli.cmd {
        Cmd::List {
            scan,
            name,
            package,
            json,
        } => {
            let catalog = scan.scan()?;
            let entries = catalog.filter(name.as_deref(), package.as_deref());
            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                let rows: Vec<EntryRow> = entries.into_iter().map(EntryRow::from).collect();
                println!("{}", Table::new(rows).with(Style::modern()));
            }
        }
        Cmd::Show { scan, name } => {
            let catalog = scan.scan()?;
            let matches = catalog.find_all(&name);
            if matches.is_empty() {
                eprintln!("No type named {name} under {}", scan.root.display());
            }
            for entry in matches {
                show_entry(&catalog, entry);
            }
        }
        Cmd::Resolve { scan, name } => {
            let catalog = scan.scan()?;
            match catalog.resolve(&name) {
                Some(entry) => {
                    let ancestors = catalog.ancestors(entry);
                    let chain = std::iter::once(entry)
                        .chain(ancestors.iter().copied())
                        .map(|e| e.qualified_name())
                        .join(" -> ");
                    println!("{chain}");

                    let last = ancestors.last().copied().unwrap_or(entry);
                    if let Some(outside) = last.extends().filter(|n| catalog.resolve(n).is_none()) {
                        println!("  ... -> {}", render_ref(&catalog, outside));
                    }
                    for (iface, _) in catalog.resolve_implements(entry) {
                        println!("  implements {}", render_ref(&catalog, iface));
                    }
                }
                None => eprintln!("No type named {name} under {}", scan.root.display()),
            }
        }
        Cmd::Check { scan } => {
            let catalog = scan.scan()?;
            let rows = problems(&catalog);
            if rows.is_empty() {
                println!("{}", "No problems found".green());
            } else {
                println!("{}", Table::new(rows).with(Style::modern()));
            }
        }
    };

    Ok(())
}
