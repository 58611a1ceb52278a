//! Alarm header extraction
//!
//! Parses the C alarm header with tree-sitter and collects every
//! `typedef enum { ... } Name;` declaration into an [`EnumModel`].
//!
//! Only typedef'd enums are recognized: the alarm code tables are all
//! declared through the `typedef enum` pattern, and anonymous or
//! non-typedef enums carry no name to look subcode tables up by. A
//! `typedef enum { ... } A, B;` yields one model per typedef name.
//!
//! Enumerator initializers must be integer literals. The header also
//! declares enums whose enumerators alias message constants; those are
//! excluded via the ignore set before value resolution, so they never
//! trip the initializer check.

use crate::enums::{EnumModel, RawEnumerator, SourceLocation};
use arborium::tree_sitter::{Node, Parser};
use eyre::{Result, bail};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// All typedef'd enums extracted from one alarm header, keyed by typedef
/// name.
#[derive(Debug, Clone, Default)]
pub struct HeaderEnums {
    enums: HashMap<String, EnumModel>,
}

impl HeaderEnums {
    /// Parse `source` (the contents of `path`) and collect every
    /// `typedef enum` whose typedef name is not in `ignore`.
    ///
    /// # Errors
    ///
    /// Fails if the header is not parseable C, or if a collected
    /// enumerator carries a non-integer-literal initializer.
    pub fn parse(path: &Path, source: &str, ignore: &HashSet<String>) -> Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&arborium_c::language().into())
            .expect("Failed to load C grammar");

        let Some(tree) = parser.parse(source, None) else {
            bail!("failed to parse C header {}", path.display());
        };

        let mut enums = HashMap::new();
        collect_typedef_enums(path, source, tree.root_node(), ignore, &mut enums)?;
        Ok(Self { enums })
    }

    /// Look up an enum by typedef name
    pub fn get(&self, name: &str) -> Option<&EnumModel> {
        self.enums.get(name)
    }

    /// Number of collected enums
    pub fn len(&self) -> usize {
        self.enums.len()
    }

    /// Whether no enums were collected
    pub fn is_empty(&self) -> bool {
        self.enums.is_empty()
    }
}

fn collect_typedef_enums(
    path: &Path,
    source: &str,
    node: Node,
    ignore: &HashSet<String>,
    enums: &mut HashMap<String, EnumModel>,
) -> Result<()> {
    if node.kind() == "type_definition" {
        if let Some((body, names)) = typedef_enum_parts(source, node) {
            let names: Vec<String> = names.into_iter().filter(|n| !ignore.contains(n)).collect();
            if !names.is_empty() {
                let raw = read_enumerators(path, source, body)?;
                for name in names {
                    let model = EnumModel::resolve(name.as_str(), raw.clone());
                    enums.insert(name, model);
                }
            }
        }
    }

    // Recurse so declarations inside include guards are still found
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_typedef_enums(path, source, child, ignore, enums)?;
    }
    Ok(())
}

/// For a `type_definition` node that typedefs an enum with a body, return
/// the `enumerator_list` node and the typedef names. The typedef names are
/// the `type_identifier` children of the `type_definition` itself; an
/// optional enum tag sits inside the `enum_specifier` and is not one of
/// them.
fn typedef_enum_parts<'a>(source: &'a str, node: Node<'a>) -> Option<(Node<'a>, Vec<String>)> {
    let spec = node.child_by_field_name("type")?;
    if spec.kind() != "enum_specifier" {
        return None;
    }
    // A forward declaration (`typedef enum Tag Name;`) has no body
    let body = spec.child_by_field_name("body")?;

    let mut cursor = node.walk();
    let names: Vec<String> = node
        .children(&mut cursor)
        .filter(|c| c.kind() == "type_identifier")
        .map(|c| source[c.byte_range()].to_string())
        .collect();

    if names.is_empty() {
        return None;
    }
    Some((body, names))
}

fn read_enumerators(path: &Path, source: &str, body: Node) -> Result<Vec<RawEnumerator>> {
    let mut raw = Vec::new();
    let mut cursor = body.walk();
    for child in body.children(&mut cursor) {
        if child.kind() != "enumerator" {
            continue;
        }
        let Some(name_node) = child.child_by_field_name("name") else {
            continue;
        };
        let name = source[name_node.byte_range()].to_string();

        let literal = match child.child_by_field_name("value") {
            None => None,
            Some(value) if value.kind() == "number_literal" => {
                let text = &source[value.byte_range()];
                match parse_c_int(text) {
                    Some(v) => Some(v),
                    None => bail!(
                        "{}: cannot parse integer literal '{}' for enumerator '{}'",
                        node_location(path, value),
                        text,
                        name
                    ),
                }
            }
            Some(value) => bail!(
                "{}: unsupported initializer '{}' for enumerator '{}': only integer literals are handled",
                node_location(path, value),
                &source[value.byte_range()],
                name
            ),
        };

        raw.push(RawEnumerator {
            name,
            literal,
            location: node_location(path, child),
        });
    }
    Ok(raw)
}

fn node_location(path: &Path, node: Node) -> SourceLocation {
    let point = node.start_position();
    SourceLocation {
        file: path.to_path_buf(),
        line: point.row + 1,
        column: point.column + 1,
    }
}

/// Parse a C integer literal: decimal, hex, octal or binary, with an
/// optional unsigned/long suffix.
fn parse_c_int(text: &str) -> Option<i64> {
    let t = text.trim_end_matches(|c: char| matches!(c, 'u' | 'U' | 'l' | 'L'));
    if let Some(hex) = t.strip_prefix("0x").or_else(|| t.strip_prefix("0X")) {
        i64::from_str_radix(hex, 16).ok()
    } else if let Some(bin) = t.strip_prefix("0b").or_else(|| t.strip_prefix("0B")) {
        i64::from_str_radix(bin, 2).ok()
    } else if t.len() > 1 && t.starts_with('0') {
        i64::from_str_radix(&t[1..], 8).ok()
    } else {
        t.parse().ok()
    }
}
