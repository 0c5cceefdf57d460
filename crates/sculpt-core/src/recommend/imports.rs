//! Import recommendations from referenced type names.

use std::collections::HashSet;

use indexmap::IndexSet;
use tracing::debug;

use crate::recommend::catalogue::CATALOGUE;
use crate::source::java::in_header;
use crate::source::{Context, NodeKind, SyntaxTree};

fn is_capitalized(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_ascii_uppercase())
}

/// Type names the code refers to: type identifiers plus capitalised
/// qualifiers of calls, field accesses and method references. Types and
/// type parameters declared in the file are excluded.
pub fn referenced_types(tree: &SyntaxTree) -> IndexSet<String> {
    let mut declared: HashSet<&str> = HashSet::new();
    let mut referenced: IndexSet<String> = IndexSet::new();

    for id in tree.ids() {
        match tree.grammar(id) {
            "type_parameter" => {
                if let Some(name) = tree
                    .children(id)
                    .iter()
                    .find(|c| matches!(tree.grammar(**c), "type_identifier" | "identifier"))
                {
                    declared.insert(tree.source_text(*name));
                }
            }
            _ if tree.kind(id) == NodeKind::ClassDeclaration => {
                if let Some(name) = tree.name(id) {
                    declared.insert(name);
                }
            }
            _ => {}
        }
    }

    for id in tree.ids() {
        if in_header(tree, id) {
            continue;
        }
        let candidate = match tree.grammar(id) {
            "type_identifier" => Some(id),
            "method_invocation" | "field_access" => tree.child_by_field(id, "object"),
            "method_reference" => tree.children(id).first().copied(),
            _ => None,
        };
        let Some(candidate) = candidate else { continue };
        if !matches!(tree.grammar(candidate), "identifier" | "type_identifier") {
            continue;
        }
        let name = tree.source_text(candidate);
        if is_capitalized(name) && !declared.contains(name) {
            referenced.insert(name.to_string());
        }
    }
    referenced
}

/// Recommend imports for every catalogue namespace the source draws on.
/// A namespace with at least `threshold` hits yields `namespace.*`;
/// otherwise one `namespace.Type` entry per hit. Each call evaluates every
/// namespace exactly once; nothing accumulates across calls.
pub fn recommend_imports(context: &Context, threshold: usize) -> IndexSet<String> {
    let types = referenced_types(context.tree());
    let mut result = IndexSet::new();

    for (namespace, known) in CATALOGUE {
        let hits: Vec<&str> = known
            .iter()
            .copied()
            .filter(|t| types.contains(*t))
            .collect();
        if hits.is_empty() {
            continue;
        }
        if hits.len() >= threshold {
            result.insert(format!("{namespace}.*"));
        } else {
            result.extend(hits.iter().map(|t| format!("{namespace}.{t}")));
        }
    }

    debug!(
        source = context.source().name(),
        version = context.version(),
        referenced = types.len(),
        recommended = result.len(),
        "recommended imports"
    );
    result
}
