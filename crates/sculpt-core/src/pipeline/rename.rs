//! Scope-aware reference collection for renames.
//!
//! Each declaration kind has a defining scope (method, type body or
//! compilation unit). Inside that scope an identifier is rewritten only when
//! it resolves to the declaration being renamed: shadowing bindings between
//! the use and the scope, member accesses on other objects and overloads of
//! a different arity are left untouched.

use crate::errors::ChangeFailure;
use crate::pipeline::edits::TextEdit;
use crate::source::java::{argument_count, in_header, is_varargs, parameter_count};
use crate::source::{NodeId, NodeKind, SyntaxTree};

/// Edits renaming the declaration `decl` (whose identifier node is
/// `name_node`) and every reference to it.
pub fn rename_edits(
    tree: &SyntaxTree,
    decl: NodeId,
    name_node: NodeId,
    new_name: &str,
) -> Result<Vec<TextEdit>, ChangeFailure> {
    let name = tree.source_text(name_node);
    let references = match tree.kind(decl) {
        NodeKind::ParameterDeclaration => parameter_references(tree, decl, name),
        NodeKind::FieldDeclaration => field_references(tree, decl, name),
        NodeKind::MethodDeclaration => method_references(tree, decl, name),
        NodeKind::ClassDeclaration => class_references(tree, decl, name),
        other => {
            return Err(ChangeFailure::UnresolvedTarget(format!(
                "cannot rename a {other:?} node"
            )))
        }
    };
    let to_edit = |id: NodeId| {
        let node = tree.node(id);
        TextEdit::replace(node.start, node.end, new_name)
    };
    let mut edits = vec![to_edit(name_node)];
    edits.extend(references.into_iter().map(to_edit));
    Ok(edits)
}

// ---------------------------------------------------------------------------
// Identifier classification
// ---------------------------------------------------------------------------

fn parent_grammar(tree: &SyntaxTree, id: NodeId) -> &'static str {
    tree.parent(id).map(|p| tree.grammar(p)).unwrap_or("")
}

fn is_first_child(tree: &SyntaxTree, id: NodeId) -> bool {
    tree.parent(id)
        .and_then(|p| tree.children(p).first().copied())
        == Some(id)
}

/// True for a bare identifier used as a value: not a declaration name, not a
/// member selected off another expression, not a label or package segment.
fn is_value_reference(tree: &SyntaxTree, id: NodeId) -> bool {
    if tree.grammar(id) != "identifier" {
        return false;
    }
    let node = tree.node(id);
    if matches!(node.field, Some("name") | Some("field")) {
        return false;
    }
    match parent_grammar(tree, id) {
        "labeled_statement" | "break_statement" | "continue_statement" | "scoped_identifier"
        | "marker_annotation" | "annotation" | "inferred_parameters" => false,
        "lambda_expression" => node.field != Some("parameters"),
        "method_reference" => is_first_child(tree, id),
        _ => !in_header(tree, id),
    }
}

// ---------------------------------------------------------------------------
// Bindings and shadowing
// ---------------------------------------------------------------------------

fn declarators_bind(tree: &SyntaxTree, decl: NodeId, name: &str) -> bool {
    tree.children_by_field(decl, "declarator")
        .into_iter()
        .any(|d| tree.name(d) == Some(name))
}

fn parameters_bind(tree: &SyntaxTree, params: NodeId, name: &str) -> bool {
    match tree.grammar(params) {
        "identifier" => tree.source_text(params) == name,
        "inferred_parameters" => tree
            .children(params)
            .iter()
            .any(|c| tree.grammar(*c) == "identifier" && tree.source_text(*c) == name),
        _ => tree.children(params).iter().any(|c| {
            tree.kind(*c) == NodeKind::ParameterDeclaration && tree.name(*c) == Some(name)
        }),
    }
}

/// Whether `scope` introduces a binding of `name` visible at byte `at`.
fn binds(tree: &SyntaxTree, scope: NodeId, name: &str, at: usize) -> bool {
    match tree.grammar(scope) {
        "method_declaration" | "constructor_declaration" | "lambda_expression" => tree
            .child_by_field(scope, "parameters")
            .is_some_and(|p| parameters_bind(tree, p, name)),
        "catch_clause" => tree.children(scope).iter().any(|c| {
            tree.grammar(*c) == "catch_formal_parameter"
                && tree
                    .child_by_field(*c, "name")
                    .is_some_and(|n| tree.source_text(n) == name)
        }),
        "for_statement" => tree
            .children_by_field(scope, "init")
            .into_iter()
            .any(|init| declarators_bind(tree, init, name)),
        "enhanced_for_statement" => tree
            .child_by_field(scope, "name")
            .is_some_and(|n| tree.source_text(n) == name),
        "try_with_resources_statement" => tree
            .child_by_field(scope, "resources")
            .is_some_and(|resources| {
                tree.children(resources).iter().any(|r| {
                    tree.child_by_field(*r, "name")
                        .is_some_and(|n| tree.source_text(n) == name)
                })
            }),
        "block" | "constructor_body" | "switch_block_statement_group" => {
            tree.children(scope).iter().any(|c| {
                tree.grammar(*c) == "local_variable_declaration"
                    && tree.node(*c).start < at
                    && declarators_bind(tree, *c, name)
            })
        }
        _ if tree.kind(scope) == NodeKind::TypeBody => tree.children(scope).iter().any(|c| {
            tree.kind(*c) == NodeKind::FieldDeclaration && tree.declares(*c, name)
        }),
        _ => false,
    }
}

/// True when a binding of `name` nearer than `scope` hides it at `id`.
fn shadowed(tree: &SyntaxTree, id: NodeId, scope: NodeId, name: &str) -> bool {
    let at = tree.node(id).start;
    tree.ancestors(id)
        .take_while(|a| *a != scope)
        .any(|a| binds(tree, a, name, at))
}

fn identifiers_named<'a>(
    tree: &'a SyntaxTree,
    scope: NodeId,
    name: &'a str,
) -> impl Iterator<Item = NodeId> + 'a {
    tree.descendants(scope).into_iter().filter(move |id| {
        tree.kind(*id) == NodeKind::Identifier && tree.source_text(*id) == name
    })
}

fn enclosing_class_name(tree: &SyntaxTree, member: NodeId) -> Option<&str> {
    tree.ancestors(member)
        .find(|a| tree.kind(*a) == NodeKind::ClassDeclaration)
        .and_then(|c| tree.name(c))
}

// ---------------------------------------------------------------------------
// Per-kind references
// ---------------------------------------------------------------------------

fn parameter_references(tree: &SyntaxTree, decl: NodeId, name: &str) -> Vec<NodeId> {
    let Some(owner) = tree.parent(decl).and_then(|list| tree.parent(list)) else {
        return Vec::new();
    };
    identifiers_named(tree, owner, name)
        .filter(|id| !tree.is_within(*id, decl))
        .filter(|id| is_value_reference(tree, *id))
        .filter(|id| !shadowed(tree, *id, owner, name))
        .collect()
}

fn field_references(tree: &SyntaxTree, decl: NodeId, name: &str) -> Vec<NodeId> {
    let Some(body) = tree.parent(decl) else {
        return Vec::new();
    };
    let class_name = enclosing_class_name(tree, decl);
    identifiers_named(tree, body, name)
        .filter(|id| !tree.is_within(*id, decl) || !is_declarator_name(tree, *id))
        .filter(|id| {
            let parent = tree.parent(*id);
            if parent_grammar(tree, *id) == "field_access" && tree.node(*id).field == Some("field")
            {
                let Some(object) = parent.and_then(|p| tree.child_by_field(p, "object")) else {
                    return false;
                };
                return match tree.grammar(object) {
                    "this" => nearest_body(tree, *id) == Some(body),
                    "identifier" => Some(tree.source_text(object)) == class_name,
                    _ => false,
                };
            }
            is_value_reference(tree, *id) && !shadowed(tree, *id, body, name)
        })
        .collect()
}

fn is_declarator_name(tree: &SyntaxTree, id: NodeId) -> bool {
    tree.node(id).field == Some("name")
        && tree
            .parent(id)
            .is_some_and(|p| tree.kind(p) == NodeKind::VariableDeclarator)
}

fn nearest_body(tree: &SyntaxTree, id: NodeId) -> Option<NodeId> {
    tree.ancestors(id)
        .find(|a| tree.kind(*a) == NodeKind::TypeBody)
}

fn redeclares_method(tree: &SyntaxTree, body: NodeId, name: &str) -> bool {
    tree.children(body).iter().any(|c| {
        tree.kind(*c) == NodeKind::MethodDeclaration && tree.name(*c) == Some(name)
    })
}

fn method_references(tree: &SyntaxTree, decl: NodeId, name: &str) -> Vec<NodeId> {
    let Some(body) = tree.parent(decl) else {
        return Vec::new();
    };
    let class_name = enclosing_class_name(tree, decl);
    let arity = parameter_count(tree, decl);
    let varargs = is_varargs(tree, decl);
    let arity_matches = |count: usize| {
        if varargs {
            count + 1 >= arity
        } else {
            count == arity
        }
    };
    let hidden_by_nested = |id: NodeId| {
        tree.ancestors(id)
            .take_while(|a| *a != body)
            .any(|a| tree.kind(a) == NodeKind::TypeBody && redeclares_method(tree, a, name))
    };

    identifiers_named(tree, body, name)
        .filter(|id| {
            let Some(parent) = tree.parent(*id) else {
                return false;
            };
            match tree.grammar(parent) {
                "method_invocation" if tree.node(*id).field == Some("name") => {
                    let qualifier_ok = match tree.child_by_field(parent, "object") {
                        None => !hidden_by_nested(*id),
                        Some(object) => match tree.grammar(object) {
                            "this" => nearest_body(tree, *id) == Some(body),
                            "identifier" => Some(tree.source_text(object)) == class_name,
                            _ => false,
                        },
                    };
                    qualifier_ok && argument_count(tree, parent).is_some_and(arity_matches)
                }
                "method_reference" if !is_first_child(tree, *id) => {
                    match tree.children(parent).first() {
                        Some(first) => match tree.grammar(*first) {
                            "this" => true,
                            "identifier" | "type_identifier" => {
                                Some(tree.source_text(*first)) == class_name
                            }
                            _ => false,
                        },
                        None => false,
                    }
                }
                _ => false,
            }
        })
        .collect()
}

fn class_references(tree: &SyntaxTree, decl: NodeId, name: &str) -> Vec<NodeId> {
    identifiers_named(tree, tree.root(), name)
        .filter(|id| !in_header(tree, *id))
        .filter(|id| {
            if tree.grammar(*id) == "type_identifier" {
                return true;
            }
            let Some(parent) = tree.parent(*id) else {
                return false;
            };
            let field = tree.node(*id).field;
            match tree.grammar(parent) {
                "method_invocation" | "field_access" => field == Some("object"),
                "method_reference" => is_first_child(tree, *id),
                "constructor_declaration" => {
                    field == Some("name")
                        && tree
                            .ancestors(parent)
                            .find(|a| tree.kind(*a) == NodeKind::ClassDeclaration)
                            == Some(decl)
                }
                _ => false,
            }
        })
        .collect()
}
