//! Removal ranges for declarations, parameters and call-site arguments.

use crate::errors::ChangeFailure;
use crate::pipeline::edits::TextEdit;
use crate::source::java::{argument_count, parameter_count};
use crate::source::{NodeId, NodeKind, SyntaxTree};

fn is_horizontal_space(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

/// Comments directly above `id` with no blank line in between.
fn attached_comment_start(tree: &SyntaxTree, id: NodeId) -> usize {
    let text = tree.text().as_bytes();
    let mut start = tree.node(id).start;
    let mut current = id;
    while let Some(prev) = tree.prev_sibling(current) {
        if tree.kind(prev) != NodeKind::Comment {
            break;
        }
        let gap = &text[tree.node(prev).end..start];
        let newlines = gap.iter().filter(|b| **b == b'\n').count();
        if newlines > 1 || !gap.iter().all(|b| b.is_ascii_whitespace()) {
            break;
        }
        // a trailing comment on the previous code line belongs to that line
        let line_start = text[..tree.node(prev).start]
            .iter()
            .rposition(|b| *b == b'\n')
            .map(|p| p + 1)
            .unwrap_or(0);
        if !text[line_start..tree.node(prev).start]
            .iter()
            .all(|b| is_horizontal_space(*b))
        {
            break;
        }
        start = tree.node(prev).start;
        current = prev;
    }
    start
}

/// Full removal range of a declaration: attached leading comments, the
/// indentation before it and the line break after it when it occupies whole
/// lines.
pub fn removal_range(tree: &SyntaxTree, id: NodeId) -> (usize, usize) {
    let text = tree.text().as_bytes();
    let mut start = attached_comment_start(tree, id);
    let mut end = tree.node(id).end;

    let mut line_start = start;
    while line_start > 0 && is_horizontal_space(text[line_start - 1]) {
        line_start -= 1;
    }
    let owns_line_start = line_start == 0 || text[line_start - 1] == b'\n';

    let mut line_end = end;
    while line_end < text.len() && is_horizontal_space(text[line_end]) {
        line_end += 1;
    }
    let owns_line_end =
        line_end == text.len() || text[line_end] == b'\n' || text[line_end] == b'\r';

    if owns_line_start && owns_line_end {
        start = line_start;
        end = line_end;
        if text.get(end) == Some(&b'\r') {
            end += 1;
        }
        if text.get(end) == Some(&b'\n') {
            end += 1;
        }
    } else if owns_line_end {
        // keep the line break, drop trailing spaces
        end = line_end;
        start = line_start;
    }
    (start, end)
}

/// Removal range for one element of a comma-separated list, taking one
/// adjacent comma with it.
fn list_element_range(tree: &SyntaxTree, element: NodeId) -> (usize, usize) {
    let node = tree.node(element);
    if let Some(next) = tree.next_sibling(element) {
        if tree.grammar(next) == "," {
            let following = tree
                .next_sibling(next)
                .map(|n| tree.node(n).start)
                .unwrap_or(tree.node(next).end);
            return (node.start, following);
        }
    }
    if let Some(prev) = tree.prev_sibling(element) {
        if tree.grammar(prev) == "," {
            return (tree.node(prev).start, node.end);
        }
    }
    (node.start, node.end)
}

/// Edits deleting a declaration. Parameters also drop the matching argument
/// at every same-file call site.
pub fn delete_edits(tree: &SyntaxTree, decl: NodeId) -> Result<Vec<TextEdit>, ChangeFailure> {
    match tree.kind(decl) {
        NodeKind::ParameterDeclaration => parameter_edits(tree, decl),
        NodeKind::ClassDeclaration
        | NodeKind::MethodDeclaration
        | NodeKind::FieldDeclaration
        | NodeKind::Import
        | NodeKind::Package => {
            let (start, end) = removal_range(tree, decl);
            Ok(vec![TextEdit::delete(start, end)])
        }
        other => Err(ChangeFailure::UnresolvedTarget(format!(
            "cannot delete a {other:?} node"
        ))),
    }
}

/// Edits deleting one variable of a field declaration, with one adjacent
/// comma. A declaration of a single variable is removed whole.
pub fn declarator_edits(
    tree: &SyntaxTree,
    declarator: NodeId,
) -> Result<Vec<TextEdit>, ChangeFailure> {
    let field = tree
        .parent(declarator)
        .filter(|p| tree.kind(*p) == NodeKind::FieldDeclaration)
        .ok_or_else(|| ChangeFailure::UnresolvedTarget("declarator outside a field".to_string()))?;
    if tree.children_by_field(field, "declarator").len() <= 1 {
        return delete_edits(tree, field);
    }
    let (start, end) = list_element_range(tree, declarator);
    Ok(vec![TextEdit::delete(start, end)])
}

fn parameter_edits(tree: &SyntaxTree, param: NodeId) -> Result<Vec<TextEdit>, ChangeFailure> {
    let list = tree
        .parent(param)
        .ok_or_else(|| ChangeFailure::UnresolvedTarget("parameter has no list".to_string()))?;
    let owner = tree
        .parent(list)
        .ok_or_else(|| ChangeFailure::UnresolvedTarget("parameter has no owner".to_string()))?;
    let index = tree
        .children(list)
        .iter()
        .filter(|c| tree.kind(**c) == NodeKind::ParameterDeclaration)
        .position(|c| *c == param)
        .ok_or_else(|| ChangeFailure::UnresolvedTarget("parameter not in list".to_string()))?;

    let (start, end) = list_element_range(tree, param);
    let mut edits = vec![TextEdit::delete(start, end)];
    if tree.kind(owner) == NodeKind::MethodDeclaration {
        for call in call_sites(tree, owner) {
            if let Some(arg) = nth_argument(tree, call, index) {
                let (start, end) = list_element_range(tree, arg);
                edits.push(TextEdit::delete(start, end));
            }
        }
    }
    Ok(edits)
}

fn nth_argument(tree: &SyntaxTree, call: NodeId, index: usize) -> Option<NodeId> {
    let args = tree.child_by_field(call, "arguments")?;
    tree.children(args)
        .iter()
        .copied()
        .filter(|c| tree.node(*c).named && tree.kind(*c) != NodeKind::Comment)
        .nth(index)
}

/// Invocations in this file that target `method`: same name and arity, and
/// for constructors `new Type(..)` of the enclosing class.
fn call_sites(tree: &SyntaxTree, method: NodeId) -> Vec<NodeId> {
    let arity = parameter_count(tree, method);
    let class_name = tree
        .ancestors(method)
        .find(|a| tree.kind(*a) == NodeKind::ClassDeclaration)
        .and_then(|c| tree.name(c));
    let is_constructor = tree.grammar(method) == "constructor_declaration";
    let Some(name) = tree.name(method) else {
        return Vec::new();
    };

    tree.ids()
        .filter(|id| argument_count(tree, *id) == Some(arity))
        .filter(|id| match tree.grammar(*id) {
            "method_invocation" if !is_constructor => {
                let called = tree.child_by_field(*id, "name").map(|n| tree.source_text(n));
                let object_ok = match tree.child_by_field(*id, "object") {
                    None => true,
                    Some(object) => {
                        tree.grammar(object) == "this"
                            || Some(tree.source_text(object)) == class_name
                    }
                };
                called == Some(name) && object_ok
            }
            "object_creation_expression" if is_constructor => tree
                .child_by_field(*id, "type")
                .is_some_and(|t| Some(tree.source_text(t)) == class_name),
            "explicit_constructor_invocation" if is_constructor => tree
                .child_by_field(*id, "constructor")
                .is_some_and(|c| tree.grammar(c) == "this"),
            _ => false,
        })
        .collect()
}
