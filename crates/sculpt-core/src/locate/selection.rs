//! Selection validity: does a byte range line up with whole syntax?

use serde::Serialize;

use crate::models::Location;
use crate::source::{Context, NodeId, NodeKind, SyntaxTree};

/// How coarse a selection may be and still count as valid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    /// Whole nodes or runs of whole statements/declarations.
    #[default]
    Statements,
    /// Additionally accept a range inside a declaration's body that cuts
    /// across its statements, resolving to the body; callers climb from
    /// there to the declaration. Text whose statements were merged by a
    /// reformat still selects its unit this way.
    WholeUnit,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SelectionAnalysis {
    pub valid: bool,
    pub covered_nodes: Vec<NodeId>,
    /// Deepest node containing the trimmed selection.
    pub covering_node: Option<NodeId>,
}

impl SelectionAnalysis {
    fn invalid(covering_node: Option<NodeId>) -> Self {
        Self {
            valid: false,
            covered_nodes: Vec::new(),
            covering_node,
        }
    }

    fn valid(covered_nodes: Vec<NodeId>, covering_node: NodeId) -> Self {
        Self {
            valid: true,
            covered_nodes,
            covering_node: Some(covering_node),
        }
    }
}

/// Shrink `start..end` so that it neither starts nor ends on whitespace.
pub fn trim_range(text: &str, start: usize, end: usize) -> (usize, usize) {
    let slice = &text[start..end];
    let leading = slice.len() - slice.trim_start().len();
    let trimmed = slice.trim();
    (start + leading, start + leading + trimmed.len())
}

pub fn validate_selection(
    context: &Context,
    location: &Location,
    granularity: Granularity,
) -> SelectionAnalysis {
    if context.source().slice(location).is_none() {
        return SelectionAnalysis::invalid(None);
    }
    let (start, end) = trim_range(context.text(), location.start, location.end);
    if start == end {
        return SelectionAnalysis::invalid(None);
    }
    analyze(context.tree(), start, end, granularity)
}

fn analyze(
    tree: &SyntaxTree,
    start: usize,
    end: usize,
    granularity: Granularity,
) -> SelectionAnalysis {
    let covering = tree.covering_node(start, end);
    let node = tree.node(covering);
    if node.start == start && node.end == end {
        return SelectionAnalysis::valid(vec![covering], covering);
    }
    if let Some(covered) = covered_sequence(tree, covering, start, end) {
        return SelectionAnalysis::valid(covered, covering);
    }
    if granularity == Granularity::WholeUnit && is_declaration_body(tree, covering) {
        return SelectionAnalysis::valid(vec![covering], covering);
    }
    SelectionAnalysis::invalid(Some(covering))
}

/// Whole named children of a container that the range covers, or `None`
/// when it cuts a child or takes bare punctuation.
fn covered_sequence(
    tree: &SyntaxTree,
    covering: NodeId,
    start: usize,
    end: usize,
) -> Option<Vec<NodeId>> {
    if !tree.kind(covering).is_container() {
        return None;
    }
    let mut covered = Vec::new();
    for child in tree.children(covering) {
        let c = tree.node(*child);
        if c.inside(start, end) {
            if c.is_empty() {
                continue;
            }
            if !c.named {
                return None;
            }
            covered.push(*child);
        } else if c.overlaps(start, end) {
            // partial token or partial expression
            return None;
        }
    }
    (!covered.is_empty()).then_some(covered)
}

fn is_declaration_body(tree: &SyntaxTree, id: NodeId) -> bool {
    matches!(tree.kind(id), NodeKind::Block | NodeKind::TypeBody)
        && tree
            .parent(id)
            .is_some_and(|p| tree.kind(p).is_declaration())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{at, context, PRECONDITIONS};

    #[test]
    fn test_whole_statement_is_valid() {
        let ctx = context(PRECONDITIONS);
        let loc = at(&ctx, "if (!cond) throw new IllegalArgumentException(message);");
        let analysis = validate_selection(&ctx, &loc, Granularity::Statements);
        assert!(analysis.valid);
        assert_eq!(analysis.covered_nodes.len(), 1);
        assert_eq!(ctx.tree().kind(analysis.covered_nodes[0]), NodeKind::Statement);
    }

    #[test]
    fn test_surrounding_whitespace_is_trimmed() {
        let ctx = context(PRECONDITIONS);
        let stmt = at(&ctx, "if (!cond)");
        let end = ctx.text().find(";\n    }").unwrap() + 2;
        let padded = ctx.source().location(stmt.start - 8, end).unwrap();
        let analysis = validate_selection(&ctx, &padded, Granularity::Statements);
        assert!(analysis.valid);
    }

    #[test]
    fn test_inside_token_is_invalid() {
        let ctx = context(PRECONDITIONS);
        let word = at(&ctx, "Preconditions");
        let inner = ctx.source().location(word.start + 1, word.end - 1).unwrap();
        assert!(!validate_selection(&ctx, &inner, Granularity::Statements).valid);
        assert!(!validate_selection(&ctx, &inner, Granularity::WholeUnit).valid);
    }

    #[test]
    fn test_partial_expression_is_invalid() {
        let ctx = context(PRECONDITIONS);
        let loc = at(&ctx, "(!cond) throw");
        assert!(!validate_selection(&ctx, &loc, Granularity::Statements).valid);
    }

    #[test]
    fn test_run_of_declarations_is_valid() {
        let text = "class A {\n    int a;\n    int b;\n    int c;\n}\n";
        let ctx = context(text);
        let start = text.find("int a;").unwrap();
        let end = text.find("int b;").unwrap() + "int b;".len();
        let loc = ctx.source().location(start, end).unwrap();
        let analysis = validate_selection(&ctx, &loc, Granularity::Statements);
        assert!(analysis.valid);
        assert_eq!(analysis.covered_nodes.len(), 2);
        assert_eq!(
            ctx.tree().kind(analysis.covering_node.unwrap()),
            NodeKind::TypeBody
        );
    }

    #[test]
    fn test_bare_punctuation_is_invalid() {
        let text = "class A {\n    int a;\n}\n";
        let ctx = context(text);
        let start = text.find("int a;").unwrap();
        let end = text.rfind('}').unwrap() + 1;
        let loc = ctx.source().location(start, end).unwrap();
        assert!(!validate_selection(&ctx, &loc, Granularity::Statements).valid);
    }

    #[test]
    fn test_whole_unit_accepts_range_across_body_statements() {
        let text = "class A {\n    void run() {\n        int x = 1;\n        x++;\n    }\n}\n";
        let ctx = context(text);
        let start = text.find("x = 1").unwrap();
        let end = text.find("x++").unwrap() + 2;
        let loc = ctx.source().location(start, end).unwrap();
        assert!(!validate_selection(&ctx, &loc, Granularity::Statements).valid);
        let analysis = validate_selection(&ctx, &loc, Granularity::WholeUnit);
        assert!(analysis.valid);
        assert_eq!(analysis.covered_nodes.len(), 1);
        assert_eq!(ctx.tree().kind(analysis.covered_nodes[0]), NodeKind::Block);
        assert_eq!(analysis.covering_node, Some(analysis.covered_nodes[0]));
    }

    #[test]
    fn test_whole_unit_still_rejects_partial_expression() {
        let ctx = context(PRECONDITIONS);
        let loc = at(&ctx, "(!cond) throw");
        assert!(!validate_selection(&ctx, &loc, Granularity::WholeUnit).valid);
    }

    #[test]
    fn test_location_from_other_version_is_invalid() {
        let ctx = context(PRECONDITIONS);
        let mut loc = at(&ctx, "check");
        loc.version = 3;
        let analysis = validate_selection(&ctx, &loc, Granularity::WholeUnit);
        assert!(!analysis.valid);
        assert_eq!(analysis.covering_node, None);
    }

    #[test]
    fn test_whitespace_only_selection_is_invalid() {
        let ctx = context(PRECONDITIONS);
        let newline = ctx.text().find("\n\n").unwrap();
        let loc = ctx.source().location(newline, newline + 2).unwrap();
        assert!(!validate_selection(&ctx, &loc, Granularity::Statements).valid);
    }
}
