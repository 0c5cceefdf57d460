//! Resolving program units and selections to declaration nodes.

use std::collections::HashSet;

use tracing::debug;

use crate::locate::selection::{validate_selection, Granularity};
use crate::locate::words::locate_word;
use crate::models::{Location, NamedLocation, ProgramUnit};
use crate::source::{Context, NodeId, NodeKind};

/// Every declaration of `unit` in the context, one entry per declaration
/// node. Absent units yield an empty list.
pub fn locate_unit(unit: &ProgramUnit, context: &Context) -> Vec<NamedLocation> {
    let tree = context.tree();
    let kind = unit.kind();
    let decl_kind = kind.declaration_kind();
    let candidates = locate_word(context.source(), unit.name());

    let mut seen: HashSet<NodeId> = HashSet::new();
    let mut found = Vec::new();
    let mut rejected = 0usize;

    for occurrence in &candidates {
        let analysis = validate_selection(context, occurrence, Granularity::WholeUnit);
        if !analysis.valid {
            rejected += 1;
            continue;
        }
        for covered in analysis.covered_nodes {
            let Some(decl) = tree.nearest(covered, decl_kind) else {
                continue;
            };
            if !tree.declares(decl, unit.name()) || !seen.insert(decl) {
                continue;
            }
            found.push(NamedLocation {
                location: context.location_of(decl),
                occurrence: occurrence.clone(),
                unit: kind,
                name: unit.name().to_string(),
                declaration: decl,
            });
        }
    }

    debug!(
        unit = %unit,
        source = context.source().name(),
        version = context.version(),
        candidates = candidates.len(),
        rejected,
        found = found.len(),
        "located program unit"
    );
    found
}

/// Distinct declarations of `kind` that a selection resolves to, in
/// document order. Invalid selections resolve to nothing. A selection of a
/// single identifier only resolves to a declaration of that name, so a use
/// site never stands in for its enclosing declaration.
pub fn resolve_selection(context: &Context, location: &Location, kind: NodeKind) -> Vec<NodeId> {
    let analysis = validate_selection(context, location, Granularity::WholeUnit);
    if !analysis.valid {
        return Vec::new();
    }
    let tree = context.tree();
    let identifier = match analysis.covered_nodes.as_slice() {
        [only] if tree.kind(*only) == NodeKind::Identifier => Some(tree.source_text(*only)),
        _ => None,
    };
    let mut seen = HashSet::new();
    analysis
        .covered_nodes
        .iter()
        .filter_map(|covered| tree.nearest(*covered, kind))
        .filter(|decl| match identifier {
            Some(name) => tree.declares(*decl, name),
            None => true,
        })
        .filter(|decl| seen.insert(*decl))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UnitKind;
    use crate::testing::{at, context, nth, PRECONDITIONS};

    #[test]
    fn test_locate_method_check() {
        let ctx = context(PRECONDITIONS);
        let found = locate_unit(&ProgramUnit::Method("check".to_string()), &ctx);
        assert_eq!(found.len(), 1);
        let hit = &found[0];
        assert_eq!(hit.unit, UnitKind::Method);
        assert_eq!(ctx.tree().kind(hit.declaration), NodeKind::MethodDeclaration);
        let decl_text = ctx.source().slice(&hit.location).unwrap();
        assert!(decl_text.starts_with("static void check("));
        assert_eq!(ctx.source().slice(&hit.occurrence), Some("check"));
    }

    #[test]
    fn test_locate_absent_field_is_empty() {
        let ctx = context(PRECONDITIONS);
        assert!(locate_unit(&ProgramUnit::Field("something".to_string()), &ctx).is_empty());
        assert!(locate_unit(&ProgramUnit::Method("verify".to_string()), &ctx).is_empty());
    }

    #[test]
    fn test_locate_parameter_and_class() {
        let ctx = context(PRECONDITIONS);
        let params = locate_unit(&ProgramUnit::Parameter("message".to_string()), &ctx);
        assert_eq!(params.len(), 1);
        assert_eq!(ctx.source().slice(&params[0].location), Some("String message"));

        let classes = locate_unit(&ProgramUnit::Class("Preconditions".to_string()), &ctx);
        assert_eq!(classes.len(), 1);
        assert_eq!(classes[0].location.start, ctx.text().find("class").unwrap());
    }

    #[test]
    fn test_locate_dedups_recursive_references() {
        let text = "class A {\n    int fib(int n) {\n        return n < 2 ? n : fib(n - 1) + fib(n - 2);\n    }\n}\n";
        let ctx = context(text);
        let found = locate_unit(&ProgramUnit::Method("fib".to_string()), &ctx);
        assert_eq!(found.len(), 1);
        let params = locate_unit(&ProgramUnit::Parameter("n".to_string()), &ctx);
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_locate_overloads_are_distinct() {
        let text = "class A {\n    void run() {}\n    void run(int x) {}\n}\n";
        let ctx = context(text);
        let found = locate_unit(&ProgramUnit::Method("run".to_string()), &ctx);
        assert_eq!(found.len(), 2);
        assert_ne!(found[0].declaration, found[1].declaration);
    }

    #[test]
    fn test_locate_field_in_multi_declarator() {
        let text = "class A {\n    private int a, b;\n}\n";
        let ctx = context(text);
        assert_eq!(locate_unit(&ProgramUnit::Field("b".to_string()), &ctx).len(), 1);
    }

    #[test]
    fn test_name_in_string_or_comment_is_ignored() {
        let text = "class A {\n    // check me\n    String s = \"check\";\n}\n";
        let ctx = context(text);
        assert!(locate_unit(&ProgramUnit::Method("check".to_string()), &ctx).is_empty());
    }

    #[test]
    fn test_resolve_selection_kinds() {
        let ctx = context(PRECONDITIONS);
        let name = at(&ctx, "check");
        let methods = resolve_selection(&ctx, &name, NodeKind::MethodDeclaration);
        assert_eq!(methods.len(), 1);
        assert!(resolve_selection(&ctx, &name, NodeKind::FieldDeclaration).is_empty());
        // `check` names a method, not the class around it
        assert!(resolve_selection(&ctx, &name, NodeKind::ClassDeclaration).is_empty());
        let class_name = at(&ctx, "Preconditions");
        let classes = resolve_selection(&ctx, &class_name, NodeKind::ClassDeclaration);
        assert_eq!(ctx.tree().name(classes[0]), Some("Preconditions"));
    }

    #[test]
    fn test_call_site_does_not_resolve_to_enclosing_method() {
        let text = "class A {\n    void check() {}\n    void run() { check(); }\n}\n";
        let ctx = context(text);
        let call = nth(&ctx, "check", 1);
        assert!(resolve_selection(&ctx, &call, NodeKind::MethodDeclaration).is_empty());
        let declared = nth(&ctx, "check", 0);
        let methods = resolve_selection(&ctx, &declared, NodeKind::MethodDeclaration);
        assert_eq!(methods.len(), 1);
        assert_eq!(ctx.tree().name(methods[0]), Some("check"));
    }

    #[test]
    fn test_statement_selection_climbs_to_method() {
        let ctx = context(PRECONDITIONS);
        let stmt = at(&ctx, "if (!cond) throw new IllegalArgumentException(message);");
        let methods = resolve_selection(&ctx, &stmt, NodeKind::MethodDeclaration);
        assert_eq!(methods.len(), 1);
        assert_eq!(ctx.tree().name(methods[0]), Some("check"));
    }

    #[test]
    fn test_range_across_body_statements_climbs_to_method() {
        let text = "class A {\n    void run() {\n        int x = 1;\n        x++;\n    }\n}\n";
        let ctx = context(text);
        let start = text.find("x = 1").unwrap();
        let end = text.find("x++").unwrap() + 2;
        let loc = ctx.source().location(start, end).unwrap();
        let methods = resolve_selection(&ctx, &loc, NodeKind::MethodDeclaration);
        assert_eq!(methods.len(), 1);
        assert_eq!(ctx.tree().name(methods[0]), Some("run"));
    }
}
