//! Java-specific structural queries over the arena tree.

use crate::source::tree::{NodeId, NodeKind, SyntaxTree};

/// The `modifiers` child of a declaration, if present.
pub fn modifiers(tree: &SyntaxTree, decl: NodeId) -> Option<NodeId> {
    tree.children(decl)
        .iter()
        .copied()
        .find(|c| tree.grammar(*c) == "modifiers")
}

pub fn has_modifier(tree: &SyntaxTree, decl: NodeId, keyword: &str) -> bool {
    modifiers(tree, decl).is_some_and(|m| {
        tree.children(m)
            .iter()
            .any(|c| tree.grammar(*c) == keyword)
    })
}

/// True when the declaration carries `@name` (marker or full annotation).
pub fn has_annotation(tree: &SyntaxTree, decl: NodeId, name: &str) -> bool {
    modifiers(tree, decl).is_some_and(|m| {
        tree.children(m).iter().any(|c| {
            matches!(tree.grammar(*c), "marker_annotation" | "annotation")
                && tree
                    .child_by_field(*c, "name")
                    .is_some_and(|n| tree.source_text(n) == name)
        })
    })
}

/// Identifier and type-identifier nodes under `root`, in document order.
pub fn identifiers(tree: &SyntaxTree, root: NodeId) -> impl Iterator<Item = NodeId> + '_ {
    tree.descendants(root)
        .into_iter()
        .filter(move |id| tree.kind(*id) == NodeKind::Identifier)
}

/// True for identifiers that name a declaration rather than use one.
pub fn is_declaration_name(tree: &SyntaxTree, id: NodeId) -> bool {
    let Some(parent) = tree.parent(id) else {
        return false;
    };
    tree.node(id).field == Some("name")
        && (tree.kind(parent).is_declaration()
            || tree.kind(parent) == NodeKind::VariableDeclarator
            || tree.grammar(parent) == "enum_constant")
}

/// True when `id` sits inside an import or package declaration.
pub fn in_header(tree: &SyntaxTree, id: NodeId) -> bool {
    tree.ancestors(id)
        .any(|a| matches!(tree.kind(a), NodeKind::Import | NodeKind::Package))
}

/// Number of arguments at an invocation node.
pub fn argument_count(tree: &SyntaxTree, invocation: NodeId) -> Option<usize> {
    let args = tree.child_by_field(invocation, "arguments")?;
    Some(
        tree.children(args)
            .iter()
            .filter(|c| tree.node(**c).named && tree.kind(**c) != NodeKind::Comment)
            .count(),
    )
}

/// Number of formal parameters a method or constructor declares.
pub fn parameter_count(tree: &SyntaxTree, method: NodeId) -> usize {
    tree.child_by_field(method, "parameters")
        .map(|p| {
            tree.children(p)
                .iter()
                .filter(|c| tree.kind(**c) == NodeKind::ParameterDeclaration)
                .count()
        })
        .unwrap_or(0)
}

pub fn is_varargs(tree: &SyntaxTree, method: NodeId) -> bool {
    tree.child_by_field(method, "parameters").is_some_and(|p| {
        tree.children(p)
            .iter()
            .any(|c| tree.grammar(*c) == "spread_parameter")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::context;

    fn method(tree: &SyntaxTree, name: &str) -> NodeId {
        tree.ids()
            .find(|id| {
                tree.kind(*id) == NodeKind::MethodDeclaration && tree.name(*id) == Some(name)
            })
            .unwrap()
    }

    #[test]
    fn test_modifiers_and_annotations() {
        let ctx = context(
            "class A {\n    @Override\n    public String toString() { return \"\"; }\n    private void helper() {}\n}\n",
        );
        let tree = ctx.tree();
        let to_string = method(tree, "toString");
        assert!(has_annotation(tree, to_string, "Override"));
        assert!(has_modifier(tree, to_string, "public"));
        assert!(!has_modifier(tree, to_string, "private"));
        let helper = method(tree, "helper");
        assert!(has_modifier(tree, helper, "private"));
        assert!(!has_annotation(tree, helper, "Override"));
    }

    #[test]
    fn test_argument_and_parameter_counts() {
        let ctx = context(
            "class A {\n    void m(int a, String... rest) { m(1, \"x\", \"y\"); }\n}\n",
        );
        let tree = ctx.tree();
        let m = method(tree, "m");
        assert_eq!(parameter_count(tree, m), 2);
        assert!(is_varargs(tree, m));
        let call = tree
            .ids()
            .find(|id| tree.grammar(*id) == "method_invocation")
            .unwrap();
        assert_eq!(argument_count(tree, call), Some(3));
    }

    #[test]
    fn test_declaration_names_versus_uses() {
        let ctx = context("class A {\n    int x;\n    int y() { return x; }\n}\n");
        let tree = ctx.tree();
        let xs: Vec<NodeId> = identifiers(tree, tree.root())
            .filter(|id| tree.source_text(*id) == "x")
            .collect();
        assert_eq!(xs.len(), 2);
        assert!(is_declaration_name(tree, xs[0]));
        assert!(!is_declaration_name(tree, xs[1]));
    }
}
