//! AST-provider capability and its tree-sitter Java implementation.

use std::sync::Arc;

use tracing::debug;

use crate::errors::{SculptError, SculptResult};
use crate::source::history::Source;
use crate::source::tree::{NodeId, NodeKind, SyntaxNode, SyntaxTree};

/// Turns source text into a [`SyntaxTree`], or fails with a parse error.
pub trait AstProvider: Send + Sync {
    fn language(&self) -> &'static str;

    fn parse(&self, source: &Source) -> SculptResult<SyntaxTree>;

    /// Parse raw text that has no source identity yet (re-validation of
    /// generated edits).
    fn parse_text(&self, name: &str, text: &str) -> SculptResult<SyntaxTree> {
        self.parse(&Source::new(name, text))
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct JavaParser;

impl AstProvider for JavaParser {
    fn language(&self) -> &'static str {
        "java"
    }

    fn parse(&self, source: &Source) -> SculptResult<SyntaxTree> {
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&tree_sitter_java::LANGUAGE.into())
            .map_err(|e| SculptError::Parse(format!("Failed to set language: {e}")))?;

        let tree = parser
            .parse(source.content().as_bytes(), None)
            .ok_or_else(|| SculptError::Parse(format!("Failed to parse {}", source.name())))?;

        let (syntax, first_error) = convert(&tree, source.shared_content());
        if tree.root_node().has_error() {
            let (row, column) = first_error.unwrap_or((0, 0));
            return Err(SculptError::Parse(format!(
                "{}@{}: syntax error at line {}, column {}",
                source.name(),
                source.version(),
                row + 1,
                column + 1
            )));
        }
        debug!(
            source = source.name(),
            version = source.version(),
            nodes = syntax.len(),
            "parsed java source"
        );
        Ok(syntax)
    }
}

const TYPE_DECLARATIONS: &[&str] = &[
    "class_declaration",
    "interface_declaration",
    "enum_declaration",
    "record_declaration",
    "annotation_type_declaration",
];

const TYPE_BODIES: &[&str] = &[
    "class_body",
    "interface_body",
    "enum_body",
    "enum_body_declarations",
    "annotation_type_body",
];

const STATEMENTS: &[&str] = &[
    "expression_statement",
    "local_variable_declaration",
    "if_statement",
    "while_statement",
    "for_statement",
    "enhanced_for_statement",
    "do_statement",
    "return_statement",
    "throw_statement",
    "try_statement",
    "try_with_resources_statement",
    "break_statement",
    "continue_statement",
    "yield_statement",
    "synchronized_statement",
    "labeled_statement",
    "assert_statement",
    "switch_statement",
    "explicit_constructor_invocation",
];

const LITERALS: &[&str] = &[
    "string_literal",
    "character_literal",
    "text_block",
    "decimal_integer_literal",
    "hex_integer_literal",
    "octal_integer_literal",
    "binary_integer_literal",
    "decimal_floating_point_literal",
    "hex_floating_point_literal",
    "null_literal",
    "true",
    "false",
];

fn classify(grammar: &str, named: bool, parent: Option<NodeKind>) -> NodeKind {
    if !named {
        return NodeKind::Token;
    }
    match grammar {
        "program" => NodeKind::CompilationUnit,
        "package_declaration" => NodeKind::Package,
        "import_declaration" => NodeKind::Import,
        "method_declaration" | "constructor_declaration" | "compact_constructor_declaration" => {
            NodeKind::MethodDeclaration
        }
        "field_declaration" | "constant_declaration" => NodeKind::FieldDeclaration,
        "variable_declarator" => NodeKind::VariableDeclarator,
        "formal_parameter" | "spread_parameter" => NodeKind::ParameterDeclaration,
        "formal_parameters" => NodeKind::ParameterList,
        "block" | "constructor_body" => NodeKind::Block,
        "identifier" | "type_identifier" => NodeKind::Identifier,
        "line_comment" | "block_comment" => NodeKind::Comment,
        "ERROR" => NodeKind::Error,
        // a switch used for its side effects sits directly in a block
        "switch_expression" if parent == Some(NodeKind::Block) => NodeKind::Statement,
        g if TYPE_DECLARATIONS.contains(&g) => NodeKind::ClassDeclaration,
        g if TYPE_BODIES.contains(&g) => NodeKind::TypeBody,
        g if STATEMENTS.contains(&g) => NodeKind::Statement,
        g if LITERALS.contains(&g) => NodeKind::Literal,
        _ => NodeKind::Other,
    }
}

/// Convert a tree-sitter tree into the arena form. Returns the first
/// error/missing node position, if any.
fn convert(tree: &tree_sitter::Tree, text: Arc<str>) -> (SyntaxTree, Option<(usize, usize)>) {
    let mut nodes: Vec<SyntaxNode> = Vec::new();
    let mut first_error = None;
    let mut cursor = tree.walk();
    let mut parents: Vec<NodeId> = Vec::new();

    loop {
        let ts_node = cursor.node();
        let parent = parents.last().copied();
        let parent_kind = parent.map(|p| nodes[p.index()].kind);
        if first_error.is_none() && (ts_node.is_error() || ts_node.is_missing()) {
            let pos = ts_node.start_position();
            first_error = Some((pos.row, pos.column));
        }
        let id = NodeId(nodes.len() as u32);
        nodes.push(SyntaxNode {
            kind: classify(ts_node.kind(), ts_node.is_named(), parent_kind),
            grammar: ts_node.kind(),
            start: ts_node.start_byte(),
            end: ts_node.end_byte(),
            parent,
            children: Vec::new(),
            field: cursor.field_name(),
            named: ts_node.is_named(),
            name: None,
        });
        if let Some(p) = parent {
            nodes[p.index()].children.push(id);
        }

        if cursor.goto_first_child() {
            parents.push(id);
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                assign_names(&mut nodes, &text);
                return (SyntaxTree::from_parts(text, nodes), first_error);
            }
            parents.pop();
        }
    }
}

fn assign_names(nodes: &mut [SyntaxNode], text: &str) {
    let field_child = |nodes: &[SyntaxNode], id: usize, field: &str| -> Option<usize> {
        nodes[id]
            .children
            .iter()
            .map(|c| c.index())
            .find(|c| nodes[*c].field == Some(field))
    };
    let grammar_child = |nodes: &[SyntaxNode], id: usize, grammar: &[&str]| -> Option<usize> {
        nodes[id]
            .children
            .iter()
            .map(|c| c.index())
            .find(|c| grammar.contains(&nodes[*c].grammar))
    };

    for id in 0..nodes.len() {
        let name_idx = match nodes[id].kind {
            NodeKind::ClassDeclaration
            | NodeKind::MethodDeclaration
            | NodeKind::VariableDeclarator => field_child(nodes, id, "name"),
            NodeKind::ParameterDeclaration => field_child(nodes, id, "name").or_else(|| {
                grammar_child(nodes, id, &["variable_declarator"])
                    .and_then(|d| field_child(nodes, d, "name"))
            }),
            NodeKind::FieldDeclaration => field_child(nodes, id, "declarator")
                .and_then(|d| field_child(nodes, d, "name")),
            NodeKind::Import | NodeKind::Package => {
                grammar_child(nodes, id, &["scoped_identifier", "identifier"])
            }
            _ => None,
        };
        let Some(name_idx) = name_idx else { continue };
        let mut name = text[nodes[name_idx].start..nodes[name_idx].end].to_string();
        if nodes[id].kind == NodeKind::Import && grammar_child(nodes, id, &["asterisk"]).is_some() {
            name.push_str(".*");
        }
        nodes[id].name = Some(name);
    }
}
