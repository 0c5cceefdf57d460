//! Arena syntax tree with a closed set of node kinds.
//!
//! The grammar-specific parser converts its native tree into this shape once
//! per source version; everything downstream (selection analysis, unit
//! location, edit computation) walks the arena structurally instead of
//! holding parser-owned nodes with borrowed lifetimes.

use std::sync::Arc;

use serde::Serialize;

/// Index of a node inside its [`SyntaxTree`]. Doubles as node identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    CompilationUnit,
    Package,
    Import,
    /// class, interface, enum, record or annotation type
    ClassDeclaration,
    /// method or constructor
    MethodDeclaration,
    FieldDeclaration,
    VariableDeclarator,
    ParameterDeclaration,
    ParameterList,
    TypeBody,
    Block,
    Statement,
    Identifier,
    Literal,
    Comment,
    Error,
    Other,
    /// anonymous punctuation or keyword
    Token,
}

impl NodeKind {
    pub fn is_declaration(self) -> bool {
        matches!(
            self,
            NodeKind::Package
                | NodeKind::Import
                | NodeKind::ClassDeclaration
                | NodeKind::MethodDeclaration
                | NodeKind::FieldDeclaration
                | NodeKind::ParameterDeclaration
        )
    }

    /// Nodes whose children form a sequence a selection may cover piecewise.
    pub fn is_container(self) -> bool {
        matches!(
            self,
            NodeKind::CompilationUnit
                | NodeKind::TypeBody
                | NodeKind::Block
                | NodeKind::ParameterList
        )
    }

    pub fn is_statement_level(self) -> bool {
        self == NodeKind::Statement || self == NodeKind::Block || self.is_declaration()
    }
}

#[derive(Clone, Debug)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    /// Grammar-level kind name as reported by the parser.
    pub grammar: &'static str,
    pub start: usize,
    pub end: usize,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// Field name this node occupies in its parent, if any.
    pub field: Option<&'static str>,
    pub named: bool,
    /// Declared identifier for declaration kinds.
    pub name: Option<String>,
}

impl SyntaxNode {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, start: usize, end: usize) -> bool {
        self.start <= start && end <= self.end
    }

    pub fn inside(&self, start: usize, end: usize) -> bool {
        start <= self.start && self.end <= end
    }

    pub fn overlaps(&self, start: usize, end: usize) -> bool {
        self.start < end && start < self.end
    }
}

#[derive(Debug)]
pub struct SyntaxTree {
    text: Arc<str>,
    nodes: Vec<SyntaxNode>,
}

impl SyntaxTree {
    pub(crate) fn from_parts(text: Arc<str>, nodes: Vec<SyntaxNode>) -> Self {
        Self { text, nodes }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn node(&self, id: NodeId) -> &SyntaxNode {
        &self.nodes[id.index()]
    }

    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.node(id).kind
    }

    pub fn grammar(&self, id: NodeId) -> &'static str {
        self.node(id).grammar
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    pub fn source_text(&self, id: NodeId) -> &str {
        let node = self.node(id);
        &self.text[node.start..node.end]
    }

    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.node(id).name.as_deref()
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len() as u32).map(NodeId)
    }

    pub fn child_by_field(&self, id: NodeId, field: &str) -> Option<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .find(|c| self.node(*c).field == Some(field))
    }

    pub fn children_by_field(&self, id: NodeId, field: &str) -> Vec<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|c| self.node(*c).field == Some(field))
            .collect()
    }

    pub fn children_of_grammar(&self, id: NodeId, grammar: &str) -> Vec<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|c| self.node(*c).grammar == grammar)
            .collect()
    }

    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let siblings = self.children(parent);
        let pos = siblings.iter().position(|c| *c == id)?;
        pos.checked_sub(1).map(|p| siblings[p])
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let siblings = self.children(parent);
        let pos = siblings.iter().position(|c| *c == id)?;
        siblings.get(pos + 1).copied()
    }

    /// Strict ancestors, nearest first.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.parent(id),
        }
    }

    /// Nearest node of `kind`, starting at `id` itself.
    pub fn nearest(&self, id: NodeId, kind: NodeKind) -> Option<NodeId> {
        if self.kind(id) == kind {
            return Some(id);
        }
        self.ancestors(id).find(|a| self.kind(*a) == kind)
    }

    pub fn is_within(&self, id: NodeId, ancestor: NodeId) -> bool {
        id == ancestor || self.ancestors(id).any(|a| a == ancestor)
    }

    /// Pre-order walk of the subtree rooted at `id`, including `id`.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            out.push(current);
            for child in self.children(current).iter().rev() {
                stack.push(*child);
            }
        }
        out
    }

    /// Deepest node whose range contains `start..end`.
    pub fn covering_node(&self, start: usize, end: usize) -> NodeId {
        let mut current = self.root();
        loop {
            let next = self.children(current).iter().copied().find(|c| {
                let node = self.node(*c);
                node.contains(start, end) && (!node.is_empty() || start == end)
            });
            match next {
                Some(child) => current = child,
                None => return current,
            }
        }
    }

    /// Identifiers a declaration introduces. Field declarations may declare
    /// several variables at once.
    pub fn declared_names(&self, id: NodeId) -> Vec<&str> {
        match self.kind(id) {
            NodeKind::FieldDeclaration => self
                .children_by_field(id, "declarator")
                .into_iter()
                .filter_map(|d| self.name(d))
                .collect(),
            _ => self.name(id).into_iter().collect(),
        }
    }

    pub fn declares(&self, id: NodeId, name: &str) -> bool {
        self.declared_names(id).contains(&name)
    }

    /// The identifier node carrying a declaration's name.
    pub fn name_node(&self, id: NodeId) -> Option<NodeId> {
        match self.kind(id) {
            NodeKind::FieldDeclaration => self
                .child_by_field(id, "declarator")
                .and_then(|d| self.child_by_field(d, "name")),
            _ => self.child_by_field(id, "name"),
        }
    }
}

pub struct Ancestors<'a> {
    tree: &'a SyntaxTree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.parent(current);
        Some(current)
    }
}
