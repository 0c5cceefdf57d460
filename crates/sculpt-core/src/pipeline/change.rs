//! Turning change requests into validated changes.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::SculptConfig;
use crate::errors::ChangeFailure;
use crate::locate::{is_identifier, resolve_selection};
use crate::models::{Change, ChangeRequest, Location, Operation, Target, UnitKind};
use crate::pipeline::delete::{declarator_edits, delete_edits};
use crate::pipeline::edits::apply_edits;
use crate::pipeline::format::{BraceFormatter, Formatter};
use crate::pipeline::organize::organize_imports;
use crate::pipeline::rename::rename_edits;
use crate::source::{AstProvider, Context, JavaParser, NodeId, NodeKind};

const JAVA_KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "false", "final",
    "finally", "float", "for", "goto", "if", "implements", "import", "instanceof", "int",
    "interface", "long", "native", "new", "null", "package", "private", "protected", "public",
    "return", "short", "static", "strictfp", "super", "switch", "synchronized", "this", "throw",
    "throws", "transient", "true", "try", "void", "volatile", "while",
];

/// Parser, formatter and configuration shared by every session.
#[derive(Clone)]
pub struct Capabilities {
    pub parser: Arc<dyn AstProvider>,
    pub formatter: Arc<dyn Formatter>,
    pub config: Arc<SculptConfig>,
}

impl Capabilities {
    pub fn new(config: SculptConfig) -> Self {
        let formatter = BraceFormatter::new(config.indent_width);
        Self {
            parser: Arc::new(JavaParser),
            formatter: Arc::new(formatter),
            config: Arc::new(config),
        }
    }

    pub fn with_parser(mut self, parser: Arc<dyn AstProvider>) -> Self {
        self.parser = parser;
        self
    }

    pub fn with_formatter(mut self, formatter: Arc<dyn Formatter>) -> Self {
        self.formatter = formatter;
        self
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::new(SculptConfig::default())
    }
}

impl std::fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Capabilities")
            .field("parser", &self.parser.language())
            .field("formatter", &self.formatter.name())
            .field("config", &self.config)
            .finish()
    }
}

fn validate_new_name(request: &ChangeRequest) -> Result<&str, ChangeFailure> {
    let new_name = request.new_name().ok_or_else(|| {
        ChangeFailure::InvalidParameter(format!(
            "{} requires a new_name parameter",
            request.operation.as_str()
        ))
    })?;
    if !is_identifier(new_name) || JAVA_KEYWORDS.contains(&new_name) {
        return Err(ChangeFailure::InvalidParameter(format!(
            "'{new_name}' is not a valid identifier"
        )));
    }
    Ok(new_name)
}

/// Resolve a location to exactly one declaration of `kind`.
fn resolve_one(
    context: &Context,
    location: &Location,
    kind: NodeKind,
) -> Result<NodeId, ChangeFailure> {
    let found = resolve_selection(context, location, kind);
    match found.as_slice() {
        [] => Err(ChangeFailure::UnresolvedTarget(format!(
            "no {kind:?} at {location}"
        ))),
        [one] => Ok(*one),
        many => Err(ChangeFailure::AmbiguousTarget {
            what: format!("{kind:?} at {location}"),
            count: many.len(),
        }),
    }
}

/// The declarator a selection picks inside a field declaration. Without a
/// single overlapping declarator the field must declare exactly one.
fn selected_declarator(
    context: &Context,
    field: NodeId,
    location: &Location,
) -> Result<NodeId, ChangeFailure> {
    let tree = context.tree();
    let declarators = tree.children_by_field(field, "declarator");
    let chosen: Vec<NodeId> = declarators
        .iter()
        .copied()
        .filter(|d| tree.node(*d).overlaps(location.start, location.end))
        .collect();
    let candidates = if chosen.len() == 1 { chosen } else { declarators };
    match candidates.as_slice() {
        [one] => Ok(*one),
        [] => Err(ChangeFailure::UnresolvedTarget("field declares nothing".to_string())),
        many => Err(ChangeFailure::AmbiguousTarget {
            what: format!("field declaration at {location}"),
            count: many.len(),
        }),
    }
}

/// The identifier node to rewrite.
fn declared_name_node(
    context: &Context,
    decl: NodeId,
    location: &Location,
) -> Result<NodeId, ChangeFailure> {
    let tree = context.tree();
    let name = if tree.kind(decl) == NodeKind::FieldDeclaration {
        let declarator = selected_declarator(context, decl, location)?;
        tree.child_by_field(declarator, "name")
    } else {
        tree.name_node(decl)
    };
    name.ok_or_else(|| ChangeFailure::UnresolvedTarget("declaration has no name".to_string()))
}

fn selection(request: &ChangeRequest) -> Result<&Location, ChangeFailure> {
    match &request.target {
        Target::Selection(location) => Ok(location),
        _ => Err(ChangeFailure::InvalidParameter(format!(
            "{} requires a selection target",
            request.operation.as_str()
        ))),
    }
}

/// Compute the new text and a summary for a request.
fn compute(
    request: &ChangeRequest,
    context: &Context,
    capabilities: &Capabilities,
) -> Result<(String, String), ChangeFailure> {
    let tree = context.tree();
    let text = context.text();
    match request.operation {
        op if op.is_rename() => {
            let new_name = validate_new_name(request)?;
            let location = selection(request)?;
            let kind = op.unit_kind().unwrap_or(UnitKind::Class);
            let decl = resolve_one(context, location, kind.declaration_kind())?;
            let name_node = declared_name_node(context, decl, location)?;
            let old_name = tree.source_text(name_node).to_string();
            let edits = rename_edits(tree, decl, name_node, new_name)?;
            let summary = format!("rename {} '{old_name}' to '{new_name}'", kind.as_str());
            Ok((apply_edits(text, edits)?, summary))
        }
        op if op.is_delete() => {
            let location = selection(request)?;
            let kind = op.unit_kind().unwrap_or(UnitKind::Class);
            let decl = resolve_one(context, location, kind.declaration_kind())?;
            let (removed, edits) = if tree.kind(decl) == NodeKind::FieldDeclaration {
                let declarator = selected_declarator(context, decl, location)?;
                (declarator, declarator_edits(tree, declarator)?)
            } else {
                (decl, delete_edits(tree, decl)?)
            };
            let name = tree.name(removed).unwrap_or_default().to_string();
            let summary = format!("delete {} '{name}'", kind.as_str());
            Ok((apply_edits(text, edits)?, summary))
        }
        Operation::Reformat => Ok((
            capabilities.formatter.format(text),
            format!("reformat with {} formatter", capabilities.formatter.name()),
        )),
        Operation::OptimizeImports => Ok((
            organize_imports(context, capabilities.config.wildcard_threshold),
            "optimize imports".to_string(),
        )),
        Operation::ForIssue => {
            let Target::Issue(issue) = &request.target else {
                return Err(ChangeFailure::InvalidParameter(
                    "for-issue requires an issue target".to_string(),
                ));
            };
            let decl = resolve_one(context, &issue.location, issue.kind.target_kind())?;
            let name = tree.name(decl).unwrap_or_default().to_string();
            let summary = format!("fix {}: remove '{name}'", issue.kind.as_str());
            Ok((apply_edits(text, delete_edits(tree, decl)?)?, summary))
        }
        op => Err(ChangeFailure::InvalidParameter(format!(
            "unsupported operation {}",
            op.as_str()
        ))),
    }
}

/// Build the change a request describes against `context`. Never fails:
/// resolution problems and edits that do not re-parse produce an invalid
/// change carrying the reason.
pub fn create_change(
    request: ChangeRequest,
    context: &Context,
    capabilities: &Capabilities,
) -> Change {
    let base = context.source();
    let (name, version) = request.target_version();
    if name != base.name() || version != base.version() {
        let failure = ChangeFailure::StaleLocation {
            source_name: name.to_string(),
            selected: version,
            current: base.version(),
        };
        warn!(operation = request.operation.as_str(), %failure, "change not created");
        return Change::unresolved(request, base, failure);
    }

    let (text, summary) = match compute(&request, context, capabilities) {
        Ok(result) => result,
        Err(failure) => {
            warn!(operation = request.operation.as_str(), %failure, "change not created");
            return Change::unresolved(request, base, failure);
        }
    };

    let failure = match capabilities.parser.parse_text(base.name(), &text) {
        Ok(_) => None,
        Err(e) => Some(ChangeFailure::InvalidChange(format!(
            "result of {} does not parse: {e}",
            request.operation.as_str()
        ))),
    };
    debug!(
        operation = request.operation.as_str(),
        source = base.name(),
        version = base.version(),
        valid = failure.is_none(),
        "created change"
    );
    Change::applied(request, base, text, summary, failure)
}
