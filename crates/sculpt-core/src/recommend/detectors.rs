//! Issue detectors and the registry that runs them.

use indexmap::IndexSet;
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::config::SculptConfig;
use crate::errors::{SculptError, SculptResult};
use crate::models::{Issue, IssueKind, Severity};
use crate::source::java::{
    has_annotation, has_modifier, identifiers, in_header, is_declaration_name,
};
use crate::source::{AstProvider, Context, NodeId, NodeKind, Source, SyntaxTree};

/// Produces issues of one kind from a parsed context.
pub trait Detector: Send + Sync {
    /// Configuration name, e.g. `unused-imports`.
    fn name(&self) -> &'static str;

    fn kind(&self) -> IssueKind;

    fn detect(&self, context: &Context) -> Vec<Issue>;
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// True when some identifier outside `skip` (and outside import/package
/// headers) spells `name`.
fn referenced_outside(tree: &SyntaxTree, name: &str, skip: &[NodeId]) -> bool {
    identifiers(tree, tree.root()).any(|id| {
        tree.source_text(id) == name
            && !in_header(tree, id)
            && !skip.iter().any(|s| tree.is_within(id, *s))
    })
}

fn declarations(tree: &SyntaxTree, kind: NodeKind) -> impl Iterator<Item = NodeId> + '_ {
    tree.ids().filter(move |id| tree.kind(*id) == kind)
}

// ---------------------------------------------------------------------------
// Detectors
// ---------------------------------------------------------------------------

/// Single-type and static imports whose simple name is never referenced.
/// Wildcard imports are never reported.
pub struct UnusedImports;

impl Detector for UnusedImports {
    fn name(&self) -> &'static str {
        "unused-imports"
    }

    fn kind(&self) -> IssueKind {
        IssueKind::UnusedImport
    }

    fn detect(&self, context: &Context) -> Vec<Issue> {
        let tree = context.tree();
        declarations(tree, NodeKind::Import)
            .filter(|id| {
                let Some(qualified) = tree.name(*id) else {
                    return false;
                };
                if qualified.ends_with(".*") {
                    return false;
                }
                let simple = qualified.rsplit('.').next().unwrap_or(qualified);
                !referenced_outside(tree, simple, &[]) && !mentioned_in_javadoc(tree, simple)
            })
            .map(|id| {
                Issue::new(
                    IssueKind::UnusedImport,
                    context.location_of(id),
                    Severity::Warning,
                )
            })
            .collect()
    }
}

/// `{@link Type}` and `@see Type` count as uses of an import.
fn mentioned_in_javadoc(tree: &SyntaxTree, simple: &str) -> bool {
    declarations(tree, NodeKind::Comment).any(|c| {
        let text = tree.source_text(c);
        text.starts_with("/**")
            && (text.contains(&format!("{{@link {simple}"))
                || text.contains(&format!("@see {simple}")))
    })
}

/// Private methods (not constructors) that nothing in the file calls.
pub struct UnusedPrivateMethods;

impl Detector for UnusedPrivateMethods {
    fn name(&self) -> &'static str {
        "unused-methods"
    }

    fn kind(&self) -> IssueKind {
        IssueKind::UnusedMethod
    }

    fn detect(&self, context: &Context) -> Vec<Issue> {
        let tree = context.tree();
        declarations(tree, NodeKind::MethodDeclaration)
            .filter(|id| tree.grammar(*id) == "method_declaration")
            .filter(|id| has_modifier(tree, *id, "private"))
            .filter(|id| {
                let Some(name) = tree.name(*id) else {
                    return false;
                };
                let name_node = tree.name_node(*id).into_iter().collect::<Vec<_>>();
                !identifiers(tree, tree.root()).any(|ident| {
                    tree.source_text(ident) == name
                        && !name_node.contains(&ident)
                        && !is_declaration_name(tree, ident)
                })
            })
            .map(|id| {
                Issue::new(
                    IssueKind::UnusedMethod,
                    context.location_of(id),
                    Severity::Warning,
                )
            })
            .collect()
    }
}

/// Private fields none of whose declared variables is read or written.
pub struct UnusedPrivateFields;

impl Detector for UnusedPrivateFields {
    fn name(&self) -> &'static str {
        "unused-fields"
    }

    fn kind(&self) -> IssueKind {
        IssueKind::UnusedField
    }

    fn detect(&self, context: &Context) -> Vec<Issue> {
        let tree = context.tree();
        declarations(tree, NodeKind::FieldDeclaration)
            .filter(|id| has_modifier(tree, *id, "private"))
            .filter(|id| {
                tree.declared_names(*id)
                    .iter()
                    .all(|name| !referenced_outside(tree, name, &[*id]))
            })
            .map(|id| {
                Issue::new(
                    IssueKind::UnusedField,
                    context.location_of(id),
                    Severity::Warning,
                )
            })
            .collect()
    }
}

/// Parameters of concrete, non-overriding methods that the body never uses.
pub struct UnusedParameters;

impl Detector for UnusedParameters {
    fn name(&self) -> &'static str {
        "unused-parameters"
    }

    fn kind(&self) -> IssueKind {
        IssueKind::UnusedParameter
    }

    fn detect(&self, context: &Context) -> Vec<Issue> {
        let tree = context.tree();
        let mut issues = Vec::new();
        for method in declarations(tree, NodeKind::MethodDeclaration) {
            let Some(body) = tree.child_by_field(method, "body") else {
                continue;
            };
            if has_annotation(tree, method, "Override") {
                continue;
            }
            let Some(params) = tree.child_by_field(method, "parameters") else {
                continue;
            };
            for param in tree.children(params) {
                if tree.kind(*param) != NodeKind::ParameterDeclaration {
                    continue;
                }
                let Some(name) = tree.name(*param) else {
                    continue;
                };
                let used = identifiers(tree, body).any(|id| tree.source_text(id) == name);
                if !used {
                    issues.push(Issue::new(
                        IssueKind::UnusedParameter,
                        context.location_of(*param),
                        Severity::Info,
                    ));
                }
            }
        }
        issues
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

fn detector_by_name(name: &str) -> Option<Box<dyn Detector>> {
    match name {
        "unused-imports" => Some(Box::new(UnusedImports)),
        "unused-methods" => Some(Box::new(UnusedPrivateMethods)),
        "unused-fields" => Some(Box::new(UnusedPrivateFields)),
        "unused-parameters" => Some(Box::new(UnusedParameters)),
        _ => None,
    }
}

/// Ordered set of detectors; detection order follows registration order.
pub struct DetectorRegistry {
    detectors: Vec<Box<dyn Detector>>,
}

impl Default for DetectorRegistry {
    fn default() -> Self {
        Self {
            detectors: vec![
                Box::new(UnusedImports),
                Box::new(UnusedPrivateMethods),
                Box::new(UnusedPrivateFields),
            ],
        }
    }
}

impl DetectorRegistry {
    pub fn empty() -> Self {
        Self {
            detectors: Vec::new(),
        }
    }

    pub fn from_config(config: &SculptConfig) -> SculptResult<Self> {
        let mut registry = Self::empty();
        for name in &config.detectors {
            let detector = detector_by_name(name)
                .ok_or_else(|| SculptError::Config(format!("unknown detector: {name}")))?;
            registry.register(detector);
        }
        Ok(registry)
    }

    /// Add a detector; a second detector with the same name is ignored.
    pub fn register(&mut self, detector: Box<dyn Detector>) {
        if self.detectors.iter().any(|d| d.name() == detector.name()) {
            return;
        }
        self.detectors.push(detector);
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.detectors.iter().map(|d| d.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.detectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.detectors.is_empty()
    }
}

/// Run every registered detector; detection order, duplicates collapsed.
pub fn get_issues(context: &Context, registry: &DetectorRegistry) -> Vec<Issue> {
    let mut issues: IndexSet<Issue> = IndexSet::new();
    for detector in &registry.detectors {
        issues.extend(detector.detect(context));
    }
    debug!(
        source = context.source().name(),
        version = context.version(),
        detectors = registry.len(),
        issues = issues.len(),
        "collected issues"
    );
    issues.into_iter().collect()
}

/// Per-source result of a multi-source scan.
#[derive(Clone, Debug)]
pub struct ScanResult {
    pub source_name: String,
    pub version: u32,
    pub issues: Vec<Issue>,
    pub error: Option<String>,
}

fn scan_one(source: &Source, parser: &dyn AstProvider, registry: &DetectorRegistry) -> ScanResult {
    match Context::parse(source, parser) {
        Ok(context) => ScanResult {
            source_name: source.name().to_string(),
            version: source.version(),
            issues: get_issues(&context, registry),
            error: None,
        },
        Err(e) => {
            warn!(source = source.name(), error = %e, "skipping unparseable source");
            ScanResult {
                source_name: source.name().to_string(),
                version: source.version(),
                issues: Vec::new(),
                error: Some(e.to_string()),
            }
        }
    }
}

/// Detect issues across many sources on a bounded worker pool. Results keep
/// the input order; parse failures are reported per source.
pub fn scan_sources(
    sources: &[Source],
    parser: &dyn AstProvider,
    registry: &DetectorRegistry,
    workers: usize,
) -> Vec<ScanResult> {
    if sources.is_empty() {
        return vec![];
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers.max(1))
        .build();

    match pool {
        Ok(pool) => pool.install(|| {
            sources
                .par_iter()
                .map(|source| scan_one(source, parser, registry))
                .collect()
        }),
        Err(_) => {
            // Fallback to sequential
            sources
                .iter()
                .map(|source| scan_one(source, parser, registry))
                .collect()
        }
    }
}
