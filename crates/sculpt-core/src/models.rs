//! Shared typed models used across location, recommendation and pipeline
//! layers.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::errors::ChangeFailure;
use crate::source::tree::{NodeId, NodeKind};
use crate::source::Source;

pub const NEW_NAME: &str = "new_name";

// ---------------------------------------------------------------------------
// Location
// ---------------------------------------------------------------------------

/// Half-open byte range into one specific source version.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub source: String,
    pub version: u32,
    pub start: usize,
    pub end: usize,
}

impl Location {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn same_version(&self, other: &Location) -> bool {
        self.source == other.source && self.version == other.version
    }

    /// Ordering by start then end; `None` across versions.
    pub fn compare(&self, other: &Location) -> Option<Ordering> {
        if !self.same_version(other) {
            return None;
        }
        Some(
            self.start
                .cmp(&other.start)
                .then_with(|| self.end.cmp(&other.end)),
        )
    }

    pub fn contains(&self, other: &Location) -> bool {
        self.same_version(other) && self.start <= other.start && other.end <= self.end
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}@{}[{}..{}]",
            self.source, self.version, self.start, self.end
        )
    }
}

// ---------------------------------------------------------------------------
// Program units
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    Class,
    Method,
    Field,
    Parameter,
}

impl UnitKind {
    pub fn declaration_kind(self) -> NodeKind {
        match self {
            UnitKind::Class => NodeKind::ClassDeclaration,
            UnitKind::Method => NodeKind::MethodDeclaration,
            UnitKind::Field => NodeKind::FieldDeclaration,
            UnitKind::Parameter => NodeKind::ParameterDeclaration,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UnitKind::Class => "class",
            UnitKind::Method => "method",
            UnitKind::Field => "field",
            UnitKind::Parameter => "parameter",
        }
    }

    pub fn parse(raw: &str) -> Option<UnitKind> {
        match raw.trim().to_lowercase().as_str() {
            "class" | "interface" => Some(UnitKind::Class),
            "method" => Some(UnitKind::Method),
            "field" => Some(UnitKind::Field),
            "param" | "parameter" => Some(UnitKind::Parameter),
            _ => None,
        }
    }
}

/// A named element to locate.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum ProgramUnit {
    Class(String),
    Method(String),
    Field(String),
    Parameter(String),
}

impl ProgramUnit {
    pub fn new(kind: UnitKind, name: impl Into<String>) -> Self {
        let name = name.into();
        match kind {
            UnitKind::Class => ProgramUnit::Class(name),
            UnitKind::Method => ProgramUnit::Method(name),
            UnitKind::Field => ProgramUnit::Field(name),
            UnitKind::Parameter => ProgramUnit::Parameter(name),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ProgramUnit::Class(n)
            | ProgramUnit::Method(n)
            | ProgramUnit::Field(n)
            | ProgramUnit::Parameter(n) => n,
        }
    }

    pub fn kind(&self) -> UnitKind {
        match self {
            ProgramUnit::Class(_) => UnitKind::Class,
            ProgramUnit::Method(_) => UnitKind::Method,
            ProgramUnit::Field(_) => UnitKind::Field,
            ProgramUnit::Parameter(_) => UnitKind::Parameter,
        }
    }
}

impl fmt::Display for ProgramUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.kind().as_str(), self.name())
    }
}

/// A located declaration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NamedLocation {
    /// Full extent of the declaration.
    pub location: Location,
    /// The occurrence of the name that led to the declaration.
    pub occurrence: Location,
    pub unit: UnitKind,
    pub name: String,
    pub declaration: NodeId,
}

// ---------------------------------------------------------------------------
// Issues
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueKind {
    UnusedImport,
    UnusedMethod,
    UnusedField,
    UnusedParameter,
}

impl IssueKind {
    pub fn as_str(self) -> &'static str {
        match self {
            IssueKind::UnusedImport => "unused-import",
            IssueKind::UnusedMethod => "unused-method",
            IssueKind::UnusedField => "unused-field",
            IssueKind::UnusedParameter => "unused-parameter",
        }
    }

    /// Declaration kind an issue location resolves to when fixed.
    pub fn target_kind(self) -> NodeKind {
        match self {
            IssueKind::UnusedImport => NodeKind::Import,
            IssueKind::UnusedMethod => NodeKind::MethodDeclaration,
            IssueKind::UnusedField => NodeKind::FieldDeclaration,
            IssueKind::UnusedParameter => NodeKind::ParameterDeclaration,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// A detected problem. Identity is kind + location; severity is payload.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Issue {
    pub kind: IssueKind,
    pub location: Location,
    pub severity: Severity,
}

impl Issue {
    pub fn new(kind: IssueKind, location: Location, severity: Severity) -> Self {
        Self {
            kind,
            location,
            severity,
        }
    }
}

impl PartialEq for Issue {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.location == other.location
    }
}

impl Eq for Issue {}

impl Hash for Issue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.location.hash(state);
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.kind.as_str(), self.location)
    }
}

// ---------------------------------------------------------------------------
// Change requests
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Operation {
    RenameClass,
    RenameMethod,
    RenameParameter,
    RenameField,
    DeleteClass,
    DeleteMethod,
    DeleteParameter,
    DeleteField,
    Reformat,
    OptimizeImports,
    ForIssue,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::RenameClass => "rename-class",
            Operation::RenameMethod => "rename-method",
            Operation::RenameParameter => "rename-parameter",
            Operation::RenameField => "rename-field",
            Operation::DeleteClass => "delete-class",
            Operation::DeleteMethod => "delete-method",
            Operation::DeleteParameter => "delete-parameter",
            Operation::DeleteField => "delete-field",
            Operation::Reformat => "reformat",
            Operation::OptimizeImports => "optimize-imports",
            Operation::ForIssue => "for-issue",
        }
    }

    pub fn is_rename(self) -> bool {
        matches!(
            self,
            Operation::RenameClass
                | Operation::RenameMethod
                | Operation::RenameParameter
                | Operation::RenameField
        )
    }

    pub fn is_delete(self) -> bool {
        matches!(
            self,
            Operation::DeleteClass
                | Operation::DeleteMethod
                | Operation::DeleteParameter
                | Operation::DeleteField
        )
    }

    /// Unit kind a rename/delete operation acts on.
    pub fn unit_kind(self) -> Option<UnitKind> {
        match self {
            Operation::RenameClass | Operation::DeleteClass => Some(UnitKind::Class),
            Operation::RenameMethod | Operation::DeleteMethod => Some(UnitKind::Method),
            Operation::RenameField | Operation::DeleteField => Some(UnitKind::Field),
            Operation::RenameParameter | Operation::DeleteParameter => Some(UnitKind::Parameter),
            Operation::Reformat | Operation::OptimizeImports | Operation::ForIssue => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    Selection(Location),
    Source { name: String, version: u32 },
    Issue(Issue),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRequest {
    pub operation: Operation,
    pub target: Target,
    pub parameters: BTreeMap<String, String>,
}

impl ChangeRequest {
    pub fn new(operation: Operation, target: Target) -> Self {
        Self {
            operation,
            target,
            parameters: BTreeMap::new(),
        }
    }

    fn rename(operation: Operation, selection: Location, new_name: &str) -> Self {
        let mut request = Self::new(operation, Target::Selection(selection));
        request
            .parameters
            .insert(NEW_NAME.to_string(), new_name.to_string());
        request
    }

    pub fn rename_class(selection: Location, new_name: &str) -> Self {
        Self::rename(Operation::RenameClass, selection, new_name)
    }

    pub fn rename_method(selection: Location, new_name: &str) -> Self {
        Self::rename(Operation::RenameMethod, selection, new_name)
    }

    pub fn rename_parameter(selection: Location, new_name: &str) -> Self {
        Self::rename(Operation::RenameParameter, selection, new_name)
    }

    pub fn rename_field(selection: Location, new_name: &str) -> Self {
        Self::rename(Operation::RenameField, selection, new_name)
    }

    pub fn delete_class(selection: Location) -> Self {
        Self::new(Operation::DeleteClass, Target::Selection(selection))
    }

    pub fn delete_method(selection: Location) -> Self {
        Self::new(Operation::DeleteMethod, Target::Selection(selection))
    }

    pub fn delete_parameter(selection: Location) -> Self {
        Self::new(Operation::DeleteParameter, Target::Selection(selection))
    }

    pub fn delete_field(selection: Location) -> Self {
        Self::new(Operation::DeleteField, Target::Selection(selection))
    }

    fn whole_source(operation: Operation, source: &Source) -> Self {
        Self::new(
            operation,
            Target::Source {
                name: source.name().to_string(),
                version: source.version(),
            },
        )
    }

    pub fn reformat(source: &Source) -> Self {
        Self::whole_source(Operation::Reformat, source)
    }

    pub fn optimize_imports(source: &Source) -> Self {
        Self::whole_source(Operation::OptimizeImports, source)
    }

    pub fn for_issue(issue: Issue) -> Self {
        Self::new(Operation::ForIssue, Target::Issue(issue))
    }

    pub fn new_name(&self) -> Option<&str> {
        self.parameters.get(NEW_NAME).map(|s| s.as_str())
    }

    /// Source identity and version the request was made against.
    pub fn target_version(&self) -> (&str, u32) {
        match &self.target {
            Target::Selection(loc) => (&loc.source, loc.version),
            Target::Source { name, version } => (name, *version),
            Target::Issue(issue) => (&issue.location.source, issue.location.version),
        }
    }
}

// ---------------------------------------------------------------------------
// Changes and commits
// ---------------------------------------------------------------------------

/// A resolved edit: the full resulting text and whether it re-parsed.
#[derive(Clone, Debug)]
pub struct Change {
    request: ChangeRequest,
    source_name: String,
    base_version: u32,
    text: String,
    summary: String,
    failure: Option<ChangeFailure>,
}

impl Change {
    pub(crate) fn applied(
        request: ChangeRequest,
        base: &Source,
        text: String,
        summary: String,
        failure: Option<ChangeFailure>,
    ) -> Self {
        Self {
            request,
            source_name: base.name().to_string(),
            base_version: base.version(),
            text,
            summary,
            failure,
        }
    }

    /// A change whose target could not be resolved; the text is left as is.
    pub(crate) fn unresolved(
        request: ChangeRequest,
        base: &Source,
        failure: ChangeFailure,
    ) -> Self {
        let summary = format!("{} (not applied)", request.operation.as_str());
        Self::applied(
            request,
            base,
            base.content().to_string(),
            summary,
            Some(failure),
        )
    }

    pub fn request(&self) -> &ChangeRequest {
        &self.request
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn base_version(&self) -> u32 {
        self.base_version
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn is_valid(&self) -> bool {
        self.failure.is_none()
    }

    pub fn failure(&self) -> Option<&ChangeFailure> {
        self.failure.as_ref()
    }
}

/// Stable identifier for a committed version: the first 16 hex characters
/// of SHA-256 over name, commit sequence, version and text. The sequence
/// keeps ids apart when a reset makes a version number come round again.
pub fn commit_id(source_name: &str, sequence: u64, version: u32, text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(source_name.as_bytes());
    hasher.update([0u8]);
    hasher.update(sequence.to_be_bytes());
    hasher.update(version.to_be_bytes());
    hasher.update([0u8]);
    hasher.update(text.as_bytes());
    let digest = format!("{:x}", hasher.finalize());
    digest[..16].to_string()
}

#[derive(Clone, Debug)]
pub struct CommitRequest {
    pub id: String,
    pub description: String,
    pub source_name: String,
    /// Version produced by committing the change.
    pub version: u32,
    pub change: Change,
}

impl CommitRequest {
    pub fn text(&self) -> &str {
        self.change.text()
    }
}

/// Outcome of one publish attempt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum CommitStatus {
    Ok(String),
    Aborted(String),
}

impl CommitStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, CommitStatus::Ok(_))
    }

    pub fn is_aborted(&self) -> bool {
        matches!(self, CommitStatus::Aborted(_))
    }

    pub fn message(&self) -> &str {
        match self {
            CommitStatus::Ok(m) | CommitStatus::Aborted(m) => m,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn loc(start: usize, end: usize) -> Location {
        Location {
            source: "A.java".to_string(),
            version: 0,
            start,
            end,
        }
    }

    #[test]
    fn test_location_compare_within_version_only() {
        let a = loc(0, 4);
        let b = loc(2, 3);
        assert_eq!(a.compare(&b), Some(Ordering::Less));
        assert!(a.contains(&b));
        let other = Location { version: 1, ..b };
        assert_eq!(a.compare(&other), None);
        assert!(!a.contains(&other));
    }

    #[test]
    fn test_issue_identity_ignores_severity() {
        let mut set = HashSet::new();
        set.insert(Issue::new(IssueKind::UnusedImport, loc(0, 10), Severity::Warning));
        set.insert(Issue::new(IssueKind::UnusedImport, loc(0, 10), Severity::Error));
        set.insert(Issue::new(IssueKind::UnusedMethod, loc(0, 10), Severity::Warning));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_program_unit_accessors() {
        let unit = ProgramUnit::new(UnitKind::Method, "check");
        assert_eq!(unit, ProgramUnit::Method("check".to_string()));
        assert_eq!(unit.name(), "check");
        assert_eq!(unit.kind().declaration_kind(), NodeKind::MethodDeclaration);
        assert_eq!(unit.to_string(), "method 'check'");
        assert_eq!(UnitKind::parse("param"), Some(UnitKind::Parameter));
    }

    #[test]
    fn test_rename_request_carries_new_name() {
        let request = ChangeRequest::rename_method(loc(3, 8), "verify");
        assert_eq!(request.new_name(), Some("verify"));
        assert!(request.operation.is_rename());
        assert_eq!(request.operation.unit_kind(), Some(UnitKind::Method));
        assert_eq!(request.target_version(), ("A.java", 0));
    }

    #[test]
    fn test_commit_id_is_stable_and_short() {
        let a = commit_id("A.java", 0, 1, "class A {}");
        assert_eq!(a, commit_id("A.java", 0, 1, "class A {}"));
        assert_ne!(a, commit_id("A.java", 0, 2, "class A {}"));
        assert_ne!(a, commit_id("A.java", 1, 1, "class A {}"));
        assert_eq!(a.len(), 16);
    }

    #[test]
    fn test_commit_status_serializes_tagged() {
        let json = serde_json::to_string(&CommitStatus::Aborted("offline".to_string())).unwrap();
        assert_eq!(json, r#"{"status":"aborted","message":"offline"}"#);
    }
}
