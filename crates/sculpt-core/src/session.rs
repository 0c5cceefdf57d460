//! Session glue: one tracked source, its context cache and commit queue.

use std::path::Path;
use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use parking_lot::{Mutex, MutexGuard, RwLock};
use tracing::info;

use crate::config::SculptConfig;
use crate::errors::{SculptError, SculptResult};
use crate::locate::{locate_unit, validate_selection, Granularity, SelectionAnalysis};
use crate::models::{
    Change, ChangeRequest, CommitRequest, Issue, Location, NamedLocation, ProgramUnit,
};
use crate::pipeline::{
    commit_change, create_change, publish, Capabilities, CommitQueue, PublishReport, Publisher,
};
use crate::recommend::{
    get_issues, recommend_changes, recommend_imports, scan_sources, DetectorRegistry, ScanResult,
};
use crate::source::filesystem::load_sources;
use crate::source::{Context, ContextCache, Source, SourceHistory};

/// Owns the version history, parsed-context cache and pending commits of
/// one tracked source.
pub struct Session {
    history: SourceHistory,
    cache: ContextCache,
    queue: CommitQueue,
    capabilities: Capabilities,
    registry: Arc<DetectorRegistry>,
}

impl Session {
    /// Track `source` with default capabilities and detectors.
    pub fn new(source: Source) -> Self {
        Self::with_parts(source, Capabilities::default(), Arc::new(DetectorRegistry::default()))
    }

    /// Track `source` with detectors chosen by the capabilities' config.
    pub fn with_capabilities(source: Source, capabilities: Capabilities) -> SculptResult<Self> {
        let registry = DetectorRegistry::from_config(&capabilities.config)?;
        Ok(Self::with_parts(source, capabilities, Arc::new(registry)))
    }

    pub fn with_parts(
        source: Source,
        capabilities: Capabilities,
        registry: Arc<DetectorRegistry>,
    ) -> Self {
        Self {
            history: SourceHistory::new(source),
            cache: ContextCache::new(),
            queue: CommitQueue::new(),
            capabilities,
            registry,
        }
    }

    pub fn name(&self) -> &str {
        self.history.origin().name()
    }

    pub fn current(&self) -> &Source {
        self.history.current()
    }

    pub fn origin(&self) -> &Source {
        self.history.origin()
    }

    pub fn history(&self) -> &SourceHistory {
        &self.history
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    /// Parsed context of the current version, cached until it changes.
    pub fn context(&mut self) -> SculptResult<Context> {
        self.cache
            .get_or_parse(self.history.current(), self.capabilities.parser.as_ref())
    }

    /// Number of parses performed for this session.
    pub fn parse_count(&self) -> usize {
        self.cache.parse_count()
    }

    pub fn locate(&mut self, unit: &ProgramUnit) -> SculptResult<Vec<NamedLocation>> {
        let context = self.context()?;
        Ok(locate_unit(unit, &context))
    }

    pub fn validate_selection(
        &mut self,
        location: &Location,
        granularity: Granularity,
    ) -> SculptResult<SelectionAnalysis> {
        let context = self.context()?;
        Ok(validate_selection(&context, location, granularity))
    }

    pub fn issues(&mut self) -> SculptResult<Vec<Issue>> {
        let context = self.context()?;
        Ok(get_issues(&context, &self.registry))
    }

    /// Build a change against the current version. Only a parse failure of
    /// the current text is an error; everything else yields a change.
    pub fn create_change(&mut self, request: ChangeRequest) -> SculptResult<Change> {
        let context = self.context()?;
        Ok(create_change(request, &context, &self.capabilities))
    }

    pub fn commit(&mut self, change: &Change) -> SculptResult<CommitRequest> {
        commit_change(&mut self.history, &mut self.queue, change)
    }

    /// Create and commit in one step; invalid changes surface as errors.
    pub fn apply(&mut self, request: ChangeRequest) -> SculptResult<CommitRequest> {
        let change = self.create_change(request)?;
        self.commit(&change)
    }

    /// Changes fixing every issue currently detected.
    pub fn recommend_changes(&mut self) -> SculptResult<Vec<Change>> {
        let context = self.context()?;
        let issues = get_issues(&context, &self.registry);
        Ok(recommend_changes(&context, &issues, &self.capabilities))
    }

    pub fn recommend_imports(&mut self) -> SculptResult<IndexSet<String>> {
        let context = self.context()?;
        Ok(recommend_imports(
            &context,
            self.capabilities.config.wildcard_threshold,
        ))
    }

    pub fn publish(&mut self, publisher: &mut dyn Publisher) -> PublishReport {
        publish(&mut self.queue, publisher)
    }

    /// Restore `version` (origin when `None`), discarding later versions.
    /// Pending commits are left queued.
    pub fn reset(&mut self, version: Option<u32>) -> SculptResult<&Source> {
        self.cache.invalidate();
        let restored = self.history.reset(version)?;
        info!(
            source = restored.name(),
            version = restored.version(),
            "reset tracked source"
        );
        Ok(restored)
    }

    pub fn pending(&self) -> &CommitQueue {
        &self.queue
    }
}

/// A session behind a lock, so each (source, context, queue) triple is
/// exclusively owned while several sessions run concurrently.
#[derive(Clone)]
pub struct SharedSession(Arc<Mutex<Session>>);

impl SharedSession {
    pub fn new(session: Session) -> Self {
        Self(Arc::new(Mutex::new(session)))
    }

    pub fn lock(&self) -> MutexGuard<'_, Session> {
        self.0.lock()
    }
}

/// Named sessions sharing one set of capabilities.
pub struct Workspace {
    capabilities: Capabilities,
    registry: Arc<DetectorRegistry>,
    sessions: RwLock<IndexMap<String, SharedSession>>,
}

impl Workspace {
    pub fn new(config: SculptConfig) -> SculptResult<Self> {
        let registry = DetectorRegistry::from_config(&config)?;
        Ok(Self {
            capabilities: Capabilities::new(config),
            registry: Arc::new(registry),
            sessions: RwLock::new(IndexMap::new()),
        })
    }

    /// Start tracking `source`, replacing any session of the same name.
    pub fn track(&self, source: Source) -> SharedSession {
        let name = source.name().to_string();
        let session = SharedSession::new(Session::with_parts(
            source,
            self.capabilities.clone(),
            Arc::clone(&self.registry),
        ));
        self.sessions.write().insert(name, session.clone());
        session
    }

    /// Track every `.java` file under `root`; returns the tracked names.
    pub fn track_dir(&self, root: &Path) -> SculptResult<Vec<String>> {
        let sources = load_sources(root)?;
        let names = sources.iter().map(|s| s.name().to_string()).collect();
        for source in sources {
            self.track(source);
        }
        Ok(names)
    }

    pub fn session(&self, name: &str) -> SculptResult<SharedSession> {
        self.sessions
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| SculptError::NoTrackedSource(name.to_string()))
    }

    pub fn untrack(&self, name: &str) -> SculptResult<()> {
        self.sessions
            .write()
            .shift_remove(name)
            .map(|_| ())
            .ok_or_else(|| SculptError::NoTrackedSource(name.to_string()))
    }

    pub fn names(&self) -> Vec<String> {
        self.sessions.read().keys().cloned().collect()
    }

    /// Detect issues in the current version of every tracked source.
    pub fn scan(&self) -> Vec<ScanResult> {
        let sources: Vec<Source> = self
            .sessions
            .read()
            .values()
            .map(|s| s.lock().current().clone())
            .collect();
        scan_sources(
            &sources,
            self.capabilities.parser.as_ref(),
            &self.registry,
            self.capabilities.config.scan_workers,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CommitStatus, IssueKind};
    use crate::pipeline::LocalPublisher;
    use crate::testing::PRECONDITIONS;

    fn session() -> Session {
        Session::new(Source::new("Preconditions.java", PRECONDITIONS))
    }

    #[test]
    fn test_unused_import_scenario() {
        let mut session = session();
        let issues = session.issues().unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, IssueKind::UnusedImport);

        let changes = session.recommend_changes().unwrap();
        assert_eq!(changes.len(), 1);
        let request = session.commit(&changes[0]).unwrap();
        assert_eq!(request.version, 1);
        assert!(!session.current().content().contains("import java.util.List;"));
        assert!(session.context().is_ok());
        assert!(session.issues().unwrap().is_empty());
    }

    #[test]
    fn test_locate_scenario() {
        let mut session = session();
        let found = session.locate(&ProgramUnit::Method("check".to_string())).unwrap();
        assert_eq!(found.len(), 1);
        assert!(session
            .locate(&ProgramUnit::Field("something".to_string()))
            .unwrap()
            .is_empty());
        assert_eq!(session.parse_count(), 1);
    }

    #[test]
    fn test_rename_scenario() {
        let mut session = session();
        let found = session.locate(&ProgramUnit::Method("check".to_string())).unwrap();
        let request = ChangeRequest::rename_method(found[0].occurrence.clone(), "verify");
        session.apply(request).unwrap();
        let text = session.current().content().to_string();
        assert!(text.contains("static void verify("));
        assert!(session
            .locate(&ProgramUnit::Method("check".to_string()))
            .unwrap()
            .is_empty());
        assert_eq!(
            session
                .locate(&ProgramUnit::Method("verify".to_string()))
                .unwrap()
                .len(),
            1
        );
    }

    #[test]
    fn test_reset_restores_origin_and_keeps_queue() {
        let mut session = session();
        let changes = session.recommend_changes().unwrap();
        session.commit(&changes[0]).unwrap();
        let request = ChangeRequest::reformat(session.current());
        session.apply(request).unwrap();
        assert_eq!(session.history().len(), 3);

        let restored = session.reset(None).unwrap();
        assert_eq!(restored.content(), PRECONDITIONS);
        assert_eq!(session.pending().len(), 2);
        assert_eq!(session.issues().unwrap().len(), 1);
        assert!(session.reset(Some(4)).is_err());
    }

    #[test]
    fn test_apply_invalid_change_is_error_without_state_change() {
        let mut session = session();
        let location = session.current().location(0, 3).unwrap();
        let err = session
            .apply(ChangeRequest::delete_class(location))
            .unwrap_err();
        assert!(matches!(err, SculptError::InvalidChange(_)));
        assert_eq!(session.history().len(), 1);
        assert!(session.pending().is_empty());
    }

    #[test]
    fn test_publish_requeue_scenario() {
        let mut session = session();
        let changes = session.recommend_changes().unwrap();
        session.commit(&changes[0]).unwrap();
        session.apply(ChangeRequest::reformat(session.current())).unwrap();
        let current = session.current().clone();
        session.apply(ChangeRequest::optimize_imports(&current)).unwrap();
        assert_eq!(session.pending().len(), 3);

        let mut calls = 0;
        let mut flaky = |_: &CommitRequest| {
            calls += 1;
            if calls == 2 {
                CommitStatus::Aborted("remote unavailable".to_string())
            } else {
                CommitStatus::Ok("ok".to_string())
            }
        };
        let report = session.publish(&mut flaky);
        assert_eq!(report.published.len(), 2);
        assert_eq!(report.remaining, 1);

        let report = session.publish(&mut LocalPublisher::new());
        assert_eq!(report.published.len(), 1);
        assert!(session.pending().is_empty());
    }

    #[test]
    fn test_workspace_tracks_and_scans() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Preconditions.java"), PRECONDITIONS).unwrap();
        std::fs::write(dir.path().join("Clean.java"), "class Clean {}\n").unwrap();

        let workspace = Workspace::new(SculptConfig::default()).unwrap();
        let names = workspace.track_dir(dir.path()).unwrap();
        assert_eq!(names, vec!["Clean.java", "Preconditions.java"]);

        let results = workspace.scan();
        let total: usize = results.iter().map(|r| r.issues.len()).sum();
        assert_eq!(total, 1);

        let shared = workspace.session("Preconditions.java").unwrap();
        assert_eq!(shared.lock().issues().unwrap().len(), 1);
        assert!(matches!(
            workspace.session("Missing.java"),
            Err(SculptError::NoTrackedSource(_))
        ));
        workspace.untrack("Clean.java").unwrap();
        assert_eq!(workspace.names(), vec!["Preconditions.java"]);
    }

    #[test]
    fn test_shared_session_across_threads() {
        let shared = SharedSession::new(session());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let shared = shared.clone();
                std::thread::spawn(move || shared.lock().issues().unwrap().len())
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), 1);
        }
        assert_eq!(shared.lock().parse_count(), 1);
    }
}
