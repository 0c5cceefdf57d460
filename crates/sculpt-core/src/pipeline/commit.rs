//! Committing changes: new source versions plus queued commit requests.

use std::collections::VecDeque;

use tracing::info;

use crate::errors::{SculptError, SculptResult};
use crate::models::{commit_id, Change, CommitRequest};
use crate::source::SourceHistory;

/// FIFO of commit requests awaiting publication.
#[derive(Clone, Debug, Default)]
pub struct CommitQueue {
    pending: VecDeque<CommitRequest>,
    /// Commits recorded through this queue so far, published or not.
    committed: u64,
}

impl CommitQueue {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_sequence(&mut self) -> u64 {
        let sequence = self.committed;
        self.committed += 1;
        sequence
    }

    pub fn push_back(&mut self, request: CommitRequest) {
        self.pending.push_back(request);
    }

    pub fn pop_front(&mut self) -> Option<CommitRequest> {
        self.pending.pop_front()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommitRequest> {
        self.pending.iter()
    }

    pub fn ids(&self) -> Vec<String> {
        self.pending.iter().map(|r| r.id.clone()).collect()
    }
}

impl Extend<CommitRequest> for CommitQueue {
    fn extend<T: IntoIterator<Item = CommitRequest>>(&mut self, iter: T) {
        self.pending.extend(iter);
    }
}

/// Record `change` as the next version of the tracked source and queue it
/// for publication. Invalid or stale changes are refused without touching
/// the history or the queue.
pub fn commit_change(
    history: &mut SourceHistory,
    queue: &mut CommitQueue,
    change: &Change,
) -> SculptResult<CommitRequest> {
    if let Some(failure) = change.failure() {
        return Err(SculptError::InvalidChange(format!(
            "{}: {failure}",
            change.summary()
        )));
    }
    let current = history.current();
    if change.source_name() != current.name() || change.base_version() != current.version() {
        return Err(SculptError::StaleChange {
            source_name: change.source_name().to_string(),
            base: change.base_version(),
            current: current.version(),
        });
    }

    let sequence = queue.next_sequence();
    let committed = history.push(change.text().to_string());
    let version = committed.version();
    let request = CommitRequest {
        id: commit_id(committed.name(), sequence, version, committed.content()),
        description: format!("{} ({}@{})", change.summary(), committed.name(), version),
        source_name: committed.name().to_string(),
        version,
        change: change.clone(),
    };
    info!(
        id = %request.id,
        source = %request.source_name,
        version,
        "committed change"
    );
    queue.push_back(request.clone());
    Ok(request)
}
