//! Draining the commit queue through a publisher.

use serde::Serialize;
use tracing::{info, warn};

use crate::models::{CommitRequest, CommitStatus};
use crate::pipeline::commit::CommitQueue;

/// Delivers one commit request somewhere. Failures are reported as
/// [`CommitStatus::Aborted`], never as errors.
pub trait Publisher {
    fn publish(&mut self, request: &CommitRequest) -> CommitStatus;
}

/// Accepts every request; used when no remote is configured.
#[derive(Clone, Debug, Default)]
pub struct LocalPublisher {
    published: Vec<String>,
}

impl LocalPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids accepted so far, in order.
    pub fn published(&self) -> &[String] {
        &self.published
    }
}

impl Publisher for LocalPublisher {
    fn publish(&mut self, request: &CommitRequest) -> CommitStatus {
        self.published.push(request.id.clone());
        CommitStatus::Ok(format!("{} recorded locally", request.id))
    }
}

impl<F> Publisher for F
where
    F: FnMut(&CommitRequest) -> CommitStatus,
{
    fn publish(&mut self, request: &CommitRequest) -> CommitStatus {
        self(request)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PublishReport {
    /// Descriptions of published requests, in queue order.
    pub published: Vec<String>,
    /// Ids of aborted requests, now at the tail of the queue.
    pub requeued: Vec<String>,
    /// Queue length after the pass.
    pub remaining: usize,
}

/// One FIFO pass over the requests queued at call time. Accepted requests
/// leave the queue; aborted ones are re-appended after the pass, so every
/// request is either published or requeued.
pub fn publish(queue: &mut CommitQueue, publisher: &mut dyn Publisher) -> PublishReport {
    let initial = queue.len();
    let mut report = PublishReport::default();
    let mut aborted = Vec::new();

    for _ in 0..initial {
        let Some(request) = queue.pop_front() else {
            break;
        };
        match publisher.publish(&request) {
            CommitStatus::Ok(message) => {
                info!(id = %request.id, %message, "published commit");
                report.published.push(request.description.clone());
            }
            CommitStatus::Aborted(reason) => {
                warn!(id = %request.id, %reason, "publish aborted; requeued");
                report.requeued.push(request.id.clone());
                aborted.push(request);
            }
        }
    }
    queue.extend(aborted);
    report.remaining = queue.len();
    debug_assert_eq!(report.published.len() + report.requeued.len(), initial);
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{commit_id, ChangeRequest};
    use crate::pipeline::change::{create_change, Capabilities};
    use crate::source::{Context, JavaParser, Source};

    fn queue_of(n: usize) -> CommitQueue {
        let source = Source::new("A.java", "class A {}");
        let ctx = Context::parse(&source, &JavaParser).unwrap();
        let change = create_change(
            ChangeRequest::reformat(&source),
            &ctx,
            &Capabilities::default(),
        );
        let mut queue = CommitQueue::new();
        for i in 0..n {
            let version = i as u32 + 1;
            queue.push_back(CommitRequest {
                id: commit_id("A.java", i as u64, version, change.text()),
                description: format!("commit {version}"),
                source_name: "A.java".to_string(),
                version,
                change: change.clone(),
            });
        }
        queue
    }

    #[test]
    fn test_second_of_three_is_requeued() {
        let mut queue = queue_of(3);
        let mut remote_down_for = Some("commit 2".to_string());
        let mut publisher = |request: &CommitRequest| match &remote_down_for {
            Some(d) if *d == request.description => {
                CommitStatus::Aborted("remote rejected".to_string())
            }
            _ => CommitStatus::Ok("accepted".to_string()),
        };
        let report = publish(&mut queue, &mut publisher);
        assert_eq!(report.published, vec!["commit 1", "commit 3"]);
        assert_eq!(report.requeued.len(), 1);
        assert_eq!(report.remaining, 1);
        assert_eq!(queue.len(), 1);

        remote_down_for = None;
        let mut publisher = |_: &CommitRequest| {
            assert!(remote_down_for.is_none());
            CommitStatus::Ok("accepted".to_string())
        };
        let report = publish(&mut queue, &mut publisher);
        assert_eq!(report.published, vec!["commit 2"]);
        assert_eq!(report.remaining, 0);
    }

    #[test]
    fn test_persistent_failure_is_bounded_and_loses_nothing() {
        let mut queue = queue_of(4);
        let before = queue.ids();
        let mut publisher = |_: &CommitRequest| CommitStatus::Aborted("offline".to_string());
        for _ in 0..3 {
            let report = publish(&mut queue, &mut publisher);
            assert!(report.published.is_empty());
            assert_eq!(report.requeued.len(), 4);
        }
        assert_eq!(queue.ids(), before);
    }

    #[test]
    fn test_local_publisher_accepts_all() {
        let mut queue = queue_of(2);
        let mut local = LocalPublisher::new();
        let report = publish(&mut queue, &mut local);
        assert_eq!(report.published.len(), 2);
        assert!(queue.is_empty());
        assert_eq!(local.published().len(), 2);
    }

    #[test]
    fn test_empty_queue() {
        let mut queue = CommitQueue::new();
        let report = publish(&mut queue, &mut LocalPublisher::new());
        assert_eq!(report, PublishReport::default());
    }
}
