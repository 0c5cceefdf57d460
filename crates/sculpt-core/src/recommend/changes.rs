//! Issue-driven change recommendations.

use indexmap::IndexSet;
use tracing::debug;

use crate::models::{Change, ChangeRequest, Issue};
use crate::pipeline::change::{create_change, Capabilities};
use crate::source::Context;

/// One for-issue change per distinct issue, in issue order.
pub fn recommend_changes(
    context: &Context,
    issues: &[Issue],
    capabilities: &Capabilities,
) -> Vec<Change> {
    let distinct: IndexSet<&Issue> = issues.iter().collect();
    let changes: Vec<Change> = distinct
        .into_iter()
        .map(|issue| create_change(ChangeRequest::for_issue(issue.clone()), context, capabilities))
        .collect();
    debug!(
        source = context.source().name(),
        issues = issues.len(),
        changes = changes.len(),
        "recommended changes"
    );
    changes
}
