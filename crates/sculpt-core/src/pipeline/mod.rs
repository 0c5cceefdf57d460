pub mod change;
pub mod commit;
pub mod delete;
pub mod edits;
pub mod format;
pub mod organize;
pub mod publish;
pub mod rename;

pub use change::{create_change, Capabilities};
pub use commit::{commit_change, CommitQueue};
pub use format::{BraceFormatter, Formatter};
pub use publish::{publish, LocalPublisher, PublishReport, Publisher};
