pub mod context;
pub mod filesystem;
pub mod history;
pub mod java;
pub mod parser;
pub mod tree;

pub use context::{Context, ContextCache};
pub use history::{Source, SourceHistory};
pub use parser::{AstProvider, JavaParser};
pub use tree::{NodeId, NodeKind, SyntaxTree};
