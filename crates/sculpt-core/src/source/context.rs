//! Parsed view of exactly one source version, plus its single-owner cache.

use std::sync::Arc;

use tracing::debug;

use crate::errors::SculptResult;
use crate::models::Location;
use crate::source::history::Source;
use crate::source::parser::AstProvider;
use crate::source::tree::{NodeId, SyntaxTree};

/// A source version and the tree parsed from exactly that text.
#[derive(Clone, Debug)]
pub struct Context {
    source: Source,
    tree: Arc<SyntaxTree>,
}

impl Context {
    /// Parse `source` without caching.
    pub fn parse(source: &Source, parser: &dyn AstProvider) -> SculptResult<Self> {
        let tree = parser.parse(source)?;
        Ok(Self {
            source: source.clone(),
            tree: Arc::new(tree),
        })
    }

    pub fn source(&self) -> &Source {
        &self.source
    }

    pub fn tree(&self) -> &SyntaxTree {
        &self.tree
    }

    pub fn text(&self) -> &str {
        self.source.content()
    }

    pub fn version(&self) -> u32 {
        self.source.version()
    }

    /// Location of a node's full extent in this version.
    pub fn location_of(&self, id: NodeId) -> Location {
        let node = self.tree.node(id);
        Location {
            source: self.source.name().to_string(),
            version: self.source.version(),
            start: node.start,
            end: node.end,
        }
    }
}

/// Memoizes the context of one source version at a time. A lookup for any
/// other version (or a different buffer under the same version number)
/// replaces the entry.
#[derive(Debug, Default)]
pub struct ContextCache {
    entry: Option<Context>,
    parses: usize,
}

impl ContextCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_parse(
        &mut self,
        source: &Source,
        parser: &dyn AstProvider,
    ) -> SculptResult<Context> {
        if let Some(ctx) = &self.entry {
            if ctx.source.same_buffer(source) {
                return Ok(ctx.clone());
            }
        }
        self.entry = None;
        debug!(
            source = source.name(),
            version = source.version(),
            "context cache miss"
        );
        self.parses += 1;
        let ctx = Context::parse(source, parser)?;
        self.entry = Some(ctx.clone());
        Ok(ctx)
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    pub fn cached_version(&self) -> Option<u32> {
        self.entry.as_ref().map(|c| c.version())
    }

    /// Number of parses performed through this cache.
    pub fn parse_count(&self) -> usize {
        self.parses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::history::SourceHistory;
    use crate::source::parser::JavaParser;

    #[test]
    fn test_cache_reuses_tree_for_same_version() {
        let mut cache = ContextCache::new();
        let src = Source::new("A.java", "class A {}");
        let first = cache.get_or_parse(&src, &JavaParser).unwrap();
        let second = cache.get_or_parse(&src, &JavaParser).unwrap();
        assert_eq!(cache.parse_count(), 1);
        assert!(Arc::ptr_eq(&first.tree, &second.tree));
    }

    #[test]
    fn test_cache_invalidated_by_new_version() {
        let mut cache = ContextCache::new();
        let mut history = SourceHistory::new(Source::new("A.java", "class A {}"));
        cache.get_or_parse(history.current(), &JavaParser).unwrap();
        history.push("class B {}".to_string());
        let ctx = cache.get_or_parse(history.current(), &JavaParser).unwrap();
        assert_eq!(cache.parse_count(), 2);
        assert_eq!(ctx.version(), 1);
        assert!(ctx.tree().text().contains("class B"));
    }

    #[test]
    fn test_cache_detects_reused_version_number() {
        let mut cache = ContextCache::new();
        let mut history = SourceHistory::new(Source::new("A.java", "class A {}"));
        history.push("class B {}".to_string());
        cache.get_or_parse(history.current(), &JavaParser).unwrap();
        history.reset(None).unwrap();
        history.push("class C {}".to_string());
        let ctx = cache.get_or_parse(history.current(), &JavaParser).unwrap();
        assert!(ctx.tree().text().contains("class C"));
    }

    #[test]
    fn test_failed_parse_is_not_cached() {
        let mut cache = ContextCache::new();
        let bad = Source::new("Bad.java", "class {");
        assert!(cache.get_or_parse(&bad, &JavaParser).is_err());
        assert_eq!(cache.cached_version(), None);
    }
}
