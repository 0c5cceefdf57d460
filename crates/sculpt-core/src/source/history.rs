//! Versioned, immutable source buffers.

use std::fmt;
use std::sync::Arc;

use crate::errors::{SculptError, SculptResult};
use crate::models::Location;

/// One version of a named source file. Content is shared, never mutated.
#[derive(Clone, PartialEq, Eq)]
pub struct Source {
    name: Arc<str>,
    version: u32,
    content: Arc<str>,
}

impl Source {
    /// Create the origin (version 0) of a source.
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: Arc::from(name.into()),
            version: 0,
            content: Arc::from(content.into()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub(crate) fn shared_content(&self) -> Arc<str> {
        Arc::clone(&self.content)
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// True when both values denote the same buffer (same name, version and
    /// content allocation).
    pub fn same_buffer(&self, other: &Source) -> bool {
        self.version == other.version
            && self.name == other.name
            && Arc::ptr_eq(&self.content, &other.content)
    }

    /// Build a checked location into this version.
    pub fn location(&self, start: usize, end: usize) -> SculptResult<Location> {
        if start > end || end > self.content.len() {
            return Err(SculptError::InvalidLocation(format!(
                "{}..{} is outside 0..{} of {}",
                start,
                end,
                self.content.len(),
                self.name
            )));
        }
        if !self.content.is_char_boundary(start) || !self.content.is_char_boundary(end) {
            return Err(SculptError::InvalidLocation(format!(
                "{start}..{end} splits a UTF-8 sequence in {}",
                self.name
            )));
        }
        Ok(Location {
            source: self.name.to_string(),
            version: self.version,
            start,
            end,
        })
    }

    /// Location spanning the entire content.
    pub fn whole(&self) -> Location {
        Location {
            source: self.name.to_string(),
            version: self.version,
            start: 0,
            end: self.content.len(),
        }
    }

    /// Text under `location`, if it belongs to this version.
    pub fn slice(&self, location: &Location) -> Option<&str> {
        if !self.owns(location) {
            return None;
        }
        self.content.get(location.start..location.end)
    }

    pub fn owns(&self, location: &Location) -> bool {
        location.source == *self.name && location.version == self.version
    }

    fn successor(&self, content: String) -> Source {
        Source {
            name: Arc::clone(&self.name),
            version: self.version + 1,
            content: Arc::from(content),
        }
    }
}

impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Source")
            .field("name", &self.name)
            .field("version", &self.version)
            .field("len", &self.content.len())
            .finish()
    }
}

/// Every version of one tracked source, origin first.
#[derive(Clone, Debug)]
pub struct SourceHistory {
    versions: Vec<Source>,
}

impl SourceHistory {
    pub fn new(origin: Source) -> Self {
        let origin = if origin.version == 0 {
            origin
        } else {
            Source {
                version: 0,
                ..origin
            }
        };
        Self {
            versions: vec![origin],
        }
    }

    pub fn current(&self) -> &Source {
        // never empty: constructed with an origin and reset keeps index 0
        &self.versions[self.versions.len() - 1]
    }

    pub fn origin(&self) -> &Source {
        &self.versions[0]
    }

    pub fn get(&self, version: u32) -> Option<&Source> {
        self.versions.get(version as usize)
    }

    /// Number of versions, the origin included.
    pub fn len(&self) -> usize {
        self.versions.len()
    }

    /// Always false: the origin is created with the history and `reset`
    /// never truncates past it.
    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    /// Append a new version holding `content` and return it.
    pub fn push(&mut self, content: String) -> &Source {
        let next = self.current().successor(content);
        self.versions.push(next);
        self.current()
    }

    /// Restore the tracked source to `version` (origin when `None`). Later
    /// versions are discarded.
    pub fn reset(&mut self, version: Option<u32>) -> SculptResult<&Source> {
        let target = version.unwrap_or(0);
        if target as usize >= self.versions.len() {
            return Err(SculptError::UnknownVersion {
                source_name: self.origin().name().to_string(),
                version: target,
            });
        }
        self.versions.truncate(target as usize + 1);
        Ok(self.current())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_source_is_origin() {
        let src = Source::new("A.java", "class A {}");
        assert_eq!(src.version(), 0);
        assert_eq!(src.name(), "A.java");
        assert_eq!(src.len(), 10);
    }

    #[test]
    fn test_location_bounds() {
        let src = Source::new("A.java", "class A {}");
        assert!(src.location(0, 5).is_ok());
        assert!(src.location(6, 5).is_err());
        assert!(src.location(0, 11).is_err());
        let loc = src.location(6, 7).unwrap();
        assert_eq!(src.slice(&loc), Some("A"));
    }

    #[test]
    fn test_location_rejects_split_utf8() {
        let src = Source::new("A.java", "// é\nclass A {}");
        assert!(src.location(0, 4).is_err());
        assert!(src.location(0, 5).is_ok());
    }

    #[test]
    fn test_history_push_and_get() {
        let mut history = SourceHistory::new(Source::new("A.java", "v0"));
        history.push("v1".to_string());
        history.push("v2".to_string());
        assert_eq!(history.len(), 3);
        assert_eq!(history.current().version(), 2);
        assert_eq!(history.get(1).map(|s| s.content()), Some("v1"));
        assert_eq!(history.origin().content(), "v0");
    }

    #[test]
    fn test_history_reset_to_origin() {
        let mut history = SourceHistory::new(Source::new("A.java", "origin text"));
        history.push("one".to_string());
        history.push("two".to_string());
        let restored = history.reset(None).unwrap();
        assert_eq!(restored.content(), "origin text");
        assert_eq!(history.len(), 1);
        assert!(!history.is_empty());
    }

    #[test]
    fn test_history_reset_to_version() {
        let mut history = SourceHistory::new(Source::new("A.java", "v0"));
        history.push("v1".to_string());
        history.push("v2".to_string());
        assert_eq!(history.reset(Some(1)).unwrap().content(), "v1");
        assert!(matches!(
            history.reset(Some(5)),
            Err(SculptError::UnknownVersion { version: 5, .. })
        ));
    }

    #[test]
    fn test_stale_location_not_owned() {
        let mut history = SourceHistory::new(Source::new("A.java", "class A {}"));
        let loc = history.current().location(0, 5).unwrap();
        history.push("class B {}".to_string());
        assert!(history.current().slice(&loc).is_none());
    }
}
