//! Byte-range text edits and their application.

use crate::errors::ChangeFailure;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextEdit {
    pub start: usize,
    pub end: usize,
    pub replacement: String,
}

impl TextEdit {
    pub fn replace(start: usize, end: usize, replacement: impl Into<String>) -> Self {
        Self {
            start,
            end,
            replacement: replacement.into(),
        }
    }

    pub fn delete(start: usize, end: usize) -> Self {
        Self::replace(start, end, "")
    }

    fn contains(&self, other: &TextEdit) -> bool {
        self.start < self.end && self.start <= other.start && other.end <= self.end
    }
}

/// Apply `edits` to `text`. Duplicate edits collapse, edits nested inside
/// another edit's range are dropped, and any other overlap is rejected.
pub fn apply_edits(text: &str, mut edits: Vec<TextEdit>) -> Result<String, ChangeFailure> {
    edits.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));
    edits.dedup();

    let mut kept: Vec<TextEdit> = Vec::with_capacity(edits.len());
    for edit in edits {
        if edit.start > edit.end || edit.end > text.len() {
            return Err(ChangeFailure::InvalidChange(format!(
                "edit {}..{} is outside 0..{}",
                edit.start,
                edit.end,
                text.len()
            )));
        }
        if let Some(last) = kept.last() {
            if last.contains(&edit) {
                continue;
            }
            if edit.start < last.end {
                return Err(ChangeFailure::InvalidChange(format!(
                    "overlapping edits at {}..{} and {}..{}",
                    last.start, last.end, edit.start, edit.end
                )));
            }
        }
        kept.push(edit);
    }

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for edit in &kept {
        out.push_str(&text[cursor..edit.start]);
        out.push_str(&edit.replacement);
        cursor = edit.end;
    }
    out.push_str(&text[cursor..]);
    Ok(out)
}
