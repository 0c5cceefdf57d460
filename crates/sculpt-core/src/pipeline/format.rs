//! Formatter capability and the default brace-depth re-indenter.

use crate::config::DEFAULT_INDENT_WIDTH;

/// Total text-to-text formatter. Output is re-validated by the caller.
pub trait Formatter: Send + Sync {
    fn name(&self) -> &'static str;

    fn format(&self, text: &str) -> String;
}

/// Re-indents by brace depth, collapses blank-line runs, trims trailing
/// whitespace and ends the text with exactly one newline. Braces inside
/// string, character and text-block literals or comments do not count.
#[derive(Clone, Copy, Debug)]
pub struct BraceFormatter {
    indent_width: usize,
}

impl Default for BraceFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_INDENT_WIDTH)
    }
}

#[derive(Default)]
struct ScanState {
    depth: usize,
    in_block_comment: bool,
    in_text_block: bool,
}

impl ScanState {
    /// Advance over one line, updating depth and multi-line literal state.
    fn scan(&mut self, line: &str) {
        let bytes = line.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            let rest = &bytes[i..];
            if self.in_block_comment {
                if rest.starts_with(b"*/") {
                    self.in_block_comment = false;
                    i += 2;
                } else {
                    i += 1;
                }
                continue;
            }
            if self.in_text_block {
                if rest.starts_with(b"\"\"\"") {
                    self.in_text_block = false;
                    i += 3;
                } else if rest[0] == b'\\' {
                    i += 2;
                } else {
                    i += 1;
                }
                continue;
            }
            match rest[0] {
                b'/' if rest.starts_with(b"//") => return,
                b'/' if rest.starts_with(b"/*") => {
                    self.in_block_comment = true;
                    i += 2;
                }
                b'"' if rest.starts_with(b"\"\"\"") => {
                    self.in_text_block = true;
                    i += 3;
                }
                quote @ (b'"' | b'\'') => {
                    i += 1;
                    while i < bytes.len() {
                        match bytes[i] {
                            b'\\' => i += 2,
                            b if b == quote => {
                                i += 1;
                                break;
                            }
                            _ => i += 1,
                        }
                    }
                }
                b'{' => {
                    self.depth += 1;
                    i += 1;
                }
                b'}' => {
                    self.depth = self.depth.saturating_sub(1);
                    i += 1;
                }
                _ => i += 1,
            }
        }
    }
}

impl BraceFormatter {
    pub fn new(indent_width: usize) -> Self {
        Self { indent_width }
    }
}

impl Formatter for BraceFormatter {
    fn name(&self) -> &'static str {
        "brace"
    }

    fn format(&self, text: &str) -> String {
        let mut state = ScanState::default();
        let mut lines: Vec<String> = Vec::new();

        for raw in text.lines() {
            if state.in_text_block {
                lines.push(raw.to_string());
                state.scan(raw);
                continue;
            }
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                if lines.last().is_some_and(|l| !l.is_empty()) {
                    lines.push(String::new());
                }
                continue;
            }

            let in_comment = state.in_block_comment;
            let closers = if in_comment {
                0
            } else {
                trimmed.bytes().take_while(|b| *b == b'}').count()
            };
            let depth = state.depth.saturating_sub(closers);
            let indent = " ".repeat(depth * self.indent_width);
            let line = if in_comment && trimmed.starts_with('*') {
                format!("{indent} {trimmed}")
            } else {
                format!("{indent}{trimmed}")
            };
            lines.push(line);
            state.scan(trimmed);
        }

        while lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }
        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}
