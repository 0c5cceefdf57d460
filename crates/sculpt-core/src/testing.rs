//! Shared fixtures for unit tests.

use crate::models::Location;
use crate::source::{Context, JavaParser, Source};

pub(crate) const PRECONDITIONS: &str = "import java.util.List;\n\
\n\
class Preconditions {\n\
\x20   static void check(boolean cond, String message) {\n\
\x20       if (!cond) throw new IllegalArgumentException(message);\n\
\x20   }\n\
}\n";

pub(crate) fn context(text: &str) -> Context {
    Context::parse(&Source::new("Preconditions.java", text), &JavaParser).unwrap()
}

/// Location of the `n`-th (0-based) occurrence of `needle`.
pub(crate) fn nth(ctx: &Context, needle: &str, n: usize) -> Location {
    let (start, _) = ctx
        .text()
        .match_indices(needle)
        .nth(n)
        .unwrap_or_else(|| panic!("{needle:?} occurrence {n} not found"));
    ctx.source().location(start, start + needle.len()).unwrap()
}

pub(crate) fn at(ctx: &Context, needle: &str) -> Location {
    nth(ctx, needle, 0)
}
