//! Import organizer: drop unused imports, add recommended ones, sort.

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::recommend::detectors::{Detector, UnusedImports};
use crate::recommend::imports::recommend_imports;
use crate::source::{Context, NodeId, NodeKind};

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct ImportLine {
    // static imports sort after regular ones
    is_static: bool,
    name: String,
}

impl ImportLine {
    fn render(&self) -> String {
        if self.is_static {
            format!("import static {};", self.name)
        } else {
            format!("import {};", self.name)
        }
    }

    fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    fn namespace(&self) -> &str {
        self.name
            .rsplit_once('.')
            .map(|(ns, _)| ns)
            .unwrap_or("")
    }
}

fn is_static_import(context: &Context, import: NodeId) -> bool {
    let tree = context.tree();
    tree.children(import)
        .iter()
        .any(|c| tree.grammar(*c) == "static")
}

/// Rewrite the import block of `context`. The rest of the text is kept
/// verbatim.
pub fn organize_imports(context: &Context, threshold: usize) -> String {
    let tree = context.tree();
    let text = context.text();
    let imports: Vec<NodeId> = tree
        .children(tree.root())
        .iter()
        .copied()
        .filter(|c| tree.kind(*c) == NodeKind::Import)
        .collect();

    let unused: HashSet<usize> = UnusedImports
        .detect(context)
        .into_iter()
        .map(|issue| issue.location.start)
        .collect();

    let mut lines: BTreeSet<ImportLine> = imports
        .iter()
        .filter(|id| !unused.contains(&tree.node(**id).start))
        .filter_map(|id| {
            tree.name(*id).map(|name| ImportLine {
                is_static: is_static_import(context, *id),
                name: name.to_string(),
            })
        })
        .collect();

    let imported_simple: HashSet<String> = lines
        .iter()
        .filter(|l| !l.is_static && !l.name.ends_with(".*"))
        .map(|l| l.simple_name().to_string())
        .collect();
    let wildcards: HashSet<String> = lines
        .iter()
        .filter(|l| !l.is_static && l.name.ends_with(".*"))
        .map(|l| l.namespace().to_string())
        .collect();

    let recommended = recommend_imports(context, threshold);
    // a simple name offered by two namespaces is ambiguous; add neither
    let mut offers: HashMap<&str, usize> = HashMap::new();
    for rec in recommended.iter().filter(|r| !r.ends_with(".*")) {
        let simple = rec.rsplit('.').next().unwrap_or(rec);
        *offers.entry(simple).or_default() += 1;
    }
    for rec in &recommended {
        let line = ImportLine {
            is_static: false,
            name: rec.clone(),
        };
        if rec.ends_with(".*") {
            lines.insert(line);
            continue;
        }
        let simple = line.simple_name();
        if imported_simple.contains(simple)
            || wildcards.contains(line.namespace())
            || offers.get(simple).copied().unwrap_or(0) > 1
        {
            continue;
        }
        lines.insert(line);
    }

    let block = lines
        .iter()
        .map(ImportLine::render)
        .collect::<Vec<_>>()
        .join("\n");

    match (imports.first(), imports.last()) {
        (Some(first), Some(last)) => {
            let start = tree.node(*first).start;
            let mut end = tree.node(*last).end;
            if block.is_empty() {
                // swallow the blank lines the block leaves behind
                while text[end..].starts_with('\n') {
                    end += 1;
                }
            }
            format!("{}{}{}", &text[..start], block, &text[end..])
        }
        _ if block.is_empty() => text.to_string(),
        _ => {
            let package = tree
                .children(tree.root())
                .iter()
                .copied()
                .find(|c| tree.kind(*c) == NodeKind::Package);
            match package {
                Some(pkg) => {
                    let end = tree.node(pkg).end;
                    format!("{}\n\n{}{}", &text[..end], block, &text[end..])
                }
                None => format!("{block}\n\n{text}"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_WILDCARD_THRESHOLD;
    use crate::testing::{context, PRECONDITIONS};

    #[test]
    fn test_removes_unused_import() {
        let ctx = context(PRECONDITIONS);
        let out = organize_imports(&ctx, DEFAULT_WILDCARD_THRESHOLD);
        assert!(out.starts_with("class Preconditions {"));
    }

    #[test]
    fn test_sorts_and_adds_missing() {
        let text = "package p;\n\nimport static java.lang.Math.max;\nimport java.util.List;\n\nclass A {\n    List<File> xs;\n    int m() { return max(1, 2); }\n}\n";
        let ctx = context(text);
        let out = organize_imports(&ctx, DEFAULT_WILDCARD_THRESHOLD);
        assert!(out.starts_with(
            "package p;\n\nimport java.io.File;\nimport java.util.List;\nimport static java.lang.Math.max;\n\nclass A {"
        ));
    }

    #[test]
    fn test_inserts_block_after_package() {
        let text = "package p;\n\nclass A {\n    Map<String, String> m;\n}\n";
        let ctx = context(text);
        let out = organize_imports(&ctx, DEFAULT_WILDCARD_THRESHOLD);
        assert_eq!(
            out,
            "package p;\n\nimport java.util.Map;\n\nclass A {\n    Map<String, String> m;\n}\n"
        );
    }

    #[test]
    fn test_no_imports_needed_is_identity() {
        let text = "class A {\n    int x;\n}\n";
        let ctx = context(text);
        assert_eq!(organize_imports(&ctx, DEFAULT_WILDCARD_THRESHOLD), text);
    }

    #[test]
    fn test_wildcard_already_present_suppresses_single_types() {
        let text = "import java.util.*;\n\nclass A {\n    List<String> xs;\n}\n";
        let ctx = context(text);
        assert_eq!(organize_imports(&ctx, DEFAULT_WILDCARD_THRESHOLD), text);
    }
}
