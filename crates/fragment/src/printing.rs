use core::fmt;

use indextree::NodeId;

use crate::tree::{FragmentTree, NodeKind};

fn sorted_attrs(tree: &FragmentTree, node: NodeId) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = tree
        .data(node)
        .map(|data| data.attrs.iter().cloned().collect())
        .unwrap_or_default();
    pairs.sort_by(|left, right| left.0.cmp(&right.0));
    pairs
}

fn write_markup(tree: &FragmentTree, node: NodeId, out: &mut String) {
    let Some(data) = tree.data(node) else {
        return;
    };
    match &data.kind {
        // Containers render their children only.
        NodeKind::Fragment => {
            for child in tree.children(node) {
                write_markup(tree, child, out);
            }
        }
        NodeKind::Element { tag } => {
            out.push('<');
            out.push_str(tag);
            for (name, value) in sorted_attrs(tree, node) {
                out.push(' ');
                out.push_str(&name);
                out.push_str("=\"");
                out.push_str(&value);
                out.push('"');
            }
            out.push('>');
            for child in tree.children(node) {
                write_markup(tree, child, out);
            }
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
        NodeKind::Text { text } => {
            if !text.trim().is_empty() {
                out.push_str(text);
            }
        }
        NodeKind::Comment { text } => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
    }
}

impl FragmentTree {
    /// Deterministic markup rendering of a subtree: attributes sorted by
    /// name, whitespace-only text skipped. Intended for snapshots and test
    /// comparisons, not for re-parsing.
    pub fn to_markup(&self, node: NodeId) -> String {
        let mut out = String::new();
        write_markup(self, node, &mut out);
        out
    }
}

impl fmt::Debug for FragmentTree {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_indent(formatter: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
            for _ in 0..depth {
                formatter.write_str("  ")?;
            }
            Ok(())
        }

        fn fmt_node(
            tree: &FragmentTree,
            node: NodeId,
            formatter: &mut fmt::Formatter<'_>,
            depth: usize,
        ) -> fmt::Result {
            let Some(data) = tree.data(node) else {
                return Ok(());
            };
            match &data.kind {
                NodeKind::Fragment => {
                    write_indent(formatter, depth)?;
                    writeln!(formatter, "#fragment")?;
                }
                NodeKind::Element { tag } => {
                    write_indent(formatter, depth)?;
                    write!(formatter, "<{tag}")?;
                    for (name, value) in sorted_attrs(tree, node) {
                        write!(formatter, " {name}=\"{value}\"")?;
                    }
                    writeln!(formatter, ">")?;
                }
                NodeKind::Text { text } => {
                    if text.trim().is_empty() {
                        return Ok(());
                    }
                    write_indent(formatter, depth)?;
                    writeln!(formatter, "{text:?}")?;
                }
                NodeKind::Comment { text } => {
                    write_indent(formatter, depth)?;
                    writeln!(formatter, "<!--{text}-->")?;
                }
            }
            for child in node.children(tree.arena()) {
                fmt_node(tree, child, formatter, depth + 1)?;
            }
            Ok(())
        }

        fmt_node(self, self.root(), formatter, 0)
    }
}
