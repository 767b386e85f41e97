use anyhow::Error;
use fragment::{DependencyMap, FragmentTree};
use html5ever::tendril::TendrilSink as _;
use html5ever::{local_name, namespace_url, ns, parse_fragment, ParseOpts, QualName};
use indextree::NodeId;
use log::trace;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

use crate::model::Template;

/// Compile a template into a detached fragment and its dependency map.
///
/// The rendered markup is parsed as a body-context fragment, converted into
/// a detached subtree of `tree`, and scanned in document order for elements
/// declaring dependency names. Parser failures are fatal to this render call
/// and propagate unchanged.
pub fn compile(
    tree: &mut FragmentTree,
    template: &Template,
) -> Result<(NodeId, DependencyMap), Error> {
    let markup = template.markup();
    let dom: RcDom = parse_fragment(
        RcDom::default(),
        ParseOpts::default(),
        QualName::new(None, ns!(html), local_name!("body")),
        Vec::new(),
    )
    .from_utf8()
    .read_from(&mut markup.as_bytes())?;

    let container = tree.new_fragment();
    for child in dom.document.children.borrow().iter() {
        convert_fragment_root(tree, child, container)?;
    }

    let mut map = DependencyMap::new();
    for element in tree.referenced(container) {
        for name in tree.ref_names(element) {
            map.push(&name, element);
        }
    }
    trace!(
        "compiled template: {} bytes of markup, {} dependency names",
        markup.len(),
        map.len()
    );
    Ok((container, map))
}

/// Fragment parsing wraps the parsed children in a synthetic `html` element;
/// unwrap it so the container holds the template's own nodes.
fn convert_fragment_root(
    tree: &mut FragmentTree,
    rc_node: &Handle,
    parent: NodeId,
) -> Result<(), Error> {
    if let RcNodeData::Element { name, .. } = &rc_node.data {
        if name.local.as_ref() == "html" {
            for child in rc_node.children.borrow().iter() {
                convert_node(tree, child, parent)?;
            }
            return Ok(());
        }
    }
    convert_node(tree, rc_node, parent)
}

/// Convert an rcdom node into the arena under `parent`.
fn convert_node(tree: &mut FragmentTree, rc_node: &Handle, parent: NodeId) -> Result<(), Error> {
    match &rc_node.data {
        RcNodeData::Document => {
            for child in rc_node.children.borrow().iter() {
                convert_node(tree, child, parent)?;
            }
        }

        RcNodeData::Text { contents } => {
            let text = contents.borrow().to_string();
            // Skip whitespace-only text between markup segments.
            if text.trim().is_empty() {
                return Ok(());
            }
            let node = tree.new_text(text);
            tree.append_child(parent, node)?;
        }

        RcNodeData::Comment { contents } => {
            let node = tree.new_comment(contents.to_string());
            tree.append_child(parent, node)?;
        }

        RcNodeData::Element { name, attrs, .. } => {
            let node = tree.new_element(name.local.as_ref());
            for attr in attrs.borrow().iter() {
                tree.set_attribute(node, attr.name.local.as_ref(), &attr.value);
            }
            tree.append_child(parent, node)?;
            for child in rc_node.children.borrow().iter() {
                convert_node(tree, child, node)?;
            }
        }

        // Doctypes and processing instructions have no representation here.
        RcNodeData::Doctype { .. } | RcNodeData::ProcessingInstruction { .. } => {}
    }
    Ok(())
}
