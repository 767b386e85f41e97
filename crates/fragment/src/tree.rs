use anyhow::{anyhow, Error};
use indextree::{Arena, Node, NodeId};
use smallvec::SmallVec;

/// Attribute whose whitespace-separated value names the dependencies an
/// element is rendered from. Elements without it are invisible to
/// reconciliation.
pub const REF_ATTR: &str = "ref";

/// Attribute carrying the content digest of the record a node was rendered
/// from. Only list-rendered subtrees carry it.
pub const HASH_ATTR: &str = "data-hash";

#[derive(Debug, Clone, Default)]
pub enum NodeKind {
    /// Detached container produced by a compile; also the kind of the live
    /// root node itself.
    #[default]
    Fragment,
    Element {
        tag: String,
    },
    Text {
        text: String,
    },
    Comment {
        text: String,
    },
}

#[derive(Debug, Clone, Default)]
pub struct NodeData {
    pub kind: NodeKind,
    pub attrs: SmallVec<(String, String), 4>,
}

impl NodeData {
    pub fn element(tag: &str) -> Self {
        Self {
            kind: NodeKind::Element {
                tag: tag.to_string(),
            },
            attrs: SmallVec::new(),
        }
    }

    pub fn text(text: String) -> Self {
        Self {
            kind: NodeKind::Text { text },
            attrs: SmallVec::new(),
        }
    }

    pub fn comment(text: String) -> Self {
        Self {
            kind: NodeKind::Comment { text },
            attrs: SmallVec::new(),
        }
    }
}

/// One arena per component instance: the live root and every compiled
/// fragment share it, so reconciliation can splice nodes between fragments
/// without copying.
pub struct FragmentTree {
    arena: Arena<NodeData>,
    root: NodeId,
}

impl FragmentTree {
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let root = arena.new_node(NodeData::default());
        Self { arena, root }
    }

    /// The live root every mounted fragment hangs off.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Allocate a fresh detached container for a compile pass.
    pub fn new_fragment(&mut self) -> NodeId {
        self.arena.new_node(NodeData::default())
    }

    pub fn new_element(&mut self, tag: &str) -> NodeId {
        self.arena.new_node(NodeData::element(tag))
    }

    pub fn new_text(&mut self, text: String) -> NodeId {
        self.arena.new_node(NodeData::text(text))
    }

    pub fn new_comment(&mut self, text: String) -> NodeId {
        self.arena.new_node(NodeData::comment(text))
    }

    pub fn data(&self, node: NodeId) -> Option<&NodeData> {
        self.arena.get(node).map(Node::get)
    }

    pub fn is_element(&self, node: NodeId) -> bool {
        matches!(
            self.data(node).map(|data| &data.kind),
            Some(NodeKind::Element { .. })
        )
    }

    /// Append `child` under `parent`, detaching it from any previous parent.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), Error> {
        parent.checked_append(child, &mut self.arena)?;
        Ok(())
    }

    /// Set or overwrite a single attribute on an element node.
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        let Some(data) = self.arena.get_mut(node).map(Node::get_mut) else {
            return;
        };
        if let Some(slot) = data.attrs.iter_mut().find(|(key, _)| key == name) {
            slot.1 = value.to_string();
        } else {
            data.attrs.push((name.to_string(), value.to_string()));
        }
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.data(node)?
            .attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.arena.get(node).and_then(Node::parent)
    }

    pub fn children(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        node.children(&self.arena)
    }

    /// Descendants of `node` in document order, excluding `node` itself.
    pub fn descendants(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        node.descendants(&self.arena).skip(1)
    }

    /// Whether `node` is currently part of the live tree.
    pub fn is_attached(&self, node: NodeId) -> bool {
        node.ancestors(&self.arena).any(|ancestor| ancestor == self.root)
    }

    /// Splice `new` into `old`'s tree position and detach `old`. The
    /// detached subtree stays allocated so handles held by dependency maps
    /// remain valid.
    pub fn replace(&mut self, old: NodeId, new: NodeId) -> Result<(), Error> {
        if self.parent(old).is_none() {
            return Err(anyhow!("replacement target has no parent"));
        }
        old.checked_insert_after(new, &mut self.arena)?;
        old.detach(&mut self.arena);
        Ok(())
    }

    /// Move the children of a compiled container under `parent`; the spent
    /// container is left behind, empty and detached.
    pub fn mount(&mut self, parent: NodeId, container: NodeId) -> Result<(), Error> {
        let children: Vec<NodeId> = container.children(&self.arena).collect();
        for child in children {
            parent.checked_append(child, &mut self.arena)?;
        }
        Ok(())
    }

    /// First identity-tagged descendant of `scope`, in document order.
    pub fn first_tagged(&self, scope: NodeId) -> Option<NodeId> {
        self.descendants(scope)
            .find(|&node| self.attribute(node, HASH_ATTR).is_some())
    }

    /// First descendant of `scope` whose identity tag equals `digest`.
    pub fn find_tagged(&self, scope: NodeId, digest: &str) -> Option<NodeId> {
        self.descendants(scope)
            .find(|&node| self.attribute(node, HASH_ATTR) == Some(digest))
    }

    /// Identity-tagged nodes in `scope`'s subtree, including `scope` itself,
    /// paired with their digests in document order.
    pub fn tagged_subtree(&self, scope: NodeId) -> Vec<(NodeId, String)> {
        scope
            .descendants(&self.arena)
            .filter_map(|node| {
                self.attribute(node, HASH_ATTR)
                    .map(|digest| (node, digest.to_string()))
            })
            .collect()
    }

    /// Elements under `scope` declaring dependency names, in document order.
    pub fn referenced(&self, scope: NodeId) -> Vec<NodeId> {
        self.descendants(scope)
            .filter(|&node| self.attribute(node, REF_ATTR).is_some())
            .collect()
    }

    /// Whitespace-split dependency names declared by `node`.
    pub fn ref_names(&self, node: NodeId) -> Vec<String> {
        self.attribute(node, REF_ATTR)
            .map(|value| value.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default()
    }

    pub(crate) fn arena(&self) -> &Arena<NodeData> {
        &self.arena
    }
}

impl Default for FragmentTree {
    fn default() -> Self {
        Self::new()
    }
}
