//! DOM Tree (arena-based allocation)

use crate::{ElementData, Generation, InternedString, Node, NodeData, NodeId, StringInterner};

/// Arena-based DOM tree
///
/// Node 0 is always the document node. Removed nodes stay in the arena
/// (detached) so outstanding `NodeId`s never dangle.
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
    interner: StringInterner,
    generation: Generation,
}

impl DomTree {
    /// Create a tree holding only the document node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeData::Document)],
            interner: StringInterner::new(),
            generation: Generation::INITIAL,
        }
    }

    /// The document node
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    ///
    /// Counts as a mutation: cached query results are invalidated.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let node = self.nodes.get_mut(id.index())?;
        self.generation.bump();
        Some(node)
    }

    /// Number of nodes in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Current generation
    #[inline]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    pub fn intern(&mut self, s: &str) -> InternedString {
        self.interner.intern(s)
    }

    #[inline]
    pub fn resolve(&self, id: InternedString) -> &str {
        self.interner.get(id)
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::new(data));
        id
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let name = self.interner.intern(&tag.to_ascii_lowercase());
        self.push(NodeData::Element(ElementData::new(name)))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeData::Text(text.to_string()))
    }

    /// Create a detached comment
    pub fn create_comment(&mut self, text: &str) -> NodeId {
        self.push(NodeData::Comment(text.to_string()))
    }

    /// Create a detached doctype
    pub fn create_doctype(&mut self, name: &str) -> NodeId {
        let name = self.interner.intern(name);
        self.push(NodeData::Doctype { name })
    }

    /// Append `child` as the last child of `parent`
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if parent == child || self.get(parent).is_none() || self.get(child).is_none() {
            return;
        }
        self.detach(child);

        let prev_last = self.nodes[parent.index()].last_child;
        {
            let node = &mut self.nodes[child.index()];
            node.parent = parent;
            node.prev_sibling = prev_last;
            node.next_sibling = NodeId::NONE;
        }
        if prev_last.is_valid() {
            self.nodes[prev_last.index()].next_sibling = child;
        } else {
            self.nodes[parent.index()].first_child = child;
        }
        self.nodes[parent.index()].last_child = child;
        self.generation.bump();
    }

    /// Unlink a node from its parent; the node stays in the arena
    pub fn detach(&mut self, id: NodeId) {
        let Some(node) = self.get(id) else {
            return;
        };
        let (parent, prev, next) = (node.parent, node.prev_sibling, node.next_sibling);
        if !parent.is_valid() {
            return;
        }

        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = next;
        } else {
            self.nodes[parent.index()].first_child = next;
        }
        if next.is_valid() {
            self.nodes[next.index()].prev_sibling = prev;
        } else {
            self.nodes[parent.index()].last_child = prev;
        }

        let node = &mut self.nodes[id.index()];
        node.parent = NodeId::NONE;
        node.prev_sibling = NodeId::NONE;
        node.next_sibling = NodeId::NONE;
        self.generation.bump();
    }

    /// Detach every child of `parent`
    pub fn remove_children(&mut self, parent: NodeId) {
        let children: Vec<NodeId> = self.children(parent).map(|(id, _)| id).collect();
        for child in children {
            self.detach(child);
        }
    }

    /// Iterate direct children
    pub fn children(&self, parent: NodeId) -> Children<'_> {
        let next = self
            .get(parent)
            .map(|n| n.first_child)
            .unwrap_or(NodeId::NONE);
        Children { tree: self, next }
    }

    /// Iterate descendants of `root` in document (pre-)order, excluding `root`
    pub fn descendants(&self, root: NodeId) -> Descendants<'_> {
        let next = self
            .get(root)
            .map(|n| n.first_child)
            .filter(|id| id.is_valid());
        Descendants {
            tree: self,
            root,
            next,
        }
    }

    /// Element data for an element node
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id)?.as_element()
    }

    /// Lowercase tag name of an element node
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|e| self.interner.get(e.name))
    }

    /// Read an attribute
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        let name = self.interner.lookup(name)?;
        self.element(id)?.get_attr(name)
    }

    /// Check for an attribute
    pub fn has_attr(&self, id: NodeId, name: &str) -> bool {
        match self.interner.lookup(name) {
            Some(name) => self.element(id).is_some_and(|e| e.has_attr(name)),
            None => false,
        }
    }

    /// Set (or replace) an attribute on an element
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        let name = self.interner.intern(name);
        let Some(elem) = self.nodes.get_mut(id.index()).and_then(Node::as_element_mut) else {
            return;
        };
        elem.set_attr(name, value.to_string());
        self.generation.bump();
    }

    /// Remove an attribute, returning its old value
    pub fn remove_attr(&mut self, id: NodeId, name: &str) -> Option<String> {
        let name = self.interner.lookup(name)?;
        let removed = self.nodes.get_mut(id.index())?.as_element_mut()?.remove_attr(name);
        if removed.is_some() {
            self.generation.bump();
        }
        removed
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self, id: NodeId) -> String {
        if let Some(text) = self.get(id).and_then(Node::as_text) {
            return text.to_string();
        }
        self.descendants(id)
            .filter_map(|child| self.get(child).and_then(Node::as_text))
            .collect()
    }

    /// Replace all children of `id` with a single text node
    pub fn set_text_content(&mut self, id: NodeId, text: &str) {
        if self.get(id).is_none() {
            return;
        }
        self.remove_children(id);
        if !text.is_empty() {
            let child = self.create_text(text);
            self.append_child(id, child);
        }
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over direct children, yielding `(id, node)`
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl<'a> Iterator for Children<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next;
        let node = self.tree.get(id)?;
        self.next = node.next_sibling;
        Some((id, node))
    }
}

/// Pre-order iterator over the descendants of a node
pub struct Descendants<'a> {
    tree: &'a DomTree,
    root: NodeId,
    next: Option<NodeId>,
}

impl Descendants<'_> {
    fn successor(&self, current: NodeId) -> Option<NodeId> {
        let node = self.tree.get(current)?;
        if node.first_child.is_valid() {
            return Some(node.first_child);
        }

        let mut cursor = current;
        while cursor != self.root {
            let node = self.tree.get(cursor)?;
            if node.next_sibling.is_valid() {
                return Some(node.next_sibling);
            }
            cursor = node.parent;
            if !cursor.is_valid() {
                return None;
            }
        }
        None
    }
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.successor(current);
        Some(current)
    }
}
