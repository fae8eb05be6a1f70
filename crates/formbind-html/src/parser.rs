//! HTML5 Parser implementation
//!
//! Uses html5ever's RcDom and converts it to the formbind arena tree.
//! Whitespace-only text is kept so templates serialize back unchanged.

use formbind_dom::{Document, DomTree, NodeId};
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::{parse_document, ParseOpts};
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

use crate::{ParseError, ParseResult};

/// HTML5 parser
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlParser {
    exact_errors: bool,
}

impl HtmlParser {
    /// Create a new HTML parser
    pub fn new() -> Self {
        Self::default()
    }

    /// Report detailed tree builder diagnostics (slower)
    pub fn with_exact_errors(mut self, exact: bool) -> Self {
        self.exact_errors = exact;
        self
    }

    /// Parse a complete HTML document string
    pub fn parse(&self, html: &str) -> ParseResult {
        tracing::debug!(bytes = html.len(), "parsing HTML document");

        let opts = ParseOpts {
            tree_builder: TreeBuilderOpts {
                exact_errors: self.exact_errors,
                ..Default::default()
            },
            ..Default::default()
        };
        let dom = parse_document(RcDom::default(), opts).one(html);
        let RcDom { document: root, errors, .. } = dom;

        let mut document = Document::empty();
        let tree = document.tree_mut();
        let tree_root = tree.root();
        self.convert_node(&root, tree, tree_root);
        document.finalize();

        let errors: Vec<ParseError> = errors
            .into_inner()
            .into_iter()
            .map(|message| ParseError::UnexpectedToken {
                message: message.into_owned(),
            })
            .collect();

        tracing::debug!(nodes = document.tree().len(), errors = errors.len(), "parsed");
        ParseResult { document, errors }
    }

    /// Convert an RcDom node to our DOM format
    fn convert_node(&self, handle: &Handle, tree: &mut DomTree, parent: NodeId) {
        match &handle.data {
            RcNodeData::Document => {
                for child in handle.children.borrow().iter() {
                    self.convert_node(child, tree, parent);
                }
            }
            RcNodeData::Doctype { name, .. } => {
                let id = tree.create_doctype(name);
                tree.append_child(parent, id);
            }
            RcNodeData::Text { contents } => {
                let id = tree.create_text(&contents.borrow());
                tree.append_child(parent, id);
            }
            RcNodeData::Comment { contents } => {
                let id = tree.create_comment(contents);
                tree.append_child(parent, id);
            }
            RcNodeData::Element { name, attrs, .. } => {
                let id = tree.create_element(&name.local);
                for attr in attrs.borrow().iter() {
                    tree.set_attr(id, &attr.name.local, &attr.value);
                }
                tree.append_child(parent, id);

                for child in handle.children.borrow().iter() {
                    self.convert_node(child, tree, id);
                }
            }
            RcNodeData::ProcessingInstruction { .. } => {}
        }
    }
}
