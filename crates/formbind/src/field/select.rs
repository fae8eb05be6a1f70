//! Select field
//!
//! The unit of reading and writing is the `option`, found by a query scoped
//! to each bound `select`. Options without a `value` attribute take their
//! text content. Selected options contribute defaults one by one, so two
//! selected options in a single-value field overwrite each other.

use formbind_dom::{DomTree, ElementQuery, NodeId};

use super::{Binding, FieldModel};
use crate::FormError;

const OPTION_SELECTOR: &str = "option";

#[derive(Debug, Clone)]
pub struct SelectField {
    binding: Binding,
}

impl SelectField {
    pub(crate) fn new(binding: Binding) -> Self {
        Self { binding }
    }

    /// Options of every bound select, in document order
    fn options(&self, tree: &DomTree, query: &mut ElementQuery) -> Result<Vec<NodeId>, FormError> {
        let mut options = Vec::new();
        for &select in &self.binding.elements {
            options.extend(query.select_all(tree, select, OPTION_SELECTOR)?);
        }
        Ok(options)
    }
}

impl FieldModel for SelectField {
    fn binding(&self) -> &Binding {
        &self.binding
    }

    fn binding_mut(&mut self) -> &mut Binding {
        &mut self.binding
    }

    fn on_attach(
        &mut self,
        tree: &mut DomTree,
        query: &mut ElementQuery,
        element: NodeId,
    ) -> Result<(), FormError> {
        for option in query.select_all(tree, element, OPTION_SELECTOR)? {
            if !tree.has_attr(option, "value") {
                let text = tree.text_content(option);
                tree.set_attr(option, "value", &text);
            }
            if tree.has_attr(option, "selected") {
                let default = tree.attr(option, "value").unwrap_or_default().to_string();
                self.binding.record_default(default);
            }
        }
        Ok(())
    }

    fn write_back(
        &self,
        tree: &mut DomTree,
        query: &mut ElementQuery,
        values: &[String],
    ) -> Result<(), FormError> {
        for option in self.options(tree, query)? {
            let selected = tree
                .attr(option, "value")
                .is_some_and(|value| values.iter().any(|v| v == value));
            if selected {
                tree.set_attr(option, "selected", "selected");
            } else {
                tree.remove_attr(option, "selected");
            }
        }
        Ok(())
    }
}
