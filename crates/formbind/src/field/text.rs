//! Text input field
//!
//! Any `input` that is not a checkbox or radio. The default is the `value`
//! attribute. Multi fields write back positionally (value `i` goes to
//! element `i`); a scalar field writes its first element and clears the rest.

use formbind_dom::{DomTree, ElementQuery, NodeId};

use super::{Binding, FieldModel};
use crate::FormError;

#[derive(Debug, Clone)]
pub struct TextField {
    binding: Binding,
}

impl TextField {
    pub(crate) fn new(binding: Binding) -> Self {
        Self { binding }
    }
}

impl FieldModel for TextField {
    fn binding(&self) -> &Binding {
        &self.binding
    }

    fn binding_mut(&mut self) -> &mut Binding {
        &mut self.binding
    }

    fn on_attach(
        &mut self,
        tree: &mut DomTree,
        _query: &mut ElementQuery,
        element: NodeId,
    ) -> Result<(), FormError> {
        let default = tree.attr(element, "value").unwrap_or_default().to_string();
        self.binding.record_default(default);
        Ok(())
    }

    fn write_back(
        &self,
        tree: &mut DomTree,
        _query: &mut ElementQuery,
        values: &[String],
    ) -> Result<(), FormError> {
        for (element, value) in self.binding.positional(values)? {
            tree.set_attr(element, "value", value);
        }
        Ok(())
    }
}
