//! Textarea field
//!
//! The default is the element's text content; write-back replaces it,
//! positionally like text inputs.

use formbind_dom::{DomTree, ElementQuery, NodeId};

use super::{Binding, FieldModel};
use crate::FormError;

#[derive(Debug, Clone)]
pub struct TextareaField {
    binding: Binding,
}

impl TextareaField {
    pub(crate) fn new(binding: Binding) -> Self {
        Self { binding }
    }
}

impl FieldModel for TextareaField {
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
        let default = tree.text_content(element);
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
            tree.set_text_content(element, value);
        }
        Ok(())
    }
}
