//! Checkbox and radio field
//!
//! Elements without a `value` attribute are given `"on"` when attached, the
//! way browsers submit them. Only checked elements contribute a default.
//! Write-back matches by value rather than position: an element is checked
//! exactly when its value is among the incoming values.

use formbind_dom::{DomTree, ElementQuery, NodeId};

use super::{Binding, FieldModel, DEFAULT_CHECKABLE_VALUE};
use crate::FormError;

#[derive(Debug, Clone)]
pub struct CheckableField {
    binding: Binding,
}

impl CheckableField {
    pub(crate) fn new(binding: Binding) -> Self {
        Self { binding }
    }
}

impl FieldModel for CheckableField {
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
        if !tree.has_attr(element, "value") {
            tree.set_attr(element, "value", DEFAULT_CHECKABLE_VALUE);
        }
        if tree.has_attr(element, "checked") {
            let default = tree.attr(element, "value").unwrap_or_default().to_string();
            self.binding.record_default(default);
        }
        Ok(())
    }

    fn write_back(
        &self,
        tree: &mut DomTree,
        _query: &mut ElementQuery,
        values: &[String],
    ) -> Result<(), FormError> {
        for &element in &self.binding.elements {
            let checked = tree
                .attr(element, "value")
                .is_some_and(|value| values.iter().any(|v| v == value));
            if checked {
                tree.set_attr(element, "checked", "checked");
            } else {
                tree.remove_attr(element, "checked");
            }
        }
        Ok(())
    }
}
