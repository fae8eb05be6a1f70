//! Field Models
//!
//! A field is one named logical input backed by one or more template
//! elements. The variant is picked once, from the first element carrying the
//! field's name, and decides how defaults are read and values written back.

mod checkable;
mod select;
mod text;
mod textarea;

use formbind_dom::{DomTree, ElementQuery, NodeId};

pub use checkable::CheckableField;
pub use select::SelectField;
pub use text::TextField;
pub use textarea::TextareaField;

use crate::{FieldValue, FormError};

/// Suffix marking a multi-value field name (`tags[]`)
pub const ARRAY_MARKER: &str = "[]";

/// Value given to checkboxes and radios without a `value` attribute
pub const DEFAULT_CHECKABLE_VALUE: &str = "on";

/// Field key for a raw `name` attribute
pub fn field_key(raw_name: &str) -> &str {
    raw_name.strip_suffix(ARRAY_MARKER).unwrap_or(raw_name)
}

/// Behavioral variant of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Any `input` that is not a checkbox or radio
    Text,
    /// `input type=checkbox|radio`
    Checkable,
    Textarea,
    Select,
}

impl FieldKind {
    /// Classify an element by tag name and `type` attribute
    pub fn classify(tag: &str, input_type: Option<&str>) -> Option<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "textarea" => Some(Self::Textarea),
            "select" => Some(Self::Select),
            "input" => match input_type.map(str::to_ascii_lowercase).as_deref() {
                Some("checkbox" | "radio") => Some(Self::Checkable),
                _ => Some(Self::Text),
            },
            _ => None,
        }
    }
}

/// State shared by every variant
#[derive(Debug, Clone)]
pub(crate) struct Binding {
    name: String,
    raw_name: String,
    multi: bool,
    elements: Vec<NodeId>,
    value: FieldValue,
}

impl Binding {
    fn new(raw_name: &str) -> Self {
        let multi = raw_name.ends_with(ARRAY_MARKER);
        Self {
            name: field_key(raw_name).to_string(),
            raw_name: raw_name.to_string(),
            multi,
            elements: Vec::new(),
            value: if multi {
                FieldValue::Multiple(Vec::new())
            } else {
                FieldValue::Empty
            },
        }
    }

    /// Accumulate (multi) or overwrite (single) the default value
    fn record_default(&mut self, value: String) {
        match &mut self.value {
            FieldValue::Multiple(values) if self.multi => values.push(value),
            slot => *slot = FieldValue::Single(value),
        }
    }

    /// Pair each element with the value it receives on write-back
    ///
    /// A multi field needs at least one value per element (value `i` goes to
    /// element `i`). A scalar field writes its value to the first element
    /// and clears the others.
    fn positional<'a>(&self, values: &'a [String]) -> Result<Vec<(NodeId, &'a str)>, FormError> {
        if !self.multi {
            let first = values.first().map_or("", String::as_str);
            return Ok(self
                .elements
                .iter()
                .enumerate()
                .map(|(i, &element)| (element, if i == 0 { first } else { "" }))
                .collect());
        }
        if values.len() < self.elements.len() {
            return Err(FormError::ValueCountMismatch {
                field: self.name.clone(),
                expected: self.elements.len(),
                actual: values.len(),
            });
        }
        Ok(self
            .elements
            .iter()
            .copied()
            .zip(values.iter().map(String::as_str))
            .collect())
    }
}

/// Variant-specific behavior
trait FieldModel {
    fn binding(&self) -> &Binding;

    fn binding_mut(&mut self) -> &mut Binding;

    /// Read the default value contributed by a newly attached element
    fn on_attach(
        &mut self,
        tree: &mut DomTree,
        query: &mut ElementQuery,
        element: NodeId,
    ) -> Result<(), FormError>;

    /// Push `values` into every attached element; must not touch the tree
    /// when it returns an error
    fn write_back(
        &self,
        tree: &mut DomTree,
        query: &mut ElementQuery,
        values: &[String],
    ) -> Result<(), FormError>;
}

/// A named field and its elements
#[derive(Debug, Clone)]
pub enum Field {
    Text(TextField),
    Checkable(CheckableField),
    Textarea(TextareaField),
    Select(SelectField),
}

impl Field {
    /// Create an empty field of `kind` for the raw `name` attribute
    pub fn new(kind: FieldKind, raw_name: &str) -> Self {
        let binding = Binding::new(raw_name);
        match kind {
            FieldKind::Text => Self::Text(TextField::new(binding)),
            FieldKind::Checkable => Self::Checkable(CheckableField::new(binding)),
            FieldKind::Textarea => Self::Textarea(TextareaField::new(binding)),
            FieldKind::Select => Self::Select(SelectField::new(binding)),
        }
    }

    fn model(&self) -> &dyn FieldModel {
        match self {
            Self::Text(f) => f,
            Self::Checkable(f) => f,
            Self::Textarea(f) => f,
            Self::Select(f) => f,
        }
    }

    fn model_mut(&mut self) -> &mut dyn FieldModel {
        match self {
            Self::Text(f) => f,
            Self::Checkable(f) => f,
            Self::Textarea(f) => f,
            Self::Select(f) => f,
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Text(_) => FieldKind::Text,
            Self::Checkable(_) => FieldKind::Checkable,
            Self::Textarea(_) => FieldKind::Textarea,
            Self::Select(_) => FieldKind::Select,
        }
    }

    /// Field key (raw name without the array marker)
    pub fn name(&self) -> &str {
        &self.model().binding().name
    }

    /// `name` attribute as written in the template
    pub fn raw_name(&self) -> &str {
        &self.model().binding().raw_name
    }

    pub fn is_multi(&self) -> bool {
        self.model().binding().multi
    }

    /// Bound elements in document order
    pub fn elements(&self) -> &[NodeId] {
        &self.model().binding().elements
    }

    pub fn value(&self) -> &FieldValue {
        &self.model().binding().value
    }

    /// Attach an element and fold in its default value
    pub(crate) fn ingest(
        &mut self,
        tree: &mut DomTree,
        query: &mut ElementQuery,
        element: NodeId,
    ) -> Result<(), FormError> {
        let model = self.model_mut();
        if model.binding().elements.contains(&element) {
            return Ok(());
        }
        model.binding_mut().elements.push(element);
        tracing::trace!(field = %model.binding().name, ?element, "ingest");
        model.on_attach(tree, query, element)
    }

    /// Store `value` and write it into the bound elements
    pub(crate) fn set_value(
        &mut self,
        tree: &mut DomTree,
        query: &mut ElementQuery,
        value: FieldValue,
    ) -> Result<(), FormError> {
        let model = self.model_mut();
        model.write_back(tree, query, value.as_slice())?;
        model.binding_mut().value = value;
        Ok(())
    }
}
