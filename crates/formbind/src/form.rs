//! Form Controller
//!
//! Owns the parsed template and the ordered field mapping. Every operation
//! goes through here: the fields hold `NodeId`s into the document, so they
//! are only ever handed the tree alongside the call that needs it.

use formbind_dom::{Document, ElementQuery};
use formbind_html::{check_markup, HtmlParser, HtmlSerializer};
use indexmap::IndexMap;

use crate::field::{field_key, Field, FieldKind};
use crate::{FieldValue, FieldValues, FormConfig, FormError};

/// Elements that carry a field value
const FIELD_SELECTOR: &str = "input[name], textarea[name], select[name]";

/// A template bound to its fields
#[derive(Debug)]
pub struct Form {
    config: FormConfig,
    template: String,
    document: Document,
    fields: IndexMap<String, Field>,
    /// Built on first use, replaced on every load
    query: Option<ElementQuery>,
}

impl Default for Form {
    fn default() -> Self {
        Self::new()
    }
}

impl Form {
    /// Create a form with no template loaded
    pub fn new() -> Self {
        Self::with_config(FormConfig::default())
    }

    pub fn with_config(config: FormConfig) -> Self {
        Self {
            config,
            template: String::new(),
            document: Document::empty(),
            fields: IndexMap::new(),
            query: None,
        }
    }

    /// Create a form and load `html` with the default configuration
    pub fn from_html(html: &str) -> Result<Self, FormError> {
        let mut form = Self::new();
        form.load(html)?;
        Ok(form)
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    /// Parse `html` and rebuild the field mapping from its controls
    ///
    /// On error the form keeps whatever it had loaded before.
    pub fn load(&mut self, html: &str) -> Result<(), FormError> {
        let fatal = check_markup(html);
        let parsed = HtmlParser::new().parse(&self.document_shell(html));

        if !parsed.errors.is_empty() {
            tracing::debug!(count = parsed.errors.len(), "recovered markup diagnostics");
        }
        if !fatal.is_empty() {
            if self.config.strict {
                let mut diagnostics = fatal;
                diagnostics.extend(parsed.errors);
                return Err(FormError::InvalidMarkup { diagnostics });
            }
            for diagnostic in &fatal {
                tracing::warn!(%diagnostic, "loading template despite invalid markup");
            }
        }

        let mut document = parsed.document;
        let mut query = ElementQuery::new();
        let fields = Self::discover(&mut document, &mut query)?;

        self.template = html.to_string();
        self.document = document;
        self.fields = fields;
        self.query = Some(query);

        tracing::debug!(fields = self.fields.len(), "template loaded");
        Ok(())
    }

    /// Build one field per unique key from the document's named controls
    fn discover(
        document: &mut Document,
        query: &mut ElementQuery,
    ) -> Result<IndexMap<String, Field>, FormError> {
        let mut fields = IndexMap::new();
        let tree = document.tree_mut();
        let root = tree.root();
        for element in query.select_all(tree, root, FIELD_SELECTOR)? {
            let Some(raw_name) = tree.attr(element, "name").map(str::to_string) else {
                continue;
            };
            let kind = tree
                .tag_name(element)
                .and_then(|tag| FieldKind::classify(tag, tree.attr(element, "type")));
            let Some(kind) = kind else {
                continue;
            };

            let field = fields
                .entry(field_key(&raw_name).to_string())
                .or_insert_with(|| Field::new(kind, &raw_name));
            field.ingest(tree, query, element)?;
        }
        Ok(fields)
    }

    fn document_shell(&self, fragment: &str) -> String {
        let lang = self.config.lang.replace('&', "&amp;").replace('"', "&quot;");
        format!(
            "<!DOCTYPE html><html lang=\"{lang}\"><head><meta charset=\"UTF-8\"></head><body>{fragment}</body></html>"
        )
    }

    /// Raw template passed to the last successful load
    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Field keys in discovery order
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.keys().map(String::as_str).collect()
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    /// Snapshot of every field value, in discovery order
    pub fn values(&self) -> FieldValues {
        self.fields
            .iter()
            .map(|(name, field)| (name.clone(), field.value().clone()))
            .collect()
    }

    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name).map(Field::value)
    }

    /// Store `value` in the field `name` and write it into the template
    ///
    /// Names with no matching field are ignored.
    pub fn set_value(&mut self, name: &str, value: impl Into<FieldValue>) -> Result<(), FormError> {
        let Some(field) = self.fields.get_mut(name) else {
            tracing::debug!(name, "ignoring value for unknown field");
            return Ok(());
        };
        let query = self.query.get_or_insert_with(ElementQuery::new);
        field.set_value(self.document.tree_mut(), query, value.into())
    }

    /// Apply every entry in order, stopping at the first error
    pub fn set_values<I, K, V>(&mut self, values: I) -> Result<(), FormError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<FieldValue>,
    {
        for (name, value) in values {
            self.set_value(name.as_ref(), value)?;
        }
        Ok(())
    }

    /// Serialize the template back out, without the document shell
    pub fn save_html(&self) -> String {
        let body = self.document.body();
        if !body.is_valid() {
            return String::new();
        }
        HtmlSerializer::xhtml().serialize_inner(self.document.tree(), body)
    }
}
