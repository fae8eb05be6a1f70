//! Form definitions
//!
//! The record a host stores for one form: the template, a display title and
//! the slug under which submitted values are persisted.

use serde::{Deserialize, Serialize};

use crate::{FieldValues, Form, FormConfig, FormError};

/// Slug used when a definition does not name one
pub const DEFAULT_SLUG: &str = "values";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormDefinition {
    pub template: String,

    #[serde(default)]
    pub title: String,

    /// Storage key for submitted values
    #[serde(default, alias = "slag")]
    pub slug: String,
}

impl FormDefinition {
    /// Definition for a bare template
    pub fn from_template(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            ..Default::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Slug, or [`DEFAULT_SLUG`] when empty
    pub fn storage_key(&self) -> &str {
        if self.slug.is_empty() {
            DEFAULT_SLUG
        } else {
            &self.slug
        }
    }

    /// Load the template into a new form
    pub fn build(&self, config: FormConfig) -> Result<Form, FormError> {
        let mut form = Form::with_config(config);
        form.load(&self.template)?;
        Ok(form)
    }

    /// Render the template with stored values applied
    pub fn render(&self, config: FormConfig, values: &FieldValues) -> Result<String, FormError> {
        let mut form = self.build(config)?;
        form.set_values(values.iter().map(|(name, value)| (name, value.clone())))?;
        Ok(form.save_html())
    }

    /// Apply submitted values and return what should be persisted
    ///
    /// Entries that name no field are dropped; fields absent from
    /// `submitted` keep their template defaults.
    pub fn collect(&self, config: FormConfig, submitted: &FieldValues) -> Result<FieldValues, FormError> {
        let mut form = self.build(config)?;
        form.set_values(submitted.iter().map(|(name, value)| (name, value.clone())))?;
        tracing::debug!(slug = self.storage_key(), fields = form.field_names().len(), "collected");
        Ok(form.values())
    }
}
