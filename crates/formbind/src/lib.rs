//! formbind
//!
//! Binds a designer-authored HTML fragment to a set of named field values.
//! Loading a template discovers its form controls (`input`, `textarea`,
//! `select`) and their default values; setting values writes them straight
//! back into the parsed markup, which can then be serialized again.
//!
//! Controls named with a trailing `[]` (`tags[]`) form a multi-value field
//! whose value is a list; every other field holds a single string.
//!
//! # Example
//! ```rust,ignore
//! use formbind::{Form, FieldValue};
//!
//! let mut form = Form::from_html(r#"<input name="title" value="Draft">"#)?;
//! assert_eq!(form.value("title"), Some(&FieldValue::from("Draft")));
//!
//! form.set_value("title", "Published")?;
//! assert_eq!(form.save_html(), r#"<input name="title" value="Published"/>"#);
//! ```

mod config;
mod definition;
mod error;
mod field;
mod form;
mod value;

pub use config::FormConfig;
pub use definition::{FormDefinition, DEFAULT_SLUG};
pub use error::FormError;
pub use field::{
    field_key, CheckableField, Field, FieldKind, SelectField, TextField, TextareaField, ARRAY_MARKER,
    DEFAULT_CHECKABLE_VALUE,
};
pub use form::Form;
pub use value::FieldValue;

pub use formbind_html::ParseError;

/// Ordered mapping of field name to value, in template order
pub type FieldValues = indexmap::IndexMap<String, FieldValue>;
