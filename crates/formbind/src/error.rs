//! Form errors

use formbind_dom::SelectorError;
use formbind_html::ParseError;

/// Errors raised while loading a template or applying values
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    /// The template could not be parsed into a faithful tree
    #[error("Invalid markup: {}", summarize(.diagnostics))]
    InvalidMarkup { diagnostics: Vec<ParseError> },

    /// Multi-field positional write-back needs one value per element
    #[error("Field `{field}` has {expected} element(s) but {actual} value(s) were given")]
    ValueCountMismatch {
        field: String,
        expected: usize,
        actual: usize,
    },

    #[error(transparent)]
    Selector(#[from] SelectorError),
}

impl FormError {
    /// Parser diagnostics carried by `InvalidMarkup`
    pub fn diagnostics(&self) -> &[ParseError] {
        match self {
            Self::InvalidMarkup { diagnostics } => diagnostics,
            _ => &[],
        }
    }
}

fn summarize(diagnostics: &[ParseError]) -> String {
    let mut fatal = diagnostics.iter().filter(|d| d.is_fatal());
    match fatal.next() {
        Some(first) => match fatal.count() {
            0 => first.to_string(),
            more => format!("{first} (+{more} more)"),
        },
        None => format!("{} diagnostic(s)", diagnostics.len()),
    }
}
