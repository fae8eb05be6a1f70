//! formbind HTML
//!
//! HTML5 parsing built on html5ever, converted into the formbind arena tree,
//! plus the serializer used to write templates back out.
//!
//! html5ever recovers from any input, so structural problems that would
//! silently reshape a template (unclosed containers, stray end tags) are
//! reported separately by [`check_markup`].

mod checker;
mod parser;
mod serializer;

pub use checker::check_markup;
pub use formbind_dom::{Document, DomTree, NodeId};
pub use parser::HtmlParser;
pub use serializer::{get_inner_html, HtmlSerializer, OutputStyle};

/// Parse an HTML string into a Document
pub fn parse(html: &str) -> ParseResult {
    HtmlParser::new().parse(html)
}

/// Result of parsing HTML
#[derive(Debug)]
pub struct ParseResult {
    pub document: Document,
    pub errors: Vec<ParseError>,
}

/// Parse diagnostic
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Reported by the html5ever tree builder; the tree was recovered
    #[error("Unexpected token: {message}")]
    UnexpectedToken { message: String },

    #[error("Unclosed tag <{tag}> opened at line {line}")]
    UnclosedTag { tag: String, line: u64 },

    #[error("Unexpected end tag </{tag}> at line {line}")]
    UnexpectedEndTag { tag: String, line: u64 },

    #[error("Self-closing <{tag}/> at line {line} swallows the rest of the markup")]
    SelfClosingRawText { tag: String, line: u64 },
}

impl ParseError {
    /// Fatal diagnostics mean the parsed tree does not reflect the markup
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::UnexpectedToken { .. })
    }
}
