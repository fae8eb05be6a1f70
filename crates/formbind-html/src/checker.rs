//! Structural markup check
//!
//! Runs the html5ever tokenizer over a fragment and tracks open elements.
//! Elements whose end tag HTML makes optional (`p`, `li`, `option`, table
//! parts) may be left open; any other element must be closed explicitly and
//! every end tag must match an open element.

use std::cell::RefCell;

use html5ever::tendril::StrTendril;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, Tag, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};

use crate::ParseError;

/// Void elements (never have content or an end tag)
pub(crate) const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "keygen",
    "link", "meta", "param", "source", "track", "wbr",
];

/// Elements whose end tag may be omitted
const OPTIONAL_END: &[&str] = &[
    "html", "head", "body", "p", "li", "dt", "dd", "option", "optgroup",
    "rb", "rt", "rtc", "rp", "caption", "colgroup", "thead", "tbody",
    "tfoot", "tr", "td", "th",
];

/// Check a markup fragment for structural errors
///
/// Returns fatal diagnostics only; recoverable tokenizer errors are left to
/// the tree builder, which reports them during [`crate::HtmlParser::parse`].
pub fn check_markup(fragment: &str) -> Vec<ParseError> {
    let tokenizer = Tokenizer::new(StructureSink::default(), TokenizerOpts::default());
    let input = BufferQueue::default();
    input.push_back(StrTendril::from_slice(fragment));
    let _ = tokenizer.feed(&input);
    tokenizer.end();

    let errors = tokenizer.sink.errors.take();
    if !errors.is_empty() {
        tracing::debug!(count = errors.len(), "structural markup errors");
    }
    errors
}

#[derive(Debug)]
struct OpenElement {
    tag: String,
    line: u64,
}

#[derive(Default)]
struct StructureSink {
    open: RefCell<Vec<OpenElement>>,
    errors: RefCell<Vec<ParseError>>,
}

impl StructureSink {
    fn start_tag(&self, tag: &Tag, line: u64) -> TokenSinkResult<()> {
        let name: &str = &tag.name;
        if VOID_ELEMENTS.contains(&name) {
            return TokenSinkResult::Continue;
        }

        let raw = match name {
            "textarea" | "title" => Some(RawKind::Rcdata),
            "style" | "xmp" | "iframe" | "noembed" | "noframes" => Some(RawKind::Rawtext),
            "script" => Some(RawKind::ScriptData),
            _ => None,
        };

        if tag.self_closing {
            // XHTML-style `<div/>` is tolerated; raw text elements would eat
            // everything that follows
            if raw.is_some() {
                self.errors.borrow_mut().push(ParseError::SelfClosingRawText {
                    tag: name.to_string(),
                    line,
                });
            }
            return TokenSinkResult::Continue;
        }

        self.open.borrow_mut().push(OpenElement {
            tag: name.to_string(),
            line,
        });
        match raw {
            Some(kind) => TokenSinkResult::RawData(kind),
            None => TokenSinkResult::Continue,
        }
    }

    fn end_tag(&self, tag: &Tag, line: u64) {
        let name: &str = &tag.name;
        if VOID_ELEMENTS.contains(&name) {
            return;
        }

        let mut open = self.open.borrow_mut();
        let Some(pos) = open.iter().rposition(|e| e.tag == name) else {
            self.errors.borrow_mut().push(ParseError::UnexpectedEndTag {
                tag: name.to_string(),
                line,
            });
            return;
        };

        for unclosed in open.drain(pos..).skip(1) {
            self.report_unclosed(unclosed);
        }
    }

    fn finish(&self) {
        let remaining: Vec<OpenElement> = self.open.borrow_mut().drain(..).collect();
        for unclosed in remaining {
            self.report_unclosed(unclosed);
        }
    }

    fn report_unclosed(&self, element: OpenElement) {
        if OPTIONAL_END.contains(&element.tag.as_str()) {
            return;
        }
        self.errors.borrow_mut().push(ParseError::UnclosedTag {
            tag: element.tag,
            line: element.line,
        });
    }
}

impl TokenSink for StructureSink {
    type Handle = ();

    fn process_token(&self, token: Token, line_number: u64) -> TokenSinkResult<()> {
        match token {
            Token::TagToken(tag) => match tag.kind {
                TagKind::StartTag => return self.start_tag(&tag, line_number),
                TagKind::EndTag => self.end_tag(&tag, line_number),
            },
            Token::EOFToken => self.finish(),
            _ => {}
        }
        TokenSinkResult::Continue
    }
}
