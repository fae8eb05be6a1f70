//! Element Query
//!
//! A small selector language over the arena tree: comma-separated compound
//! selectors made of an optional tag (or `*`), `#id`, `.class`, `[attr]` and
//! `[attr=value]` parts. Queries are scoped to a root element and return
//! matches in document order.

use std::collections::HashMap;

use crate::{DomTree, NodeId, QueryCache};

/// Selector parse errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("Empty selector")]
    Empty,

    #[error("Unterminated attribute selector in `{0}`")]
    Unterminated(String),

    #[error("Unsupported selector syntax: `{0}`")]
    Unsupported(String),
}

/// Attribute condition of a compound selector
#[derive(Debug, Clone, PartialEq, Eq)]
enum AttrTest {
    Present(String),
    Equals(String, String),
}

/// One compound selector, e.g. `input[name]`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrTest>,
}

/// Parsed selector list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    alternatives: Vec<Compound>,
}

impl Selector {
    /// Parse a selector list
    pub fn parse(s: &str) -> Result<Self, SelectorError> {
        let alternatives = s
            .split(',')
            .map(|part| parse_compound(part.trim()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { alternatives })
    }

    /// Check if element matches any alternative
    pub fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        let Some(tag) = tree.tag_name(node) else {
            return false;
        };
        self.alternatives.iter().any(|c| {
            c.tag.as_deref().is_none_or(|t| t == tag)
                && c.id.as_deref().is_none_or(|id| tree.attr(node, "id") == Some(id))
                && c.classes.iter().all(|class| {
                    tree.attr(node, "class")
                        .is_some_and(|list| list.split_whitespace().any(|token| token == class))
                })
                && c.attrs.iter().all(|test| match test {
                    AttrTest::Present(name) => tree.has_attr(node, name),
                    AttrTest::Equals(name, value) => tree.attr(node, name) == Some(value.as_str()),
                })
        })
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == ':'
}

fn ident<'a>(s: &'a str, whole: &str) -> Result<&'a str, SelectorError> {
    if s.is_empty() || !s.chars().all(is_ident_char) {
        return Err(SelectorError::Unsupported(whole.to_string()));
    }
    Ok(s)
}

fn parse_compound(s: &str) -> Result<Compound, SelectorError> {
    if s.is_empty() {
        return Err(SelectorError::Empty);
    }

    let mut compound = Compound::default();
    let tag_end = s.find(['[', '.', '#']).unwrap_or(s.len());
    let tag = &s[..tag_end];
    if !tag.is_empty() && tag != "*" {
        compound.tag = Some(ident(tag, s)?.to_ascii_lowercase());
    }

    let mut rest = &s[tag_end..];
    while let Some(c) = rest.chars().next() {
        match c {
            '[' => {
                let close = rest
                    .find(']')
                    .ok_or_else(|| SelectorError::Unterminated(s.to_string()))?;
                let inner = rest[1..close].trim();
                let test = match inner.split_once('=') {
                    Some((name, value)) => {
                        let value = value.trim().trim_matches(|q| q == '"' || q == '\'');
                        AttrTest::Equals(ident(name.trim(), s)?.to_ascii_lowercase(), value.to_string())
                    }
                    None => AttrTest::Present(ident(inner, s)?.to_ascii_lowercase()),
                };
                compound.attrs.push(test);
                rest = &rest[close + 1..];
            }
            '.' | '#' => {
                let end = rest[1..]
                    .find(['[', '.', '#'])
                    .map(|i| i + 1)
                    .unwrap_or(rest.len());
                let name = ident(&rest[1..end], s)?.to_string();
                if c == '#' {
                    compound.id = Some(name);
                } else {
                    compound.classes.push(name);
                }
                rest = &rest[end..];
            }
            _ => return Err(SelectorError::Unsupported(s.to_string())),
        }
    }

    Ok(compound)
}

/// Query accessor with parsed-selector and result caches
#[derive(Debug, Default)]
pub struct ElementQuery {
    selectors: HashMap<String, Selector>,
    cache: QueryCache,
}

impl ElementQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// All descendants of `root` matching `selector`, in document order
    pub fn select_all(
        &mut self,
        tree: &DomTree,
        root: NodeId,
        selector: &str,
    ) -> Result<Vec<NodeId>, SelectorError> {
        let generation = tree.generation();
        if let Some(hit) = self.cache.get(root, selector, generation) {
            return Ok(hit.to_vec());
        }

        if !self.selectors.contains_key(selector) {
            let parsed = Selector::parse(selector)?;
            self.selectors.insert(selector.to_string(), parsed);
        }
        let parsed = &self.selectors[selector];

        let results: Vec<NodeId> = tree
            .descendants(root)
            .filter(|&id| parsed.matches(tree, id))
            .collect();
        tracing::trace!(selector, matches = results.len(), "query");

        self.cache.set(root, selector, generation, results.clone());
        Ok(results)
    }

    /// First descendant of `root` matching `selector`
    pub fn select_first(
        &mut self,
        tree: &DomTree,
        root: NodeId,
        selector: &str,
    ) -> Result<Option<NodeId>, SelectorError> {
        Ok(self.select_all(tree, root, selector)?.first().copied())
    }

    /// Result cache
    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_parse() {
        assert!(Selector::parse("input[name]").is_ok());
        assert!(Selector::parse("input[name], textarea[name], select[name]").is_ok());
        assert!(Selector::parse("*").is_ok());
        assert!(Selector::parse("div.row#main[data-x='1']").is_ok());

        assert_eq!(Selector::parse(""), Err(SelectorError::Empty));
        assert_eq!(Selector::parse("input,"), Err(SelectorError::Empty));
        assert!(matches!(Selector::parse("input[name"), Err(SelectorError::Unterminated(_))));
        assert!(matches!(Selector::parse("form input"), Err(SelectorError::Unsupported(_))));
    }

    #[test]
    fn test_matches_attributes() {
        let mut tree = DomTree::new();
        let named = tree.create_element("input");
        tree.set_attr(named, "name", "title");
        tree.set_attr(named, "class", "wide  short");
        let anonymous = tree.create_element("input");
        tree.append_child(tree.root(), named);
        tree.append_child(tree.root(), anonymous);

        let sel = Selector::parse("input[name]").unwrap();
        assert!(sel.matches(&tree, named));
        assert!(!sel.matches(&tree, anonymous));

        assert!(Selector::parse("INPUT.short[name=title]").unwrap().matches(&tree, named));
        assert!(!Selector::parse("input[name=other]").unwrap().matches(&tree, named));
        assert!(!Selector::parse("select").unwrap().matches(&tree, named));
    }

    #[test]
    fn test_select_all_document_order_and_scope() {
        let mut tree = DomTree::new();
        let first = tree.create_element("select");
        let second = tree.create_element("select");
        let a = tree.create_element("option");
        let b = tree.create_element("option");
        let c = tree.create_element("option");
        tree.append_child(tree.root(), first);
        tree.append_child(tree.root(), second);
        tree.append_child(first, a);
        tree.append_child(first, b);
        tree.append_child(second, c);

        let mut query = ElementQuery::new();
        assert_eq!(query.select_all(&tree, tree.root(), "option").unwrap(), vec![a, b, c]);
        assert_eq!(query.select_all(&tree, first, "option").unwrap(), vec![a, b]);
        assert_eq!(query.select_first(&tree, second, "option").unwrap(), Some(c));
    }

    #[test]
    fn test_cache_invalidated_by_mutation() {
        let mut tree = DomTree::new();
        let select = tree.create_element("select");
        let a = tree.create_element("option");
        tree.append_child(tree.root(), select);
        tree.append_child(select, a);

        let mut query = ElementQuery::new();
        assert_eq!(query.select_all(&tree, select, "option").unwrap(), vec![a]);
        assert_eq!(query.select_all(&tree, select, "option").unwrap(), vec![a]);
        assert_eq!(query.cache().stats().hits, 1);

        let b = tree.create_element("option");
        tree.append_child(select, b);
        assert_eq!(query.select_all(&tree, select, "option").unwrap(), vec![a, b]);
    }

    #[test]
    fn test_cache_invalidated_by_value_change() {
        let mut tree = DomTree::new();
        let input = tree.create_element("input");
        tree.set_attr(input, "value", "x");
        tree.set_attr(input, "id", "a");
        tree.append_child(tree.root(), input);

        let mut query = ElementQuery::new();
        assert_eq!(query.select_all(&tree, tree.root(), "input[value=x]").unwrap(), vec![input]);
        assert_eq!(query.select_first(&tree, tree.root(), "#a").unwrap(), Some(input));

        tree.set_attr(input, "value", "y");
        tree.set_attr(input, "id", "b");
        assert!(query.select_all(&tree, tree.root(), "input[value=x]").unwrap().is_empty());
        assert_eq!(query.select_all(&tree, tree.root(), "input[value=y]").unwrap(), vec![input]);
        assert_eq!(query.select_first(&tree, tree.root(), "#a").unwrap(), None);
    }
}
