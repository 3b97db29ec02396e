//! Simple selectors for `query_selector`

use crate::{ClassList, ElementData};

/// One of `tag`, `.class`, `#id` or `*`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleSelector {
    Tag(String),
    Class(String),
    Id(String),
    Universal,
}

impl SimpleSelector {
    /// Parse a simple selector string
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }

        if s == "*" {
            Some(Self::Universal)
        } else if let Some(id) = s.strip_prefix('#') {
            (!id.is_empty()).then(|| Self::Id(id.to_string()))
        } else if let Some(class) = s.strip_prefix('.') {
            (!class.is_empty()).then(|| Self::Class(class.to_string()))
        } else {
            Some(Self::Tag(s.to_ascii_lowercase()))
        }
    }

    pub fn matches(&self, element: &ElementData) -> bool {
        match self {
            SimpleSelector::Universal => true,
            SimpleSelector::Tag(tag) => element.tag == *tag,
            SimpleSelector::Id(id) => element.id() == Some(id.as_str()),
            SimpleSelector::Class(class) => element
                .attrs
                .get_attribute("class")
                .is_some_and(|value| ClassList::from_string(value).contains(class)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_selector_parse() {
        assert!(matches!(SimpleSelector::parse("DIV"), Some(SimpleSelector::Tag(t)) if t == "div"));
        assert!(matches!(SimpleSelector::parse(".class"), Some(SimpleSelector::Class(_))));
        assert!(matches!(SimpleSelector::parse("#id"), Some(SimpleSelector::Id(_))));
        assert!(matches!(SimpleSelector::parse("*"), Some(SimpleSelector::Universal)));
        assert_eq!(SimpleSelector::parse("  "), None);
        assert_eq!(SimpleSelector::parse("#"), None);
    }

    #[test]
    fn test_element_matches() {
        let mut element = ElementData::new("section");
        element.attrs.set_attribute("id", "main");
        element.attrs.set_attribute("class", "container active");

        assert!(SimpleSelector::Tag("section".into()).matches(&element));
        assert!(SimpleSelector::Id("main".into()).matches(&element));
        assert!(SimpleSelector::Class("active".into()).matches(&element));
        assert!(!SimpleSelector::Class("hidden".into()).matches(&element));
        assert!(SimpleSelector::Universal.matches(&element));
    }
}
