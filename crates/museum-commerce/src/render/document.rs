//! In-memory page model.

use std::collections::BTreeMap;

use super::{html, CartView, Element, ItemRow};

/// State of one page element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    pub visible: bool,
    pub text: String,
    pub rows: Vec<ItemRow>,
    pub checked: bool,
}

/// A page holding some subset of the cart elements.
///
/// Stands in for the browser DOM wherever there is no browser: tests and
/// the terminal front end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    nodes: BTreeMap<Element, Node>,
}

impl Document {
    /// A page with no elements.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The cart page: every cart element, all visible, member unchecked.
    pub fn cart_page() -> Self {
        Element::ALL
            .into_iter()
            .fold(Self::empty(), |doc, element| doc.with(element))
    }

    /// The shop page: only the item count badge.
    pub fn shop_page() -> Self {
        Self::empty().with(Element::CartCount)
    }

    /// Add an element.
    pub fn with(mut self, element: Element) -> Self {
        self.nodes.entry(element).or_insert_with(|| Node {
            visible: true,
            ..Node::default()
        });
        self
    }

    /// Remove an element.
    pub fn without(mut self, element: Element) -> Self {
        self.nodes.remove(&element);
        self
    }

    pub fn node(&self, element: Element) -> Option<&Node> {
        self.nodes.get(&element)
    }

    /// Visible and present.
    pub fn is_visible(&self, element: Element) -> bool {
        self.node(element).is_some_and(|n| n.visible)
    }

    pub fn text(&self, element: Element) -> Option<&str> {
        self.node(element).map(|n| n.text.as_str())
    }

    /// Rows of a table body; empty if the element is missing.
    pub fn rows(&self, element: Element) -> &[ItemRow] {
        self.node(element)
            .map(|n| n.rows.as_slice())
            .unwrap_or_default()
    }

    /// Markup of an element's content: the item rows for table bodies,
    /// escaped text otherwise.
    pub fn inner_html(&self, element: Element) -> Option<String> {
        let node = self.node(element)?;
        if element == Element::CartItems {
            Some(html::item_rows(&node.rows))
        } else {
            Some(html::escape(&node.text))
        }
    }
}

impl CartView for Document {
    fn has(&self, element: Element) -> bool {
        self.nodes.contains_key(&element)
    }

    fn set_visible(&mut self, element: Element, visible: bool) -> bool {
        match self.nodes.get_mut(&element) {
            Some(node) => {
                node.visible = visible;
                true
            }
            None => false,
        }
    }

    fn set_text(&mut self, element: Element, text: &str) -> bool {
        match self.nodes.get_mut(&element) {
            Some(node) => {
                node.text = text.to_string();
                true
            }
            None => false,
        }
    }

    fn set_rows(&mut self, element: Element, rows: &[ItemRow]) -> bool {
        match self.nodes.get_mut(&element) {
            Some(node) => {
                node.rows = rows.to_vec();
                true
            }
            None => false,
        }
    }

    fn is_checked(&self, element: Element) -> Option<bool> {
        self.node(element).map(|n| n.checked)
    }

    fn set_checked(&mut self, element: Element, checked: bool) -> bool {
        match self.nodes.get_mut(&element) {
            Some(node) => {
                node.checked = checked;
                true
            }
            None => false,
        }
    }
}
