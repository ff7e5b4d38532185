pub mod css;
pub mod document;
pub mod extract;

use std::collections::BTreeMap;

use crate::style::StyleMap;

/// Id of the overlay host the picker injects into the page. Extraction
/// never descends into it.
pub const OVERLAY_HOST_ID: &str = "chardow-overlay-host";

/// A child node as seen through a live element handle.
pub enum ChildNode<E> {
    Element(E),
    Text(String),
}

/// A live, styled element in some document.
///
/// This is the only surface extraction reads from: computed style by
/// stylesheet (kebab-case) property name, tag, attributes, and ordered
/// child nodes.
pub trait StyledElement: Sized {
    /// Tag name, in any case.
    fn tag_name(&self) -> String;

    /// Computed value of a kebab-case property, e.g. `padding-top`.
    fn computed_style(&self, property: &str) -> Option<String>;

    fn attribute(&self, name: &str) -> Option<String>;

    /// Child nodes in document order. Comments and other node kinds are
    /// not reported.
    fn child_nodes(&self) -> Vec<ChildNode<Self>>;
}

/// One captured element. Immutable once built by the extractor.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SnapshotNode {
    /// Lower-case tag name.
    pub tag: String,
    pub styles: StyleMap,
    /// Allow-listed attributes only.
    pub attributes: BTreeMap<String, String>,
    pub children: Vec<SnapshotChild>,
}

/// Child of a [`SnapshotNode`]: a nested element or a trimmed, non-empty
/// text run.
#[derive(Debug, Clone, PartialEq)]
pub enum SnapshotChild {
    Element(SnapshotNode),
    Text(String),
}

impl SnapshotNode {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            ..Self::default()
        }
    }

    pub fn with_styles(mut self, styles: StyleMap) -> Self {
        self.styles = styles;
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: SnapshotNode) -> Self {
        self.children.push(SnapshotChild::Element(child));
        self
    }

    /// Appends a text child; whitespace-only text is ignored.
    pub fn with_text(mut self, text: &str) -> Self {
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            self.children.push(SnapshotChild::Text(trimmed.to_string()));
        }
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|s| s.as_str())
    }

    /// Element children only, in order.
    pub fn elements(&self) -> impl Iterator<Item = &SnapshotNode> {
        self.children.iter().filter_map(|c| match c {
            SnapshotChild::Element(node) => Some(node),
            SnapshotChild::Text(_) => None,
        })
    }

    /// First direct text child, if any.
    pub fn first_text(&self) -> Option<&str> {
        self.children.iter().find_map(|c| match c {
            SnapshotChild::Text(text) => Some(text.as_str()),
            SnapshotChild::Element(_) => None,
        })
    }

    /// Recursively count element nodes in this subtree.
    pub fn node_count(&self) -> usize {
        1 + self.elements().map(|c| c.node_count()).sum::<usize>()
    }

    /// Maximum element depth; a leaf is depth 1.
    pub fn depth(&self) -> usize {
        1 + self.elements().map(|c| c.depth()).max().unwrap_or(0)
    }

    /// Collect all text content recursively, space-joined.
    pub fn collect_text(&self) -> String {
        let mut buf = String::new();
        self.collect_text_inner(&mut buf);
        buf
    }

    fn collect_text_inner(&self, buf: &mut String) {
        for child in &self.children {
            match child {
                SnapshotChild::Text(text) => {
                    if !buf.is_empty() {
                        buf.push(' ');
                    }
                    buf.push_str(text);
                }
                SnapshotChild::Element(node) => node.collect_text_inner(buf),
            }
        }
    }
}
