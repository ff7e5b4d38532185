//! Live element → [`SnapshotNode`] capture.
//!
//! Depth-first, pre-order. Text children are trimmed and kept only when
//! non-empty; element children recurse unless they are the overlay host,
//! so nothing inside the picker's own UI is ever captured.

use crate::dom::{ChildNode, SnapshotChild, SnapshotNode, StyledElement, OVERLAY_HOST_ID};
use crate::style::sample;

/// Attributes recorded for a tag even when absent (as empty strings).
const RECORDED_ATTRIBUTES: &[(&str, &[&str])] = &[("a", &["href"]), ("img", &["src", "alt"])];

/// Attributes recorded for a tag only when present.
const OPTIONAL_ATTRIBUTES: &[(&str, &[&str])] = &[
    ("input", &["placeholder", "name", "type"]),
    ("textarea", &["placeholder", "name"]),
    ("select", &["name"]),
];

/// Attributes recorded on any element when present.
const GLOBAL_ATTRIBUTES: &[&str] = &["role"];

/// Captures snapshot trees, skipping one designated subtree root.
#[derive(Debug, Clone)]
pub struct TreeExtractor {
    exclusion_id: String,
}

impl TreeExtractor {
    pub fn new() -> Self {
        Self {
            exclusion_id: OVERLAY_HOST_ID.to_string(),
        }
    }

    /// Use a different exclusion root id.
    pub fn with_exclusion_id(mut self, id: impl Into<String>) -> Self {
        self.exclusion_id = id.into();
        self
    }

    pub fn exclusion_id(&self) -> &str {
        &self.exclusion_id
    }

    /// Whether `element` is the exclusion root itself.
    pub fn is_excluded<E: StyledElement>(&self, element: &E) -> bool {
        element.attribute("id").as_deref() == Some(self.exclusion_id.as_str())
    }

    /// Capture `element` and its subtree.
    pub fn extract<E: StyledElement>(&self, element: &E) -> SnapshotNode {
        let node = self.extract_node(element);
        log::debug!(
            "Captured <{}> snapshot: {} elements, depth {}",
            node.tag,
            node.node_count(),
            node.depth()
        );
        node
    }

    fn extract_node<E: StyledElement>(&self, element: &E) -> SnapshotNode {
        let tag = element.tag_name().to_ascii_lowercase();
        let styles = sample(element);
        let attributes = capture_attributes(element, &tag);

        let mut children = Vec::new();
        for child in element.child_nodes() {
            match child {
                ChildNode::Text(text) => {
                    let trimmed = text.trim();
                    if !trimmed.is_empty() {
                        children.push(SnapshotChild::Text(trimmed.to_string()));
                    }
                }
                ChildNode::Element(child_el) => {
                    if self.is_excluded(&child_el) {
                        continue;
                    }
                    children.push(SnapshotChild::Element(self.extract_node(&child_el)));
                }
            }
        }

        SnapshotNode {
            tag,
            styles,
            attributes,
            children,
        }
    }
}

impl Default for TreeExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Capture a subtree with the default overlay exclusion.
pub fn extract<E: StyledElement>(element: &E) -> SnapshotNode {
    TreeExtractor::new().extract(element)
}

fn capture_attributes<E: StyledElement>(
    element: &E,
    tag: &str,
) -> std::collections::BTreeMap<String, String> {
    let mut attributes = std::collections::BTreeMap::new();

    for (_, names) in RECORDED_ATTRIBUTES.iter().filter(|(t, _)| *t == tag) {
        for &name in names.iter() {
            let value = element.attribute(name).unwrap_or_default();
            attributes.insert(name.to_string(), value);
        }
    }

    let optional = OPTIONAL_ATTRIBUTES
        .iter()
        .filter(|(t, _)| *t == tag)
        .flat_map(|(_, names)| names.iter())
        .chain(GLOBAL_ATTRIBUTES.iter());
    for &name in optional {
        if let Some(value) = element.attribute(name) {
            attributes.insert(name.to_string(), value);
        }
    }

    attributes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::StyleProperty;
    use std::collections::HashMap;

    /// In-memory element for exercising the extractor without a parser.
    #[derive(Clone, Default)]
    struct FakeElement {
        tag: String,
        attrs: HashMap<String, String>,
        style: HashMap<String, String>,
        children: Vec<FakeChild>,
    }

    #[derive(Clone)]
    enum FakeChild {
        El(FakeElement),
        Text(String),
    }

    impl FakeElement {
        fn new(tag: &str) -> Self {
            Self {
                tag: tag.to_string(),
                ..Self::default()
            }
        }

        fn attr(mut self, k: &str, v: &str) -> Self {
            self.attrs.insert(k.into(), v.into());
            self
        }

        fn style(mut self, k: &str, v: &str) -> Self {
            self.style.insert(k.into(), v.into());
            self
        }

        fn child(mut self, c: FakeElement) -> Self {
            self.children.push(FakeChild::El(c));
            self
        }

        fn text(mut self, t: &str) -> Self {
            self.children.push(FakeChild::Text(t.into()));
            self
        }
    }

    impl StyledElement for FakeElement {
        fn tag_name(&self) -> String {
            self.tag.clone()
        }

        fn computed_style(&self, property: &str) -> Option<String> {
            self.style.get(property).cloned()
        }

        fn attribute(&self, name: &str) -> Option<String> {
            self.attrs.get(name).cloned()
        }

        fn child_nodes(&self) -> Vec<ChildNode<Self>> {
            self.children
                .iter()
                .map(|c| match c {
                    FakeChild::El(e) => ChildNode::Element(e.clone()),
                    FakeChild::Text(t) => ChildNode::Text(t.clone()),
                })
                .collect()
        }
    }

    fn contains_marker(node: &SnapshotNode, marker: &str) -> bool {
        node.collect_text().contains(marker)
            || node.attributes.values().any(|v| v.contains(marker))
    }

    #[test]
    fn captures_tag_styles_and_text() {
        let el = FakeElement::new("DIV")
            .style("display", "flex")
            .style("gap", "normal")
            .style("padding-top", "12px")
            .text("   ")
            .text("  Hello  ")
            .child(FakeElement::new("SPAN").text("world"));

        let node = extract(&el);
        assert_eq!(node.tag, "div");
        assert_eq!(node.styles.get(StyleProperty::Display), Some("flex"));
        assert_eq!(node.styles.get(StyleProperty::PaddingTop), Some("12px"));
        assert!(!node.styles.contains(StyleProperty::Gap));
        assert_eq!(node.children.len(), 2);
        assert_eq!(node.children[0], SnapshotChild::Text("Hello".into()));
        match &node.children[1] {
            SnapshotChild::Element(span) => assert_eq!(span.tag, "span"),
            other => panic!("expected element, got {:?}", other),
        }
    }

    #[test]
    fn attribute_allow_list() {
        let el = FakeElement::new("div")
            .attr("class", "card")
            .attr("role", "button")
            .child(FakeElement::new("a").attr("target", "_blank"))
            .child(FakeElement::new("img").attr("src", "/logo.png").attr("width", "20"))
            .child(
                FakeElement::new("input")
                    .attr("placeholder", "email")
                    .attr("value", "secret"),
            );

        let node = extract(&el);
        assert_eq!(node.attributes.len(), 1);
        assert_eq!(node.attr("role"), Some("button"));

        let kids: Vec<&SnapshotNode> = node.elements().collect();
        assert_eq!(kids[0].attr("href"), Some(""));
        assert_eq!(kids[0].attributes.len(), 1);
        assert_eq!(kids[1].attr("src"), Some("/logo.png"));
        assert_eq!(kids[1].attr("alt"), Some(""));
        assert_eq!(kids[1].attr("width"), None);
        assert_eq!(kids[2].attr("placeholder"), Some("email"));
        assert_eq!(kids[2].attr("value"), None);
    }

    #[test]
    fn overlay_subtree_is_never_captured() {
        let overlay = FakeElement::new("div")
            .attr("id", OVERLAY_HOST_ID)
            .text("OVERLAY-TEXT")
            .child(FakeElement::new("a").attr("href", "OVERLAY-LINK"));

        let el = FakeElement::new("body").child(
            FakeElement::new("main")
                .text("page")
                .child(overlay.clone())
                .child(FakeElement::new("section").child(overlay)),
        );

        let node = extract(&el);
        assert!(!contains_marker(&node, "OVERLAY"));
        assert_eq!(node.node_count(), 3);
    }

    #[test]
    fn custom_exclusion_id() {
        let el = FakeElement::new("div")
            .child(FakeElement::new("div").attr("id", "my-panel").text("hidden"))
            .child(FakeElement::new("div").attr("id", OVERLAY_HOST_ID).text("shown"));

        let node = TreeExtractor::new()
            .with_exclusion_id("my-panel")
            .extract(&el);
        assert_eq!(node.collect_text(), "shown");
    }

    #[test]
    fn preserves_child_order() {
        let el = FakeElement::new("ul")
            .child(FakeElement::new("li").text("one"))
            .text("two")
            .child(FakeElement::new("li").text("three"));
        assert_eq!(extract(&el).collect_text(), "one two three");
    }
}
