//! Snapshot tree → indented markup.
//!
//! Tags outside a small whitelist collapse to `div`; utility classes are
//! computed against the resolved tag. Leaves with nothing to say are
//! pruned, and a node whose children all prune becomes self-closing.

use crate::dom::{SnapshotChild, SnapshotNode};
use crate::translate::classes_for;

/// Sectioning tags kept verbatim.
const STRUCTURAL_TAGS: &[&str] = &["section", "article", "nav", "header", "footer", "main", "aside"];

/// Flow / interactive tags kept verbatim.
const FLOW_TAGS: &[&str] = &[
    "p", "span", "button", "a", "h1", "h2", "h3", "h4", "img", "input", "label",
];

const FALLBACK_TAG: &str = "div";

/// Tags written without a closing tag in HTML output.
const VOID_TAGS: &[&str] = &["img", "input"];

const INDENT: &str = "  ";

/// Output dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarkupFlavor {
    /// React JSX: `className`, self-closing empty elements.
    #[default]
    Jsx,
    /// Plain HTML: `class`, explicit close tags except for void elements.
    Html,
}

impl MarkupFlavor {
    fn class_attribute(self) -> &'static str {
        match self {
            MarkupFlavor::Jsx => "className",
            MarkupFlavor::Html => "class",
        }
    }

    /// Close an element that ended up with no rendered children.
    /// `open` is everything up to (not including) the closing `>`.
    fn close_empty(self, open: &str, tag: &str) -> String {
        match self {
            MarkupFlavor::Jsx => format!("{open} />"),
            MarkupFlavor::Html if VOID_TAGS.contains(&tag) => format!("{open}>"),
            MarkupFlavor::Html => format!("{open}></{tag}>"),
        }
    }
}

/// Whitelisted tags pass through; anything else becomes `div`.
pub fn resolve_tag(tag: &str) -> &str {
    if STRUCTURAL_TAGS.contains(&tag) || FLOW_TAGS.contains(&tag) {
        tag
    } else {
        FALLBACK_TAG
    }
}

/// Render `node` at `indent` levels (two spaces each).
///
/// Returns an empty string when the node is pruned.
pub fn render_markup(node: &SnapshotNode, indent: usize, flavor: MarkupFlavor) -> String {
    let pad = INDENT.repeat(indent);
    let tag = resolve_tag(&node.tag);

    let classes = classes_for(&node.styles, tag);
    let attrs = attribute_string(node, tag);

    if node.children.is_empty() && classes.is_empty() && attrs.is_empty() {
        return String::new();
    }

    let class_attr = if classes.is_empty() {
        String::new()
    } else {
        format!(" {}=\"{}\"", flavor.class_attribute(), classes.join(" "))
    };
    let open = format!("{pad}<{tag}{class_attr}{attrs}");

    let body: Vec<String> = node
        .children
        .iter()
        .map(|child| match child {
            SnapshotChild::Text(text) => {
                let text = text.trim();
                if text.is_empty() {
                    String::new()
                } else {
                    format!("{pad}{INDENT}{text}")
                }
            }
            SnapshotChild::Element(el) => render_markup(el, indent + 1, flavor),
        })
        .filter(|line| !line.is_empty())
        .collect();

    if body.is_empty() {
        return flavor.close_empty(&open, tag);
    }

    format!("{open}>\n{}\n{pad}</{tag}>", body.join("\n"))
}

/// JSX for a snapshot tree, starting at indent 0.
pub fn markup_for(node: &SnapshotNode) -> String {
    render_markup(node, 0, MarkupFlavor::Jsx)
}

/// Wrap the tree's JSX in a function component named `name`.
pub fn component_for(node: &SnapshotNode, name: &str) -> String {
    let content = render_markup(node, 2, MarkupFlavor::Jsx);
    format!("export function {name}() {{\n  return (\n{content}\n  )\n}}")
}

/// Only anchors (`href`) and images (`src`, `alt`) carry attributes.
fn attribute_string(node: &SnapshotNode, tag: &str) -> String {
    match tag {
        "a" => match node.attr("href").filter(|h| !h.is_empty()) {
            Some(href) => format!(" href=\"{}\"", escape_attr(href)),
            None => String::new(),
        },
        "img" => match node.attr("src").filter(|s| !s.is_empty()) {
            Some(src) => format!(
                " src=\"{}\" alt=\"{}\"",
                escape_attr(src),
                escape_attr(node.attr("alt").unwrap_or_default())
            ),
            None => String::new(),
        },
        _ => String::new(),
    }
}

fn escape_attr(value: &str) -> String {
    value.replace('"', "&quot;")
}
