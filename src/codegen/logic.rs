//! Interaction inference: find clickable, editable and navigational nodes
//! and emit React state + handler scaffolding for them.
//!
//! Identifiers are derived from labels by stripping non-alphanumerics and
//! are not deduplicated; two buttons labelled "Save" produce the same
//! handler name twice.

use crate::codegen::capitalize;
use crate::dom::SnapshotNode;

const NO_INTERACTIONS: &str = "// No obvious interactive elements detected.\n\
                               // You can still add standard React handlers manually.";

const IMPORT_LINE: &str = "import { useState } from 'react'";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionKind {
    /// Buttons, `role="button"`, and flex anchors.
    Click,
    /// `input`, `textarea`, `select`.
    Change,
    /// Anchors with a non-empty `href`.
    Navigation,
}

/// One classified node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interaction {
    pub kind: InteractionKind,
    pub tag: String,
    /// Button text, input placeholder/name, or link href.
    pub label: String,
}

/// Pre-order walk collecting every interaction. A node can classify more
/// than once (a flex anchor with an `href` is both a click and a
/// navigation).
pub fn find_interactions(root: &SnapshotNode) -> Vec<Interaction> {
    let mut found = Vec::new();
    walk(root, &mut found);
    found
}

fn walk(node: &SnapshotNode, found: &mut Vec<Interaction>) {
    let tag = node.tag.as_str();
    let display_flex = node
        .styles
        .get(crate::style::StyleProperty::Display)
        .is_some_and(|d| d.contains("flex"));

    let is_button =
        tag == "button" || node.attr("role") == Some("button") || (tag == "a" && display_flex);
    let is_input = matches!(tag, "input" | "textarea" | "select");
    let href = node.attr("href").filter(|h| tag == "a" && !h.is_empty());

    if is_button {
        let label = node.first_text().unwrap_or("Action").trim().to_string();
        found.push(Interaction { kind: InteractionKind::Click, tag: tag.to_string(), label });
    }
    if is_input {
        let label = node
            .attr("placeholder")
            .filter(|p| !p.is_empty())
            .or_else(|| node.attr("name").filter(|n| !n.is_empty()))
            .unwrap_or("Input")
            .to_string();
        found.push(Interaction { kind: InteractionKind::Change, tag: tag.to_string(), label });
    }
    if let Some(href) = href {
        found.push(Interaction {
            kind: InteractionKind::Navigation,
            tag: tag.to_string(),
            label: href.to_string(),
        });
    }

    for child in node.elements() {
        walk(child, found);
    }
}

/// State and handler boilerplate for every interaction under `root`, or
/// a fixed comment when there are none.
pub fn logic_for(root: &SnapshotNode) -> String {
    let interactions = find_interactions(root);
    if interactions.is_empty() {
        return NO_INTERACTIONS.to_string();
    }

    let mut code = format!("{IMPORT_LINE}\n\n");

    for (i, it) in interactions.iter().enumerate() {
        match it.kind {
            InteractionKind::Change => {
                let state = state_identifier(&it.label, i);
                code.push_str(&format!(
                    "const [{state}, set{}] = useState('')\n",
                    capitalize(&state)
                ));
            }
            InteractionKind::Click => {
                let state = format!("is{}Active", alphanumeric(&it.label));
                code.push_str(&format!(
                    "const [{state}, set{}] = useState(false)\n",
                    capitalize(&state)
                ));
            }
            InteractionKind::Navigation => {}
        }
    }

    code.push('\n');

    for (i, it) in interactions.iter().enumerate() {
        let handler = match it.kind {
            InteractionKind::Click => format!(
                "const handle{}Click = () => {{\n  console.log('{} clicked')\n}}",
                alphanumeric(&it.label),
                escape_js(&it.label)
            ),
            InteractionKind::Change => {
                let setter = capitalize(&state_identifier(&it.label, i));
                format!("const handle{setter}Change = (e) => {{\n  set{setter}(e.target.value)\n}}")
            }
            InteractionKind::Navigation => format!(
                "const handleNavigate{} = () => {{\n  console.log('navigate to {}')\n}}",
                capitalize(&alphanumeric(&it.label)),
                escape_js(&it.label)
            ),
        };
        code.push_str(&handler);
        code.push_str("\n\n");
    }

    code.trim().to_string()
}

/// Lower-case, `[a-z0-9]` only; `value{i}` when nothing survives.
fn state_identifier(label: &str, index: usize) -> String {
    let id: String = label
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect();
    if id.is_empty() {
        format!("value{index}")
    } else {
        id
    }
}

fn alphanumeric(label: &str) -> String {
    label.chars().filter(|c| c.is_ascii_alphanumeric()).collect()
}

fn escape_js(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\'', "\\'")
}
