//! Source generation from snapshot trees: markup and interaction
//! boilerplate. Everything here is a pure function of a [`SnapshotNode`].
//!
//! [`SnapshotNode`]: crate::dom::SnapshotNode

pub mod logic;
pub mod markup;

pub use logic::{find_interactions, logic_for, Interaction, InteractionKind};
pub use markup::{component_for, markup_for, render_markup, resolve_tag, MarkupFlavor};

/// Upper-case the first character: `email` → `Email`.
pub(crate) fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
