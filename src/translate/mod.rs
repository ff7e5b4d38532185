//! Computed style → utility classes.
//!
//! [`classes_for`] is a pure function of `(StyleMap, tag)`. Rules run in a
//! fixed category order (display, flex, spacing, typography, color,
//! background/border, sizing, position) and each one either contributes
//! well-formed tokens or nothing.

use crate::style::color::{resolve_color, ResolvedColor};
use crate::style::scale::{
    map_font_size, map_font_weight, map_radius, map_spacing, parse_leading_float,
};
use crate::style::{StyleMap, StyleProperty as P};

/// Tags that are block-level by default; `display: block` on these is noise.
pub const DEFAULT_BLOCK_TAGS: &[&str] = &[
    "div", "section", "article", "nav", "header", "footer", "main", "p", "h1", "h2", "h3", "h4",
    "h5", "h6",
];

/// Translate a style map into an ordered list of utility classes.
pub fn classes_for(styles: &StyleMap, tag: &str) -> Vec<String> {
    let tag = tag.to_ascii_lowercase();
    let mut classes = Vec::new();

    let display = styles.get(P::Display);
    push_display(&mut classes, display, &tag);
    if display.is_some_and(|d| d.contains("flex")) {
        push_flex(&mut classes, styles);
    }
    push_box_sides(&mut classes, styles, "p", [P::PaddingTop, P::PaddingRight, P::PaddingBottom, P::PaddingLeft]);
    push_box_sides(&mut classes, styles, "m", [P::MarginTop, P::MarginRight, P::MarginBottom, P::MarginLeft]);
    push_typography(&mut classes, styles);
    push_background(&mut classes, styles);
    push_border(&mut classes, styles);
    push_sizing(&mut classes, styles);
    push_position(&mut classes, styles);

    classes
}

fn push_display(classes: &mut Vec<String>, display: Option<&str>, tag: &str) {
    let class = match display {
        Some("flex") => "flex",
        Some("grid") => "grid",
        Some("inline-flex") => "inline-flex",
        Some("inline-block") => "inline-block",
        Some("block") if DEFAULT_BLOCK_TAGS.contains(&tag) => return,
        Some("block") => "block",
        Some("none") => "hidden",
        _ => return,
    };
    classes.push(class.to_string());
}

fn push_flex(classes: &mut Vec<String>, styles: &StyleMap) {
    match styles.get(P::FlexDirection) {
        Some("column") => classes.push("flex-col".into()),
        Some("row-reverse") => classes.push("flex-row-reverse".into()),
        _ => {}
    }

    if let Some(justify) = styles.get(P::JustifyContent) {
        if justify == "center" {
            classes.push("justify-center".into());
        }
        if justify.contains("between") {
            classes.push("justify-between".into());
        }
    }

    match styles.get(P::AlignItems) {
        Some("center") => classes.push("items-center".into()),
        Some("flex-start") => classes.push("items-start".into()),
        _ => {}
    }

    if let Some(gap) = styles.get(P::Gap).and_then(map_spacing) {
        classes.push(format!("gap-{gap}"));
    }
}

/// Padding / margin: one collapsed class when all four sides agree,
/// otherwise one class per non-zero side.
fn push_box_sides(classes: &mut Vec<String>, styles: &StyleMap, prefix: &str, sides: [P; 4]) {
    let [t, r, b, l] = sides.map(|side| styles.get(side).and_then(map_spacing));

    if let Some(all) = t.filter(|v| Some(*v) == r && Some(*v) == b && Some(*v) == l) {
        if all != "0" {
            classes.push(format!("{prefix}-{all}"));
        }
        return;
    }

    for (suffix, value) in [("t", t), ("r", r), ("b", b), ("l", l)] {
        if let Some(value) = value.filter(|v| *v != "0") {
            classes.push(format!("{prefix}{suffix}-{value}"));
        }
    }
}

fn push_typography(classes: &mut Vec<String>, styles: &StyleMap) {
    if let Some(size) = styles.get(P::FontSize).and_then(map_font_size) {
        if size != "base" {
            classes.push(format!("text-{size}"));
        }
    }

    if let Some(weight) = styles.get(P::FontWeight).and_then(map_font_weight) {
        if weight != "normal" {
            classes.push(format!("font-{weight}"));
        }
    }

    // White text is assumed to sit on a dark background that already
    // implies it, so it is dropped along with transparent.
    if let Some(color) = resolve_color(styles.get(P::Color).unwrap_or("")) {
        if !color.is_white() && !color.is_transparent() {
            classes.push(format!("text-{color}"));
        }
    }

    if styles.get(P::TextAlign) == Some("center") {
        classes.push("text-center".into());
    }
}

fn push_background(classes: &mut Vec<String>, styles: &StyleMap) {
    if let Some(bg) = resolve_color(styles.get(P::BackgroundColor).unwrap_or("")) {
        if bg != ResolvedColor::Transparent {
            classes.push(format!("bg-{bg}"));
        }
    }
}

fn push_border(classes: &mut Vec<String>, styles: &StyleMap) {
    if let Some(label) = styles.get(P::BorderRadius).and_then(map_radius) {
        if label.is_empty() {
            classes.push("rounded".into());
        } else {
            classes.push(format!("rounded-{label}"));
        }
    }

    let width = styles
        .get(P::BorderWidth)
        .or_else(|| styles.get(P::BorderTopWidth))
        .and_then(parse_leading_float)
        .unwrap_or(0.0);
    if width <= 0.0 {
        return;
    }
    if width == 1.0 {
        classes.push("border".into());
    } else {
        classes.push(format!("border-[{width}px]"));
    }

    let border_color = styles
        .get(P::BorderColor)
        .or_else(|| styles.get(P::BorderTopColor))
        .unwrap_or("");
    if let Some(color) = resolve_color(border_color) {
        classes.push(format!("border-{color}"));
    }
}

/// Only the literal `100%` width is translated; other percentages and
/// viewport units have no mapping.
fn push_sizing(classes: &mut Vec<String>, styles: &StyleMap) {
    if styles.get(P::Width) == Some("100%") {
        classes.push("w-full".into());
    }
}

fn push_position(classes: &mut Vec<String>, styles: &StyleMap) {
    match styles.get(P::Position) {
        Some("absolute") => classes.push("absolute".into()),
        Some("relative") => classes.push("relative".into()),
        _ => {}
    }

    if let Some(z) = styles.get(P::ZIndex).filter(|z| *z != "auto") {
        classes.push(format!("z-[{z}]"));
    }
}
