//! Lightweight CSS text handling.
//!
//! Parses `style=""` attributes and `<style>` sheets into declarations,
//! expands the shorthands the cascade cares about, and normalizes colors
//! and lengths into the shapes a browser reports as computed values
//! (`rgb(r, g, b)`, `12px`).

use crate::style::color::{parse_rgb, Rgba};

/// One `selector { declarations }` rule from a stylesheet.
#[derive(Debug, Clone, PartialEq)]
pub struct CssRule {
    pub selector: String,
    pub declarations: Vec<(String, String)>,
}

/// Parse a declaration block (`color: red; padding: 4px`).
///
/// Property names are lower-cased; `!important` is dropped.
pub fn parse_declarations(block: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for decl in block.split(';') {
        let parts: Vec<&str> = decl.splitn(2, ':').collect();
        if parts.len() != 2 {
            continue;
        }
        let prop = parts[0].trim().to_ascii_lowercase();
        let val = parts[1].trim();
        let val = val
            .strip_suffix("!important")
            .map(str::trim_end)
            .unwrap_or(val);
        if prop.is_empty() || val.is_empty() {
            continue;
        }
        out.push((prop, val.to_string()));
    }
    out
}

/// Parse a stylesheet into plain rules. At-rules (and their blocks) are
/// skipped; comments are removed first.
pub fn parse_stylesheet(css: &str) -> Vec<CssRule> {
    let css = strip_comments(css);
    let mut rules = Vec::new();
    let mut rest = css.as_str();

    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            break;
        }

        if rest.starts_with('@') {
            let brace = rest.find('{');
            let semi = rest.find(';');
            match (brace, semi) {
                (b, Some(s)) if b.map_or(true, |b| s < b) => rest = &rest[s + 1..],
                (Some(b), _) => rest = &rest[matching_brace_end(rest, b)..],
                _ => break,
            }
            continue;
        }

        let Some(open) = rest.find('{') else { break };
        let body_start = open + 1;
        let Some(close) = rest[body_start..].find('}') else { break };
        let selector = rest[..open].trim();
        let body = &rest[body_start..body_start + close];
        if !selector.is_empty() {
            rules.push(CssRule {
                selector: selector.to_string(),
                declarations: parse_declarations(body),
            });
        }
        rest = &rest[body_start + close + 1..];
    }

    rules
}

fn strip_comments(css: &str) -> String {
    let mut out = String::with_capacity(css.len());
    let mut rest = css;
    while let Some(start) = rest.find("/*") {
        out.push_str(&rest[..start]);
        match rest[start + 2..].find("*/") {
            Some(end) => rest = &rest[start + 2 + end + 2..],
            None => return out,
        }
    }
    out.push_str(rest);
    out
}

/// Byte index just past the `}` that closes the `{` at `open`.
fn matching_brace_end(s: &str, open: usize) -> usize {
    let mut depth = 0usize;
    for (i, ch) in s[open..].char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return open + i + 1;
                }
            }
            _ => {}
        }
    }
    s.len()
}

/// Split a value on whitespace, keeping parenthesized groups together:
/// `1px solid rgb(0, 0, 0)` → `["1px", "solid", "rgb(0, 0, 0)"]`.
pub fn split_values(val: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    for ch in val.chars() {
        match ch {
            '(' => {
                depth += 1;
                current.push(ch);
            }
            ')' => {
                depth = depth.saturating_sub(1);
                current.push(ch);
            }
            c if c.is_whitespace() && depth == 0 => {
                if !current.is_empty() {
                    parts.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        parts.push(current);
    }
    parts
}

/// Expand 1–4 box values into `[top, right, bottom, left]`.
pub fn box_edges(values: &[String]) -> Option<[String; 4]> {
    let v = |i: usize| values[i].clone();
    match values.len() {
        1 => Some([v(0), v(0), v(0), v(0)]),
        2 => Some([v(0), v(1), v(0), v(1)]),
        3 => Some([v(0), v(1), v(2), v(1)]),
        4 => Some([v(0), v(1), v(2), v(3)]),
        _ => None,
    }
}

pub const SIDES: [&str; 4] = ["top", "right", "bottom", "left"];
pub const CORNERS: [&str; 4] = ["top-left", "top-right", "bottom-right", "bottom-left"];

const BORDER_STYLES: &[&str] = &[
    "none", "hidden", "dotted", "dashed", "solid", "double", "groove", "ridge", "inset", "outset",
];

/// Expand a shorthand declaration into longhands. Non-shorthand
/// properties come back unchanged.
pub fn expand_shorthand(prop: &str, val: &str) -> Vec<(String, String)> {
    let values = split_values(val);
    match prop {
        "padding" | "margin" => match box_edges(&values) {
            Some(edges) => SIDES
                .iter()
                .zip(edges)
                .map(|(side, v)| (format!("{prop}-{side}"), v))
                .collect(),
            None => Vec::new(),
        },
        "border-width" | "border-style" | "border-color" => {
            let kind = &prop["border-".len()..];
            match box_edges(&values) {
                Some(edges) => SIDES
                    .iter()
                    .zip(edges)
                    .map(|(side, v)| (format!("border-{side}-{kind}"), v))
                    .collect(),
                None => Vec::new(),
            }
        }
        "border-radius" => {
            // Elliptical radii: only the horizontal half is kept.
            let horizontal = val.split('/').next().unwrap_or(val);
            match box_edges(&split_values(horizontal)) {
                Some(edges) => CORNERS
                    .iter()
                    .zip(edges)
                    .map(|(corner, v)| (format!("border-{corner}-radius"), v))
                    .collect(),
                None => Vec::new(),
            }
        }
        "border" => expand_border(&SIDES, &values),
        "border-top" | "border-right" | "border-bottom" | "border-left" => {
            let side = &prop["border-".len()..];
            expand_border(&[side], &values)
        }
        "background" => values
            .iter()
            .find(|v| parse_css_color(v).is_some())
            .map(|color| vec![("background-color".to_string(), color.clone())])
            .unwrap_or_else(|| {
                if val.trim() == "none" {
                    vec![("background-color".to_string(), "transparent".to_string())]
                } else {
                    Vec::new()
                }
            }),
        "flex" => expand_flex(&values),
        _ => vec![(prop.to_string(), val.to_string())],
    }
}

fn expand_border(sides: &[&str], values: &[String]) -> Vec<(String, String)> {
    let mut width = "medium".to_string();
    let mut style = "none".to_string();
    let mut color = "currentcolor".to_string();
    for v in values {
        let lower = v.to_ascii_lowercase();
        if BORDER_STYLES.contains(&lower.as_str()) {
            style = lower;
        } else if parse_css_color(v).is_some() || lower == "currentcolor" {
            color = v.clone();
        } else {
            width = v.clone();
        }
    }

    let mut out = Vec::new();
    for side in sides {
        out.push((format!("border-{side}-width"), width.clone()));
        out.push((format!("border-{side}-style"), style.clone()));
        out.push((format!("border-{side}-color"), color.clone()));
    }
    out
}

fn expand_flex(values: &[String]) -> Vec<(String, String)> {
    let triple = |g: &str, s: &str, b: &str| {
        vec![
            ("flex-grow".to_string(), g.to_string()),
            ("flex-shrink".to_string(), s.to_string()),
            ("flex-basis".to_string(), b.to_string()),
        ]
    };
    match values {
        [one] if one == "none" => triple("0", "0", "auto"),
        [one] if one == "auto" => triple("1", "1", "auto"),
        [one] if one.parse::<f64>().is_ok() => triple(one, "1", "0%"),
        [one] => triple("1", "1", one),
        [grow, second] if second.parse::<f64>().is_ok() => triple(grow, second, "0%"),
        [grow, basis] => triple(grow, "1", basis),
        [grow, shrink, basis] => triple(grow, shrink, basis),
        _ => Vec::new(),
    }
}

/// Parse a CSS color (named subset, hex, `rgb()`/`rgba()`, `transparent`).
pub fn parse_css_color(val: &str) -> Option<Rgba> {
    let v = val.trim().to_ascii_lowercase();

    let named = |r: u8, g: u8, b: u8| Some(Rgba { r, g, b, a: 1.0 });
    match v.as_str() {
        "transparent" => return Some(Rgba { r: 0, g: 0, b: 0, a: 0.0 }),
        "black" => return named(0, 0, 0),
        "white" => return named(255, 255, 255),
        "red" => return named(255, 0, 0),
        "green" => return named(0, 128, 0),
        "lime" => return named(0, 255, 0),
        "blue" => return named(0, 0, 255),
        "navy" => return named(0, 0, 128),
        "yellow" => return named(255, 255, 0),
        "orange" => return named(255, 165, 0),
        "purple" => return named(128, 0, 128),
        "fuchsia" | "magenta" => return named(255, 0, 255),
        "aqua" | "cyan" => return named(0, 255, 255),
        "teal" => return named(0, 128, 128),
        "maroon" => return named(128, 0, 0),
        "olive" => return named(128, 128, 0),
        "silver" => return named(192, 192, 192),
        "gray" | "grey" => return named(128, 128, 128),
        "pink" => return named(255, 192, 203),
        _ => {}
    }

    if let Some(hex) = v.strip_prefix('#') {
        if !hex.is_ascii() {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        let short = |s: &str| channel(s).map(|c| c * 17);
        return match hex.len() {
            3 | 4 => {
                let a = if hex.len() == 4 { short(&hex[3..4])? as f32 / 255.0 } else { 1.0 };
                Some(Rgba {
                    r: short(&hex[0..1])?,
                    g: short(&hex[1..2])?,
                    b: short(&hex[2..3])?,
                    a,
                })
            }
            6 | 8 => {
                let a = if hex.len() == 8 { channel(&hex[6..8])? as f32 / 255.0 } else { 1.0 };
                Some(Rgba {
                    r: channel(&hex[0..2])?,
                    g: channel(&hex[2..4])?,
                    b: channel(&hex[4..6])?,
                    a,
                })
            }
            _ => None,
        };
    }

    if v.starts_with("rgb") {
        return parse_rgb(&v);
    }

    None
}

/// Serialize a color the way computed style does.
pub fn format_color(c: Rgba) -> String {
    if c.a >= 1.0 {
        format!("rgb({}, {}, {})", c.r, c.g, c.b)
    } else {
        let a = (c.a * 1000.0).round() / 1000.0;
        format!("rgba({}, {}, {}, {})", c.r, c.g, c.b, a)
    }
}

/// Resolve a length to px. `em` is relative to `font_size`, `rem` to the
/// 16px root. Percentages, `auto` and friends are not lengths here.
pub fn parse_length(val: &str, font_size: f64) -> Option<f64> {
    let v = val.trim().to_ascii_lowercase();
    if v == "0" {
        return Some(0.0);
    }
    let (num, factor) = if let Some(n) = v.strip_suffix("rem") {
        (n, 16.0)
    } else if let Some(n) = v.strip_suffix("px") {
        (n, 1.0)
    } else if let Some(n) = v.strip_suffix("em") {
        (n, font_size)
    } else if let Some(n) = v.strip_suffix("pt") {
        (n, 4.0 / 3.0)
    } else {
        return None;
    };
    num.trim().parse::<f64>().ok().map(|n| n * factor)
}

/// `16.0` → `16px`, `21.44` → `21.44px`.
pub fn format_px(px: f64) -> String {
    let rounded = (px * 100.0).round() / 100.0;
    format!("{}px", rounded)
}
