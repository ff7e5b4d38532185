//! Typography metadata for a selected element.

use crate::style::{StyleMap, StyleProperty as P};

const PLACEHOLDER: &str = "—";

/// Font facts read from a style map, with display defaults filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Typography {
    /// Full `font-family` list, or `Not specified`.
    pub family: String,
    /// First family in the list with quotes removed, or `Unknown`.
    pub primary_font: String,
    pub weight: String,
    pub size: String,
    pub line_height: String,
    pub letter_spacing: String,
    pub color: String,
}

impl Typography {
    /// `(label, value)` rows in display order.
    pub fn rows(&self) -> [(&'static str, &str); 6] {
        [
            ("Family", self.primary_font.as_str()),
            ("Weight", self.weight.as_str()),
            ("Size", self.size.as_str()),
            ("Line Height", self.line_height.as_str()),
            ("Spacing", self.letter_spacing.as_str()),
            ("Color", self.color.as_str()),
        ]
    }

    /// Whether a color was captured (rather than the placeholder).
    pub fn has_color(&self) -> bool {
        self.color != PLACEHOLDER
    }
}

pub fn typography_for(styles: &StyleMap) -> Typography {
    let or = |prop: P, fallback: &str| styles.get(prop).unwrap_or(fallback).to_string();

    let family = or(P::FontFamily, "Not specified");
    let primary_font = family
        .split(',')
        .next()
        .map(|f| f.trim().replace(|c: char| c == '\'' || c == '"', ""))
        .filter(|f| !f.is_empty())
        .unwrap_or_else(|| "Unknown".to_string());

    Typography {
        primary_font,
        family,
        weight: or(P::FontWeight, "400"),
        size: or(P::FontSize, PLACEHOLDER),
        line_height: or(P::LineHeight, PLACEHOLDER),
        letter_spacing: or(P::LetterSpacing, PLACEHOLDER),
        color: or(P::Color, PLACEHOLDER),
    }
}
