//! Computed-style sampling.
//!
//! A [`StyleMap`] is the flat, filtered view of an element's computed style
//! that every downstream stage works from. Only a fixed set of properties is
//! sampled, and values that carry no information (`none`, `normal`, `auto`,
//! `0px`) are dropped at the source.

pub mod color;
pub mod scale;

use std::collections::BTreeMap;

use crate::dom::StyledElement;

/// Computed values that are treated as "nothing to say" and never stored.
pub const SUPPRESSED_DEFAULTS: &[&str] = &["none", "normal", "auto", "0px"];

/// The style properties the sampler reads, in sampling order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StyleProperty {
    // Layout
    Display,
    FlexDirection,
    JustifyContent,
    AlignItems,
    Gap,
    // Spacing
    PaddingTop,
    PaddingRight,
    PaddingBottom,
    PaddingLeft,
    MarginTop,
    MarginRight,
    MarginBottom,
    MarginLeft,
    // Sizing
    Width,
    Height,
    MaxWidth,
    MinWidth,
    MaxHeight,
    MinHeight,
    // Color & typography
    BackgroundColor,
    Color,
    FontSize,
    FontWeight,
    FontFamily,
    LineHeight,
    LetterSpacing,
    TextAlign,
    TextDecoration,
    // Border
    BorderRadius,
    BorderTopLeftRadius,
    BorderTopRightRadius,
    BorderBottomRightRadius,
    BorderBottomLeftRadius,
    BorderWidth,
    BorderTopWidth,
    BorderRightWidth,
    BorderBottomWidth,
    BorderLeftWidth,
    BorderColor,
    BorderTopColor,
    BorderRightColor,
    BorderBottomColor,
    BorderLeftColor,
    // Effects & position
    BoxShadow,
    Opacity,
    Position,
    Top,
    Right,
    Bottom,
    Left,
    ZIndex,
    Overflow,
    Transform,
    Transition,
    // Flex item
    FlexGrow,
    FlexShrink,
    FlexBasis,
}

impl StyleProperty {
    /// Every sampled property, in sampling order.
    pub const ALL: &'static [StyleProperty] = &[
        StyleProperty::Display,
        StyleProperty::FlexDirection,
        StyleProperty::JustifyContent,
        StyleProperty::AlignItems,
        StyleProperty::Gap,
        StyleProperty::PaddingTop,
        StyleProperty::PaddingRight,
        StyleProperty::PaddingBottom,
        StyleProperty::PaddingLeft,
        StyleProperty::MarginTop,
        StyleProperty::MarginRight,
        StyleProperty::MarginBottom,
        StyleProperty::MarginLeft,
        StyleProperty::Width,
        StyleProperty::Height,
        StyleProperty::MaxWidth,
        StyleProperty::MinWidth,
        StyleProperty::MaxHeight,
        StyleProperty::MinHeight,
        StyleProperty::BackgroundColor,
        StyleProperty::Color,
        StyleProperty::FontSize,
        StyleProperty::FontWeight,
        StyleProperty::FontFamily,
        StyleProperty::LineHeight,
        StyleProperty::LetterSpacing,
        StyleProperty::TextAlign,
        StyleProperty::TextDecoration,
        StyleProperty::BorderRadius,
        StyleProperty::BorderTopLeftRadius,
        StyleProperty::BorderTopRightRadius,
        StyleProperty::BorderBottomRightRadius,
        StyleProperty::BorderBottomLeftRadius,
        StyleProperty::BorderWidth,
        StyleProperty::BorderTopWidth,
        StyleProperty::BorderRightWidth,
        StyleProperty::BorderBottomWidth,
        StyleProperty::BorderLeftWidth,
        StyleProperty::BorderColor,
        StyleProperty::BorderTopColor,
        StyleProperty::BorderRightColor,
        StyleProperty::BorderBottomColor,
        StyleProperty::BorderLeftColor,
        StyleProperty::BoxShadow,
        StyleProperty::Opacity,
        StyleProperty::Position,
        StyleProperty::Top,
        StyleProperty::Right,
        StyleProperty::Bottom,
        StyleProperty::Left,
        StyleProperty::ZIndex,
        StyleProperty::Overflow,
        StyleProperty::Transform,
        StyleProperty::Transition,
        StyleProperty::FlexGrow,
        StyleProperty::FlexShrink,
        StyleProperty::FlexBasis,
    ];

    /// Script-side (camelCase) property name, e.g. `paddingTop`.
    pub fn camel_name(self) -> &'static str {
        match self {
            StyleProperty::Display => "display",
            StyleProperty::FlexDirection => "flexDirection",
            StyleProperty::JustifyContent => "justifyContent",
            StyleProperty::AlignItems => "alignItems",
            StyleProperty::Gap => "gap",
            StyleProperty::PaddingTop => "paddingTop",
            StyleProperty::PaddingRight => "paddingRight",
            StyleProperty::PaddingBottom => "paddingBottom",
            StyleProperty::PaddingLeft => "paddingLeft",
            StyleProperty::MarginTop => "marginTop",
            StyleProperty::MarginRight => "marginRight",
            StyleProperty::MarginBottom => "marginBottom",
            StyleProperty::MarginLeft => "marginLeft",
            StyleProperty::Width => "width",
            StyleProperty::Height => "height",
            StyleProperty::MaxWidth => "maxWidth",
            StyleProperty::MinWidth => "minWidth",
            StyleProperty::MaxHeight => "maxHeight",
            StyleProperty::MinHeight => "minHeight",
            StyleProperty::BackgroundColor => "backgroundColor",
            StyleProperty::Color => "color",
            StyleProperty::FontSize => "fontSize",
            StyleProperty::FontWeight => "fontWeight",
            StyleProperty::FontFamily => "fontFamily",
            StyleProperty::LineHeight => "lineHeight",
            StyleProperty::LetterSpacing => "letterSpacing",
            StyleProperty::TextAlign => "textAlign",
            StyleProperty::TextDecoration => "textDecoration",
            StyleProperty::BorderRadius => "borderRadius",
            StyleProperty::BorderTopLeftRadius => "borderTopLeftRadius",
            StyleProperty::BorderTopRightRadius => "borderTopRightRadius",
            StyleProperty::BorderBottomRightRadius => "borderBottomRightRadius",
            StyleProperty::BorderBottomLeftRadius => "borderBottomLeftRadius",
            StyleProperty::BorderWidth => "borderWidth",
            StyleProperty::BorderTopWidth => "borderTopWidth",
            StyleProperty::BorderRightWidth => "borderRightWidth",
            StyleProperty::BorderBottomWidth => "borderBottomWidth",
            StyleProperty::BorderLeftWidth => "borderLeftWidth",
            StyleProperty::BorderColor => "borderColor",
            StyleProperty::BorderTopColor => "borderTopColor",
            StyleProperty::BorderRightColor => "borderRightColor",
            StyleProperty::BorderBottomColor => "borderBottomColor",
            StyleProperty::BorderLeftColor => "borderLeftColor",
            StyleProperty::BoxShadow => "boxShadow",
            StyleProperty::Opacity => "opacity",
            StyleProperty::Position => "position",
            StyleProperty::Top => "top",
            StyleProperty::Right => "right",
            StyleProperty::Bottom => "bottom",
            StyleProperty::Left => "left",
            StyleProperty::ZIndex => "zIndex",
            StyleProperty::Overflow => "overflow",
            StyleProperty::Transform => "transform",
            StyleProperty::Transition => "transition",
            StyleProperty::FlexGrow => "flexGrow",
            StyleProperty::FlexShrink => "flexShrink",
            StyleProperty::FlexBasis => "flexBasis",
        }
    }

    /// Stylesheet-side (kebab-case) property name, e.g. `padding-top`.
    pub fn css_name(self) -> String {
        camel_to_kebab(self.camel_name())
    }

    /// Look a property up by its camelCase name.
    pub fn from_camel(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|p| p.camel_name() == name)
    }
}

impl std::fmt::Display for StyleProperty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.camel_name())
    }
}

/// `paddingTop` → `padding-top`
pub fn camel_to_kebab(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for ch in name.chars() {
        if ch.is_ascii_uppercase() {
            out.push('-');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Whether a computed value is one of the uninteresting defaults.
pub fn is_suppressed_default(value: &str) -> bool {
    SUPPRESSED_DEFAULTS.contains(&value)
}

/// Filtered computed-style snapshot of one element.
///
/// Keys are unique and every stored value is non-empty and not a
/// suppressed default. Iteration order is the sampling order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleMap {
    entries: BTreeMap<StyleProperty, String>,
}

impl StyleMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, prop: StyleProperty) -> Option<&str> {
        self.entries.get(&prop).map(|s| s.as_str())
    }

    pub fn contains(&self, prop: StyleProperty) -> bool {
        self.entries.contains_key(&prop)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (StyleProperty, &str)> {
        self.entries.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Builder-style insert that applies the same filter as the sampler.
    pub fn with(mut self, prop: StyleProperty, value: impl Into<String>) -> Self {
        self.insert(prop, value.into());
        self
    }

    /// Insert without the default filter, for exercising rules on values
    /// the sampler never stores.
    #[cfg(test)]
    pub(crate) fn with_unfiltered(mut self, prop: StyleProperty, value: &str) -> Self {
        self.entries.insert(prop, value.to_string());
        self
    }

    fn insert(&mut self, prop: StyleProperty, value: String) {
        let value = value.trim();
        if value.is_empty() || is_suppressed_default(value) {
            return;
        }
        self.entries.insert(prop, value.to_string());
    }
}

impl FromIterator<(StyleProperty, String)> for StyleMap {
    fn from_iter<I: IntoIterator<Item = (StyleProperty, String)>>(iter: I) -> Self {
        let mut map = StyleMap::new();
        for (prop, value) in iter {
            map.insert(prop, value);
        }
        map
    }
}

/// Read every sampled property off a live element.
pub fn sample<E: StyledElement>(element: &E) -> StyleMap {
    StyleProperty::ALL
        .iter()
        .filter_map(|&prop| {
            element
                .computed_style(&prop.css_name())
                .map(|value| (prop, value))
        })
        .collect()
}
