//! Color → palette resolution.
//!
//! Resolution is a first-match-wins chain:
//! transparent keyword → exact palette string → zero alpha → pure
//! black/white → hue buckets → grayscale bands → arbitrary `[#rrggbb]`
//! token. Only the exact serialised string hits the palette table, so
//! `rgba(59, 130, 246, 0.5)` falls through to the hue rules.
//! The hue rules overlap; their order is part of the output contract.

/// Known palette entries, matched on the exact computed-style string
/// (`rgb(r, g, b)` with comma-space separators, as browsers serialise it).
const PALETTE: &[(&str, &str)] = &[
    ("rgb(0, 0, 0)", "black"),
    ("rgb(255, 255, 255)", "white"),
    ("rgb(239, 68, 68)", "red-500"),
    ("rgb(249, 115, 22)", "orange-500"),
    ("rgb(234, 179, 8)", "yellow-500"),
    ("rgb(34, 197, 94)", "green-500"),
    ("rgb(14, 165, 233)", "sky-500"),
    ("rgb(59, 130, 246)", "blue-500"),
    ("rgb(168, 85, 247)", "purple-500"),
    ("rgb(236, 72, 153)", "pink-500"),
    ("rgb(107, 114, 128)", "gray-500"),
    ("rgb(156, 163, 175)", "gray-400"),
    ("rgb(75, 85, 99)", "gray-600"),
    ("rgb(55, 65, 81)", "gray-700"),
    ("rgb(31, 41, 55)", "gray-800"),
    ("rgb(17, 24, 39)", "gray-900"),
    ("rgb(249, 250, 251)", "gray-50"),
    ("rgb(243, 244, 246)", "gray-100"),
    ("rgb(229, 231, 235)", "gray-200"),
    ("rgb(209, 213, 219)", "gray-300"),
];

/// One coarse hue bucket: a channel inequality and the bucket it selects.
struct HueRule {
    matches: fn(i32, i32, i32) -> bool,
    name: &'static str,
}

/// Coarse hue buckets, evaluated in order.
const HUE_RULES: [HueRule; 8] = [
    HueRule { matches: |r, g, b| r > 200 && g < 100 && b < 100, name: "red-500" },
    HueRule { matches: |r, g, b| r > 200 && g > 150 && b < 100, name: "orange-500" },
    HueRule { matches: |r, g, b| r > 200 && g > 200 && b < 100, name: "yellow-500" },
    HueRule { matches: |r, g, b| r < 100 && g > 180 && b < 150, name: "green-500" },
    HueRule { matches: |r, g, b| r < 100 && g < 200 && b > 200, name: "sky-500" },
    HueRule { matches: |r, g, b| r < 100 && g < 150 && b > 200, name: "blue-500" },
    HueRule { matches: |r, g, b| r > 150 && g < 100 && b > 200, name: "purple-500" },
    HueRule { matches: |r, g, b| r > 200 && g < 100 && b > 150, name: "pink-500" },
];

/// Channels closer than this to each other count as gray.
const GRAY_TOLERANCE: i32 = 15;

/// Luminance bands for grays: upper bound (exclusive) of the channel
/// average → palette name. Anything brighter is `white`.
const GRAY_BANDS: &[(f64, &str)] = &[
    (20.0, "black"),
    (50.0, "neutral-900"),
    (80.0, "neutral-800"),
    (110.0, "neutral-700"),
    (140.0, "neutral-600"),
    (170.0, "neutral-500"),
    (200.0, "neutral-400"),
    (230.0, "neutral-300"),
    (245.0, "neutral-200"),
    (252.0, "neutral-100"),
];

/// Result of resolving a CSS color against the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedColor {
    Transparent,
    /// A palette name such as `blue-500` or `neutral-300`.
    Palette(&'static str),
    /// No palette match; rendered as an arbitrary-value token.
    Arbitrary([u8; 3]),
}

impl ResolvedColor {
    /// Class suffix, e.g. `blue-500` or `[#1a2b3c]`.
    pub fn token(&self) -> String {
        match self {
            ResolvedColor::Transparent => "transparent".to_string(),
            ResolvedColor::Palette(name) => (*name).to_string(),
            ResolvedColor::Arbitrary([r, g, b]) => format!("[#{:02x}{:02x}{:02x}]", r, g, b),
        }
    }

    pub fn is_transparent(&self) -> bool {
        matches!(self, ResolvedColor::Transparent)
    }

    pub fn is_white(&self) -> bool {
        matches!(self, ResolvedColor::Palette("white"))
    }
}

impl std::fmt::Display for ResolvedColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.token())
    }
}

/// Parsed `rgb()` / `rgba()` value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

/// Parse `rgb(r, g, b)` / `rgba(r, g, b, a)`, comma- or space-separated.
pub fn parse_rgb(raw: &str) -> Option<Rgba> {
    let v = raw.trim().to_ascii_lowercase();
    let inner = v
        .strip_prefix("rgba(")
        .or_else(|| v.strip_prefix("rgb("))?;
    let inner = inner.trim_end().trim_end_matches(')');

    let parts: Vec<&str> = inner
        .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .collect();
    if parts.len() < 3 {
        return None;
    }

    let channel = |s: &str| -> Option<u8> {
        let n = s.parse::<f64>().ok()?;
        Some(n.round().clamp(0.0, 255.0) as u8)
    };
    let r = channel(parts[0])?;
    let g = channel(parts[1])?;
    let b = channel(parts[2])?;

    let a = match parts.get(3) {
        Some(alpha) => match alpha.strip_suffix('%') {
            Some(pct) => pct.parse::<f32>().ok()? / 100.0,
            None => alpha.parse::<f32>().ok()?,
        },
        None => 1.0,
    };

    Some(Rgba { r, g, b, a: a.clamp(0.0, 1.0) })
}

/// Resolve a computed color string to a palette entry.
///
/// Empty input and `transparent` resolve to [`ResolvedColor::Transparent`];
/// strings that are neither keywords nor parsable `rgb()`/`rgba()` have no
/// mapping.
pub fn resolve_color(raw: &str) -> Option<ResolvedColor> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("transparent") {
        return Some(ResolvedColor::Transparent);
    }

    if let Some((_, name)) = PALETTE.iter().find(|(entry, _)| *entry == trimmed) {
        return Some(ResolvedColor::Palette(*name));
    }

    let rgba = parse_rgb(trimmed)?;
    if rgba.a == 0.0 {
        return Some(ResolvedColor::Transparent);
    }

    let rgb = [rgba.r, rgba.g, rgba.b];
    match rgb {
        [0, 0, 0] => return Some(ResolvedColor::Palette("black")),
        [255, 255, 255] => return Some(ResolvedColor::Palette("white")),
        _ => {}
    }

    let (r, g, b) = (rgba.r as i32, rgba.g as i32, rgba.b as i32);

    if let Some(rule) = HUE_RULES.iter().find(|rule| (rule.matches)(r, g, b)) {
        return Some(ResolvedColor::Palette(rule.name));
    }

    if (r - g).abs() < GRAY_TOLERANCE && (g - b).abs() < GRAY_TOLERANCE {
        let avg = (r + g + b) as f64 / 3.0;
        let name = GRAY_BANDS
            .iter()
            .find(|(upper, _)| avg < *upper)
            .map(|(_, name)| *name)
            .unwrap_or("white");
        return Some(ResolvedColor::Palette(name));
    }

    Some(ResolvedColor::Arbitrary(rgb))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(raw: &str) -> Option<String> {
        resolve_color(raw).map(|c| c.token())
    }

    #[test]
    fn exact_palette_hits() {
        assert_eq!(token("rgb(59, 130, 246)").as_deref(), Some("blue-500"));
        assert_eq!(token(" rgb(17, 24, 39) ").as_deref(), Some("gray-900"));
        assert_eq!(token("rgb(229, 231, 235)").as_deref(), Some("gray-200"));
    }

    #[test]
    fn non_canonical_strings_skip_the_palette() {
        // Same triple as blue-500, but not the serialised form: the hue
        // rules decide, and sky comes before blue.
        assert_eq!(token("rgb(59,130,246)").as_deref(), Some("sky-500"));
        assert_eq!(token("rgba(59, 130, 246, 0.5)").as_deref(), Some("sky-500"));
        // Same triple as gray-900 with alpha: grayscale bands don't apply
        // (|g-b| = 15), so it falls back to hex.
        assert_eq!(token("rgba(17, 24, 39, 0.8)").as_deref(), Some("[#111827]"));
        // Pure black and white still shortcut regardless of alpha.
        assert_eq!(token("rgba(0, 0, 0, 0.5)").as_deref(), Some("black"));
        assert_eq!(token("rgb(255,255,255)").as_deref(), Some("white"));
        // Off-palette pink triple with alpha lands in the pink hue bucket.
        assert_eq!(token("rgba(236, 72, 153, 0.5)").as_deref(), Some("pink-500"));
    }

    #[test]
    fn transparent_forms() {
        assert_eq!(resolve_color("rgba(0,0,0,0)"), Some(ResolvedColor::Transparent));
        assert_eq!(resolve_color("rgba(0, 0, 0, 0)"), Some(ResolvedColor::Transparent));
        assert_eq!(resolve_color("rgba(255, 0, 0, 0)"), Some(ResolvedColor::Transparent));
        assert_eq!(resolve_color("transparent"), Some(ResolvedColor::Transparent));
        assert_eq!(resolve_color(""), Some(ResolvedColor::Transparent));
    }

    #[test]
    fn unparsable_has_no_mapping() {
        assert_eq!(resolve_color("red"), None);
        assert_eq!(resolve_color("#ff0000"), None);
        assert_eq!(resolve_color("rgb(1, 2)"), None);
        assert_eq!(resolve_color("hsl(0, 100%, 50%)"), None);
    }

    #[test]
    fn hue_rule_order_is_preserved() {
        assert_eq!(token("rgb(220, 40, 40)").as_deref(), Some("red-500"));
        // Matches both orange and yellow; orange comes first.
        assert_eq!(token("rgb(230, 220, 50)").as_deref(), Some("orange-500"));
        assert_eq!(token("rgb(40, 200, 100)").as_deref(), Some("green-500"));
        // Matches both sky and blue; sky comes first.
        assert_eq!(token("rgb(30, 100, 230)").as_deref(), Some("sky-500"));
        assert_eq!(token("rgb(180, 50, 230)").as_deref(), Some("purple-500"));
        // Matches both purple and pink; purple comes first.
        assert_eq!(token("rgb(230, 50, 210)").as_deref(), Some("purple-500"));
        assert_eq!(token("rgb(230, 50, 180)").as_deref(), Some("pink-500"));
    }

    #[test]
    fn grayscale_band_boundaries() {
        assert_eq!(token("rgb(19, 19, 19)").as_deref(), Some("black"));
        assert_eq!(token("rgb(20, 20, 20)").as_deref(), Some("neutral-900"));
        assert_eq!(token("rgb(100, 100, 100)").as_deref(), Some("neutral-700"));
        assert_eq!(token("rgb(110, 110, 110)").as_deref(), Some("neutral-600"));
        assert_eq!(token("rgb(200, 200, 200)").as_deref(), Some("neutral-300"));
        assert_eq!(token("rgb(251, 251, 251)").as_deref(), Some("neutral-100"));
        assert_eq!(token("rgb(252, 252, 252)").as_deref(), Some("white"));
        // Near-gray with small channel drift still lands in a band.
        assert_eq!(token("rgb(120, 128, 135)").as_deref(), Some("neutral-600"));
    }

    #[test]
    fn hex_fallback() {
        assert_eq!(token("rgb(26, 43, 60)").as_deref(), Some("[#1a2b3c]"));
        assert_eq!(token("rgb(120, 60, 30)").as_deref(), Some("[#783c1e]"));
    }

    #[test]
    fn parse_rgb_variants() {
        let c = parse_rgb("rgba(10, 20, 30, 0.25)").unwrap();
        assert_eq!((c.r, c.g, c.b), (10, 20, 30));
        assert!((c.a - 0.25).abs() < f32::EPSILON);

        let c = parse_rgb("rgb(10 20 30 / 50%)").unwrap();
        assert!((c.a - 0.5).abs() < f32::EPSILON);

        assert!(parse_rgb("rgb(300, -5, 0)").is_some());
        assert!(parse_rgb("rgb(a, b, c)").is_none());
    }
}
