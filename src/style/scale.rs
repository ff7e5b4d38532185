//! Pixel → design-scale mapping.
//!
//! Three nearest-neighbour tables (spacing, font size, border radius) plus
//! the font-weight keyword table. Tables are sorted ascending and searched
//! with a left-to-right fold that only replaces the running best on a
//! strictly smaller distance, so an input equidistant from two breakpoints
//! always resolves to the smaller one.

/// Spacing scale: px → label. Used for padding, margin and gap.
pub const SPACING_SCALE: &[(f64, &str)] = &[
    (0.0, "0"),
    (1.0, "px"),
    (2.0, "0.5"),
    (4.0, "1"),
    (6.0, "1.5"),
    (8.0, "2"),
    (10.0, "2.5"),
    (12.0, "3"),
    (14.0, "3.5"),
    (16.0, "4"),
    (20.0, "5"),
    (24.0, "6"),
    (28.0, "7"),
    (32.0, "8"),
    (36.0, "9"),
    (40.0, "10"),
    (44.0, "11"),
    (48.0, "12"),
    (56.0, "14"),
    (64.0, "16"),
    (80.0, "20"),
    (96.0, "24"),
    (112.0, "28"),
    (128.0, "32"),
    (144.0, "36"),
    (160.0, "40"),
    (176.0, "44"),
    (192.0, "48"),
    (208.0, "52"),
    (224.0, "56"),
    (240.0, "60"),
    (256.0, "64"),
    (288.0, "72"),
    (320.0, "80"),
    (384.0, "96"),
];

/// Type scale: px → label.
pub const FONT_SIZE_SCALE: &[(f64, &str)] = &[
    (12.0, "xs"),
    (14.0, "sm"),
    (16.0, "base"),
    (18.0, "lg"),
    (20.0, "xl"),
    (24.0, "2xl"),
    (30.0, "3xl"),
    (36.0, "4xl"),
    (48.0, "5xl"),
    (60.0, "6xl"),
    (72.0, "7xl"),
    (96.0, "8xl"),
    (128.0, "9xl"),
];

/// Radius scale: px → label. The empty label is the bare `rounded` step.
pub const RADIUS_SCALE: &[(f64, &str)] = &[
    (2.0, "sm"),
    (4.0, ""),
    (6.0, "md"),
    (8.0, "lg"),
    (12.0, "xl"),
    (16.0, "2xl"),
    (24.0, "3xl"),
    (9999.0, "full"),
];

/// Radii at or above this many px are treated as fully rounded.
const FULL_RADIUS_THRESHOLD: f64 = 100.0;

/// Font-weight keyword → weight label.
const FONT_WEIGHTS: &[(&str, &str)] = &[
    ("100", "thin"),
    ("200", "extralight"),
    ("300", "light"),
    ("normal", "normal"),
    ("400", "normal"),
    ("500", "medium"),
    ("600", "semibold"),
    ("bold", "bold"),
    ("700", "bold"),
    ("800", "extrabold"),
    ("900", "black"),
];

/// Parse the leading decimal number of a CSS value, ignoring any unit
/// suffix: `"15.5px"` → `15.5`, `"-8px"` → `-8`, `"50%"` → `50`.
/// Returns `None` when the value does not start with a number or the
/// number overflows to infinity.
pub fn parse_leading_float(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > frac_start || digits > 0 {
            digits += frac_end - frac_start;
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }

    // Exponent only counts when at least one digit follows it.
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Nearest table entry by absolute distance; first entry wins ties.
fn nearest(table: &[(f64, &'static str)], value: f64) -> Option<&'static str> {
    let (first, rest) = table.split_first()?;
    let best = rest.iter().fold(first, |prev, curr| {
        if (curr.0 - value).abs() < (prev.0 - value).abs() {
            curr
        } else {
            prev
        }
    });
    Some(best.1)
}

/// Map a px length onto the spacing scale.
pub fn map_spacing(raw: &str) -> Option<&'static str> {
    let value = parse_leading_float(raw)?;
    nearest(SPACING_SCALE, value)
}

/// Map a px font size onto the type scale.
pub fn map_font_size(raw: &str) -> Option<&'static str> {
    let value = parse_leading_float(raw)?;
    nearest(FONT_SIZE_SCALE, value)
}

/// Map a border radius onto the radius scale.
///
/// Zero and unparsable radii have no mapping. `50%` and anything from
/// 100px up are `full`.
pub fn map_radius(raw: &str) -> Option<&'static str> {
    let value = parse_leading_float(raw)?;
    if value == 0.0 {
        return None;
    }
    if value >= FULL_RADIUS_THRESHOLD || raw == "50%" {
        return Some("full");
    }
    nearest(RADIUS_SCALE, value)
}

/// Map a font-weight keyword (`100`..`900`, `normal`, `bold`).
pub fn map_font_weight(raw: &str) -> Option<&'static str> {
    FONT_WEIGHTS
        .iter()
        .find(|(key, _)| *key == raw)
        .map(|(_, label)| *label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_float_parsing() {
        assert_eq!(parse_leading_float("15px"), Some(15.0));
        assert_eq!(parse_leading_float("  1.5rem"), Some(1.5));
        assert_eq!(parse_leading_float("-8px"), Some(-8.0));
        assert_eq!(parse_leading_float(".5px"), Some(0.5));
        assert_eq!(parse_leading_float("50%"), Some(50.0));
        assert_eq!(parse_leading_float("1e2px"), Some(100.0));
        assert_eq!(parse_leading_float("3em"), Some(3.0));
        assert_eq!(parse_leading_float("auto"), None);
        assert_eq!(parse_leading_float(""), None);
        assert_eq!(parse_leading_float("-"), None);
        assert_eq!(parse_leading_float("."), None);
        assert_eq!(parse_leading_float("1e400px"), None);
        assert_eq!(parse_leading_float("-1e400px"), None);
    }

    #[test]
    fn spacing_nearest_neighbour() {
        assert_eq!(map_spacing("15.5px"), Some("4"));
        assert_eq!(map_spacing("16px"), Some("4"));
        assert_eq!(map_spacing("17px"), Some("4"));
        assert_eq!(map_spacing("1px"), Some("px"));
        assert_eq!(map_spacing("1000px"), Some("96"));
        assert_eq!(map_spacing("-12px"), Some("0"));
        assert_eq!(map_spacing("normal"), None);
    }

    #[test]
    fn spacing_ties_resolve_to_smaller_breakpoint() {
        // Midpoint between 8 (`2`) and 10 (`2.5`).
        assert_eq!(map_spacing("9px"), Some("2"));
        // Midpoint between 14 (`3.5`) and 16 (`4`).
        assert_eq!(map_spacing("15px"), Some("3.5"));
        // Midpoint between 16 (`4`) and 20 (`5`).
        assert_eq!(map_spacing("18px"), Some("4"));
        // Midpoint between 320 (`80`) and 384 (`96`).
        assert_eq!(map_spacing("352px"), Some("80"));
    }

    #[test]
    fn font_size_scale() {
        assert_eq!(map_font_size("16px"), Some("base"));
        assert_eq!(map_font_size("32px"), Some("3xl"));
        assert_eq!(map_font_size("33px"), Some("3xl"));
        assert_eq!(map_font_size("34px"), Some("4xl"));
        // 13 sits between xs and sm; the smaller breakpoint wins.
        assert_eq!(map_font_size("13px"), Some("xs"));
        assert_eq!(map_font_size("4px"), Some("xs"));
        assert_eq!(map_font_size("200px"), Some("9xl"));
        assert_eq!(map_font_size("large"), None);
    }

    #[test]
    fn radius_scale() {
        assert_eq!(map_radius("0px"), None);
        assert_eq!(map_radius("0"), None);
        assert_eq!(map_radius("junk"), None);
        assert_eq!(map_radius("4px"), Some(""));
        assert_eq!(map_radius("3px"), Some("sm"));
        assert_eq!(map_radius("7px"), Some("md"));
        assert_eq!(map_radius("10px"), Some("lg"));
        assert_eq!(map_radius("60px"), Some("3xl"));
        assert_eq!(map_radius("100px"), Some("full"));
        assert_eq!(map_radius("50%"), Some("full"));
        // Only the literal 50% takes the percentage shortcut.
        assert_eq!(map_radius("25%"), Some("3xl"));
    }

    #[test]
    fn font_weights() {
        assert_eq!(map_font_weight("700"), Some("bold"));
        assert_eq!(map_font_weight("bold"), Some("bold"));
        assert_eq!(map_font_weight("400"), Some("normal"));
        assert_eq!(map_font_weight("950"), None);
        assert_eq!(map_font_weight("bolder"), None);
    }
}
