//! Inline assets (SVG icons and images) inside a selected element.

use scraper::{Html, Selector};

const FILE_PREFIX: &str = "chardow-asset";
const DEFAULT_IMAGE_EXTENSION: &str = "png";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Asset {
    /// An inline `<svg>`; `markup` is its outer HTML.
    Svg { markup: String },
    /// An `<img>` with a non-empty `src` (as written, possibly relative).
    Image { src: String, alt: String },
}

impl Asset {
    pub fn kind_label(&self) -> &'static str {
        match self {
            Asset::Svg { .. } => "svg",
            Asset::Image { .. } => "img",
        }
    }

    /// File extension guessed from the source URL.
    pub fn extension(&self) -> String {
        match self {
            Asset::Svg { .. } => "svg".to_string(),
            Asset::Image { src, .. } => extension_from_src(src)
                .unwrap_or(DEFAULT_IMAGE_EXTENSION)
                .to_string(),
        }
    }

    /// Download name for the asset at `index` in the list:
    /// `chardow-asset-3.png`.
    pub fn file_name(&self, index: usize) -> String {
        format!("{FILE_PREFIX}-{}.{}", index + 1, self.extension())
    }

    /// Short human label for lists.
    pub fn display_name(&self) -> String {
        match self {
            Asset::Svg { .. } => "Inline SVG".to_string(),
            Asset::Image { src, alt } if !alt.is_empty() => format!("{alt} ({})", last_segment(src)),
            Asset::Image { src, .. } => last_segment(src).to_string(),
        }
    }
}

/// Extension after the last `.`, cut at `?`/`#`. Dots in the host name
/// (`https://cdn.example.com/img`) don't count.
fn extension_from_src(src: &str) -> Option<&str> {
    let (_, tail) = src.rsplit_once('.')?;
    let ext = tail.split(|c: char| c == '?' || c == '#').next().unwrap_or_default();
    (!ext.is_empty() && !ext.contains('/')).then_some(ext)
}

fn last_segment(src: &str) -> &str {
    let path = src.split(|c: char| c == '?' || c == '#').next().unwrap_or(src);
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or(src)
}

/// Every `<svg>` in document order, then every `<img>` with a `src`.
pub fn extract_assets(outer_html: &str) -> Vec<Asset> {
    let doc = Html::parse_document(outer_html);
    let mut assets = Vec::new();

    if let Ok(svg_sel) = Selector::parse("svg") {
        assets.extend(doc.select(&svg_sel).map(|svg| Asset::Svg { markup: svg.html() }));
    }

    if let Ok(img_sel) = Selector::parse("img") {
        for img in doc.select(&img_sel) {
            let src = img.value().attr("src").unwrap_or_default().trim();
            if src.is_empty() {
                continue;
            }
            assets.push(Asset::Image {
                src: src.to_string(),
                alt: img.value().attr("alt").unwrap_or_default().to_string(),
            });
        }
    }

    log::debug!("Found {} assets", assets.len());
    assets
}

#[cfg(test)]
mod tests {
    use super::*;

    const CARD: &str = r#"<div class="card">
        <img src="/img/hero.webp?v=3" alt="Hero">
        <svg viewBox="0 0 24 24"><path d="M0 0h24v24H0z"/></svg>
        <img src="">
        <span><svg width="8"><circle r="4"/></svg></span>
        <img src="https://cdn.example.com/avatar">
    </div>"#;

    #[test]
    fn svgs_first_then_images() {
        let assets = extract_assets(CARD);
        let kinds: Vec<&str> = assets.iter().map(Asset::kind_label).collect();
        assert_eq!(kinds, vec!["svg", "svg", "img", "img"]);

        match &assets[0] {
            Asset::Svg { markup } => {
                assert!(markup.starts_with("<svg"));
                assert!(markup.contains("<path"));
            }
            other => panic!("expected svg, got {other:?}"),
        }
        assert_eq!(
            assets[2],
            Asset::Image { src: "/img/hero.webp?v=3".into(), alt: "Hero".into() }
        );
    }

    #[test]
    fn file_names() {
        let assets = extract_assets(CARD);
        assert_eq!(assets[0].file_name(0), "chardow-asset-1.svg");
        assert_eq!(assets[2].file_name(2), "chardow-asset-3.webp");
        assert_eq!(assets[3].file_name(3), "chardow-asset-4.png");

        let gif = Asset::Image { src: "a.b/c.gif#frag".into(), alt: String::new() };
        assert_eq!(gif.extension(), "gif");
    }

    #[test]
    fn display_names() {
        let assets = extract_assets(CARD);
        assert_eq!(assets[0].display_name(), "Inline SVG");
        assert_eq!(assets[2].display_name(), "Hero (hero.webp)");
        assert_eq!(assets[3].display_name(), "avatar");
    }

    #[test]
    fn no_assets() {
        assert!(extract_assets("<p>plain text</p>").is_empty());
    }
}
