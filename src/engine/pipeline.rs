use scraper::Selector;

use crate::codegen::{component_for, logic_for, render_markup, MarkupFlavor};
use crate::dom::document::{ScrapedElement, StyledDocument};
use crate::dom::extract::TreeExtractor;
use crate::dom::SnapshotNode;
use crate::inspect::{extract_assets, typography_for, Asset, Typography};
use crate::net::fetch::{load_source, FetchResult};
use crate::style::StyleMap;
use crate::translate::classes_for;

/// Tags the path navigation never climbs onto.
const ROOT_TAGS: &[&str] = &["html", "body"];

const DEFAULT_COMPONENT_NAME: &str = "Component";

/// Error while loading a page or picking an element.
#[derive(Debug, Clone)]
pub struct InspectError {
    pub message: String,
    /// `"fetch"`, `"select"` or `"pick"`.
    pub phase: &'static str,
}

impl std::fmt::Display for InspectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.phase, self.message)
    }
}

impl std::error::Error for InspectError {}

/// A parsed page ready for picking.
pub struct LoadedPage {
    pub url: String,
    pub document: StyledDocument,
}

impl LoadedPage {
    pub fn new(url: impl Into<String>, html: &str) -> Self {
        Self {
            url: url.into(),
            document: StyledDocument::parse(html),
        }
    }

    pub fn from_fetch(result: &FetchResult) -> Self {
        Self::new(result.url.clone(), &result.html)
    }
}

/// Position of an element as child indices from `<html>`: `[1, 0]` is
/// the first element child of `<body>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ElementPath(Vec<usize>);

impl ElementPath {
    pub fn of(element: ScrapedElement<'_>) -> Self {
        let mut steps = Vec::new();
        let mut current = element;
        while let Some(parent) = current.parent() {
            let position = parent
                .element_children()
                .position(|child| child.index() == current.index())
                .unwrap_or(0);
            steps.push(position);
            current = parent;
        }
        steps.reverse();
        Self(steps)
    }

    pub fn steps(&self) -> &[usize] {
        &self.0
    }

    pub fn resolve<'a>(&self, doc: &'a StyledDocument) -> Option<ScrapedElement<'a>> {
        let mut current = doc.root();
        for &step in &self.0 {
            current = current.element_children().nth(step)?;
        }
        Some(current)
    }

    /// One level up, unless that would land on `<html>` or `<body>`.
    pub fn parent(&self, doc: &StyledDocument) -> Option<ElementPath> {
        let (_, rest) = self.0.split_last()?;
        let parent = ElementPath(rest.to_vec());
        let tag = parent.resolve(doc)?.tag();
        (!ROOT_TAGS.contains(&tag)).then_some(parent)
    }

    /// First element child, if any.
    pub fn first_child(&self, doc: &StyledDocument) -> Option<ElementPath> {
        self.resolve(doc)?.first_element_child()?;
        let mut steps = self.0.clone();
        steps.push(0);
        Some(ElementPath(steps))
    }
}

impl std::fmt::Display for ElementPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let steps: Vec<String> = self.0.iter().map(|s| s.to_string()).collect();
        write!(f, "/{}", steps.join("/"))
    }
}

/// Everything captured when an element is picked.
#[derive(Debug, Clone)]
pub struct Selection {
    pub tag_name: String,
    /// The element's own `class` attribute, split.
    pub classes: Vec<String>,
    pub styles: StyleMap,
    pub inner_html: String,
    pub outer_html: String,
    pub node: SnapshotNode,
    pub path: ElementPath,
    pub page_url: String,
}

impl Selection {
    /// Utility classes for the picked element itself.
    pub fn utility_classes(&self) -> Vec<String> {
        classes_for(&self.styles, &self.tag_name)
    }

    pub fn markup(&self, flavor: MarkupFlavor) -> String {
        render_markup(&self.node, 0, flavor)
    }

    pub fn component(&self, name: &str) -> String {
        component_for(&self.node, name)
    }

    pub fn logic(&self) -> String {
        logic_for(&self.node)
    }

    pub fn typography(&self) -> Typography {
        typography_for(&self.styles)
    }

    pub fn assets(&self) -> Vec<Asset> {
        extract_assets(&self.outer_html)
    }
}

/// Load → parse → pick → extract.
pub struct Inspector {
    extractor: TreeExtractor,
    component_name: String,
}

impl Inspector {
    pub fn new() -> Self {
        Self {
            extractor: TreeExtractor::new(),
            component_name: DEFAULT_COMPONENT_NAME.to_string(),
        }
    }

    pub fn with_extractor(mut self, extractor: TreeExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn with_component_name(mut self, name: impl Into<String>) -> Self {
        self.component_name = name.into();
        self
    }

    pub fn extractor(&self) -> &TreeExtractor {
        &self.extractor
    }

    pub fn component_name(&self) -> &str {
        &self.component_name
    }

    /// Fetch a URL (bare hosts get `https://`) or read a local file, then
    /// parse it.
    pub fn load(&self, source: &str) -> Result<LoadedPage, InspectError> {
        let result = load_source(source).map_err(|e| InspectError {
            message: e.message,
            phase: "fetch",
        })?;
        let page = LoadedPage::from_fetch(&result);
        log::info!(
            "Loaded {} ({} elements, title {:?})",
            page.url,
            page.document.len(),
            page.document.title()
        );
        Ok(page)
    }

    /// Pick the first pickable element matching a CSS selector.
    pub fn select(&self, page: &LoadedPage, selector: &str) -> Result<Selection, InspectError> {
        let parsed = Selector::parse(selector).map_err(|e| InspectError {
            message: format!("Invalid selector '{}': {:?}", selector, e),
            phase: "select",
        })?;

        let matches = page.document.select_all(&parsed);
        if matches.is_empty() {
            return Err(InspectError {
                message: format!("No element matches '{}'", selector),
                phase: "select",
            });
        }

        let element = matches
            .into_iter()
            .find(|el| !el.is_within(self.extractor.exclusion_id()))
            .ok_or_else(|| InspectError {
                message: format!(
                    "Every match for '{}' is inside #{}",
                    selector,
                    self.extractor.exclusion_id()
                ),
                phase: "pick",
            })?;
        self.pick(page, element)
    }

    /// Pick the element at `path`.
    pub fn select_path(&self, page: &LoadedPage, path: &ElementPath) -> Result<Selection, InspectError> {
        let element = path.resolve(&page.document).ok_or_else(|| InspectError {
            message: format!("No element at {}", path),
            phase: "pick",
        })?;
        if element.is_within(self.extractor.exclusion_id()) {
            return Err(InspectError {
                message: format!("{} is inside #{}", path, self.extractor.exclusion_id()),
                phase: "pick",
            });
        }
        self.pick(page, element)
    }

    fn pick(&self, page: &LoadedPage, element: ScrapedElement<'_>) -> Result<Selection, InspectError> {
        let node = self.extractor.extract(&element);
        let path = ElementPath::of(element);
        log::info!("Picked <{}> at {}", element.tag(), path);

        Ok(Selection {
            tag_name: element.tag().to_string(),
            classes: element.classes(),
            styles: node.styles.clone(),
            inner_html: element.inner_html(),
            outer_html: element.outer_html(),
            node,
            path,
            page_url: page.url.clone(),
        })
    }

    /// JSX component for a selection, using the configured name.
    pub fn component(&self, selection: &Selection) -> String {
        selection.component(&self.component_name)
    }
}

impl Default for Inspector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::OVERLAY_HOST_ID;

    const PAGE: &str = r#"<!doctype html>
        <html><head><title>Demo</title>
        <style>
            .card { display: flex; gap: 16px; padding: 16px; background-color: #ffffff;
                    border: 1px solid #e5e7eb; border-radius: 8px }
            .cta { padding: 8px 16px; background: #3b82f6; color: #fff; border-radius: 6px }
        </style></head>
        <body>
          <main>
            <div class="card">
              <img src="/logo.png" alt="Logo">
              <div><h3>Pro plan</h3><p>Everything you need.</p></div>
              <button class="cta">Subscribe</button>
            </div>
          </main>
          <div id="chardow-overlay-host"><div class="card">overlay</div></div>
        </body></html>"#;

    fn page() -> LoadedPage {
        LoadedPage::new("https://example.com/pricing", PAGE)
    }

    #[test]
    fn select_builds_full_selection() {
        let inspector = Inspector::new();
        let page = page();
        let sel = inspector.select(&page, ".card").unwrap();

        assert_eq!(sel.tag_name, "div");
        assert_eq!(sel.classes, vec!["card"]);
        assert_eq!(sel.page_url, "https://example.com/pricing");
        assert!(sel.outer_html.starts_with("<div class=\"card\">"));
        assert!(!sel.node.collect_text().contains("overlay"));

        let classes = sel.utility_classes();
        assert_eq!(
            classes,
            vec![
                "flex",
                "gap-4",
                "p-4",
                "text-black",
                "bg-white",
                "rounded-lg",
                "border",
                "border-gray-200"
            ]
        );

        let logic = sel.logic();
        assert!(logic.contains("handleSubscribeClick"));
        assert_eq!(sel.assets().len(), 1);
        assert_eq!(sel.typography().weight, "400");
    }

    #[test]
    fn generated_component() {
        let page = page();
        let inspector = Inspector::new().with_component_name("PricingCard");
        let sel = inspector.select(&page, "button.cta").unwrap();
        let code = inspector.component(&sel);
        assert!(code.starts_with("export function PricingCard() {\n  return (\n"));
        assert_eq!(
            code,
            "export function PricingCard() {\n  return (\n    \
             <button className=\"inline-block pt-2 pr-4 pb-2 pl-4 text-center bg-blue-500 rounded-md\">\n      \
             Subscribe\n    </button>\n  )\n}"
        );
    }

    #[test]
    fn selector_errors() {
        let page = page();
        let inspector = Inspector::new();

        let err = inspector.select(&page, "div[").unwrap_err();
        assert_eq!(err.phase, "select");
        let err = inspector.select(&page, "table").unwrap_err();
        assert_eq!(err.phase, "select");
        assert!(err.to_string().starts_with("[select] No element matches"));
    }

    #[test]
    fn overlay_cannot_be_picked() {
        let page = page();
        let inspector = Inspector::new();
        let err = inspector.select(&page, &format!("#{}", OVERLAY_HOST_ID)).unwrap_err();
        assert_eq!(err.phase, "pick");

        let overlay = page
            .document
            .select_first(&Selector::parse("#chardow-overlay-host").unwrap())
            .unwrap();
        let err = inspector.select_path(&page, &ElementPath::of(overlay)).unwrap_err();
        assert_eq!(err.phase, "pick");
    }

    #[test]
    fn path_navigation() {
        let page = page();
        let inspector = Inspector::new();
        let doc = &page.document;

        let h3 = inspector.select(&page, "h3").unwrap();
        let wrapper = h3.path.parent(doc).unwrap();
        assert_eq!(wrapper.resolve(doc).unwrap().first_element_child().unwrap().tag(), "h3");

        let card = wrapper.parent(doc).unwrap();
        assert_eq!(inspector.select_path(&page, &card).unwrap().classes, vec!["card"]);

        let main = card.parent(doc).unwrap();
        assert_eq!(main.resolve(doc).unwrap().tag(), "main");
        // <body> is off limits.
        assert_eq!(main.parent(doc), None);

        let down = main.first_child(doc).unwrap();
        assert_eq!(down, card);
        assert_eq!(h3.path.first_child(doc), None);
        assert_eq!(ElementPath::of(doc.root()).to_string(), "/");
    }
}
