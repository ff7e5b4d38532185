//! Headless styled document.
//!
//! Parses HTML with `scraper`, runs a simplified cascade once per element
//! (initial values, inheritance, user-agent defaults, `<style>` rules in
//! source order, then the inline `style` attribute) and exposes the result
//! through [`StyledElement`], so extraction works the same way it would
//! against a live page.
//!
//! Selector specificity is not modelled: later rules win.

use std::collections::HashMap;

use scraper::{ElementRef, Html, Node, Selector};

use crate::dom::css::{
    expand_shorthand, format_color, format_px, parse_css_color, parse_declarations, parse_length,
    parse_stylesheet, CORNERS, SIDES,
};
use crate::dom::{ChildNode, StyledElement};

const ROOT_FONT_SIZE: f64 = 16.0;

/// Values every element starts from before anything is declared.
const INITIAL_VALUES: &[(&str, &str)] = &[
    ("display", "inline"),
    ("position", "static"),
    ("top", "auto"),
    ("right", "auto"),
    ("bottom", "auto"),
    ("left", "auto"),
    ("z-index", "auto"),
    ("flex-direction", "row"),
    ("flex-wrap", "nowrap"),
    ("justify-content", "normal"),
    ("align-items", "normal"),
    ("gap", "normal"),
    ("flex-grow", "0"),
    ("flex-shrink", "1"),
    ("flex-basis", "auto"),
    ("padding-top", "0px"),
    ("padding-right", "0px"),
    ("padding-bottom", "0px"),
    ("padding-left", "0px"),
    ("margin-top", "0px"),
    ("margin-right", "0px"),
    ("margin-bottom", "0px"),
    ("margin-left", "0px"),
    ("width", "auto"),
    ("height", "auto"),
    ("min-width", "auto"),
    ("min-height", "auto"),
    ("max-width", "none"),
    ("max-height", "none"),
    ("color", "rgb(0, 0, 0)"),
    ("background-color", "rgba(0, 0, 0, 0)"),
    ("font-family", "serif"),
    ("font-size", "16px"),
    ("font-weight", "400"),
    ("font-style", "normal"),
    ("line-height", "normal"),
    ("letter-spacing", "normal"),
    ("text-align", "start"),
    ("text-decoration", "none"),
    ("text-transform", "none"),
    ("white-space", "normal"),
    ("visibility", "visible"),
    ("cursor", "auto"),
    ("border-top-width", "medium"),
    ("border-right-width", "medium"),
    ("border-bottom-width", "medium"),
    ("border-left-width", "medium"),
    ("border-top-style", "none"),
    ("border-right-style", "none"),
    ("border-bottom-style", "none"),
    ("border-left-style", "none"),
    ("border-top-color", "currentcolor"),
    ("border-right-color", "currentcolor"),
    ("border-bottom-color", "currentcolor"),
    ("border-left-color", "currentcolor"),
    ("border-top-left-radius", "0px"),
    ("border-top-right-radius", "0px"),
    ("border-bottom-right-radius", "0px"),
    ("border-bottom-left-radius", "0px"),
    ("box-shadow", "none"),
    ("opacity", "1"),
    ("overflow", "visible"),
    ("transform", "none"),
    ("transition", "all 0s ease 0s"),
];

/// Properties that take the parent's computed value unless declared.
const INHERITED: &[&str] = &[
    "color",
    "font-family",
    "font-size",
    "font-weight",
    "font-style",
    "line-height",
    "letter-spacing",
    "text-align",
    "text-transform",
    "white-space",
    "visibility",
    "cursor",
];

const COLOR_PROPERTIES: &[&str] = &[
    "color",
    "background-color",
    "border-top-color",
    "border-right-color",
    "border-bottom-color",
    "border-left-color",
];

const LENGTH_PROPERTIES: &[&str] = &[
    "width",
    "height",
    "min-width",
    "min-height",
    "max-width",
    "max-height",
    "gap",
    "row-gap",
    "column-gap",
    "top",
    "right",
    "bottom",
    "left",
    "letter-spacing",
    "flex-basis",
];

/// Built-in stylesheet: `(tags, declarations)`, applied before author rules.
const UA_RULES: &[(&[&str], &str)] = &[
    (
        &[
            "html", "body", "div", "p", "h1", "h2", "h3", "h4", "h5", "h6", "ul", "ol", "dl", "dt",
            "dd", "section", "article", "nav", "header", "footer", "main", "aside", "form",
            "figure", "figcaption", "blockquote", "pre", "hr", "address", "fieldset", "legend",
            "details", "summary",
        ],
        "display: block",
    ),
    (&["li"], "display: list-item"),
    (&["table"], "display: table"),
    (&["tr"], "display: table-row"),
    (&["td", "th"], "display: table-cell"),
    (&["thead"], "display: table-header-group"),
    (&["tbody"], "display: table-row-group"),
    (&["tfoot"], "display: table-footer-group"),
    (
        &["head", "script", "style", "title", "meta", "link", "base", "template", "noscript"],
        "display: none",
    ),
    (&["button", "input", "select", "textarea"], "display: inline-block"),
    (&["body"], "margin: 8px"),
    (&["p", "ul", "ol", "dl", "pre"], "margin-top: 1em; margin-bottom: 1em"),
    (&["blockquote", "figure"], "margin: 1em 40px"),
    (&["ul", "ol"], "padding-left: 40px"),
    (&["h1"], "font-size: 2em; margin-top: 0.67em; margin-bottom: 0.67em"),
    (&["h2"], "font-size: 1.5em; margin-top: 0.83em; margin-bottom: 0.83em"),
    (&["h3"], "font-size: 1.17em; margin-top: 1em; margin-bottom: 1em"),
    (&["h4"], "margin-top: 1.33em; margin-bottom: 1.33em"),
    (&["h5"], "font-size: 0.83em; margin-top: 1.67em; margin-bottom: 1.67em"),
    (&["h6"], "font-size: 0.67em; margin-top: 2.33em; margin-bottom: 2.33em"),
    (&["h1", "h2", "h3", "h4", "h5", "h6", "b", "strong", "th"], "font-weight: bold"),
    (&["a"], "color: rgb(0, 0, 238); text-decoration: underline"),
    (&["button"], "padding: 1px 6px; text-align: center"),
    (&["small"], "font-size: smaller"),
    (&["center"], "text-align: center"),
];

/// An author rule whose selector `scraper` understood.
struct CompiledRule {
    selector: Selector,
    declarations: Vec<(String, String)>,
}

#[derive(Debug)]
enum Slot {
    Element(usize),
    Text(String),
}

#[derive(Debug)]
struct StyledNode {
    tag: String,
    attributes: HashMap<String, String>,
    computed: HashMap<String, String>,
    parent: Option<usize>,
    children: Vec<Slot>,
}

/// A parsed page with computed styles for every element.
///
/// Elements are stored in document (pre-order) order; index 0 is `<html>`.
pub struct StyledDocument {
    html: Html,
    nodes: Vec<StyledNode>,
}

impl StyledDocument {
    pub fn parse(source: &str) -> Self {
        let html = Html::parse_document(source);
        let rules = collect_rules(&html);
        let mut nodes = Vec::new();
        build_node(html.root_element(), None, &rules, &mut nodes);
        log::debug!(
            "Styled document: {} elements, {} stylesheet rules",
            nodes.len(),
            rules.len()
        );
        Self { html, nodes }
    }

    /// The `<html>` element.
    pub fn root(&self) -> ScrapedElement<'_> {
        ScrapedElement { doc: self, index: 0 }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Contents of `<title>`, trimmed.
    pub fn title(&self) -> String {
        Selector::parse("title")
            .ok()
            .and_then(|sel| self.html.select(&sel).next())
            .map(|el| el.text().collect::<String>().trim().to_string())
            .unwrap_or_default()
    }

    /// Element at a document-order index.
    pub fn element(&self, index: usize) -> Option<ScrapedElement<'_>> {
        (index < self.nodes.len()).then_some(ScrapedElement { doc: self, index })
    }

    /// First element matching `selector`, in document order.
    pub fn select_first(&self, selector: &Selector) -> Option<ScrapedElement<'_>> {
        let found = self.html.select(selector).next()?;
        let index = self.index_of(found)?;
        self.element(index)
    }

    /// Every element matching `selector`, in document order.
    pub fn select_all(&self, selector: &Selector) -> Vec<ScrapedElement<'_>> {
        self.html
            .select(selector)
            .filter_map(|found| self.index_of(found))
            .filter_map(|index| self.element(index))
            .collect()
    }

    fn index_of(&self, target: ElementRef<'_>) -> Option<usize> {
        self.html
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .position(|el| el.id() == target.id())
    }

    fn element_ref(&self, index: usize) -> Option<ElementRef<'_>> {
        self.html
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .nth(index)
    }
}

impl std::fmt::Debug for StyledDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StyledDocument")
            .field("elements", &self.nodes.len())
            .finish()
    }
}

/// Handle to one element of a [`StyledDocument`].
#[derive(Debug, Clone, Copy)]
pub struct ScrapedElement<'a> {
    doc: &'a StyledDocument,
    index: usize,
}

impl<'a> ScrapedElement<'a> {
    fn node(&self) -> &'a StyledNode {
        &self.doc.nodes[self.index]
    }

    /// Document-order index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Lower-case tag name.
    pub fn tag(&self) -> &'a str {
        &self.node().tag
    }

    pub fn parent(&self) -> Option<ScrapedElement<'a>> {
        self.node().parent.map(|index| ScrapedElement { doc: self.doc, index })
    }

    pub fn element_children(&self) -> impl Iterator<Item = ScrapedElement<'a>> + 'a {
        let doc = self.doc;
        self.node().children.iter().filter_map(move |slot| match slot {
            Slot::Element(index) => Some(ScrapedElement { doc, index: *index }),
            Slot::Text(_) => None,
        })
    }

    pub fn first_element_child(&self) -> Option<ScrapedElement<'a>> {
        self.element_children().next()
    }

    /// Whitespace-split `class` attribute.
    pub fn classes(&self) -> Vec<String> {
        self.node()
            .attributes
            .get("class")
            .map(|c| c.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Whether this element, or any ancestor, carries `id`.
    pub fn is_within(&self, id: &str) -> bool {
        let mut current = Some(*self);
        while let Some(el) = current {
            if el.node().attributes.get("id").map(String::as_str) == Some(id) {
                return true;
            }
            current = el.parent();
        }
        false
    }

    pub fn outer_html(&self) -> String {
        self.doc
            .element_ref(self.index)
            .map(|el| el.html())
            .unwrap_or_default()
    }

    pub fn inner_html(&self) -> String {
        self.doc
            .element_ref(self.index)
            .map(|el| el.inner_html())
            .unwrap_or_default()
    }
}

impl StyledElement for ScrapedElement<'_> {
    fn tag_name(&self) -> String {
        self.node().tag.clone()
    }

    fn computed_style(&self, property: &str) -> Option<String> {
        self.node().computed.get(property).cloned()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.node().attributes.get(name).cloned()
    }

    fn child_nodes(&self) -> Vec<ChildNode<Self>> {
        self.node()
            .children
            .iter()
            .map(|slot| match slot {
                Slot::Element(index) => ChildNode::Element(ScrapedElement {
                    doc: self.doc,
                    index: *index,
                }),
                Slot::Text(text) => ChildNode::Text(text.clone()),
            })
            .collect()
    }
}

// ─── Cascade ───────────────────────────────────────────────

fn collect_rules(html: &Html) -> Vec<CompiledRule> {
    let Ok(style_sel) = Selector::parse("style") else {
        return Vec::new();
    };

    let mut rules = Vec::new();
    for style in html.select(&style_sel) {
        let css: String = style.text().collect();
        for rule in parse_stylesheet(&css) {
            match Selector::parse(&rule.selector) {
                Ok(selector) => rules.push(CompiledRule {
                    selector,
                    declarations: rule.declarations,
                }),
                Err(_) => log::trace!("Skipping unsupported selector: {}", rule.selector),
            }
        }
    }
    rules
}

fn build_node(
    el: ElementRef<'_>,
    parent: Option<usize>,
    rules: &[CompiledRule],
    nodes: &mut Vec<StyledNode>,
) -> usize {
    let tag = el.value().name.local.as_ref().to_ascii_lowercase();
    let attributes: HashMap<String, String> = el
        .value()
        .attrs()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    let specified = specified_values(&tag, el, rules, attributes.get("style"));
    let computed = compute(specified, parent.map(|p| &nodes[p].computed));

    let index = nodes.len();
    nodes.push(StyledNode {
        tag,
        attributes,
        computed,
        parent,
        children: Vec::new(),
    });

    let mut children = Vec::new();
    for child in el.children() {
        match child.value() {
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    children.push(Slot::Element(build_node(child_el, Some(index), rules, nodes)));
                }
            }
            Node::Text(t) => children.push(Slot::Text(t.text.to_string())),
            _ => {}
        }
    }
    nodes[index].children = children;

    index
}

/// Declared longhands for one element; later declarations win.
fn specified_values(
    tag: &str,
    el: ElementRef<'_>,
    rules: &[CompiledRule],
    inline: Option<&String>,
) -> HashMap<String, String> {
    let mut specified = HashMap::new();
    let mut declare = |declarations: &[(String, String)]| {
        for (prop, val) in declarations {
            for (longhand, value) in expand_shorthand(prop, val) {
                specified.insert(longhand, value);
            }
        }
    };

    for (tags, block) in UA_RULES {
        if tags.contains(&tag) {
            declare(&parse_declarations(block));
        }
    }
    for rule in rules.iter().filter(|r| r.selector.matches(&el)) {
        declare(&rule.declarations);
    }
    if let Some(style) = inline {
        declare(&parse_declarations(style));
    }

    specified
}

fn initial_value(prop: &str) -> Option<&'static str> {
    INITIAL_VALUES
        .iter()
        .find(|(name, _)| *name == prop)
        .map(|(_, value)| *value)
}

/// Resolve `inherit` / `initial` / `unset`; `None` for ordinary values.
fn global_keyword(
    prop: &str,
    value: &str,
    parent: Option<&HashMap<String, String>>,
) -> Option<String> {
    let from_parent = || parent.and_then(|p| p.get(prop)).cloned();
    let initial = || initial_value(prop).unwrap_or_default().to_string();
    match value.trim().to_ascii_lowercase().as_str() {
        "inherit" => Some(from_parent().unwrap_or_else(initial)),
        "initial" => Some(initial()),
        "unset" if INHERITED.contains(&prop) => Some(from_parent().unwrap_or_else(initial)),
        "unset" => Some(initial()),
        _ => None,
    }
}

fn compute(
    specified: HashMap<String, String>,
    parent: Option<&HashMap<String, String>>,
) -> HashMap<String, String> {
    let mut computed: HashMap<String, String> = INITIAL_VALUES
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    if let Some(parent) = parent {
        for prop in INHERITED {
            if let Some(value) = parent.get(*prop) {
                computed.insert(prop.to_string(), value.clone());
            }
        }
    }

    let parent_font = parent
        .and_then(|p| p.get("font-size"))
        .and_then(|v| parse_length(v, ROOT_FONT_SIZE))
        .unwrap_or(ROOT_FONT_SIZE);
    let parent_weight = parent
        .and_then(|p| p.get("font-weight"))
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(400);

    // font-size first: `em` on every other property is relative to it.
    if let Some(value) = specified.get("font-size") {
        let size = global_keyword("font-size", value, parent)
            .unwrap_or_else(|| resolve_font_size(value, parent_font));
        computed.insert("font-size".to_string(), size);
    }
    let font_size = computed
        .get("font-size")
        .and_then(|v| parse_length(v, ROOT_FONT_SIZE))
        .unwrap_or(ROOT_FONT_SIZE);

    for (prop, value) in &specified {
        if prop == "font-size" {
            continue;
        }
        let resolved = global_keyword(prop, value, parent)
            .unwrap_or_else(|| compute_value(prop, value, font_size, parent_weight));
        computed.insert(prop.clone(), resolved);
    }

    finalize_borders(&mut computed);
    computed
}

fn compute_value(prop: &str, value: &str, font_size: f64, parent_weight: u32) -> String {
    if COLOR_PROPERTIES.contains(&prop) {
        return match parse_css_color(value) {
            Some(color) => format_color(color),
            None => value.trim().to_ascii_lowercase(),
        };
    }

    match prop {
        "font-weight" => resolve_font_weight(value, parent_weight),
        "line-height" => {
            let v = value.trim();
            if v == "normal" || v.parse::<f64>().is_ok() {
                v.to_string()
            } else if let Some(pct) = v.strip_suffix('%').and_then(|p| p.parse::<f64>().ok()) {
                format_px(font_size * pct / 100.0)
            } else {
                parse_length(v, font_size)
                    .map(format_px)
                    .unwrap_or_else(|| v.to_string())
            }
        }
        p if p.starts_with("border-") && p.ends_with("-width") => border_width(value, font_size),
        p if p.starts_with("padding-")
            || p.starts_with("margin-")
            || p.ends_with("-radius")
            || LENGTH_PROPERTIES.contains(&p) =>
        {
            parse_length(value, font_size)
                .map(format_px)
                .unwrap_or_else(|| value.trim().to_string())
        }
        _ => value.trim().to_string(),
    }
}

fn resolve_font_size(value: &str, parent_font: f64) -> String {
    let v = value.trim().to_ascii_lowercase();
    let px = match v.as_str() {
        "xx-small" => Some(9.0),
        "x-small" => Some(10.0),
        "small" => Some(13.0),
        "medium" => Some(16.0),
        "large" => Some(18.0),
        "x-large" => Some(24.0),
        "xx-large" => Some(32.0),
        "smaller" => Some(parent_font / 1.2),
        "larger" => Some(parent_font * 1.2),
        _ => match v.strip_suffix('%').and_then(|p| p.parse::<f64>().ok()) {
            Some(pct) => Some(parent_font * pct / 100.0),
            None => parse_length(&v, parent_font),
        },
    };
    px.map(format_px).unwrap_or(v)
}

fn resolve_font_weight(value: &str, parent_weight: u32) -> String {
    let v = value.trim().to_ascii_lowercase();
    let weight = match v.as_str() {
        "normal" => 400,
        "bold" => 700,
        "bolder" => match parent_weight {
            w if w < 400 => 400,
            w if w < 600 => 700,
            _ => 900,
        },
        "lighter" => match parent_weight {
            w if w < 600 => 100,
            w if w < 800 => 400,
            _ => 700,
        },
        _ => return v,
    };
    weight.to_string()
}

fn border_width(value: &str, font_size: f64) -> String {
    let v = value.trim().to_ascii_lowercase();
    match v.as_str() {
        "thin" => "1px".to_string(),
        "medium" => "3px".to_string(),
        "thick" => "5px".to_string(),
        _ => parse_length(&v, font_size).map(format_px).unwrap_or(v),
    }
}

/// Side widths collapse to `0px` when the side has no style, border
/// colors resolve `currentcolor`, and the per-side values are folded into
/// `border-width` / `border-color` / `border-radius`.
fn finalize_borders(computed: &mut HashMap<String, String>) {
    let color = computed.get("color").cloned().unwrap_or_default();
    for prop in COLOR_PROPERTIES {
        if computed.get(*prop).map(String::as_str) == Some("currentcolor") {
            computed.insert(prop.to_string(), color.clone());
        }
    }

    for side in SIDES {
        let style = computed
            .get(&format!("border-{side}-style"))
            .cloned()
            .unwrap_or_default();
        let width_key = format!("border-{side}-width");
        let width = if style == "none" || style == "hidden" {
            "0px".to_string()
        } else {
            border_width(computed.get(&width_key).map(String::as_str).unwrap_or("0"), ROOT_FONT_SIZE)
        };
        computed.insert(width_key, width);
    }

    let collect = |keys: Vec<String>, computed: &HashMap<String, String>| -> String {
        let values: Vec<String> = keys
            .iter()
            .map(|k| computed.get(k).cloned().unwrap_or_default())
            .collect();
        collapse_edges(&values)
    };
    let widths = collect(SIDES.iter().map(|s| format!("border-{s}-width")).collect(), computed);
    let colors = collect(SIDES.iter().map(|s| format!("border-{s}-color")).collect(), computed);
    let radii = collect(CORNERS.iter().map(|c| format!("border-{c}-radius")).collect(), computed);
    computed.insert("border-width".to_string(), widths);
    computed.insert("border-color".to_string(), colors);
    computed.insert("border-radius".to_string(), radii);
}

/// One value when all edges agree, otherwise all four space-joined.
fn collapse_edges(values: &[String]) -> String {
    match values.first() {
        Some(first) if values.iter().all(|v| v == first) => first.clone(),
        _ => values.join(" "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::extract::extract;
    use crate::style::StyleProperty;
    use crate::translate::classes_for;

    fn first<'a>(doc: &'a StyledDocument, css: &str) -> ScrapedElement<'a> {
        let sel = Selector::parse(css).unwrap();
        doc.select_first(&sel).unwrap()
    }

    #[test]
    fn rules_then_inline_style() {
        let doc = StyledDocument::parse(
            r#"<html><head><style>
                .card { padding: 8px 16px; background: #3b82f6; border-radius: .5rem }
                .card { color: white }
            </style></head>
            <body><div class="card" style="padding-top: 4px">Hi</div></body></html>"#,
        );
        let card = first(&doc, ".card");
        assert_eq!(card.computed_style("padding-top").as_deref(), Some("4px"));
        assert_eq!(card.computed_style("padding-right").as_deref(), Some("16px"));
        assert_eq!(
            card.computed_style("background-color").as_deref(),
            Some("rgb(59, 130, 246)")
        );
        assert_eq!(card.computed_style("border-radius").as_deref(), Some("8px"));
        assert_eq!(card.computed_style("color").as_deref(), Some("rgb(255, 255, 255)"));
        assert_eq!(card.computed_style("display").as_deref(), Some("block"));
    }

    #[test]
    fn inherited_properties_flow_down() {
        let doc = StyledDocument::parse(
            r#"<body style="color: #111827; font-family: 'Inter', sans-serif">
                <div style="font-size: 2em; padding: 1em"><span>text</span></div>
            </body>"#,
        );
        let span = first(&doc, "span");
        assert_eq!(span.computed_style("color").as_deref(), Some("rgb(17, 24, 39)"));
        assert_eq!(span.computed_style("font-size").as_deref(), Some("32px"));
        assert_eq!(
            span.computed_style("font-family").as_deref(),
            Some("'Inter', sans-serif")
        );
        assert_eq!(span.computed_style("display").as_deref(), Some("inline"));
        // Not inherited.
        assert_eq!(span.computed_style("padding-top").as_deref(), Some("0px"));

        let div = first(&doc, "div");
        assert_eq!(div.computed_style("padding-left").as_deref(), Some("32px"));
    }

    #[test]
    fn user_agent_defaults() {
        let doc = StyledDocument::parse("<body><h1>Title</h1><p>copy</p><strong>b</strong></body>");
        let h1 = first(&doc, "h1");
        assert_eq!(h1.computed_style("font-size").as_deref(), Some("32px"));
        assert_eq!(h1.computed_style("font-weight").as_deref(), Some("700"));
        assert_eq!(h1.computed_style("margin-top").as_deref(), Some("21.44px"));

        let p = first(&doc, "p");
        assert_eq!(p.computed_style("margin-bottom").as_deref(), Some("16px"));
        let body = first(&doc, "body");
        assert_eq!(body.computed_style("margin-left").as_deref(), Some("8px"));
        let strong = first(&doc, "strong");
        assert_eq!(strong.computed_style("font-weight").as_deref(), Some("700"));
    }

    #[test]
    fn border_width_depends_on_style() {
        let doc = StyledDocument::parse(
            r#"<div id="a" style="border: 1px solid #e5e7eb"></div>
               <div id="b" style="border-width: 4px"></div>
               <div id="c" style="border-style: solid; border-left-width: 2px; color: red"></div>"#,
        );
        let a = first(&doc, "#a");
        assert_eq!(a.computed_style("border-width").as_deref(), Some("1px"));
        assert_eq!(a.computed_style("border-color").as_deref(), Some("rgb(229, 231, 235)"));

        let b = first(&doc, "#b");
        assert_eq!(b.computed_style("border-width").as_deref(), Some("0px"));

        let c = first(&doc, "#c");
        assert_eq!(c.computed_style("border-width").as_deref(), Some("3px 3px 3px 2px"));
        assert_eq!(c.computed_style("border-top-color").as_deref(), Some("rgb(255, 0, 0)"));
    }

    #[test]
    fn global_keywords() {
        let doc = StyledDocument::parse(
            r#"<div style="padding-top: 6px; color: blue">
                 <p style="padding-top: inherit; color: initial">x</p>
               </div>"#,
        );
        let p = first(&doc, "p");
        assert_eq!(p.computed_style("padding-top").as_deref(), Some("6px"));
        assert_eq!(p.computed_style("color").as_deref(), Some("rgb(0, 0, 0)"));
    }

    #[test]
    fn unsupported_selectors_are_ignored() {
        let doc = StyledDocument::parse(
            r#"<style>a:hover { color: red } .x::before { color: red } .x { color: green }</style>
               <a class="x">link</a>"#,
        );
        let a = first(&doc, "a");
        assert_eq!(a.computed_style("color").as_deref(), Some("rgb(0, 128, 0)"));
    }

    #[test]
    fn navigation_and_markup() {
        let doc = StyledDocument::parse(
            r#"<body><main id="app"><section class="hero big"><h2>Hi</h2><p>a</p></section></main></body>"#,
        );
        let section = first(&doc, "section");
        assert_eq!(section.tag(), "section");
        assert_eq!(section.classes(), vec!["hero", "big"]);
        assert_eq!(section.parent().map(|p| p.tag()), Some("main"));
        assert_eq!(section.first_element_child().map(|c| c.tag()), Some("h2"));
        assert_eq!(section.element_children().count(), 2);
        assert!(section.is_within("app"));
        assert!(!section.is_within("nope"));
        assert_eq!(section.inner_html(), "<h2>Hi</h2><p>a</p>");
        assert!(section.outer_html().starts_with("<section class=\"hero big\">"));
        assert_eq!(doc.root().tag(), "html");
        assert_eq!(doc.element(section.index()).map(|e| e.tag()), Some("section"));
    }

    #[test]
    fn extraction_and_translation_end_to_end() {
        let doc = StyledDocument::parse(
            r#"<body><div id="box" style="display: flex; gap: 16px; padding: 16px;
                 background-color: #3b82f6; border-radius: 8px; color: #fff">
                 <span>One</span> <span>Two</span></div></body>"#,
        );
        let node = extract(&first(&doc, "#box"));
        assert_eq!(node.styles.get(StyleProperty::Display), Some("flex"));
        assert!(!node.styles.contains(StyleProperty::MarginTop));
        assert_eq!(node.collect_text(), "One Two");

        let classes = classes_for(&node.styles, &node.tag);
        for expected in ["flex", "gap-4", "p-4", "bg-blue-500", "rounded-lg"] {
            assert!(classes.contains(&expected.to_string()), "missing {expected} in {classes:?}");
        }
    }
}
