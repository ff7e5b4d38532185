//! `PanelApp`: the egui inspector panel.
//!
//! State lives here; behaviour is split across the sibling modules:
//!
//! - `navigation`: page loading, selection sessions, ↑/↓ traversal
//! - `toolbar`: source and selector inputs
//! - `content`: the Code / Logic / Assets / Type tabs

pub mod content;
pub mod navigation;
pub mod toolbar;

use std::collections::HashMap;
use std::sync::mpsc;

use eframe::egui;

use chardow::codegen::MarkupFlavor;
use chardow::engine::{Inspector, LoadedPage, Selection, SelectionSession, SessionId};
use chardow::net::fetch::{FetchError, FetchResult};
use chardow::net::image::PreviewLoader;

/// Result of a background page load, tagged with the session that asked
/// for it.
pub struct FetchReply {
    pub session: SessionId,
    pub source: String,
    pub result: Result<FetchResult, FetchError>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Code,
    Logic,
    Assets,
    Type,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Code, Tab::Logic, Tab::Assets, Tab::Type];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Code => "Code",
            Tab::Logic => "Logic",
            Tab::Assets => "Assets",
            Tab::Type => "Type",
        }
    }
}

// ─── Application state ───────────────────────────────────────────────────────

pub struct PanelApp {
    pub source_input: String,
    pub selector_input: String,
    pub component_name: String,
    pub inspector: Inspector,
    /// Page parsed for `loaded_source`; reused while the source is unchanged.
    pub page: Option<LoadedPage>,
    pub loaded_source: Option<String>,
    pub selection: Option<Selection>,
    pub error: Option<String>,
    pub status: Option<String>,
    pub session: SelectionSession,
    pub fetch_rx: Option<mpsc::Receiver<FetchReply>>,
    /// Selector captured when the in-flight session started.
    pub pending_selector: String,
    pub tab: Tab,
    pub flavor: MarkupFlavor,
    pub dark_mode: bool,
    pub save_dir: String,
    pub save_rx: Option<mpsc::Receiver<String>>,
    pub previews: PreviewLoader,
    pub preview_textures: HashMap<String, egui::TextureHandle>,
}

impl Default for PanelApp {
    fn default() -> Self {
        Self {
            source_input: String::from("https://example.com"),
            selector_input: String::from("body > *"),
            component_name: String::from("Component"),
            inspector: Inspector::new(),
            page: None,
            loaded_source: None,
            selection: None,
            error: None,
            status: None,
            session: SelectionSession::new(),
            fetch_rx: None,
            pending_selector: String::new(),
            tab: Tab::default(),
            flavor: MarkupFlavor::default(),
            dark_mode: true,
            save_dir: String::from("chardow-assets"),
            save_rx: None,
            previews: PreviewLoader::new(),
            preview_textures: HashMap::new(),
        }
    }
}

impl eframe::App for PanelApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_fetch();
        self.check_saves();
        self.poll_session(ctx);

        if self.dark_mode {
            ctx.set_visuals(egui::Visuals::dark());
        } else {
            ctx.set_visuals(egui::Visuals::light());
        }

        if self.previews.poll() {
            ctx.request_repaint();
        }
        if self.previews.pending_count() > 0 {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            self.draw_toolbar(ui, ctx);
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            self.draw_status(ui);
        });

        let ctx_clone = ctx.clone();
        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_content(ui, &ctx_clone);
        });
    }
}
