//! Page loading and selection lifecycle for `PanelApp`.
//!
//! A selection runs as a [`SelectionSession`](chardow::engine::SelectionSession):
//! the page is fetched on a background thread (parsed documents are not
//! `Send`, so only the raw [`FetchResult`](chardow::net::fetch::FetchResult)
//! crosses the channel) and the reply is accepted only for the latest
//! session id.

use std::path::PathBuf;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use eframe::egui;

use chardow::dom::document::StyledDocument;
use chardow::engine::{ElementPath, LoadedPage, Selection};
use chardow::inspect::Asset;
use chardow::net::download::{save_all, save_asset};
use chardow::net::fetch::{load_source, resolve_url};

use super::{FetchReply, PanelApp};

impl PanelApp {
    /// Start a selection for the current source and selector. A page that
    /// is already loaded for the same source is reused without refetching.
    pub fn start_selection(&mut self, ctx: &egui::Context) {
        let Some(id) = self.session.start(Instant::now()) else {
            return;
        };
        self.error = None;
        self.status = None;
        self.pending_selector = self.selector_input.trim().to_string();

        let source = self.source_input.trim().to_string();
        if self.page.is_some() && self.loaded_source.as_deref() == Some(source.as_str()) {
            if self.session.complete(id) {
                self.finish_selection();
            }
            return;
        }

        let (tx, rx) = mpsc::channel();
        self.fetch_rx = Some(rx);

        let ctx = ctx.clone();
        std::thread::spawn(move || {
            let result = load_source(&source);
            let _ = tx.send(FetchReply {
                session: id,
                source,
                result,
            });
            ctx.request_repaint();
        });
    }

    /// Accept a finished page load if it belongs to the latest session.
    pub fn check_fetch(&mut self) {
        let Some(rx) = &self.fetch_rx else {
            return;
        };
        let reply = match rx.try_recv() {
            Ok(reply) => reply,
            Err(mpsc::TryRecvError::Empty) => return,
            Err(mpsc::TryRecvError::Disconnected) => {
                self.fetch_rx = None;
                return;
            }
        };
        self.fetch_rx = None;

        if !self.session.complete(reply.session) {
            return;
        }

        match reply.result {
            Ok(fetched) => {
                self.page = Some(LoadedPage::from_fetch(&fetched));
                self.loaded_source = Some(reply.source);
                self.finish_selection();
            }
            Err(e) => {
                self.page = None;
                self.loaded_source = None;
                self.selection = None;
                self.error = Some(format!("[fetch] {}", e));
            }
        }
    }

    /// Report a timeout for the in-flight session and keep the progress
    /// bar animating while one is running.
    pub fn poll_session(&mut self, ctx: &egui::Context) {
        let now = Instant::now();
        if let Some(id) = self.session.poll(now) {
            self.error = Some(format!(
                "Selection {} timed out after {}s",
                id,
                self.session.timeout().as_secs()
            ));
        }
        if self.session.is_selecting(now) {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }

    pub fn cancel_selection(&mut self) {
        self.session.cancel();
        self.fetch_rx = None;
        self.status = Some("Selection cancelled".to_string());
    }

    fn finish_selection(&mut self) {
        let Some(page) = &self.page else {
            return;
        };
        match self.inspector.select(page, &self.pending_selector) {
            Ok(selection) => self.set_selection(selection),
            Err(e) => {
                self.selection = None;
                self.error = Some(e.to_string());
            }
        }
    }

    fn set_selection(&mut self, selection: Selection) {
        self.previews.clear();
        self.preview_textures.clear();
        for asset in selection.assets() {
            if let Asset::Image { src, .. } = asset {
                self.previews.request(&resolve_url(&selection.page_url, &src));
            }
        }
        self.status = Some(format!("Picked <{}> at {}", selection.tag_name, selection.path));
        self.error = None;
        self.selection = Some(selection);
    }

    // ─── ↑ / ↓ traversal ────────────────────────────────────────────────────

    pub fn can_go_up(&self) -> bool {
        self.neighbour(ElementPath::parent).is_some()
    }

    pub fn can_go_down(&self) -> bool {
        self.neighbour(ElementPath::first_child).is_some()
    }

    /// Select the parent of the current element.
    pub fn go_up(&mut self) {
        if let Some(path) = self.neighbour(ElementPath::parent) {
            self.select_path(&path);
        }
    }

    /// Select the first element child of the current element.
    pub fn go_down(&mut self) {
        if let Some(path) = self.neighbour(ElementPath::first_child) {
            self.select_path(&path);
        }
    }

    fn neighbour(
        &self,
        step: fn(&ElementPath, &StyledDocument) -> Option<ElementPath>,
    ) -> Option<ElementPath> {
        let page = self.page.as_ref()?;
        let selection = self.selection.as_ref()?;
        step(&selection.path, &page.document)
    }

    fn select_path(&mut self, path: &ElementPath) {
        let Some(page) = &self.page else {
            return;
        };
        match self.inspector.select_path(page, path) {
            Ok(selection) => self.set_selection(selection),
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    // ─── Asset saving ───────────────────────────────────────────────────────

    /// Save one asset (by list position) or, with `None`, all of them, on a
    /// background thread.
    pub fn save_assets(&mut self, only: Option<usize>, ctx: &egui::Context) {
        let Some(selection) = &self.selection else {
            return;
        };
        let assets = selection.assets();
        let base_url = selection.page_url.clone();
        let dir = PathBuf::from(self.save_dir.trim());

        let (tx, rx) = mpsc::channel();
        self.save_rx = Some(rx);
        self.status = Some("Saving…".to_string());

        let ctx = ctx.clone();
        std::thread::spawn(move || {
            let results = match only {
                Some(index) => match assets.get(index) {
                    Some(asset) => vec![save_asset(asset, index, &base_url, &dir)],
                    None => Vec::new(),
                },
                None => save_all(&assets, &base_url, &dir),
            };
            let saved = results.iter().filter(|r| r.is_ok()).count();
            let mut message = format!("Saved {} of {} to {}", saved, results.len(), dir.display());
            if let Some(Err(e)) = results.iter().find(|r| r.is_err()) {
                message.push_str(&format!(" ({})", e));
            }
            let _ = tx.send(message);
            ctx.request_repaint();
        });
    }

    pub fn check_saves(&mut self) {
        if let Some(rx) = &self.save_rx {
            if let Ok(message) = rx.try_recv() {
                self.status = Some(message);
                self.save_rx = None;
            }
        }
    }
}

