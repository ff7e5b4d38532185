//! Central panel for `PanelApp`: the selection header and its four tabs.
//!
//! - `draw_content`: dispatcher (empty state, error, header, tab strip)
//! - `draw_code_tab`: JSX / HTML output and the utility-class palette
//! - Logic: inferred state and handlers as a plain code block
//! - `draw_assets_tab`: svg/img list with thumbnails and save buttons
//! - `draw_type_tab`: typography table

use eframe::egui;

use chardow::codegen::MarkupFlavor;
use chardow::engine::Selection;
use chardow::inspect::Asset;
use chardow::net::fetch::resolve_url;

use super::{PanelApp, Tab};
use crate::ui::{class_chip, code_block, color_swatch, truncate_str};

impl PanelApp {
    /// Render the central content panel.
    pub fn draw_content(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        if let Some(ref error) = self.error {
            ui.colored_label(egui::Color32::from_rgb(255, 80, 80), error);
            ui.separator();
        }

        let Some(selection) = self.selection.clone() else {
            if self.session.is_selecting(std::time::Instant::now()) {
                ui.centered_and_justified(|ui| {
                    ui.spinner();
                });
            } else {
                ui.centered_and_justified(|ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(100.0);
                        ui.heading("chardow");
                        ui.label("Point at an element, get JSX + Tailwind back");
                        ui.add_space(20.0);
                        ui.label("Enter a URL or file and a CSS selector, then press Select");
                    });
                });
            }
            return;
        };

        self.draw_header(ui, &selection);
        ui.separator();

        ui.horizontal(|ui| {
            for tab in Tab::ALL {
                ui.selectable_value(&mut self.tab, tab, tab.label());
            }
        });
        ui.separator();

        match self.tab {
            Tab::Code => self.draw_code_tab(ui, &selection),
            Tab::Logic => code_block(ui, "logic", &selection.logic()),
            Tab::Assets => self.draw_assets_tab(ui, ctx, &selection),
            Tab::Type => draw_type_tab(ui, &selection),
        }
    }

    fn draw_header(&self, ui: &mut egui::Ui, selection: &Selection) {
        ui.horizontal(|ui| {
            ui.heading(format!("<{}>", selection.tag_name));
            ui.monospace(selection.path.to_string());
        });
        if !selection.classes.is_empty() {
            let own = format!(".{}", selection.classes.join("."));
            ui.weak(truncate_str(&own, 120));
        }
        if let Some(ref page) = self.page {
            let title = page.document.title();
            if title.is_empty() {
                ui.weak(&page.url);
            } else {
                ui.weak(format!("{} · {}", truncate_str(&title, 60), page.url));
            }
        }
    }

    // ── Code ─────────────────────────────────────────────────────────────────

    fn draw_code_tab(&mut self, ui: &mut egui::Ui, selection: &Selection) {
        ui.horizontal(|ui| {
            ui.selectable_value(&mut self.flavor, MarkupFlavor::Jsx, "React + Tailwind");
            ui.selectable_value(&mut self.flavor, MarkupFlavor::Html, "HTML");
            if self.flavor == MarkupFlavor::Jsx {
                ui.separator();
                ui.label("Component");
                ui.add_sized(
                    [140.0, 20.0],
                    egui::TextEdit::singleline(&mut self.component_name),
                );
            }
        });

        let classes = selection.utility_classes();
        ui.add_space(4.0);
        ui.label(format!("Classes ({})", classes.len()));
        ui.horizontal_wrapped(|ui| {
            if classes.is_empty() {
                ui.weak("No utility classes for this element");
            }
            for class in &classes {
                class_chip(ui, class);
            }
        });
        ui.add_space(4.0);

        let code = match self.flavor {
            MarkupFlavor::Jsx => {
                let name = self.component_name.trim();
                selection.component(if name.is_empty() {
                    self.inspector.component_name()
                } else {
                    name
                })
            }
            MarkupFlavor::Html => selection.markup(MarkupFlavor::Html),
        };
        code_block(ui, "code", &code);
    }

    // ── Assets ───────────────────────────────────────────────────────────────

    fn draw_assets_tab(&mut self, ui: &mut egui::Ui, ctx: &egui::Context, selection: &Selection) {
        let assets = selection.assets();
        if assets.is_empty() {
            ui.weak("No SVG or image assets inside this element");
            return;
        }

        ui.horizontal(|ui| {
            ui.label("Save to");
            ui.add_sized([220.0, 20.0], egui::TextEdit::singleline(&mut self.save_dir));
            if ui
                .add_enabled(self.save_rx.is_none(), egui::Button::new("Save all"))
                .clicked()
            {
                self.save_assets(None, ctx);
            }
        });
        ui.separator();

        let mut save_one = None;
        egui::ScrollArea::vertical().id_salt("assets").show(ui, |ui| {
            for (index, asset) in assets.iter().enumerate() {
                ui.horizontal(|ui| {
                    self.draw_thumbnail(ui, ctx, selection, asset);
                    ui.vertical(|ui| {
                        ui.label(truncate_str(&asset.display_name(), 80));
                        ui.weak(format!("{} · {}", asset.kind_label(), asset.file_name(index)));
                    });
                    if ui
                        .add_enabled(self.save_rx.is_none(), egui::Button::new("Save"))
                        .clicked()
                    {
                        save_one = Some(index);
                    }
                });
                ui.separator();
            }
        });

        if let Some(index) = save_one {
            self.save_assets(Some(index), ctx);
        }
    }

    fn draw_thumbnail(
        &mut self,
        ui: &mut egui::Ui,
        ctx: &egui::Context,
        selection: &Selection,
        asset: &Asset,
    ) {
        let size = egui::vec2(48.0, 48.0);
        let src = match asset {
            Asset::Svg { .. } => {
                ui.add_sized(size, egui::Label::new(egui::RichText::new("SVG").monospace()));
                return;
            }
            Asset::Image { src, .. } => src,
        };
        let url = resolve_url(&selection.page_url, src);

        if !self.preview_textures.contains_key(&url) {
            if let Some(preview) = self.previews.get(&url) {
                let image = egui::ColorImage::from_rgba_unmultiplied(
                    [preview.width as usize, preview.height as usize],
                    &preview.rgba,
                );
                let texture =
                    ctx.load_texture(format!("asset_{}", url), image, egui::TextureOptions::LINEAR);
                self.preview_textures.insert(url.clone(), texture);
            }
        }

        if let Some(texture) = self.preview_textures.get(&url) {
            ui.add(egui::Image::new(texture).max_size(size));
        } else if self.previews.has_failed(&url) {
            ui.add_sized(size, egui::Label::new("[Image]"));
        } else {
            ui.add_sized(size, egui::Spinner::new());
        }
    }
}

// ── Type ─────────────────────────────────────────────────────────────────────

fn draw_type_tab(ui: &mut egui::Ui, selection: &Selection) {
    let typography = selection.typography();

    egui::Grid::new("typography")
        .num_columns(2)
        .spacing([24.0, 6.0])
        .striped(true)
        .show(ui, |ui| {
            for (label, value) in typography.rows() {
                ui.strong(label);
                ui.horizontal(|ui| {
                    if label == "Color" && typography.has_color() {
                        color_swatch(ui, value);
                    }
                    ui.monospace(value);
                });
                ui.end_row();
            }
        });

    ui.add_space(8.0);
    ui.weak(truncate_str(&typography.family, 160));
}
