//! Small stateless egui helpers shared by the panel tabs.

use eframe::egui;

use chardow::dom::css::parse_css_color;

// ─── Widgets ──────────────────────────────────────────────────────────────────

/// Read-only monospace block with a Copy button above it.
pub fn code_block(ui: &mut egui::Ui, id: &str, text: &str) {
    ui.horizontal(|ui| {
        if ui.button("Copy").clicked() {
            ui.ctx().copy_text(text.to_string());
        }
        ui.weak(format!("{} lines", text.lines().count()));
    });

    egui::ScrollArea::vertical()
        .id_salt(id)
        .auto_shrink([false, true])
        .show(ui, |ui| {
            let mut shown = text;
            ui.add(
                egui::TextEdit::multiline(&mut shown)
                    .font(egui::TextStyle::Monospace)
                    .code_editor()
                    .desired_width(f32::INFINITY),
            );
        });
}

/// Clickable class chip; clicking copies the class name.
pub fn class_chip(ui: &mut egui::Ui, class: &str) {
    let chip = egui::Button::new(egui::RichText::new(class).monospace().size(12.0)).small();
    if ui.add(chip).on_hover_text("Click to copy").clicked() {
        ui.ctx().copy_text(class.to_string());
    }
}

/// Filled square in `css` color, if it parses.
pub fn color_swatch(ui: &mut egui::Ui, css: &str) {
    if let Some(color) = swatch_color(css) {
        let (rect, _) = ui.allocate_exact_size(egui::vec2(14.0, 14.0), egui::Sense::hover());
        ui.painter().rect_filled(rect, 2.0, color);
        ui.painter()
            .rect_stroke(rect, 2.0, egui::Stroke::new(1.0, egui::Color32::GRAY));
    }
}

// ─── Text utilities ───────────────────────────────────────────────────────────

/// Truncate `s` to at most `max_chars` Unicode scalar values, appending `"..."` if truncated.
pub fn truncate_str(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let t: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", t)
    }
}

/// egui color for a computed CSS color string.
pub fn swatch_color(css: &str) -> Option<egui::Color32> {
    let c = parse_css_color(css)?;
    let alpha = (c.a.clamp(0.0, 1.0) * 255.0).round() as u8;
    Some(egui::Color32::from_rgba_unmultiplied(c.r, c.g, c.b, alpha))
}
