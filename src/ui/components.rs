//! Shared UI components.

use eframe::egui::{self, Color32, CornerRadius, Margin, Response, RichText, Sense, Ui};

/// Status indicator colors.
pub mod colors {
    use super::Color32;

    pub const PRIMARY: Color32 = Color32::from_rgb(37, 99, 235);
    pub const SUCCESS: Color32 = Color32::from_rgb(100, 200, 100);
    pub const ERROR: Color32 = Color32::from_rgb(255, 100, 100);
    pub const NEUTRAL: Color32 = Color32::from_rgb(150, 150, 150);
}

/// Render the department logo badge with a letter in it.
///
/// Returns the response which can be checked for `.clicked()`.
pub fn logo_badge(ui: &mut Ui, letter: &str, size: f32) -> Response {
    let (rect, response) = ui.allocate_exact_size(egui::vec2(size, size), Sense::click());

    if ui.is_rect_visible(rect) {
        ui.painter().rect_filled(rect, 8.0, colors::PRIMARY);
        ui.painter().text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            letter,
            egui::FontId::proportional(size * 0.5),
            Color32::WHITE,
        );
    }

    response
}

/// Render a panel header with title and subtitle.
pub fn panel_header(ui: &mut Ui, title: &str, subtitle: &str) {
    ui.heading(RichText::new(title).size(28.0).strong());
    ui.label(RichText::new(subtitle).weak());
    ui.add_space(10.0);
    ui.separator();
    ui.add_space(20.0);
}

/// Render a summary tile with a title and a big value.
pub fn stat_card(ui: &mut Ui, title: &str, value: impl Into<RichText>, width: f32) {
    egui::Frame::new()
        .fill(ui.style().visuals.extreme_bg_color)
        .inner_margin(Margin::same(15))
        .outer_margin(Margin::same(5))
        .corner_radius(CornerRadius::same(8))
        .show(ui, |ui| {
            ui.set_width(width);

            ui.vertical(|ui| {
                ui.label(RichText::new(title.to_uppercase()).small().weak());
                ui.add_space(4.0);
                ui.label(value.into().size(30.0).strong());
            });
        });
}

/// Render an icon card with a short title and description.
pub fn feature_card(ui: &mut Ui, icon: &str, title: &str, description: &str, width: f32) {
    ui.vertical(|ui| {
        ui.set_width(width);
        ui.vertical_centered(|ui| {
            ui.label(RichText::new(icon).size(28.0).color(colors::PRIMARY));
            ui.add_space(6.0);
            ui.label(RichText::new(title).strong());
            ui.label(RichText::new(description).small().weak());
        });
    });
}
