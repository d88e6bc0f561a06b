//! Font setup: Phosphor icons plus an optional fallback font for CJK letters.

use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::Arc;

use eframe::egui::{self, FontData, FontDefinitions, FontFamily};

const FALLBACK_FONT: &str = "kiosk-fallback";

/// Build font definitions, adding the fallback font at `font_path` if it can be read
/// and parsed.
pub fn font_definitions(font_path: Option<&Path>) -> FontDefinitions {
    let mut fonts = base_definitions();

    if let Some(path) = font_path {
        match std::fs::read(path) {
            Ok(bytes) => {
                let data = Arc::new(FontData::from_owned(bytes));
                if font_loads(&data) {
                    add_fallback(&mut fonts, data);
                    tracing::info!("Loaded fallback font from {}", path.display());
                } else {
                    tracing::warn!("Ignoring {}: not a usable font file", path.display());
                }
            }
            Err(e) => {
                tracing::warn!("Could not read font {}: {}", path.display(), e);
            }
        }
    }

    fonts
}

fn base_definitions() -> FontDefinitions {
    let mut fonts = FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
    fonts
}

fn add_fallback(fonts: &mut FontDefinitions, data: Arc<FontData>) {
    fonts.font_data.insert(FALLBACK_FONT.to_owned(), data);
    for family in [FontFamily::Proportional, FontFamily::Monospace] {
        fonts.families.entry(family).or_default().push(FALLBACK_FONT.to_owned());
    }
}

/// Lay out one frame on a scratch context with the candidate font installed.
///
/// epaint panics on font bytes it cannot parse, so the frame runs under `catch_unwind`.
fn font_loads(data: &Arc<FontData>) -> bool {
    let mut fonts = base_definitions();
    add_fallback(&mut fonts, Arc::clone(data));

    let ctx = egui::Context::default();
    ctx.set_fonts(fonts);
    panic::catch_unwind(AssertUnwindSafe(|| {
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.label("你好");
            });
        });
    }))
    .is_ok()
}

/// Install fonts on the context.
pub fn install(ctx: &egui::Context, font_path: Option<&Path>) {
    ctx.set_fonts(font_definitions(font_path));
}
