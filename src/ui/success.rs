//! Success screen: welcome letter preview after a check-in.

use std::borrow::Cow;

use eframe::egui::{self, CornerRadius, Margin, RichText, Ui};
use egui_phosphor::regular::{ARROW_SQUARE_OUT, CHECK_CIRCLE, GLOBE};

use super::components::colors;
use crate::config::KioskConfig;
use crate::models::StudentRecord;

/// Letter token replaced by the department website URL.
pub const DEPT_WEBSITE_TOKEN: &str = "[系所官網]";
/// Letter token replaced by the application URL.
pub const APPLY_LINK_TOKEN: &str = "[申請連結]";

pub const NO_LETTER_NOTE: &str = "Your personal letter is not available right now.";

/// Substitute the link tokens in a generated letter.
///
/// Only the first occurrence of each token is replaced.
pub fn render_letter(letter: &str, kiosk: &KioskConfig) -> String {
    letter
        .replacen(DEPT_WEBSITE_TOKEN, &kiosk.dept_website, 1)
        .replacen(APPLY_LINK_TOKEN, &kiosk.apply_url, 1)
}

/// Text for the letter preview, or the fallback note when the backend sent no letter.
pub fn letter_body<'a>(record: &'a StudentRecord, kiosk: &KioskConfig) -> Cow<'a, str> {
    match &record.personalized_letter {
        Some(letter) => Cow::Owned(render_letter(letter, kiosk)),
        None => Cow::Borrowed(NO_LETTER_NOTE),
    }
}

/// Confirmation line naming the address the letter went to.
pub fn header_text(record: &StudentRecord) -> String {
    format!("We've sent a welcome letter to {}", record.email)
}

/// Show the success screen.
///
/// Returns `true` if "return home" was clicked.
pub fn show(record: &StudentRecord, kiosk: &KioskConfig, ui: &mut Ui) -> bool {
    let mut go_home = false;

    ui.vertical_centered(|ui| {
        ui.add_space(20.0);
        ui.label(RichText::new(CHECK_CIRCLE).size(64.0).color(colors::SUCCESS));
        ui.add_space(10.0);
        ui.label(RichText::new("Check-in complete!").size(30.0).strong());
        ui.add_space(6.0);
        ui.label(RichText::new(header_text(record)).size(15.0));
    });

    ui.add_space(30.0);

    egui::Frame::new()
        .fill(ui.style().visuals.extreme_bg_color)
        .inner_margin(Margin::same(24))
        .corner_radius(CornerRadius::same(12))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());

            ui.label(RichText::new("Email preview").small().monospace().weak());
            ui.separator();
            ui.add_space(10.0);

            let body = letter_body(record, kiosk);
            if record.personalized_letter.is_some() {
                ui.label(RichText::new(body).size(15.0));
            } else {
                ui.label(RichText::new(body).italics().weak());
            }

            ui.add_space(20.0);
            ui.separator();
            ui.add_space(10.0);

            ui.horizontal(|ui| {
                if ui
                    .button(RichText::new(format!("{GLOBE} Visit department website")).strong())
                    .clicked()
                {
                    ui.ctx().open_url(egui::OpenUrl::new_tab(&kiosk.dept_website));
                }
                ui.add_space(10.0);
                if ui
                    .button(format!("{ARROW_SQUARE_OUT} Application system (opening soon)"))
                    .clicked()
                {
                    ui.ctx().open_url(egui::OpenUrl::new_tab(&kiosk.apply_url));
                }
            });
        });

    ui.add_space(20.0);

    ui.vertical_centered(|ui| {
        if ui.button(RichText::new("Back to check-in").size(14.0)).clicked() {
            go_home = true;
        }
    });

    go_home
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> StudentRecord {
        StudentRecord {
            id: "7".to_string(),
            name: "Alice".to_string(),
            email: "a@x.com".to_string(),
            check_in_time: "2026-01-05T10:00:00Z".to_string(),
            personalized_letter: Some("Hi [系所官網] [申請連結]".to_string()),
        }
    }

    #[test]
    fn test_render_letter_replaces_both_tokens() {
        let kiosk = KioskConfig::default();
        let record = alice();

        let letter = render_letter(record.personalized_letter.as_deref().unwrap(), &kiosk);
        assert_eq!(
            letter,
            "Hi https://abc-dept.university.edu https://admissions.university.edu/apply"
        );
    }

    #[test]
    fn test_render_letter_replaces_first_occurrence_only() {
        let kiosk = KioskConfig {
            dept_website: "https://d".to_string(),
            apply_url: "https://a".to_string(),
            ..Default::default()
        };

        let letter = render_letter("[申請連結] / [系所官網] / [申請連結]", &kiosk);
        assert_eq!(letter, "https://a / https://d / [申請連結]");
    }

    #[test]
    fn test_letter_body_renders_letter() {
        let kiosk = KioskConfig {
            dept_website: "https://d".to_string(),
            apply_url: "https://a".to_string(),
            ..Default::default()
        };
        assert_eq!(letter_body(&alice(), &kiosk), "Hi https://d https://a");
    }

    #[test]
    fn test_letter_body_without_letter_shows_note() {
        let record = StudentRecord {
            personalized_letter: None,
            ..alice()
        };
        assert_eq!(letter_body(&record, &KioskConfig::default()), NO_LETTER_NOTE);
    }

    #[test]
    fn test_render_letter_without_tokens_unchanged() {
        let kiosk = KioskConfig::default();
        assert_eq!(render_letter("Welcome!", &kiosk), "Welcome!");
    }

    #[test]
    fn test_header_names_email() {
        assert!(header_text(&alice()).contains("a@x.com"));
    }
}
