//! Check-in form: collects name and email and submits them to the backend.

use eframe::egui::{self, Key, RichText, Ui};
use egui_phosphor::regular::{BELL, DATABASE, ENVELOPE, PAPER_PLANE_TILT, ROBOT, USER};
use tokio::sync::mpsc;

use super::app::Services;
use super::components::{colors, feature_card};
use crate::error::{AppError, Result};
use crate::models::{CheckInRequest, StudentRecord};

pub const STATUS_SUBMITTING: &str = "Connecting to the server and writing your personal letter...";
pub const STATUS_DONE: &str = "Done!";
pub const STATUS_BUSY: &str = "The server is busy, please try again later.";

/// Form fields and submission state of the check-in screen.
#[derive(Default)]
pub struct CheckInScreen {
    pub name: String,
    pub email: String,
    is_submitting: bool,
    status: String,
    pending: Option<mpsc::UnboundedReceiver<Result<StudentRecord>>>,
}

impl CheckInScreen {
    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    /// Status line shown under the form; empty before the first submission.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Both fields filled, email shaped like an address, and nothing in flight.
    pub fn can_submit(&self) -> bool {
        !self.is_submitting && !self.name.trim().is_empty() && looks_like_email(self.email.trim())
    }

    /// Enter the submitting state and return the request to send.
    ///
    /// Returns `None` without touching any state when the form cannot be submitted.
    pub fn begin_submit(&mut self) -> Option<CheckInRequest> {
        if !self.can_submit() {
            return None;
        }

        self.is_submitting = true;
        self.status = STATUS_SUBMITTING.to_string();

        Some(CheckInRequest {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
        })
    }

    /// Leave the submitting state. Returns the record on success.
    ///
    /// Fields are left populated either way: on failure for a retry, on success because
    /// the screen is about to be replaced.
    pub fn finish_submit(&mut self, result: Result<StudentRecord>) -> Option<StudentRecord> {
        self.is_submitting = false;

        match result {
            Ok(record) => {
                tracing::info!("Check-in stored (id {})", record.id);
                self.status = STATUS_DONE.to_string();
                Some(record)
            }
            Err(e) => {
                tracing::warn!("Check-in failed: {e}");
                self.status = e.server_detail().unwrap_or(STATUS_BUSY).to_string();
                None
            }
        }
    }

    /// Submit the form in the background. Returns `false` if the form was not ready.
    pub fn submit(&mut self, services: &Services) -> bool {
        let Some(request) = self.begin_submit() else {
            return false;
        };

        let (tx, rx) = mpsc::unbounded_channel();
        self.pending = Some(rx);

        let client = services.client.clone();
        services.rt.spawn(async move {
            let result = client.save_student(&request.name, &request.email).await;
            let _ = tx.send(result);
        });

        true
    }

    /// Poll the in-flight submission. Returns the stored record once it succeeds.
    pub fn poll(&mut self) -> Option<StudentRecord> {
        let mut rx = self.pending.take()?;

        match rx.try_recv() {
            Ok(result) => self.finish_submit(result),
            Err(mpsc::error::TryRecvError::Empty) => {
                self.pending = Some(rx);
                None
            }
            Err(mpsc::error::TryRecvError::Disconnected) => {
                self.finish_submit(Err(AppError::CheckInFailed("request task ended".to_string())))
            }
        }
    }
}

/// Loose address check matching what a browser email input accepts.
pub fn looks_like_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }

    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}

/// Show the check-in screen.
///
/// Returns the stored record once a submission succeeds.
pub fn show(form: &mut CheckInScreen, ui: &mut Ui, services: &Services) -> Option<StudentRecord> {
    let completed = form.poll();

    ui.vertical_centered(|ui| {
        ui.add_space(20.0);
        ui.label(RichText::new("Check in now and start your journey").size(32.0).strong());
        ui.add_space(8.0);
        ui.label(
            RichText::new("Fill in the form below and we'll email you a personal introduction to the department.")
                .size(16.0)
                .weak(),
        );
        ui.add_space(30.0);

        egui::Frame::new()
            .fill(ui.style().visuals.extreme_bg_color)
            .inner_margin(egui::Margin::same(30))
            .corner_radius(egui::CornerRadius::same(16))
            .show(ui, |ui| {
                ui.set_width(420.0);
                show_fields(form, ui, services);
            });

        ui.add_space(40.0);

        ui.horizontal(|ui| {
            let card_width = 200.0;
            let spacing = 20.0;
            let total = card_width * 3.0 + spacing * 2.0;
            ui.add_space(((ui.available_width() - total) / 2.0).max(0.0));

            feature_card(ui, DATABASE, "Cloud sync", "Your details go straight to our records", card_width);
            ui.add_space(spacing);
            feature_card(ui, ROBOT, "AI personalised", "A welcome letter written for you", card_width);
            ui.add_space(spacing);
            feature_card(ui, BELL, "Application reminder", "We'll tell you when applications open", card_width);
        });
    });

    completed
}

fn show_fields(form: &mut CheckInScreen, ui: &mut Ui, services: &Services) {
    let mut submit_requested = false;

    ui.label(RichText::new(format!("{USER} Name")).strong());
    let name_response = ui.add(
        egui::TextEdit::singleline(&mut form.name)
            .hint_text("Your full name")
            .desired_width(f32::INFINITY),
    );
    ui.add_space(12.0);

    ui.label(RichText::new(format!("{ENVELOPE} Email")).strong());
    let email_invalid = !form.email.trim().is_empty() && !looks_like_email(form.email.trim());
    let email_response = ui.add(
        egui::TextEdit::singleline(&mut form.email)
            .hint_text("example@email.com")
            .desired_width(f32::INFINITY)
            .text_color(if email_invalid {
                colors::ERROR
            } else {
                ui.visuals().text_color()
            }),
    );
    ui.add_space(20.0);

    let enter_pressed = ui.input(|i| i.key_pressed(Key::Enter));
    if enter_pressed && (name_response.lost_focus() || email_response.lost_focus()) {
        submit_requested = true;
    }

    let label = if form.is_submitting() {
        "Processing...".to_string()
    } else {
        format!("Check in {PAPER_PLANE_TILT}")
    };
    let button = egui::Button::new(RichText::new(label).size(16.0).strong())
        .min_size(egui::vec2(ui.available_width(), 44.0))
        .fill(colors::PRIMARY);

    ui.horizontal(|ui| {
        if ui.add_enabled(form.can_submit(), button).clicked() {
            submit_requested = true;
        }
    });

    if form.is_submitting() {
        ui.add_space(8.0);
        ui.vertical_centered(|ui| ui.spinner());
    }

    if submit_requested {
        form.submit(services);
    }

    if !form.status().is_empty() {
        ui.add_space(12.0);
        ui.vertical_centered(|ui| {
            ui.label(RichText::new(form.status()).color(colors::PRIMARY));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> CheckInScreen {
        CheckInScreen {
            name: "Alice".to_string(),
            email: "a@x.com".to_string(),
            ..Default::default()
        }
    }

    fn record() -> StudentRecord {
        StudentRecord {
            id: "7".to_string(),
            name: "Alice".to_string(),
            email: "a@x.com".to_string(),
            check_in_time: "2026-01-05T10:00:00Z".to_string(),
            personalized_letter: Some("Hi".to_string()),
        }
    }

    #[test]
    fn test_empty_fields_block_submit_without_changes() {
        for (name, email) in [("", "a@x.com"), ("Alice", ""), ("", ""), ("   ", "a@x.com")] {
            let mut form = CheckInScreen {
                name: name.to_string(),
                email: email.to_string(),
                ..Default::default()
            };

            assert!(form.begin_submit().is_none());
            assert!(!form.is_submitting());
            assert_eq!(form.status(), "");
            assert_eq!(form.name, name);
            assert_eq!(form.email, email);
        }
    }

    #[test]
    fn test_begin_submit_trims_and_marks_submitting() {
        let mut form = CheckInScreen {
            name: " Alice ".to_string(),
            email: "a@x.com ".to_string(),
            ..Default::default()
        };

        let request = form.begin_submit().unwrap();
        assert_eq!(request.name, "Alice");
        assert_eq!(request.email, "a@x.com");
        assert!(form.is_submitting());
        assert_eq!(form.status(), STATUS_SUBMITTING);

        // Second press while in flight is ignored
        assert!(form.begin_submit().is_none());
    }

    #[test]
    fn test_finish_success() {
        let mut form = filled();
        form.begin_submit();

        let done = form.finish_submit(Ok(record()));
        assert_eq!(done, Some(record()));
        assert!(!form.is_submitting());
        assert_eq!(form.status(), STATUS_DONE);
    }

    #[test]
    fn test_finish_generic_failure_keeps_fields() {
        let mut form = filled();
        form.begin_submit();

        let done = form.finish_submit(Err(AppError::CheckInFailed("Bad Gateway".to_string())));
        assert!(done.is_none());
        assert!(!form.is_submitting());
        assert_eq!(form.status(), STATUS_BUSY);
        assert_eq!(form.name, "Alice");
        assert_eq!(form.email, "a@x.com");
        assert!(form.can_submit());
    }

    #[test]
    fn test_finish_rejected_shows_detail() {
        let mut form = filled();
        form.begin_submit();

        form.finish_submit(Err(AppError::Rejected("Email already registered".to_string())));
        assert_eq!(form.status(), "Email already registered");
    }

    #[test]
    fn test_poll_without_pending_is_noop() {
        let mut form = filled();
        assert!(form.poll().is_none());
        assert_eq!(form.status(), "");
    }

    #[test]
    fn test_looks_like_email() {
        assert!(looks_like_email("a@x.com"));
        assert!(looks_like_email("a@localhost"));
        assert!(!looks_like_email("a.x.com"));
        assert!(!looks_like_email("@x.com"));
        assert!(!looks_like_email("a@"));
        assert!(!looks_like_email("a@b@c"));
        assert!(!looks_like_email("a b@x.com"));
        assert!(!looks_like_email("a@.com"));
    }
}
