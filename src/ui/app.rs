//! Application shell: view selection, hidden admin entry, header and footer.

use std::time::Instant;

use eframe::egui::{self, Align, Align2, Layout, RichText};
use egui_phosphor::regular::ARROW_LEFT;
use tokio::runtime::{Handle, Runtime};

use crate::client::CheckInClient;
use crate::config::{AppConfig, KioskConfig};
use crate::models::StudentRecord;

use super::check_in::{self, CheckInScreen};
use super::components::{colors, logo_badge};
use super::dashboard::{self, AdminDashboard};
use super::gesture::AdminGesture;
use super::success;

/// Which top-level screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    CheckIn,
    Success,
    Admin,
}

/// The visible screen together with the state it owns.
///
/// Screen state lives only as long as its variant, so leaving a screen drops it.
pub enum Screen {
    CheckIn(CheckInScreen),
    Success(StudentRecord),
    Admin(AdminDashboard),
}

impl Screen {
    pub fn mode(&self) -> ViewMode {
        match self {
            Screen::CheckIn(_) => ViewMode::CheckIn,
            Screen::Success(_) => ViewMode::Success,
            Screen::Admin(_) => ViewMode::Admin,
        }
    }
}

/// Handles screens need to reach the backend.
#[derive(Clone)]
pub struct Services {
    pub client: CheckInClient,
    pub rt: Handle,
}

/// Screen switching and the admin-entry gesture. Performs no I/O.
pub struct Shell {
    screen: Screen,
    gesture: AdminGesture,
}

impl Shell {
    pub fn new(kiosk: &KioskConfig) -> Self {
        Self {
            screen: Screen::CheckIn(CheckInScreen::default()),
            gesture: AdminGesture::new(kiosk.admin_entry_clicks, kiosk.click_reset_window()),
        }
    }

    pub fn view(&self) -> ViewMode {
        self.screen.mode()
    }

    #[cfg(test)]
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut Screen {
        &mut self.screen
    }

    /// Record shown on the success screen.
    #[cfg(test)]
    pub fn last_registered(&self) -> Option<&StudentRecord> {
        match &self.screen {
            Screen::Success(record) => Some(record),
            _ => None,
        }
    }

    pub fn gesture(&self) -> &AdminGesture {
        &self.gesture
    }

    /// Count a logo click; opens the dashboard when the threshold is reached.
    pub fn handle_logo_click(&mut self, now: Instant) {
        if self.gesture.click(now) && self.view() != ViewMode::Admin {
            tracing::info!("Admin gesture completed, opening dashboard");
            self.screen = Screen::Admin(AdminDashboard::default());
        }
    }

    /// Fire the gesture's idle reset if due.
    pub fn tick(&mut self, now: Instant) {
        self.gesture.tick(now);
    }

    pub fn on_check_in_complete(&mut self, record: StudentRecord) {
        tracing::debug!("Showing success screen for {}", record.email);
        self.screen = Screen::Success(record);
    }

    /// Back to an empty check-in form. Used by "exit admin" and "return home".
    pub fn go_to_home(&mut self) {
        self.screen = Screen::CheckIn(CheckInScreen::default());
    }
}

/// What the visible screen asked the shell to do this frame.
enum ShellAction {
    CheckedIn(StudentRecord),
    GoHome,
}

/// Kiosk application state.
pub struct KioskApp {
    // Keeps the runtime behind `services.rt` alive
    _rt: Runtime,
    services: Services,
    config: AppConfig,
    shell: Shell,
    startup_error: Option<String>,
}

impl KioskApp {
    pub fn new(config: AppConfig, rt: Runtime, client: CheckInClient, startup_error: Option<String>) -> Self {
        let services = Services {
            client,
            rt: rt.handle().clone(),
        };
        let shell = Shell::new(&config.kiosk);

        Self {
            _rt: rt,
            services,
            config,
            shell,
            startup_error,
        }
    }

    /// Render header with the logo (gesture target) and the exit button.
    fn show_header(&mut self, ctx: &egui::Context) {
        let kiosk = &self.config.kiosk;
        let mut clicked = false;
        let mut exit = false;

        egui::TopBottomPanel::top("header").min_height(64.0).show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                let logo = ui
                    .horizontal(|ui| {
                        let badge = logo_badge(ui, "A", 40.0);
                        ui.vertical(|ui| {
                            ui.label(RichText::new(&kiosk.department_name).size(18.0).strong());
                            ui.label(
                                RichText::new(format!("RECRUITMENT {}", kiosk.year))
                                    .small()
                                    .weak(),
                            );
                        });
                        badge
                    })
                    .inner;
                let titles = ui.min_rect();
                let area = ui.interact(titles, ui.id().with("logo_area"), egui::Sense::click());
                clicked = logo.clicked() || area.clicked();

                if self.shell.view() == ViewMode::Admin {
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if ui.button(format!("{ARROW_LEFT} Exit Admin")).clicked() {
                            exit = true;
                        }
                    });
                }
            });
        });

        if clicked {
            self.shell.handle_logo_click(Instant::now());
        }
        if exit {
            tracing::info!("Leaving admin dashboard");
            self.shell.go_to_home();
        }
    }

    fn show_footer(&self, ctx: &egui::Context) {
        let kiosk = &self.config.kiosk;
        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(6.0);
                ui.label(
                    RichText::new(format!(
                        "© {} {}. All rights reserved.",
                        kiosk.year, kiosk.department_name
                    ))
                    .small()
                    .weak(),
                );
                ui.add_space(6.0);
            });
        });
    }

    /// Small "N clicks to Admin" hint while the gesture is in progress.
    fn show_gesture_hint(&self, ctx: &egui::Context) {
        let gesture = self.shell.gesture();
        if gesture.count() == 0 {
            return;
        }

        egui::Area::new(egui::Id::new("admin_hint"))
            .anchor(Align2::RIGHT_BOTTOM, [-16.0, -48.0])
            .interactable(false)
            .show(ctx, |ui| {
                egui::Frame::new()
                    .fill(colors::NEUTRAL.gamma_multiply(0.5))
                    .inner_margin(egui::Margin::symmetric(10, 4))
                    .corner_radius(egui::CornerRadius::same(12))
                    .show(ui, |ui| {
                        ui.label(
                            RichText::new(format!("{} clicks to Admin", gesture.remaining()))
                                .small()
                                .color(egui::Color32::WHITE),
                        );
                    });
            });
    }

    fn show_startup_error(&mut self, ctx: &egui::Context) {
        if let Some(ref error) = self.startup_error.clone() {
            egui::Window::new("Configuration")
                .collapsible(false)
                .resizable(false)
                .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.colored_label(colors::ERROR, error);
                    ui.label("Built-in defaults are in use.");
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        self.startup_error = None;
                    }
                });
        }
    }
}

impl eframe::App for KioskApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.shell.tick(now);

        // Wake up for the pending gesture reset even without input
        if let Some(deadline) = self.shell.gesture().pending_reset() {
            ctx.request_repaint_after(deadline.saturating_duration_since(now));
        }

        self.show_header(ctx);
        self.show_footer(ctx);
        self.show_gesture_hint(ctx);
        self.show_startup_error(ctx);

        let mut action = None;
        let services = &self.services;
        let kiosk = &self.config.kiosk;

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.set_max_width(960.0);
                match self.shell.screen_mut() {
                    Screen::CheckIn(form) => {
                        if form.is_submitting() {
                            ui.ctx().request_repaint();
                        }
                        if let Some(record) = check_in::show(form, ui, services) {
                            action = Some(ShellAction::CheckedIn(record));
                        }
                    }
                    Screen::Success(record) => {
                        if success::show(record, kiosk, ui) {
                            action = Some(ShellAction::GoHome);
                        }
                    }
                    Screen::Admin(dash) => dashboard::show(dash, ui, services, kiosk),
                }
            });
        });

        match action {
            Some(ShellAction::CheckedIn(record)) => self.shell.on_check_in_complete(record),
            Some(ShellAction::GoHome) => self.shell.go_to_home(),
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

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
    fn test_starts_on_check_in() {
        let shell = Shell::new(&KioskConfig::default());
        assert_eq!(shell.view(), ViewMode::CheckIn);
        assert!(shell.last_registered().is_none());
        assert_eq!(shell.gesture().count(), 0);
    }

    #[test]
    fn test_check_in_complete_then_home() {
        let mut shell = Shell::new(&KioskConfig::default());

        shell.on_check_in_complete(record());
        assert_eq!(shell.view(), ViewMode::Success);
        assert_eq!(shell.last_registered(), Some(&record()));

        shell.go_to_home();
        assert_eq!(shell.view(), ViewMode::CheckIn);
        assert!(shell.last_registered().is_none());
        match shell.screen() {
            Screen::CheckIn(form) => {
                assert!(form.name.is_empty());
                assert!(form.email.is_empty());
            }
            _ => panic!("expected check-in screen"),
        }
    }

    #[test]
    fn test_logo_gesture_opens_admin() {
        let mut shell = Shell::new(&KioskConfig::default());
        let start = Instant::now();

        for i in 0..4 {
            shell.handle_logo_click(start + Duration::from_millis(500 * i));
            assert_eq!(shell.view(), ViewMode::CheckIn);
        }
        shell.handle_logo_click(start + Duration::from_millis(2000));

        assert_eq!(shell.view(), ViewMode::Admin);
        assert_eq!(shell.gesture().count(), 0);
    }

    #[test]
    fn test_idle_pause_restarts_gesture() {
        let mut shell = Shell::new(&KioskConfig::default());
        let start = Instant::now();

        for i in 0..4 {
            shell.handle_logo_click(start + Duration::from_secs(i));
        }
        shell.tick(start + Duration::from_secs(7));
        assert_eq!(shell.gesture().count(), 0);

        shell.handle_logo_click(start + Duration::from_secs(8));
        assert_eq!(shell.view(), ViewMode::CheckIn);
        assert_eq!(shell.gesture().count(), 1);
    }

    #[test]
    fn test_gesture_while_admin_keeps_dashboard() {
        let kiosk = KioskConfig {
            admin_entry_clicks: 1,
            ..Default::default()
        };
        let mut shell = Shell::new(&kiosk);
        let now = Instant::now();

        shell.handle_logo_click(now);
        if let Screen::Admin(dash) = shell.screen_mut() {
            dash.search = "kept".to_string();
        }

        shell.handle_logo_click(now + Duration::from_millis(100));
        match shell.screen() {
            Screen::Admin(dash) => assert_eq!(dash.search, "kept"),
            _ => panic!("expected admin screen"),
        }
    }

    #[test]
    fn test_exit_admin_returns_home() {
        let kiosk = KioskConfig {
            admin_entry_clicks: 2,
            ..Default::default()
        };
        let mut shell = Shell::new(&kiosk);
        let now = Instant::now();

        shell.handle_logo_click(now);
        shell.handle_logo_click(now);
        assert_eq!(shell.view(), ViewMode::Admin);

        shell.go_to_home();
        assert_eq!(shell.view(), ViewMode::CheckIn);
    }
}
