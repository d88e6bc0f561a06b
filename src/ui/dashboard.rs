//! Admin dashboard with summary tiles, trend chart, searchable record list and CSV export.

use std::path::PathBuf;

use eframe::egui::{self, CornerRadius, Margin, RichText, Ui};
use egui_extras::{Column, TableBuilder};
use egui_phosphor::regular::{ARROWS_CLOCKWISE, FILE_CSV, FLOPPY_DISK, MAGNIFYING_GLASS};
use tokio::sync::mpsc;
use tokio::task::{AbortHandle, JoinHandle};

use super::app::Services;
use super::chart::line_chart;
use super::components::{colors, panel_header, stat_card};
use crate::client::CheckInClient;
use crate::config::KioskConfig;
use crate::error::Result;
use crate::export;
use crate::models::{AnalyticsData, StudentRecord};

/// Both dashboard data sets, fetched together.
pub type DashboardData = (Vec<StudentRecord>, Vec<AnalyticsData>);

/// Fetch students and analytics concurrently; either failure fails the whole load.
pub async fn fetch_dashboard(client: &CheckInClient) -> Result<DashboardData> {
    tokio::try_join!(client.get_students(), client.get_analytics())
}

/// Outcome line shown under the dashboard title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

/// Dashboard state, scoped to one visit of the admin screen.
///
/// Dropping the dashboard aborts any fetch still in flight.
pub struct AdminDashboard {
    students: Vec<StudentRecord>,
    analytics: Vec<AnalyticsData>,
    loading: bool,
    load_failed: bool,
    pub search: String,
    notice: Option<Notice>,

    load_task: Option<JoinHandle<()>>,
    load_rx: Option<mpsc::UnboundedReceiver<Result<DashboardData>>>,
    save_rx: Option<mpsc::UnboundedReceiver<Result<PathBuf>>>,
}

impl Default for AdminDashboard {
    fn default() -> Self {
        Self {
            students: Vec::new(),
            analytics: Vec::new(),
            loading: true,
            load_failed: false,
            search: String::new(),
            notice: None,
            load_task: None,
            load_rx: None,
            save_rx: None,
        }
    }
}

impl Drop for AdminDashboard {
    fn drop(&mut self) {
        if let Some(task) = self.load_task.take() {
            task.abort();
        }
    }
}

impl AdminDashboard {
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether the last load failed.
    pub fn load_failed(&self) -> bool {
        self.load_failed
    }

    pub fn students(&self) -> &[StudentRecord] {
        &self.students
    }

    pub fn analytics(&self) -> &[AnalyticsData] {
        &self.analytics
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// "Total records" tile.
    pub fn total_records(&self) -> usize {
        self.students.len()
    }

    /// "Active dates" tile.
    pub fn active_dates(&self) -> usize {
        self.analytics.len()
    }

    /// Students matching the search box, in fetched order.
    pub fn filtered(&self) -> Vec<&StudentRecord> {
        self.students.iter().filter(|s| s.matches(&self.search)).collect()
    }

    /// Whether a load has been started for this visit.
    pub fn is_started(&self) -> bool {
        self.load_task.is_some()
    }

    /// Handle to the load task in flight, if any.
    pub fn load_abort_handle(&self) -> Option<AbortHandle> {
        self.load_task.as_ref().map(JoinHandle::abort_handle)
    }

    /// Start (or restart) loading both data sets.
    pub fn start(&mut self, services: &Services) {
        if let Some(task) = self.load_task.take() {
            task.abort();
        }

        self.loading = true;
        self.load_failed = false;

        let (tx, rx) = mpsc::unbounded_channel();
        self.load_rx = Some(rx);

        let client = services.client.clone();
        self.load_task = Some(services.rt.spawn(async move {
            let result = fetch_dashboard(&client).await;
            let _ = tx.send(result);
        }));
    }

    /// Apply a finished load. Failures leave both data sets empty.
    pub fn apply(&mut self, result: Result<DashboardData>) {
        self.loading = false;

        match result {
            Ok((students, analytics)) => {
                tracing::info!(
                    "Dashboard loaded: {} records over {} dates",
                    students.len(),
                    analytics.len()
                );
                self.students = students;
                self.analytics = analytics;
                self.load_failed = false;
            }
            Err(e) => {
                tracing::error!("Dashboard fetch error: {e}");
                self.students.clear();
                self.analytics.clear();
                self.load_failed = true;
            }
        }
    }

    /// Download the CSV export in the background and write it to `path`.
    pub fn save_export_to(&mut self, services: &Services, path: PathBuf) {
        let (tx, rx) = mpsc::unbounded_channel();
        self.save_rx = Some(rx);
        self.notice = None;

        let client = services.client.clone();
        services.rt.spawn(async move {
            let result = match client.download_export().await {
                Ok(bytes) => export::save_csv(&bytes, &path).map(|()| path),
                Err(e) => Err(e),
            };
            let _ = tx.send(result);
        });
    }

    /// Whether a background operation is still outstanding.
    pub fn is_busy(&self) -> bool {
        self.load_rx.is_some() || self.save_rx.is_some()
    }

    /// Poll async operation results.
    pub fn poll(&mut self) {
        if let Some(mut rx) = self.load_rx.take() {
            match rx.try_recv() {
                Ok(result) => self.apply(result),
                Err(mpsc::error::TryRecvError::Empty) => {
                    self.load_rx = Some(rx);
                }
                Err(mpsc::error::TryRecvError::Disconnected) => {
                    // Task aborted or panicked
                    self.loading = false;
                    self.load_failed = true;
                }
            }
        }

        if let Some(mut rx) = self.save_rx.take() {
            match rx.try_recv() {
                Ok(Ok(path)) => {
                    self.notice = Some(Notice::Success(format!("Exported to {}", path.display())));
                }
                Ok(Err(e)) => {
                    tracing::error!("CSV export failed: {e}");
                    self.notice = Some(Notice::Error(format!("Export failed: {e}")));
                }
                Err(mpsc::error::TryRecvError::Empty) => {
                    self.save_rx = Some(rx);
                }
                Err(mpsc::error::TryRecvError::Disconnected) => {}
            }
        }
    }
}

/// Show the dashboard panel.
pub fn show(dash: &mut AdminDashboard, ui: &mut Ui, services: &Services, kiosk: &KioskConfig) {
    if !dash.is_started() {
        dash.start(services);
    }
    dash.poll();

    if dash.is_busy() {
        ui.ctx().request_repaint();
    }

    if dash.is_loading() {
        ui.vertical_centered(|ui| {
            ui.add_space(80.0);
            ui.spinner();
            ui.add_space(10.0);
            ui.label(RichText::new("Fetching data from the server...").weak());
        });
        return;
    }

    ui.horizontal(|ui| {
        ui.vertical(|ui| {
            panel_header(
                ui,
                &format!("Admin Dashboard ({})", kiosk.year),
                "Live check-in data from the recruitment backend",
            );
        });

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
            if ui
                .button(RichText::new(format!("{FLOPPY_DISK} Save CSV as...")).strong())
                .clicked()
                && let Some(path) = export::show_save_dialog(&export::generate_export_filename("students"))
            {
                dash.save_export_to(services, path);
            }
            if ui
                .button(RichText::new(format!("{FILE_CSV} Export CSV")).strong().color(colors::SUCCESS))
                .clicked()
            {
                ui.ctx().open_url(egui::OpenUrl::new_tab(services.client.export_url()));
            }
        });
    });

    if dash.load_failed() {
        ui.horizontal(|ui| {
            ui.label(RichText::new("Could not load dashboard data.").color(colors::NEUTRAL));
            if ui.small_button(format!("{ARROWS_CLOCKWISE} Refresh")).clicked() {
                dash.start(services);
            }
        });
    }

    match dash.notice() {
        Some(Notice::Success(msg)) => {
            ui.colored_label(colors::SUCCESS, msg);
        }
        Some(Notice::Error(msg)) => {
            ui.colored_label(colors::ERROR, msg);
        }
        None => {}
    }

    ui.add_space(10.0);

    // Summary tiles
    ui.horizontal(|ui| {
        let width = ((ui.available_width() - 90.0) / 3.0).max(120.0);
        stat_card(ui, "Total records", dash.total_records().to_string(), width);
        stat_card(
            ui,
            "Active dates",
            RichText::new(dash.active_dates().to_string()).color(colors::PRIMARY),
            width,
        );
        stat_card(ui, "System status", RichText::new("● Online").color(colors::SUCCESS), width);
    });

    ui.add_space(20.0);

    // Chart | Student list
    let column_width = (ui.available_width() - 40.0) / 2.0;

    ui.horizontal_top(|ui| {
        section(ui, column_width, "Daily check-in trend", |ui| {
            line_chart(ui, dash.analytics(), 300.0);
        });

        ui.add_space(20.0);

        section(ui, column_width, "Students", |ui| {
            ui.add(
                egui::TextEdit::singleline(&mut dash.search)
                    .hint_text(format!("{MAGNIFYING_GLASS} Search name or email..."))
                    .desired_width(f32::INFINITY),
            );
            ui.add_space(8.0);

            let filtered = dash.filtered();
            ui.label(
                RichText::new(format!("Showing {} of {}", filtered.len(), dash.total_records()))
                    .small()
                    .weak(),
            );
            ui.add_space(4.0);

            student_table(ui, &filtered);
        });
    });
}

fn section(ui: &mut Ui, width: f32, title: &str, add_contents: impl FnOnce(&mut Ui)) {
    ui.vertical(|ui| {
        ui.set_width(width);

        egui::Frame::new()
            .fill(ui.style().visuals.extreme_bg_color)
            .inner_margin(Margin::same(15))
            .corner_radius(CornerRadius::same(8))
            .show(ui, |ui| {
                ui.set_min_width(width - 30.0);
                ui.label(RichText::new(title).strong());
                ui.add_space(10.0);
                add_contents(ui);
            });
    });
}

fn student_table(ui: &mut Ui, students: &[&StudentRecord]) {
    TableBuilder::new(ui)
        .id_salt("students_table")
        .striped(true)
        .max_scroll_height(250.0)
        .column(Column::remainder().at_least(120.0))
        .column(Column::auto().at_least(80.0))
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("Student");
            });
            header.col(|ui| {
                ui.strong("Checked in");
            });
        })
        .body(|body| {
            body.rows(40.0, students.len(), |mut row| {
                let student = students[row.index()];
                row.col(|ui| {
                    ui.vertical(|ui| {
                        ui.label(RichText::new(&student.name).strong());
                        ui.label(RichText::new(&student.email).small().weak());
                    });
                });
                row.col(|ui| {
                    ui.label(RichText::new(student.display_date()).small().monospace().weak());
                });
            });
        });
}
