//! GUI screens and application shell.

pub mod app;
pub mod chart;
pub mod check_in;
pub mod components;
pub mod dashboard;
pub mod fonts;
pub mod gesture;
pub mod success;

pub use app::{KioskApp, Services, Shell, ViewMode};
