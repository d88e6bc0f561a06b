//! CSV export saving.
//!
//! The CSV itself is produced by the backend; this module only picks a destination
//! and writes the downloaded bytes.

use chrono::Local;
use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};

/// Open save file dialog and return selected path.
pub fn show_save_dialog(default_name: &str) -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_file_name(default_name)
        .add_filter("CSV Files", &["csv"])
        .save_file()
}

/// Generate default filename for export.
pub fn generate_export_filename(prefix: &str) -> String {
    let now = Local::now();
    format!("{prefix}_{ts}.csv", ts = now.format("%Y%m%d_%H%M%S"))
}

/// Write a downloaded CSV body to `path`.
pub fn save_csv(data: &[u8], path: &Path) -> Result<()> {
    if data.is_empty() {
        return Err(AppError::export("server returned an empty file"));
    }

    std::fs::write(path, data)?;
    tracing::info!("Saved CSV export ({} bytes) to {}", data.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_export_filename() {
        let name = generate_export_filename("students");
        assert!(name.starts_with("students_"));
        assert!(name.ends_with(".csv"));
        // students_YYYYMMDD_HHMMSS.csv
        assert_eq!(name.len(), "students_".len() + 15 + ".csv".len());
    }

    #[test]
    fn test_save_csv_writes_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("students.csv");
        let body = "ID,Name,Email,Check-in time\n1,Alice,a@x.com,2026-01-05T10:00:00\n";

        save_csv(body.as_bytes(), &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), body);
    }

    #[test]
    fn test_save_csv_rejects_empty_body() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("students.csv");

        assert!(matches!(save_csv(&[], &path), Err(AppError::Export(_))));
        assert!(!path.exists());
    }
}
