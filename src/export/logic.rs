// src/export/logic.rs

use crate::db::pool::DbPool;
use crate::db::sessions::SessionOrder;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::to_rows;
use crate::export::range::parse_range;
use crate::ui::messages::warning;
use crate::utils::path::expand_tilde;

/// High-level export logic.
pub struct ExportLogic;

impl ExportLogic {
    /// Export sessions.
    ///
    /// - `format`: csv | json
    /// - `file`: absolute path of the output file
    /// - `range`: `None`, `"all"` or an expression accepted by `parse_range`
    ///
    /// Returns the number of exported rows.
    pub fn export(
        pool: &DbPool,
        format: &ExportFormat,
        file: &str,
        range: Option<&str>,
        force: bool,
    ) -> AppResult<usize> {
        let path = expand_tilde(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }

        let window = match range {
            Some(r) => parse_range(r)?,
            None => None,
        };

        let sessions = pool.list_sessions(SessionOrder::StartTimeAsc)?;
        let rows = to_rows(&sessions, window.as_ref());

        if rows.is_empty() {
            warning("No sessions found for the selected range. Nothing to export.");
            return Ok(0);
        }

        ensure_writable(&path, force)?;

        match format {
            ExportFormat::Csv => export_csv(&rows, &path)?,
            ExportFormat::Json => export_json(&rows, &path)?,
        }

        Ok(rows.len())
    }
}
