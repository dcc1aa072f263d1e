use crate::core::registry::GroupRegistry;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::ensure_writable;
use crate::export::{self, ExportFormat, notify_export_success};
use crate::ui::messages::{info, warning};
use chrono::Utc;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// High-level export logic for the `export` command.
pub struct ExportLogic;

impl ExportLogic {
    /// Export rounds to `file`.
    ///
    /// - `format`: csv | json
    /// - `file`: absolute path of the output file
    /// - `group`: limit the export to one working group
    pub fn export(
        pool: &DbPool,
        format: ExportFormat,
        file: &Path,
        group: Option<i64>,
        force: bool,
    ) -> AppResult<usize> {
        if !file.is_absolute() {
            return Err(AppError::Export(format!(
                "Output file path must be absolute: {}",
                file.display()
            )));
        }

        if let Some(id) = group {
            GroupRegistry::get_group(pool, id)?;
        }

        ensure_writable(file, force)?;

        let rows = export::build_rows(pool, group, Utc::now())?;
        if rows.is_empty() {
            warning("No rounds found for the selected working group.");
        }

        info(format!(
            "Exporting {} round(s) to {}: {}",
            rows.len(),
            format.as_str().to_uppercase(),
            file.display()
        ));

        let out = BufWriter::new(File::create(file)?);
        match format {
            ExportFormat::Csv => export::csv::write_csv(out, &rows)?,
            ExportFormat::Json => export::json::write_json(out, &rows)?,
        }

        notify_export_success(&format.as_str().to_uppercase(), file);
        Ok(rows.len())
    }
}
