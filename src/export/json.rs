use crate::errors::AppResult;
use crate::export::RoundExport;
use std::io::Write;

/// Pretty-printed JSON array of rows.
pub fn write_json<W: Write>(mut out: W, rows: &[RoundExport]) -> AppResult<()> {
    serde_json::to_writer_pretty(&mut out, rows)?;
    out.flush()?;
    Ok(())
}
