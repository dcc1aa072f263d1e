use crate::errors::AppResult;
use crate::export::RoundExport;
use std::io::Write;

/// Write rows as CSV (header row included) into any writer.
pub fn write_csv<W: Write>(out: W, rows: &[RoundExport]) -> AppResult<()> {
    let mut wtr = ::csv::Writer::from_writer(out);

    if rows.is_empty() {
        // serialize() only emits headers together with the first record.
        wtr.write_record(super::HEADERS)?;
    }

    for row in rows {
        wtr.serialize(row)?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn to_csv_bytes(rows: &[RoundExport]) -> AppResult<Vec<u8>> {
    let mut buf = Vec::new();
    write_csv(&mut buf, rows)?;
    Ok(buf)
}
