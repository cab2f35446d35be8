//! CSV export for ranked windows.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::window::score::ScoredWindow;

/// Schema v1 column header for the windows CSV export.
const HEADER: &str = "start_hr,end_hr,renewable_pct,carbon_intensity_kg_per_kwh,\
                      price_per_mwh,spot_price_per_hr,score,recommendation";

/// Exports scored windows to a CSV file at the given path.
///
/// Writes a header row followed by one row per window in the order given.
/// Output is deterministic for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(windows: &[ScoredWindow], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(windows, buf)
}

/// Writes scored windows as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(windows: &[ScoredWindow], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(',').map(str::trim))?;

    for w in windows {
        wtr.write_record(&[
            format!("{:.2}", w.slot.start_hr),
            format!("{:.2}", w.slot.end_hr),
            format!("{:.2}", w.slot.renewable_pct),
            format!("{:.4}", w.slot.carbon_intensity_kg_per_kwh),
            format!("{:.2}", w.slot.price_per_mwh),
            format!("{:.4}", w.slot.spot_price_per_hr),
            format!("{:.2}", w.score),
            w.recommendation.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
