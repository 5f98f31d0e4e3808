//! CSV writers for sweep results.

use std::path::Path;

use csv::Writer;

use crate::{SiteTrace, SweepResult, SweepRow};

/// Write `rows` with a header line to `path`, creating parent directories.
pub fn write_rows(path: &Path, rows: &[SweepRow]) -> SweepResult<()> {
    create_parent(path)?;
    let mut writer = Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

impl SiteTrace {
    /// One line per step: `step, site_0, site_1, …`.
    pub fn write_csv(&self, path: &Path) -> SweepResult<()> {
        create_parent(path)?;
        let mut writer = Writer::from_path(path)?;
        let width = self.rows.first().map_or(0, Vec::len);
        let header =
            std::iter::once("step".to_string()).chain((0..width).map(|site| format!("site_{site}")));
        writer.write_record(header)?;
        for (k, row) in self.rows.iter().enumerate() {
            let record = std::iter::once((k + 1).to_string()).chain(row.iter().map(i32::to_string));
            writer.write_record(record)?;
        }
        writer.flush()?;
        Ok(())
    }
}

fn create_parent(path: &Path) -> SweepResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}
