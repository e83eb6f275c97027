use super::RawReport;
use crate::Result;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Suggested attachment name for downloaded reports
pub const REPORT_FILENAME: &str = "lighthouse_report.json";

pub struct ReportWriter;

impl ReportWriter {
    /// Write the verbatim report as indented JSON
    pub fn to_file(report: &RawReport, path: &Path) -> Result<()> {
        tracing::debug!("Writing report file to: {}", path.display());

        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, report)?;

        tracing::info!("Successfully wrote report to {}", path.display());

        Ok(())
    }

    /// Convert the verbatim report to an indented JSON string
    pub fn to_string(report: &RawReport) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }
}
