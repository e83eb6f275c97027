use super::RawReport;
use crate::{Error, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub struct ReportReader;

impl ReportReader {
    /// Read and parse a saved report from the given path
    pub fn from_file(path: &Path) -> Result<RawReport> {
        tracing::debug!("Reading report file from: {}", path.display());

        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let report: RawReport = serde_json::from_reader(reader)?;

        Self::validate(&report)?;
        tracing::info!("Successfully parsed report file {}", path.display());

        Ok(report)
    }

    /// Parse a report from a JSON string
    pub fn from_str(content: &str) -> Result<RawReport> {
        tracing::debug!("Parsing report from string");

        let report: RawReport = serde_json::from_str(content)?;
        Self::validate(&report)?;

        Ok(report)
    }

    /// A report must be a JSON object; a missing `lighthouseResult` is only
    /// worth a warning since extraction degrades to an empty digest
    pub fn validate(report: &RawReport) -> Result<()> {
        if !report.is_object() {
            return Err(Error::InvalidReport(
                "Input data must be a JSON object".to_string(),
            ));
        }

        if report.get("lighthouseResult").is_none() {
            tracing::warn!("Report contains no lighthouseResult");
        }

        Ok(())
    }
}
