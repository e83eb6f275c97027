mod reader;
mod tree;
mod writer;

pub use reader::ReportReader;
pub use tree::Node;
pub use writer::{REPORT_FILENAME, ReportWriter};

/// Raw PageSpeed response. Kept as an untyped tree: only a handful of fields are
/// read, and everything else must survive verbatim for the download endpoint.
pub type RawReport = serde_json::Value;

/// Audits map under `lighthouseResult.audits`
pub fn audits(report: &RawReport) -> Node<'_> {
    Node::new(report).path(&["lighthouseResult", "audits"])
}
