use std::io::Write;

use subaudit_core::ParseResult;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

const REPORT_HEADER: [&str; 5] = ["Service", "Date", "Category", "Amount", "Status"];

/// Every detected charge is reported as active; there is no cancellation data.
const STATUS_ACTIVE: &str = "Active";

/// Writes one line per detected subscription, in detection order.
pub fn write_csv_report<W: Write>(result: &ParseResult, writer: W) -> Result<(), ExportError> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(REPORT_HEADER)?;
    for sub in &result.subscriptions {
        let amount = format!("{:.2}", sub.amount.value());
        out.write_record([
            sub.description.as_str(),
            sub.date.as_str(),
            sub.category.label(),
            amount.as_str(),
            STATUS_ACTIVE,
        ])?;
    }
    out.flush()?;
    Ok(())
}

pub fn write_json_report<W: Write>(result: &ParseResult, writer: W) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(writer, result)?;
    Ok(())
}
