//! Terminal reporting and re-export formatting
//!
//! Keeps the CLI-facing presentation out of the orchestrator: summary
//! printing, JSON/CSV re-export of a previously exported results file.

use crate::models::ExportRecord;
use crate::{Result, ScrapeError};
use std::path::Path;

/// Prints a scrape summary to stdout in a formatted manner
pub fn print_summary(record: &ExportRecord) {
    let summary = &record.summary;

    println!("=== Scraping Summary ===\n");
    println!("  Total URLs:        {}", summary.total_urls);
    println!("  Successful:        {}", summary.successful);
    println!("  Failed:            {}", summary.failed);
    println!("  Total Messages:    {}", summary.total_messages);
    println!("  Success Rate:      {:.1}%", summary.success_rate);

    let failures: Vec<_> = record.results.iter().filter(|r| !r.success).collect();
    if !failures.is_empty() {
        println!("\nFailed URLs:");
        for outcome in failures {
            println!(
                "  - {} ({})",
                outcome.url,
                outcome.error.as_deref().unwrap_or("unknown error")
            );
        }
    }
}

/// Reads an export record from an arbitrary results file
pub fn read_record(path: &Path) -> Result<ExportRecord> {
    if !path.exists() {
        return Err(ScrapeError::NotFound(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path)?;
    let record = serde_json::from_str(&content)?;
    Ok(record)
}

/// Re-exports a record as pretty-printed JSON
pub fn write_json(record: &ExportRecord, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(record)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Re-exports a record's outcomes as CSV
///
/// Columns are the stable outcome fields: `url,success,messages_count,error`.
/// No csv crate in the dependency tree; the four fields are escaped by hand.
pub fn write_csv(record: &ExportRecord, path: &Path) -> Result<()> {
    let mut out = String::from("url,success,messages_count,error\n");

    for outcome in &record.results {
        out.push_str(&format!(
            "{},{},{},{}\n",
            csv_escape(&outcome.url),
            outcome.success,
            outcome.messages_count,
            csv_escape(outcome.error.as_deref().unwrap_or("")),
        ));
    }

    std::fs::write(path, out)?;
    Ok(())
}

/// Quotes a CSV field when it contains a comma, quote, or newline
fn csv_escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
