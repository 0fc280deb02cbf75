//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use dirzip_core::ZipReport;
use serde::Serialize;
use std::io::Write;
use std::io::{self};
use std::path::Path;

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_zip_result(&self, source: &Path, output: &Path, report: &ZipReport) -> Result<()> {
        #[derive(Serialize)]
        struct ZipOutput {
            source: String,
            output_path: String,
            files_added: usize,
            directories_visited: usize,
            entries_skipped: usize,
            bytes_written: u64,
            duration_ms: u128,
        }

        let data = ZipOutput {
            source: source.display().to_string(),
            output_path: output.display().to_string(),
            files_added: report.files_added,
            directories_visited: report.directories_visited,
            entries_skipped: report.entries_skipped,
            bytes_written: report.bytes_written,
            duration_ms: report.duration.as_millis(),
        };

        Self::output(&JsonOutput::success("zip", data))
    }

    fn format_error(&self, error: &anyhow::Error) {
        let output = JsonOutput::<()>::error("zip", format!("{error:#}"));
        if Self::output(&output).is_err() {
            eprintln!("ERROR: {error:?}");
        }
    }
}
