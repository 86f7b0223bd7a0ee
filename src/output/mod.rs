//! Output formatting

pub mod human;
pub mod json;

use crate::cli::OutputFormat;
use crate::index::{Point, Source};
use crate::reindex::RebuildReport;

/// Format a rebuild summary for output
pub fn format_report(report: &RebuildReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Human => human::format_report(report),
        OutputFormat::Json => json::format(report),
    }
}

/// Format a source listing for output
pub fn format_sources(sources: &[&Source], format: OutputFormat) -> String {
    match format {
        OutputFormat::Human => human::format_sources(sources),
        OutputFormat::Json => json::format(&sources),
    }
}

/// Format a single point for output
pub fn format_point(source: &Source, point: &Point, format: OutputFormat) -> String {
    match format {
        OutputFormat::Human => human::format_point(source, point),
        OutputFormat::Json => json::format(point),
    }
}
