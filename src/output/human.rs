//! Human-readable output formatting

use crate::index::{Point, Source};
use crate::reindex::RebuildReport;
use crate::tree::AttrValue;

/// Rebuild summary
pub fn format_report(report: &RebuildReport) -> String {
    let mut output = format!(
        "Reindex complete [{:.1}ms, {} sources, {} points]\n",
        report.elapsed_ms, report.sources, report.points
    );

    output.push_str(&format!(
        "  {} nodes scanned, {} skipped ({} unsupported, {} excluded, {} without parent)\n",
        report.nodes,
        report.skipped.total(),
        report.skipped.unsupported_control,
        report.skipped.excluded,
        report.skipped.no_parent
    ));

    if report.collisions > 0 {
        output.push_str(&format!(
            "  {} address collisions (later point kept)\n",
            report.collisions
        ));
    }

    if !report.errors.is_empty() {
        output.push_str(&format!("  {} nodes failed:\n", report.errors.len()));
        for err in &report.errors {
            output.push_str(&format!("    {}: {}\n", err.node, err.message));
        }
    }

    output
}

/// Source listing, one line per source
pub fn format_sources(sources: &[&Source]) -> String {
    if sources.is_empty() {
        return "No sources indexed.\n".to_string();
    }

    let width = sources.iter().map(|s| s.id.len()).max().unwrap_or(0);
    let mut output = String::new();
    for source in sources {
        output.push_str(&format!(
            "{:<width$}  {:>4} pts  {}\n",
            source.id,
            source.num_points(),
            source.path,
            width = width
        ));
    }
    output
}

/// Point detail
pub fn format_point(source: &Source, point: &Point) -> String {
    let mut output = format!("{} ({})\n", point.name, point.id);
    output.push_str(&format!("  source: {} [{}]\n", source.name, source.path));
    output.push_str(&format!("  addr:   {}\n", point.addr));
    if let Some(unit) = &point.unit {
        output.push_str(&format!("  unit:   {}\n", unit));
    }
    if let Some(enums) = &point.enums {
        output.push_str(&format!("  enums:  {}\n", enums.join(", ")));
    }
    output
}

/// Live point value
pub fn format_value(value: &AttrValue) -> String {
    match value {
        AttrValue::Bool(b) => b.to_string(),
        AttrValue::Number(n) => n.to_string(),
        AttrValue::Text(t) => t.clone(),
        AttrValue::Facets(f) => f
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(","),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reindex::NodeError;

    #[test]
    fn test_report_lists_failures() {
        let report = RebuildReport {
            sources: 1,
            points: 2,
            errors: vec![NodeError {
                node: "Bad [slot:/Logic/Bad]".to_string(),
                message: "Invalid handle: bogus".to_string(),
            }],
            ..RebuildReport::default()
        };
        let text = format_report(&report);
        assert!(text.starts_with("Reindex complete ["));
        assert!(text.contains("1 sources, 2 points"));
        assert!(text.contains("1 nodes failed"));
        assert!(text.contains("Invalid handle: bogus"));
        assert!(!text.contains("collisions"));
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(&AttrValue::Number(55.5)), "55.5");
        assert_eq!(format_value(&AttrValue::Bool(true)), "true");
    }

    #[test]
    fn test_empty_sources() {
        assert_eq!(format_sources(&[]), "No sources indexed.\n");
    }
}
