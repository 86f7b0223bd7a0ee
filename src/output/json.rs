//! JSON output formatting

use serde::Serialize;

/// Format any serializable value as pretty JSON
pub fn format<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| format!(r#"{{"error": "Failed to serialize output: {}"}}"#, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reindex::RebuildReport;

    #[test]
    fn test_report_json() {
        let report = RebuildReport {
            generation: 3,
            sources: 2,
            points: 5,
            ..RebuildReport::default()
        };
        let value: serde_json::Value = serde_json::from_str(&format(&report)).unwrap();
        assert_eq!(value["generation"], 3);
        assert_eq!(value["points"], 5);
        assert_eq!(value["skipped"]["excluded"], 0);
    }
}
