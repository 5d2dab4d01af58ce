//! History entry representing a committed calculation.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One committed calculation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The expression as typed, with display glyphs.
    pub expression: String,
    /// The raw (unfolded) result text.
    pub result: String,
    /// When the calculation was committed.
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(expression: impl Into<String>, result: impl Into<String>) -> Self {
        Self::at(expression, result, Utc::now())
    }

    pub fn at(
        expression: impl Into<String>,
        result: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            expression: expression.into(),
            result: result.into(),
            timestamp,
        }
    }
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Date: {}", self.timestamp.format("%Y-%m-%d"))?;
        writeln!(f, "Time: {}", self.timestamp.format("%H:%M:%S"))?;
        writeln!(f, "Expression: {}", self.expression)?;
        write!(f, "Result: {}", self.result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_display_card() {
        let timestamp = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        let entry = HistoryEntry::at("12+3", "15", timestamp);
        assert_eq!(
            entry.to_string(),
            "Date: 2024-03-09\nTime: 14:05:07\nExpression: 12+3\nResult: 15"
        );
    }

    #[test]
    fn test_json_shape() {
        let timestamp = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        let entry = HistoryEntry::at("2√9", "6", timestamp);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["expression"], "2√9");
        assert_eq!(json["result"], "6");
        assert_eq!(json["timestamp"], "2024-03-09T14:05:07Z");
    }
}
