//! Best-effort reading of the model's `Flags` / `Explanation` / `Confidence`
//! answer. The raw text is what callers receive; this view only feeds logs and
//! metrics, so anything that does not match the format is tolerated.

use std::fmt;

/// Confidence rating the model attached to its answer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Confidence {
    High,
    Medium,
    Low,
    #[default]
    Unknown,
}

impl Confidence {
    fn parse(value: &str) -> Self {
        let value = value.to_ascii_lowercase();
        if value.contains("high") {
            Confidence::High
        } else if value.contains("medium") {
            Confidence::Medium
        } else if value.contains("low") {
            Confidence::Low
        } else {
            Confidence::Unknown
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
            Confidence::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisReport {
    pub flags: Vec<String>,
    pub explanation: String,
    pub confidence: Confidence,
}

impl AnalysisReport {
    pub fn parse(answer: &str) -> Self {
        let mut report = AnalysisReport::default();

        for line in answer.lines().map(str::trim) {
            if let Some(rest) = line.strip_prefix("Flags:") {
                report.flags = parse_flags(rest);
            } else if let Some(rest) = line.strip_prefix("Explanation:") {
                report.explanation = rest.trim().to_string();
            } else if let Some(rest) = line.strip_prefix("Confidence:") {
                report.confidence = Confidence::parse(rest);
            }
        }

        report
    }
}

/// `[ 'A', "B", C ]` -> `["A", "B", "C"]`. "None" means no flags.
fn parse_flags(raw: &str) -> Vec<String> {
    let inner = raw
        .trim()
        .trim_start_matches('[')
        .trim_end_matches(']');

    inner
        .split(',')
        .map(|flag| flag.trim().trim_matches(|c: char| c == '\'' || c == '"').trim())
        .filter(|flag| !flag.is_empty() && !flag.eq_ignore_ascii_case("none"))
        .map(str::to_string)
        .collect()
}
