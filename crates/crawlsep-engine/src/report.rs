//! Summary reporting.
//!
//! This module provides formatters for evaluation summaries.

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

use crate::summary::Summary;

/// Trait for reporting evaluation summaries.
pub trait Reporter {
    /// Writes a summary to `out`.
    ///
    /// # Errors
    ///
    /// Returns an IO error if writing to output fails.
    fn report(&self, summary: &Summary, out: &mut dyn Write) -> io::Result<()>;

    /// Renders a summary to a string.
    ///
    /// # Errors
    ///
    /// Returns an IO error if the reporter fails to encode the summary.
    fn render(&self, summary: &Summary) -> io::Result<String> {
        let mut buffer = Vec::new();
        self.report(summary, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

/// Plain-text reporter.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextReporter;

impl Reporter for TextReporter {
    fn report(&self, summary: &Summary, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "Site: {}", summary.site)?;
        writeln!(out, "Groups: {}", summary.groups.join(", "))?;
        writeln!(
            out,
            "Separation OK: {}",
            if summary.separation_ok { "yes" } else { "no" }
        )?;
        if !summary.separation_ok {
            writeln!(out, "Overlaps:")?;
            for overlap in &summary.overlaps {
                writeln!(
                    out,
                    "- {} + {}: {}",
                    overlap.group_a,
                    overlap.group_b,
                    overlap.agents.join(", ")
                )?;
            }
        }
        writeln!(out, "Fairness score: {}", summary.fairness_score)?;
        writeln!(out, "Breakdown:")?;
        writeln!(out, "- separation: {}", summary.breakdown.separation)?;
        writeln!(out, "- explicitTraining: {}", summary.breakdown.explicit_training)?;
        writeln!(out, "- parity: {}", summary.breakdown.parity)
    }
}

/// Pretty-printed JSON reporter.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonReporter;

impl Reporter for JsonReporter {
    fn report(&self, summary: &Summary, out: &mut dyn Write) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *out, summary)?;
        writeln!(out)
    }
}

/// Output format of an evaluation report.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

impl OutputFormat {
    /// Returns the reporter for this format.
    #[must_use]
    pub fn reporter(self) -> Box<dyn Reporter> {
        match self {
            Self::Text => Box::new(TextReporter),
            Self::Json => Box::new(JsonReporter),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format '{other}' (expected text or json)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::separation::Overlap;
    use crate::summarize_policy;
    use crawlsep_core::{Policy, Rule};

    fn summary(overlapping: bool) -> Summary {
        let training = if overlapping {
            vec!["Googlebot", "Google-Extended"]
        } else {
            vec!["Google-Extended"]
        };
        let policy = Policy::new("example.com")
            .with_group("indexing", ["Googlebot", "Bingbot"])
            .with_group("training", training)
            .with_rule(Rule::new("indexing").with_allow(["/"]).with_disallow(["/private"]))
            .with_rule(Rule::new("training").with_allow(["/public"]).with_disallow(["/"]));
        summarize_policy(&policy)
    }

    #[test]
    fn test_text_report() {
        let text = TextReporter.render(&summary(false)).unwrap();
        assert_eq!(
            text,
            "Site: example.com\n\
             Groups: indexing, training\n\
             Separation OK: yes\n\
             Fairness score: 100\n\
             Breakdown:\n\
             - separation: 40\n\
             - explicitTraining: 40\n\
             - parity: 20\n"
        );
    }

    #[test]
    fn test_text_report_lists_overlaps() {
        let mut summary = summary(true);
        assert!(!summary.separation_ok);
        summary.overlaps.push(Overlap {
            group_a: "training".to_owned(),
            group_b: "other".to_owned(),
            agents: vec!["CCBot".to_owned(), "GPTBot".to_owned()],
        });

        let text = TextReporter.render(&summary).unwrap();
        assert!(text.contains(
            "Separation OK: no\nOverlaps:\n- indexing + training: Googlebot\n- training + other: CCBot, GPTBot\nFairness score: 60\n"
        ));
    }

    #[test]
    fn test_json_report() {
        let rendered = JsonReporter.render(&summary(false)).unwrap();
        assert!(rendered.starts_with("{\n  \"site\": \"example.com\",\n  \"groups\": [\n"));
        assert!(rendered.contains("\"separationOk\": true"));
        assert!(rendered.contains("\"overlaps\": [],"));
        assert!(rendered.ends_with("}\n"));

        let parsed: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed["fairnessScore"], 100);
        assert_eq!(parsed["groupRules"]["training"]["disallow"][0], "/");
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("TEXT".parse::<OutputFormat>(), Ok(OutputFormat::Text));
        assert!("yaml".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::default(), OutputFormat::Text);
        assert_eq!(OutputFormat::Json.to_string(), "json");
    }

    #[test]
    fn test_reporter_for_format() {
        let summary = summary(false);
        let text = OutputFormat::Text.reporter().render(&summary).unwrap();
        let json = OutputFormat::Json.reporter().render(&summary).unwrap();
        assert!(text.starts_with("Site: "));
        assert!(json.starts_with('{'));
    }
}
