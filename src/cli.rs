//! Command-line interface.
//!
//! Run with text to create one reminder and exit, or with no text for an
//! interactive session where you can keep typing reminders at the market.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// A terminal client for natural-language stock reminders.
///
/// Type a sentence like "Alert me when NVDA goes above $500" and remindtop
/// asks the dashboard backend's LLM to turn it into a structured reminder.
/// If the backend is unreachable, a local regex grammar does the parsing
/// instead, so reminder creation works offline too.
#[derive(Parser, Debug, Clone)]
#[command(name = "remindtop")]
#[command(author = "Thomas Vincent")]
#[command(version)]
#[command(about = "Natural-language stock reminders in your terminal", long_about = None)]
pub struct Args {
    /// Reminder text. When given, creates one reminder and exits.
    ///
    /// Example: remindtop Remind me to buy AAPL below $170
    #[arg(trailing_var_arg = true)]
    pub text: Vec<String>,

    /// Backend base URL hosting POST /reminders/parse
    #[arg(short = 'e', long, env = "REMINDTOP_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Configuration file path
    #[arg(short = 'c', long, env = "REMINDTOP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Write a commented sample config to the default location and exit
    #[arg(long)]
    pub init_config: bool,

    /// Seed the session with showcase reminders and an unread alert
    #[arg(long)]
    pub demo: bool,

    /// Skip the remote parser entirely and use the local grammar
    ///
    /// Handy for air-gapped use and for seeing exactly what the regex
    /// fallback would have done.
    #[arg(long)]
    pub offline: bool,

    /// Print the reminder list in the given format before exiting
    /// (one-shot mode only)
    #[arg(long, value_enum)]
    pub export: Option<ExportFormat>,

    /// Hide non-active reminders in listings
    #[arg(long)]
    pub no_past: bool,

    /// Print absolute timestamps instead of relative ages
    #[arg(long)]
    pub absolute_times: bool,

    /// Verbose output - show what the parser is doing
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

/// Export format for data output.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// Plain text format
    Text,
    /// Comma-separated values (CSV)
    Csv,
    /// JavaScript Object Notation (JSON)
    Json,
}

impl From<ExportFormat> for crate::export::ExportFormat {
    fn from(format: ExportFormat) -> Self {
        match format {
            ExportFormat::Text => crate::export::ExportFormat::Text,
            ExportFormat::Csv => crate::export::ExportFormat::Csv,
            ExportFormat::Json => crate::export::ExportFormat::Json,
        }
    }
}

impl Args {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Args::parse()
    }

    /// The one-shot reminder text, if any was given.
    pub fn one_shot_text(&self) -> Option<String> {
        if self.text.is_empty() {
            None
        } else {
            Some(self.text.join(" "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_args() {
        let args = Args::parse_from(["remindtop"]);
        assert!(args.text.is_empty());
        assert!(args.one_shot_text().is_none());
        assert!(!args.demo);
        assert!(!args.offline);
    }

    #[test]
    fn test_one_shot_text_joins_words() {
        let args = Args::parse_from(["remindtop", "AAPL", "above", "$200"]);
        assert_eq!(args.one_shot_text().as_deref(), Some("AAPL above $200"));
    }

    #[test]
    fn test_endpoint_flag() {
        let args = Args::parse_from(["remindtop", "-e", "http://localhost:9000"]);
        assert_eq!(args.endpoint.as_deref(), Some("http://localhost:9000"));
    }

    #[test]
    fn test_export_format() {
        let args = Args::parse_from(["remindtop", "--export", "json", "NVDA", "above", "500"]);
        assert!(matches!(args.export, Some(ExportFormat::Json)));
        assert_eq!(args.text, vec!["NVDA", "above", "500"]);
    }
}
