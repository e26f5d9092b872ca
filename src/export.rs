//! Data export functionality for accessibility and integration.
//!
//! Provides CSV, JSON, and plain text export of the reminder list.
//! Useful for screen readers, shell pipelines, and whatever spreadsheet
//! your investment committee insists on.

use crate::models::Reminder;

/// Export format type
#[derive(Debug, Clone, Copy)]
pub enum ExportFormat {
    Text,
    Csv,
    Json,
}

/// Export reminders in the specified format.
pub fn export_reminders(reminders: &[Reminder], format: ExportFormat) -> String {
    match format {
        ExportFormat::Text => export_text(reminders),
        ExportFormat::Csv => export_csv(reminders),
        ExportFormat::Json => export_json(reminders),
    }
}

/// Export as plain text (screen reader friendly).
fn export_text(reminders: &[Reminder]) -> String {
    let mut output = String::new();

    output.push_str("REMINDTOP DATA EXPORT\n");
    output.push_str("=====================\n\n");

    for r in reminders {
        output.push_str(&format!("Reminder: #{}\n", r.id));
        output.push_str(&format!("Ticker: {}\n", r.ticker));
        output.push_str(&format!("Company: {}\n", r.display_name()));
        output.push_str(&format!("Condition: {}\n", r.condition));
        output.push_str(&format!("Action: {}\n", r.action));
        output.push_str(&format!("Status: {}\n", r.status));
        output.push_str(&format!("Created: {}\n", r.created_at.to_rfc3339()));
        if let Some(t) = r.triggered_at {
            output.push_str(&format!("Triggered: {}\n", t.to_rfc3339()));
        }
        if let Some(p) = r.current_price {
            output.push_str(&format!("Price: ${:.2}\n", p));
        }
        output.push_str(&format!("Text: {}\n", r.original_text));
        output.push('\n');
    }

    output
}

/// Export as CSV.
fn export_csv(reminders: &[Reminder]) -> String {
    let mut output = String::new();

    output.push_str(
        "id,ticker,company,condition_type,target_price,percent_change,action,status,created_at,original_text\n",
    );

    for r in reminders {
        output.push_str(&format!(
            "{},{},{},{},{},{},{},{},{},{}\n",
            r.id,
            r.ticker,
            escape_csv(r.display_name()),
            r.condition.condition_type,
            r.condition
                .target_price
                .map(|p| p.to_string())
                .unwrap_or_default(),
            r.condition
                .percent_change
                .map(|p| p.to_string())
                .unwrap_or_default(),
            escape_csv(&r.action),
            r.status,
            r.created_at.to_rfc3339(),
            escape_csv(&r.original_text),
        ));
    }

    output
}

/// Export as JSON.
fn export_json(reminders: &[Reminder]) -> String {
    serde_json::to_string_pretty(reminders).unwrap_or_else(|_| "[]".to_string())
}

/// Escape a CSV field: quote it if it contains commas, quotes, or newlines.
fn escape_csv(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
