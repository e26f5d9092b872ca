//! Plain-text rendering of reminders, alerts, and notices.
//!
//! No TUI here, just honest columns on stdout, friendly to pipes and
//! screen readers alike.

use crate::app::App;
use crate::models::Reminder;
use chrono::{DateTime, Utc};

/// Render any queued notices (reminder created, cancelled, and so on).
pub fn render_notices(app: &mut App) {
    for notice in app.take_notices() {
        println!("* {}", notice);
    }
}

/// Render the reminder list as a table.
pub fn render_reminders(app: &App) {
    // Active reminders first, then the triggered/expired/cancelled tail.
    let mut reminders: Vec<&Reminder> = app.store.active().collect();
    if app.show_past {
        reminders.extend(app.store.past());
    }

    if reminders.is_empty() {
        println!("No reminders yet. Type one, like: Alert me when NVDA goes above $500");
        return;
    }

    println!(
        "{:<4} {:<6} {:<22} {:<26} {:<9} {:<12} {:>10}",
        "ID", "TICKER", "COMPANY", "CONDITION", "STATUS", "CREATED", "PRICE"
    );
    println!("{}", "-".repeat(96));

    let now = Utc::now();
    for r in reminders {
        let price = r
            .current_price
            .map(|p| format!("${:.2}", p))
            .unwrap_or_else(|| "-".to_string());

        println!(
            "{:<4} {:<6} {:<22} {:<26} {:<9} {:<12} {:>10}",
            r.id,
            r.ticker,
            truncate_string(r.display_name(), 22),
            truncate_string(&r.condition.to_string(), 26),
            r.status.to_string(),
            format_time(r.created_at, now, app.absolute_times),
            price,
        );
    }

    if app.show_stats {
        println!();
        render_stats(app);
    }
}

/// Render the alerts panel.
pub fn render_alerts(app: &App) {
    let alerts = app.store.alerts();
    if alerts.is_empty() {
        println!("No alerts. Your conditions are still waiting on the market.");
        return;
    }

    let now = Utc::now();
    for alert in alerts {
        let marker = if alert.is_read { " " } else { "*" };
        println!(
            "{}[{}] {} ({})",
            marker,
            alert.id,
            alert.message,
            format_time(alert.triggered_at, now, app.absolute_times),
        );
    }
}

/// Render one reminder in full.
pub fn render_reminder_detail(app: &App, id: u64) {
    let Some(r) = app.store.get(id) else {
        println!("No reminder #{}", id);
        return;
    };

    let now = Utc::now();
    println!("Reminder #{} - {} ({})", r.id, r.ticker, r.display_name());
    println!("  Text:      {}", r.original_text);
    println!("  Condition: {}", r.condition);
    println!("  Action:    {}", r.action);
    println!("  Status:    {}", r.status);
    println!(
        "  Created:   {}",
        format_time(r.created_at, now, app.absolute_times)
    );
    if let Some(t) = r.triggered_at {
        println!("  Triggered: {}", format_time(t, now, app.absolute_times));
    }
    if let Some(p) = r.current_price {
        println!("  Price:     ${:.2}", p);
    }
}

/// Render the stats footer: the session's quick numbers.
pub fn render_stats(app: &App) {
    println!(
        "active: {}  triggered: {}  unread alerts: {}",
        app.store.active_count(),
        app.store.triggered_count(),
        app.store.unread_count()
    );
}

/// Render the interactive session's command help.
pub fn render_help() {
    println!("Commands:");
    println!("  <any text>          create a reminder from that text");
    println!("  list                show all reminders");
    println!("  alerts              show alerts (* = unread)");
    println!("  show <id>           show one reminder in full");
    println!("  cancel <id>         cancel an active reminder");
    println!("  delete <id>         delete a reminder and its alerts");
    println!("  read <id>           mark an alert as read");
    println!("  dismiss <id>        remove an alert");
    println!("  trigger <id> [px]   simulate the price watcher firing");
    println!("  export [text|csv|json]  dump the reminder list");
    println!("  help                this text");
    println!("  quit                exit");
}

/// Format a timestamp as either an age ("2h ago") or an absolute time.
pub fn format_time(t: DateTime<Utc>, now: DateTime<Utc>, absolute: bool) -> String {
    if absolute {
        return t.format("%Y-%m-%d %H:%M").to_string();
    }
    format_age(t, now)
}

/// "2h ago" style age, rounded down to the largest sensible unit.
fn format_age(t: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - t).num_seconds().max(0) as u64;
    let rounded = match secs {
        0..60 => secs,
        60..3600 => secs - secs % 60,
        3600..86400 => secs - secs % 3600,
        _ => secs - secs % 86400,
    };
    format!(
        "{} ago",
        humantime::format_duration(std::time::Duration::from_secs(rounded))
    )
}

/// Truncate a string to a maximum number of characters.
fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("short", 10), "short");
        assert_eq!(truncate_string("a longer string here", 10), "a longe...");
    }

    #[test]
    fn test_format_age_units() {
        let now = Utc::now();
        assert_eq!(format_age(now - Duration::seconds(5), now), "5s ago");
        assert_eq!(format_age(now - Duration::seconds(125), now), "2m ago");
        assert_eq!(format_age(now - Duration::hours(2), now), "2h ago");
    }

    #[test]
    fn test_format_age_never_negative() {
        let now = Utc::now();
        let future = now + Duration::seconds(30);
        assert_eq!(format_age(future, now), "0s ago");
    }

    #[test]
    fn test_format_time_absolute() {
        let now = Utc::now();
        let formatted = format_time(now, now, true);
        assert!(formatted.contains('-'));
        assert!(!formatted.contains("ago"));
    }
}
