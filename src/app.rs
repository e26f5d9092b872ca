//! Application state and logic.
//!
//! Holds the session's reminders and alerts, and coordinates the two-stage
//! parse: ask the backend's LLM first, fall back to the local regex grammar
//! when the backend can't be reached.

use crate::api::ParseClient;
use crate::cli::Args;
use crate::config::Config;
use crate::models::{Reminder, ReminderStatus};
use crate::parser;
use crate::store::ReminderStore;
use anyhow::Result;
use chrono::{Duration, Utc};

/// Application state.
pub struct App {
    /// The session's reminders and alerts
    pub store: ReminderStore,
    /// Client for the backend parse endpoint
    client: ParseClient,
    /// Never call the backend; always use the local grammar
    pub offline: bool,
    /// Show non-active reminders in listings
    pub show_past: bool,
    /// Show the stats footer
    pub show_stats: bool,
    /// Absolute timestamps instead of ages
    pub absolute_times: bool,
    /// Is the session running
    pub running: bool,
    /// Verbose mode
    pub verbose: bool,
    /// Pending user-facing notices (the toast queue, basically)
    notices: Vec<String>,
}

impl App {
    /// Create a new application from CLI args and config.
    pub fn new(args: &Args, config: &Config) -> Result<Self> {
        let base_url = args
            .endpoint
            .clone()
            .unwrap_or_else(|| config.api.base_url.clone());
        let client = ParseClient::new(&base_url)?;

        Ok(Self {
            store: ReminderStore::new(),
            client,
            offline: args.offline,
            show_past: config.display.show_past && !args.no_past,
            show_stats: config.display.show_stats,
            absolute_times: config.display.absolute_times || args.absolute_times,
            running: true,
            verbose: args.verbose,
            notices: Vec::new(),
        })
    }

    /// Create a reminder from natural-language text.
    ///
    /// Tries the backend parser first and the local grammar second; a dead
    /// network is never an error from the user's point of view. The only
    /// way to walk away without a reminder is text with no recognizable
    /// ticker, and that gets a notice, not a failure.
    pub async fn create_reminder(&mut self, text: &str) -> Result<()> {
        let text = text.trim();
        if text.is_empty() {
            self.notice("Reminder text cannot be empty.");
            return Ok(());
        }

        let parsed = if self.offline {
            parser::extract(text)
        } else {
            match self.client.parse(text).await {
                Ok(parsed) => parsed,
                Err(e) => {
                    if self.verbose {
                        eprintln!("Warning: {}; using local extraction", e);
                    }
                    parser::extract(text)
                }
            }
        };

        let Some(ticker) = parsed.ticker.clone() else {
            self.notice("Could not parse reminder. Please try again with a stock ticker.");
            return Ok(());
        };

        let source = parsed.source;
        let id = self.store.next_reminder_id();
        self.store.add(Reminder {
            id,
            original_text: text.to_string(),
            ticker: ticker.clone(),
            company_name: parsed
                .company_name
                .clone()
                .or_else(|| parser::company_name(&ticker).map(str::to_string)),
            action: parsed
                .action
                .clone()
                .unwrap_or_else(|| "Review and take action".to_string()),
            condition: parsed.condition(),
            status: ReminderStatus::Active,
            created_at: Utc::now(),
            triggered_at: None,
            current_price: parsed.current_price,
        });

        self.notice(format!(
            "Reminder #{} created for {} (source: {})",
            id, ticker, source
        ));
        Ok(())
    }

    /// Cancel a reminder by id.
    pub fn cancel_reminder(&mut self, id: u64) {
        if self.store.cancel(id) {
            self.notice(format!("Reminder #{} cancelled", id));
        } else {
            self.notice(format!("No active reminder #{}", id));
        }
    }

    /// Delete a reminder and its alerts by id.
    pub fn delete_reminder(&mut self, id: u64) {
        if self.store.delete(id) {
            self.notice(format!("Reminder #{} deleted", id));
        } else {
            self.notice(format!("No reminder #{}", id));
        }
    }

    /// Simulate the external price watcher reporting a condition as met.
    pub fn trigger_reminder(&mut self, id: u64, price: Option<f64>) {
        if self.store.trigger(id, price, Utc::now()) {
            self.notice(format!("Reminder #{} triggered", id));
        } else {
            self.notice(format!("No active reminder #{}", id));
        }
    }

    /// Mark an alert as read.
    pub fn read_alert(&mut self, id: u64) {
        if !self.store.mark_alert_read(id) {
            self.notice(format!("No alert #{}", id));
        }
    }

    /// Dismiss an alert.
    pub fn dismiss_alert(&mut self, id: u64) {
        if self.store.dismiss_alert(id) {
            self.notice(format!("Alert #{} dismissed", id));
        } else {
            self.notice(format!("No alert #{}", id));
        }
    }

    /// Queue a user-facing notice.
    fn notice(&mut self, message: impl Into<String>) {
        self.notices.push(message.into());
    }

    /// Drain pending notices for rendering.
    pub fn take_notices(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notices)
    }

    /// Quit the session.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Preload the showcase reminders and one unread alert.
    ///
    /// Same three reminders the dashboard shipped as demo data; prices are
    /// made up fresh each run, just like the original's random quote stub.
    pub fn seed_demo(&mut self) {
        use crate::models::{Condition, ConditionType};
        use rand::Rng;

        let mut rng = rand::thread_rng();
        let mut mock_price = || (rng.gen_range(100.0..500.0) * 100.0_f64).round() / 100.0;
        let now = Utc::now();

        let tsla_price = mock_price();
        let tsla_id = self.store.next_reminder_id();
        self.store.add(Reminder {
            id: tsla_id,
            original_text: "Notify me if TSLA drops 5% from current price".to_string(),
            ticker: "TSLA".to_string(),
            company_name: Some("Tesla, Inc.".to_string()),
            action: "Review position and consider adding".to_string(),
            condition: Condition {
                condition_type: ConditionType::PercentChange,
                target_price: None,
                percent_change: Some(-5.0),
                trigger_time: None,
                notes: None,
            },
            status: ReminderStatus::Active,
            created_at: now - Duration::days(3),
            triggered_at: None,
            current_price: Some(tsla_price),
        });

        let nvda_id = self.store.next_reminder_id();
        self.store.add(Reminder {
            id: nvda_id,
            original_text: "Alert me when NVDA goes above $500".to_string(),
            ticker: "NVDA".to_string(),
            company_name: Some("NVIDIA Corporation".to_string()),
            action: "Consider selling partial position".to_string(),
            condition: Condition {
                condition_type: ConditionType::PriceAbove,
                target_price: Some(500.0),
                percent_change: None,
                trigger_time: None,
                notes: None,
            },
            status: ReminderStatus::Active,
            created_at: now - Duration::days(2),
            triggered_at: None,
            current_price: None,
        });
        self.store
            .trigger(nvda_id, Some(512.30), now - Duration::hours(1));

        let aapl_price = mock_price();
        let aapl_id = self.store.next_reminder_id();
        self.store.add(Reminder {
            id: aapl_id,
            original_text: "Remind me to buy AAPL if the price drops below $170".to_string(),
            ticker: "AAPL".to_string(),
            company_name: Some("Apple Inc.".to_string()),
            action: "Buy shares".to_string(),
            condition: Condition {
                condition_type: ConditionType::PriceBelow,
                target_price: Some(170.0),
                percent_change: None,
                trigger_time: None,
                notes: None,
            },
            status: ReminderStatus::Active,
            created_at: now - Duration::days(1),
            triggered_at: None,
            current_price: Some(aapl_price),
        });

        self.notice("Demo data loaded: 3 reminders, 1 unread alert");
    }
}
