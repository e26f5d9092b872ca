//! In-memory session store for reminders and their alerts.
//!
//! Newest-first, no persistence: the list lives exactly as long as the
//! session, the way the dashboard page it replaces kept its state.

use crate::models::{Alert, ConditionType, Reminder, ReminderStatus};
use chrono::{DateTime, Utc};

/// Ordered collections of reminders and alerts, plus the id counters.
#[derive(Debug, Default)]
pub struct ReminderStore {
    /// Reminders, newest first
    reminders: Vec<Reminder>,
    /// Alerts derived from triggered reminders, newest first
    alerts: Vec<Alert>,
    next_reminder_id: u64,
    next_alert_id: u64,
}

impl ReminderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out the next reminder id, in creation order.
    pub fn next_reminder_id(&mut self) -> u64 {
        self.next_reminder_id += 1;
        self.next_reminder_id
    }

    /// Add a reminder at the front of the list.
    pub fn add(&mut self, reminder: Reminder) {
        self.reminders.insert(0, reminder);
    }

    /// Cancel an active reminder. Returns false if the id is unknown or the
    /// reminder is no longer active.
    pub fn cancel(&mut self, id: u64) -> bool {
        match self.reminders.iter_mut().find(|r| r.id == id) {
            Some(r) if r.status == ReminderStatus::Active => {
                r.status = ReminderStatus::Cancelled;
                true
            }
            _ => false,
        }
    }

    /// Remove a reminder entirely, along with any alerts that reference it.
    pub fn delete(&mut self, id: u64) -> bool {
        let before = self.reminders.len();
        self.reminders.retain(|r| r.id != id);
        let removed = self.reminders.len() < before;
        if removed {
            self.alerts.retain(|a| a.reminder_id != id);
        }
        removed
    }

    /// Report an active reminder's condition as met.
    ///
    /// This is the entry point for whatever watches prices; the store itself
    /// never compares anything. Moves the reminder to `triggered`, records
    /// the price, and derives an unread alert. Returns false if the reminder
    /// is missing or not active.
    pub fn trigger(&mut self, id: u64, current_price: Option<f64>, now: DateTime<Utc>) -> bool {
        let Some(reminder) = self
            .reminders
            .iter_mut()
            .find(|r| r.id == id && r.status == ReminderStatus::Active)
        else {
            return false;
        };

        reminder.status = ReminderStatus::Triggered;
        reminder.triggered_at = Some(now);
        if current_price.is_some() {
            reminder.current_price = current_price;
        }

        let message = trigger_message(reminder);
        self.next_alert_id += 1;
        self.alerts.insert(
            0,
            Alert {
                id: self.next_alert_id,
                reminder_id: reminder.id,
                ticker: reminder.ticker.clone(),
                message,
                triggered_at: now,
                is_read: false,
            },
        );

        true
    }

    /// Mark an alert as read.
    pub fn mark_alert_read(&mut self, id: u64) -> bool {
        match self.alerts.iter_mut().find(|a| a.id == id) {
            Some(a) => {
                a.is_read = true;
                true
            }
            None => false,
        }
    }

    /// Remove an alert. The reminder it points at is untouched.
    pub fn dismiss_alert(&mut self, id: u64) -> bool {
        let before = self.alerts.len();
        self.alerts.retain(|a| a.id != id);
        self.alerts.len() < before
    }

    pub fn get(&self, id: u64) -> Option<&Reminder> {
        self.reminders.iter().find(|r| r.id == id)
    }

    pub fn reminders(&self) -> &[Reminder] {
        &self.reminders
    }

    /// Reminders still waiting on their condition.
    pub fn active(&self) -> impl Iterator<Item = &Reminder> {
        self.reminders
            .iter()
            .filter(|r| r.status == ReminderStatus::Active)
    }

    /// Everything no longer active: triggered, expired, or cancelled.
    pub fn past(&self) -> impl Iterator<Item = &Reminder> {
        self.reminders
            .iter()
            .filter(|r| r.status != ReminderStatus::Active)
    }

    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    pub fn unread_alerts(&self) -> impl Iterator<Item = &Alert> {
        self.alerts.iter().filter(|a| !a.is_read)
    }

    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    pub fn triggered_count(&self) -> usize {
        self.reminders
            .iter()
            .filter(|r| r.status == ReminderStatus::Triggered)
            .count()
    }

    pub fn unread_count(&self) -> usize {
        self.unread_alerts().count()
    }
}

/// Compose the alert message for a freshly triggered reminder.
fn trigger_message(reminder: &Reminder) -> String {
    let mut message = match reminder.condition.condition_type {
        ConditionType::PriceAbove => format!(
            "{} has risen above ${:.2}!",
            reminder.ticker,
            reminder.condition.target_price.unwrap_or(0.0)
        ),
        ConditionType::PriceBelow => format!(
            "{} has fallen below ${:.2}!",
            reminder.ticker,
            reminder.condition.target_price.unwrap_or(0.0)
        ),
        ConditionType::PercentChange => format!(
            "{} has moved {:+.1}%!",
            reminder.ticker,
            reminder.condition.percent_change.unwrap_or(0.0)
        ),
        _ => format!("{}: condition met ({}).", reminder.ticker, reminder.condition),
    };

    if let Some(price) = reminder.current_price {
        message.push_str(&format!(" Current price: ${:.2}.", price));
    }

    // "Consider selling" reads better mid-sentence in lowercase.
    let mut action = reminder.action.clone();
    if let Some(first) = action.get(0..1) {
        action.replace_range(0..1, &first.to_lowercase());
    }
    message.push_str(&format!(" You wanted to {}.", action));

    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Condition;

    fn make_reminder(store: &mut ReminderStore, ticker: &str, target: f64) -> u64 {
        let id = store.next_reminder_id();
        store.add(Reminder {
            id,
            original_text: format!("Alert me when {} goes above ${}", ticker, target),
            ticker: ticker.to_string(),
            company_name: None,
            action: "Consider selling".to_string(),
            condition: Condition {
                condition_type: ConditionType::PriceAbove,
                target_price: Some(target),
                percent_change: None,
                trigger_time: None,
                notes: None,
            },
            status: ReminderStatus::Active,
            created_at: Utc::now(),
            triggered_at: None,
            current_price: None,
        });
        id
    }

    #[test]
    fn test_newest_first_order() {
        let mut store = ReminderStore::new();
        make_reminder(&mut store, "AAPL", 200.0);
        make_reminder(&mut store, "NVDA", 500.0);

        let tickers: Vec<&str> = store.reminders().iter().map(|r| r.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["NVDA", "AAPL"]);
    }

    #[test]
    fn test_ids_increase_in_creation_order() {
        let mut store = ReminderStore::new();
        let a = make_reminder(&mut store, "AAPL", 200.0);
        let b = make_reminder(&mut store, "NVDA", 500.0);
        assert!(b > a);
    }

    #[test]
    fn test_cancel_only_touches_active() {
        let mut store = ReminderStore::new();
        let id = make_reminder(&mut store, "AAPL", 200.0);

        assert!(store.cancel(id));
        assert_eq!(store.get(id).unwrap().status, ReminderStatus::Cancelled);

        // Already cancelled; a second cancel is a no-op.
        assert!(!store.cancel(id));
        assert!(!store.cancel(999));
    }

    #[test]
    fn test_trigger_creates_unread_alert() {
        let mut store = ReminderStore::new();
        let id = make_reminder(&mut store, "NVDA", 500.0);

        assert!(store.trigger(id, Some(512.30), Utc::now()));

        let reminder = store.get(id).unwrap();
        assert_eq!(reminder.status, ReminderStatus::Triggered);
        assert!(reminder.triggered_at.is_some());
        assert_eq!(reminder.current_price, Some(512.30));

        assert_eq!(store.alerts().len(), 1);
        let alert = &store.alerts()[0];
        assert_eq!(alert.reminder_id, id);
        assert!(!alert.is_read);
        assert_eq!(
            alert.message,
            "NVDA has risen above $500.00! Current price: $512.30. You wanted to consider selling."
        );
    }

    #[test]
    fn test_trigger_requires_active() {
        let mut store = ReminderStore::new();
        let id = make_reminder(&mut store, "AAPL", 200.0);
        store.cancel(id);

        assert!(!store.trigger(id, None, Utc::now()));
        assert!(store.alerts().is_empty());
    }

    #[test]
    fn test_delete_cascades_to_alerts() {
        let mut store = ReminderStore::new();
        let id = make_reminder(&mut store, "NVDA", 500.0);
        let other = make_reminder(&mut store, "AAPL", 200.0);
        store.trigger(id, Some(512.0), Utc::now());
        store.trigger(other, Some(210.0), Utc::now());

        assert!(store.delete(id));
        assert!(store.get(id).is_none());
        assert_eq!(store.alerts().len(), 1);
        assert_eq!(store.alerts()[0].reminder_id, other);

        assert!(!store.delete(id));
    }

    #[test]
    fn test_mark_read_and_dismiss() {
        let mut store = ReminderStore::new();
        let id = make_reminder(&mut store, "NVDA", 500.0);
        store.trigger(id, None, Utc::now());
        let alert_id = store.alerts()[0].id;

        assert_eq!(store.unread_count(), 1);
        assert!(store.mark_alert_read(alert_id));
        assert_eq!(store.unread_count(), 0);

        assert!(store.dismiss_alert(alert_id));
        assert!(store.alerts().is_empty());
        // Dismissing an alert never touches the reminder itself.
        assert_eq!(store.get(id).unwrap().status, ReminderStatus::Triggered);
    }

    #[test]
    fn test_active_past_partition() {
        let mut store = ReminderStore::new();
        let a = make_reminder(&mut store, "AAPL", 200.0);
        let b = make_reminder(&mut store, "NVDA", 500.0);
        make_reminder(&mut store, "TSLA", 300.0);
        store.cancel(a);
        store.trigger(b, None, Utc::now());

        assert_eq!(store.active_count(), 1);
        assert_eq!(store.past().count(), 2);
        assert_eq!(store.triggered_count(), 1);
    }
}
