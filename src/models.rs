//! Data models for reminders, parsed conditions, and alerts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Structured result of parsing a natural-language reminder.
///
/// This mirrors the `/reminders/parse` wire contract exactly; the same shape
/// comes back whether the backend used its LLM or its own regex fallback,
/// and the local extractor produces it too.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedCondition {
    /// Ticker symbol (1-5 uppercase letters), or None if extraction failed
    #[serde(default)]
    pub ticker: Option<String>,
    /// Full company name if known
    #[serde(default)]
    pub company_name: Option<String>,
    /// Suggested action ("Consider buying", "Consider selling", ...)
    #[serde(default)]
    pub action: Option<String>,
    /// What kind of trigger this reminder carries
    #[serde(default)]
    pub condition_type: ConditionType,
    /// Price threshold (price_above / price_below only)
    #[serde(default)]
    pub target_price: Option<f64>,
    /// Signed percentage; negative means decline (percent_change only)
    #[serde(default)]
    pub percent_change: Option<f64>,
    /// ISO-8601 timestamp (time_based only)
    #[serde(default)]
    pub trigger_time: Option<String>,
    /// Live price at parse time, if the backend looked one up
    #[serde(default)]
    pub current_price: Option<f64>,
    /// Free-text context; authoritative for custom conditions
    #[serde(default)]
    pub notes: Option<String>,
    /// Which extractor produced this result
    #[serde(default)]
    pub source: ParseSource,
}

impl ParsedCondition {
    /// Extract just the condition fields, for embedding in a Reminder.
    pub fn condition(&self) -> Condition {
        Condition {
            condition_type: self.condition_type,
            target_price: self.target_price,
            percent_change: self.percent_change,
            trigger_time: self.trigger_time.clone(),
            notes: self.notes.clone(),
        }
    }
}

/// Kind of trigger attached to a reminder.
///
/// Unknown values from the server collapse to `Custom`, matching the
/// backend's own normalization of LLM output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConditionType {
    PriceAbove,
    PriceBelow,
    PercentChange,
    TimeBased,
    #[default]
    #[serde(other)]
    Custom,
}

impl std::fmt::Display for ConditionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConditionType::PriceAbove => write!(f, "price_above"),
            ConditionType::PriceBelow => write!(f, "price_below"),
            ConditionType::PercentChange => write!(f, "percent_change"),
            ConditionType::TimeBased => write!(f, "time_based"),
            ConditionType::Custom => write!(f, "custom"),
        }
    }
}

/// Provenance of a parse result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ParseSource {
    /// The backend's LLM did the reading comprehension
    #[default]
    Llm,
    /// The backend fell back to its own regex parser
    RegexFallback,
    /// The backend was unreachable; we parsed it ourselves
    ClientRegex,
}

impl std::fmt::Display for ParseSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseSource::Llm => write!(f, "llm"),
            ParseSource::RegexFallback => write!(f, "regex_fallback"),
            ParseSource::ClientRegex => write!(f, "client_regex"),
        }
    }
}

/// The condition fields of a reminder, separated from enrichment data.
///
/// Exactly one of `target_price` / `percent_change` / `trigger_time` /
/// `notes` is authoritative, matched to `condition_type`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Condition {
    pub condition_type: ConditionType,
    pub target_price: Option<f64>,
    pub percent_change: Option<f64>,
    pub trigger_time: Option<String>,
    pub notes: Option<String>,
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.condition_type {
            ConditionType::PriceAbove => match self.target_price {
                Some(p) => write!(f, "price above ${:.2}", p),
                None => write!(f, "price above ?"),
            },
            ConditionType::PriceBelow => match self.target_price {
                Some(p) => write!(f, "price below ${:.2}", p),
                None => write!(f, "price below ?"),
            },
            ConditionType::PercentChange => match self.percent_change {
                Some(p) => write!(f, "{:+.1}% move", p),
                None => write!(f, "percent move ?"),
            },
            ConditionType::TimeBased => match &self.trigger_time {
                Some(t) => write!(f, "at {}", t),
                None => write!(f, "time based ?"),
            },
            ConditionType::Custom => {
                write!(f, "{}", self.notes.as_deref().unwrap_or("custom"))
            }
        }
    }
}

/// Lifecycle state of a reminder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReminderStatus {
    #[default]
    Active,
    Triggered,
    Expired,
    Cancelled,
}

impl std::fmt::Display for ReminderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReminderStatus::Active => write!(f, "active"),
            ReminderStatus::Triggered => write!(f, "triggered"),
            ReminderStatus::Expired => write!(f, "expired"),
            ReminderStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// A user-created reminder, held in the session store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reminder {
    /// Session-unique id, monotonically increasing in creation order
    pub id: u64,
    /// The text the user actually typed
    pub original_text: String,
    /// Ticker symbol the reminder watches
    pub ticker: String,
    /// Full company name, when known
    pub company_name: Option<String>,
    /// What to do when the condition fires
    pub action: String,
    /// The trigger rule
    pub condition: Condition,
    /// Lifecycle state
    pub status: ReminderStatus,
    /// When the reminder was created
    pub created_at: DateTime<Utc>,
    /// When the condition was detected as met, if it was
    pub triggered_at: Option<DateTime<Utc>>,
    /// Last known price for the ticker
    pub current_price: Option<f64>,
}

impl Reminder {
    /// Display name: company name when we have one, ticker otherwise.
    pub fn display_name(&self) -> &str {
        self.company_name.as_deref().unwrap_or(&self.ticker)
    }
}

/// A notification record derived from a triggered reminder.
///
/// Read state is tracked here, independent of the reminder's own status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    /// Session-unique alert id
    pub id: u64,
    /// The reminder this alert came from
    pub reminder_id: u64,
    /// Ticker, denormalized for display
    pub ticker: String,
    /// Human-readable trigger message
    pub message: String,
    /// When the trigger was detected
    pub triggered_at: DateTime<Utc>,
    /// Whether the user has seen this alert
    pub is_read: bool,
}
