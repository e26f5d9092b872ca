//! Local natural-language condition extraction.
//!
//! The backend normally parses reminder text with an LLM. When it is
//! unreachable we fall back to this regex grammar, which is the same one the
//! server uses for its own fallback, so behavior stays identical no matter
//! which side ends up doing the work.

use crate::models::{ConditionType, ParseSource, ParsedCondition};
use regex::Regex;
use std::sync::OnceLock;

/// Ticker: first run of 1-5 uppercase letters on word boundaries.
///
/// No denylist, so an uppercase English word like "HIT" will happily be
/// mistaken for a symbol. The backend behaves the same way.
fn ticker_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b([A-Z]{1,5})\b").unwrap())
}

fn price_above_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)(?:above|over|reaches?|hits?)\s*\$?(\d+(?:\.\d{2})?)").unwrap()
    })
}

fn price_below_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)(?:below|under|drops?\s*(?:to)?)\s*\$?(\d+(?:\.\d{2})?)").unwrap()
    })
}

fn percent_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+(?:\.\d+)?)\s*%").unwrap())
}

/// Words that flip a percentage to a decline.
const DECLINE_WORDS: [&str; 4] = ["drop", "fall", "down", "lose"];

/// What a single grammar rule extracted from the text.
struct RuleMatch {
    condition_type: ConditionType,
    target_price: Option<f64>,
    percent_change: Option<f64>,
    action: &'static str,
}

const DEFAULT_ACTION: &str = "Review and take action";

/// Price rules must not swallow the number of a percentage phrase
/// ("drops 5%" is a percent condition, not a $5 floor).
fn followed_by_percent(text: &str, end: usize) -> bool {
    text[end..].starts_with('%')
}

fn match_price_above(text: &str) -> Option<RuleMatch> {
    let caps = price_above_re().captures(text)?;
    let group = caps.get(1)?;
    if followed_by_percent(text, group.end()) {
        return None;
    }
    // An unparseable number is treated as no match; the cascade moves on.
    let price: f64 = group.as_str().parse().ok()?;
    let action = if text.to_lowercase().contains("sell") {
        "Consider selling"
    } else {
        DEFAULT_ACTION
    };
    Some(RuleMatch {
        condition_type: ConditionType::PriceAbove,
        target_price: Some(price),
        percent_change: None,
        action,
    })
}

fn match_price_below(text: &str) -> Option<RuleMatch> {
    let caps = price_below_re().captures(text)?;
    let group = caps.get(1)?;
    if followed_by_percent(text, group.end()) {
        return None;
    }
    let price: f64 = group.as_str().parse().ok()?;
    let action = if text.to_lowercase().contains("buy") {
        "Consider buying"
    } else {
        DEFAULT_ACTION
    };
    Some(RuleMatch {
        condition_type: ConditionType::PriceBelow,
        target_price: Some(price),
        percent_change: None,
        action,
    })
}

fn match_percent_change(text: &str) -> Option<RuleMatch> {
    let caps = percent_re().captures(text)?;
    let value: f64 = caps.get(1)?.as_str().parse().ok()?;
    let lower = text.to_lowercase();
    let is_decline = DECLINE_WORDS.iter().any(|w| lower.contains(w));
    Some(RuleMatch {
        condition_type: ConditionType::PercentChange,
        target_price: None,
        percent_change: Some(if is_decline { -value } else { value }),
        action: DEFAULT_ACTION,
    })
}

/// The grammar, in priority order. First rule to match wins.
const RULES: [fn(&str) -> Option<RuleMatch>; 3] =
    [match_price_above, match_price_below, match_percent_change];

/// Extract a structured condition from free-form reminder text.
///
/// Pure and infallible: ambiguous input comes back as a `custom` condition,
/// and a missing ticker comes back as `ticker: None` for the caller to
/// reject. Calling it twice on the same text gives the same answer.
pub fn extract(text: &str) -> ParsedCondition {
    let ticker = ticker_re()
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string());

    // No ticker means nothing to watch; don't bother with condition rules.
    let Some(ticker) = ticker else {
        return ParsedCondition {
            ticker: None,
            company_name: None,
            action: Some(DEFAULT_ACTION.to_string()),
            condition_type: ConditionType::Custom,
            target_price: None,
            percent_change: None,
            trigger_time: None,
            current_price: None,
            notes: Some(text.to_string()),
            source: ParseSource::ClientRegex,
        };
    };

    let company_name = company_name(&ticker).map(str::to_string);

    for rule in RULES {
        if let Some(m) = rule(text) {
            return ParsedCondition {
                ticker: Some(ticker),
                company_name,
                action: Some(m.action.to_string()),
                condition_type: m.condition_type,
                target_price: m.target_price,
                percent_change: m.percent_change,
                trigger_time: None,
                current_price: None,
                notes: None,
                source: ParseSource::ClientRegex,
            };
        }
    }

    // Recognized ticker, unrecognized condition: keep the text as notes.
    ParsedCondition {
        ticker: Some(ticker),
        company_name,
        action: Some(DEFAULT_ACTION.to_string()),
        condition_type: ConditionType::Custom,
        target_price: None,
        percent_change: None,
        trigger_time: None,
        current_price: None,
        notes: Some(text.to_string()),
        source: ParseSource::ClientRegex,
    }
}

/// Company names for common tickers, used to dress up client-side parses.
/// The backend does this with live data; we only know the household names.
pub fn company_name(ticker: &str) -> Option<&'static str> {
    match ticker {
        "AAPL" => Some("Apple Inc."),
        "NVDA" => Some("NVIDIA Corporation"),
        "TSLA" => Some("Tesla, Inc."),
        "MSFT" => Some("Microsoft Corporation"),
        "GOOGL" => Some("Alphabet Inc."),
        "AMZN" => Some("Amazon.com, Inc."),
        "META" => Some("Meta Platforms, Inc."),
        "QCOM" => Some("Qualcomm Incorporated"),
        "AMD" => Some("Advanced Micro Devices, Inc."),
        "INTC" => Some("Intel Corporation"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_below_with_buy_action() {
        let p = extract("Remind me to buy AAPL if the price drops below $170");
        assert_eq!(p.ticker.as_deref(), Some("AAPL"));
        assert_eq!(p.condition_type, ConditionType::PriceBelow);
        assert_eq!(p.target_price, Some(170.0));
        assert_eq!(p.action.as_deref(), Some("Consider buying"));
        assert_eq!(p.source, ParseSource::ClientRegex);
    }

    #[test]
    fn test_price_above() {
        let p = extract("Alert me when NVDA goes above $500");
        assert_eq!(p.ticker.as_deref(), Some("NVDA"));
        assert_eq!(p.condition_type, ConditionType::PriceAbove);
        assert_eq!(p.target_price, Some(500.0));
        assert_eq!(p.action.as_deref(), Some("Review and take action"));
    }

    #[test]
    fn test_price_above_with_sell_action() {
        let p = extract("Sell MSFT when it hits $450");
        assert_eq!(p.condition_type, ConditionType::PriceAbove);
        assert_eq!(p.target_price, Some(450.0));
        assert_eq!(p.action.as_deref(), Some("Consider selling"));
    }

    #[test]
    fn test_percent_decline() {
        let p = extract("Notify me if TSLA drops 5% from current price");
        assert_eq!(p.ticker.as_deref(), Some("TSLA"));
        assert_eq!(p.condition_type, ConditionType::PercentChange);
        assert_eq!(p.percent_change, Some(-5.0));
    }

    #[test]
    fn test_percent_gain() {
        let p = extract("Tell me when AMD gains 10%");
        assert_eq!(p.condition_type, ConditionType::PercentChange);
        assert_eq!(p.percent_change, Some(10.0));
    }

    #[test]
    fn test_decline_words() {
        for text in [
            "AAPL falls 3%",
            "AAPL down 3%",
            "don't let me lose 3% on AAPL",
        ] {
            let p = extract(text);
            assert_eq!(p.percent_change, Some(-3.0), "input: {}", text);
        }
    }

    #[test]
    fn test_no_ticker_returns_none() {
        let p = extract("something with no ticker or numbers");
        assert!(p.ticker.is_none());
        assert_eq!(p.condition_type, ConditionType::Custom);
        assert_eq!(
            p.notes.as_deref(),
            Some("something with no ticker or numbers")
        );
    }

    #[test]
    fn test_custom_condition_keeps_text() {
        let p = extract("Watch AAPL around earnings");
        assert_eq!(p.ticker.as_deref(), Some("AAPL"));
        assert_eq!(p.condition_type, ConditionType::Custom);
        assert_eq!(p.notes.as_deref(), Some("Watch AAPL around earnings"));
    }

    #[test]
    fn test_first_match_wins_priority() {
        // Both an above and a below phrase; above is checked first.
        let p = extract("AAPL above $200 or below $150");
        assert_eq!(p.condition_type, ConditionType::PriceAbove);
        assert_eq!(p.target_price, Some(200.0));
    }

    #[test]
    fn test_drops_to_phrasing() {
        let p = extract("Buy GOOGL if it drops to 130");
        assert_eq!(p.condition_type, ConditionType::PriceBelow);
        assert_eq!(p.target_price, Some(130.0));
    }

    #[test]
    fn test_decimal_cents() {
        let p = extract("NVDA reaches $512.30");
        assert_eq!(p.target_price, Some(512.30));
    }

    #[test]
    fn test_percent_number_not_taken_as_price() {
        // "drops 5%" must not become a $5 price floor.
        let p = extract("TSLA drops 5%");
        assert_eq!(p.condition_type, ConditionType::PercentChange);
        assert_eq!(p.percent_change, Some(-5.0));
        assert_eq!(p.target_price, None);
    }

    #[test]
    fn test_first_ticker_wins() {
        let p = extract("Compare AAPL and MSFT above $200");
        assert_eq!(p.ticker.as_deref(), Some("AAPL"));
    }

    #[test]
    fn test_idempotent() {
        let text = "Remind me to buy AAPL if the price drops below $170";
        let a = extract(text);
        let b = extract(text);
        assert_eq!(format!("{:?}", a), format!("{:?}", b));
    }

    #[test]
    fn test_company_name_enrichment() {
        let p = extract("AAPL above $200");
        assert_eq!(p.company_name.as_deref(), Some("Apple Inc."));

        let p = extract("ZZZQ above $200");
        assert!(p.company_name.is_none());
    }

    #[test]
    fn test_long_uppercase_run_is_not_a_ticker() {
        let p = extract("watch BERKSHIRE closely");
        // Six or more letters never match; nothing else qualifies here.
        assert!(p.ticker.is_none());
    }
}
