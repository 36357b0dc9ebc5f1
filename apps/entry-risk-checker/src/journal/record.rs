//! Trade journal record and its lifecycle.
//!
//! A record is opened once from a sizing result (planned fields are fixed
//! from then on), closed once with the actual outcome, and annotated freely.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use super::error::JournalError;
use crate::risk::{CalculationResult, LevelKind, TradeInput, TradeType};

// ============================================================================
// Classifications
// ============================================================================

/// Final result of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeResult {
    /// Closed in profit.
    Win,
    /// Closed at a loss.
    Loss,
}

/// How the position was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExitType {
    /// Take-profit hit.
    #[serde(alias = "TP")]
    TakeProfit,
    /// Stop-loss hit.
    #[serde(alias = "SL")]
    StopLoss,
    /// Closed by hand.
    Manual,
}

/// How closely the user followed their own rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleCompliance {
    /// Every rule followed.
    Full,
    /// Some rules broken.
    Partial,
    /// Rules broken.
    Violated,
}

impl RuleCompliance {
    /// Whether this classification carries violated rules.
    #[must_use]
    pub const fn is_violation(self) -> bool {
        matches!(self, Self::Partial | Self::Violated)
    }
}

// ============================================================================
// Record
// ============================================================================

/// A persisted journal entry.
///
/// Older snapshots may lack newer fields; every field therefore has a default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TradeRecord {
    /// Record ID.
    pub id: String,
    /// When the position was opened.
    pub entry_time: DateTime<Utc>,
    /// When the position was closed.
    pub exit_time: Option<DateTime<Utc>>,
    /// Pair symbol such as `USD/JPY`; empty on legacy records.
    pub currency_pair: String,
    /// Direction.
    pub trade_type: TradeType,
    /// Entry price.
    pub entry_price: Decimal,
    /// Planned stop price.
    pub stop_loss_price: Decimal,
    /// Planned target price.
    pub take_profit_price: Decimal,
    /// Planned stop distance.
    pub stop_pips: Decimal,
    /// Planned target distance.
    pub take_pips: Decimal,
    /// Planned lot.
    pub lot: Decimal,
    /// Planned profit at the target.
    pub potential_profit: Decimal,
    /// Planned loss at the stop (magnitude).
    pub planned_loss: Decimal,
    /// Planned reward:risk.
    pub risk_reward_ratio: Decimal,
    /// Actual exit price.
    pub exit_price: Option<Decimal>,
    /// Actual lot traded.
    pub actual_lot: Option<Decimal>,
    /// Actual profit on a win.
    pub actual_profit: Option<Decimal>,
    /// Actual loss on a loss (either sign accepted).
    pub actual_loss: Option<Decimal>,
    /// Outcome; `None` while the trade is open.
    pub result: Option<TradeResult>,
    /// How the trade was closed.
    pub exit_type: Option<ExitType>,
    /// Rule compliance classification.
    pub rule_compliance: Option<RuleCompliance>,
    /// Names of the rules broken on this trade.
    pub violated_rules: Vec<String>,
    /// Entry-basis tags.
    #[serde(deserialize_with = "deserialize_tags")]
    pub entry_basis: Vec<String>,
    /// Scenario label.
    pub scenario: Option<String>,
    /// Free-text reflection.
    pub reflection: String,
}

/// Actual outcome recorded when a trade is closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeOutcome {
    /// Win or loss.
    pub result: TradeResult,
    /// Exit timestamp.
    pub exit_time: DateTime<Utc>,
    /// How the trade was closed.
    #[serde(default)]
    pub exit_type: Option<ExitType>,
    /// Exit price.
    #[serde(default)]
    pub exit_price: Option<Decimal>,
    /// Lot actually traded.
    #[serde(default)]
    pub actual_lot: Option<Decimal>,
    /// Realised profit on a win.
    #[serde(default)]
    pub actual_profit: Option<Decimal>,
    /// Realised loss on a loss.
    #[serde(default)]
    pub actual_loss: Option<Decimal>,
}

/// Free-form review fields, replaced wholesale on each edit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Annotation {
    /// Entry-basis tags.
    pub entry_basis: Vec<String>,
    /// Scenario label.
    pub scenario: Option<String>,
    /// Reflection text.
    pub reflection: String,
    /// Rule compliance classification.
    pub rule_compliance: Option<RuleCompliance>,
    /// Broken rules.
    pub violated_rules: Vec<String>,
}

impl TradeRecord {
    /// Open a record from a sizing request and its verdict.
    ///
    /// Stop and target prices are resolved from pips when the form used pips.
    pub fn open(
        input: &TradeInput,
        calculation: &CalculationResult,
        entry_time: DateTime<Utc>,
    ) -> Result<Self, JournalError> {
        if !calculation.allows_entry() {
            return Err(JournalError::EntryForbidden);
        }

        let pair = &input.currency_pair;
        let side = input.trade_type;
        let entry = input.entry_price;

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            entry_time,
            currency_pair: pair.to_string(),
            trade_type: side,
            entry_price: entry,
            stop_loss_price: input.stop_loss.to_price(entry, side, LevelKind::Stop, pair),
            take_profit_price: input
                .take_profit
                .to_price(entry, side, LevelKind::Target, pair),
            stop_pips: calculation.stop_pips,
            take_pips: calculation.take_pips,
            lot: calculation.recommended_lot,
            potential_profit: calculation.potential_profit,
            planned_loss: calculation.actual_loss,
            risk_reward_ratio: calculation.risk_reward_ratio,
            ..Self::default()
        })
    }

    /// Record the actual outcome. Allowed once per record.
    pub fn close(&mut self, outcome: TradeOutcome) -> Result<(), JournalError> {
        if self.is_closed() {
            return Err(JournalError::AlreadyClosed {
                id: self.id.clone(),
            });
        }
        if outcome.exit_time < self.entry_time {
            return Err(JournalError::ExitBeforeEntry {
                id: self.id.clone(),
            });
        }

        self.result = Some(outcome.result);
        self.exit_time = Some(outcome.exit_time);
        self.exit_type = outcome.exit_type;
        self.exit_price = outcome.exit_price;
        self.actual_lot = outcome.actual_lot;
        self.actual_profit = outcome.actual_profit;
        self.actual_loss = outcome.actual_loss;
        Ok(())
    }

    /// Replace the review fields.
    pub fn annotate(&mut self, annotation: Annotation) {
        self.entry_basis = normalize_tags(annotation.entry_basis);
        self.scenario = annotation.scenario;
        self.reflection = annotation.reflection;
        self.rule_compliance = annotation.rule_compliance;
        self.violated_rules = annotation.violated_rules;
    }

    /// Whether an outcome has been recorded.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.result.is_some() || self.exit_time.is_some()
    }

    /// Whether the record counts towards statistics.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.result.is_some()
    }

    /// Signed P&L: profit for a win, negative loss for a loss.
    ///
    /// Actual figures win over planned ones when present.
    #[must_use]
    pub fn realized_pnl(&self) -> Option<Decimal> {
        match self.result? {
            TradeResult::Win => Some(self.actual_profit.unwrap_or(self.potential_profit)),
            TradeResult::Loss => Some(-self.actual_loss.unwrap_or(self.planned_loss).abs()),
        }
    }

    /// Time between entry and exit, when the exit is known.
    #[must_use]
    pub fn holding_time(&self) -> Option<Duration> {
        self.exit_time.map(|exit| exit - self.entry_time)
    }
}

// ============================================================================
// Entry-basis tags
// ============================================================================

/// Split a comma-joined tag string into trimmed, non-empty tags.
#[must_use]
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    tags.iter().flat_map(|tag| parse_tags(tag)).collect()
}

/// Accepts either a tag list or a legacy comma-joined string.
fn deserialize_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Tags {
        List(Vec<String>),
        Joined(String),
    }

    Ok(match Option::<Tags>::deserialize(deserializer)? {
        Some(Tags::List(tags)) => normalize_tags(tags),
        Some(Tags::Joined(raw)) => parse_tags(&raw),
        None => Vec::new(),
    })
}
