//! Trade journal.
//!
//! Records opened from sizing results, closed with their actual outcome and
//! reviewed against the user's own rules.

mod error;
mod history;
mod record;
mod rules;

pub use error::JournalError;
pub use history::TradeHistory;
pub use record::{
    Annotation, ExitType, RuleCompliance, TradeOutcome, TradeRecord, TradeResult, parse_tags,
};
pub use rules::{ComplianceCheck, DEFAULT_RULE_PRESETS, RuleChecklist};
