//! Personal trading rules and the post-trade checklist.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::record::RuleCompliance;

/// Starter rules offered to new users.
pub const DEFAULT_RULE_PRESETS: [&str; 5] = [
    "Do not chase a move that has already started",
    "Never move the stop-loss",
    "No entries around economic releases",
    "Close the chart when emotional",
    "Secure a reward:risk of at least 1:1.5",
];

/// Result of checking a trade against the rule list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceCheck {
    /// Classification.
    pub compliance: RuleCompliance,
    /// Rules left unchecked, in rule-list order.
    pub violated_rules: Vec<String>,
}

/// The user's rule list and whether the checklist is in use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleChecklist {
    rules: Vec<String>,
    enabled: bool,
}

impl Default for RuleChecklist {
    fn default() -> Self {
        Self::new(DEFAULT_RULE_PRESETS.iter().map(ToString::to_string), true)
    }
}

impl RuleChecklist {
    /// Build a checklist. Blank and duplicate rules are dropped.
    #[must_use]
    pub fn new(rules: impl IntoIterator<Item = String>, enabled: bool) -> Self {
        let mut seen = HashSet::new();
        let rules = rules
            .into_iter()
            .map(|rule| rule.trim().to_string())
            .filter(|rule| !rule.is_empty() && seen.insert(rule.clone()))
            .collect();
        Self { rules, enabled }
    }

    /// Rules in display order.
    #[must_use]
    pub fn rules(&self) -> &[String] {
        &self.rules
    }

    /// Whether the checklist is in use.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Classify a trade from the rules the user ticked.
    ///
    /// Returns `None` when the checklist is disabled or has no rules.
    /// Ticked names that are not on the list are ignored.
    #[must_use]
    pub fn evaluate<S: AsRef<str>>(&self, checked: &[S]) -> Option<ComplianceCheck> {
        if !self.enabled || self.rules.is_empty() {
            return None;
        }

        let checked: HashSet<&str> = checked.iter().map(AsRef::as_ref).collect();
        let violated_rules: Vec<String> = self
            .rules
            .iter()
            .filter(|rule| !checked.contains(rule.as_str()))
            .cloned()
            .collect();

        let compliance = if violated_rules.is_empty() {
            RuleCompliance::Full
        } else {
            RuleCompliance::Violated
        };

        Some(ComplianceCheck {
            compliance,
            violated_rules,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checklist() -> RuleChecklist {
        RuleChecklist::new(
            ["No chasing", "Keep the stop", "Skip news"]
                .into_iter()
                .map(String::from),
            true,
        )
    }

    #[test]
    fn test_all_checked_is_full() {
        let Some(check) = checklist().evaluate(&["Skip news", "No chasing", "Keep the stop"]) else {
            panic!("expected a classification");
        };
        assert_eq!(check.compliance, RuleCompliance::Full);
        assert!(check.violated_rules.is_empty());
    }

    #[test]
    fn test_unchecked_rules_are_violations_in_list_order() {
        let Some(check) = checklist().evaluate(&["Keep the stop", "Not a rule"]) else {
            panic!("expected a classification");
        };
        assert_eq!(check.compliance, RuleCompliance::Violated);
        assert_eq!(check.violated_rules, vec!["No chasing", "Skip news"]);
    }

    #[test]
    fn test_disabled_or_empty_checklist_gives_nothing() {
        let disabled = RuleChecklist::new(vec!["No chasing".to_string()], false);
        assert_eq!(disabled.evaluate::<&str>(&[]), None);

        let empty = RuleChecklist::new(vec!["  ".to_string()], true);
        assert!(empty.rules().is_empty());
        assert_eq!(empty.evaluate::<&str>(&[]), None);
    }

    #[test]
    fn test_default_uses_presets() {
        let checklist = RuleChecklist::default();
        assert!(checklist.is_enabled());
        assert_eq!(checklist.rules().len(), DEFAULT_RULE_PRESETS.len());
    }

    #[test]
    fn test_duplicates_are_dropped() {
        let checklist = RuleChecklist::new(
            ["A", " A ", "B"].into_iter().map(String::from),
            true,
        );
        assert_eq!(checklist.rules(), ["A".to_string(), "B".to_string()]);
    }
}
