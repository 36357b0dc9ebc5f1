//! Personal rule list configuration.

use serde::{Deserialize, Serialize};

use super::observability::default_true;
use crate::journal::{DEFAULT_RULE_PRESETS, RuleChecklist};

/// The user's trading rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Rules shown on the post-trade checklist.
    #[serde(default = "default_rules")]
    pub my_rules: Vec<String>,
    /// Whether trades are checked against the rules.
    #[serde(default = "default_true")]
    pub enable_check: bool,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            my_rules: default_rules(),
            enable_check: true,
        }
    }
}

impl RulesConfig {
    /// Build the checklist for these rules.
    #[must_use]
    pub fn checklist(&self) -> RuleChecklist {
        RuleChecklist::new(self.my_rules.iter().cloned(), self.enable_check)
    }
}

fn default_rules() -> Vec<String> {
    DEFAULT_RULE_PRESETS.iter().map(ToString::to_string).collect()
}
