use std::{fmt, str::FromStr};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::PlannerError;

/// The fixed set of spending categories shared by the suggested breakdown and the ledger.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum BudgetCategory {
    Accommodation,
    Food,
    Activities,
    Transport,
    Miscellaneous,
}

impl BudgetCategory {
    /// Every category, in display order.
    pub const ALL: [BudgetCategory; 5] = [
        BudgetCategory::Accommodation,
        BudgetCategory::Food,
        BudgetCategory::Activities,
        BudgetCategory::Transport,
        BudgetCategory::Miscellaneous,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BudgetCategory::Accommodation => "accommodation",
            BudgetCategory::Food => "food",
            BudgetCategory::Activities => "activities",
            BudgetCategory::Transport => "transport",
            BudgetCategory::Miscellaneous => "miscellaneous",
        }
    }

    /// Human label, also the default description of an expense.
    pub fn label(self) -> &'static str {
        match self {
            BudgetCategory::Accommodation => "Accommodation",
            BudgetCategory::Food => "Food",
            BudgetCategory::Activities => "Activities",
            BudgetCategory::Transport => "Transport",
            BudgetCategory::Miscellaneous => "Misc",
        }
    }
}

impl fmt::Display for BudgetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BudgetCategory {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        BudgetCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == normalized)
            .or_else(|| (normalized == "misc").then_some(BudgetCategory::Miscellaneous))
            .ok_or_else(|| {
                PlannerError::invalid("category", format!("unknown expense category `{s}`"))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_categories() {
        assert_eq!("food".parse::<BudgetCategory>().unwrap(), BudgetCategory::Food);
        assert_eq!(
            " Transport ".parse::<BudgetCategory>().unwrap(),
            BudgetCategory::Transport
        );
        assert_eq!(
            "misc".parse::<BudgetCategory>().unwrap(),
            BudgetCategory::Miscellaneous
        );
    }

    #[test]
    fn test_unknown_category_is_rejected_at_the_boundary() {
        let err = "souvenirs".parse::<BudgetCategory>().unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_serde_names_match_as_str() {
        for category in BudgetCategory::ALL {
            let encoded = serde_json::to_value(category).unwrap();
            assert_eq!(encoded, category.as_str());
        }
    }
}
