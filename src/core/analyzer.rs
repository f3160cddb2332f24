//! Budget Analyzer: turns the oracle's verdict into presentation state.
//!
//! The oracle's verdict and its own numbers can disagree. The analyzer keeps
//! both signals visible instead of reconciling them.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::warn;

use crate::{
    core::{money::Currency, trip::TripDetails},
    types::recommendation::{BudgetAnalysis, Feasibility},
};

/// Visual/semantic tier for a feasibility verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PresentationTier {
    Approved,
    TooLowWarning,
    TooHighNotice,
}

impl PresentationTier {
    pub fn label(self) -> &'static str {
        match self {
            PresentationTier::Approved => "Budget Approved",
            PresentationTier::TooLowWarning => "Budget Too Low",
            PresentationTier::TooHighNotice => "High Budget",
        }
    }
}

/// Styling of the budget difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeltaStyle {
    /// Budget covers the estimate (difference >= 0)
    Surplus,
    /// Estimate exceeds the budget
    Deficit,
}

/// `total_budget - estimated_total_cost`, exact. Positive means surplus.
pub fn compute_delta(total_budget: Decimal, estimated_total_cost: Decimal) -> Decimal {
    total_budget - estimated_total_cost
}

pub fn classify(feasibility: Feasibility) -> PresentationTier {
    match feasibility {
        Feasibility::Feasible => PresentationTier::Approved,
        Feasibility::TooLow => PresentationTier::TooLowWarning,
        Feasibility::TooHigh => PresentationTier::TooHighNotice,
    }
}

pub fn delta_style(delta: Decimal) -> DeltaStyle {
    if delta.is_sign_negative() && !delta.is_zero() {
        DeltaStyle::Deficit
    } else {
        DeltaStyle::Surplus
    }
}

/// Budget per traveler per day, rounded to the currency's precision.
///
/// `None` when travelers or days is zero.
pub fn daily_budget_per_person(
    total_budget: Decimal,
    travelers: u32,
    trip_days: u32,
    currency: Currency,
) -> Option<Decimal> {
    let head_days = Decimal::from(travelers).checked_mul(Decimal::from(trip_days))?;
    let daily = total_budget.checked_div(head_days)?;
    Some(currency.round(daily))
}

/// Everything the budget card shows, derived once per recommendation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetReport {
    pub feasibility: Feasibility,
    pub tier: PresentationTier,
    pub currency: Currency,
    pub total_budget: Decimal,
    pub estimated_total_cost: Decimal,
    /// As stated by the oracle
    pub daily_budget_per_person: Decimal,
    /// Recomputed from the trip parameters
    pub local_daily_budget_per_person: Option<Decimal>,
    pub delta: Decimal,
    pub delta_style: DeltaStyle,
    /// The estimate is above the budget, whatever the verdict says
    pub cost_exceeds_budget: bool,
    /// Verdict is `feasible` although the estimate is above the budget
    pub verdict_conflict: bool,
    pub message: String,
    /// Suggestions to display; empty when the budget is feasible
    pub suggestions: Vec<String>,
}

impl BudgetReport {
    pub fn new(analysis: &BudgetAnalysis, trip: &TripDetails) -> Self {
        let total_budget = trip.budget;
        let estimated_total_cost = analysis.estimated_total_cost;
        let delta = compute_delta(total_budget, estimated_total_cost);
        let cost_exceeds_budget = estimated_total_cost > total_budget;
        let verdict_conflict = analysis.feasibility == Feasibility::Feasible && cost_exceeds_budget;

        if verdict_conflict {
            warn!(
                target: "trip_planner::oracle",
                budget = %total_budget,
                estimated = %estimated_total_cost,
                "oracle marked budget feasible although the estimate exceeds it"
            );
        }

        let suggestions = match analysis.feasibility {
            Feasibility::Feasible => Vec::new(),
            Feasibility::TooLow | Feasibility::TooHigh => {
                if analysis.adjustment_suggestions.is_empty() {
                    warn!(
                        target: "trip_planner::oracle",
                        feasibility = analysis.feasibility.as_str(),
                        "oracle gave no adjustment suggestions for an infeasible budget"
                    );
                }
                analysis.adjustment_suggestions.clone()
            }
        };

        Self {
            feasibility: analysis.feasibility,
            tier: classify(analysis.feasibility),
            currency: trip.currency,
            total_budget,
            estimated_total_cost,
            daily_budget_per_person: analysis.daily_budget_per_person,
            local_daily_budget_per_person: daily_budget_per_person(
                total_budget,
                trip.travelers,
                trip.trip_days,
                trip.currency,
            ),
            delta,
            delta_style: delta_style(delta),
            cost_exceeds_budget,
            verdict_conflict,
            message: analysis.message.clone(),
            suggestions,
        }
    }

    pub fn label(&self) -> &'static str {
        self.tier.label()
    }

    pub fn formatted_delta(&self) -> String {
        self.currency.format_signed(self.delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn trip(budget: i64, travelers: u32, days: u32) -> TripDetails {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        TripDetails {
            traveler_name: None,
            from_location: None,
            destination: "Lisbon".to_string(),
            start_date: start,
            end_date: start + chrono::Duration::days(i64::from(days) - 1),
            trip_days: days,
            travelers,
            budget: Decimal::from(budget),
            currency: Currency::USD,
        }
    }

    fn analysis(feasibility: Feasibility, cost: i64, suggestions: &[&str]) -> BudgetAnalysis {
        BudgetAnalysis {
            feasibility,
            daily_budget_per_person: Decimal::from(100),
            estimated_total_cost: Decimal::from(cost),
            estimated_transport_from_origin: None,
            message: "analysis".to_string(),
            adjustment_suggestions: suggestions.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_classify_is_one_to_one() {
        let tiers = [
            classify(Feasibility::Feasible),
            classify(Feasibility::TooLow),
            classify(Feasibility::TooHigh),
        ];
        assert_eq!(tiers[0], PresentationTier::Approved);
        assert_eq!(tiers[1], PresentationTier::TooLowWarning);
        assert_eq!(tiers[2], PresentationTier::TooHighNotice);
        assert_ne!(tiers[0], tiers[1]);
        assert_ne!(tiers[1], tiers[2]);
        assert_ne!(tiers[0], tiers[2]);
    }

    #[test]
    fn test_delta_is_exact() {
        let budget: Decimal = "1000.10".parse().unwrap();
        let cost: Decimal = "1000.10".parse().unwrap();
        assert!(compute_delta(budget, cost).is_zero());
        assert_eq!(delta_style(compute_delta(budget, cost)), DeltaStyle::Surplus);

        let cost: Decimal = "1000.11".parse().unwrap();
        assert_eq!(compute_delta(budget, cost), Decimal::new(-1, 2));
        assert_eq!(delta_style(compute_delta(budget, cost)), DeltaStyle::Deficit);
    }

    #[test]
    fn test_shortfall_report() {
        let report = BudgetReport::new(
            &analysis(Feasibility::TooLow, 1200, &["Stay in hostels"]),
            &trip(1000, 1, 5),
        );

        assert_eq!(report.delta, Decimal::from(-200));
        assert_eq!(report.delta_style, DeltaStyle::Deficit);
        assert_eq!(report.tier, PresentationTier::TooLowWarning);
        assert!(report.cost_exceeds_budget);
        assert!(!report.verdict_conflict);
        assert_eq!(report.suggestions, vec!["Stay in hostels".to_string()]);
        assert_eq!(report.formatted_delta(), "-200.00 USD");
    }

    #[test]
    fn test_feasible_verdict_with_cost_over_budget_is_flagged() {
        let report = BudgetReport::new(&analysis(Feasibility::Feasible, 1100, &[]), &trip(1000, 2, 4));

        assert_eq!(report.tier, PresentationTier::Approved);
        assert!(report.cost_exceeds_budget);
        assert!(report.verdict_conflict);
        assert_eq!(report.delta_style, DeltaStyle::Deficit);
    }

    #[test]
    fn test_suggestions_hidden_when_feasible() {
        let report = BudgetReport::new(
            &analysis(Feasibility::Feasible, 800, &["unused"]),
            &trip(1000, 1, 1),
        );
        assert!(report.suggestions.is_empty());
        assert_eq!(report.delta_style, DeltaStyle::Surplus);
    }

    #[test]
    fn test_local_daily_budget() {
        assert_eq!(
            daily_budget_per_person(Decimal::from(1000), 2, 3, Currency::USD),
            Some("166.67".parse().unwrap())
        );
        assert_eq!(
            daily_budget_per_person(Decimal::from(1000), 3, 1, Currency::JPY),
            Some(Decimal::from(333))
        );
        assert_eq!(daily_budget_per_person(Decimal::from(1000), 0, 3, Currency::USD), None);
    }
}
