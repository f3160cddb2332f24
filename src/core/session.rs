//! Current-trip state: the last successful plan, its report and its ledger.

use serde::Serialize;
use tracing::{info, warn};

use crate::{
    core::{
        analyzer::BudgetReport,
        ledger::{CategoryComparison, ExpenseLedger, SpendingStatus},
        trip::{TripDetails, TripRequest},
    },
    error::Result,
    oracle::RecommendationOracle,
    types::TravelRecommendation,
};

/// A decoded recommendation together with the trip it was produced for.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripPlan {
    pub recommendation: TravelRecommendation,
    pub trip: TripDetails,
}

/// One planned trip. Expenses live and die with it.
#[derive(Debug, Clone)]
pub struct TripSession {
    plan: TripPlan,
    report: BudgetReport,
    ledger: ExpenseLedger,
}

impl TripSession {
    pub fn new(plan: TripPlan) -> Self {
        let report = BudgetReport::new(&plan.recommendation.budget_analysis, &plan.trip);
        Self {
            plan,
            report,
            ledger: ExpenseLedger::new(),
        }
    }

    pub fn plan(&self) -> &TripPlan {
        &self.plan
    }

    pub fn report(&self) -> &BudgetReport {
        &self.report
    }

    pub fn ledger(&self) -> &ExpenseLedger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut ExpenseLedger {
        &mut self.ledger
    }

    /// Suggested allocation vs. actual spending, per category.
    pub fn comparison(&self) -> Vec<CategoryComparison> {
        self.ledger
            .compare_to_suggested(Some(&self.plan.recommendation.suggested_budget_breakdown))
    }

    pub fn spending_status(&self) -> SpendingStatus {
        self.ledger.spending_status(self.plan.trip.budget)
    }
}

/// Drives the Recommendation Oracle and holds the current session.
///
/// `plan_trip` takes `&mut self`, so only one request can be in flight.
#[derive(Debug)]
pub struct Planner<O> {
    oracle: O,
    session: Option<TripSession>,
}

impl<O: RecommendationOracle> Planner<O> {
    pub fn new(oracle: O) -> Self {
        Self {
            oracle,
            session: None,
        }
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    pub fn session(&self) -> Option<&TripSession> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut TripSession> {
        self.session.as_mut()
    }

    /// Ask the oracle for a plan. On failure the previous session is kept;
    /// on success it is replaced, discarding its expenses.
    pub async fn plan_trip(&mut self, request: TripRequest) -> Result<&TripSession> {
        info!(
            target: "trip_planner::session",
            destination = request.destination(),
            trip_days = request.trip_days(),
            "planning trip"
        );

        let recommendation = match self.oracle.recommend(&request).await {
            Ok(recommendation) => recommendation,
            Err(err) => {
                warn!(
                    target: "trip_planner::session",
                    error = %err,
                    kept_session = self.session.is_some(),
                    "planning failed"
                );
                return Err(err);
            }
        };

        let plan = TripPlan {
            recommendation,
            trip: request.details(),
        };
        if let Some(previous) = &self.session {
            if !previous.ledger().is_empty() {
                info!(
                    target: "trip_planner::session",
                    discarded_expenses = previous.ledger().len(),
                    "replacing session"
                );
            }
        }

        Ok(self.session.insert(TripSession::new(plan)))
    }

    /// Drop the current plan and its expenses.
    pub fn reset(&mut self) {
        self.session = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{category::BudgetCategory, money::Currency},
        error::PlannerError,
        types::{BudgetAnalysis, Feasibility, SuggestedBudgetBreakdown},
    };
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::sync::Mutex;

    fn d(value: i64) -> Decimal {
        Decimal::from(value)
    }

    struct ScriptedOracle {
        replies: Mutex<Vec<Result<TravelRecommendation>>>,
    }

    #[async_trait]
    impl RecommendationOracle for ScriptedOracle {
        async fn recommend(&self, _request: &TripRequest) -> Result<TravelRecommendation> {
            self.replies.lock().unwrap().remove(0)
        }
    }

    fn recommendation(feasibility: Feasibility, cost: Decimal) -> TravelRecommendation {
        TravelRecommendation {
            budget_analysis: BudgetAnalysis {
                feasibility,
                daily_budget_per_person: d(50),
                estimated_total_cost: cost,
                estimated_transport_from_origin: None,
                message: "ok".to_string(),
                adjustment_suggestions: Vec::new(),
            },
            recommendations: Default::default(),
            suggested_budget_breakdown: SuggestedBudgetBreakdown {
                accommodation: Some(d(400)),
                food: Some(d(300)),
                activities: Some(d(150)),
                transport: Some(d(100)),
                flights: None,
                miscellaneous: Some(d(50)),
            },
            travel_tips: Vec::new(),
            flight_details: None,
        }
    }

    fn request() -> TripRequest {
        TripRequest::builder()
            .destination("Lisbon")
            .start_date(NaiveDate::from_ymd_opt(2026, 5, 1).unwrap())
            .end_date(NaiveDate::from_ymd_opt(2026, 5, 5).unwrap())
            .budget(d(1000))
            .currency(Currency::EUR)
            .travelers(2)
            .interest(crate::core::trip::Interest::Food)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_failed_plan_keeps_previous_session() {
        let oracle = ScriptedOracle {
            replies: Mutex::new(vec![
                Ok(recommendation(Feasibility::Feasible, d(900))),
                Err(PlannerError::RateLimit { retry_after: 3 }),
            ]),
        };
        let mut planner = Planner::new(oracle);

        planner.plan_trip(request()).await.unwrap();
        planner
            .session_mut()
            .unwrap()
            .ledger_mut()
            .add_expense(BudgetCategory::Food, Some("Pastéis"), d(12))
            .unwrap();

        let err = planner.plan_trip(request()).await.unwrap_err();
        assert!(matches!(err, PlannerError::RateLimit { retry_after: 3 }));

        let session = planner.session().unwrap();
        assert_eq!(session.ledger().len(), 1);
        assert_eq!(session.report().feasibility, Feasibility::Feasible);
    }

    #[tokio::test]
    async fn test_successful_plan_replaces_session_and_ledger() {
        let oracle = ScriptedOracle {
            replies: Mutex::new(vec![
                Ok(recommendation(Feasibility::Feasible, d(900))),
                Ok(recommendation(Feasibility::TooLow, d(1200))),
            ]),
        };
        let mut planner = Planner::new(oracle);

        planner.plan_trip(request()).await.unwrap();
        planner
            .session_mut()
            .unwrap()
            .ledger_mut()
            .add_expense(BudgetCategory::Transport, None, d(20))
            .unwrap();

        let session = planner.plan_trip(request()).await.unwrap();
        assert!(session.ledger().is_empty());
        assert_eq!(session.report().feasibility, Feasibility::TooLow);
        assert_eq!(session.report().delta, d(-200));
    }

    #[tokio::test]
    async fn test_comparison_uses_suggested_breakdown() {
        let oracle = ScriptedOracle {
            replies: Mutex::new(vec![Ok(recommendation(Feasibility::Feasible, d(900)))]),
        };
        let mut planner = Planner::new(oracle);
        planner.plan_trip(request()).await.unwrap();

        let session = planner.session_mut().unwrap();
        session
            .ledger_mut()
            .add_expense(BudgetCategory::Food, None, d(80))
            .unwrap();

        let food = session
            .comparison()
            .into_iter()
            .find(|row| row.category == BudgetCategory::Food)
            .unwrap();
        assert_eq!(food.suggested, d(300));
        assert_eq!(food.actual, d(80));
        assert_eq!(session.spending_status(), SpendingStatus::OnTrack);

        planner.reset();
        assert!(planner.session().is_none());
    }
}
