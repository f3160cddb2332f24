//! trip-planner: budget feasibility, expense tracking and LLM-backed trip planning
//!
//! The oracle (any OpenAI-compatible chat-completions endpoint) is asked for a
//! strictly typed recommendation; everything it returns is schema-validated
//! before the budget analyzer and the expense ledger see it.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use chrono::NaiveDate;
//! use rust_decimal::Decimal;
//! use trip_planner::{core::Interest, BudgetCategory, Currency, LlmOracle, Planner, TripRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let request = TripRequest::builder()
//!         .destination("Lisbon")
//!         .start_date(NaiveDate::from_ymd_opt(2026, 5, 1).unwrap())
//!         .end_date(NaiveDate::from_ymd_opt(2026, 5, 5).unwrap())
//!         .budget(Decimal::from(1500))
//!         .currency(Currency::EUR)
//!         .interest(Interest::Food)
//!         .build()?;
//!
//!     let mut planner = Planner::new(LlmOracle::from_env()?);
//!     let session = planner.plan_trip(request).await?;
//!     println!("{}: {}", session.report().label(), session.report().message);
//!
//!     if let Some(session) = planner.session_mut() {
//!         session
//!             .ledger_mut()
//!             .add_expense(BudgetCategory::Food, Some("Bifana"), Decimal::from(4))?;
//!     }
//!     Ok(())
//! }
//! ```

extern crate self as trip_planner;

pub mod config;
pub mod core;
pub mod error;
pub mod oracle;
pub mod schemas;
pub(crate) mod services;
pub mod types;
pub mod workspace;

pub use crate::core::{
    BudgetCategory, BudgetReport, Currency, ExpenseId, ExpenseLedger, Planner, PresentationTier,
    SpendingStatus, TripDetails, TripPlan, TripRequest, TripSession,
};
pub use config::OracleConfig;
pub use error::{PlannerError, Result};
pub use oracle::{LlmOracle, MenuImage, MenuTranslationOracle, RecommendationOracle};
pub use schemas::{schema_type_name, CompletionSchema, SchemaHandle};
pub use trip_planner_macros::completion_schema;
pub use types::{
    DietaryPreference, Feasibility, MenuTranslation, PayloadCheck, TravelRecommendation,
};
pub use workspace::{group_by_country, Workspace, WorkspaceFilters};

pub use schemas as schema;

#[cfg(feature = "cli")]
pub mod cli;
