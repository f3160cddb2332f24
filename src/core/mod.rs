pub mod analyzer;
pub mod category;
pub mod ledger;
pub mod money;
pub mod session;
pub mod trip;

pub use analyzer::{BudgetReport, DeltaStyle, PresentationTier};
pub use category::BudgetCategory;
pub use ledger::{CategoryComparison, Expense, ExpenseId, ExpenseLedger, SpendingStatus};
pub use money::Currency;
pub use session::{Planner, TripPlan, TripSession};
pub use trip::{Interest, TripDetails, TripRequest, TripRequestBuilder};
