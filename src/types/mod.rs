//! Typed oracle payloads, decoded strictly at the boundary.

pub mod menu;
pub mod recommendation;
pub mod response;

pub use menu::{DietaryPreference, MenuTranslation, SpiceLevel, TranslatedDish};
pub use recommendation::{BudgetAnalysis, Feasibility, SuggestedBudgetBreakdown, TravelRecommendation};
pub use response::{decode_payload, deserialize_structured_response, PayloadCheck};
