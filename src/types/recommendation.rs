//! Recommendation Oracle payload: budget verdict, breakdown, itinerary ideas.

use crate::{completion_schema, core::category::BudgetCategory, types::response::PayloadCheck};
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Full trip recommendation returned by the travel advisor model.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[completion_schema]
pub struct TravelRecommendation {
    /// Honest assessment of whether the budget fits the trip
    pub budget_analysis: BudgetAnalysis,
    /// Recommendations per category, tailored to interests and budget
    #[serde(default)]
    pub recommendations: Recommendations,
    /// Suggested allocation of the total budget per spending category
    pub suggested_budget_breakdown: SuggestedBudgetBreakdown,
    /// Helpful tips for this destination
    #[serde(default)]
    pub travel_tips: Vec<String>,
    /// Flight and ground transport options, only when an origin was given
    #[serde(default)]
    pub flight_details: Option<FlightDetails>,
}

/// Verdict on the traveler's budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Feasibility {
    Feasible,
    TooLow,
    TooHigh,
}

impl Feasibility {
    pub fn as_str(self) -> &'static str {
        match self {
            Feasibility::Feasible => "feasible",
            Feasibility::TooLow => "too_low",
            Feasibility::TooHigh => "too_high",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BudgetAnalysis {
    /// feasible, too_low or too_high
    pub feasibility: Feasibility,
    /// Daily budget available per traveler
    #[schemars(with = "f64")]
    pub daily_budget_per_person: Decimal,
    /// Estimated cost of the whole trip
    #[schemars(with = "f64")]
    pub estimated_total_cost: Decimal,
    /// Estimated transport cost from the origin, if one was given
    #[serde(default)]
    #[schemars(with = "Option<f64>")]
    pub estimated_transport_from_origin: Option<Decimal>,
    /// Explanation of the budget situation
    pub message: String,
    /// Ways to adjust the plan when the budget is not feasible
    #[serde(default)]
    pub adjustment_suggestions: Vec<String>,
}

/// Suggested per-category allocation. Nothing forces it to sum to the budget.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedBudgetBreakdown {
    #[serde(default)]
    #[schemars(with = "Option<f64>")]
    pub accommodation: Option<Decimal>,
    #[serde(default)]
    #[schemars(with = "Option<f64>")]
    pub food: Option<Decimal>,
    #[serde(default)]
    #[schemars(with = "Option<f64>")]
    pub activities: Option<Decimal>,
    #[serde(default)]
    #[schemars(with = "Option<f64>")]
    pub transport: Option<Decimal>,
    /// Flights from the origin; not a ledger category
    #[serde(default)]
    #[schemars(with = "Option<f64>")]
    pub flights: Option<Decimal>,
    #[serde(default)]
    #[schemars(with = "Option<f64>")]
    pub miscellaneous: Option<Decimal>,
}

impl SuggestedBudgetBreakdown {
    /// Allocation for a ledger category, zero when the oracle gave none.
    pub fn allocation(&self, category: BudgetCategory) -> Decimal {
        let value = match category {
            BudgetCategory::Accommodation => self.accommodation,
            BudgetCategory::Food => self.food,
            BudgetCategory::Activities => self.activities,
            BudgetCategory::Transport => self.transport,
            BudgetCategory::Miscellaneous => self.miscellaneous,
        };
        value.unwrap_or(Decimal::ZERO)
    }

    /// Sum over the ledger categories (flights excluded).
    pub fn category_total(&self) -> Decimal {
        BudgetCategory::ALL
            .into_iter()
            .map(|category| self.allocation(category))
            .sum()
    }

    fn amounts(&self) -> [(&'static str, Option<Decimal>); 6] {
        [
            ("accommodation", self.accommodation),
            ("food", self.food),
            ("activities", self.activities),
            ("transport", self.transport),
            ("flights", self.flights),
            ("miscellaneous", self.miscellaneous),
        ]
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Recommendations {
    #[serde(default)]
    pub attractions: Vec<Attraction>,
    #[serde(default)]
    pub restaurants: Vec<Restaurant>,
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub accommodations: Vec<Accommodation>,
    #[serde(default)]
    pub local_experiences: Vec<LocalExperience>,
    #[serde(default)]
    pub nearby_places: Vec<NearbyPlace>,
}

impl Recommendations {
    pub fn is_empty(&self) -> bool {
        self.attractions.is_empty()
            && self.restaurants.is_empty()
            && self.activities.is_empty()
            && self.accommodations.is_empty()
            && self.local_experiences.is_empty()
            && self.nearby_places.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Attraction {
    pub name: String,
    pub description: String,
    #[serde(default)]
    #[schemars(with = "Option<f64>")]
    pub estimated_cost: Option<Decimal>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub best_time: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum PriceRange {
    Budget,
    Moderate,
    Upscale,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub name: String,
    pub cuisine: String,
    pub price_range: PriceRange,
    #[serde(default)]
    #[schemars(with = "Option<f64>")]
    pub average_meal_cost: Option<Decimal>,
    #[serde(default)]
    pub specialty: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Moderate,
    Challenging,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub name: String,
    pub description: String,
    #[serde(default)]
    #[schemars(with = "Option<f64>")]
    pub estimated_cost: Option<Decimal>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Accommodation {
    /// Kind of lodging (hostel, ryokan, boutique hotel...)
    #[serde(rename = "type")]
    pub kind: String,
    /// Price range per night, free text
    pub price_range: String,
    pub description: String,
    #[serde(default)]
    pub amenities: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocalExperience {
    pub name: String,
    pub description: String,
    #[serde(default)]
    #[schemars(with = "Option<f64>")]
    pub estimated_cost: Option<Decimal>,
    #[serde(default)]
    pub cultural_note: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NearbyPlace {
    pub name: String,
    pub distance_from_destination: String,
    pub description: String,
    #[serde(default)]
    #[schemars(with = "Option<f64>")]
    pub estimated_day_trip_cost: Option<Decimal>,
    #[serde(default)]
    pub recommended_duration: Option<String>,
    #[serde(default)]
    pub transport_from_destination: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FlightDetails {
    pub available: bool,
    #[serde(default)]
    pub flights: Vec<FlightOption>,
    #[serde(default)]
    pub alternative_transport: Vec<AlternativeTransport>,
    #[serde(default)]
    pub best_time_to_book: Option<String>,
    #[serde(default)]
    pub price_note: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum FlightType {
    #[serde(rename = "direct")]
    Direct,
    #[serde(rename = "1-stop")]
    OneStop,
    #[serde(rename = "2-stop")]
    TwoStop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum CabinClass {
    Economy,
    PremiumEconomy,
    Business,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FlightOption {
    pub airline: String,
    /// e.g. "Delhi → Tokyo"
    pub route: String,
    #[schemars(with = "f64")]
    pub estimated_price: Decimal,
    #[serde(default)]
    pub flight_duration: Option<String>,
    #[serde(default)]
    pub flight_type: Option<FlightType>,
    #[serde(default)]
    pub class_recommendation: Option<CabinClass>,
    #[serde(default)]
    pub booking_tip: Option<String>,
    #[serde(default)]
    pub budget_friendly: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AlternativeTransport {
    /// train, bus, ferry...
    pub mode: String,
    pub route: String,
    #[schemars(with = "f64")]
    pub estimated_price: Decimal,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

fn non_negative(field: &str, value: Option<Decimal>) -> Result<(), String> {
    match value {
        Some(amount) if amount.is_sign_negative() && !amount.is_zero() => {
            Err(format!("has negative `{field}` ({amount})"))
        }
        _ => Ok(()),
    }
}

impl PayloadCheck for TravelRecommendation {
    fn check(&self) -> Result<(), String> {
        let analysis = &self.budget_analysis;
        non_negative("estimatedTotalCost", Some(analysis.estimated_total_cost))?;
        non_negative("dailyBudgetPerPerson", Some(analysis.daily_budget_per_person))?;
        non_negative(
            "estimatedTransportFromOrigin",
            analysis.estimated_transport_from_origin,
        )?;

        for (field, amount) in self.suggested_budget_breakdown.amounts() {
            non_negative(field, amount)?;
        }

        if let Some(flights) = &self.flight_details {
            for flight in &flights.flights {
                non_negative("estimatedPrice", Some(flight.estimated_price))?;
            }
            for transport in &flights.alternative_transport {
                non_negative("estimatedPrice", Some(transport.estimated_price))?;
            }
        }

        Ok(())
    }
}
