//! Trip Request Builder: collects and validates the trip form.

use std::{collections::BTreeSet, fmt, str::FromStr};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    core::money::{parse_amount, Currency},
    error::{PlannerError, Result},
};

/// Interest tags the traveler can pick.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Interest {
    Culture,
    Food,
    Adventure,
    Nature,
    Nightlife,
    Shopping,
    Relaxation,
    Photography,
    Art,
    Local,
}

impl Interest {
    pub const ALL: [Interest; 10] = [
        Interest::Culture,
        Interest::Food,
        Interest::Adventure,
        Interest::Nature,
        Interest::Nightlife,
        Interest::Shopping,
        Interest::Relaxation,
        Interest::Photography,
        Interest::Art,
        Interest::Local,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Interest::Culture => "culture",
            Interest::Food => "food",
            Interest::Adventure => "adventure",
            Interest::Nature => "nature",
            Interest::Nightlife => "nightlife",
            Interest::Shopping => "shopping",
            Interest::Relaxation => "relaxation",
            Interest::Photography => "photography",
            Interest::Art => "art",
            Interest::Local => "local",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Interest::Culture => "Culture & History",
            Interest::Food => "Food & Cuisine",
            Interest::Adventure => "Adventure",
            Interest::Nature => "Nature",
            Interest::Nightlife => "Nightlife",
            Interest::Shopping => "Shopping",
            Interest::Relaxation => "Relaxation",
            Interest::Photography => "Photography",
            Interest::Art => "Art & Museums",
            Interest::Local => "Local Experience",
        }
    }
}

impl fmt::Display for Interest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interest {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self> {
        let tag = s.trim().to_ascii_lowercase();
        Interest::ALL
            .into_iter()
            .find(|interest| interest.as_str() == tag)
            .ok_or_else(|| PlannerError::invalid("interests", format!("unknown interest `{s}`")))
    }
}

/// Inclusive day count between two dates.
pub fn trip_days(start: NaiveDate, end: NaiveDate) -> Result<u32> {
    if end < start {
        return Err(PlannerError::invalid(
            "endDate",
            format!("end date {end} is before start date {start}"),
        ));
    }
    let span = (end - start).num_days() + 1;
    u32::try_from(span).map_err(|_| PlannerError::invalid("endDate", "trip is too long"))
}

/// A validated trip request. Only [`TripRequestBuilder::build`] creates one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    traveler_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    from_location: Option<String>,
    destination: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    budget: Decimal,
    currency: Currency,
    travelers: u32,
    interests: BTreeSet<Interest>,
}

impl TripRequest {
    pub fn builder() -> TripRequestBuilder {
        TripRequestBuilder::default()
    }

    pub fn traveler_name(&self) -> Option<&str> {
        self.traveler_name.as_deref()
    }

    pub fn from_location(&self) -> Option<&str> {
        self.from_location.as_deref()
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn budget(&self) -> Decimal {
        self.budget
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn travelers(&self) -> u32 {
        self.travelers
    }

    pub fn interests(&self) -> &BTreeSet<Interest> {
        &self.interests
    }

    /// Always at least 1; the builder rejects inverted date ranges.
    pub fn trip_days(&self) -> u32 {
        trip_days(self.start_date, self.end_date).unwrap_or(1)
    }

    /// The trip echo returned alongside a recommendation.
    pub fn details(&self) -> TripDetails {
        TripDetails {
            traveler_name: self.traveler_name.clone(),
            from_location: self.from_location.clone(),
            destination: self.destination.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
            trip_days: self.trip_days(),
            travelers: self.travelers,
            budget: self.budget,
            currency: self.currency,
        }
    }
}

/// Trip parameters echoed with every plan, including the derived day count.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripDetails {
    pub traveler_name: Option<String>,
    pub from_location: Option<String>,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub trip_days: u32,
    pub travelers: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub budget: Decimal,
    pub currency: Currency,
}

/// Form-style builder; every field may be missing until `build`.
#[derive(Debug, Clone)]
pub struct TripRequestBuilder {
    traveler_name: Option<String>,
    from_location: Option<String>,
    destination: Option<String>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    budget: Option<Decimal>,
    currency: Currency,
    travelers: u32,
    interests: BTreeSet<Interest>,
}

impl Default for TripRequestBuilder {
    fn default() -> Self {
        Self {
            traveler_name: None,
            from_location: None,
            destination: None,
            start_date: None,
            end_date: None,
            budget: None,
            currency: Currency::default(),
            travelers: 1,
            interests: BTreeSet::new(),
        }
    }
}

impl TripRequestBuilder {
    pub fn traveler_name(mut self, name: impl Into<String>) -> Self {
        self.traveler_name = non_blank(name.into());
        self
    }

    pub fn from_location(mut self, origin: impl Into<String>) -> Self {
        self.from_location = non_blank(origin.into());
        self
    }

    pub fn destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = non_blank(destination.into());
        self
    }

    pub fn start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    pub fn end_date(mut self, date: NaiveDate) -> Self {
        self.end_date = Some(date);
        self
    }

    pub fn budget(mut self, budget: Decimal) -> Self {
        self.budget = Some(budget);
        self
    }

    /// Parse a budget typed as text.
    pub fn budget_text(self, text: &str) -> Result<Self> {
        let budget = parse_amount("budget", text)?;
        Ok(self.budget(budget))
    }

    pub fn currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    pub fn travelers(mut self, travelers: u32) -> Self {
        self.travelers = travelers;
        self
    }

    /// Toggle an interest on or off, like the form's chips.
    pub fn toggle_interest(mut self, interest: Interest) -> Self {
        if !self.interests.remove(&interest) {
            self.interests.insert(interest);
        }
        self
    }

    pub fn interest(mut self, interest: Interest) -> Self {
        self.interests.insert(interest);
        self
    }

    pub fn interests(mut self, interests: impl IntoIterator<Item = Interest>) -> Self {
        self.interests.extend(interests);
        self
    }

    /// Validate completeness and ranges. Nothing here touches the network.
    pub fn build(self) -> Result<TripRequest> {
        let destination = self
            .destination
            .ok_or_else(|| PlannerError::invalid("destination", "destination is required"))?;
        let start_date = self
            .start_date
            .ok_or_else(|| PlannerError::invalid("startDate", "start date is required"))?;
        let end_date = self
            .end_date
            .ok_or_else(|| PlannerError::invalid("endDate", "end date is required"))?;
        trip_days(start_date, end_date)?;

        let budget = self
            .budget
            .ok_or_else(|| PlannerError::invalid("budget", "budget is required"))?;
        if budget <= Decimal::ZERO {
            return Err(PlannerError::invalid("budget", "budget must be positive"));
        }

        if self.travelers == 0 {
            return Err(PlannerError::invalid(
                "travelers",
                "at least one traveler is required",
            ));
        }

        if self.interests.is_empty() {
            return Err(PlannerError::invalid(
                "interests",
                "please select at least one interest",
            ));
        }

        Ok(TripRequest {
            traveler_name: self.traveler_name,
            from_location: self.from_location,
            destination,
            start_date,
            end_date,
            budget,
            currency: self.currency,
            travelers: self.travelers,
            interests: self.interests,
        })
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn complete() -> TripRequestBuilder {
        TripRequest::builder()
            .destination("Kyoto")
            .start_date(date(2024, 3, 1))
            .end_date(date(2024, 3, 5))
            .budget(Decimal::from(1000))
            .interest(Interest::Culture)
    }

    #[test]
    fn test_trip_days_is_inclusive() {
        assert_eq!(trip_days(date(2024, 3, 1), date(2024, 3, 5)).unwrap(), 5);
        assert_eq!(trip_days(date(2024, 3, 1), date(2024, 3, 1)).unwrap(), 1);
        assert_eq!(trip_days(date(2024, 2, 28), date(2024, 3, 1)).unwrap(), 3);
    }

    #[test]
    fn test_trip_days_rejects_inverted_range() {
        let err = trip_days(date(2024, 3, 5), date(2024, 3, 1)).unwrap_err();
        assert!(matches!(err, PlannerError::InvalidInput { field: "endDate", .. }));
    }

    #[test]
    fn test_build_defaults() {
        let request = complete().build().unwrap();
        assert_eq!(request.currency(), Currency::USD);
        assert_eq!(request.travelers(), 1);
        assert_eq!(request.trip_days(), 5);
        assert_eq!(request.details().trip_days, 5);
    }

    #[test]
    fn test_missing_fields_are_reported_by_name() {
        let err = TripRequest::builder().build().unwrap_err();
        assert!(matches!(err, PlannerError::InvalidInput { field: "destination", .. }));

        let err = complete().destination("   ").build().unwrap_err();
        assert!(matches!(err, PlannerError::InvalidInput { field: "destination", .. }));
    }

    #[test]
    fn test_budget_and_travelers_must_be_positive() {
        let err = complete().budget(Decimal::ZERO).build().unwrap_err();
        assert!(matches!(err, PlannerError::InvalidInput { field: "budget", .. }));

        let err = complete().travelers(0).build().unwrap_err();
        assert!(matches!(err, PlannerError::InvalidInput { field: "travelers", .. }));

        assert!(complete().budget_text("abc").is_err());
    }

    #[test]
    fn test_interests_must_not_be_empty() {
        let err = complete()
            .toggle_interest(Interest::Culture)
            .build()
            .unwrap_err();
        assert!(matches!(err, PlannerError::InvalidInput { field: "interests", .. }));
    }

    #[test]
    fn test_request_wire_shape() {
        let request = complete()
            .from_location("Delhi")
            .currency(Currency::JPY)
            .travelers(2)
            .interest(Interest::Food)
            .build()
            .unwrap();
        let wire = serde_json::to_value(&request).unwrap();

        assert_eq!(wire["destination"], "Kyoto");
        assert_eq!(wire["fromLocation"], "Delhi");
        assert!(wire.get("travelerName").is_none());
        assert_eq!(wire["startDate"], "2024-03-01");
        assert_eq!(wire["budget"], 1000.0);
        assert_eq!(wire["currency"], "JPY");
        assert_eq!(wire["travelers"], 2);
        assert_eq!(wire["interests"], serde_json::json!(["culture", "food"]));
    }
}
