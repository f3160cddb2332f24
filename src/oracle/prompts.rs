use std::collections::BTreeSet;

use crate::{core::trip::TripRequest, types::DietaryPreference};

const TRAVEL_ADVISOR_PROMPT: &str = "You are an expert travel advisor specializing in personalized trip planning. You analyze budgets realistically and provide honest assessments.

Budget verdict:
- feasibility is \"feasible\" when the budget covers the trip, \"too_low\" when it cannot, \"too_high\" when it is far more than the destination needs.
- estimatedTotalCost is your estimate for the whole trip, all travelers, in the traveler's currency.
- Give adjustmentSuggestions whenever the verdict is not feasible.

Flights:
- Only when an origin is given, include realistic flight options: common airlines on the route, typical durations, prices that fit the budget, economy for tight budgets and premium or business when the budget allows.
- Include alternative transport (trains, buses, ferries) when applicable and a booking tip.

Nearby places:
- Always include 3-5 day-trip destinations reachable from the main destination, with how to get there.

Images:
- imageUrl fields must be real Unsplash photo URLs in the form https://images.unsplash.com/photo-[PHOTO_ID]?w=800&h=600&fit=crop";

const MENU_TRANSLATOR_PROMPT: &str = "You are an expert food translator and cultural guide specializing in menu translation. Your task is to:

1. Identify the language of the menu
2. Extract all food items from the image
3. Translate dish names to English
4. Describe each dish: what it is, how it is prepared, how it tastes
5. Identify ingredients and dietary tags
6. Flag dishes against the user's dietary requirements";

const MENU_TRANSLATOR_RULES: &str = "Important:
- Set isCompatible to false if the dish violates ANY of the user's dietary requirements
- Add specific warnings explaining why a dish is incompatible
- Explain traditional dishes a foreign visitor would not recognize
- Include cultural eating tips in culturalNotes when relevant
- If you can't read part of the menu clearly, still include what you can identify";

pub(crate) const MENU_USER_PROMPT: &str =
    "Please analyze this menu image and translate all dishes:";

pub fn recommendation_system_prompt() -> &'static str {
    TRAVEL_ADVISOR_PROMPT
}

/// Describe the trip to the model. The flight section is only requested
/// when the traveler gave an origin.
pub fn recommendation_user_prompt(request: &TripRequest) -> String {
    let mut lines = vec![format!(
        "Plan a trip to {} for {} traveler(s).",
        request.destination(),
        request.travelers()
    )];
    if let Some(name) = request.traveler_name() {
        lines.push(format!("Traveler name: {name}"));
    }
    if let Some(origin) = request.from_location() {
        lines.push(format!("Traveling from: {origin}"));
    }
    lines.push(format!(
        "Dates: {} to {} ({} days)",
        request.start_date(),
        request.end_date(),
        request.trip_days()
    ));
    lines.push(format!(
        "Total Budget: {} {}",
        request.budget(),
        request.currency()
    ));
    let interests: Vec<&str> = request
        .interests()
        .iter()
        .map(|interest| interest.as_str())
        .collect();
    lines.push(format!("Interests: {}", interests.join(", ")));

    lines.push(String::new());
    lines.push(
        "Analyze if this budget is realistic for this destination and trip duration. Consider:"
            .to_string(),
    );
    lines.push("- Average accommodation costs".to_string());
    lines.push("- Food and dining expenses".to_string());
    lines.push("- Activity and attraction costs".to_string());
    lines.push("- Local transportation".to_string());
    if let Some(origin) = request.from_location() {
        lines.push(format!(
            "- Flight options from {origin} to {}: 2-3 options with different airlines, priced within the {} {} budget, plus alternative transport and booking tips",
            request.destination(),
            request.budget(),
            request.currency()
        ));
    }
    lines.push("- Miscellaneous expenses".to_string());
    lines.push(String::new());
    lines.push(
        "If the budget is too low, explain why and suggest either a higher budget or ways to reduce costs."
            .to_string(),
    );
    lines.push(
        "If the budget is too high for the destination, suggest premium experiences or additional activities."
            .to_string(),
    );
    lines.push(String::new());
    lines.push("Provide 4-5 recommendations per category, tailored to the interests and budget.".to_string());
    if request.from_location().is_none() {
        lines.push("Skip flightDetails: no origin was provided.".to_string());
    }

    lines.join("\n")
}

pub fn dietary_context(preferences: &BTreeSet<DietaryPreference>) -> String {
    if preferences.is_empty() {
        return "No specific dietary restrictions".to_string();
    }
    let labels: Vec<&str> = preferences
        .iter()
        .map(|preference| preference.prompt_label())
        .collect();
    format!("User dietary requirements: {}", labels.join(", "))
}

pub fn menu_system_prompt(preferences: &BTreeSet<DietaryPreference>) -> String {
    format!(
        "{}\n\n{}\n\n{}",
        MENU_TRANSLATOR_PROMPT,
        dietary_context(preferences),
        MENU_TRANSLATOR_RULES
    )
}
