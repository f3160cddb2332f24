use std::{fmt, str::FromStr};

use crate::{completion_schema, error::PlannerError, types::response::PayloadCheck};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Dietary requirements a dish is checked against.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "camelCase")]
pub enum DietaryPreference {
    Vegetarian,
    Vegan,
    Jain,
    GlutenFree,
    NoOnionGarlic,
    NutAllergy,
    DairyFree,
}

impl DietaryPreference {
    pub const ALL: [DietaryPreference; 7] = [
        DietaryPreference::Vegetarian,
        DietaryPreference::Vegan,
        DietaryPreference::Jain,
        DietaryPreference::GlutenFree,
        DietaryPreference::NoOnionGarlic,
        DietaryPreference::NutAllergy,
        DietaryPreference::DairyFree,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DietaryPreference::Vegetarian => "vegetarian",
            DietaryPreference::Vegan => "vegan",
            DietaryPreference::Jain => "jain",
            DietaryPreference::GlutenFree => "glutenFree",
            DietaryPreference::NoOnionGarlic => "noOnionGarlic",
            DietaryPreference::NutAllergy => "nutAllergy",
            DietaryPreference::DairyFree => "dairyFree",
        }
    }

    /// Wording used when describing the requirement to the model.
    pub fn prompt_label(self) -> &'static str {
        match self {
            DietaryPreference::Vegetarian => "Vegetarian (no meat or fish)",
            DietaryPreference::Vegan => "Vegan (no animal products)",
            DietaryPreference::Jain => "Jain (no root vegetables, no onion, no garlic)",
            DietaryPreference::GlutenFree => "Gluten-free",
            DietaryPreference::NoOnionGarlic => "No onion or garlic",
            DietaryPreference::NutAllergy => "Nut allergy (avoid all nuts)",
            DietaryPreference::DairyFree => "Dairy-free (no milk products)",
        }
    }
}

impl fmt::Display for DietaryPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DietaryPreference {
    type Err = PlannerError;

    /// Accepts the camelCase tag or a kebab/snake spelling (`gluten-free`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let squashed: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        DietaryPreference::ALL
            .into_iter()
            .find(|pref| pref.as_str().to_ascii_lowercase() == squashed)
            .ok_or_else(|| {
                PlannerError::invalid("dietaryPreferences", format!("unknown preference `{s}`"))
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SpiceLevel {
    Mild,
    Medium,
    Spicy,
    VerySpicy,
}

/// Translated menu, as read from a photo.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[completion_schema]
pub struct MenuTranslation {
    /// Detected language of the menu
    pub menu_language: String,
    /// Type of cuisine (South Indian, Japanese...)
    #[serde(default)]
    pub restaurant_type: Option<String>,
    /// Brief cultural context about the cuisine or ordering customs
    #[serde(default)]
    pub cultural_notes: Option<String>,
    /// Every dish that could be read from the menu
    pub dishes: Vec<TranslatedDish>,
}

impl MenuTranslation {
    pub fn compatible_dishes(&self) -> impl Iterator<Item = &TranslatedDish> {
        self.dishes.iter().filter(|dish| dish.is_compatible)
    }

    pub fn incompatible_dishes(&self) -> impl Iterator<Item = &TranslatedDish> {
        self.dishes.iter().filter(|dish| !dish.is_compatible)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TranslatedDish {
    /// Dish name in the menu's language
    pub original_name: String,
    /// English translation of the name
    pub translated_name: String,
    /// What the dish is, how it is prepared and how it tastes
    pub description: String,
    #[serde(default)]
    pub ingredients: Option<Vec<String>>,
    #[serde(default)]
    pub dietary_tags: Vec<String>,
    #[serde(default)]
    pub spice_level: Option<SpiceLevel>,
    /// Price as printed on the menu
    #[serde(default)]
    pub price: Option<String>,
    /// False when the dish violates any submitted preference
    pub is_compatible: bool,
    /// Why the dish conflicts with the preferences
    #[serde(default)]
    pub warnings: Option<Vec<String>>,
}

impl TranslatedDish {
    pub fn warnings(&self) -> &[String] {
        self.warnings.as_deref().unwrap_or_default()
    }
}

impl PayloadCheck for MenuTranslation {
    fn check(&self) -> Result<(), String> {
        if let Some(dish) = self
            .dishes
            .iter()
            .find(|dish| dish.translated_name.trim().is_empty())
        {
            return Err(format!(
                "has a dish without a translated name (`{}`)",
                dish.original_name
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preference_spellings() {
        assert_eq!(
            "gluten-free".parse::<DietaryPreference>().unwrap(),
            DietaryPreference::GlutenFree
        );
        assert_eq!(
            "noOnionGarlic".parse::<DietaryPreference>().unwrap(),
            DietaryPreference::NoOnionGarlic
        );
        assert_eq!(
            "dairy_free".parse::<DietaryPreference>().unwrap(),
            DietaryPreference::DairyFree
        );
        assert!("keto".parse::<DietaryPreference>().is_err());
    }

    #[test]
    fn test_preference_wire_names() {
        let encoded = serde_json::to_value(DietaryPreference::NutAllergy).unwrap();
        assert_eq!(encoded, "nutAllergy");
    }

    #[test]
    fn test_compatibility_split() {
        let translation: MenuTranslation = serde_json::from_value(serde_json::json!({
            "menuLanguage": "Tamil",
            "dishes": [
                {
                    "originalName": "இட்லி",
                    "translatedName": "Idli",
                    "description": "Steamed rice cakes",
                    "isCompatible": true
                },
                {
                    "originalName": "சிக்கன் 65",
                    "translatedName": "Chicken 65",
                    "description": "Spicy fried chicken",
                    "spiceLevel": "very_spicy",
                    "isCompatible": false,
                    "warnings": ["Contains chicken"]
                }
            ]
        }))
        .unwrap();

        assert_eq!(translation.compatible_dishes().count(), 1);
        let rejected: Vec<_> = translation.incompatible_dishes().collect();
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].spice_level, Some(SpiceLevel::VerySpicy));
        assert_eq!(rejected[0].warnings(), ["Contains chicken".to_string()]);
    }
}
