use serde::Serialize;

use super::model::{NoiseLevel, WifiQuality, Workspace};

/// Active directory filters. Every set field is ANDed with the others.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkspaceFilters {
    pub search: String,
    /// Minimum connectivity tier
    pub wifi_quality: Option<WifiQuality>,
    pub noise_level: Option<NoiseLevel>,
    pub require_power_outlets: bool,
    pub require_quiet_zones: bool,
    pub country: Option<String>,
}

impl WorkspaceFilters {
    pub fn matches(&self, workspace: &Workspace) -> bool {
        matches_search(workspace, &self.search)
            && self
                .wifi_quality
                .map_or(true, |tier| matches_wifi(workspace, tier))
            && self
                .noise_level
                .map_or(true, |tier| matches_noise(workspace, tier))
            && matches_power_outlets(workspace, self.require_power_outlets)
            && matches_quiet_zones(workspace, self.require_quiet_zones)
            && self
                .country
                .as_deref()
                .map_or(true, |country| matches_country(workspace, country))
    }

    /// Survivors in input order.
    pub fn apply<'a>(&self, workspaces: &'a [Workspace]) -> Vec<&'a Workspace> {
        workspaces
            .iter()
            .filter(|workspace| self.matches(workspace))
            .collect()
    }

    /// Number of narrowing filters set, search text excluded.
    pub fn active_filter_count(&self) -> usize {
        [
            self.wifi_quality.is_some(),
            self.noise_level.is_some(),
            self.require_power_outlets,
            self.require_quiet_zones,
            self.country.is_some(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    /// Reset every narrowing filter; the search text stays.
    pub fn clear(&mut self) {
        *self = WorkspaceFilters {
            search: std::mem::take(&mut self.search),
            ..WorkspaceFilters::default()
        };
    }
}

/// Case-insensitive substring match on name, city, country or region.
pub fn matches_search(workspace: &Workspace, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    [
        Some(workspace.name.as_str()),
        Some(workspace.city.as_str()),
        Some(workspace.country.as_str()),
        workspace.region.as_deref(),
    ]
    .into_iter()
    .flatten()
    .any(|field| field.to_lowercase().contains(&query))
}

/// Minimum-tier match; an unrated workspace never satisfies a wifi filter.
pub fn matches_wifi(workspace: &Workspace, minimum: WifiQuality) -> bool {
    workspace
        .wifi_quality
        .map_or(false, |quality| quality >= minimum)
}

pub fn matches_noise(workspace: &Workspace, level: NoiseLevel) -> bool {
    workspace.noise_level == Some(level)
}

pub fn matches_power_outlets(workspace: &Workspace, required: bool) -> bool {
    !required || workspace.has_power_outlets()
}

pub fn matches_quiet_zones(workspace: &Workspace, required: bool) -> bool {
    !required || workspace.has_quiet_zones()
}

pub fn matches_country(workspace: &Workspace, country: &str) -> bool {
    workspace.country.eq_ignore_ascii_case(country.trim())
}

/// Workspaces sharing a country, in input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryGroup<'a> {
    pub country: &'a str,
    pub workspaces: Vec<&'a Workspace>,
}

/// Partition by country. Groups appear in first-seen order.
pub fn group_by_country<'a, I>(workspaces: I) -> Vec<CountryGroup<'a>>
where
    I: IntoIterator<Item = &'a Workspace>,
{
    let mut groups: Vec<CountryGroup<'a>> = Vec::new();
    for workspace in workspaces {
        match groups
            .iter_mut()
            .find(|group| group.country == workspace.country)
        {
            Some(group) => group.workspaces.push(workspace),
            None => groups.push(CountryGroup {
                country: &workspace.country,
                workspaces: vec![workspace],
            }),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workspace(name: &str, country: &str) -> Workspace {
        Workspace {
            id: name.to_lowercase(),
            name: name.to_string(),
            city: "City".to_string(),
            country: country.to_string(),
            region: None,
            address: None,
            description: None,
            wifi_speed_mbps: None,
            wifi_quality: None,
            has_power_outlets: None,
            power_outlet_count: None,
            noise_level: None,
            has_quiet_zones: None,
            hours_open: None,
            hours_close: None,
            open_24_hours: None,
            amenities: None,
            average_rating: None,
            review_count: None,
            website_url: None,
            image_url: None,
        }
    }

    #[test]
    fn test_search_covers_region_and_ignores_case() {
        let mut space = workspace("Desk", "Japan");
        assert!(matches_search(&space, ""));
        assert!(matches_search(&space, "JAP"));
        assert!(!matches_search(&space, "kansai"));

        space.region = Some("Kansai".to_string());
        assert!(matches_search(&space, "kansai"));
    }

    #[test]
    fn test_wifi_is_minimum_tier() {
        let mut space = workspace("Desk", "Japan");
        assert!(!matches_wifi(&space, WifiQuality::Poor));

        space.wifi_quality = Some(WifiQuality::Good);
        assert!(matches_wifi(&space, WifiQuality::Moderate));
        assert!(matches_wifi(&space, WifiQuality::Good));
        assert!(!matches_wifi(&space, WifiQuality::Excellent));
    }

    #[test]
    fn test_noise_is_exact() {
        let mut space = workspace("Desk", "Japan");
        space.noise_level = Some(NoiseLevel::Silent);
        assert!(matches_noise(&space, NoiseLevel::Silent));
        assert!(!matches_noise(&space, NoiseLevel::Quiet));
    }

    #[test]
    fn test_boolean_filters_only_narrow_when_set() {
        let mut space = workspace("Desk", "Japan");
        space.has_power_outlets = Some(false);
        assert!(matches_power_outlets(&space, false));
        assert!(!matches_power_outlets(&space, true));
        assert!(matches_quiet_zones(&space, false));
        assert!(!matches_quiet_zones(&space, true));
    }

    #[test]
    fn test_active_count_and_clear() {
        let mut filters = WorkspaceFilters {
            search: "tokyo".to_string(),
            wifi_quality: Some(WifiQuality::Good),
            require_quiet_zones: true,
            country: Some("Japan".to_string()),
            ..WorkspaceFilters::default()
        };
        assert_eq!(filters.active_filter_count(), 3);

        filters.clear();
        assert_eq!(filters.active_filter_count(), 0);
        assert_eq!(filters.search, "tokyo");
    }

    #[test]
    fn test_group_by_country_keeps_first_seen_order() {
        let spaces = vec![
            workspace("A", "Spain"),
            workspace("B", "Japan"),
            workspace("C", "Spain"),
        ];
        let groups = group_by_country(&spaces);
        let countries: Vec<&str> = groups.iter().map(|group| group.country).collect();
        assert_eq!(countries, ["Spain", "Japan"]);
        assert_eq!(groups[0].workspaces.len(), 2);
        assert_eq!(groups[0].workspaces[1].name, "C");
    }
}
