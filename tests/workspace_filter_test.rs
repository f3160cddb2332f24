use trip_planner::{
    group_by_country,
    workspace::{filter::matches_wifi, NoiseLevel, WifiQuality},
    Workspace, WorkspaceFilters,
};

const ROWS: &str = r#"[
    {"id": "1", "name": "Selina Hub", "city": "Lisbon", "country": "Portugal",
     "wifi_quality": "excellent", "noise_level": "moderate", "has_power_outlets": true},
    {"id": "2", "name": "Library Nook", "city": "Porto", "country": "Portugal",
     "wifi_quality": "poor", "noise_level": "silent", "has_quiet_zones": true},
    {"id": "3", "name": "Dojo", "city": "Canggu", "country": "Indonesia", "region": "Bali",
     "wifi_quality": "good", "noise_level": "moderate", "has_power_outlets": true,
     "has_quiet_zones": true, "open_24_hours": true},
    {"id": "4", "name": "Beach Shack", "city": "Ubud", "country": "Indonesia", "region": "Bali",
     "noise_level": "noisy"},
    {"id": "5", "name": "Startup Garage", "city": "Medellín", "country": "Colombia",
     "wifi_quality": "moderate", "has_power_outlets": false}
]"#;

fn rows() -> Vec<Workspace> {
    Workspace::from_rows_json(ROWS).unwrap()
}

fn names<'a>(workspaces: &[&'a Workspace]) -> Vec<&'a str> {
    workspaces.iter().map(|workspace| workspace.name.as_str()).collect()
}

#[test]
fn test_moderate_wifi_includes_excellent_excludes_poor() {
    let rows = rows();
    let filters = WorkspaceFilters {
        wifi_quality: Some(WifiQuality::Moderate),
        ..WorkspaceFilters::default()
    };
    let survivors = names(&filters.apply(&rows));
    assert!(survivors.contains(&"Selina Hub"));
    assert!(!survivors.contains(&"Library Nook"));
    assert!(!survivors.contains(&"Beach Shack"));
    assert_eq!(survivors, ["Selina Hub", "Dojo", "Startup Garage"]);
}

#[test]
fn test_wifi_filter_is_monotone() {
    for workspace in &rows() {
        if matches_wifi(workspace, WifiQuality::Excellent) {
            assert!(matches_wifi(workspace, WifiQuality::Good));
        }
        if matches_wifi(workspace, WifiQuality::Good) {
            assert!(matches_wifi(workspace, WifiQuality::Moderate));
        }
    }
}

#[test]
fn test_noise_filter_is_exact() {
    let rows = rows();
    let filters = WorkspaceFilters {
        noise_level: Some(NoiseLevel::Silent),
        ..WorkspaceFilters::default()
    };
    assert_eq!(names(&filters.apply(&rows)), ["Library Nook"]);
}

#[test]
fn test_predicates_are_anded() {
    let rows = rows();
    let filters = WorkspaceFilters {
        search: "bali".to_string(),
        require_power_outlets: true,
        require_quiet_zones: true,
        ..WorkspaceFilters::default()
    };
    assert_eq!(names(&filters.apply(&rows)), ["Dojo"]);
    assert_eq!(filters.active_filter_count(), 2);
}

#[test]
fn test_unset_boolean_filters_do_not_require_false() {
    let rows = rows();
    let survivors = WorkspaceFilters::default().apply(&rows);
    assert_eq!(survivors.len(), rows.len());
}

#[test]
fn test_country_filter_ignores_case() {
    let rows = rows();
    let filters = WorkspaceFilters {
        country: Some("indonesia".to_string()),
        ..WorkspaceFilters::default()
    };
    assert_eq!(names(&filters.apply(&rows)), ["Dojo", "Beach Shack"]);
}

#[test]
fn test_grouping_is_a_partition() {
    let rows = rows();
    let filters = WorkspaceFilters {
        search: "o".to_string(),
        ..WorkspaceFilters::default()
    };
    let survivors = filters.apply(&rows);
    let groups = group_by_country(survivors.iter().copied());

    let total: usize = groups.iter().map(|group| group.workspaces.len()).sum();
    assert_eq!(total, survivors.len());

    for workspace in &survivors {
        let owners = groups
            .iter()
            .filter(|group| {
                group
                    .workspaces
                    .iter()
                    .any(|member| member.id == workspace.id)
            })
            .count();
        assert_eq!(owners, 1);
    }

    let countries: Vec<&str> = groups.iter().map(|group| group.country).collect();
    assert_eq!(countries, ["Portugal", "Indonesia", "Colombia"]);
}
