use std::{collections::BTreeSet, time::Duration};

use anyhow::{anyhow, bail, Context};
use chrono::NaiveDate;
use clap::{Arg, ArgAction, ArgMatches, Command};
use rust_decimal::Decimal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::{
    config::{OracleConfig, DEFAULT_MODEL},
    core::{money::parse_amount, BudgetCategory, Currency, Interest, TripSession},
    error::PlannerError,
    oracle::{LlmOracle, MenuImage, MenuTranslationOracle},
    types::DietaryPreference,
    workspace::{group_by_country, NoiseLevel, WifiQuality, Workspace, WorkspaceFilters},
    Planner, TripRequest,
};

/// CLI entry point for the trip-planner tool
pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let matches = command().get_matches();
    match matches.subcommand() {
        Some(("plan", sub)) => run_plan(sub).await,
        Some(("workspaces", sub)) => run_workspaces(sub).await,
        Some(("menu", sub)) => run_menu(sub).await,
        _ => bail!("a subcommand is required"),
    }
}

fn command() -> Command {
    Command::new("trip-planner")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Plan a trip within budget, track expenses, find workspaces and read menus")
        .subcommand_required(true)
        .arg(
            Arg::new("api-key")
                .short('k')
                .long("api-key")
                .value_name("KEY")
                .global(true)
                .help("API key (or set OPENAI_API_KEY env var)"),
        )
        .arg(
            Arg::new("base-url")
                .short('u')
                .long("base-url")
                .value_name("URL")
                .global(true)
                .help("Chat completions base URL (or set OPENAI_BASE_URL / OPENROUTER_BASE_URL)"),
        )
        .arg(
            Arg::new("model")
                .short('m')
                .long("model")
                .value_name("MODEL")
                .global(true)
                .help(format!(
                    "Model to use (or set TRIP_PLANNER_MODEL, default {DEFAULT_MODEL})"
                )),
        )
        .arg(
            Arg::new("timeout")
                .short('t')
                .long("timeout")
                .value_name("SECONDS")
                .global(true)
                .value_parser(clap::value_parser!(u64))
                .help("Request timeout in seconds"),
        )
        .subcommand(
            Command::new("plan")
                .about("Ask for a recommendation and budget verdict, then log expenses against it")
                .arg(Arg::new("destination").required(true).index(1))
                .arg(Arg::new("start").long("start").value_name("YYYY-MM-DD").required(true))
                .arg(Arg::new("end").long("end").value_name("YYYY-MM-DD").required(true))
                .arg(Arg::new("budget").long("budget").value_name("AMOUNT").required(true))
                .arg(
                    Arg::new("currency")
                        .long("currency")
                        .value_name("CODE")
                        .default_value("USD"),
                )
                .arg(
                    Arg::new("travelers")
                        .long("travelers")
                        .value_name("COUNT")
                        .value_parser(clap::value_parser!(u32))
                        .default_value("1"),
                )
                .arg(
                    Arg::new("interest")
                        .long("interest")
                        .value_name("TAG")
                        .action(ArgAction::Append)
                        .help("culture, food, adventure, nature, nightlife, shopping, relaxation, photography, art, local"),
                )
                .arg(Arg::new("from").long("from").value_name("ORIGIN"))
                .arg(Arg::new("name").long("name").value_name("TRAVELER"))
                .arg(
                    Arg::new("expense")
                        .long("expense")
                        .value_name("CATEGORY:AMOUNT[:DESCRIPTION]")
                        .action(ArgAction::Append),
                ),
        )
        .subcommand(
            Command::new("workspaces")
                .about("Filter a workspace export and group it by country")
                .arg(Arg::new("file").long("file").value_name("PATH").required(true))
                .arg(Arg::new("search").long("search").value_name("TEXT"))
                .arg(Arg::new("wifi").long("wifi").value_name("TIER"))
                .arg(Arg::new("noise").long("noise").value_name("TIER"))
                .arg(Arg::new("power").long("power").action(ArgAction::SetTrue))
                .arg(Arg::new("quiet").long("quiet").action(ArgAction::SetTrue))
                .arg(Arg::new("country").long("country").value_name("COUNTRY")),
        )
        .subcommand(
            Command::new("menu")
                .about("Translate a menu photo and flag dishes against dietary needs")
                .arg(Arg::new("image").long("image").value_name("PATH").required(true))
                .arg(
                    Arg::new("diet")
                        .long("diet")
                        .value_name("PREFERENCE")
                        .action(ArgAction::Append),
                ),
        )
}

/// Environment first, then flags on top. Global flags are read from the
/// subcommand matches, where clap propagates them.
fn oracle_config(matches: &ArgMatches) -> anyhow::Result<OracleConfig> {
    let api_key = matches.get_one::<String>("api-key");
    let mut config = match (OracleConfig::from_env(), api_key) {
        (Ok(config), _) => config,
        (Err(_), Some(key)) => OracleConfig::new(key.clone()),
        (Err(err), None) => {
            return Err(anyhow::Error::new(err).context(
                "API key is required. Set OPENAI_API_KEY environment variable or use --api-key",
            ))
        }
    };

    if let Some(key) = api_key {
        config.api_key = key.clone();
    }

    if let Some(base_url) = matches.get_one::<String>("base-url") {
        config.base_url = base_url.clone();
    }
    if let Some(model) = matches.get_one::<String>("model") {
        config.model = model.clone();
    }
    if let Some(seconds) = matches.get_one::<u64>("timeout") {
        config.timeout = Duration::from_secs(*seconds);
    }
    Ok(config)
}

fn parse_date(field: &str, value: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("--{field} must be YYYY-MM-DD, got `{value}`"))
}

/// `category:amount[:description]`
fn parse_expense_arg(value: &str) -> anyhow::Result<(BudgetCategory, Decimal, Option<String>)> {
    let mut parts = value.splitn(3, ':');
    let category = parts
        .next()
        .filter(|part| !part.is_empty())
        .ok_or_else(|| anyhow!("expense `{value}` is missing a category"))?
        .parse::<BudgetCategory>()?;
    let amount = parts
        .next()
        .ok_or_else(|| anyhow!("expense `{value}` is missing an amount"))?;
    let amount = parse_amount("amount", amount)?;
    if amount <= Decimal::ZERO {
        return Err(PlannerError::invalid(
            "amount",
            format!("expense amount must be positive, got {amount}"),
        )
        .into());
    }
    let description = parts.next().map(str::to_string);
    Ok((category, amount, description))
}

async fn run_plan(matches: &ArgMatches) -> anyhow::Result<()> {
    let mut builder = TripRequest::builder()
        .destination(required(matches, "destination")?)
        .start_date(parse_date("start", required(matches, "start")?)?)
        .end_date(parse_date("end", required(matches, "end")?)?)
        .budget_text(required(matches, "budget")?)?
        .currency(required(matches, "currency")?.parse::<Currency>()?)
        .travelers(matches.get_one::<u32>("travelers").copied().unwrap_or(1));

    for tag in matches.get_many::<String>("interest").into_iter().flatten() {
        builder = builder.interest(tag.parse::<Interest>()?);
    }
    if let Some(origin) = matches.get_one::<String>("from") {
        builder = builder.from_location(origin.as_str());
    }
    if let Some(name) = matches.get_one::<String>("name") {
        builder = builder.traveler_name(name.as_str());
    }
    let request = builder.build()?;

    let expenses = matches
        .get_many::<String>("expense")
        .into_iter()
        .flatten()
        .map(|value| parse_expense_arg(value))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let oracle = LlmOracle::from_config(oracle_config(matches)?);
    info!("Planning trip to {} with model {}", request.destination(), oracle.model());

    let mut planner = Planner::new(oracle);
    if let Err(err) = planner.plan_trip(request).await {
        error!("Trip planning failed: {}", err);
        return Err(err.into());
    }

    let Some(session) = planner.session_mut() else {
        bail!("planner returned without a session");
    };
    for (category, amount, description) in expenses {
        session
            .ledger_mut()
            .add_expense(category, description.as_deref(), amount)?;
    }
    print_session(session);
    Ok(())
}

fn print_session(session: &TripSession) {
    let report = session.report();
    let trip = &session.plan().trip;
    let currency = report.currency;

    println!(
        "\n{} · {} to {} ({} days, {} traveler(s))",
        trip.destination, trip.start_date, trip.end_date, trip.trip_days, trip.travelers
    );
    println!("\n[{}] {}", report.label(), report.message);
    println!("  Budget:          {}", currency.format(report.total_budget));
    println!("  Estimated cost:  {}", currency.format(report.estimated_total_cost));
    println!("  Difference:      {}", report.formatted_delta());
    println!(
        "  Per person/day:  {}",
        currency.format(report.daily_budget_per_person)
    );
    if report.verdict_conflict {
        println!("  ! The estimate exceeds the budget although the verdict is feasible");
    }
    for suggestion in &report.suggestions {
        println!("  - {suggestion}");
    }

    let recommendation = &session.plan().recommendation;
    let picks = &recommendation.recommendations;
    println!("\nRecommendations");
    if picks.is_empty() {
        println!("  (none)");
    }
    let cost = |amount: Option<Decimal>| {
        amount
            .map(|amount| currency.format(amount))
            .unwrap_or_else(|| "price n/a".to_string())
    };
    for attraction in &picks.attractions {
        println!("  * {} ({})", attraction.name, cost(attraction.estimated_cost));
    }
    for restaurant in &picks.restaurants {
        println!("  * {} - {}", restaurant.name, restaurant.cuisine);
    }
    for activity in &picks.activities {
        println!("  * {} ({})", activity.name, cost(activity.estimated_cost));
    }
    for place in &picks.nearby_places {
        println!("  * Day trip: {}", place.name);
    }
    if let Some(flights) = &recommendation.flight_details {
        for flight in &flights.flights {
            println!(
                "  ✈ {} {} ({})",
                flight.airline,
                flight.route,
                currency.format(flight.estimated_price)
            );
        }
    }
    for tip in &recommendation.travel_tips {
        println!("  tip: {tip}");
    }

    let ledger = session.ledger();
    if ledger.is_empty() {
        return;
    }
    println!("\nExpenses");
    for expense in ledger.recent() {
        println!(
            "  {} {:<10} {:>14}  {}",
            expense.id,
            expense.category.label(),
            currency.format(expense.amount),
            expense.description
        );
    }
    println!(
        "\n  {:<14}{:>16}{:>16}{:>16}",
        "Category", "Suggested", "Spent", "Left"
    );
    for row in session.comparison() {
        println!(
            "  {:<14}{:>16}{:>16}{:>16}",
            row.category.label(),
            currency.format(row.suggested),
            currency.format(row.actual),
            currency.format_signed(row.headroom())
        );
    }
    let percent = ledger
        .percent_spent(trip.budget)
        .map(|percent| format!("{}%", percent.round_dp(1)))
        .unwrap_or_else(|| "n/a".to_string());
    println!(
        "\n  Spent {} of {} ({percent}), remaining {} - {:?}",
        currency.format(ledger.total_spent()),
        currency.format(trip.budget),
        currency.format(ledger.remaining(trip.budget)),
        session.spending_status()
    );
}

async fn run_workspaces(matches: &ArgMatches) -> anyhow::Result<()> {
    let path = required(matches, "file")?;
    let rows = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("cannot read {path}"))?;
    let workspaces = Workspace::from_rows_json(&rows)?;

    let filters = WorkspaceFilters {
        search: matches
            .get_one::<String>("search")
            .cloned()
            .unwrap_or_default(),
        wifi_quality: matches
            .get_one::<String>("wifi")
            .map(|tier| tier.parse::<WifiQuality>())
            .transpose()?,
        noise_level: matches
            .get_one::<String>("noise")
            .map(|tier| tier.parse::<NoiseLevel>())
            .transpose()?,
        require_power_outlets: matches.get_flag("power"),
        require_quiet_zones: matches.get_flag("quiet"),
        country: matches.get_one::<String>("country").cloned(),
    };

    let survivors = filters.apply(&workspaces);
    println!(
        "Found {} workspaces ({} filters active)",
        survivors.len(),
        filters.active_filter_count()
    );
    if survivors.is_empty() {
        println!("No workspaces match your filters");
        return Ok(());
    }

    for group in group_by_country(survivors) {
        println!("\n{} ({})", group.country, group.workspaces.len());
        for workspace in group.workspaces {
            let wifi = workspace
                .wifi_quality
                .map(|tier| tier.as_str())
                .unwrap_or("unknown");
            println!(
                "  {} - {} · wifi {} · {}",
                workspace.name,
                workspace.city,
                wifi,
                workspace.hours_label()
            );
        }
    }
    Ok(())
}

async fn run_menu(matches: &ArgMatches) -> anyhow::Result<()> {
    let image = MenuImage::from_file(required(matches, "image")?).await?;
    let preferences = matches
        .get_many::<String>("diet")
        .into_iter()
        .flatten()
        .map(|value| value.parse::<DietaryPreference>())
        .collect::<Result<BTreeSet<_>, _>>()?;

    let oracle = LlmOracle::from_config(oracle_config(matches)?);
    info!(
        "Translating {} menu image with model {}",
        image.mime_type(),
        oracle.vision_model()
    );
    let translation = oracle.translate_menu(&image, &preferences).await?;

    println!("Menu language: {}", translation.menu_language);
    if let Some(kind) = &translation.restaurant_type {
        println!("Cuisine: {kind}");
    }
    if let Some(notes) = &translation.cultural_notes {
        println!("{notes}");
    }
    for dish in &translation.dishes {
        let marker = if dish.is_compatible { "✓" } else { "✗" };
        println!(
            "\n{marker} {} ({})",
            dish.translated_name, dish.original_name
        );
        println!("  {}", dish.description);
        if let Some(price) = &dish.price {
            println!("  price: {price}");
        }
        for warning in dish.warnings() {
            println!("  ! {warning}");
        }
    }
    Ok(())
}

fn required<'a>(matches: &'a ArgMatches, id: &str) -> anyhow::Result<&'a str> {
    matches
        .get_one::<String>(id)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("missing --{id}"))
}
