use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use serde_json::json;
use tracing::debug;

use weatherdash::cli::{self, Cli, Commands, DetailArgs};
use weatherdash::{
    CityRef, CityRegistry, Dashboard, DashboardConfig, DashboardError, FilterCriteria,
    TemperatureBounds, WeatherFetcher, WeatherRecord, detail, telemetry, weather,
};

/// Exit status of a detail lookup that found no city or no data
const NOT_FOUND_EXIT: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            report(&e, verbose);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let mut config = DashboardConfig::load_from_path(cli.config.clone())?;
    if let Some(source) = cli.source {
        config.weather.source = source.into();
    }
    telemetry::init(&config.logging, cli.verbose)?;
    debug!("Configuration loaded: source={:?}", config.weather.source);

    let source = weather::from_config(&config.weather)?;
    let dashboard = Dashboard::new(
        CityRegistry::top_cities(),
        WeatherFetcher::new(source, config.weather.missing_policy),
    );

    match cli.command {
        Commands::List(args) => {
            let loaded = dashboard.reload().await?;
            // unset range filters start at the data's own range
            let criteria = FilterCriteria::try_from(args)?
                .with_default_bounds(TemperatureBounds::from_records(&loaded.records));
            let view = dashboard.view(&criteria).await?;
            if cli.json {
                print_json(&json!({
                    "source": loaded.source,
                    "loaded_at": loaded.loaded_at,
                    "missing": loaded.missing,
                    "view": view,
                }))?;
            } else {
                print!("{}", cli::render_view(&view, dashboard.registry()));
            }
        }
        Commands::Detail(args) => {
            let (city, record) = match lookup_detail(&dashboard, &args).await {
                Ok(found) => found,
                Err(e) if e.is_not_found() => {
                    if cli.json {
                        let status = match e {
                            DashboardError::CityNotFound { .. } => "city_not_found",
                            _ => "no_data",
                        };
                        print_json(&json!({
                            "status": status,
                            "message": e.user_message(),
                        }))?;
                    } else {
                        println!("{}", e.user_message());
                    }
                    return Ok(ExitCode::from(NOT_FOUND_EXIT));
                }
                Err(e) => return Err(e.into()),
            };
            if cli.json {
                print_json(&json!({
                    "city": city,
                    "record": record,
                    "icon_url": record.icon_url(),
                }))?;
            } else {
                print!("{}", cli::render_detail(&record, Some(&city)));
            }
        }
        Commands::Cities => {
            let registry = dashboard.registry();
            if cli.json {
                print_json(&registry.cities())?;
            } else {
                print!("{}", cli::render_cities(registry));
            }
        }
        Commands::Options => {
            dashboard.reload().await?;
            let view = dashboard.view(&FilterCriteria::default()).await?;
            if cli.json {
                print_json(&json!({
                    "conditions": view.conditions,
                    "continents": view.continents,
                    "temperature_bounds": view.temperature_bounds,
                }))?;
            } else {
                print!("{}", cli::render_options(&view));
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

async fn lookup_detail(
    dashboard: &Dashboard,
    args: &DetailArgs,
) -> weatherdash::Result<(CityRef, WeatherRecord)> {
    // unknown cities fail before any request is made
    let city = detail::resolve_city(&args.city, dashboard.registry())?.clone();
    let record = if args.live_lookup {
        dashboard.fetch_detail(&args.city).await?
    } else {
        dashboard.reload().await?;
        dashboard.detail(&args.city).await?
    };
    Ok((city, record))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn report(error: &anyhow::Error, verbose: bool) {
    match error.downcast_ref::<DashboardError>() {
        Some(dashboard_error) => {
            eprintln!("Error: {}", dashboard_error.user_message());
            if verbose || matches!(dashboard_error, DashboardError::Config { .. }) {
                eprintln!("  {dashboard_error}");
            }
        }
        None => eprintln!("Error: {error}"),
    }
    if verbose {
        eprintln!("{error:?}");
    }
}
