//! Command-line surface
//!
//! Argument definitions and plain-text rendering of the dashboard views.
//! Rendering returns strings so the binary decides where output goes.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::SourceKind;
use crate::engine::{DashboardView, StatValue};
use crate::models::{ALL, CityRef, FilterCriteria, WeatherRecord};
use crate::registry::CityRegistry;
use crate::{DashboardError, Result};

#[derive(Debug, Parser)]
#[command(name = "weatherdash", author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true, env = "WEATHERDASH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the configured weather source
    #[arg(long, global = true, value_enum)]
    pub source: Option<SourceArg>,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging and detailed error output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceArg {
    Live,
    Fixture,
}

impl From<SourceArg> for SourceKind {
    fn from(arg: SourceArg) -> Self {
        match arg {
            SourceArg::Live => SourceKind::Live,
            SourceArg::Fixture => SourceKind::Fixture,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Load all cities and show the filtered dashboard
    List(ListArgs),
    /// Show current weather for one city
    Detail(DetailArgs),
    /// List the registered cities
    Cities,
    /// Show the selectable conditions, continents and temperature range
    Options,
}

#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    /// Case-insensitive substring of the city name
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Exact condition description
    #[arg(long, default_value = ALL)]
    pub condition: String,

    /// Exact continent name
    #[arg(long, default_value = ALL)]
    pub continent: String,

    /// Lowest temperature to show, inclusive (°C)
    #[arg(long, allow_negative_numbers = true)]
    pub min_temp: Option<f64>,

    /// Highest temperature to show, inclusive (°C)
    #[arg(long, allow_negative_numbers = true)]
    pub max_temp: Option<f64>,
}

impl TryFrom<ListArgs> for FilterCriteria {
    type Error = DashboardError;

    fn try_from(args: ListArgs) -> Result<Self> {
        for (flag, value) in [("--min-temp", args.min_temp), ("--max-temp", args.max_temp)] {
            if value.is_some_and(|v| !v.is_finite()) {
                return Err(DashboardError::validation(format!(
                    "{flag} must be a finite number"
                )));
            }
        }
        Ok(Self {
            search_text: args.search,
            condition: args.condition,
            continent: args.continent,
            min_temp: args.min_temp,
            max_temp: args.max_temp,
        })
    }
}

#[derive(Debug, Clone, Args)]
pub struct DetailArgs {
    /// City name, plain or URL-encoded (e.g. "S%C3%A3o%20Paulo")
    pub city: String,

    /// Ask the weather source directly instead of loading every city
    #[arg(long)]
    pub live_lookup: bool,
}

fn format_stat(value: StatValue) -> String {
    match value {
        StatValue::Value(v) => format!("{v:.1}°C"),
        StatValue::NoData => value.to_string(),
    }
}

/// Text rendering of the list view
#[must_use]
pub fn render_view(view: &DashboardView, registry: &CityRegistry) -> String {
    let stats = &view.stats;
    let mut lines = vec![
        format!("Total Cities: {}", stats.count),
        format!("Average Temp: {}", format_stat(stats.avg_temp)),
        format!("Min Temp:     {}", format_stat(stats.min_temp)),
        format!("Max Temp:     {}", format_stat(stats.max_temp)),
        String::new(),
    ];

    if view.visible.is_empty() {
        lines.push("No cities match the current filters.".to_string());
        return join_lines(lines);
    }

    lines.push(format!(
        "{:<18} {:<3} {:<14} {:>8}  {:<24} Icon",
        "City", "CC", "Continent", "Temp", "Condition"
    ));
    lines.extend(view.visible.iter().map(|record| {
        format!(
            "{:<18} {:<3} {:<14} {:>8}  {:<24} {}",
            record.city_name,
            record.country_code,
            registry.continent_of(record).unwrap_or("-"),
            record.format_temperature(),
            record.condition_description,
            record.icon_url()
        )
    }));

    lines.push(String::new());
    lines.push("Average temperature by continent:".to_string());
    lines.extend(view.by_continent.iter().map(|entry| {
        let unit = if entry.count == 1 { "city" } else { "cities" };
        format!(
            "  {:<14} {:.1}°C ({} {unit})",
            entry.continent, entry.avg_temp, entry.count
        )
    }));

    lines.push(String::new());
    lines.push("Conditions:".to_string());
    lines.extend(
        view.by_condition
            .iter()
            .map(|entry| format!("  {:<24} {}", entry.condition, entry.count)),
    );
    join_lines(lines)
}

/// Text rendering of one city's detail view
#[must_use]
pub fn render_detail(record: &WeatherRecord, city: Option<&CityRef>) -> String {
    let heading = match city {
        Some(city) => city.to_string(),
        None => format!("{}, {}", record.city_name, record.country_code),
    };
    join_lines(vec![
        heading,
        format!("Temperature: {}", record.format_temperature()),
        format!("Condition:   {}", record.condition_description),
        format!("Icon:        {}", record.icon_url()),
        format!("Humidity:    {}", record.format_humidity()),
        format!("Wind:        {}", record.format_wind()),
        format!("Pressure:    {}", record.format_pressure()),
        format!("Visibility:  {}", record.format_visibility()),
    ])
}

/// Text rendering of the city registry
#[must_use]
pub fn render_cities(registry: &CityRegistry) -> String {
    join_lines(
        registry
            .cities()
            .iter()
            .map(|city| {
                format!(
                    "{:<18} {:<3} {:<14} {}",
                    city.name,
                    city.country_code,
                    city.continent,
                    city.detail_key()
                )
            })
            .collect(),
    )
}

/// Text rendering of the selector options
#[must_use]
pub fn render_options(view: &DashboardView) -> String {
    let range = match view.temperature_bounds {
        Some(bounds) => format!("{} to {} °C", bounds.min, bounds.max),
        None => "-".to_string(),
    };
    join_lines(vec![
        format!("Conditions: {}", view.conditions.join(", ")),
        format!("Continents: {}", view.continents.join(", ")),
        format!("Temperature range: {range}"),
    ])
}

/// Newline-terminated block
fn join_lines(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine;

    fn registry() -> CityRegistry {
        CityRegistry::new(vec![
            CityRef::new("Lagos", "NG", "Africa"),
            CityRef::new("Tokyo", "JP", "Asia"),
        ])
    }

    fn records() -> Vec<WeatherRecord> {
        vec![
            WeatherRecord::new("Lagos", "NG", 30.0, "Clear sky", "c01d"),
            WeatherRecord::new("Tokyo", "JP", 18.0, "Rain", "r01d"),
        ]
    }

    #[test]
    fn test_parse_list_filters() {
        let cli = Cli::try_parse_from([
            "weatherdash",
            "list",
            "--continent",
            "Asia",
            "--min-temp",
            "-5",
            "--json",
        ])
        .unwrap();
        assert!(cli.json);
        let Commands::List(args) = cli.command else {
            panic!("expected list command");
        };
        let criteria = FilterCriteria::try_from(args).unwrap();
        assert_eq!(criteria.continent, "Asia");
        assert_eq!(criteria.condition, ALL);
        assert_eq!(criteria.search_text, "");
        assert_eq!(criteria.min_temp, Some(-5.0));
        assert_eq!(criteria.max_temp, None);
    }

    #[test]
    fn test_non_finite_bound_is_rejected() {
        let cli = Cli::try_parse_from(["weatherdash", "list", "--max-temp", "NaN"]).unwrap();
        let Commands::List(args) = cli.command else {
            panic!("expected list command");
        };
        let err = FilterCriteria::try_from(args).unwrap_err();
        assert!(matches!(err, DashboardError::Validation { .. }));
    }

    #[test]
    fn test_parse_source_override() {
        let cli = Cli::try_parse_from(["weatherdash", "--source", "live", "cities"]).unwrap();
        assert_eq!(cli.source.map(SourceKind::from), Some(SourceKind::Live));
        assert!(matches!(cli.command, Commands::Cities));
    }

    #[test]
    fn test_parse_detail() {
        let cli =
            Cli::try_parse_from(["weatherdash", "detail", "S%C3%A3o%20Paulo", "--live-lookup"])
                .unwrap();
        let Commands::Detail(args) = cli.command else {
            panic!("expected detail command");
        };
        assert_eq!(args.city, "S%C3%A3o%20Paulo");
        assert!(args.live_lookup);
    }

    #[test]
    fn test_render_view_lists_stats_and_rows() {
        let registry = registry();
        let view = engine::evaluate(&records(), &FilterCriteria::default(), &registry);
        let text = render_view(&view, &registry);
        assert!(text.contains("Total Cities: 2"));
        assert!(text.contains("Average Temp: 24.0°C"));
        assert!(text.contains("Max Temp:     30.0°C"));
        assert!(text.contains("https://www.weatherbit.io/static/img/icons/r01d.png"));
        assert!(text.contains("Africa"));
    }

    #[test]
    fn test_render_view_empty_uses_placeholder() {
        let registry = registry();
        let criteria = FilterCriteria {
            search_text: "zzz".to_string(),
            ..FilterCriteria::default()
        };
        let view = engine::evaluate(&records(), &criteria, &registry);
        let text = render_view(&view, &registry);
        assert!(text.contains("Total Cities: 0"));
        assert!(text.contains("Average Temp: -"));
        assert!(text.contains("No cities match"));
    }

    #[test]
    fn test_render_detail_missing_fields() {
        let record = WeatherRecord::new("Tokyo", "JP", 18.0, "Rain", "r01d");
        let city = CityRef::new("Tokyo", "JP", "Asia");
        let text = render_detail(&record, Some(&city));
        assert!(text.starts_with("Tokyo, JP (Asia)"));
        assert!(text.contains("Temperature: 18.0°C"));
        assert!(text.contains("Humidity:    -"));
    }

    #[test]
    fn test_render_options() {
        let registry = registry();
        let view = engine::evaluate(&records(), &FilterCriteria::default(), &registry);
        let text = render_options(&view);
        assert!(text.contains("Conditions: All, Clear sky, Rain"));
        assert!(text.contains("Continents: All, Africa, Asia"));
        assert!(text.contains("Temperature range: 18 to 30 °C"));
    }
}
